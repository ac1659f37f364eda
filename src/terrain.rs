//! Типы местности, классификатор и обход карты.

use crate::error::{Result, TerrainError};
use crate::noise::{ELEVATION_SCALE, MOISTURE_SCALE, sample};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Тип местности тайла.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainType {
    Plains,
    Forest,
    Mountain,
    River,
    Lake,
}

impl TerrainType {
    /// Все типы в порядке объявления.
    pub const ALL: [TerrainType; 5] = [
        TerrainType::Plains,
        TerrainType::Forest,
        TerrainType::Mountain,
        TerrainType::River,
        TerrainType::Lake,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TerrainType::Plains => "plains",
            TerrainType::Forest => "forest",
            TerrainType::Mountain => "mountain",
            TerrainType::River => "river",
            TerrainType::Lake => "lake",
        }
    }

    /// Цвет тайла на превью-карте.
    #[must_use]
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            TerrainType::Plains => [150, 200, 100],
            TerrainType::Forest => [60, 120, 60],
            TerrainType::Mountain => [150, 150, 150],
            TerrainType::River => [70, 130, 200],
            TerrainType::Lake => [0, 64, 128],
        }
    }
}

impl std::fmt::Display for TerrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Одна клетка карты.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub terrain_type: TerrainType,
}

/// Параметры одного вызова генерации. Сид уже выбран
/// (см. [`crate::cursor::resolve_seed`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub width: u32,
    pub height: u32,
    pub seed: u32,
}

impl GenerationRequest {
    pub fn new(width: u32, height: u32, seed: u32) -> Result<Self> {
        let request = Self {
            width,
            height,
            seed,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Количество тайлов `width * height`.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Классифицирует тайл по высоте и влажности. Правила проверяются
/// по порядку, срабатывает первое:
///
/// 1. `elevation < 0.2` → озеро
/// 2. `elevation < 0.3` и `moisture > 0.6` → река
/// 3. `elevation > 0.7` → горы
/// 4. `moisture > 0.5` → лес
/// 5. иначе → равнина
///
/// # Примеры
/// ```
/// use terrain_gen::terrain::{TerrainType, classify};
/// assert_eq!(classify(0.1, 0.9), TerrainType::Lake);
/// assert_eq!(classify(0.25, 0.9), TerrainType::River);
/// ```
#[must_use]
pub fn classify(elevation: f64, moisture: f64) -> TerrainType {
    if elevation < 0.2 {
        TerrainType::Lake
    } else if elevation < 0.3 && moisture > 0.6 {
        TerrainType::River
    } else if elevation > 0.7 {
        TerrainType::Mountain
    } else if moisture > 0.5 {
        TerrainType::Forest
    } else {
        TerrainType::Plains
    }
}

fn checked_sample(x: f64, y: f64, scale: f64, field: &'static str) -> Result<f64> {
    let value = sample(x, y, scale)?;
    if !value.is_finite() {
        warn!(x, y, field, "Non-finite noise sample");
        return Err(TerrainError::NumericDomain { x, y, field });
    }
    Ok(value)
}

/// Тайл в точке `(x, y)`. Зависит только от координат.
pub fn tile_at(x: u32, y: u32) -> Result<Tile> {
    let fx = f64::from(x);
    let fy = f64::from(y);
    let elevation = checked_sample(fx, fy, ELEVATION_SCALE, "elevation")?;
    let moisture = checked_sample(fx, fy, MOISTURE_SCALE, "moisture")?;
    Ok(Tile {
        x,
        y,
        terrain_type: classify(elevation, moisture),
    })
}

/// Генерирует все тайлы карты.
///
/// Порядок обхода: `x` снаружи, `y` внутри, т.е. тайл с индексом `i`
/// имеет `x = i / height`, `y = i % height`. Сид на результат не влияет:
/// шум зависит только от координат.
pub fn generate_terrain(request: &GenerationRequest) -> Result<Vec<Tile>> {
    request.validate()?;
    let height = request.height as usize;
    let at_index = |i: usize| tile_at((i / height) as u32, (i % height) as u32);

    #[cfg(feature = "parallel")]
    let tiles = (0..request.tile_count())
        .into_par_iter()
        .map(at_index)
        .collect::<Result<Vec<Tile>>>()?;

    #[cfg(not(feature = "parallel"))]
    let tiles = (0..request.tile_count())
        .map(at_index)
        .collect::<Result<Vec<Tile>>>()?;

    Ok(tiles)
}

/// Короткая форма: `generate(width, height, seed)`.
pub fn generate(width: u32, height: u32, seed: u32) -> Result<Vec<Tile>> {
    generate_terrain(&GenerationRequest::new(width, height, seed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lake_wins_over_river() {
        assert_eq!(classify(0.1, 0.9), TerrainType::Lake);
        assert_eq!(classify(0.15, 0.0), TerrainType::Lake);
    }

    #[test]
    fn classifier_thresholds() {
        assert_eq!(classify(0.2, 0.9), TerrainType::River);
        assert_eq!(classify(0.29, 0.61), TerrainType::River);
        assert_eq!(classify(0.29, 0.6), TerrainType::Forest);
        assert_eq!(classify(0.29, 0.45), TerrainType::Plains);
        assert_eq!(classify(0.3, 0.9), TerrainType::Forest);
        assert_eq!(classify(0.7, 0.9), TerrainType::Forest);
        assert_eq!(classify(0.71, 0.9), TerrainType::Mountain);
        assert_eq!(classify(0.5, 0.51), TerrainType::Forest);
        assert_eq!(classify(0.5, 0.5), TerrainType::Plains);
    }

    #[test]
    fn golden_two_by_two() {
        let tiles = generate(2, 2, 42).unwrap();
        let coords: Vec<(u32, u32)> = tiles.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(tiles.iter().all(|t| t.terrain_type == TerrainType::Lake));
    }

    #[test]
    fn single_tile() {
        let tiles = generate(1, 1, 0).unwrap();
        assert_eq!(tiles.len(), 1);
        assert_eq!((tiles[0].x, tiles[0].y), (0, 0));
    }

    #[test]
    fn known_tiles() {
        assert_eq!(tile_at(10, 5).unwrap().terrain_type, TerrainType::Lake);
        assert_eq!(tile_at(25, 0).unwrap().terrain_type, TerrainType::Forest);
        assert_eq!(tile_at(49, 29).unwrap().terrain_type, TerrainType::Mountain);
        assert_eq!(tile_at(75, 40).unwrap().terrain_type, TerrainType::Plains);
        assert_eq!(tile_at(0, 169).unwrap().terrain_type, TerrainType::River);
    }

    #[test]
    fn zero_dimensions_fail() {
        assert!(matches!(
            generate(0, 5, 1),
            Err(TerrainError::InvalidDimensions {
                width: 0,
                height: 5
            })
        ));
        assert!(matches!(
            generate(5, 0, 1),
            Err(TerrainError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn seed_does_not_change_terrain() {
        assert_eq!(generate(16, 9, 1).unwrap(), generate(16, 9, 999).unwrap());
    }

    #[test]
    fn serializes_like_the_client_expects() {
        let tile = Tile {
            x: 3,
            y: 4,
            terrain_type: TerrainType::Mountain,
        };
        let json = serde_json::to_value(tile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "x": 3, "y": 4, "terrainType": "mountain" })
        );
    }
}
