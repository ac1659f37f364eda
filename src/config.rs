// src/config.rs
//! Запрос на генерацию мира
//!
//! Один и тот же тип описывает:
//! - тело HTTP-запроса `{ name, mapSize: { width, height }, settings }` (JSON)
//! - конфигурационный файл CLI (TOML)
//!
//! Пропущенные поля заполняются значениями по умолчанию.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::cursor::resolve_seed;
use crate::error::{Result, TerrainError};
use crate::terrain::GenerationRequest;

/// Размер карты в тайлах.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSize {
    /// Ширина (количество столбцов)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота (количество строк)
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    100
}
fn default_height() -> u32 {
    60
}

impl Default for MapSize {
    fn default() -> Self {
        Self {
            width: 100,
            height: 60,
        }
    }
}

/// Дополнительные настройки генерации.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Сид. Если не задан, выбирается при генерации и сохраняется в метаданных мира.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

/// Запрос на создание мира
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRequest {
    /// Название мира
    #[serde(default = "default_name")]
    pub name: String,

    /// Размер карты (по умолчанию 100×60)
    #[serde(default)]
    pub map_size: MapSize,

    #[serde(default)]
    pub settings: WorldSettings,
}

fn default_name() -> String {
    "New World".to_string()
}

impl Default for WorldRequest {
    fn default() -> Self {
        Self {
            name: default_name(),
            map_size: MapSize::default(),
            settings: WorldSettings::default(),
        }
    }
}

impl WorldRequest {
    /// Загружает запрос из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # world.toml
    /// name = "Valley"
    ///
    /// [mapSize]
    /// width = 64
    /// height = 48
    ///
    /// [settings]
    /// seed = 42
    /// ```
    pub fn from_toml_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| TerrainError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            TerrainError::Config { message, .. } => TerrainError::Config {
                path: path.to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| TerrainError::Config {
            path: "<toml>".to_string(),
            message: e.to_string(),
        })
    }

    /// Разбирает тело HTTP-запроса.
    pub fn from_json_str(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| TerrainError::Config {
            path: "<json>".to_string(),
            message: e.to_string(),
        })
    }

    /// Фиксирует сид и проверяет размеры.
    ///
    /// `entropy` используется только если сид в настройках не задан.
    pub fn to_generation_request(&self, entropy: u32) -> Result<GenerationRequest> {
        GenerationRequest::new(
            self.map_size.width,
            self.map_size.height,
            resolve_seed(self.settings.seed, entropy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_with_defaults() {
        let req = WorldRequest::from_toml_str("name = \"Valley\"").unwrap();
        assert_eq!(req.name, "Valley");
        assert_eq!(req.map_size, MapSize::default());
        assert_eq!(req.settings.seed, None);
    }

    #[test]
    fn toml_full() {
        let req = WorldRequest::from_toml_str(
            "name = \"Valley\"\n[mapSize]\nwidth = 64\nheight = 48\n[settings]\nseed = 42\n",
        )
        .unwrap();
        assert_eq!(
            req.map_size,
            MapSize {
                width: 64,
                height: 48
            }
        );
        assert_eq!(req.settings.seed, Some(42));
    }

    #[test]
    fn json_body() {
        let req = WorldRequest::from_json_str(
            r#"{"name":"Isle","mapSize":{"width":10,"height":8},"settings":{}}"#,
        )
        .unwrap();
        assert_eq!(req.name, "Isle");
        assert_eq!(req.map_size.width, 10);
        assert_eq!(req.map_size.height, 8);
    }

    #[test]
    fn bad_json_is_config_error() {
        assert!(matches!(
            WorldRequest::from_json_str("{not json"),
            Err(TerrainError::Config { .. })
        ));
    }

    #[test]
    fn explicit_seed_is_kept() {
        let mut req = WorldRequest::default();
        req.settings.seed = Some(42);
        assert_eq!(req.to_generation_request(7).unwrap().seed, 42);
    }

    #[test]
    fn missing_seed_comes_from_entropy() {
        let req = WorldRequest::default();
        assert_eq!(req.to_generation_request(42).unwrap().seed, 885_883);
    }

    #[test]
    fn zero_size_rejected() {
        let req = WorldRequest {
            map_size: MapSize {
                width: 0,
                height: 10,
            },
            ..WorldRequest::default()
        };
        assert!(matches!(
            req.to_generation_request(1),
            Err(TerrainError::InvalidDimensions { .. })
        ));
    }
}
