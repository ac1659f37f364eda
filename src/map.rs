use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::error::{Result, TerrainError};
use crate::stats::{TerrainStats, summarize};
use crate::terrain::{GenerationRequest, Tile, generate_terrain};

/// Сгенерированная карта: тайлы в порядке обхода (x снаружи, y внутри).
#[derive(Debug, Clone)]
pub struct TerrainMap {
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    pub tiles: Vec<Tile>,
}

/// Прямоугольная видимая область в координатах тайлов.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && u64::from(x) < u64::from(self.x) + u64::from(self.width)
            && u64::from(y) < u64::from(self.y) + u64::from(self.height)
    }
}

impl TerrainMap {
    pub fn generate(request: &GenerationRequest) -> Result<Self> {
        let tiles = generate_terrain(request)?;
        Ok(Self {
            width: request.width,
            height: request.height,
            seed: request.seed,
            tiles,
        })
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles
            .get(x as usize * self.height as usize + y as usize)
    }

    #[must_use]
    pub fn stats(&self) -> TerrainStats {
        summarize(&self.tiles)
    }

    /// Тайлы внутри области, обрезанной по границам карты, в порядке генерации.
    pub fn viewport(&self, view: Viewport) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(move |t| view.contains(t.x, t.y))
    }

    /// Рисует карту: каждый тайл становится квадратом `tile_size`×`tile_size`,
    /// X идёт по столбцам изображения, Y по строкам.
    pub fn to_rgb_image(&self, tile_size: u32) -> Result<RgbImage> {
        let invalid = || TerrainError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        if tile_size == 0 {
            return Err(invalid());
        }
        // Стороны должны помещаться в i32 (координаты Rect), буфер RGB в usize.
        let side = |tiles: u32| {
            let px = u64::from(tiles) * u64::from(tile_size);
            u32::try_from(px)
                .ok()
                .filter(|&v| i32::try_from(v).is_ok())
                .ok_or_else(invalid)
        };
        let img_w = side(self.width)?;
        let img_h = side(self.height)?;
        u64::from(img_w)
            .checked_mul(u64::from(img_h))
            .and_then(|px| px.checked_mul(3))
            .and_then(|len| usize::try_from(len).ok())
            .ok_or_else(invalid)?;

        let mut img = RgbImage::new(img_w, img_h);
        for tile in &self.tiles {
            let rect = Rect::at((tile.x * tile_size) as i32, (tile.y * tile_size) as i32)
                .of_size(tile_size, tile_size);
            draw_filled_rect_mut(&mut img, rect, Rgb(tile.terrain_type.to_rgb()));
        }
        Ok(img)
    }

    pub fn save_as_png(&self, path: &str, tile_size: u32) -> Result<()> {
        self.to_rgb_image(tile_size)?
            .save(path)
            .map_err(|e| TerrainError::Render(e.to_string()))
    }
}
