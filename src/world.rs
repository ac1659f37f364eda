//! Граница с внешними потребителями: метаданные мира, строки хранилища
//! и JSON-конверт ответа.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::WorldRequest;
use crate::error::{Result, TerrainError};
use crate::map::TerrainMap;
use crate::stats::TerrainStats;
use crate::terrain::TerrainType;

/// Метаданные мира, хранятся рядом с тайлами.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMetadata {
    pub generation_seed: u32,
    pub generation_time_ms: u64,
    pub terrain_stats: TerrainStats,
}

/// Строка хранилища, ключ `(world_id, x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTile {
    pub world_id: String,
    pub x: u32,
    pub y: u32,
    pub terrain_type: TerrainType,
}

#[derive(Debug, Clone)]
pub struct GeneratedWorld {
    pub name: String,
    pub map: TerrainMap,
    pub metadata: WorldMetadata,
}

/// Генерирует мир по запросу и замеряет время генерации.
pub fn generate_world(request: &WorldRequest, entropy: u32) -> Result<GeneratedWorld> {
    let generation = request.to_generation_request(entropy)?;

    let started = Instant::now();
    let map = TerrainMap::generate(&generation)?;
    let terrain_stats = map.stats();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    info!(
        name = %request.name,
        width = generation.width,
        height = generation.height,
        seed = generation.seed,
        tiles = map.tiles.len(),
        elapsed_ms,
        "World generated"
    );

    Ok(GeneratedWorld {
        name: request.name.clone(),
        metadata: WorldMetadata {
            generation_seed: generation.seed,
            generation_time_ms: elapsed_ms,
            terrain_stats,
        },
        map,
    })
}

impl GeneratedWorld {
    /// Строки для сохранения тайлов под идентификатором `world_id`.
    #[must_use]
    pub fn stored_tiles(&self, world_id: &str) -> Vec<StoredTile> {
        self.map
            .tiles
            .iter()
            .map(|t| StoredTile {
                world_id: world_id.to_string(),
                x: t.x,
                y: t.y,
                terrain_type: t.terrain_type,
            })
            .collect()
    }
}

/// Полезная нагрузка успешного ответа.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSummary {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    pub tiles_generated: usize,
    /// Время генерации в миллисекундах.
    pub generation_time: u64,
    pub terrain_stats: TerrainStats,
}

/// Конверт ответа: `{ success, data }` или `{ success: false, error }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<WorldSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    #[must_use]
    pub fn success(world: &GeneratedWorld) -> Self {
        Self {
            success: true,
            data: Some(WorldSummary {
                name: world.name.clone(),
                width: world.map.width,
                height: world.map.height,
                seed: world.metadata.generation_seed,
                tiles_generated: world.map.tiles.len(),
                generation_time: world.metadata.generation_time_ms,
                terrain_stats: world.metadata.terrain_stats.clone(),
            }),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: &TerrainError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TerrainError::Serialize(e.to_string()))
    }
}

/// Обрабатывает JSON-тело запроса и всегда возвращает конверт.
#[must_use]
pub fn handle_request(body: &str, entropy: u32) -> Envelope {
    match WorldRequest::from_json_str(body).and_then(|req| generate_world(&req, entropy)) {
        Ok(world) => Envelope::success(&world),
        Err(e) => Envelope::failure(&e),
    }
}
