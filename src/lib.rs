pub mod config;
pub mod cursor;
pub mod error;
pub mod map;
pub mod noise;
pub mod stats;
pub mod terrain;
pub mod world;

pub use config::{MapSize, WorldRequest, WorldSettings};
pub use error::{Result, TerrainError};
pub use map::{TerrainMap, Viewport};
pub use stats::{TerrainStats, summarize};
pub use terrain::{GenerationRequest, TerrainType, Tile, generate, generate_terrain};
pub use world::{Envelope, GeneratedWorld, WorldMetadata, generate_world};
