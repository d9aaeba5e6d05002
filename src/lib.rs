//! Terrain autotiling library
//!
//! Turns a height grid into biome labels and picks, per cell, the tile
//! variant that draws smooth coastlines and sand fringes between biomes.

pub mod adjacency;
pub mod ascii;
pub mod autotile;
pub mod bands;
pub mod biomes;
pub mod config;
pub mod decoration;
pub mod error;
pub mod export;
pub mod heightmap;
pub mod placement;
pub mod tilemap;
pub mod variants;

pub use autotile::{generate, AutotilePass, AutotileStats, Autotiler};
pub use bands::{BandTable, ThresholdBand};
pub use biomes::{Biome, BiomeGrid};
pub use error::{AutotileError, Result};
pub use placement::{Layer, LayeredTilemap, Placement, PlacementLog, TileLayerSink};
pub use variants::TileVariant;
