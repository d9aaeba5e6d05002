//! Exports of a finished pass: a JSON tile document and a PNG preview.

use std::fs;
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::autotile::AutotileStats;
use crate::biomes::{Biome, BiomeCounts, BiomeGrid};
use crate::error::Result;
use crate::placement::{Layer, LayeredTilemap};
use crate::variants::TileVariant;

// =============================================================================
// JSON DOCUMENT
// =============================================================================

/// One cell of the exported document.
#[derive(Clone, Debug, Serialize)]
pub struct CellRecord {
    pub x: usize,
    pub y: usize,
    pub biome: Biome,
    pub water: Option<TileVariant>,
    pub land: Option<TileVariant>,
}

/// Everything a tile renderer needs to paint the map.
#[derive(Clone, Debug, Serialize)]
pub struct TileDocument {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub biome_counts: BiomeCounts,
    pub stats: AutotileStats,
    pub cells: Vec<CellRecord>,
}

impl TileDocument {
    pub fn new(biomes: &BiomeGrid, canvas: &LayeredTilemap, stats: AutotileStats, seed: u64) -> Self {
        let cells = biomes
            .iter()
            .map(|(x, y, biome)| CellRecord {
                x,
                y,
                biome,
                water: canvas.get(Layer::Water, x, y),
                land: canvas.get(Layer::Land, x, y),
            })
            .collect();

        Self {
            width: biomes.width(),
            height: biomes.height(),
            seed,
            biome_counts: biomes.counts(),
            stats,
            cells,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

// =============================================================================
// PNG PREVIEW
// =============================================================================

/// Pixels per cell in the preview image.
pub const PREVIEW_CELL_SIZE: u32 = 4;

/// Render each cell as a flat block coloured by biome, shaded by what was
/// placed on top: transition tiles darker, decorations lighter.
pub fn render_preview(biomes: &BiomeGrid, canvas: &LayeredTilemap, cell_size: u32) -> RgbImage {
    let cell_size = cell_size.max(1);
    let mut img: RgbImage = ImageBuffer::new(
        biomes.width() as u32 * cell_size,
        biomes.height() as u32 * cell_size,
    );

    for (x, y, biome) in biomes.iter() {
        let base = biome_color(biome);
        let color = match canvas.get(biome.layer(), x, y) {
            Some(v) if v == biome.base_tile() => base,
            Some(v) if is_decoration(v) => shade(base, 1.25),
            Some(_) => shade(base, 0.7),
            None => [0, 0, 0],
        };

        let px = x as u32 * cell_size;
        let py = y as u32 * cell_size;
        for dy in 0..cell_size {
            for dx in 0..cell_size {
                img.put_pixel(px + dx, py + dy, Rgb(color));
            }
        }
    }

    img
}

pub fn export_preview(
    biomes: &BiomeGrid,
    canvas: &LayeredTilemap,
    path: impl AsRef<Path>,
) -> Result<()> {
    render_preview(biomes, canvas, PREVIEW_CELL_SIZE).save(path)?;
    Ok(())
}

/// Preview colour for a biome.
pub fn biome_color(biome: Biome) -> [u8; 3] {
    match biome {
        Biome::Water => [40, 110, 190],
        Biome::Sand => [225, 205, 140],
        Biome::Grass => [90, 160, 70],
        Biome::Upland(band) => {
            // Lighter grey for each band above grass
            let step = (band.saturating_sub(3) as u32 * 20).min(100) as u8;
            [120 + step, 120 + step, 115 + step]
        }
    }
}

fn is_decoration(variant: TileVariant) -> bool {
    !variant.animated && (103..=114).contains(&variant.id)
}

fn shade(color: [u8; 3], factor: f32) -> [u8; 3] {
    color.map(|c| (c as f32 * factor).round().clamp(0.0, 255.0) as u8)
}
