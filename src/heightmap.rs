//! Height grid inputs.
//!
//! The autotiler consumes a height grid produced elsewhere. This module reads
//! one from a JSON file, or synthesises an island-shaped fBm field so the
//! command line tool has something to tile without an upstream generator.

use std::fs;
use std::path::Path;

use noise::{NoiseFn, Perlin, Seedable};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tilemap::Tilemap;

// =============================================================================
// FILE INPUT
// =============================================================================

/// On-disk height grid: `samples[y * width + x]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightGridFile {
    pub width: usize,
    pub height: usize,
    pub samples: Vec<f32>,
}

impl HeightGridFile {
    pub fn into_tilemap(self) -> Result<Tilemap<f32>> {
        Tilemap::from_vec(self.width, self.height, self.samples)
    }

    pub fn from_tilemap(heights: &Tilemap<f32>) -> Self {
        Self {
            width: heights.width,
            height: heights.height,
            samples: heights.as_slice().to_vec(),
        }
    }
}

/// Load a height grid from JSON, checking its declared shape.
pub fn load_heightmap(path: impl AsRef<Path>) -> Result<Tilemap<f32>> {
    let path = path.as_ref();
    let file: HeightGridFile = serde_json::from_str(&fs::read_to_string(path)?)?;
    log::info!(
        "Loaded {}x{} height grid from {}",
        file.width,
        file.height,
        path.display()
    );
    file.into_tilemap()
}

pub fn save_heightmap(heights: &Tilemap<f32>, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string(&HeightGridFile::from_tilemap(heights))?;
    fs::write(path, json)?;
    Ok(())
}

// =============================================================================
// SYNTHETIC ISLANDS
// =============================================================================

/// Parameters for the synthetic island field.
#[derive(Clone, Debug)]
pub struct IslandParams {
    /// Base noise frequency across the whole map
    pub frequency: f64,
    pub octaves: u32,
    /// Amplitude falloff per octave
    pub persistence: f64,
    /// Frequency growth per octave
    pub lacunarity: f64,
    /// How strongly height drops towards the map edge (0 = no falloff)
    pub falloff: f32,
}

impl Default for IslandParams {
    fn default() -> Self {
        Self {
            frequency: 4.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            falloff: 0.8,
        }
    }
}

/// Generate a height field normalized to [0, 1], higher towards the centre.
pub fn generate_island(width: usize, height: usize, seed: u64, params: &IslandParams) -> Tilemap<f32> {
    let noise = Perlin::new(1).set_seed(seed as u32);

    let mut heights = Tilemap::from_fn(width, height, |x, y| {
        let nx = x as f64 / width.max(1) as f64;
        let ny = y as f64 / height.max(1) as f64;
        let n = fbm(
            &noise,
            nx * params.frequency,
            ny * params.frequency,
            params.octaves,
            params.persistence,
            params.lacunarity,
        ) as f32;

        // Radial falloff so the field reads as an island in open water
        let dx = nx as f32 * 2.0 - 1.0;
        let dy = ny as f32 * 2.0 - 1.0;
        let dist = (dx * dx + dy * dy).sqrt().min(1.0);
        (n * 0.5 + 0.5) - dist * dist * params.falloff
    });

    normalize(&mut heights);
    heights
}

/// Rescale values in place to span [0, 1]. A flat map becomes all zeros.
pub fn normalize(heights: &mut Tilemap<f32>) {
    let mut min_h = f32::MAX;
    let mut max_h = f32::MIN;
    for (_, _, &h) in heights.iter() {
        if h < min_h { min_h = h; }
        if h > max_h { max_h = h; }
    }

    let range = max_h - min_h;
    for (_, _, h) in heights.iter_mut() {
        *h = if range > f32::EPSILON { (*h - min_h) / range } else { 0.0 };
    }
}

/// Fractional Brownian Motion noise
fn fbm(
    noise: &impl NoiseFn<f64, 2>,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 { total / max_value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutotileError;

    #[test]
    fn test_island_is_normalized() {
        let heights = generate_island(64, 48, 12345, &IslandParams::default());
        assert_eq!(heights.len(), 64 * 48);
        let min = heights.iter().map(|(_, _, &h)| h).fold(f32::MAX, f32::min);
        let max = heights.iter().map(|(_, _, &h)| h).fold(f32::MIN, f32::max);
        assert!((min - 0.0).abs() < 1e-5);
        assert!((max - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_island_is_deterministic() {
        let params = IslandParams::default();
        assert_eq!(generate_island(32, 32, 7, &params), generate_island(32, 32, 7, &params));
    }

    #[test]
    fn test_island_centre_above_edges() {
        let heights = generate_island(64, 64, 3, &IslandParams { falloff: 1.5, ..Default::default() });
        let corner_avg = (heights.get(0, 0) + heights.get(63, 0) + heights.get(0, 63) + heights.get(63, 63)) / 4.0;
        assert!(*heights.get(32, 32) > corner_avg);
    }

    #[test]
    fn test_normalize_flat_map() {
        let mut flat = Tilemap::new_with(4, 4, 0.7f32);
        normalize(&mut flat);
        assert!(flat.iter().all(|(_, _, &h)| h == 0.0));
    }

    #[test]
    fn test_file_shape_is_checked() {
        let file = HeightGridFile { width: 3, height: 2, samples: vec![0.0; 5] };
        assert!(matches!(file.into_tilemap(), Err(AutotileError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_file_round_trip() {
        let heights = Tilemap::from_fn(5, 3, |x, y| (x + y * 5) as f32 / 15.0);
        let path = std::env::temp_dir().join(format!("autotile_heights_{}.json", std::process::id()));
        save_heightmap(&heights, &path).unwrap();
        let loaded = load_heightmap(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, heights);
    }
}
