//! Debug script: tally which adjacency masks a synthetic island produces per
//! biome, and how many of them the lookup tables actually cover.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;

use terrain_autotiler::adjacency::{compute_mask, AdjacencyMask};
use terrain_autotiler::ascii::export_ascii;
use terrain_autotiler::bands::BandTable;
use terrain_autotiler::biomes::BiomeGrid;
use terrain_autotiler::heightmap::{generate_island, IslandParams};
use terrain_autotiler::variants::{resolve, Resolution};

const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const SEED: u64 = 12345;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let heights = generate_island(WIDTH, HEIGHT, SEED, &IslandParams::default());
    let grid = BiomeGrid::build(&heights, &BandTable::default());

    // (biome, mask) -> (cells, resolution)
    let mut tally: BTreeMap<(String, String), (usize, &'static str)> = BTreeMap::new();

    for (x, y, biome) in grid.iter() {
        let Some(mask) = compute_mask(&grid, x, y) else {
            continue;
        };
        let label = match mask {
            AdjacencyMask::Cardinal(m) => format!("card {m:>2}"),
            AdjacencyMask::Full { cardinal, full } => format!("full {full:>3} (card {cardinal:>2})"),
        };
        let outcome = match resolve(biome, mask) {
            Resolution::Variant(_) => "tile",
            Resolution::Decorate(_) => "decorate",
            Resolution::Keep => "keep",
        };
        tally.entry((biome.to_string(), label)).or_insert((0, outcome)).0 += 1;
    }

    let mut file = File::create("mask_debug.txt")?;
    writeln!(file, "=== MASK TALLY ({}x{}) seed={} ===", WIDTH, HEIGHT, SEED)?;
    for ((biome, label), (count, outcome)) in &tally {
        writeln!(file, "  {biome:<8} {label:<22} {count:>6}  {outcome}")?;
    }

    let misses: usize = tally
        .values()
        .filter(|(_, outcome)| *outcome == "keep")
        .map(|(count, _)| count)
        .sum();
    writeln!(file, "\nCells left on their base tile: {misses}")?;

    export_ascii(&grid, SEED, "mask_debug_map.txt")?;
    println!("Wrote mask_debug.txt and mask_debug_map.txt");
    Ok(())
}
