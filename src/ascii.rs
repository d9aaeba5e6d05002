//! ASCII rendering of biome grids and adjacency masks, for eyeballing a pass
//! in a terminal or a text file.
//!
//! Rows are printed along `x` (north at the top), columns along `y`, so the
//! picture matches the north/west/east/south naming used by the masks.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

use crate::adjacency::{compute_mask, AdjacencyMask};
use crate::biomes::{Biome, BiomeGrid};

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// One character per biome
    Biome,
    /// Cardinal mask as a hex digit; `#` where the full mask was read
    Mask,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Biome => "Biome",
            AsciiMode::Mask => "Mask",
        }
    }
}

/// Get ASCII character for a biome
pub fn biome_char(biome: Biome) -> char {
    match biome {
        Biome::Water => '~',
        Biome::Sand => '.',
        Biome::Grass => '"',
        Biome::Upland(_) => '^',
    }
}

fn mask_char(grid: &BiomeGrid, x: usize, y: usize) -> char {
    match compute_mask(grid, x, y) {
        None => ' ',
        Some(AdjacencyMask::Cardinal(m)) => char::from_digit(m as u32, 16).unwrap_or('?'),
        Some(AdjacencyMask::Full { full: 0, .. }) => '0',
        Some(AdjacencyMask::Full { .. }) => '#',
    }
}

/// Render the grid as text, one line per `x`.
pub fn render_ascii(grid: &BiomeGrid, mode: AsciiMode) -> String {
    let mut out = String::with_capacity((grid.height() + 1) * grid.width());
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            out.push(match mode {
                AsciiMode::Biome => biome_char(grid.get(x, y)),
                AsciiMode::Mask => mask_char(grid, x, y),
            });
        }
        out.push('\n');
    }
    out
}

/// Write both renderings to a text file with a short header.
pub fn export_ascii(grid: &BiomeGrid, seed: u64, path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "=== AUTOTILE DEBUG MAP ({}x{}) seed={} ===", grid.width(), grid.height(), seed)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;
    writeln!(file, "LEGEND:")?;
    writeln!(file, "  ~ = Water   . = Sand   \" = Grass   ^ = Upland")?;
    writeln!(file, "  masks: hex = cardinal transition, # = full mask read, 0 = no edges, blank = border")?;

    for mode in [AsciiMode::Biome, AsciiMode::Mask] {
        writeln!(file)?;
        writeln!(file, "{} MAP:", mode.name().to_uppercase())?;
        write!(file, "{}", render_ascii(grid, mode))?;
    }

    Ok(())
}
