//! Biome labels and the per-pass biome grid.

use serde::{Deserialize, Serialize};

use crate::bands::BandTable;
use crate::placement::Layer;
use crate::tilemap::Tilemap;
use crate::variants::TileVariant;

// =============================================================================
// BIOME LABELS
// =============================================================================

/// Terrain label derived from an elevation band.
///
/// Bands 0-2 carry the names used by the beach tileset. Any band above that
/// is an `Upland` keeping its band index, and is tiled like grass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    #[default]
    Water,
    Sand,
    Grass,
    Upland(u8),
}

impl Biome {
    /// Label for band `index`. Band indices past 255 saturate.
    pub fn from_band(index: usize) -> Self {
        match index {
            0 => Biome::Water,
            1 => Biome::Sand,
            2 => Biome::Grass,
            n => Biome::Upland(n.min(u8::MAX as usize) as u8),
        }
    }

    pub fn band(self) -> usize {
        match self {
            Biome::Water => 0,
            Biome::Sand => 1,
            Biome::Grass => 2,
            Biome::Upland(n) => n as usize,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Water => "water",
            Biome::Sand => "sand",
            Biome::Grass => "grass",
            Biome::Upland(_) => "upland",
        }
    }

    /// The neighbouring label this biome blends into without drawing an edge.
    ///
    /// Sand runs straight into water and everything above sand runs into the
    /// sand fringe, so those neighbours never count as a transition.
    pub fn blends_into(self) -> Option<Biome> {
        match self {
            Biome::Water => None,
            Biome::Sand => Some(Biome::Water),
            Biome::Grass | Biome::Upland(_) => Some(Biome::Sand),
        }
    }

    /// Tile layer this biome's tiles are painted on.
    pub fn layer(self) -> Layer {
        match self {
            Biome::Water => Layer::Water,
            _ => Layer::Land,
        }
    }

    /// Plain sprite laid down for this biome before any transition tiling.
    pub fn base_tile(self) -> TileVariant {
        match self {
            Biome::Water => TileVariant::sprite(20),
            Biome::Sand => TileVariant::sprite(8),
            Biome::Grass | Biome::Upland(_) => TileVariant::sprite(6),
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Biome::Upland(n) => write!(f, "upland({n})"),
            other => f.write_str(other.name()),
        }
    }
}

// =============================================================================
// BIOME GRID
// =============================================================================

/// Per-cell biome labels for a single generation pass.
///
/// Built once from a height grid and read-only afterwards: there is no way to
/// change a label after [`BiomeGrid::build`] returns. A new pass builds a new grid.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeGrid {
    labels: Tilemap<Biome>,
}

impl BiomeGrid {
    /// Classify every height sample exactly once.
    pub fn build(heights: &Tilemap<f32>, bands: &BandTable) -> Self {
        let labels = heights.map(|&sample| bands.classify(sample));
        let grid = Self { labels };

        let counts = grid.counts();
        log::debug!(
            "Biome grid {}x{}: {} water, {} sand, {} grass, {} upland",
            grid.width(),
            grid.height(),
            counts.water,
            counts.sand,
            counts.grass,
            counts.upland
        );

        grid
    }

    /// Wrap labels that were classified elsewhere.
    pub fn from_labels(labels: Tilemap<Biome>) -> Self {
        Self { labels }
    }

    /// Build a grid from rows of characters: `~` water, `.` sand, `"` grass,
    /// `^` upland. Row index is `x`, column index is `y`.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let width = rows.len();
        let height = rows[0].len();
        let labels = Tilemap::from_fn(width, height, |x, y| match rows[x].as_bytes()[y] {
            b'~' => Biome::Water,
            b'.' => Biome::Sand,
            b'"' => Biome::Grass,
            b'^' => Biome::Upland(3),
            other => panic!("unknown cell {}", other as char),
        });
        Self { labels }
    }

    pub fn width(&self) -> usize {
        self.labels.width
    }

    pub fn height(&self) -> usize {
        self.labels.height
    }

    pub fn get(&self, x: usize, y: usize) -> Biome {
        *self.labels.get(x, y)
    }

    /// Label at `(x + dx, y + dy)`, or `None` off the grid.
    pub fn neighbor(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<Biome> {
        self.labels.get_offset(x, y, dx, dy).copied()
    }

    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        self.labels.is_interior(x, y)
    }

    pub fn labels(&self) -> &Tilemap<Biome> {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Biome)> + '_ {
        self.labels.iter().map(|(x, y, &b)| (x, y, b))
    }

    pub fn counts(&self) -> BiomeCounts {
        let mut counts = BiomeCounts::default();
        for (_, _, biome) in self.iter() {
            match biome {
                Biome::Water => counts.water += 1,
                Biome::Sand => counts.sand += 1,
                Biome::Grass => counts.grass += 1,
                Biome::Upland(_) => counts.upland += 1,
            }
        }
        counts
    }
}

/// Cell totals per label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BiomeCounts {
    pub water: usize,
    pub sand: usize,
    pub grass: usize,
    pub upland: usize,
}

impl BiomeCounts {
    pub fn total(&self) -> usize {
        self.water + self.sand + self.grass + self.upland
    }
}
