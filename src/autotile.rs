//! The autotile pass: classify, lay base tiles, then pick transition tiles.
//!
//! A pass runs to completion before any of its output is meaningful:
//!
//! 1. every height sample is classified into a [`BiomeGrid`] owned by the pass
//! 2. every cell gets its biome's base tile (unless disabled)
//! 3. every interior cell reads its adjacency mask, resolves it against its
//!    band's tables, and on a miss may roll a decoration
//!
//! Border cells stop after step 2.

use rand::Rng;
use serde::Serialize;

use crate::adjacency::{compute_mask, AdjacencyMask};
use crate::bands::{BandTable, ThresholdBand};
use crate::biomes::{Biome, BiomeGrid};
use crate::config::AutotileConfig;
use crate::error::Result;
use crate::placement::{LayeredTilemap, Placement, TileLayerSink};
use crate::tilemap::Tilemap;
use crate::variants::{resolve, Resolution, TileVariant};

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters collected over one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AutotileStats {
    /// Every cell in the grid
    pub cells: usize,
    /// Base tiles laid before transition tiling
    pub base_tiles: usize,
    /// Cells on the grid edge, never mask-evaluated
    pub border_skipped: usize,
    /// Cells that had a mask computed
    pub evaluated: usize,
    /// Resolved from the cardinal table
    pub cardinal_hits: usize,
    /// Resolved from the diagonal table
    pub diagonal_hits: usize,
    /// Decorative rolls attempted after a table miss
    pub decoration_rolls: usize,
    /// Decorations actually placed
    pub decorations: usize,
    /// Interior cells that kept their base tile
    pub kept_base: usize,
}

impl AutotileStats {
    pub fn transitions(&self) -> usize {
        self.cardinal_hits + self.diagonal_hits
    }
}

impl std::fmt::Display for AutotileStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} cells ({} border, {} evaluated): {} cardinal, {} diagonal, \
             {}/{} decorations, {} kept base",
            self.cells,
            self.border_skipped,
            self.evaluated,
            self.cardinal_hits,
            self.diagonal_hits,
            self.decorations,
            self.decoration_rolls,
            self.kept_base,
        )
    }
}

/// Outcome of one interior cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellOutcome {
    Transition(TileVariant),
    Decoration(TileVariant),
    /// The decoration gate stayed shut.
    Undecorated,
    Kept,
}

// =============================================================================
// AUTOTILER
// =============================================================================

/// Result of a pass: the labels it classified and what it counted.
#[derive(Clone, Debug)]
pub struct AutotilePass {
    pub biomes: BiomeGrid,
    pub stats: AutotileStats,
}

/// Runs autotile passes against a fixed band table.
#[derive(Clone, Debug)]
pub struct Autotiler {
    bands: BandTable,
    place_base_tiles: bool,
}

impl Autotiler {
    pub fn new(bands: BandTable) -> Self {
        Self {
            bands,
            place_base_tiles: true,
        }
    }

    pub fn from_config(config: &AutotileConfig) -> Result<Self> {
        Ok(Self::new(config.band_table()?).with_base_tiles(config.place_base_tiles))
    }

    /// Whether the pass lays a base tile under every cell first.
    pub fn with_base_tiles(mut self, enabled: bool) -> Self {
        self.place_base_tiles = enabled;
        self
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    /// Run one full pass over `heights`, emitting placements into `sink`.
    ///
    /// The biome grid is built fresh for this call and handed back with the
    /// stats; nothing is shared between passes.
    pub fn run<S: TileLayerSink, R: Rng>(
        &self,
        heights: &Tilemap<f32>,
        sink: &mut S,
        rng: &mut R,
    ) -> AutotilePass {
        let biomes = BiomeGrid::build(heights, &self.bands);
        let mut stats = AutotileStats {
            cells: heights.len(),
            ..AutotileStats::default()
        };

        if self.place_base_tiles {
            stats.base_tiles = place_base_tiles(&biomes, sink);
            log::debug!("Laid {} base tiles", stats.base_tiles);
        }

        for (x, y, biome) in biomes.iter() {
            let Some(mask) = compute_mask(&biomes, x, y) else {
                stats.border_skipped += 1;
                continue;
            };
            stats.evaluated += 1;

            let outcome = resolve_cell(biome, mask, rng);
            log::trace!("({x}, {y}) {biome} {mask:?} -> {outcome:?}");

            match outcome {
                CellOutcome::Transition(variant) => {
                    if mask.is_full() {
                        stats.diagonal_hits += 1;
                    } else {
                        stats.cardinal_hits += 1;
                    }
                    emit(sink, x, y, biome, variant);
                }
                CellOutcome::Decoration(variant) => {
                    stats.decoration_rolls += 1;
                    stats.decorations += 1;
                    emit(sink, x, y, biome, variant);
                }
                CellOutcome::Undecorated => {
                    stats.decoration_rolls += 1;
                    stats.kept_base += 1;
                }
                CellOutcome::Kept => stats.kept_base += 1,
            }
        }

        log::info!("Autotile pass: {stats}");
        AutotilePass { biomes, stats }
    }

    /// Run a pass onto a fresh in-memory canvas.
    pub fn run_to_tilemap<R: Rng>(
        &self,
        heights: &Tilemap<f32>,
        rng: &mut R,
    ) -> (AutotilePass, LayeredTilemap) {
        let mut canvas = LayeredTilemap::new(heights.width, heights.height);
        let pass = self.run(heights, &mut canvas, rng);
        (pass, canvas)
    }
}

/// Resolve one interior cell, rolling the decoration gate on a table miss.
pub fn resolve_cell<R: Rng>(biome: Biome, mask: AdjacencyMask, rng: &mut R) -> CellOutcome {
    match resolve(biome, mask) {
        Resolution::Variant(variant) => CellOutcome::Transition(variant),
        Resolution::Decorate(set) => match set.roll(rng) {
            Some(variant) => CellOutcome::Decoration(variant),
            None => CellOutcome::Undecorated,
        },
        Resolution::Keep => CellOutcome::Kept,
    }
}

fn place_base_tiles<S: TileLayerSink>(biomes: &BiomeGrid, sink: &mut S) -> usize {
    let mut placed = 0;
    for (x, y, biome) in biomes.iter() {
        emit(sink, x, y, biome, biome.base_tile());
        placed += 1;
    }
    placed
}

fn emit<S: TileLayerSink>(sink: &mut S, x: usize, y: usize, biome: Biome, variant: TileVariant) {
    sink.place(Placement {
        x,
        y,
        variant,
        layer: biome.layer(),
    });
}

/// Top-level entry point over raw inputs.
///
/// Validates the bands first, then the height data shape, and only then does
/// any grid work. `samples` is row-major (`samples[y * width + x]`).
pub fn generate<S: TileLayerSink, R: Rng>(
    samples: Vec<f32>,
    width: usize,
    height: usize,
    bands: Vec<ThresholdBand>,
    sink: &mut S,
    rng: &mut R,
) -> Result<AutotilePass> {
    let bands = BandTable::new(bands)?;
    let heights = Tilemap::from_vec(width, height, samples)?;
    Ok(Autotiler::new(bands).run(&heights, sink, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutotileError;
    use crate::placement::{Layer, PlacementLog};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bands() -> Vec<ThresholdBand> {
        BandTable::from_bounds(&[0.3, 0.5, 1.0]).unwrap().bands().to_vec()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(2024)
    }

    /// Heights from rows of band characters, `x` = row, `y` = column.
    fn heights_from_rows(rows: &[&str]) -> Tilemap<f32> {
        Tilemap::from_fn(rows.len(), rows[0].len(), |x, y| match rows[x].as_bytes()[y] {
            b'~' => 0.1,
            b'.' => 0.4,
            b'"' => 0.8,
            other => panic!("unknown cell {}", other as char),
        })
    }

    #[test]
    fn test_single_grass_corner_in_water() {
        // 5x5, everything water except the (0, 0) corner.
        let mut samples = vec![0.1f32; 25];
        samples[0] = 0.9;
        let mut log = PlacementLog::new();
        let pass = generate(samples, 5, 5, bands(), &mut log, &mut rng()).unwrap();

        assert_eq!(pass.biomes.get(0, 0), Biome::Grass);
        assert_eq!(pass.stats.cells, 25);
        assert_eq!(pass.stats.border_skipped, 16);
        assert_eq!(pass.stats.evaluated, 9);
        assert_eq!(pass.stats.base_tiles, 25);

        // (1, 1) sees grass only diagonally (NW = 1) -> animated water tile 4.
        let at_11: Vec<_> = log.at(1, 1).collect();
        assert_eq!(at_11.len(), 2);
        assert_eq!(at_11[1].variant, TileVariant::animated(4));
        assert_eq!(at_11[1].layer, Layer::Water);
        assert_eq!(pass.stats.diagonal_hits, 1);

        // The other uniform water interiors keep their base tile.
        assert_eq!(pass.stats.kept_base, 8);
        assert_eq!(log.len(), 25 + 1);
        for p in log.placements.iter().skip(25) {
            assert_eq!((p.x, p.y), (1, 1));
        }
    }

    #[test]
    fn test_interior_grass_cell_is_the_only_land_evaluated() {
        let mut samples = vec![0.1f32; 25];
        samples[2 * 5 + 2] = 0.9;
        let mut log = PlacementLog::new();
        let pass = generate(samples, 5, 5, bands(), &mut log, &mut rng()).unwrap();

        assert_eq!(pass.stats.evaluated, 9);
        assert_eq!(pass.stats.border_skipped, 16);
        // The lone grass cell sees water on all four sides: cardinal 15 is
        // not a transition shape and grass has no diagonal art.
        let extra: Vec<_> = log.at(2, 2).skip(1).collect();
        assert!(extra.is_empty());
        // Water cells around it see grass on exactly one side or corner.
        assert_eq!(pass.stats.cardinal_hits, 4);
        assert_eq!(pass.stats.diagonal_hits, 4);
    }

    #[test]
    fn test_water_corner_resolves_from_cardinal_table() {
        // Water at (1, 1) with grass north (x - 1) and west (y - 1).
        let heights = heights_from_rows(&["\"\"\"", "\"~~", "\"~~"]);
        let mut log = PlacementLog::new();
        let pass = Autotiler::new(BandTable::new(bands()).unwrap())
            .with_base_tiles(false)
            .run(&heights, &mut log, &mut rng());

        assert_eq!(pass.stats.cardinal_hits, 1);
        assert_eq!(pass.stats.diagonal_hits, 0);
        assert_eq!(log.placements.len(), 1);
        let p = log.placements[0];
        assert_eq!((p.x, p.y), (1, 1));
        assert_eq!(p.variant, TileVariant::animated(7));
        assert_eq!(p.layer, Layer::Water);
    }

    #[test]
    fn test_sand_next_to_water_blends() {
        let heights = heights_from_rows(&["~~~", "~.~", "~~~"]);
        let pass = Autotiler::new(BandTable::new(bands()).unwrap())
            .with_base_tiles(false)
            .run(&heights, &mut PlacementLog::new(), &mut rng());
        // Mask is 0 so sand goes straight to the decoration roll.
        assert_eq!(pass.stats.decoration_rolls, 1);
        assert_eq!(pass.stats.transitions(), 0);
    }

    #[test]
    fn test_sand_fringe_tile_is_static_on_land_layer() {
        // Sand at (1, 1) with grass to the south (x + 1): mask 8 -> sprite 5.
        let heights = heights_from_rows(&["...", "...", "\"\"\""]);
        let mut log = PlacementLog::new();
        Autotiler::new(BandTable::new(bands()).unwrap())
            .with_base_tiles(false)
            .run(&heights, &mut log, &mut rng());
        assert_eq!(log.placements.len(), 1);
        assert_eq!(log.placements[0].variant, TileVariant::sprite(5));
        assert_eq!(log.placements[0].layer, Layer::Land);
    }

    #[test]
    fn test_same_seed_same_map() {
        let heights = Tilemap::from_fn(24, 24, |x, y| ((x * 31 + y * 17) % 100) as f32 / 100.0);
        let tiler = Autotiler::new(BandTable::new(bands()).unwrap());
        let (pass_a, canvas_a) = tiler.run_to_tilemap(&heights, &mut ChaCha8Rng::seed_from_u64(5));
        let (pass_b, canvas_b) = tiler.run_to_tilemap(&heights, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(canvas_a, canvas_b);
        assert_eq!(pass_a.stats, pass_b.stats);
        assert_eq!(pass_a.biomes, pass_b.biomes);
    }

    #[test]
    fn test_border_keeps_base_tile() {
        let heights = heights_from_rows(&["\"~~~", "~~~~", "~~~~", "~~~\""]);
        let (_, canvas) = Autotiler::new(BandTable::new(bands()).unwrap())
            .run_to_tilemap(&heights, &mut rng());
        assert_eq!(canvas.get(Layer::Land, 0, 0), Some(TileVariant::sprite(6)));
        assert_eq!(canvas.get(Layer::Water, 0, 3), Some(TileVariant::sprite(20)));
        assert_eq!(canvas.get(Layer::Land, 3, 3), Some(TileVariant::sprite(6)));
    }

    #[test]
    fn test_stats_add_up() {
        let heights = Tilemap::from_fn(40, 30, |x, y| {
            let dx = x as f32 - 20.0;
            let dy = y as f32 - 15.0;
            1.0 - (dx * dx + dy * dy).sqrt() / 20.0
        });
        let (pass, _) = Autotiler::new(BandTable::new(bands()).unwrap())
            .run_to_tilemap(&heights, &mut rng());
        let s = pass.stats;
        assert_eq!(s.border_skipped + s.evaluated, s.cells);
        assert_eq!(s.transitions() + s.decorations + s.kept_base, s.evaluated);
        assert!(s.transitions() > 0);
    }

    #[test]
    fn test_bad_bands_fail_before_shape_check() {
        let err = generate(
            vec![0.0; 3],
            2,
            2,
            vec![ThresholdBand::new("only", 1.0)],
            &mut PlacementLog::new(),
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, AutotileError::Configuration(_)));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = generate(vec![0.0; 3], 2, 2, bands(), &mut PlacementLog::new(), &mut rng())
            .unwrap_err();
        assert!(matches!(err, AutotileError::ShapeMismatch { expected: 4, actual: 3, .. }));
    }
}
