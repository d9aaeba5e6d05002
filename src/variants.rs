//! Tile variants and the per-band mask lookup tables.
//!
//! The tables are hand-authored: each entry names the piece of tile art that
//! draws one exact transition shape. They are data, so they live here as
//! literal `(mask, id)` pairs and are indexed once at compile time.

use serde::{Deserialize, Serialize};

use crate::adjacency::AdjacencyMask;
use crate::biomes::Biome;
use crate::decoration::{DecorationRule, DecorativeSet, GRASS_DECORATIONS, SAND_DECORATIONS};

// =============================================================================
// TILE VARIANTS
// =============================================================================

/// Identifier of one piece of tile art.
///
/// Static sprites and animated tiles are separate numbering spaces; `id` is
/// only meaningful together with `animated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileVariant {
    pub id: u16,
    pub animated: bool,
}

impl TileVariant {
    /// A frame from the static sprite sheet.
    pub const fn sprite(id: u16) -> Self {
        Self { id, animated: false }
    }

    /// An entry from the animated tile set.
    pub const fn animated(id: u16) -> Self {
        Self { id, animated: true }
    }
}

impl std::fmt::Display for TileVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.animated {
            write!(f, "anim:{}", self.id)
        } else {
            write!(f, "sprite:{}", self.id)
        }
    }
}

// =============================================================================
// LOOKUP TABLES
// =============================================================================

/// Literal `(mask, tile id)` pairs.
pub type MaskEntries = &'static [(u8, u16)];

pub const WATER_CARDINAL: MaskEntries = &[
    (3, 7),
    (1, 5),
    (5, 0),
    (2, 8),
    (4, 1),
    (10, 9),
    (8, 6),
    (12, 2),
    (13, 12),
    (14, 16),
    (7, 13),
    (11, 17),
];

pub const WATER_DIAGONAL: MaskEntries = &[
    (1, 4),
    (4, 11),
    (32, 3),
    (128, 10),
    (5, 15),
    (132, 14),
    (160, 18),
    (33, 19),
];

pub const SAND_CARDINAL: MaskEntries = &[
    (3, 12),
    (1, 7),
    (5, 3),
    (2, 1),
    (4, 10),
    (10, 13),
    (8, 5),
    (12, 4),
    (13, 29),
    (14, 37),
    (7, 30),
    (11, 38),
];

pub const SAND_DIAGONAL: MaskEntries = &[
    (1, 2),
    (4, 11),
    (32, 0),
    (128, 9),
    (5, 32),
    (132, 31),
    (160, 39),
    (33, 40),
];

const fn index_entries<const N: usize>(entries: MaskEntries) -> [Option<u16>; N] {
    let mut table = [None; N];
    let mut i = 0;
    while i < entries.len() {
        table[entries[i].0 as usize] = Some(entries[i].1);
        i += 1;
    }
    table
}

/// Transition tiles and decoration policy for one biome band.
#[derive(Debug)]
pub struct BandTiles {
    /// Whether the table ids refer to the animated set
    pub animated: bool,
    /// Cardinal mask -> tile id
    pub cardinal: [Option<u16>; 16],
    /// Full 8-neighbour mask -> tile id
    pub diagonal: [Option<u16>; 256],
    /// Sparse scatter used when neither table matches
    pub decoration: Option<&'static DecorativeSet>,
}

impl BandTiles {
    pub fn for_biome(biome: Biome) -> &'static BandTiles {
        match biome {
            Biome::Water => &WATER_TILES,
            Biome::Sand => &SAND_TILES,
            Biome::Grass | Biome::Upland(_) => &GRASS_TILES,
        }
    }

    fn variant(&self, id: u16) -> TileVariant {
        TileVariant {
            id,
            animated: self.animated,
        }
    }

    pub fn cardinal_variant(&self, mask: u8) -> Option<TileVariant> {
        self.cardinal
            .get(mask as usize)
            .copied()
            .flatten()
            .map(|id| self.variant(id))
    }

    pub fn diagonal_variant(&self, mask: u8) -> Option<TileVariant> {
        self.diagonal[mask as usize].map(|id| self.variant(id))
    }
}

/// Animated shoreline tiles drawn on the water side of a coast.
pub static WATER_TILES: BandTiles = BandTiles {
    animated: true,
    cardinal: index_entries(WATER_CARDINAL),
    diagonal: index_entries(WATER_DIAGONAL),
    decoration: None,
};

/// Static sand fringe tiles drawn where sand meets higher ground.
pub static SAND_TILES: BandTiles = BandTiles {
    animated: false,
    cardinal: index_entries(SAND_CARDINAL),
    diagonal: index_entries(SAND_DIAGONAL),
    decoration: Some(&SAND_DECORATIONS),
};

/// Grass and everything above it: no transition art of its own, the sand
/// fringe draws those edges. Only decorations are placed.
pub static GRASS_TILES: BandTiles = BandTiles {
    animated: false,
    cardinal: [None; 16],
    diagonal: [None; 256],
    decoration: Some(&GRASS_DECORATIONS),
};

// =============================================================================
// RESOLUTION
// =============================================================================

/// What to do with one interior cell after its mask has been looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A transition tile matched the mask.
    Variant(TileVariant),
    /// No table entry matched; roll the band's decorative scatter.
    Decorate(&'static DecorativeSet),
    /// Leave the base tile in place.
    Keep,
}

/// Resolve a cell's mask within its band. Pure: no randomness happens here.
pub fn resolve(biome: Biome, mask: AdjacencyMask) -> Resolution {
    let tiles = BandTiles::for_biome(biome);

    let hit = match mask {
        AdjacencyMask::Cardinal(m) => tiles.cardinal_variant(m),
        AdjacencyMask::Full { full, .. } => tiles.diagonal_variant(full),
    };
    if let Some(variant) = hit {
        return Resolution::Variant(variant);
    }

    match tiles.decoration {
        Some(set) if set.rule.accepts(mask) => Resolution::Decorate(set),
        _ => Resolution::Keep,
    }
}

impl DecorationRule {
    /// Whether a table miss with this mask is eligible for decoration.
    pub fn accepts(self, mask: AdjacencyMask) -> bool {
        match self {
            DecorationRule::AnyMiss => true,
            DecorationRule::ClearCardinals => mask.cardinal() == 0,
        }
    }
}
