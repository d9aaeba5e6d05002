//! Sparse decorative scatter for cells no transition tile matched.
//!
//! Each roll is two-stage: a gate decides whether anything is placed at all,
//! then a uniform pick selects the sprite. The random source is always
//! passed in so a seeded generator reproduces a map exactly.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::variants::TileVariant;

/// Which table misses may be decorated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationRule {
    /// Any mask that missed both lookup tables.
    AnyMiss,
    /// Only cells whose four cardinal neighbours all blend in.
    ClearCardinals,
}

/// A band's decorative sprites and the odds of placing one.
#[derive(Debug, PartialEq, Eq)]
pub struct DecorativeSet {
    /// A roll places a decoration when a uniform draw from `1..=gate` is 1.
    pub gate: u32,
    /// Static sprite ids, picked uniformly.
    pub sprites: &'static [u16],
    pub rule: DecorationRule,
}

/// Shells and pebbles scattered over open sand.
pub static SAND_DECORATIONS: DecorativeSet = DecorativeSet {
    gate: 4,
    sprites: &[112, 113, 114],
    rule: DecorationRule::AnyMiss,
};

/// Flowers, tufts and stones scattered over open grass.
pub static GRASS_DECORATIONS: DecorativeSet = DecorativeSet {
    gate: 4,
    sprites: &[103, 104, 105, 106, 107, 108, 109, 110, 111],
    rule: DecorationRule::ClearCardinals,
};

impl DecorativeSet {
    /// Roll the gate and, if it opens, pick a sprite.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> Option<TileVariant> {
        if rng.gen_range(1..=self.gate) != 1 {
            return None;
        }
        self.sprites.choose(rng).copied().map(TileVariant::sprite)
    }
}
