//! Neighbour adjacency bitmasks against the biome grid.
//!
//! Axis convention (kept exactly, the lookup tables depend on it):
//! north is `x - 1`, south is `x + 1`, west is `y - 1`, east is `y + 1`.

use crate::biomes::{Biome, BiomeGrid};

// =============================================================================
// DIRECTIONS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Cardinal directions in cardinal-mask bit order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::East,
        Direction::South,
    ];

    /// All eight directions in full-mask bit order.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Grid offset `(dx, dy)` of the neighbour in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Weight in the 4-bit cardinal mask, `None` for diagonals.
    pub fn cardinal_weight(self) -> Option<u8> {
        match self {
            Direction::North => Some(1),
            Direction::West => Some(2),
            Direction::East => Some(4),
            Direction::South => Some(8),
            _ => None,
        }
    }

    /// Weight in the 8-bit full mask.
    pub fn full_weight(self) -> u8 {
        match self {
            Direction::NorthWest => 1,
            Direction::North => 2,
            Direction::NorthEast => 4,
            Direction::West => 8,
            Direction::East => 16,
            Direction::SouthWest => 32,
            Direction::South => 64,
            Direction::SouthEast => 128,
        }
    }
}

// =============================================================================
// MASKS
// =============================================================================

/// Cardinal masks that describe a straight edge, a single convex corner or a
/// single concave corner. These resolve from the cardinal table alone.
pub const CARDINAL_TRANSITIONS: [u8; 12] = [3, 1, 5, 2, 4, 10, 8, 12, 13, 14, 7, 11];

pub fn is_cardinal_transition(mask: u8) -> bool {
    CARDINAL_TRANSITIONS.contains(&mask)
}

/// Adjacency reading for one interior cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdjacencyMask {
    /// A cardinal mask that names a transition shape on its own.
    Cardinal(u8),
    /// The full 8-neighbour mask, read because the cardinal mask did not
    /// name a transition shape. `cardinal` keeps that 4-bit reading.
    Full { cardinal: u8, full: u8 },
}

impl AdjacencyMask {
    pub fn cardinal(self) -> u8 {
        match self {
            AdjacencyMask::Cardinal(m) => m,
            AdjacencyMask::Full { cardinal, .. } => cardinal,
        }
    }

    pub fn is_full(self) -> bool {
        matches!(self, AdjacencyMask::Full { .. })
    }
}

/// Whether `neighbor` counts as a transition edge for a `center` cell.
pub fn neighbor_differs(center: Biome, neighbor: Biome) -> bool {
    neighbor != center && Some(neighbor) != center.blends_into()
}

fn edge_bit(grid: &BiomeGrid, x: usize, y: usize, center: Biome, dir: Direction) -> bool {
    let (dx, dy) = dir.offset();
    grid.neighbor(x, y, dx, dy)
        .is_some_and(|neighbor| neighbor_differs(center, neighbor))
}

/// 4-bit mask of transition edges towards N, W, E and S.
///
/// Neighbours off the grid never set a bit.
pub fn cardinal_mask(grid: &BiomeGrid, x: usize, y: usize) -> u8 {
    let center = grid.get(x, y);
    Direction::CARDINAL
        .iter()
        .filter(|&&dir| edge_bit(grid, x, y, center, dir))
        .filter_map(|dir| dir.cardinal_weight())
        .sum()
}

/// 8-bit mask of transition edges over all neighbours.
pub fn full_mask(grid: &BiomeGrid, x: usize, y: usize) -> u8 {
    let center = grid.get(x, y);
    Direction::ALL
        .iter()
        .filter(|&&dir| edge_bit(grid, x, y, center, dir))
        .map(|dir| dir.full_weight())
        .fold(0u8, |mask, w| mask | w)
}

/// Read the adjacency mask for `(x, y)`.
///
/// Returns `None` for border cells, which never take part in transition
/// tiling. The full mask is only computed when the cardinal mask does not
/// already name a transition shape.
pub fn compute_mask(grid: &BiomeGrid, x: usize, y: usize) -> Option<AdjacencyMask> {
    if !grid.is_interior(x, y) {
        return None;
    }

    let cardinal = cardinal_mask(grid, x, y);
    if is_cardinal_transition(cardinal) {
        return Some(AdjacencyMask::Cardinal(cardinal));
    }

    Some(AdjacencyMask::Full {
        cardinal,
        full: full_mask(grid, x, y),
    })
}
