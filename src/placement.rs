//! Tile placements and the sinks that receive them.
//!
//! The autotiler never draws anything itself. It emits one [`Placement`] per
//! decision and leaves turning a variant id into a drawable tile to whatever
//! implements [`TileLayerSink`].

use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;
use crate::variants::TileVariant;

/// Canvas layer a tile is painted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Water,
    Land,
}

/// One tile painted at one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub variant: TileVariant,
    pub layer: Layer,
}

/// Receiver of tile placements.
///
/// A later placement on the same cell and layer replaces the earlier one,
/// the same way painting onto a tile canvas does.
pub trait TileLayerSink {
    fn place(&mut self, placement: Placement);
}

impl<S: TileLayerSink + ?Sized> TileLayerSink for &mut S {
    fn place(&mut self, placement: Placement) {
        (**self).place(placement);
    }
}

// =============================================================================
// PLACEMENT LOG
// =============================================================================

/// Records every placement in emission order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PlacementLog {
    pub placements: Vec<Placement>,
}

impl PlacementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// All placements made at one cell, oldest first.
    pub fn at(&self, x: usize, y: usize) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.x == x && p.y == y)
    }
}

impl TileLayerSink for PlacementLog {
    fn place(&mut self, placement: Placement) {
        self.placements.push(placement);
    }
}

// =============================================================================
// LAYERED TILEMAP
// =============================================================================

/// In-memory tile canvas: one tilemap of optional variants per layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayeredTilemap {
    pub water: Tilemap<Option<TileVariant>>,
    pub land: Tilemap<Option<TileVariant>>,
}

impl LayeredTilemap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            water: Tilemap::new(width, height),
            land: Tilemap::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.water.width
    }

    pub fn height(&self) -> usize {
        self.water.height
    }

    pub fn layer(&self, layer: Layer) -> &Tilemap<Option<TileVariant>> {
        match layer {
            Layer::Water => &self.water,
            Layer::Land => &self.land,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut Tilemap<Option<TileVariant>> {
        match layer {
            Layer::Water => &mut self.water,
            Layer::Land => &mut self.land,
        }
    }

    pub fn get(&self, layer: Layer, x: usize, y: usize) -> Option<TileVariant> {
        *self.layer(layer).get(x, y)
    }

    /// Topmost tile at a cell: land is painted over water.
    pub fn top(&self, x: usize, y: usize) -> Option<(Layer, TileVariant)> {
        self.get(Layer::Land, x, y)
            .map(|v| (Layer::Land, v))
            .or_else(|| self.get(Layer::Water, x, y).map(|v| (Layer::Water, v)))
    }

    /// Number of occupied cells on a layer.
    pub fn occupied(&self, layer: Layer) -> usize {
        self.layer(layer).iter().filter(|(_, _, v)| v.is_some()).count()
    }
}

impl TileLayerSink for LayeredTilemap {
    fn place(&mut self, placement: Placement) {
        let target = self.layer_mut(placement.layer);
        if !target.in_bounds(placement.x, placement.y) {
            log::warn!(
                "Dropping placement outside {}x{} canvas at ({}, {})",
                target.width,
                target.height,
                placement.x,
                placement.y
            );
            return;
        }
        target.set(placement.x, placement.y, Some(placement.variant));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: usize, y: usize, id: u16, layer: Layer) -> Placement {
        Placement {
            x,
            y,
            variant: TileVariant::sprite(id),
            layer,
        }
    }

    #[test]
    fn test_later_placement_overwrites() {
        let mut canvas = LayeredTilemap::new(4, 4);
        canvas.place(placement(1, 2, 20, Layer::Water));
        canvas.place(placement(1, 2, 5, Layer::Water));
        assert_eq!(canvas.get(Layer::Water, 1, 2), Some(TileVariant::sprite(5)));
        assert_eq!(canvas.get(Layer::Land, 1, 2), None);
    }

    #[test]
    fn test_layers_are_independent() {
        let mut canvas = LayeredTilemap::new(3, 3);
        canvas.place(placement(0, 0, 20, Layer::Water));
        canvas.place(placement(0, 0, 8, Layer::Land));
        assert_eq!(canvas.occupied(Layer::Water), 1);
        assert_eq!(canvas.occupied(Layer::Land), 1);
        assert_eq!(canvas.top(0, 0), Some((Layer::Land, TileVariant::sprite(8))));
        assert_eq!(canvas.top(1, 1), None);
    }

    #[test]
    fn test_out_of_bounds_is_dropped() {
        let mut canvas = LayeredTilemap::new(2, 2);
        canvas.place(placement(5, 0, 1, Layer::Land));
        assert_eq!(canvas.occupied(Layer::Land), 0);
    }

    #[test]
    fn test_log_keeps_order() {
        fn feed<S: TileLayerSink>(mut sink: S) {
            sink.place(placement(0, 0, 1, Layer::Land));
            sink.place(placement(0, 0, 2, Layer::Land));
        }

        let mut log = PlacementLog::new();
        feed(&mut log);
        let ids: Vec<u16> = log.at(0, 0).map(|p| p.variant.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(log.len(), 2);
    }
}
