//! Elevation threshold bands and the classifier that maps a height sample to a band.

use serde::{Deserialize, Serialize};

use crate::biomes::Biome;
use crate::error::{AutotileError, Result};

/// One elevation band: every sample at or below `upper_bound` (and above the
/// previous band's bound) belongs to it.
///
/// The last band in a table is open-ended; its bound only takes part in the
/// ordering check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    /// Display name, e.g. "water"
    #[serde(default)]
    pub name: String,
    pub upper_bound: f32,
}

impl ThresholdBand {
    pub fn new(name: impl Into<String>, upper_bound: f32) -> Self {
        Self {
            name: name.into(),
            upper_bound,
        }
    }
}

/// Classify a sample against an ordered band list.
///
/// Returns the label of the first band whose upper bound is at or above the
/// sample (a sample equal to a bound belongs to the lower band), or the last
/// band if none match. Fails only when `bands` is empty.
pub fn classify(sample: f32, bands: &[ThresholdBand]) -> Result<Biome> {
    if bands.is_empty() {
        return Err(AutotileError::Configuration(
            "cannot classify against an empty band list".to_string(),
        ));
    }
    Ok(Biome::from_band(band_index(sample, bands)))
}

fn band_index(sample: f32, bands: &[ThresholdBand]) -> usize {
    bands
        .iter()
        .position(|band| band.upper_bound >= sample)
        .unwrap_or(bands.len() - 1)
}

/// A validated, ordered set of threshold bands.
///
/// Construction checks every invariant the classifier relies on, so a pass
/// holding a `BandTable` can no longer fail on configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BandTable {
    bands: Vec<ThresholdBand>,
}

impl BandTable {
    pub const MIN_BANDS: usize = 2;

    pub fn new(bands: Vec<ThresholdBand>) -> Result<Self> {
        if bands.len() < Self::MIN_BANDS {
            return Err(AutotileError::Configuration(format!(
                "at least {} threshold bands are required, got {}",
                Self::MIN_BANDS,
                bands.len()
            )));
        }

        if let Some(bad) = bands.iter().find(|b| !b.upper_bound.is_finite()) {
            return Err(AutotileError::Configuration(format!(
                "band '{}' has a non-finite upper bound",
                bad.name
            )));
        }

        for (i, pair) in bands.windows(2).enumerate() {
            if pair[1].upper_bound < pair[0].upper_bound {
                return Err(AutotileError::Configuration(format!(
                    "band bounds must be non-decreasing: band {} ({}) = {} is below band {} ({}) = {}",
                    i + 1,
                    pair[1].name,
                    pair[1].upper_bound,
                    i,
                    pair[0].name,
                    pair[0].upper_bound
                )));
            }
        }

        Ok(Self { bands })
    }

    /// Build a table from bare bounds, naming each band after its biome.
    pub fn from_bounds(bounds: &[f32]) -> Result<Self> {
        let bands = bounds
            .iter()
            .enumerate()
            .map(|(i, &bound)| ThresholdBand::new(Biome::from_band(i).name(), bound))
            .collect();
        Self::new(bands)
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn bands(&self) -> &[ThresholdBand] {
        &self.bands
    }

    /// `(band index, upper bound)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.bands.iter().enumerate().map(|(i, b)| (i, b.upper_bound))
    }

    /// Index of the band `sample` falls in.
    pub fn band_index(&self, sample: f32) -> usize {
        band_index(sample, &self.bands)
    }

    pub fn classify(&self, sample: f32) -> Biome {
        Biome::from_band(self.band_index(sample))
    }
}

impl Default for BandTable {
    /// Water up to 0.35, a sand fringe up to 0.45, grass above.
    fn default() -> Self {
        Self {
            bands: vec![
                ThresholdBand::new("water", 0.35),
                ThresholdBand::new("sand", 0.45),
                ThresholdBand::new("grass", 1.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_bands() -> BandTable {
        BandTable::from_bounds(&[0.3, 0.5, 1.0]).unwrap()
    }

    #[test]
    fn test_bound_is_inclusive() {
        let table = three_bands();
        assert_eq!(table.classify(0.3), Biome::Water);
        assert_eq!(table.classify(0.300_001), Biome::Sand);
        assert_eq!(table.classify(0.5), Biome::Sand);
        assert_eq!(table.classify(0.51), Biome::Grass);
    }

    #[test]
    fn test_samples_above_last_bound_use_last_band() {
        let table = three_bands();
        assert_eq!(table.classify(1.7), Biome::Grass);
        assert_eq!(table.band_index(f32::MAX), 2);
    }

    #[test]
    fn test_samples_below_first_bound_use_first_band() {
        let table = three_bands();
        assert_eq!(table.classify(-4.0), Biome::Water);
    }

    #[test]
    fn test_classification_is_monotonic() {
        let table = BandTable::from_bounds(&[0.1, 0.2, 0.2, 0.6, 0.9]).unwrap();
        let mut previous = 0;
        for step in 0..=1200 {
            let sample = -0.1 + step as f32 * 0.001;
            let band = table.band_index(sample);
            assert!(band < table.len());
            assert!(band >= previous, "band dropped at sample {sample}");
            previous = band;
        }
    }

    #[test]
    fn test_free_classify_matches_table() {
        let table = three_bands();
        for sample in [0.0, 0.3, 0.31, 0.5, 0.75, 2.0] {
            assert_eq!(classify(sample, table.bands()).unwrap(), table.classify(sample));
        }
    }

    #[test]
    fn test_free_classify_rejects_empty_bands() {
        assert!(matches!(
            classify(0.5, &[]),
            Err(AutotileError::Configuration(_))
        ));
    }

    #[test]
    fn test_too_few_bands_rejected() {
        assert!(matches!(
            BandTable::from_bounds(&[0.5]),
            Err(AutotileError::Configuration(_))
        ));
        assert!(matches!(
            BandTable::new(Vec::new()),
            Err(AutotileError::Configuration(_))
        ));
    }

    #[test]
    fn test_decreasing_bounds_rejected() {
        assert!(matches!(
            BandTable::from_bounds(&[0.5, 0.4, 1.0]),
            Err(AutotileError::Configuration(_))
        ));
    }

    #[test]
    fn test_nan_bound_rejected() {
        assert!(matches!(
            BandTable::from_bounds(&[0.2, f32::NAN, 1.0]),
            Err(AutotileError::Configuration(_))
        ));
    }

    #[test]
    fn test_equal_bounds_accepted() {
        let table = BandTable::from_bounds(&[0.4, 0.4, 1.0]).unwrap();
        // The sand band is empty; a sample on the shared bound is water.
        assert_eq!(table.classify(0.4), Biome::Water);
        assert_eq!(table.classify(0.41), Biome::Grass);
    }

    #[test]
    fn test_default_is_valid() {
        let table = BandTable::default();
        assert!(BandTable::new(table.bands().to_vec()).is_ok());
        assert_eq!(table.len(), 3);
    }
}
