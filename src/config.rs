//! Autotile configuration.
//!
//! Stored as JSON. Every field has a default, so a config file only needs
//! the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bands::{BandTable, ThresholdBand};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutotileConfig {
    /// Elevation bands, lowest first. At least two.
    pub bands: Vec<ThresholdBand>,
    /// Seed for decorative scatter (random if not set)
    pub seed: Option<u64>,
    /// Lay each biome's plain tile under every cell before transition tiling
    pub place_base_tiles: bool,
}

impl Default for AutotileConfig {
    fn default() -> Self {
        Self {
            bands: BandTable::default().bands().to_vec(),
            seed: None,
            place_base_tiles: true,
        }
    }
}

impl AutotileConfig {
    /// Read a config file and check its bands.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.band_table()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Validated band table for these bands.
    pub fn band_table(&self) -> Result<BandTable> {
        BandTable::new(self.bands.clone())
    }
}
