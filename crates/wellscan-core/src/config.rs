//! Extraction configuration.
//!
//! Every entry point takes an explicit [`ExtractionConfig`]; nothing reads
//! ambient state after construction.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Tokens that mark a latitude as an instrument-calibration reference.
/// Truncated variants cover OCR dropping the leading character.
pub const DEFAULT_CALIBRATION_TOKENS: &[&str] = &[
    "ORIGINAL",
    "RIGINAL",
    "CALIBRATION",
    "ALIBRATION",
    "MAGNETIC",
];

/// A latitude/longitude rectangle in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Hard box for the North Dakota operating region.
    pub const NORTH_DAKOTA: GeoBounds = GeoBounds {
        min_lat: 40.0,
        max_lat: 55.0,
        min_lon: -115.0,
        max_lon: -90.0,
    };

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    fn is_well_formed(&self) -> bool {
        self.min_lat < self.max_lat
            && self.min_lon < self.max_lon
            && self.min_lat >= -90.0
            && self.max_lat <= 90.0
            && self.min_lon >= -180.0
            && self.max_lon <= 180.0
    }
}

/// Configuration for one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// State written to every well record.
    pub default_state: String,
    /// Normalized documents shorter than this are treated as malformed.
    pub min_text_chars: usize,
    /// Characters before a latitude label inspected for calibration tokens.
    pub calibration_window: usize,
    /// Upper-case tokens that reject a latitude candidate.
    pub calibration_tokens: Vec<String>,
    /// Maximum distance from a latitude to its paired longitude.
    pub pair_window: usize,
    /// Distance after a "Site Position" label within which coordinates belong to it.
    pub site_position_window: usize,
    /// Prefer a Site Position coordinate over earlier plain matches.
    pub prefer_site_position: bool,
    /// Negate unsigned decimal longitudes that carry no hemisphere letter.
    pub implicit_west_longitude: bool,
    /// Hard bounding box; coordinates outside it are extraction errors.
    pub region: GeoBounds,
    /// Tighter boxes keyed by upper-case county name.
    pub county_regions: BTreeMap<String, GeoBounds>,
    /// Casing descriptions are truncated to this many characters.
    pub max_casing_chars: usize,
    /// Batch worker threads; 0 uses available parallelism.
    pub workers: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_state: "ND".to_string(),
            min_text_chars: 20,
            calibration_window: 50,
            calibration_tokens: DEFAULT_CALIBRATION_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            pair_window: 300,
            site_position_window: 400,
            prefer_site_position: false,
            implicit_west_longitude: true,
            region: GeoBounds::NORTH_DAKOTA,
            county_regions: BTreeMap::new(),
            max_casing_chars: 200,
            workers: 0,
        }
    }
}

impl ExtractionConfig {
    /// Build from defaults, an optional `WELLSCAN_CONFIG` JSON file, then
    /// individual environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("WELLSCAN_CONFIG") {
            Ok(path) => Self::from_json_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(state) = std::env::var("WELLSCAN_STATE") {
            if !state.trim().is_empty() {
                config.default_state = state.trim().to_string();
            }
        }
        if let Some(workers) = std::env::var("WELLSCAN_WORKERS")
            .ok()
            .and_then(|w| w.parse().ok())
        {
            config.workers = workers;
        }
        if let Ok(flag) = std::env::var("WELLSCAN_PREFER_SITE_POSITION") {
            config.prefer_site_position = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file; missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading extraction config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;
        for token in &mut config.calibration_tokens {
            *token = token.trim().to_uppercase();
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.default_state.trim().is_empty() {
            return Err(Error::Config("default_state must not be empty".to_string()));
        }
        if self.calibration_window == 0 {
            return Err(Error::Config("calibration_window must be greater than 0".to_string()));
        }
        for token in &self.calibration_tokens {
            if token.is_empty() || *token != token.to_uppercase() {
                return Err(Error::Config(format!(
                    "calibration token {:?} must be non-empty upper case",
                    token
                )));
            }
        }
        if self.pair_window == 0 {
            return Err(Error::Config("pair_window must be greater than 0".to_string()));
        }
        if self.max_casing_chars == 0 {
            return Err(Error::Config("max_casing_chars must be greater than 0".to_string()));
        }
        if !self.region.is_well_formed() {
            return Err(Error::Config(format!("region is not a valid box: {:?}", self.region)));
        }
        for (county, bounds) in &self.county_regions {
            if !bounds.is_well_formed() {
                return Err(Error::Config(format!("county region {} is not a valid box", county)));
            }
        }
        Ok(())
    }

    /// Bounding box for a county, falling back to the region box.
    pub fn bounds_for(&self, county: Option<&str>) -> GeoBounds {
        county
            .and_then(|c| self.county_regions.get(&c.trim().to_uppercase()))
            .copied()
            .unwrap_or(self.region)
    }
}
