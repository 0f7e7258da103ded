//! WellScan Core: well and stimulation record types, extraction configuration and errors.

pub mod config;
pub mod error;
pub mod record;

pub use config::{ExtractionConfig, GeoBounds};
pub use error::{Error, Result};
pub use record::{is_present, Field, GeoPoint, StimulationRecord, WellRecord, NOT_AVAILABLE};
