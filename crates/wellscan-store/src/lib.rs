//! WellScan Store: the persistence collaborator interface plus an in-memory
//! implementation.
//!
//! Well records upsert by identifier with preserve-on-absence; stimulation
//! rows for a well are replaced wholesale.

pub mod memory;

pub use memory::MemoryStore;

use wellscan_core::{Result, StimulationRecord, WellRecord};

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Persistence collaborator for extracted records.
pub trait WellStore: Send + Sync {
    /// Insert, or merge into the stored record with preserve-on-absence.
    fn upsert_well(&self, fresh: WellRecord) -> Result<UpsertOutcome>;

    /// Delete every stimulation row of the well, then insert `rows`.
    fn replace_stimulations(&self, well_file_no: &str, rows: Vec<StimulationRecord>)
        -> Result<usize>;

    fn well(&self, well_file_no: &str) -> Result<Option<WellRecord>>;

    fn stimulations(&self, well_file_no: &str) -> Result<Vec<StimulationRecord>>;

    /// Number of stored wells.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
