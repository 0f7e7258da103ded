//! In-process store behind `parking_lot` locks.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;
use wellscan_core::{Error, Result, StimulationRecord, WellRecord};

use crate::{UpsertOutcome, WellStore};

#[derive(Default)]
pub struct MemoryStore {
    wells: RwLock<BTreeMap<String, WellRecord>>,
    stimulations: RwLock<BTreeMap<String, Vec<StimulationRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored well, ordered by identifier.
    pub fn wells(&self) -> Vec<WellRecord> {
        self.wells.read().values().cloned().collect()
    }

    /// Total stimulation rows across all wells.
    pub fn stimulation_count(&self) -> usize {
        self.stimulations.read().values().map(Vec::len).sum()
    }
}

impl WellStore for MemoryStore {
    fn upsert_well(&self, fresh: WellRecord) -> Result<UpsertOutcome> {
        let id = fresh.well_file_no.trim().to_string();
        if id.is_empty() {
            return Err(Error::InvalidRecord(
                "<unknown>".to_string(),
                "cannot store a well without an identifier".to_string(),
            ));
        }

        let mut wells = self.wells.write();
        match wells.get_mut(&id) {
            Some(stored) => {
                stored.merge_fresh(fresh);
                debug!("Updated well {}", id);
                Ok(UpsertOutcome::Updated)
            }
            None => {
                debug!("Inserted well {}", id);
                wells.insert(id, fresh);
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    fn replace_stimulations(
        &self,
        well_file_no: &str,
        rows: Vec<StimulationRecord>,
    ) -> Result<usize> {
        if !self.wells.read().contains_key(well_file_no) {
            return Err(Error::InvalidRecord(
                well_file_no.to_string(),
                "stimulation rows for a well that is not stored".to_string(),
            ));
        }

        let count = rows.len();
        let mut stimulations = self.stimulations.write();
        stimulations.remove(well_file_no);
        if count > 0 {
            stimulations.insert(well_file_no.to_string(), rows);
        }
        Ok(count)
    }

    fn well(&self, well_file_no: &str) -> Result<Option<WellRecord>> {
        Ok(self.wells.read().get(well_file_no).cloned())
    }

    fn stimulations(&self, well_file_no: &str) -> Result<Vec<StimulationRecord>> {
        Ok(self
            .stimulations
            .read()
            .get(well_file_no)
            .cloned()
            .unwrap_or_default())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.wells.read().len())
    }
}
