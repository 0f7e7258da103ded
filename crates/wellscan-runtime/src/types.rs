//! Runtime types.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wellscan_core::{is_present, Field};
use wellscan_extract::{ExtractedDocument, OutcomeKind};

/// A document that produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDocument {
    /// Position in the submitted batch.
    pub index: usize,
    pub source: Option<String>,
    pub error: String,
}

/// Populated/absent/rejected counts for one field across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldCoverage {
    pub populated: usize,
    pub absent: usize,
    pub rejected: usize,
}

impl FieldCoverage {
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Populated => self.populated += 1,
            OutcomeKind::Absent => self.absent += 1,
            OutcomeKind::Rejected => self.rejected += 1,
        }
    }
}

/// End-of-run summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub documents: usize,
    pub succeeded: usize,
    pub malformed: usize,
    pub failed: Vec<FailedDocument>,
    pub stimulation_records: usize,
    pub ghost_rows: usize,
    pub field_coverage: BTreeMap<Field, FieldCoverage>,
    pub wells_with_api: usize,
    pub wells_with_coordinates: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl RunSummary {
    /// Fold per-document results into a summary.
    pub fn from_results(
        results: &[Result<ExtractedDocument, FailedDocument>],
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut summary = Self {
            documents: results.len(),
            succeeded: 0,
            malformed: 0,
            failed: Vec::new(),
            stimulation_records: 0,
            ghost_rows: 0,
            field_coverage: Field::ALL
                .iter()
                .map(|f| (*f, FieldCoverage::default()))
                .collect(),
            wells_with_api: 0,
            wells_with_coordinates: 0,
            started_at,
            finished_at,
            duration_ms: (finished_at - started_at).num_milliseconds().max(0) as u64,
        };

        for result in results {
            let doc = match result {
                Ok(doc) => doc,
                Err(failed) => {
                    summary.failed.push(failed.clone());
                    continue;
                }
            };

            summary.succeeded += 1;
            if doc.malformed {
                summary.malformed += 1;
            }
            summary.stimulation_records += doc.stimulations.len();
            summary.ghost_rows += doc.ghost_rows;
            if doc.well.api_number.as_deref().is_some_and(is_present) {
                summary.wells_with_api += 1;
            }
            if doc.well.coordinates().is_some() {
                summary.wells_with_coordinates += 1;
            }
            for (field, kind) in &doc.outcomes {
                summary.field_coverage.entry(*field).or_default().record(*kind);
            }
        }

        summary
    }

    /// Human-readable report printed at the end of a run.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Documents:            {}", self.documents);
        let _ = writeln!(
            out,
            "Succeeded:            {} ({} malformed)",
            self.succeeded, self.malformed
        );
        let _ = writeln!(out, "Failed:               {}", self.failed.len());
        for failed in &self.failed {
            let _ = writeln!(
                out,
                "  #{} {}: {}",
                failed.index,
                failed.source.as_deref().unwrap_or("<unnamed>"),
                failed.error
            );
        }
        let _ = writeln!(
            out,
            "Stimulation rows:     {} ({} ghost rows discarded)",
            self.stimulation_records, self.ghost_rows
        );
        let _ = writeln!(out, "Wells with API:       {}", self.wells_with_api);
        let _ = writeln!(out, "Wells with coords:    {}", self.wells_with_coordinates);
        let _ = writeln!(out, "Field coverage (populated / absent / rejected):");
        for (field, coverage) in &self.field_coverage {
            let _ = writeln!(
                out,
                "  {:<18} {:>5} / {:>5} / {:>5}",
                field.as_str(),
                coverage.populated,
                coverage.absent,
                coverage.rejected
            );
        }
        let _ = writeln!(out, "Duration:             {} ms", self.duration_ms);
        out
    }
}

/// Per-document results in submission order, plus the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub results: Vec<Result<ExtractedDocument, FailedDocument>>,
    pub summary: RunSummary,
}

impl BatchReport {
    pub fn extracted(&self) -> impl Iterator<Item = &ExtractedDocument> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }
}

/// What loading a batch into a store did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub inserted: usize,
    pub updated: usize,
    pub stimulation_rows: usize,
    /// Documents the store refused, indexed by load position.
    pub failed: Vec<FailedDocument>,
}
