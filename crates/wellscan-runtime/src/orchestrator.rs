//! Orchestrator: parallel batch extraction with per-document failure isolation.

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::Utc;
use rayon::iter::{IntoParallelRefIterator, IndexedParallelIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;
use tracing::{info, warn};
use wellscan_core::{ExtractionConfig, Result};
use wellscan_extract::{DocumentExtractor, ExtractedDocument, ExtractorRegistry, SourceDocument};
use wellscan_store::{UpsertOutcome, WellStore};

use crate::types::*;

/// Runs batches of documents. The extractor registry is built once and
/// shared read-only by every worker.
pub struct Orchestrator {
    extractor: DocumentExtractor,
}

impl Orchestrator {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            extractor: DocumentExtractor::new(config),
        }
    }

    /// Create with a custom registry (for testing).
    pub fn with_registry(config: ExtractionConfig, registry: ExtractorRegistry) -> Self {
        Self {
            extractor: DocumentExtractor::with_registry(config, registry),
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        self.extractor.config()
    }

    /// Worker threads for a batch of `batch_len` documents.
    pub fn workers(&self, batch_len: usize) -> usize {
        let configured = match self.config().workers {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            n => n,
        };
        configured.min(batch_len).max(1)
    }

    /// Extract one document. Errors and panics become a [`FailedDocument`].
    pub fn run_document(
        &self,
        index: usize,
        doc: &SourceDocument,
    ) -> std::result::Result<ExtractedDocument, FailedDocument> {
        let failed = |error: String| FailedDocument {
            index,
            source: doc.name.clone(),
            error,
        };

        match catch_unwind(AssertUnwindSafe(|| self.extractor.extract(doc))) {
            Ok(Ok(extracted)) => Ok(extracted),
            Ok(Err(e)) => {
                warn!(
                    "Extraction failed for {}: {}",
                    doc.name.as_deref().unwrap_or("<unnamed>"),
                    e
                );
                Err(failed(e.to_string()))
            }
            Err(panic_info) => {
                let msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                warn!(
                    "Extraction panicked for {}: {}",
                    doc.name.as_deref().unwrap_or("<unnamed>"),
                    msg
                );
                Err(failed(format!("extraction panicked: {}", msg)))
            }
        }
    }

    /// Extract every document. Results keep input order; one document's
    /// failure never aborts the batch.
    pub fn run_batch(&self, docs: Vec<SourceDocument>) -> BatchReport {
        let started_at = Utc::now();
        let workers = self.workers(docs.len());
        info!("Extracting {} documents on {} workers", docs.len(), workers);

        let run = |(index, doc): (usize, &SourceDocument)| self.run_document(index, doc);
        let results: Vec<std::result::Result<ExtractedDocument, FailedDocument>> =
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map(|pool| pool.install(|| docs.par_iter().enumerate().map(run).collect()))
                .unwrap_or_else(|e| {
                    warn!("Worker pool unavailable ({}), running sequentially", e);
                    docs.iter().enumerate().map(run).collect()
                });

        let summary = RunSummary::from_results(&results, started_at, Utc::now());
        info!(
            "Batch complete: {} succeeded ({} malformed), {} failed in {}ms",
            summary.succeeded,
            summary.malformed,
            summary.failed.len(),
            summary.duration_ms
        );

        BatchReport { results, summary }
    }
}

/// Load extracted documents into a store: upsert each well, then replace its
/// stimulation rows. Malformed documents only touch the well record so
/// earlier rows survive a bad rescan. A store error is recorded against its
/// document and loading continues.
pub fn load_into<'a>(
    store: &dyn WellStore,
    documents: impl IntoIterator<Item = &'a ExtractedDocument>,
) -> LoadReport {
    let mut report = LoadReport::default();

    for (index, doc) in documents.into_iter().enumerate() {
        if let Err(e) = load_document(store, doc, &mut report) {
            warn!("Failed to store well {:?}: {}", doc.well.well_file_no, e);
            report.failed.push(FailedDocument {
                index,
                source: doc.well.source_file.clone(),
                error: e.to_string(),
            });
        }
    }

    info!(
        "Loaded {} new and {} updated wells, {} stimulation rows, {} failed",
        report.inserted,
        report.updated,
        report.stimulation_rows,
        report.failed.len()
    );
    report
}

fn load_document(
    store: &dyn WellStore,
    doc: &ExtractedDocument,
    report: &mut LoadReport,
) -> Result<()> {
    match store.upsert_well(doc.well.clone())? {
        UpsertOutcome::Inserted => report.inserted += 1,
        UpsertOutcome::Updated => report.updated += 1,
    }
    if !doc.malformed {
        report.stimulation_rows +=
            store.replace_stimulations(&doc.well.well_file_no, doc.stimulations.clone())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workers_bounded_by_batch() {
        let config = ExtractionConfig {
            workers: 8,
            ..ExtractionConfig::default()
        };
        let orchestrator = Orchestrator::new(config);
        assert_eq!(orchestrator.workers(3), 3);
        assert_eq!(orchestrator.workers(100), 8);
        assert_eq!(orchestrator.workers(0), 1);
    }

    #[test]
    fn test_empty_batch() {
        let report = Orchestrator::new(ExtractionConfig::default()).run_batch(Vec::new());
        assert!(report.results.is_empty());
        assert_eq!(report.summary.documents, 0);
        assert!(report.summary.failed.is_empty());
    }
}
