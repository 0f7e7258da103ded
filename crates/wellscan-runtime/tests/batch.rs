//! Batch orchestration and store loading.

use wellscan_core::{ExtractionConfig, Field, NOT_AVAILABLE};
use wellscan_extract::{
    ExtractionContext, ExtractorRegistry, FieldExtractor, FieldOutcome, NormalizedText,
    SourceDocument,
};
use wellscan_runtime::{load_into, Orchestrator};
use wellscan_store::{MemoryStore, WellStore};

const WELL_WITH_STIMULATION: &str = "Well Name: ALPHA 1-1H
Operator: Alpha Oil LLC
Latitude: 48.10 N  Longitude: 103.40 W
Well Specific Stimulations
Date Stimulated  Stimulated Formation  Top (Ft)  Bottom (Ft)  Stimulation Stages  Volume  Volume Units
01/21/2015  Bakken  10931  20600  36  59856  Barrels
Type Treatment  Acid %  Lbs Proppant  Maximum Treatment Pressure (PSI)  Maximum Treatment Rate (BBLS/Min)
Sand Frac  9133468  8975  35.0
";

/// Panics on any document mentioning `BOOM`.
struct Exploding;

impl FieldExtractor for Exploding {
    fn field(&self) -> Field {
        Field::WellType
    }

    fn extract(&self, text: &NormalizedText, _ctx: &ExtractionContext<'_>) -> FieldOutcome {
        if text.as_str().contains("BOOM") {
            panic!("unreadable scan");
        }
        FieldOutcome::Absent
    }
}

fn exploding_orchestrator() -> Orchestrator {
    let mut registry = ExtractorRegistry::standard();
    registry.register(Exploding);
    let config = ExtractionConfig {
        workers: 2,
        ..ExtractionConfig::default()
    };
    Orchestrator::with_registry(config, registry)
}

fn batch() -> Vec<SourceDocument> {
    vec![
        SourceDocument::new(Some("W100.pdf"), WELL_WITH_STIMULATION),
        SourceDocument::new(Some("W200.pdf"), "BOOM this scan breaks an extractor unit"),
        SourceDocument::new(Some("W300.pdf"), "short"),
        SourceDocument::new(None::<String>, "no identifier anywhere in this page of text"),
    ]
}

#[test]
fn test_failures_are_isolated_and_order_is_kept() {
    let report = exploding_orchestrator().run_batch(batch());

    assert_eq!(report.results.len(), 4);

    let first = report.results[0].as_ref().unwrap();
    assert_eq!(first.well.well_file_no, "100");
    assert_eq!(first.well.well_name.as_deref(), Some("ALPHA 1-1H"));
    assert_eq!(first.stimulations.len(), 1);

    let panicked = report.results[1].as_ref().unwrap_err();
    assert_eq!(panicked.index, 1);
    assert_eq!(panicked.source.as_deref(), Some("W200.pdf"));
    assert!(panicked.error.contains("unreadable scan"));

    let malformed = report.results[2].as_ref().unwrap();
    assert!(malformed.malformed);
    assert_eq!(malformed.well.well_file_no, "300");

    let missing = report.results[3].as_ref().unwrap_err();
    assert_eq!(missing.index, 3);
    assert!(missing.error.contains("No well file number"));
}

#[test]
fn test_summary_counts() {
    let report = exploding_orchestrator().run_batch(batch());
    let summary = &report.summary;

    assert_eq!(summary.documents, 4);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.failed.len(), 2);
    assert_eq!(summary.stimulation_records, 1);
    assert_eq!(summary.wells_with_api, 0);
    assert_eq!(summary.wells_with_coordinates, 1);

    let names = summary.field_coverage[&Field::WellName];
    assert_eq!(names.populated, 1);
    assert_eq!(names.absent, 1);

    let rendered = summary.render();
    assert!(rendered.contains("Documents:            4"));
    assert!(rendered.contains("W200.pdf"));
    assert!(rendered.contains("well_name"));
}

#[test]
fn test_load_and_rescan() {
    let orchestrator = Orchestrator::new(ExtractionConfig::default());
    let store = MemoryStore::new();

    let first = orchestrator.run_batch(vec![SourceDocument::new(
        Some("W100.pdf"),
        WELL_WITH_STIMULATION,
    )]);
    let loaded = load_into(&store, first.extracted());
    assert_eq!(loaded.inserted, 1);
    assert_eq!(loaded.stimulation_rows, 1);

    // Same document again: nothing duplicates.
    let again = load_into(&store, first.extracted());
    assert_eq!(again.inserted, 0);
    assert_eq!(again.updated, 1);
    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(store.stimulation_count(), 1);

    // A blank rescan keeps what the earlier scan found.
    let rescan = orchestrator.run_batch(vec![SourceDocument::new(Some("W100.pdf"), " ")]);
    load_into(&store, rescan.extracted());

    let well = store.well("100").unwrap().unwrap();
    assert_eq!(well.well_name.as_deref(), Some("ALPHA 1-1H"));
    assert_eq!(well.operator.as_deref(), Some("Alpha Oil LLC"));
    assert_ne!(well.operator.as_deref(), Some(NOT_AVAILABLE));
    assert!(well.coordinates().is_some());
    assert_eq!(store.stimulations("100").unwrap().len(), 1);
}

#[test]
fn test_store_error_does_not_stop_loading() {
    let orchestrator = Orchestrator::new(ExtractionConfig::default());
    let report = orchestrator.run_batch(vec![
        SourceDocument::new(Some("W100.pdf"), WELL_WITH_STIMULATION),
        SourceDocument::new(Some("W200.pdf"), WELL_WITH_STIMULATION),
    ]);
    let mut documents: Vec<_> = report.extracted().cloned().collect();
    documents[0].well.well_file_no = String::new();

    let store = MemoryStore::new();
    let loaded = load_into(&store, &documents);

    assert_eq!(loaded.inserted, 1);
    assert_eq!(loaded.failed.len(), 1);
    assert_eq!(loaded.failed[0].index, 0);
    assert_eq!(loaded.failed[0].source.as_deref(), Some("W100.pdf"));
    assert!(store.well("200").unwrap().is_some());
    assert_eq!(store.stimulations("200").unwrap().len(), 1);
}
