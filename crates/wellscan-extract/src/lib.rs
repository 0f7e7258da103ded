//! WellScan Extract: OCR text normalization, pattern-based field extractors,
//! stimulation row parsing, record assembly and cleaning.

pub mod assemble;
pub mod clean;
pub mod extract;
pub mod normalize;

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use wellscan_core::{ExtractionConfig, Field, Result, StimulationRecord, WellRecord};

pub use assemble::{assemble, identifier_only, AssembledRecord};
pub use clean::{canonical_api, clean_record, clean_text};
pub use extract::{
    ExtractionContext, ExtractorRegistry, FieldExtractor, FieldOutcome, FieldOutcomes, FieldValue,
    OutcomeKind,
};
pub use normalize::{normalize, NormalizedText};

/// One unit of input: OCR text plus the name of the scanned file it came from.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    pub name: Option<String>,
    pub text: String,
}

impl SourceDocument {
    pub fn new(name: Option<impl Into<String>>, text: impl Into<String>) -> Self {
        Self {
            name: name.map(Into::into),
            text: text.into(),
        }
    }
}

/// Cleaned output for one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    pub well: WellRecord,
    pub stimulations: Vec<StimulationRecord>,
    /// Per-field outcome, for coverage reporting.
    pub outcomes: BTreeMap<Field, OutcomeKind>,
    /// Why a field's candidates were discarded.
    pub rejections: BTreeMap<Field, String>,
    pub ghost_rows: usize,
    /// SHA-256 of the raw text.
    pub content_hash: String,
    /// Too little text to search; only the identifier was resolved.
    pub malformed: bool,
}

/// Runs the full per-document pipeline: normalize, extract, assemble, clean.
pub struct DocumentExtractor {
    registry: ExtractorRegistry,
    config: ExtractionConfig,
}

impl DocumentExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self::with_registry(config, ExtractorRegistry::standard())
    }

    pub fn with_registry(config: ExtractionConfig, registry: ExtractorRegistry) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn extract(&self, doc: &SourceDocument) -> Result<ExtractedDocument> {
        let source_name = doc.name.as_deref();
        let content_hash = content_hash(&doc.text);
        let text = normalize(&doc.text);

        if text.content_chars() < self.config.min_text_chars {
            return self.extract_malformed(&text, source_name, content_hash);
        }

        let outcomes = self.registry.run(&text, &self.config, source_name);
        let stimulation = extract::stimulation::extract_stimulations(text.as_str());

        let record = assemble(&outcomes, stimulation.records, source_name, &self.config)?;
        let record = require_identifier(clean_record(record), source_name)?;

        debug!(
            "Extracted well {} ({} stimulation rows) from {}",
            record.well.well_file_no,
            record.stimulations.len(),
            source_name.unwrap_or("<unnamed>")
        );

        Ok(ExtractedDocument {
            well: record.well,
            stimulations: record.stimulations,
            outcomes: outcomes.iter().map(|(f, o)| (*f, o.kind())).collect(),
            rejections: outcomes
                .iter()
                .filter_map(|(f, o)| match o {
                    FieldOutcome::Rejected(reason) => Some((*f, reason.clone())),
                    _ => None,
                })
                .collect(),
            ghost_rows: stimulation.ghosts_discarded,
            content_hash,
            malformed: false,
        })
    }

    fn extract_malformed(
        &self,
        text: &NormalizedText,
        source_name: Option<&str>,
        content_hash: String,
    ) -> Result<ExtractedDocument> {
        let id = extract::identifiers::well_file_no(text.as_str(), source_name).ok_or_else(|| {
            wellscan_core::Error::MissingIdentifier(source_name.unwrap_or("<unnamed>").to_string())
        })?;
        warn!(
            "Document {} has {} characters of text, keeping identifier only",
            source_name.unwrap_or("<unnamed>"),
            text.content_chars()
        );

        let record = require_identifier(
            clean_record(identifier_only(&id, source_name, &self.config)),
            source_name,
        )?;
        let mut outcomes: BTreeMap<Field, OutcomeKind> =
            Field::ALL.iter().map(|f| (*f, OutcomeKind::Absent)).collect();
        outcomes.insert(Field::FileNo, OutcomeKind::Populated);

        Ok(ExtractedDocument {
            well: record.well,
            stimulations: record.stimulations,
            outcomes,
            rejections: BTreeMap::new(),
            ghost_rows: 0,
            content_hash,
            malformed: true,
        })
    }
}

/// Cleaning drops non-ASCII characters, which can empty an identifier taken
/// from a filename stem.
fn require_identifier(
    record: AssembledRecord,
    source_name: Option<&str>,
) -> Result<AssembledRecord> {
    if record.well.well_file_no.is_empty() {
        return Err(wellscan_core::Error::MissingIdentifier(
            source_name.unwrap_or("<unnamed>").to_string(),
        ));
    }
    Ok(record)
}

/// Extract one document with a throwaway registry.
pub fn extract_document(
    raw_text: &str,
    source_name: Option<&str>,
    config: &ExtractionConfig,
) -> Result<ExtractedDocument> {
    DocumentExtractor::new(config.clone()).extract(&SourceDocument::new(source_name, raw_text))
}

/// SHA-256 hex digest of document text.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
