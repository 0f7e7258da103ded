//! Field extraction through a registry of independent, pattern-based extractor units.
//!
//! Every unit implements [`FieldExtractor`] and reads only the normalized text
//! and the outcomes of units registered before it. Units hold no mutable
//! state, so one registry is shared by every worker thread.

pub mod casing;
pub mod coordinates;
pub mod dates;
pub mod depth;
pub mod elevation;
pub mod identifiers;
pub mod location;
pub mod parties;
pub mod status;
pub mod stimulation;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;
use wellscan_core::{ExtractionConfig, Field, GeoPoint};

use crate::normalize::{NormalizedText, COLUMN_GAP};

pub use coordinates::CoordinateExtractor;
pub use location::LocationParts;

/// A value produced by one extractor unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Location(LocationParts),
    Coordinates(GeoPoint),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_location(&self) -> Option<&LocationParts> {
        match self {
            FieldValue::Location(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_coordinates(&self) -> Option<GeoPoint> {
        match self {
            FieldValue::Coordinates(p) => Some(*p),
            _ => None,
        }
    }
}

/// Result of one extractor unit. Absence and rejection are normal outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FieldOutcome {
    Found(FieldValue),
    Absent,
    /// A candidate was found and discarded by a disambiguation rule.
    Rejected(String),
}

impl FieldOutcome {
    pub fn text(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => FieldOutcome::Found(FieldValue::Text(v)),
            _ => FieldOutcome::Absent,
        }
    }

    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            FieldOutcome::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            FieldOutcome::Found(_) => OutcomeKind::Populated,
            FieldOutcome::Absent => OutcomeKind::Absent,
            FieldOutcome::Rejected(_) => OutcomeKind::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Populated,
    Absent,
    Rejected,
}

/// Outcomes keyed by field, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldOutcomes(BTreeMap<Field, FieldOutcome>);

impl FieldOutcomes {
    pub fn get(&self, field: Field) -> Option<&FieldOutcome> {
        self.0.get(&field)
    }

    pub fn insert(&mut self, field: Field, outcome: FieldOutcome) {
        self.0.insert(field, outcome);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &FieldOutcome)> {
        self.0.iter()
    }

    /// The text value of `field`, if it was found.
    pub fn text(&self, field: Field) -> Option<String> {
        self.get(field)
            .and_then(FieldOutcome::value)
            .and_then(FieldValue::as_text)
            .map(str::to_string)
    }

    pub fn location(&self) -> Option<&LocationParts> {
        self.get(Field::Location)
            .and_then(FieldOutcome::value)
            .and_then(FieldValue::as_location)
    }

    pub fn coordinates(&self) -> Option<GeoPoint> {
        self.get(Field::Coordinates)
            .and_then(FieldOutcome::value)
            .and_then(FieldValue::as_coordinates)
    }
}

/// What an extractor may read besides the text.
pub struct ExtractionContext<'a> {
    pub config: &'a ExtractionConfig,
    /// Source filename, e.g. `W11745.pdf`.
    pub source_name: Option<&'a str>,
    /// Outcomes of the units that ran earlier.
    pub prior: &'a FieldOutcomes,
}

impl<'a> ExtractionContext<'a> {
    /// County supplied by the location unit, used to pick a bounding box.
    pub fn county(&self) -> Option<&str> {
        self.prior.location().and_then(|l| l.county.as_deref())
    }
}

/// The common capability of every extractor unit.
pub trait FieldExtractor: Send + Sync {
    fn field(&self) -> Field;

    fn extract(&self, text: &NormalizedText, ctx: &ExtractionContext<'_>) -> FieldOutcome;
}

type ExtractFn = fn(&NormalizedText, &ExtractionContext<'_>) -> FieldOutcome;

/// Adapter turning a plain function into a registered unit.
pub struct FnExtractor {
    field: Field,
    run: ExtractFn,
}

impl FnExtractor {
    pub fn new(field: Field, run: ExtractFn) -> Self {
        Self { field, run }
    }
}

impl FieldExtractor for FnExtractor {
    fn field(&self) -> Field {
        self.field
    }

    fn extract(&self, text: &NormalizedText, ctx: &ExtractionContext<'_>) -> FieldOutcome {
        (self.run)(text, ctx)
    }
}

/// Ordered set of extractor units.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn FieldExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every well-record field, location ahead of coordinates.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register(FnExtractor::new(Field::FileNo, |t, ctx| {
                FieldOutcome::text(identifiers::well_file_no(t.as_str(), ctx.source_name))
            }))
            .register(FnExtractor::new(Field::ApiNumber, |t, _| {
                identifiers::api_number(t.as_str())
            }))
            .register(FnExtractor::new(Field::WellName, |t, _| {
                FieldOutcome::text(parties::well_name(t))
            }))
            .register(FnExtractor::new(Field::Operator, |t, _| {
                FieldOutcome::text(parties::operator(t.as_str()))
            }))
            .register(FnExtractor::new(Field::FieldName, |t, _| {
                FieldOutcome::text(parties::field_name(t.as_str()))
            }))
            .register(FnExtractor::new(Field::Location, |t, _| {
                match location::location(t.as_str()) {
                    Some(parts) => FieldOutcome::Found(FieldValue::Location(parts)),
                    None => FieldOutcome::Absent,
                }
            }))
            .register(CoordinateExtractor)
            .register(FnExtractor::new(Field::ElevationGl, |t, _| {
                FieldOutcome::text(elevation::elevations(t.as_str()).ground_level)
            }))
            .register(FnExtractor::new(Field::ElevationKb, |t, _| {
                FieldOutcome::text(elevation::elevations(t.as_str()).kelly_bushing)
            }))
            .register(FnExtractor::new(Field::SpudDate, |t, _| {
                FieldOutcome::text(dates::spud_date(t.as_str()))
            }))
            .register(FnExtractor::new(Field::CompletionDate, |t, _| {
                FieldOutcome::text(dates::completion_date(t.as_str()))
            }))
            .register(FnExtractor::new(Field::WellStatus, |t, _| {
                FieldOutcome::text(status::well_status(t.as_str()))
            }))
            .register(FnExtractor::new(Field::WellType, |t, _| {
                FieldOutcome::text(status::well_type(t.as_str()))
            }))
            .register(FnExtractor::new(Field::TotalDepth, |t, _| {
                FieldOutcome::text(depth::total_depth(t.as_str()))
            }))
            .register(FnExtractor::new(Field::ProducingMethod, |t, _| {
                FieldOutcome::text(status::producing_method(t.as_str()))
            }))
            .register(FnExtractor::new(Field::SurfaceCasing, |t, ctx| {
                FieldOutcome::text(casing::surface_casing(t.as_str(), ctx.config.max_casing_chars))
            }))
            .register(FnExtractor::new(Field::ProductionCasing, |t, ctx| {
                FieldOutcome::text(casing::production_casing(
                    t.as_str(),
                    ctx.config.max_casing_chars,
                ))
            }));
        registry
    }

    pub fn register(&mut self, extractor: impl FieldExtractor + 'static) -> &mut Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    pub fn fields(&self) -> Vec<Field> {
        self.extractors.iter().map(|e| e.field()).collect()
    }

    /// Run every unit in registration order.
    pub fn run(
        &self,
        text: &NormalizedText,
        config: &ExtractionConfig,
        source_name: Option<&str>,
    ) -> FieldOutcomes {
        let mut outcomes = FieldOutcomes::default();

        for extractor in &self.extractors {
            let outcome = {
                let ctx = ExtractionContext {
                    config,
                    source_name,
                    prior: &outcomes,
                };
                extractor.extract(text, &ctx)
            };
            if let FieldOutcome::Rejected(reason) = &outcome {
                debug!(
                    "{} rejected for {}: {}",
                    extractor.field(),
                    source_name.unwrap_or("<unnamed>"),
                    reason
                );
            }
            outcomes.insert(extractor.field(), outcome);
        }

        outcomes
    }
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace and trim.
pub(crate) fn clean(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// First capture group of the first match, uncleaned.
pub(crate) fn first_raw<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// First capture group of the first match, cleaned; empty counts as no match.
pub(crate) fn first_capture(re: &Regex, text: &str) -> Option<String> {
    first_raw(re, text).map(clean).filter(|s| !s.is_empty())
}

/// First non-empty capture across patterns, tried in order.
pub(crate) fn first_of(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| first_capture(re, text))
}

/// Cut a value at the first column gap, pipe, tab or newline.
pub(crate) fn cut_at_column(value: &str) -> &str {
    let end = [
        value.find(COLUMN_GAP),
        value.find('|'),
        value.find('\t'),
        value.find('\n'),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(value.len());
    &value[..end]
}
