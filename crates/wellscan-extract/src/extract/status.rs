//! Well status, well type and producing method.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{clean, cut_at_column, first_capture, first_raw};

const STATUS_WORDS: &str =
    r"Producing|Shut.?In|Temporarily\s+Abandoned|Abandoned|Active|Inactive|Pumping|Flowing";

static STATUS_INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:We[il]l\s+)?Status\s*(?:\(Producing\s+or\s+Shut.In\))?\s*[:.]?[ ]*\n?[ ]*((?:{STATUS_WORDS})(?:\s+(?:Oil|Gas|Water)\s+Well)?)\b"
    ))
    .unwrap()
});

/// Header row `... Well Status (Producing or Shut-In)` with values on the next line.
static STATUS_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:We[il]l\s+)?Status\s*\(Producing\s+or\s+Shut.In\)[^\n]*\n([^\n]*)").unwrap()
});

static STATUS_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b(?:{STATUS_WORDS})\b")).unwrap());

static PRESENT_STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:PRESENT\s+)?STATUS\s*(?:OF\s*WELL)?\s*[:.]?\s*(PUMPING\s+OIL\s+WELL|FLOWING|SHUT.?IN|ABANDONED|PRODUCING|ACTIVE|INACTIVE)\b",
    )
    .unwrap()
});

static WELL_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Well\s*Type\s*[:.]?[ ]*([A-Za-z][A-Za-z \-]{2,40})").unwrap());

static PRODUCING_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)Producing\s*Method\s*[:.]?\s*(?:\([^)\n]*\)\s*)?(Flowing|Pumping|Gas\s*Lift|Rod\s*Pump|ESP|Plunger)\b",
    )
    .unwrap()
});

/// Status as written. In the tabular form the status column is the last
/// one, so the last status word on the value row is taken.
pub fn well_status(text: &str) -> Option<String> {
    if let Some(status) = first_capture(&STATUS_INLINE, text) {
        return Some(status);
    }
    let table_row = first_raw(&STATUS_TABLE, text).and_then(|row| {
        STATUS_WORD
            .find_iter(row)
            .last()
            .map(|m| clean(m.as_str()))
    });
    table_row.or_else(|| first_capture(&PRESENT_STATUS, text))
}

pub fn well_type(text: &str) -> Option<String> {
    first_raw(&WELL_TYPE, text)
        .map(|raw| clean(cut_at_column(raw)))
        .filter(|t| t.len() > 2 && t.len() < 60)
}

pub fn producing_method(text: &str) -> Option<String> {
    first_capture(&PRODUCING_METHOD, text)
}
