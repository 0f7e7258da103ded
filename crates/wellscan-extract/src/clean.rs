//! Record cleaning: markup and non-ASCII removal, API formatting, `N/A` fill.
//!
//! Cleaning is idempotent. Coordinates and the identifier are never filled.

use once_cell::sync::Lazy;
use regex::Regex;
use wellscan_core::{StimulationRecord, WellRecord, NOT_AVAILABLE};

use crate::assemble::AssembledRecord;
use crate::extract::clean as collapse_whitespace;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Strip markup and non-ASCII characters, then collapse whitespace.
pub fn clean_text(value: &str) -> String {
    let stripped = MARKUP.replace_all(value, " ");
    let ascii: String = stripped.chars().filter(|c| c.is_ascii()).collect();
    collapse_whitespace(&ascii)
}

/// `DD-DDD-DDDDD` from spaced or run-together digits. A zero sidetrack
/// suffix (`-00` or `-00-00`) is dropped. Anything else is left alone.
pub fn canonical_api(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let (head, tail) = digits.split_at(digits.len().min(10));
    let zero_suffix = matches!(tail.len(), 0 | 2 | 4) && tail.chars().all(|c| c == '0');
    (head.len() == 10 && zero_suffix)
        .then(|| format!("{}-{}-{}", &head[..2], &head[2..5], &head[5..]))
}

fn fill(field: &mut Option<String>) {
    let cleaned = field
        .take()
        .map(|v| clean_text(&v))
        .filter(|v| !v.is_empty());
    *field = Some(cleaned.unwrap_or_else(|| NOT_AVAILABLE.to_string()));
}

pub fn clean_well(mut well: WellRecord) -> WellRecord {
    well.well_file_no = clean_text(&well.well_file_no);
    well.state = clean_text(&well.state);

    for (_, field) in well.text_fields_mut() {
        fill(field);
    }
    if let Some(api) = well.api_number.as_deref().and_then(canonical_api) {
        well.api_number = Some(api);
    }
    well
}

pub fn clean_stimulation(mut row: StimulationRecord) -> StimulationRecord {
    for (_, field) in row.text_fields_mut() {
        fill(field);
    }
    row
}

pub fn clean_record(record: AssembledRecord) -> AssembledRecord {
    AssembledRecord {
        well: clean_well(record.well),
        stimulations: record.stimulations.into_iter().map(clean_stimulation).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellscan_core::GeoPoint;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("<b>BASIC</b>  GAME\u{2122} 1-1H "), "BASIC GAME 1-1H");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn test_canonical_api() {
        assert_eq!(canonical_api("33 053 02102").as_deref(), Some("33-053-02102"));
        assert_eq!(canonical_api("3305302102").as_deref(), Some("33-053-02102"));
        assert_eq!(canonical_api("33-053-02102-00-00").as_deref(), Some("33-053-02102"));
        assert_eq!(canonical_api("33-053-021"), None);
        assert_eq!(canonical_api("33-053-02102-01"), None);
    }

    #[test]
    fn test_fill_sentinel_but_not_coordinates() {
        let mut well = WellRecord::new("11745", "ND");
        well.operator = Some("  <i>Oasis</i> Petroleum ".to_string());
        well.api_number = Some("3305302102".to_string());
        let cleaned = clean_well(well);

        assert_eq!(cleaned.operator.as_deref(), Some("Oasis Petroleum"));
        assert_eq!(cleaned.api_number.as_deref(), Some("33-053-02102"));
        assert_eq!(cleaned.well_name.as_deref(), Some(NOT_AVAILABLE));
        assert_eq!(cleaned.latitude(), None);
        assert_eq!(cleaned.well_file_no, "11745");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut well = WellRecord::new("11745", "ND");
        well.well_name = Some("BASIC GAME 1-1H".to_string());
        well.set_coordinates(Some(GeoPoint { latitude: 48.1, longitude: -103.6 }));
        let record = AssembledRecord {
            well,
            stimulations: vec![StimulationRecord {
                top_ft: Some("10931".to_string()),
                ..StimulationRecord::default()
            }],
        };

        let once = clean_record(record);
        let twice = clean_record(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.stimulations[0].details.as_deref(), Some(NOT_AVAILABLE));
        assert_eq!(once.well.latitude(), Some(48.1));
    }
}
