//! Well file number and API number.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{first_of, FieldOutcome};

static FILENAME_FILE_NO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^W(\d+)").unwrap());

static TEXT_FILE_NO: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Well\s*File\s*(?:No\.?|Number|#)\s*[:.]?\s*(\d+)",
        r"(?i)\bFile\s*(?:No\.?|Number|#)\s*[:.]?\s*(\d+)",
        r"(?i)\bST\s*FILE\s*NO\s*[:.]?\s*(\d+)",
        r"(?i)NDIC\s*File\s*Number\s*[:.]?\s*(\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LABELED_API: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bAPI\s*(?:#|No\.?|Number)?\s*[:.#]?\s*(\d{2})[- ](\d{3})[- ](\d{5})\b")
        .unwrap()
});

static BARE_API: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2})[- ](\d{3})[- ](\d{5})\b").unwrap());

static PHONE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:CALL|PHONE|TEL|TELEPHONE|FAX)\b").unwrap());

static EXTENSION_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bEXT\b").unwrap());

/// `-1234` right after the candidate: the candidate is the head of a longer number.
static TRAILING_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ ?[-.] ?\d{3,4}\b").unwrap());

/// `701-`, `701.` or `(701) ` right before the candidate.
static LEADING_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\b\d{3} ?[-.]|\(\d{3}\)) ?$").unwrap());

const PHONE_LOOKBEHIND: usize = 20;
const EXTENSION_LOOKAHEAD: usize = 12;

/// Strip directories and the extension from a source name.
pub fn file_stem(source_name: &str) -> &str {
    let base = source_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(source_name);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    }
}

/// Resolve the well identifier.
///
/// A `W<digits>` filename (or an all-digit stem) wins; then labeled file
/// numbers in the text; then the bare filename stem.
pub fn well_file_no(text: &str, source_name: Option<&str>) -> Option<String> {
    let stem = source_name.map(file_stem).map(str::trim);

    if let Some(stem) = stem {
        if let Some(caps) = FILENAME_FILE_NO.captures(stem) {
            return Some(caps[1].to_string());
        }
        if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()) {
            return Some(stem.to_string());
        }
    }

    first_of(&TEXT_FILE_NO, text).or_else(|| {
        stem.filter(|s| !s.is_empty()).map(str::to_string)
    })
}

/// Find the API number, rejecting phone-number-shaped candidates.
///
/// Labeled candidates are tried before bare ones. The canonical form is
/// `DD-DDD-DDDDD`; a `-00` or `-00-00` suffix is accepted and dropped.
pub fn api_number(text: &str) -> FieldOutcome {
    let mut rejected: Option<String> = None;

    for re in [&*LABELED_API, &*BARE_API] {
        for caps in re.captures_iter(text) {
            let (Some(start), Some(end)) = (caps.get(1), caps.get(3)) else {
                continue;
            };
            let canonical = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);

            match phone_context(text, start.start(), end.end()) {
                Some(reason) => {
                    rejected.get_or_insert_with(|| {
                        format!("{} looks like a phone number ({})", canonical, reason)
                    });
                }
                None => return FieldOutcome::text(Some(canonical)),
            }
        }
    }

    match rejected {
        Some(reason) => FieldOutcome::Rejected(reason),
        None => FieldOutcome::Absent,
    }
}

/// Why the digits at `start..end` read as a phone number, if they do.
fn phone_context(text: &str, start: usize, end: usize) -> Option<&'static str> {
    let before = &text[floor_boundary(text, start.saturating_sub(PHONE_LOOKBEHIND))..start];
    let after = &text[end..ceil_boundary(text, end + EXTENSION_LOOKAHEAD)];

    if PHONE_WORD.is_match(before) {
        return Some("phone keyword before");
    }
    if EXTENSION_WORD.is_match(after) {
        return Some("extension after");
    }
    if TRAILING_GROUP.is_match(&text[end..]) {
        return Some("trailing digit group");
    }
    if LEADING_GROUP.is_match(&text[..start]) {
        return Some("leading digit group");
    }
    None
}

pub(crate) fn floor_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

pub(crate) fn ceil_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_no_from_filename() {
        assert_eq!(well_file_no("", Some("W11745.pdf")).as_deref(), Some("11745"));
        assert_eq!(well_file_no("", Some("scans/w20197.pdf")).as_deref(), Some("20197"));
        assert_eq!(well_file_no("", Some("28190.pdf")).as_deref(), Some("28190"));
    }

    #[test]
    fn test_file_no_from_text_when_filename_has_none() {
        let text = "NDIC File Number: 22099\nWell Name: BASIC GAME 1-1H";
        assert_eq!(well_file_no(text, Some("report.pdf")).as_deref(), Some("22099"));

        let text = "Well File No. 11745";
        assert_eq!(well_file_no(text, None).as_deref(), Some("11745"));
    }

    #[test]
    fn test_file_no_falls_back_to_stem() {
        assert_eq!(well_file_no("nothing here", Some("report.pdf")).as_deref(), Some("report"));
        assert_eq!(well_file_no("nothing here", None), None);
    }

    #[test]
    fn test_api_labeled() {
        let outcome = api_number("API #: 33-053-02102-00-00");
        assert_eq!(outcome, FieldOutcome::text(Some("33-053-02102".to_string())));

        let outcome = api_number("API Number 33 105 02719");
        assert_eq!(outcome, FieldOutcome::text(Some("33-105-02719".to_string())));
    }

    #[test]
    fn test_api_phone_context_rejected() {
        let outcome = api_number("CALL 33-053-02102 EXT");
        assert!(matches!(outcome, FieldOutcome::Rejected(_)));
    }

    #[test]
    fn test_api_phone_rejected_in_favor_of_later_candidate() {
        let text = "Telephone: 70-132-88020 ext 4\nWell API 33-053-02102";
        let outcome = api_number(text);
        assert_eq!(outcome, FieldOutcome::text(Some("33-053-02102".to_string())));
    }

    #[test]
    fn test_api_part_of_longer_number() {
        assert!(matches!(api_number("(701) 32-888-02102"), FieldOutcome::Rejected(_)));
        assert!(matches!(api_number("33-053-02102-4471"), FieldOutcome::Rejected(_)));
        assert!(matches!(api_number("701-32-888-02102"), FieldOutcome::Rejected(_)));
        assert_eq!(api_number("no numbers"), FieldOutcome::Absent);
    }

    #[test]
    fn test_api_after_sentence_or_item_number() {
        let expected = FieldOutcome::text(Some("33-053-02102".to_string()));
        assert_eq!(api_number("Completed 05/02/2012. 33-053-02102 Bakken"), expected);
        assert_eq!(api_number("Item 1. 33-053-02102"), expected);
        assert_eq!(api_number("Section 12- 33-053-02102"), expected);
    }
}
