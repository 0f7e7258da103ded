//! Well name, operator and field name.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{clean, cut_at_column, first_raw};
use crate::normalize::NormalizedText;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

static COMPLETION_PAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)WELL\s*COMPLETION|SUNDRY\s*NOTICES").unwrap());

/// Label line (possibly carrying other column headers) with the value on the next line.
static SECTION_WELL_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(?:WELL\s*COMPLETION|SUNDRY\s*NOTICES).*?Well\s*Name\s*(?:and\s*Number)?[^\n]*\n\s*([A-Za-z][A-Za-z0-9 \-.#&']+?\d[\w\-]*)",
    )
    .unwrap()
});

static GENERAL_WELL_NAME: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Well\s*Name\s*[:.]?[ ]*([A-Za-z][A-Za-z0-9 \-.#&']{2,40}\d[\w\-]*)",
        r"(?i)Well\s*Name\s*(?:and\s*Number)?\s*[:.]?[ ]*\n\s*([A-Za-z][A-Za-z0-9 \-.#&']{2,40}\d[\w\-]*)",
    ])
});

const COMPANY_SUFFIX: &str = r"\b(?:Inc|LLC|Corp(?:oration)?|Company|Co|LP|Ltd)\b\.?";

static OPERATOR: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        &format!(r"(?i)Well\s*Operator\s*[:.]?\s*([A-Za-z][A-Za-z0-9 .,\-&']+?{COMPANY_SUFFIX})"),
        &format!(r"(?i)Operator\s*[:.]?[ ]*\n?\s*([A-Za-z][A-Za-z0-9 .,\-&']+?{COMPANY_SUFFIX})"),
        &format!(
            r"(?i)Operator\s*(?:Telephone)?\s*(?:Number)?[ ]*\n\s*([A-Za-z][A-Za-z0-9 .,\-&']+?{COMPANY_SUFFIX})"
        ),
    ])
});

/// Change-of-operator forms prefix the name with `FROM ... TO`.
static TRANSFER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:FROM\s+(?:\S+\s+){0,6}?TO\s+|FROM\s+|TO\s+)").unwrap()
});

static FIELD_NAME: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)Field\s*Name\s*[:.]?[ ]*([A-Za-z][A-Za-z \-]{1,30})",
        r"(?i)Field\s*/?\s*Prospect\s*[:.]?[ ]*([A-Za-z][A-Za-z \-]{1,30})",
        r"(?im)\bField\s*[:.]?[ ]*\n\s*([A-Z][A-Z \-]{1,30})",
        r"(?im)\|\s*Field\s*\n\s*([A-Z][A-Z \-]{1,20})",
    ])
});

static FIELD_NAME_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*\b(?:County|Pool|Address|Telephone)\b.*$").unwrap());

/// Well name, searching completion or sundry pages first.
pub fn well_name(doc: &NormalizedText) -> Option<String> {
    let accept = |raw: &str| {
        let name = clean(cut_at_column(raw));
        (name.len() > 3 && name.len() < 80).then_some(name)
    };

    for page in doc.pages_matching(&COMPLETION_PAGE) {
        if let Some(name) = first_raw(&SECTION_WELL_NAME, page).and_then(accept) {
            return Some(name);
        }
    }
    if let Some(name) = first_raw(&SECTION_WELL_NAME, doc.as_str()).and_then(accept) {
        return Some(name);
    }
    GENERAL_WELL_NAME
        .iter()
        .find_map(|re| first_raw(re, doc.as_str()).and_then(accept))
}

/// Operating company: text up to and including a company suffix.
pub fn operator(text: &str) -> Option<String> {
    OPERATOR.iter().find_map(|re| {
        let raw = first_raw(re, text)?;
        let name = clean(cut_at_column(raw));
        let name = TRANSFER_PREFIX.replace(&name, "");
        let name = name.trim();
        (name.len() > 3 && name.len() < 120).then(|| name.to_string())
    })
}

/// Oil field name, with trailing County/Pool/Address/Telephone text removed.
pub fn field_name(text: &str) -> Option<String> {
    FIELD_NAME.iter().find_map(|re| {
        let raw = first_raw(re, text)?;
        let name = clean(cut_at_column(raw));
        let name = FIELD_NAME_TAIL.replace(&name, "");
        let name = name.trim();
        (name.len() > 1 && name.len() < 40).then(|| name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn test_well_name_from_completion_page() {
        let raw = "--- PAGE 1 ---\nWell Name: COVER SHEET 9\n--- PAGE 2 ---\nWELL COMPLETION OR RECOMPLETION REPORT\nWell Name and Number    Spacing Unit Description\nBASIC GAME 1-1H    Sec 1 T153N R101W\n";
        assert_eq!(well_name(&normalize(raw)).as_deref(), Some("BASIC GAME 1-1H"));
    }

    #[test]
    fn test_well_name_general_pattern() {
        let doc = normalize("Well Name: Lynn 1-12H   Field: Baker");
        assert_eq!(well_name(&doc).as_deref(), Some("Lynn 1-12H"));
        assert_eq!(well_name(&normalize("no label here")), None);
    }

    #[test]
    fn test_operator_suffix() {
        let text = "Operator:  Oasis Petroleum North America LLC    Telephone (281) 404-9500";
        assert_eq!(operator(text).as_deref(), Some("Oasis Petroleum North America LLC"));
    }

    #[test]
    fn test_operator_next_line() {
        let text = "Operator  Telephone Number\nContinental Resources, Inc.  (405) 234-9000";
        assert_eq!(operator(text).as_deref(), Some("Continental Resources, Inc."));
    }

    #[test]
    fn test_operator_transfer_prefix() {
        let text = "Well Operator: FROM Hess Bakken TO Whiting Oil and Gas Corporation";
        assert_eq!(operator(text).as_deref(), Some("Whiting Oil and Gas Corporation"));
    }

    #[test]
    fn test_field_name_strips_tail() {
        assert_eq!(field_name("Field Name: BAKER County McKenzie").as_deref(), Some("BAKER"));
        assert_eq!(field_name("Field\nINDIAN HILL").as_deref(), Some("INDIAN HILL"));
        assert_eq!(field_name("Pool: Bakken"), None);
    }
}
