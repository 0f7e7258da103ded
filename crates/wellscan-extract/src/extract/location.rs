//! Legal land description: quarter-quarter, section, township, range and county.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use super::clean;

/// Decomposed surface location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationParts {
    pub description: String,
    pub section: String,
    /// Township with its direction, e.g. `153N`.
    pub township: String,
    /// Range with its direction, e.g. `101W`.
    pub range_dir: String,
    pub county: Option<String>,
}

/// `LOCATION: SURF: SWSW SEC 12, T153N, R101W, MCKENZIE CO`
static SURFACE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)LOCATION\s*[:.]?\s*(?:SURF\s*[:.]?)?\s*[NESW]{2,4}\s*(?:SEC\.?|Section)\s*(\d+)\s*[,\s]*T?(\d+)\s*N\s*[,\s]*R?(\d+)\s*W[,\s]*([A-Za-z]+)\s*(?:CO\b|County)",
    )
    .unwrap()
});

/// Header line, then `SWSW|12|153|101W|McKenzie` with pipes or column gaps.
static TABLE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)LOCATION\s*(?:OF\s*WELL)?[^\n]*\n[^\n]*?\b[NESW]{2,4}\s*[|\s]\s*(\d+)\s*[|\s]\s*(\d+)\s*N?\s*[|\s]\s*(\d+)\s*W?\s*[|\s]\s*([A-Za-z]+)",
    )
    .unwrap()
});

/// `SW NW Sec. 30, T153N, R100W, McKenzie County`
static QUARTER_QUARTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b([NESW]{2,4})\s*(?:SEC\.?|Section)\s*(\d+)\s*[,\s]*T(\d+)\s*N?\s*[,\s\-]*R(\d+)\s*W\b(?:[,\s]*([A-Za-z]+)\s+(?:County|Co)\b)?",
    )
    .unwrap()
});

/// Extract the surface location from the first pattern that matches.
pub fn location(text: &str) -> Option<LocationParts> {
    let build = |caps: &Captures<'_>, county: Option<usize>| LocationParts {
        description: clean(&caps[0]),
        section: caps[1].to_string(),
        township: format!("{}N", &caps[2]),
        range_dir: format!("{}W", &caps[3]),
        county: county
            .and_then(|i| caps.get(i))
            .map(|m| clean(m.as_str()))
            .filter(|c| !c.is_empty()),
    };

    if let Some(caps) = SURFACE_LINE.captures(text) {
        return Some(build(&caps, Some(4)));
    }
    if let Some(caps) = TABLE_ROW.captures(text) {
        return Some(build(&caps, Some(4)));
    }
    QUARTER_QUARTER.captures(text).map(|caps| LocationParts {
        description: clean(&caps[0]),
        section: caps[2].to_string(),
        township: format!("{}N", &caps[3]),
        range_dir: format!("{}W", &caps[4]),
        county: caps.get(5).map(|m| clean(m.as_str())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_line() {
        let loc = location("LOCATION: SURF: SWSW SEC 12, T153N, R101W, MCKENZIE CO, ND").unwrap();
        assert_eq!(loc.section, "12");
        assert_eq!(loc.township, "153N");
        assert_eq!(loc.range_dir, "101W");
        assert_eq!(loc.county.as_deref(), Some("MCKENZIE"));
    }

    #[test]
    fn test_table_row() {
        let text = "LOCATION OF WELL  Qtr-Qtr  Section  Township  Range  County\nAt Surface  SWSW|12|153|101 W|McKenzie";
        let loc = location(text).unwrap();
        assert_eq!(loc.section, "12");
        assert_eq!(loc.township, "153N");
        assert_eq!(loc.range_dir, "101W");
        assert_eq!(loc.county.as_deref(), Some("McKenzie"));
    }

    #[test]
    fn test_quarter_quarter() {
        let loc = location("Surface hole: SW NW Sec. 30, T153N, R100W, McKenzie County").unwrap();
        assert_eq!(loc.section, "30");
        assert_eq!(loc.township, "153N");
        assert_eq!(loc.range_dir, "100W");
        assert_eq!(loc.county.as_deref(), Some("McKenzie"));
        assert!(loc.description.starts_with("NW Sec. 30"));
    }

    #[test]
    fn test_quarter_quarter_without_county() {
        let loc = location("NENE Section 4 T150N R97W 250 FNL").unwrap();
        assert_eq!(loc.section, "4");
        assert_eq!(loc.county, None);
    }

    #[test]
    fn test_no_location() {
        assert_eq!(location("Township and range unknown"), None);
    }
}
