//! Total depth, as written (`20,600' MD`, `10,950 TVD / 20,600 MD`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::first_of;

static TOTAL_DEPTH: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)ROTARY\s*TD\s*[:.]?\s*(\d[\d,]*'?[ ]*(?:TVD|TMD|MD)?(?:[ ]*[/,][ ]*\d[\d,]*'?[ ]*(?:TVD|TMD|MD)?)?)",
        r"(?i)Total\s*depth\s*changed\s*to\s*[:.]?\s*(\d[\d,]*'?[ ]*(?:MD|TVD)?(?:[ ]*[/,][ ]*\d[\d,]*'?[ ]*(?:TVD|TMD|MD)?)?)",
        r"(?i)Total\s*Depth\s*of\s*(\d[\d,]*'?[ ]*(?:ft|feet|TVD|TMD|MD)?)",
        r"(?i)Total\s*Depth\s*/?\s*Date\s*[:.]?\s*\n?\s*(\d[\d,]*)",
        r"(?i)Total\s*Depth\s*[:.]?\s*(\d[\d,]*)",
        r"(?i)drilled\s+to\s+a?\s*total\s+depth[^\n]*?\bof\s+(\d[\d,]*'?)",
        r"(?i)\b(?:TD|total\s*depth)\s*(?:of|was|is|at)?\s*(\d[\d,]*)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub fn total_depth(text: &str) -> Option<String> {
    first_of(&TOTAL_DEPTH, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotary_td_with_both_depths() {
        let text = "ROTARY TD: 20,600' MD / 10,950' TVD";
        assert_eq!(total_depth(text).as_deref(), Some("20,600' MD / 10,950' TVD"));
    }

    #[test]
    fn test_labeled_total_depth() {
        assert_eq!(total_depth("Total Depth: 11,250").as_deref(), Some("11,250"));
        assert_eq!(total_depth("Total depth changed to 21,004' MD").as_deref(), Some("21,004' MD"));
    }

    #[test]
    fn test_narrative_depth() {
        let text = "The well was drilled to a total depth of 9,850' and cased";
        assert_eq!(total_depth(text).as_deref(), Some("9,850'"));
        assert_eq!(total_depth("TD at 15400"), Some("15400".to_string()));
        assert_eq!(total_depth("STD 12"), None);
    }
}
