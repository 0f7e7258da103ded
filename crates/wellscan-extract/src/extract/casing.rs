//! Surface and production casing descriptions, truncated to a configured length.

use once_cell::sync::Lazy;
use regex::Regex;

use super::first_capture;

static SURFACE_CASING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)SURF(?:ACE)?\s*(?:CASING|CA?SG)\s*[:.]?[ ]*(.+)$").unwrap());

static SURFACE_FALLBACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)\bSurface\s*[:.]?[ ]*(\d[^\n]{10,80})").unwrap());

static PRODUCTION_CASING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)PROD(?:UCTION)?\s*(?:CASING|CA?SG)\s*[:.]?[ ]*(.+)$").unwrap());

fn truncate(value: String, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value;
    }
    value.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

pub fn surface_casing(text: &str, max_chars: usize) -> Option<String> {
    first_capture(&SURFACE_CASING, text)
        .or_else(|| first_capture(&SURFACE_FALLBACK, text))
        .map(|c| truncate(c, max_chars))
}

pub fn production_casing(text: &str, max_chars: usize) -> Option<String> {
    first_capture(&PRODUCTION_CASING, text).map(|c| truncate(c, max_chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casing_lines() {
        let text = "SURF CSG: 9 5/8\" 36# J-55 @ 2,150'\nPROD CSG: 7\" 32# P-110 @ 11,020'";
        assert_eq!(surface_casing(text, 200).as_deref(), Some("9 5/8\" 36# J-55 @ 2,150'"));
        assert_eq!(production_casing(text, 200).as_deref(), Some("7\" 32# P-110 @ 11,020'"));
    }

    #[test]
    fn test_surface_fallback() {
        let text = "Casing  Surface: 13 3/8\" set at 2,100 ft";
        assert_eq!(surface_casing(text, 200).as_deref(), Some("13 3/8\" set at 2,100 ft"));
    }

    #[test]
    fn test_truncation() {
        let text = format!("Surface Casing: {}", "x".repeat(300));
        assert_eq!(surface_casing(&text, 200).map(|c| c.len()), Some(200));
        assert_eq!(production_casing("none", 200), None);
    }
}
