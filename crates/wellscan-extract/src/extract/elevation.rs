//! Ground-level and kelly-bushing elevations.

use once_cell::sync::Lazy;
use regex::Regex;

use super::first_capture;

static GROUND_LEVEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:GL|Ground\s*Level)\s*[-:.]?\s*(\d[\d,]*(?:\.\d+)?)").unwrap()
});

static KELLY_BUSHING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:KB|Kelly\s*Bushing)\s*[-:.]?\s*(\d[\d,]*(?:\.\d+)?)").unwrap()
});

/// `ELEVATION: GL 2045' KB 2067'`
static COMBINED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)ELEVATION\s*[:.]?\s*GL\s*[-:.]?\s*(\d[\d,]*)'?\s*(?:ft\.?)?\s*[,/]?\s*KB\s*[-:.]?\s*(\d[\d,]*)",
    )
    .unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Elevations {
    pub ground_level: Option<String>,
    pub kelly_bushing: Option<String>,
}

/// Both elevations; the combined form fills whichever is still missing.
pub fn elevations(text: &str) -> Elevations {
    let mut found = Elevations {
        ground_level: first_capture(&GROUND_LEVEL, text),
        kelly_bushing: first_capture(&KELLY_BUSHING, text),
    };

    if found.ground_level.is_none() || found.kelly_bushing.is_none() {
        if let Some(caps) = COMBINED.captures(text) {
            found.ground_level.get_or_insert_with(|| caps[1].to_string());
            found.kelly_bushing.get_or_insert_with(|| caps[2].to_string());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_elevations() {
        let found = elevations("Elevation  GL - 2,045'  KB: 2067 ft");
        assert_eq!(found.ground_level.as_deref(), Some("2,045"));
        assert_eq!(found.kelly_bushing.as_deref(), Some("2067"));
    }

    #[test]
    fn test_long_labels() {
        let found = elevations("Ground Level 1850.5\nKelly Bushing: 1872");
        assert_eq!(found.ground_level.as_deref(), Some("1850.5"));
        assert_eq!(found.kelly_bushing.as_deref(), Some("1872"));
    }

    #[test]
    fn test_labels_inside_words_ignored() {
        assert_eq!(elevations("GLOBAL KBX 12"), Elevations::default());
    }
}
