//! OCR text normalization into the uniform search surface every extractor reads.
//!
//! Whitespace runs collapse to one space, or to a two-space "column gap" when
//! the source had a wider gap; control characters and non-ASCII noise are
//! dropped after typographic quotes, primes, dashes and degree signs are
//! mapped to ASCII. Line boundaries survive, and `--- PAGE n ---` markers
//! written by the OCR cache are indexed so extractors can search one page.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static PAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^-{2,}\s*PAGE\s+(\d+)\s*-{2,}$").unwrap());

/// Column gap left where the source had two or more whitespace characters.
pub const COLUMN_GAP: &str = "  ";

/// Byte span of one page inside the normalized text, marker line included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: usize,
    pub start: usize,
    pub end: usize,
}

/// Normalized document text plus its optional page index.
#[derive(Debug, Clone, Default)]
pub struct NormalizedText {
    text: String,
    pages: Vec<Page>,
}

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of non-whitespace characters.
    pub fn content_chars(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }

    /// Text of page `number` (1-based, as written in the marker).
    pub fn page_text(&self, number: usize) -> Option<&str> {
        self.pages
            .iter()
            .find(|p| p.number == number)
            .map(|p| &self.text[p.start..p.end])
    }

    /// Pages whose text matches `re`, in document order.
    pub fn pages_matching(&self, re: &Regex) -> Vec<&str> {
        self.pages
            .iter()
            .map(|p| &self.text[p.start..p.end])
            .filter(|t| re.is_match(t))
            .collect()
    }
}

/// Normalize raw OCR text. Never fails; empty input gives empty text.
pub fn normalize(raw: &str) -> NormalizedText {
    let mut lines: Vec<String> = Vec::new();
    for raw_line in raw.split('\n') {
        let line = normalize_line(raw_line);
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let mut text = String::with_capacity(raw.len());
    let mut pages: Vec<Page> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        if let Some(number) = PAGE_MARKER
            .captures(line)
            .and_then(|caps| caps[1].parse::<usize>().ok())
        {
            if let Some(prev) = pages.last_mut() {
                prev.end = text.len().saturating_sub(1);
            }
            pages.push(Page {
                number,
                start: text.len(),
                end: text.len(),
            });
        }
        text.push_str(line);
    }

    if let Some(last) = pages.last_mut() {
        last.end = text.len();
    }

    NormalizedText { text, pages }
}

fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending_ws = 0usize;

    for c in line.chars() {
        let mapped = match c {
            '\t' => {
                pending_ws += 2;
                continue;
            }
            ' ' | '\u{a0}' | '\u{2007}' | '\u{202f}' | '\u{b0}' | '\u{ba}' => ' ',
            '\u{2018}' | '\u{2019}' | '\u{2032}' | '\u{b4}' => '\'',
            '\u{201c}' | '\u{201d}' | '\u{2033}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            c if c.is_ascii_control() || !c.is_ascii() => continue,
            c => c,
        };

        if mapped == ' ' {
            pending_ws += 1;
            continue;
        }
        if pending_ws > 0 && !out.is_empty() {
            out.push_str(if pending_ws > 1 { COLUMN_GAP } else { " " });
        }
        pending_ws = 0;
        out.push(mapped);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_and_keeps_column_gaps() {
        let doc = normalize("Well  Name:\t\tBASIC   GAME 1-1H   \r\nCounty:  McKenzie");
        assert_eq!(doc.as_str(), "Well  Name:  BASIC  GAME 1-1H\nCounty:  McKenzie");
    }

    #[test]
    fn test_single_spaces_untouched() {
        let doc = normalize("Latitude: 47 23 15 N");
        assert_eq!(doc.as_str(), "Latitude: 47 23 15 N");
    }

    #[test]
    fn test_typographic_marks_mapped() {
        let doc = normalize("Latitude: 48\u{b0} 4\u{2019} 58.501\u{201d} N \u{2014} ok\u{00e9}");
        assert_eq!(doc.as_str(), "Latitude: 48  4' 58.501\" N - ok");
    }

    #[test]
    fn test_strips_control_characters() {
        let doc = normalize("API\x00 #\x07: 33-053-02102");
        assert_eq!(doc.as_str(), "API #: 33-053-02102");
    }

    #[test]
    fn test_blank_lines_collapse() {
        let doc = normalize("\n\nline one\n\n\n\nline two\n\n");
        assert_eq!(doc.as_str(), "line one\n\nline two");
    }

    #[test]
    fn test_page_index() {
        let raw = "\n--- PAGE 1 ---\nCover sheet\n\n--- PAGE 2 ---\nWELL COMPLETION OR RECOMPLETION REPORT\nWell Name\n";
        let doc = normalize(raw);
        assert_eq!(doc.pages().len(), 2);
        assert!(doc.page_text(1).unwrap().contains("Cover sheet"));
        assert!(!doc.page_text(1).unwrap().contains("COMPLETION"));
        assert!(doc.page_text(2).unwrap().starts_with("--- PAGE 2 ---"));
        assert!(doc.page_text(2).unwrap().ends_with("Well Name"));

        let re = Regex::new("COMPLETION").unwrap();
        assert_eq!(doc.pages_matching(&re).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let doc = normalize("");
        assert!(doc.is_empty());
        assert!(doc.pages().is_empty());
        assert_eq!(doc.content_chars(), 0);
    }
}
