//! Spud and completion dates, kept as written.

use once_cell::sync::Lazy;
use regex::Regex;

use super::first_capture;

/// `03/14/2012`, `3-14-12` or `March 14, 2012`.
const DATE: &str = r"(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}|[A-Za-z]+\.?\s+\d{1,2},?\s*\d{4})";

static SPUD_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)Spud\s*Date\s*[:.]?\s*{DATE}")).unwrap());

static COMPLETION_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:Comp(?:letion)?\s*Date|Date\s*Well\s*Completed)\s*[:.]?\s*{DATE}"
    ))
    .unwrap()
});

pub fn spud_date(text: &str) -> Option<String> {
    first_capture(&SPUD_DATE, text)
}

pub fn completion_date(text: &str) -> Option<String> {
    first_capture(&COMPLETION_DATE, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_dates() {
        assert_eq!(spud_date("Spud Date: 03/14/2012").as_deref(), Some("03/14/2012"));
        assert_eq!(completion_date("COMP DATE 5-2-12").as_deref(), Some("5-2-12"));
    }

    #[test]
    fn test_month_name_dates() {
        assert_eq!(spud_date("Spud Date  March 14, 2012").as_deref(), Some("March 14, 2012"));
        let text = "Date Well Completed: Sept. 3 2014";
        assert_eq!(completion_date(text).as_deref(), Some("Sept. 3 2014"));
    }

    #[test]
    fn test_missing_dates() {
        assert_eq!(spud_date("Spud Date\nTD Reached"), None);
        assert_eq!(completion_date("no dates"), None);
    }
}
