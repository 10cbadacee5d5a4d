use super::collect_matches;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Long digit run with optional `+` and leading `1`.
    pub static ref DIGIT_RUN: Regex = Regex::new(r"\+?1?\d{9,15}").unwrap();
    /// `(555) 123-4567` style.
    pub static ref AREA_CODE: Regex = Regex::new(r"\(\d{3}\)\s*\d{3}[-.\s]?\d{4}").unwrap();
    /// `555-123-4567`, `555.123.4567`, `5551234567`.
    pub static ref GROUPED: Regex = Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").unwrap();
}

/// Union of all three phone patterns.
///
/// Unrelated long digit runs (order ids, amounts) are captured as well; the
/// patterns are deliberately not reconciled against each other.
pub fn extract_phones(text: &str) -> Vec<String> {
    collect_matches(text, &[&*DIGIT_RUN, &*AREA_CODE, &*GROUPED])
}
