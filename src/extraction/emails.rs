use super::collect_matches;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref EMAIL: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
}

pub fn extract_emails(text: &str) -> Vec<String> {
    collect_matches(text, &[&*EMAIL])
}
