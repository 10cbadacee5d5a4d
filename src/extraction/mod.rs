pub mod crypto;
pub mod emails;
pub mod phones;
pub mod urls;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Substrings pulled out of a message by the syntactic extractors.
///
/// Each collection is deduplicated by exact text and sorted lexicographically
/// so that reports are reproducible. The sort is presentation only; the
/// collections carry no positional meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSet {
    #[serde(rename = "extracted_urls")]
    pub urls: Vec<String>,
    #[serde(rename = "extracted_emails")]
    pub emails: Vec<String>,
    #[serde(rename = "extracted_phones")]
    pub phones: Vec<String>,
    #[serde(rename = "extracted_crypto_addresses")]
    pub crypto_addresses: Vec<String>,
}

impl ExtractionSet {
    /// Run all four extractors over `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            urls: urls::extract_urls(text),
            emails: emails::extract_emails(text),
            phones: phones::extract_phones(text),
            crypto_addresses: crypto::extract_crypto_addresses(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
            && self.emails.is_empty()
            && self.phones.is_empty()
            && self.crypto_addresses.is_empty()
    }
}

/// Collect every non-overlapping match of each pattern into one sorted,
/// deduplicated list.
pub(crate) fn collect_matches(text: &str, patterns: &[&Regex]) -> Vec<String> {
    let mut found = BTreeSet::new();
    for pattern in patterns {
        for m in pattern.find_iter(text) {
            found.insert(m.as_str().to_string());
        }
    }
    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_extracts_nothing() {
        let set = ExtractionSet::from_text("");
        assert!(set.is_empty());
    }

    #[test]
    fn test_collect_matches_dedups_and_sorts() {
        let re = Regex::new(r"[a-z]+").unwrap();
        let found = collect_matches("pear apple pear fig", &[&re]);
        assert_eq!(found, vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn test_extractors_are_independent() {
        // The bare domain of an email address is also reported as a URL.
        let set = ExtractionSet::from_text("write to support@fake-bank.com today");
        assert_eq!(set.emails, vec!["support@fake-bank.com"]);
        assert!(set.urls.contains(&"fake-bank.com".to_string()));
    }
}
