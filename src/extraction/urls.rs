use super::collect_matches;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    /// Full URLs with an explicit http/https scheme.
    pub static ref SCHEMED_URL: Regex =
        Regex::new(r"https?://(?:[a-zA-Z0-9$-_@.&+!*(),]|%[0-9a-fA-F]{2})+").unwrap();
    /// Bare domain-like tokens such as `www.example.com/path`.
    pub static ref BARE_DOMAIN: Regex =
        Regex::new(r"(?:www\.)?[a-zA-Z0-9-]+\.[a-zA-Z]{2,}(?:/\S*)?").unwrap();
}

/// Extract schemed URLs and bare domains.
///
/// Both patterns run over the whole text. A bare-domain match is dropped only
/// when the identical text was already found as a schemed URL; otherwise both
/// forms are reported. Recall is favored over precision.
pub fn extract_urls(text: &str) -> Vec<String> {
    let schemed: BTreeSet<String> = collect_matches(text, &[&*SCHEMED_URL]).into_iter().collect();
    let mut urls = schemed.clone();
    for domain in collect_matches(text, &[&*BARE_DOMAIN]) {
        if !schemed.contains(&domain) {
            urls.insert(domain);
        }
    }
    urls.into_iter().collect()
}
