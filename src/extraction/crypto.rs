use super::collect_matches;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Legacy/P2SH Bitcoin address; base58 without 0, O, I and l.
    pub static ref BITCOIN: Regex =
        Regex::new(r"\b[13][a-km-zA-HJ-NP-Z1-9]{25,34}\b").unwrap();
    pub static ref ETHEREUM: Regex = Regex::new(r"\b0x[a-fA-F0-9]{40}\b").unwrap();
}

pub fn extract_crypto_addresses(text: &str) -> Vec<String> {
    collect_matches(text, &[&*BITCOIN, &*ETHEREUM])
}
