use crate::detection::{IndicatorTag, ScamType};
use crate::extraction::ExtractionSet;

/// Indicators named in the summary; the rest are only counted.
const NAMED_INDICATORS: usize = 3;

/// Build the human-readable summary. Each sentence is included only when it
/// has something to say, and sentences always appear in the same order.
pub fn generate_narrative(
    scam_type: ScamType,
    indicators: &[IndicatorTag],
    extracted: &ExtractionSet,
) -> String {
    let mut parts = vec![format!(
        "This message appears to be a {}.",
        scam_type.display_name()
    )];

    if !indicators.is_empty() {
        let named: Vec<&str> = indicators
            .iter()
            .take(NAMED_INDICATORS)
            .map(|tag| tag.as_str())
            .collect();
        parts.push(format!(
            "Detected {} suspicious indicator(s): {}.",
            indicators.len(),
            named.join(", ")
        ));
    }

    if !extracted.urls.is_empty() {
        parts.push(format!("Contains {} suspicious URL(s).", extracted.urls.len()));
    }
    if !extracted.emails.is_empty() {
        parts.push(format!("Found {} email address(es).", extracted.emails.len()));
    }
    if !extracted.phones.is_empty() {
        parts.push(format!("Found {} phone number(s).", extracted.phones.len()));
    }
    if !extracted.crypto_addresses.is_empty() {
        parts.push(format!(
            "Contains {} cryptocurrency address(es) - high risk of financial scam.",
            extracted.crypto_addresses.len()
        ));
    }

    if indicators.contains(&IndicatorTag::PersonalInfoRequest) {
        parts.push("WARNING: Requests personal/financial information.".to_string());
    }

    parts.join(" ")
}
