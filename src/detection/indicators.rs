use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed vocabulary of behavioral scam signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorTag {
    UrgencyTactics,
    TooGoodToBeTrue,
    AuthorityImpersonation,
    PersonalInfoRequest,
    ThreateningLanguage,
    ExcessivePunctuation,
    SuspiciousLink,
    PaymentRequest,
    SpellingErrors,
}

impl IndicatorTag {
    pub const ALL: [IndicatorTag; 9] = [
        IndicatorTag::UrgencyTactics,
        IndicatorTag::TooGoodToBeTrue,
        IndicatorTag::AuthorityImpersonation,
        IndicatorTag::PersonalInfoRequest,
        IndicatorTag::ThreateningLanguage,
        IndicatorTag::ExcessivePunctuation,
        IndicatorTag::SuspiciousLink,
        IndicatorTag::PaymentRequest,
        IndicatorTag::SpellingErrors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorTag::UrgencyTactics => "urgency_tactics",
            IndicatorTag::TooGoodToBeTrue => "too_good_to_be_true",
            IndicatorTag::AuthorityImpersonation => "authority_impersonation",
            IndicatorTag::PersonalInfoRequest => "personal_info_request",
            IndicatorTag::ThreateningLanguage => "threatening_language",
            IndicatorTag::ExcessivePunctuation => "excessive_punctuation",
            IndicatorTag::SuspiciousLink => "suspicious_link",
            IndicatorTag::PaymentRequest => "payment_request",
            IndicatorTag::SpellingErrors => "spelling_errors",
        }
    }
}

impl fmt::Display for IndicatorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition that makes an indicator rule fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Trigger {
    /// Any phrase occurs as a substring of the lower-cased message.
    AnyPhrase { phrases: Vec<String> },
    /// A run of at least `min_run` identical characters from `marks`.
    RepeatedPunctuation { marks: Vec<char>, min_run: usize },
}

impl Trigger {
    pub fn fires(&self, text: &str, text_lower: &str) -> bool {
        match self {
            Trigger::AnyPhrase { phrases } => super::contains_any(text_lower, phrases),
            Trigger::RepeatedPunctuation { marks, min_run } => {
                has_repeated_mark(text, marks, *min_run)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Trigger::AnyPhrase { phrases } => phrases.iter().all(|p| p.is_empty()),
            Trigger::RepeatedPunctuation { marks, min_run } => marks.is_empty() || *min_run == 0,
        }
    }
}

fn has_repeated_mark(text: &str, marks: &[char], min_run: usize) -> bool {
    let mut previous = None;
    let mut run = 0;
    for ch in text.chars() {
        if !marks.contains(&ch) {
            previous = None;
            run = 0;
            continue;
        }
        run = if previous == Some(ch) { run + 1 } else { 1 };
        previous = Some(ch);
        if run >= min_run {
            return true;
        }
    }
    false
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorRule {
    pub tag: IndicatorTag,
    pub trigger: Trigger,
}

/// Evaluate every rule in table order. Each firing rule contributes its tag
/// once, so the output follows the table rather than the message.
pub fn detect_indicators(rules: &[IndicatorRule], text: &str) -> Vec<IndicatorTag> {
    let text_lower = text.to_lowercase();
    let mut indicators = Vec::new();
    for rule in rules {
        if rule.trigger.fires(text, &text_lower) && !indicators.contains(&rule.tag) {
            indicators.push(rule.tag);
        }
    }
    indicators
}
