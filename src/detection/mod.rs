pub mod classifier;
pub mod indicators;

pub use classifier::{classify, ScamType, ScamTypeRule};
pub use indicators::{detect_indicators, IndicatorRule, IndicatorTag, Trigger};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Substring check used by both rule tables. `text` must already be lower-case.
pub(crate) fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases
        .iter()
        .any(|phrase| !phrase.is_empty() && text.contains(phrase.as_str()))
}

/// Ordered rule tables for indicator detection and scam-type classification.
///
/// Table order is significant: indicators are reported in this order and the
/// first matching scam-type rule decides the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub indicators: Vec<IndicatorRule>,
    pub scam_types: Vec<ScamTypeRule>,
}

fn phrases(list: &[&str]) -> Trigger {
    Trigger::AnyPhrase {
        phrases: list.iter().map(|p| p.to_string()).collect(),
    }
}

fn keywords(label: ScamType, list: &[&str]) -> ScamTypeRule {
    ScamTypeRule {
        label,
        keywords: list.iter().map(|k| k.to_string()).collect(),
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        let rule = |tag, trigger| IndicatorRule { tag, trigger };
        Self {
            indicators: vec![
                rule(
                    IndicatorTag::UrgencyTactics,
                    phrases(&["urgent", "immediately", "act now", "limited time", "expire", "deadline"]),
                ),
                rule(
                    IndicatorTag::TooGoodToBeTrue,
                    phrases(&[
                        "won", "prize", "lottery", "inheritance", "million", "reward", "refund", "claim",
                    ]),
                ),
                rule(
                    IndicatorTag::AuthorityImpersonation,
                    phrases(&[
                        "bank",
                        "irs",
                        "government",
                        "police",
                        "tax",
                        "social security",
                        "paypal",
                        "amazon",
                    ]),
                ),
                rule(
                    IndicatorTag::PersonalInfoRequest,
                    phrases(&[
                        "social security",
                        "ssn",
                        "password",
                        "pin",
                        "account number",
                        "credit card",
                        "verify",
                    ]),
                ),
                rule(
                    IndicatorTag::ThreateningLanguage,
                    phrases(&["suspend", "block", "locked", "arrest", "legal action", "lawsuit"]),
                ),
                rule(
                    IndicatorTag::ExcessivePunctuation,
                    Trigger::RepeatedPunctuation {
                        marks: vec!['!', '?'],
                        min_run: 3,
                    },
                ),
                rule(IndicatorTag::SuspiciousLink, phrases(&["click here", "click this link"])),
                rule(
                    IndicatorTag::PaymentRequest,
                    phrases(&[
                        "send money",
                        "wire transfer",
                        "gift card",
                        "bitcoin",
                        "cryptocurrency",
                        "paypal",
                    ]),
                ),
                rule(
                    IndicatorTag::SpellingErrors,
                    phrases(&["accont", "verfiy", "securty", "imediately", "importnt"]),
                ),
            ],
            scam_types: vec![
                keywords(ScamType::Phishing, &["verify", "confirm", "account"]),
                keywords(ScamType::LotteryScam, &["won", "lottery", "prize"]),
                keywords(ScamType::RomanceScam, &["love", "dating", "relationship"]),
                keywords(ScamType::InvestmentScam, &["invest", "profit", "returns"]),
                keywords(ScamType::TechSupportScam, &["virus", "infected", "tech support"]),
                keywords(ScamType::CharityScam, &["donate", "charity", "help"]),
                keywords(ScamType::InheritanceScam, &["inherit", "estate", "deceased"]),
                keywords(ScamType::TaxScam, &["tax", "irs", "refund"]),
                keywords(ScamType::JobScam, &["job", "hiring", "employment"]),
                keywords(ScamType::CryptoScam, &["bitcoin", "crypto", "ethereum"]),
            ],
        }
    }
}

impl RuleSet {
    /// Load a rule set from YAML. Phrases are lower-cased on load since
    /// matching runs against the lower-cased message.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule set: {}", path.display()))?;
        let rules = Self::from_yaml(&content)
            .with_context(|| format!("Invalid rule set: {}", path.display()))?;
        log::info!(
            "Loaded {} indicator rules and {} scam-type rules from {}",
            rules.indicators.len(),
            rules.scam_types.len(),
            path.display()
        );
        Ok(rules)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut rules: RuleSet = serde_yaml::from_str(content)?;
        rules.lowercase_phrases();
        rules.validate()?;
        Ok(rules)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn lowercase_phrases(&mut self) {
        for rule in &mut self.indicators {
            if let Trigger::AnyPhrase { phrases } = &mut rule.trigger {
                for phrase in phrases.iter_mut() {
                    *phrase = phrase.to_lowercase();
                }
            }
        }
        for rule in &mut self.scam_types {
            for keyword in rule.keywords.iter_mut() {
                *keyword = keyword.to_lowercase();
            }
        }
    }

    /// Reject tables that would break the report invariants.
    pub fn validate(&self) -> Result<()> {
        let mut tags = HashSet::new();
        for rule in &self.indicators {
            if !tags.insert(rule.tag) {
                bail!("indicator '{}' appears more than once", rule.tag);
            }
            if rule.trigger.is_empty() {
                bail!("indicator '{}' has an empty trigger", rule.tag);
            }
        }

        let mut labels = HashSet::new();
        for rule in &self.scam_types {
            if rule.label == ScamType::GeneralScam {
                bail!("'{}' is the fallback label and cannot have a rule", rule.label);
            }
            if !labels.insert(rule.label) {
                bail!("scam type '{}' appears more than once", rule.label);
            }
            if rule.keywords.iter().all(|k| k.is_empty()) {
                bail!("scam type '{}' has no keywords", rule.label);
            }
        }
        Ok(())
    }
}
