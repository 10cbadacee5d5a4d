use super::indicators::IndicatorTag;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamType {
    Phishing,
    LotteryScam,
    RomanceScam,
    InvestmentScam,
    TechSupportScam,
    CharityScam,
    InheritanceScam,
    TaxScam,
    JobScam,
    CryptoScam,
    GeneralScam,
}

impl ScamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScamType::Phishing => "phishing",
            ScamType::LotteryScam => "lottery_scam",
            ScamType::RomanceScam => "romance_scam",
            ScamType::InvestmentScam => "investment_scam",
            ScamType::TechSupportScam => "tech_support_scam",
            ScamType::CharityScam => "charity_scam",
            ScamType::InheritanceScam => "inheritance_scam",
            ScamType::TaxScam => "tax_scam",
            ScamType::JobScam => "job_scam",
            ScamType::CryptoScam => "crypto_scam",
            ScamType::GeneralScam => "general_scam",
        }
    }

    /// Label with underscores replaced by spaces, e.g. `lottery scam`.
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for ScamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamTypeRule {
    pub label: ScamType,
    pub keywords: Vec<String>,
}

/// First matching rule wins; `GeneralScam` when nothing matches.
///
/// The indicator list is part of the signature but no current rule reads it.
pub fn classify(rules: &[ScamTypeRule], text: &str, _indicators: &[IndicatorTag]) -> ScamType {
    let text_lower = text.to_lowercase();
    rules
        .iter()
        .find(|rule| super::contains_any(&text_lower, &rule.keywords))
        .map(|rule| rule.label)
        .unwrap_or(ScamType::GeneralScam)
}
