use crate::detection::IndicatorTag;
use serde::{Deserialize, Serialize};
use std::fmt;

const POINTS_PER_INDICATOR: u32 = 10;
const URL_POINTS: u32 = 15;
const PAYMENT_POINTS: u32 = 20;
const PERSONAL_INFO_POINTS: u32 = 25;
const THREAT_POINTS: u32 = 20;
const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Inclusive lower bounds, checked from the top down.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.7 {
            RiskLevel::Critical
        } else if confidence >= 0.5 {
            RiskLevel::High
        } else if confidence >= 0.3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// In `[0.0, 1.0]`.
    pub confidence_score: f64,
}

/// Weighted indicator score, capped at 100 and normalized to `[0, 1]`.
pub fn assess_risk(indicators: &[IndicatorTag], has_urls: bool, has_payment: bool) -> RiskAssessment {
    let mut score = indicators.len() as u32 * POINTS_PER_INDICATOR;

    if has_urls {
        score += URL_POINTS;
    }
    if has_payment {
        score += PAYMENT_POINTS;
    }
    if indicators.contains(&IndicatorTag::PersonalInfoRequest) {
        score += PERSONAL_INFO_POINTS;
    }
    if indicators.contains(&IndicatorTag::ThreateningLanguage) {
        score += THREAT_POINTS;
    }

    let confidence_score = f64::from(score.min(MAX_SCORE)) / f64::from(MAX_SCORE);
    RiskAssessment {
        risk_level: RiskLevel::from_confidence(confidence_score),
        confidence_score,
    }
}

/// Two-decimal rounding applied when the score is reported.
pub fn round_confidence(confidence: f64) -> f64 {
    (confidence * 100.0).round() / 100.0
}
