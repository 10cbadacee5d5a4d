use crate::detection::{classify, detect_indicators, IndicatorTag, RuleSet, ScamType};
use crate::extraction::ExtractionSet;
use crate::narrative::generate_narrative;
use crate::scoring::{assess_risk, round_confidence, RiskAssessment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of analyzing one message. A plain value; nothing is retained
/// between analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub scam_type: ScamType,
    #[serde(flatten)]
    pub risk: RiskAssessment,
    #[serde(flatten)]
    pub extracted: ExtractionSet,
    pub indicators: Vec<IndicatorTag>,
    /// Human-readable summary.
    pub analysis: String,
    #[serde(with = "utc_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// ISO-8601 in UTC with microseconds and a `Z` suffix.
mod utc_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

impl AnalysisReport {
    /// Report without the capture time, for comparing two analyses.
    pub fn same_findings(&self, other: &AnalysisReport) -> bool {
        self.scam_type == other.scam_type
            && self.risk == other.risk
            && self.extracted == other.extracted
            && self.indicators == other.indicators
            && self.analysis == other.analysis
    }
}

/// Runs the extraction, detection, classification, scoring and narrative
/// stages over a message.
#[derive(Debug, Clone, Default)]
pub struct ScamAnalyzer {
    rules: RuleSet,
}

impl ScamAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Analyze one message. Total over all input; an empty message yields an
    /// empty, low-risk `general_scam` report.
    ///
    /// `metadata` is accepted for callers that carry it and is not inspected.
    pub fn analyze(&self, message: &str, _metadata: Option<&serde_json::Value>) -> AnalysisReport {
        let extracted = ExtractionSet::from_text(message);

        // Classifier and scorer both consume the indicator list.
        let indicators = detect_indicators(&self.rules.indicators, message);
        let scam_type = classify(&self.rules.scam_types, message, &indicators);

        let has_payment = indicators.contains(&IndicatorTag::PaymentRequest);
        let mut risk = assess_risk(&indicators, !extracted.urls.is_empty(), has_payment);
        risk.confidence_score = round_confidence(risk.confidence_score);

        let analysis = generate_narrative(scam_type, &indicators, &extracted);

        log::debug!(
            "Analyzed {} chars: type={} risk={} confidence={:.2} indicators={}",
            message.chars().count(),
            scam_type,
            risk.risk_level,
            risk.confidence_score,
            indicators.len()
        );

        AnalysisReport {
            scam_type,
            risk,
            extracted,
            indicators,
            analysis,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RiskLevel;

    fn analyze(message: &str) -> AnalysisReport {
        ScamAnalyzer::new().analyze(message, None)
    }

    #[test]
    fn test_account_suspension_phishing() {
        let report = analyze(
            "URGENT!!! Your account will be suspended. Verify now at http://fake-bank.com or call 555-123-4567",
        );
        assert_eq!(report.scam_type, ScamType::Phishing);
        for tag in [
            IndicatorTag::UrgencyTactics,
            IndicatorTag::ThreateningLanguage,
            IndicatorTag::ExcessivePunctuation,
        ] {
            assert!(report.indicators.contains(&tag), "missing {tag}");
        }
        assert!(report.extracted.urls.contains(&"http://fake-bank.com".to_string()));
        assert!(report.extracted.phones.contains(&"555-123-4567".to_string()));
        assert!(matches!(
            report.risk.risk_level,
            RiskLevel::High | RiskLevel::Critical
        ));
        assert!(report.analysis.contains("WARNING"));
    }

    #[test]
    fn test_empty_message() {
        let report = analyze("");
        assert!(report.indicators.is_empty());
        assert!(report.extracted.is_empty());
        assert_eq!(report.scam_type, ScamType::GeneralScam);
        assert_eq!(report.risk.confidence_score, 0.0);
        assert_eq!(report.risk.risk_level, RiskLevel::Low);
        assert_eq!(report.analysis, "This message appears to be a general scam.");
    }

    #[test]
    fn test_ethereum_payment_request() {
        let report = analyze("send bitcoin to 0x1234567890abcdef1234567890abcdef12345678");
        assert_eq!(
            report.extracted.crypto_addresses,
            vec!["0x1234567890abcdef1234567890abcdef12345678"]
        );
        assert!(report.indicators.contains(&IndicatorTag::PaymentRequest));
        assert_eq!(report.scam_type, ScamType::CryptoScam);
    }

    #[test]
    fn test_two_categories_without_links_or_payment() {
        let report = analyze("urgent: you won a prize");
        assert_eq!(
            report.indicators,
            vec![IndicatorTag::UrgencyTactics, IndicatorTag::TooGoodToBeTrue]
        );
        assert!(report.extracted.urls.is_empty());
        assert_eq!(report.risk.confidence_score, 0.2);
        assert_eq!(report.risk.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_deterministic_findings() {
        let analyzer = ScamAnalyzer::new();
        let message = "Claim your $1,000,000 lottery prize at www.win-big.top, email agent@win-big.top";
        let first = analyzer.analyze(message, None);
        let second = analyzer.analyze(message, None);
        assert!(first.same_findings(&second));
    }

    #[test]
    fn test_metadata_is_ignored() {
        let analyzer = ScamAnalyzer::new();
        let metadata = serde_json::json!({"channel": "sms", "sender": "+15551234567"});
        let with = analyzer.analyze("act now!!!", Some(&metadata));
        let without = analyzer.analyze("act now!!!", None);
        assert!(with.same_findings(&without));
    }

    #[test]
    fn test_confidence_bounds_and_level_consistency() {
        let samples = [
            "",
            "hello",
            "URGENT!!! verify your bank password, wire transfer via bitcoin or face arrest. click here http://x.io",
            "Dear friend, I love you. Send money via gift card???",
            "Your PC is infected with a virus, call tech support at (800) 555-0199",
        ];
        for message in samples {
            let report = analyze(message);
            let confidence = report.risk.confidence_score;
            assert!((0.0..=1.0).contains(&confidence), "{message}");
            assert_eq!(report.risk.risk_level, RiskLevel::from_confidence(confidence));
            let mut unique = report.indicators.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), report.indicators.len());
        }
    }

    #[test]
    fn test_custom_rules_are_used() {
        let rules = RuleSet::from_yaml(
            r#"
indicators:
  - tag: urgency_tactics
    trigger:
      type: AnyPhrase
      phrases: ["asap"]
scam_types:
  - label: job_scam
    keywords: ["recruiter"]
"#,
        )
        .unwrap();
        let report = ScamAnalyzer::with_rules(rules).analyze("Recruiter needs reply ASAP", None);
        assert_eq!(report.indicators, vec![IndicatorTag::UrgencyTactics]);
        assert_eq!(report.scam_type, ScamType::JobScam);
    }

    #[test]
    fn test_report_json_shape() {
        let report = analyze("send bitcoin to 0x1234567890abcdef1234567890abcdef12345678");
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "scam_type",
            "risk_level",
            "confidence_score",
            "extracted_urls",
            "extracted_emails",
            "extracted_phones",
            "extracted_crypto_addresses",
            "indicators",
            "analysis",
            "timestamp",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["scam_type"], "crypto_scam");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));

        let parsed: AnalysisReport = serde_json::from_value(json).unwrap();
        assert!(parsed.same_findings(&report));
    }
}
