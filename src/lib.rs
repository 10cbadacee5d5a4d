pub mod analyzer;
pub mod config;
pub mod detection;
pub mod extraction;
pub mod gate;
pub mod narrative;
pub mod scoring;

pub use analyzer::{AnalysisReport, ScamAnalyzer};
pub use config::Config;
pub use detection::{IndicatorTag, RuleSet, ScamType};
pub use extraction::ExtractionSet;
pub use gate::{AnalysisRequest, RequestError, RequestGate};
pub use scoring::{RiskAssessment, RiskLevel};

use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_ANALYZER: ScamAnalyzer = ScamAnalyzer::new();
}

/// Analyze a message with the built-in rule tables.
pub fn analyze(message: &str, metadata: Option<&serde_json::Value>) -> AnalysisReport {
    DEFAULT_ANALYZER.analyze(message, metadata)
}
