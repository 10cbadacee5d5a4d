use crate::analyzer::{AnalysisReport, ScamAnalyzer};
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};

/// Incoming analysis request as carried by any transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub message: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Messages are generic on purpose; details only go to the log.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid API key")]
    InvalidCredential,
    #[error("Message cannot be empty")]
    EmptyInput,
    #[error("Analysis failed")]
    InternalFailure,
}

/// Checks the caller's credential and the message before handing it to the
/// analyzer.
pub struct RequestGate {
    api_key: String,
    analyzer: ScamAnalyzer,
}

impl RequestGate {
    pub fn new(api_key: impl Into<String>, analyzer: ScamAnalyzer) -> Self {
        Self {
            api_key: api_key.into(),
            analyzer,
        }
    }

    pub fn handle(
        &self,
        presented_key: &str,
        request: &AnalysisRequest,
    ) -> Result<AnalysisReport, RequestError> {
        if !constant_time_eq(presented_key.as_bytes(), self.api_key.as_bytes()) {
            log::warn!("Rejected request with invalid API key");
            return Err(RequestError::InvalidCredential);
        }

        if request.message.trim().is_empty() {
            return Err(RequestError::EmptyInput);
        }

        let analyzer = &self.analyzer;
        panic::catch_unwind(AssertUnwindSafe(|| {
            analyzer.analyze(&request.message, request.metadata.as_ref())
        }))
        .map_err(|cause| {
            let detail = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!("Analysis failed: {detail}");
            RequestError::InternalFailure
        })
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
