//! Analysis request/result envelopes.

use serde::{Deserialize, Serialize};

/// Text excerpt submitted for fraud, waste and abuse review.
///
/// `text` is required; no length or content checks are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

/// Outcome marker carried on every successful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
}

/// The model's raw assessment paired with the submitted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Text exactly as submitted.
    pub input_text: String,

    /// Verbatim model output; never parsed.
    pub analysis: String,

    pub status: AnalysisStatus,
}

impl AnalysisResult {
    pub fn success(input_text: impl Into<String>, analysis: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            analysis: analysis.into(),
            status: AnalysisStatus::Success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_serializes_with_success_status() {
        let result = AnalysisResult::success("claim text", "LOW risk");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({
                "input_text": "claim text",
                "analysis": "LOW risk",
                "status": "success"
            })
        );
    }

    #[test]
    fn request_requires_text_field() {
        assert!(serde_json::from_value::<AnalysisRequest>(json!({})).is_err());
        assert!(serde_json::from_value::<AnalysisRequest>(json!({ "text": 42 })).is_err());

        let empty: AnalysisRequest = serde_json::from_value(json!({ "text": "" })).unwrap();
        assert_eq!(empty.text, "");
    }
}
