//! Analysis failures and their HTTP translation.

use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Why an analysis could not be produced.
///
/// Both kinds are server-side faults; callers only ever see HTTP 500 with a
/// free-text `detail`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No credential for the completion service; nothing was sent upstream.
    #[error("OpenAI API key not configured")]
    MissingCredential,

    /// The single upstream call failed (network, auth, rate limit, bad payload).
    #[error("Error analyzing text: {0}")]
    Upstream(#[from] ProviderError),
}

impl AnalysisError {
    /// Metrics label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            AnalysisError::MissingCredential => "missing_credential",
            AnalysisError::Upstream(_) => "upstream_error",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    detail: String,
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetail {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_detail_embeds_provider_message() {
        let err = AnalysisError::from(ProviderError::Network("connection reset".into()));
        assert_eq!(
            err.to_string(),
            "Error analyzing text: Network error: connection reset"
        );
        assert_eq!(err.outcome(), "upstream_error");
    }

    #[test]
    fn every_kind_is_a_server_error() {
        for err in [
            AnalysisError::MissingCredential,
            AnalysisError::Upstream(ProviderError::RateLimited("quota".into())),
        ] {
            assert_eq!(
                err.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
