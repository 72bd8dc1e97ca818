//! Fraud, waste and abuse analysis: prompt, one completion, envelope.

use super::metrics;
use super::prompt::{render_analysis_prompt, SYSTEM_PROMPT};
use super::providers::{CompletionProvider, CompletionRequest, GenerationParams};
use crate::error::AnalysisError;
use crate::models::AnalysisResult;
use std::sync::Arc;
use std::time::Instant;

/// Stateless analyzer shared by all requests.
///
/// `provider` is `None` when no credential is configured; every analysis then
/// fails with [`AnalysisError::MissingCredential`] without touching the
/// network.
pub struct FraudAnalyzer {
    provider: Option<Arc<dyn CompletionProvider>>,
    params: GenerationParams,
}

impl FraudAnalyzer {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, params: GenerationParams) -> Self {
        Self { provider, params }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Ask the model to assess `text` and wrap its verbatim answer.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let Some(provider) = self.provider.as_ref() else {
            tracing::error!("Analysis requested but no completion credential is configured");
            metrics::record_analysis(AnalysisError::MissingCredential.outcome());
            return Err(AnalysisError::MissingCredential);
        };

        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            prompt: render_analysis_prompt(text),
            params: self.params.clone(),
        };

        let start = Instant::now();
        let result = provider.complete(&request).await;
        metrics::record_provider_latency(
            provider.name(),
            &self.params.model,
            start.elapsed().as_secs_f64(),
        );

        match result {
            Ok(completion) => {
                metrics::record_tokens(
                    &self.params.model,
                    completion.input_tokens,
                    completion.output_tokens,
                );
                metrics::record_analysis("success");
                tracing::info!(
                    provider = provider.name(),
                    model = %self.params.model,
                    input_len = text.len(),
                    output_tokens = completion.output_tokens,
                    finish_reason = ?completion.finish_reason,
                    "Analysis completed"
                );
                Ok(AnalysisResult::success(text, completion.text))
            }
            Err(e) => {
                metrics::record_provider_error(provider.name(), e.kind());
                tracing::error!(
                    provider = provider.name(),
                    error_type = e.kind(),
                    error = %e,
                    "Completion provider call failed"
                );
                let err = AnalysisError::Upstream(e);
                metrics::record_analysis(err.outcome());
                Err(err)
            }
        }
    }
}
