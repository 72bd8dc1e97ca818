//! Completion provider abstractions and implementations.
//!
//! The analyzer talks to the external model through [`CompletionProvider`],
//! so the OpenAI backend can be swapped for a stub in tests.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use mock::MockCompletionProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Network(_) => "network",
            ProviderError::Authentication(_) => "authentication",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::Api { .. } => "api",
            ProviderError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Sampling parameters sent with every completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Model identifier (e.g. `gpt-3.5-turbo`).
    pub model: String,

    /// Maximum output tokens.
    pub max_tokens: u32,

    /// Temperature (0.0 - 2.0).
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 500,
            temperature: 0.3,
        }
    }
}

/// A single system + user exchange.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub params: GenerationParams,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

impl FinishReason {
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("stop") | None => FinishReason::Complete,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(_) => FinishReason::Other,
        }
    }
}

/// Text returned by the provider plus usage accounting.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: FinishReason,
}

/// Trait for text completion providers (e.g., OpenAI chat completions).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Run one completion. Implementations must not retry.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;
}
