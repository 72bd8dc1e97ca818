//! Mock provider implementation for testing.

use super::{Completion, CompletionProvider, CompletionRequest, FinishReason, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned outcome returned on every call.
#[derive(Debug, Clone)]
enum Outcome {
    Text(String),
    Fail(ProviderError),
}

/// Mock completion provider that returns a fixed response and records calls.
pub struct MockCompletionProvider {
    outcome: Outcome,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletionProvider {
    /// Always answer with `text`.
    pub fn responding(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Text(text.into()))
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Outcome::Fail(error))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of completions requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Rough four-bytes-per-token estimate, saturating at `u32::MAX`.
fn approx_tokens(bytes: usize) -> u32 {
    u32::try_from(bytes / 4).unwrap_or(u32::MAX)
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.outcome {
            Outcome::Text(text) => Ok(Completion {
                text: text.clone(),
                input_tokens: approx_tokens(request.system.len() + request.prompt.len()),
                output_tokens: approx_tokens(text.len()),
                finish_reason: FinishReason::Complete,
            }),
            Outcome::Fail(error) => Err(error.clone()),
        }
    }
}
