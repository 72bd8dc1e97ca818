use axum::{extract::State, Json};

use crate::error::AnalysisError;
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::startup::AppState;

/// `POST /analyze-fraud`
///
/// A body without `text` never reaches this handler: the `Json` extractor
/// rejects it with 422.
#[tracing::instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn analyze_fraud(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AnalysisError> {
    let result = state.analyzer.analyze(&request.text).await?;
    Ok(Json(result))
}
