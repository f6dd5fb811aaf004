//! Axum route handler for the Analysis API.

use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, Json};
use serde_json::Value;
use tracing::error;

use crate::analysis::analyzer::analyze_profile;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRequest;
use crate::state::AppState;

/// Largest accepted `/api/analyze` body. Larger bodies get 413 with the JSON error shape.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// POST /api/analyze
///
/// Gate order: credential configured → body is JSON → one provider call.
/// A failed gate answers immediately and the provider is never contacted.
/// Field types are not checked; see `AnalysisRequest::from_json`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    let Some(llm) = state.llm.as_deref() else {
        error!("Missing OpenAI API key");
        return Err(AppError::Misconfigured);
    };

    let body = body.map_err(|rejection| AppError::BodyRejected {
        status: rejection.status(),
        reason: rejection.body_text(),
    })?;

    let value: Value =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    let request = AnalysisRequest::from_json(&value);

    let result = analyze_profile(llm, &request).await?;

    Ok(Json(result))
}
