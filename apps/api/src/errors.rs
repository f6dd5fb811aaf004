use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

pub const MISCONFIGURED_MESSAGE: &str = "Server Misconfiguration";
pub const INVALID_BODY_MESSAGE: &str = "Invalid Request Body";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze profile.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("OpenAI API key is not configured")]
    Misconfigured,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Request body rejected ({status}): {reason}")]
    BodyRejected { status: StatusCode, reason: String },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Misconfigured => (StatusCode::INTERNAL_SERVER_ERROR, MISCONFIGURED_MESSAGE),
            AppError::InvalidBody(e) => {
                tracing::debug!("Rejected request body: {e}");
                (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE)
            }
            AppError::BodyRejected { status, reason } => {
                tracing::debug!("Rejected request body: {reason}");
                (*status, INVALID_BODY_MESSAGE)
            }
            AppError::Llm(e) => {
                tracing::error!("Analysis error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, ANALYSIS_FAILED_MESSAGE)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
