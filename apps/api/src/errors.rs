use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Response bodies are always `{ "error": "<message>" }`. Backend detail is
/// logged here and never leaves the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(&'static str),

    /// A model backend failed. `public` is the only text the caller sees.
    #[error("{public}: {source}")]
    Llm {
        public: &'static str,
        #[source]
        source: LlmError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, *msg),
            AppError::Llm { public, source } => {
                tracing::error!("LLM error ({public}): {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, *public)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
