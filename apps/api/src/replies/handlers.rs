//! Axum route handlers for the Replies API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::replies::generator::{fix_draft, generate_replies};
use crate::replies::preset::Preset;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRepliesRequest {
    pub message: Option<String>,
    /// Free-form on purpose: a non-string or unknown preset means "no preset".
    pub preset: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct GenerateRepliesResponse {
    pub replies: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FixDraftRequest {
    pub draft: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FixDraftResponse {
    pub fixed: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-replies
///
/// Returns up to three candidate replies to a customer message.
pub async fn handle_generate_replies(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRepliesRequest>, JsonRejection>,
) -> Result<Json<GenerateRepliesResponse>, AppError> {
    let request = body_or_default(payload);

    let message = non_blank(request.message).ok_or(AppError::Validation("Message is required"))?;
    let preset = Preset::resolve(request.preset.as_ref().and_then(Value::as_str));

    let replies = generate_replies(state.llm.as_ref(), &message, preset)
        .await
        .map_err(|source| AppError::Llm {
            public: "AI generation failed",
            source,
        })?;

    Ok(Json(GenerateRepliesResponse { replies }))
}

/// POST /fix-draft
///
/// Rewrites a rough draft into a WhatsApp-ready message.
pub async fn handle_fix_draft(
    State(state): State<AppState>,
    payload: Result<Json<FixDraftRequest>, JsonRejection>,
) -> Result<Json<FixDraftResponse>, AppError> {
    let request = body_or_default(payload);

    let draft = non_blank(request.draft).ok_or(AppError::Validation("Draft required"))?;

    let fixed = fix_draft(state.llm.as_ref(), &draft)
        .await
        .map_err(|source| AppError::Llm {
            public: "Fix draft failed",
            source,
        })?;

    Ok(Json(FixDraftResponse { fixed }))
}

/// An unreadable body is treated as an empty one, so it fails the
/// route's own required-field check instead of returning axum's rejection.
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("Unreadable request body, treating as empty: {rejection}");
            T::default()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
