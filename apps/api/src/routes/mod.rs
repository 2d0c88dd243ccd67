pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::replies::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-replies", post(handlers::handle_generate_replies))
        .route("/fix-draft", post(handlers::handle_fix_draft))
        .with_state(state)
}
