use std::sync::Arc;

use crate::llm_client::ModelInvoker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend, chosen at startup via LLM_PROVIDER.
    pub llm: Arc<dyn ModelInvoker>,
}
