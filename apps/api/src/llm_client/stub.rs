//! In-memory `ModelInvoker` for tests. Records every prompt it receives.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, ModelInvoker, PromptSpec};

enum Outcome {
    Text(String),
    Unavailable(String),
    Timeout,
}

pub struct StubInvoker {
    outcome: Outcome,
    calls: AtomicUsize,
    last_spec: Mutex<Option<PromptSpec>>,
}

impl StubInvoker {
    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_spec: Mutex::new(None),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with(Outcome::Text(text.to_string()))
    }

    pub fn unavailable(detail: &str) -> Self {
        Self::with(Outcome::Unavailable(detail.to_string()))
    }

    pub fn timing_out() -> Self {
        Self::with(Outcome::Timeout)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_spec(&self) -> Option<PromptSpec> {
        self.last_spec.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for StubInvoker {
    fn provider(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn invoke(&self, spec: &PromptSpec) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_spec.lock().unwrap() = Some(spec.clone());
        match &self.outcome {
            Outcome::Text(text) => Ok(text.clone()),
            Outcome::Unavailable(detail) => Err(LlmError::Unavailable(detail.clone())),
            Outcome::Timeout => Err(LlmError::Timeout),
        }
    }
}
