//! LLM Client: the single point of entry for all model calls.
//!
//! ARCHITECTURAL RULE: handlers never talk to a provider directly.
//! Every call goes through `ModelInvoker`, chosen once at startup by `build_invoker`.
//!
//! No retries happen at this layer or above it. A failed call surfaces immediately.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::{Config, ProviderConfig};

pub mod anthropic;
pub mod huggingface;
pub mod ollama;
pub mod openai;
pub mod prompts;
#[cfg(test)]
pub mod stub;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else if e.is_decode() {
            LlmError::Api {
                status: e.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("undecodable response body: {e}"),
            }
        } else {
            LlmError::Unavailable(e.to_string())
        }
    }
}

/// Sampling knobs carried with every prompt so a backend swap keeps the
/// same determinism characteristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A fully assembled prompt. Built per request, read once by the invoker.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub system_instruction: String,
    pub user_text: String,
    pub sampling: SamplingParams,
}

impl PromptSpec {
    /// Flattens system instruction and user text for completion-style
    /// backends that take a single input string.
    pub fn single_prompt(&self) -> String {
        format!("{}\n\n{}", self.system_instruction, self.user_text)
    }
}

/// A model backend. Implement this to add a provider without touching the
/// handlers, prompts, or normalizer.
///
/// Carried in `AppState` as `Arc<dyn ModelInvoker>`.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Short provider name for logs and `/health`.
    fn provider(&self) -> &str;

    fn model(&self) -> &str;

    /// Sends the prompt and returns the raw generated text.
    async fn invoke(&self, spec: &PromptSpec) -> Result<String, LlmError>;
}

/// Builds the invoker named by `config.provider`.
pub fn build_invoker(config: &Config) -> Result<Arc<dyn ModelInvoker>> {
    let client = http_client(config.llm_timeout)?;

    let invoker: Arc<dyn ModelInvoker> = match &config.provider {
        ProviderConfig::HuggingFace { api_key, model } => Arc::new(
            huggingface::HuggingFaceInvoker::new(client, api_key.clone(), model.clone()),
        ),
        ProviderConfig::OpenAiCompatible {
            provider,
            api_key,
            model,
            base_url,
        } => Arc::new(openai::OpenAiInvoker::new(
            client,
            *provider,
            base_url.clone(),
            api_key.clone(),
            model.clone(),
        )),
        ProviderConfig::Ollama { base_url, model } => Arc::new(ollama::OllamaInvoker::new(
            client,
            base_url.clone(),
            model.clone(),
        )),
        ProviderConfig::Anthropic { api_key, model } => Arc::new(
            anthropic::AnthropicInvoker::new(client, api_key.clone(), model.clone()),
        ),
    };

    Ok(invoker)
}

fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Reads a non-success response body and turns it into `LlmError::Api`,
/// using `extract` to pull the provider's own error message out of JSON.
pub(crate) async fn api_error(
    response: reqwest::Response,
    extract: fn(&str) -> Option<String>,
) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = extract(&body).unwrap_or(body);
    LlmError::Api { status, message }
}
