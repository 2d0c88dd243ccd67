//! Hugging Face inference router backend (text-generation task).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::llm_client::{api_error, LlmError, ModelInvoker, PromptSpec};

const HF_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference/models";

#[derive(Debug, Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: Option<String>,
}

/// The router answers either a list of generations or an error object,
/// sometimes with HTTP 200.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HfResponse {
    Generations(Vec<HfGeneration>),
    Error { error: Value },
}

pub struct HuggingFaceInvoker {
    client: Client,
    api_key: String,
    model: String,
}

impl HuggingFaceInvoker {
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{HF_INFERENCE_URL}/{}", self.model)
    }
}

#[async_trait]
impl ModelInvoker for HuggingFaceInvoker {
    fn provider(&self) -> &str {
        "huggingface"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, spec: &PromptSpec) -> Result<String, LlmError> {
        let prompt = spec.single_prompt();
        let body = build_request(&prompt, spec);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, error_message).await);
        }

        let text = response.text().await?;
        debug!("Hugging Face call succeeded ({} bytes)", text.len());
        parse_response(&text)
    }
}

fn build_request<'a>(prompt: &'a str, spec: &PromptSpec) -> HfRequest<'a> {
    HfRequest {
        inputs: prompt,
        parameters: HfParameters {
            max_new_tokens: spec.sampling.max_tokens,
            temperature: spec.sampling.temperature,
            return_full_text: false,
        },
    }
}

fn parse_response(body: &str) -> Result<String, LlmError> {
    match serde_json::from_str::<HfResponse>(body)? {
        HfResponse::Generations(generations) => generations
            .into_iter()
            .next()
            .and_then(|g| g.generated_text)
            .ok_or(LlmError::EmptyContent),
        HfResponse::Error { error } => Err(LlmError::Api {
            status: 200,
            message: value_to_message(error),
        }),
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").cloned())
        .map(value_to_message)
}

fn value_to_message(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
