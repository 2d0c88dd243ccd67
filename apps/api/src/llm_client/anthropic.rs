//! Anthropic Messages API backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::{api_error, LlmError, ModelInvoker, PromptSpec};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    /// Extracts the text content from the first text block.
    fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text)
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

pub struct AnthropicInvoker {
    client: Client,
    api_key: String,
    model: String,
}

impl AnthropicInvoker {
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ModelInvoker for AnthropicInvoker {
    fn provider(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, spec: &PromptSpec) -> Result<String, LlmError> {
        let request_body = build_request(&self.model, spec);

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, error_message).await);
        }

        let llm_response: AnthropicResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        llm_response.into_text().ok_or(LlmError::EmptyContent)
    }
}

fn build_request<'a>(model: &'a str, spec: &'a PromptSpec) -> AnthropicRequest<'a> {
    AnthropicRequest {
        model,
        max_tokens: spec.sampling.max_tokens,
        temperature: spec.sampling.temperature,
        system: &spec.system_instruction,
        messages: vec![AnthropicMessage {
            role: "user",
            content: &spec.user_text,
        }],
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<AnthropicError>(body)
        .ok()
        .map(|e| e.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::SamplingParams;

    #[test]
    fn test_request_puts_instruction_in_system_field() {
        let spec = PromptSpec {
            system_instruction: "sys".to_string(),
            user_text: "user".to_string(),
            sampling: SamplingParams {
                max_tokens: 120,
                temperature: 0.3,
            },
        };
        let json = serde_json::to_value(build_request("claude-sonnet-4-5", &spec)).unwrap();
        assert_eq!(json["system"], "sys");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["content"], "user");
    }

    #[test]
    fn test_into_text_skips_non_text_blocks() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "thinking", "thinking": "..."},
                    {"type": "text", "text": "Sure, will do."}
                ],
                "usage": {"input_tokens": 10, "output_tokens": 4}
            }"#,
        )
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("Sure, will do."));
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Overloaded"));
    }
}
