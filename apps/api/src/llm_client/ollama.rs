//! Ollama local inference backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::{api_error, LlmError, ModelInvoker, PromptSpec};

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: Option<OllamaReply>,
}

#[derive(Debug, Deserialize)]
struct OllamaReply {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

pub struct OllamaInvoker {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaInvoker {
    pub fn new(client: Client, base_url: String, model: String) -> Self {
        Self {
            client,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ModelInvoker for OllamaInvoker {
    fn provider(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, spec: &PromptSpec) -> Result<String, LlmError> {
        let body = build_request(&self.model, spec);

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, error_message).await);
        }

        let reply: OllamaResponse = response.json().await?;
        debug!("Ollama chat call succeeded (model: {})", self.model);
        reply
            .message
            .map(|m| m.content)
            .ok_or(LlmError::EmptyContent)
    }
}

fn build_request<'a>(model: &'a str, spec: &'a PromptSpec) -> OllamaRequest<'a> {
    OllamaRequest {
        model,
        messages: vec![
            OllamaMessage {
                role: "system",
                content: &spec.system_instruction,
            },
            OllamaMessage {
                role: "user",
                content: &spec.user_text,
            },
        ],
        stream: false,
        options: OllamaOptions {
            temperature: spec.sampling.temperature,
            num_predict: spec.sampling.max_tokens,
        },
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<OllamaError>(body).ok().map(|e| e.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::SamplingParams;

    #[test]
    fn test_request_is_non_streaming_with_token_cap() {
        let spec = PromptSpec {
            system_instruction: "sys".to_string(),
            user_text: "user".to_string(),
            sampling: SamplingParams {
                max_tokens: 120,
                temperature: 0.3,
            },
        };
        let json = serde_json::to_value(build_request("llama3", &spec)).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 120);
        assert_eq!(json["messages"][1]["content"], "user");
    }

    #[test]
    fn test_response_and_error_shapes() {
        let reply: OllamaResponse = serde_json::from_str(
            r#"{"model": "llama3", "message": {"role": "assistant", "content": "Will follow up."}, "done": true}"#,
        )
        .unwrap();
        assert_eq!(reply.message.unwrap().content, "Will follow up.");
        assert_eq!(
            error_message(r#"{"error": "model 'llama9' not found"}"#).as_deref(),
            Some("model 'llama9' not found")
        );
    }
}
