//! OpenAI-compatible chat completions backend. Serves OpenAI and Groq,
//! which differ only in base URL, key and model.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::{api_error, LlmError, ModelInvoker, PromptSpec};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct OpenAiInvoker {
    client: Client,
    provider: &'static str,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiInvoker {
    pub fn new(
        client: Client,
        provider: &'static str,
        base_url: String,
        api_key: String,
        model: String,
    ) -> Self {
        Self {
            client,
            provider,
            base_url,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ModelInvoker for OpenAiInvoker {
    fn provider(&self) -> &str {
        self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, spec: &PromptSpec) -> Result<String, LlmError> {
        let body = build_request(&self.model, spec);

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

        let chat: ChatResponse = response.json().await?;
        debug!("{} chat completion returned {} choices", self.provider, chat.choices.len());
        first_content(chat)
    }
}

fn build_request<'a>(model: &'a str, spec: &'a PromptSpec) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &spec.system_instruction,
            },
            ChatMessage {
                role: "user",
                content: &spec.user_text,
            },
        ],
        max_tokens: spec.sampling.max_tokens,
        temperature: spec.sampling.temperature,
    }
}

fn first_content(chat: ChatResponse) -> Result<String, LlmError> {
    chat.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(LlmError::EmptyContent)
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
}
