use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_HF_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_OLLAMA_MODEL: &str = "llama3";
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";

/// Which model backend the server talks to, with its connection settings.
/// Selected once at startup via `LLM_PROVIDER`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderConfig {
    HuggingFace {
        api_key: String,
        model: String,
    },
    /// Any OpenAI-compatible chat completions endpoint (OpenAI, Groq).
    OpenAiCompatible {
        provider: &'static str,
        api_key: String,
        model: String,
        base_url: String,
    },
    Ollama {
        base_url: String,
        model: String,
    },
    Anthropic {
        api_key: String,
        model: String,
    },
}

/// Application configuration loaded from environment variables.
/// Startup fails if the selected provider's required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider_name = optional_env("LLM_PROVIDER").unwrap_or_else(|| "huggingface".into());

        Ok(Config {
            provider: provider_from_env(&provider_name)?,
            llm_timeout: Duration::from_secs(
                optional_env("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|| "60".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: optional_env("PORT")
                .unwrap_or_else(|| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn provider_from_env(name: &str) -> Result<ProviderConfig> {
    let provider = match name.trim().to_ascii_lowercase().as_str() {
        "huggingface" | "hf" => ProviderConfig::HuggingFace {
            api_key: require_env("HF_API_KEY")?,
            model: optional_env("HF_MODEL").unwrap_or_else(|| DEFAULT_HF_MODEL.into()),
        },
        "openai" => ProviderConfig::OpenAiCompatible {
            provider: "openai",
            api_key: require_env("OPENAI_API_KEY")?,
            model: optional_env("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
        },
        "groq" => ProviderConfig::OpenAiCompatible {
            provider: "groq",
            api_key: require_env("GROQ_API_KEY")?,
            model: optional_env("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.into()),
            base_url: DEFAULT_GROQ_BASE_URL.into(),
        },
        "ollama" => ProviderConfig::Ollama {
            base_url: optional_env("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.into()),
            model: optional_env("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.into()),
        },
        "anthropic" => ProviderConfig::Anthropic {
            api_key: require_env("ANTHROPIC_API_KEY")?,
            model: optional_env("ANTHROPIC_MODEL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.into()),
        },
        other => bail!(
            "Unknown LLM_PROVIDER '{other}' (expected huggingface, openai, groq, ollama or anthropic)"
        ),
    };
    Ok(provider)
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an env var, treating an empty value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = provider_from_env("carrier-pigeon").unwrap_err();
        assert!(err.to_string().contains("Unknown LLM_PROVIDER 'carrier-pigeon'"));
    }

    #[test]
    fn test_ollama_needs_no_api_key() {
        // OLLAMA_* may be set in the developer's shell; only the variant is asserted.
        let provider = provider_from_env("ollama").unwrap();
        assert!(matches!(provider, ProviderConfig::Ollama { .. }));
    }

    #[test]
    fn test_provider_name_is_case_insensitive() {
        let provider = provider_from_env("  OLLAMA ").unwrap();
        assert!(matches!(provider, ProviderConfig::Ollama { .. }));
    }
}
