// Replies: WhatsApp reply generation and draft fixing.
// Implements: preset resolution, prompt building, output normalization, handlers.
// All LLM calls go through llm_client::ModelInvoker; no provider calls here.

pub mod generator;
pub mod handlers;
pub mod normalizer;
pub mod preset;
pub mod prompts;
