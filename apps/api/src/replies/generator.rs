//! Reply pipelines: prompt, model, normalize. One backend call each.
//!
//! Input validation happens in the handlers; these functions assume non-blank text.

use tracing::{debug, info, warn};

use crate::llm_client::{LlmError, ModelInvoker};
use crate::replies::normalizer::{normalize_draft, normalize_replies};
use crate::replies::preset::Preset;
use crate::replies::prompts::{build_generation_prompt, build_rewrite_prompt};

/// Generates up to three candidate WhatsApp replies to a customer message.
///
/// An unparseable model answer yields an empty list, not an error.
pub async fn generate_replies(
    llm: &dyn ModelInvoker,
    message: &str,
    preset: Preset,
) -> Result<Vec<String>, LlmError> {
    info!("Generating replies via {} (preset={preset:?})", llm.provider());
    let spec = build_generation_prompt(message, preset.instruction());

    let raw = llm.invoke(&spec).await?;

    let replies = normalize_replies(&raw);
    if replies.is_empty() {
        warn!("Model output had no usable reply lines ({} bytes)", raw.len());
    } else {
        debug!("Normalized {} replies", replies.len());
    }
    Ok(replies)
}

/// Rewrites a rough draft into WhatsApp-ready text.
pub async fn fix_draft(llm: &dyn ModelInvoker, draft: &str) -> Result<String, LlmError> {
    info!("Fixing draft via {}", llm.provider());
    let spec = build_rewrite_prompt(draft);

    let raw = llm.invoke(&spec).await?;

    normalize_draft(&raw)
}
