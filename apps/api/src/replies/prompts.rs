// All LLM prompt constants for the Replies module.
// Reuses the shared voice rules from llm_client::prompts.
//
// Prompt wording is the product's behavioural contract: changing it changes
// the tone customers see. Edit these constants, never the call sites.

use crate::llm_client::prompts::VOICE_RULES;
use crate::llm_client::{PromptSpec, SamplingParams};

/// Sampling for reply generation.
pub const GENERATION_SAMPLING: SamplingParams = SamplingParams {
    max_tokens: 120,
    temperature: 0.3,
};

/// Sampling for draft rewriting. Slightly cooler than generation.
pub const REWRITE_SAMPLING: SamplingParams = SamplingParams {
    max_tokens: 120,
    temperature: 0.25,
};

/// System prompt for reply generation.
/// Replace: {preset_block}, {voice_rules}
pub const GENERATION_SYSTEM_TEMPLATE: &str = "\
You are a human customer support executive replying to a customer on WhatsApp.

{preset_block}Rules:
{voice_rules}
- Generate exactly 3 different short replies
- Put each reply on its own line
- No numbering, bullets, labels, quotes or explanations";

/// User turn for reply generation. Replace: {message}
pub const GENERATION_USER_TEMPLATE: &str = "Customer message:\n\"{message}\"";

/// System prompt for draft rewriting. Replace: {voice_rules}
pub const REWRITE_SYSTEM_TEMPLATE: &str = "\
You rewrite rough draft replies from customer support executives into natural, \
WhatsApp-ready messages.

Rules:
{voice_rules}
- Keep the original meaning; fix grammar and tone
- No unnecessary politeness or filler
- Return only the rewritten message, with no quotes, labels or explanation";

/// User turn for draft rewriting. Replace: {draft}
pub const REWRITE_USER_TEMPLATE: &str = "Message:\n\"{draft}\"";

/// Builds the prompt asking for three candidate replies to `message`.
/// `preset_instruction` may be empty.
pub fn build_generation_prompt(message: &str, preset_instruction: &str) -> PromptSpec {
    let preset_block = if preset_instruction.is_empty() {
        String::new()
    } else {
        format!("{preset_instruction}\n\n")
    };

    PromptSpec {
        system_instruction: GENERATION_SYSTEM_TEMPLATE
            .replace("{preset_block}", &preset_block)
            .replace("{voice_rules}", VOICE_RULES),
        user_text: GENERATION_USER_TEMPLATE.replace("{message}", message),
        sampling: GENERATION_SAMPLING,
    }
}

/// Builds the prompt asking for a single rewrite of `draft`.
pub fn build_rewrite_prompt(draft: &str) -> PromptSpec {
    PromptSpec {
        system_instruction: REWRITE_SYSTEM_TEMPLATE.replace("{voice_rules}", VOICE_RULES),
        user_text: REWRITE_USER_TEMPLATE.replace("{draft}", draft),
        sampling: REWRITE_SAMPLING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replies::preset::Preset;

    const MESSAGE: &str = "Customer is asking about their refund status";

    fn assert_generation_contract(spec: &PromptSpec) {
        let system = &spec.system_instruction;
        assert!(system.contains("exactly 3"), "must demand exactly 3 replies");
        assert!(system.contains("Third person"), "must demand third-person voice");
        assert!(system.contains("brand"), "must forbid brand names");
        assert!(system.contains("No emojis"));
        assert!(system.contains("own line"));
        assert!(!system.contains('{'), "no unreplaced placeholders: {system}");
    }

    #[test]
    fn test_generation_contract_holds_for_every_preset() {
        let tags = [Some("apology"), Some("closure"), Some("callback"), Some("vip"), None];
        for tag in tags {
            let preset = Preset::resolve(tag);
            let spec = build_generation_prompt(MESSAGE, preset.instruction());
            assert_generation_contract(&spec);
            assert!(spec.system_instruction.contains(preset.instruction()));
        }
    }

    #[test]
    fn test_generation_user_text_quotes_message() {
        let spec = build_generation_prompt(MESSAGE, "");
        assert_eq!(spec.user_text, format!("Customer message:\n\"{MESSAGE}\""));
        assert_eq!(spec.sampling, GENERATION_SAMPLING);
    }

    #[test]
    fn test_empty_preset_leaves_no_gap() {
        let spec = build_generation_prompt(MESSAGE, "");
        assert!(spec.system_instruction.contains("WhatsApp.\n\nRules:"));
    }

    #[test]
    fn test_preset_sits_before_rules() {
        let spec = build_generation_prompt(MESSAGE, Preset::Closure.instruction());
        let preset_at = spec.system_instruction.find("Politely close").unwrap();
        let rules_at = spec.system_instruction.find("Rules:").unwrap();
        assert!(preset_at < rules_at);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_generation_prompt(MESSAGE, Preset::Apology.instruction());
        let b = build_generation_prompt(MESSAGE, Preset::Apology.instruction());
        assert_eq!(a, b);
    }

    #[test]
    fn test_rewrite_prompt_shape() {
        let spec = build_rewrite_prompt("pls revert asap");
        assert!(spec.system_instruction.contains("Return only the rewritten message"));
        assert!(spec.system_instruction.contains("Third person"));
        assert!(spec.system_instruction.contains("brand"));
        assert!(!spec.system_instruction.contains('{'));
        assert_eq!(spec.user_text, "Message:\n\"pls revert asap\"");
        assert_eq!(spec.sampling, REWRITE_SAMPLING);
    }
}
