// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the brand-voice rules every prompt must carry.

/// Voice rules common to reply generation and draft rewriting.
pub const VOICE_RULES: &str = "\
- Write in polite, natural Indian English
- Third person only: refer to the support team, never \"I\", \"me\", \"my\", \"we\" or \"our\"
- Never mention a brand or company name
- No emojis
- Keep it short enough for a WhatsApp chat";
