//! Reply normalizer: turns raw model text into clean, bounded output.
//!
//! Models ignore formatting instructions often enough that nothing here trusts
//! them: numbering, bullets, wrapping quotes and blank lines are all stripped.
//! Malformed input degrades to fewer (or zero) replies, never to a panic.

use crate::llm_client::LlmError;

/// Upper bound on replies returned to the caller.
pub const MAX_REPLIES: usize = 3;

const BULLETS: &[char] = &['-', '*', '•', '–', '·'];

/// Quote pairs a model may wrap a whole reply in: straight and curly.
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('“', '”')];
const QUOTES: [char; 3] = ['"', '“', '”'];

/// Splits raw model output into at most `MAX_REPLIES` clean replies, in model order.
pub fn normalize_replies(raw: &str) -> Vec<String> {
    raw.lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .take(MAX_REPLIES)
        .map(str::to_string)
        .collect()
}

/// Trims a rewritten draft. An empty rewrite is a backend failure.
pub fn normalize_draft(raw: &str) -> Result<String, LlmError> {
    let fixed = strip_wrapping_quotes(raw.trim());
    if fixed.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(fixed.to_string())
}

fn clean_line(line: &str) -> &str {
    strip_wrapping_quotes(strip_list_marker(line.trim()))
}

/// Strips one leading bullet (`- `, `• `), ordinal (`1.`, `2)`) or markdown
/// bold ordinal (`**1.**`). A marker must be followed by whitespace or the end
/// of the line; anything else ("-5% off", "1.5 days", "**Note**") is content.
fn strip_list_marker(line: &str) -> &str {
    if let Some(rest) = strip_bold_ordinal(line) {
        return rest;
    }

    if let Some(rest) = line.strip_prefix(BULLETS) {
        if ends_marker(rest) {
            return rest.trim_start();
        }
        return line;
    }

    let digits = leading_digits(line);
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(['.', ')']) {
            if ends_marker(rest) {
                return rest.trim_start();
            }
        }
    }

    line
}

fn strip_bold_ordinal(line: &str) -> Option<&str> {
    let inner_and_rest = line.strip_prefix("**")?;
    let close = inner_and_rest.find("**")?;
    let inner = &inner_and_rest[..close];
    let digits = leading_digits(inner);
    if digits > 0 && matches!(&inner[digits..], "." | ")") {
        Some(inner_and_rest[close + 2..].trim_start())
    } else {
        None
    }
}

fn leading_digits(text: &str) -> usize {
    text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len()
}

fn ends_marker(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(char::is_whitespace)
}

/// Removes one pair of quotes wrapping the whole text. When the text holds
/// any other quote the outer ones may belong to separate quoted words, so
/// the text is returned unchanged.
fn strip_wrapping_quotes(text: &str) -> &str {
    for &(open, close) in QUOTE_PAIRS {
        if let Some(inner) = text.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            if inner.contains(QUOTES) {
                return text;
            }
            return inner.trim();
        }
    }
    text
}
