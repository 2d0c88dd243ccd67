//! Reply presets: the tone/intent a support agent can ask for.

/// A tone/intent preset. Unrecognized request values resolve to `None`
/// rather than failing the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    Apology,
    Closure,
    Callback,
    #[default]
    None,
}

impl Preset {
    /// Resolves a raw preset tag from a request body. Exact, case-sensitive match.
    pub fn resolve(tag: Option<&str>) -> Self {
        match tag {
            Some("apology") => Preset::Apology,
            Some("closure") => Preset::Closure,
            Some("callback") => Preset::Callback,
            _ => Preset::None,
        }
    }

    /// The instruction fragment this preset adds to the generation prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            Preset::Apology => {
                "Apologise sincerely for the trouble. Acknowledge the inconvenience caused, \
                 reassure the customer that the issue is being taken care of, and mention \
                 the next step if one is known."
            }
            Preset::Closure => {
                "Politely close the conversation. Thank the customer, offer further help \
                 if anything else is needed, and end on a positive note."
            }
            Preset::Callback => {
                "Confirm that the customer will receive a callback. Mention a timing if the \
                 message gives one. Keep it brief and action-oriented."
            }
            Preset::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_tags() {
        assert_eq!(Preset::resolve(Some("apology")), Preset::Apology);
        assert_eq!(Preset::resolve(Some("closure")), Preset::Closure);
        assert_eq!(Preset::resolve(Some("callback")), Preset::Callback);
    }

    #[test]
    fn test_unknown_or_absent_tag_is_none() {
        assert_eq!(Preset::resolve(None), Preset::None);
        assert_eq!(Preset::resolve(Some("")), Preset::None);
        assert_eq!(Preset::resolve(Some("refund")), Preset::None);
        // Matching is exact, as the original clients send lowercase tags.
        assert_eq!(Preset::resolve(Some("Apology")), Preset::None);
    }

    #[test]
    fn test_none_has_empty_instruction() {
        assert!(Preset::None.instruction().is_empty());
    }

    #[test]
    fn test_instructions_carry_intent() {
        assert!(Preset::Apology.instruction().contains("Apologise"));
        assert!(Preset::Apology.instruction().contains("inconvenience"));
        assert!(Preset::Closure.instruction().contains("Thank the customer"));
        assert!(Preset::Callback.instruction().contains("callback"));
    }
}
