//! Phrase-based hook type inference.

use serde::{Deserialize, Serialize};

use crate::models::HookType;

/// A literal phrase that identifies a hook type when found in model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookPhrase {
    pub phrase: String,
    pub hook_type: HookType,
}

impl HookPhrase {
    pub fn new(phrase: impl Into<String>, hook_type: HookType) -> Self {
        Self {
            phrase: phrase.into(),
            hook_type,
        }
    }
}

/// The stock phrase table, in match priority order.
pub fn default_hook_phrases() -> Vec<HookPhrase> {
    vec![
        HookPhrase::new("before swap", HookType::BeforeSwap),
        HookPhrase::new("after swap", HookType::AfterSwap),
        HookPhrase::new("before initialize", HookType::BeforeInitialize),
        HookPhrase::new("after initialize", HookType::AfterInitialize),
        HookPhrase::new("before modify position", HookType::BeforeModifyPosition),
        HookPhrase::new("after modify position", HookType::AfterModifyPosition),
    ]
}

/// Infer the hook type from the full accumulated output.
///
/// The first phrase in table order that occurs anywhere (case-insensitive)
/// wins. With no match, `Custom` is returned if any structured data exists,
/// otherwise `None`.
pub fn detect_hook_type(raw: &str, phrases: &[HookPhrase], structured: bool) -> Option<HookType> {
    let haystack = raw.to_lowercase();
    phrases
        .iter()
        .find(|p| !p.phrase.is_empty() && haystack.contains(&p.phrase.to_lowercase()))
        .map(|p| p.hook_type)
        .or_else(|| structured.then_some(HookType::Custom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_match_is_case_insensitive() {
        let phrases = default_hook_phrases();
        assert_eq!(
            detect_hook_type("This runs Before Swap to adjust fees", &phrases, true),
            Some(HookType::BeforeSwap)
        );
    }

    #[test]
    fn test_table_order_wins_over_text_order() {
        let phrases = default_hook_phrases();
        let raw = "after initialize we also run before swap";
        assert_eq!(
            detect_hook_type(raw, &phrases, true),
            Some(HookType::BeforeSwap)
        );
    }

    #[test]
    fn test_default_custom_only_with_structured_data() {
        let phrases = default_hook_phrases();
        assert_eq!(
            detect_hook_type("<hookCode>contract A{}</hookCode>", &phrases, true),
            Some(HookType::Custom)
        );
        assert_eq!(detect_hook_type("hello there", &phrases, false), None);
    }

    #[test]
    fn test_custom_phrase_table() {
        let phrases = vec![HookPhrase::new("beforeSwap", HookType::BeforeSwap)];
        assert_eq!(
            detect_hook_type("function beforeSwap(...)", &phrases, false),
            Some(HookType::BeforeSwap)
        );
    }
}
