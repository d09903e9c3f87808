//! Tag extraction over an accumulated text buffer.
//!
//! The model wraps each output field in a fixed vocabulary of pseudo-XML
//! tags. Extraction walks [`TAGS`] in priority order, consumes the first
//! completed region it finds, and starts over from the top until a whole
//! pass completes nothing (the drain cycle).
//!
//! Incomplete regions are never touched, so a tag split across any number
//! of fragments is picked up as soon as its closing delimiter arrives.

mod hook_type;
mod lists;
mod tags;

pub use hook_type::{default_hook_phrases, detect_hook_type, HookPhrase};
pub use lists::{parse_examples, parse_features};
pub use tags::{
    close_marker, find_all, find_tag, find_tag_excluding, open_marker, region_spans, TagMatch,
};

use std::ops::Range;

use crate::models::FieldUpdate;

/// Where a completed tag's content goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTarget {
    Reply,
    Code,
    Name,
    Description,
    GasEstimate,
    TestCode,
    /// Container of `feature` blocks
    Features,
    /// Container of `example` blocks
    Examples,
}

/// One entry of the tag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDescriptor {
    pub name: &'static str,
    pub target: TagTarget,
    /// Child tag scanned inside the container, if this is a container
    pub child: Option<&'static str>,
}

/// Top-level tags in drain priority order.
pub const TAGS: &[TagDescriptor] = &[
    TagDescriptor {
        name: "reply",
        target: TagTarget::Reply,
        child: None,
    },
    TagDescriptor {
        name: "hookCode",
        target: TagTarget::Code,
        child: None,
    },
    TagDescriptor {
        name: "name",
        target: TagTarget::Name,
        child: None,
    },
    TagDescriptor {
        name: "description",
        target: TagTarget::Description,
        child: None,
    },
    TagDescriptor {
        name: "gasEstimate",
        target: TagTarget::GasEstimate,
        child: None,
    },
    TagDescriptor {
        name: "testCode",
        target: TagTarget::TestCode,
        child: None,
    },
    TagDescriptor {
        name: "implementationDetails",
        target: TagTarget::Features,
        child: Some("feature"),
    },
    TagDescriptor {
        name: "examples",
        target: TagTarget::Examples,
        child: Some("example"),
    },
];

/// Whether `buffer` contains the opening delimiter of any known tag.
pub fn contains_known_marker(buffer: &str) -> bool {
    TAGS.iter().any(|tag| {
        buffer.contains(&open_marker(tag.name))
            || tag
                .child
                .is_some_and(|child| buffer.contains(&open_marker(child)))
    })
}

/// Run the drain cycle: extract and remove completed regions until a full
/// pass finds none. Returns the updates in extraction order.
///
/// A buffer with no completed regions is left untouched.
pub fn drain(buffer: &mut String) -> Vec<FieldUpdate> {
    let mut updates = Vec::new();
    while drain_pass(buffer, &mut updates) {}
    updates
}

/// One pass over the vocabulary. Consumes at most one region and reports
/// whether the buffer changed.
pub fn drain_pass(buffer: &mut String, updates: &mut Vec<FieldUpdate>) -> bool {
    let nested = nested_ranges(buffer);

    for tag in TAGS {
        if let Some(found) = find_tag_excluding(buffer, tag.name, &nested) {
            if let Some(update) = interpret(tag, &found.content) {
                updates.push(update);
            }
            buffer.replace_range(found.range, "");
            return true;
        }
    }
    false
}

/// Interiors of the outermost tag regions, open or closed.
///
/// Only a region that starts outside every other region may be extracted:
/// a known tag quoted inside `hookCode` or a container never matches, even
/// while the enclosing region is still waiting for its closing tag.
fn nested_ranges(buffer: &str) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = TAGS
        .iter()
        .flat_map(|tag| region_spans(buffer, tag.name))
        .collect();
    spans.sort_by_key(|span| span.start);

    let mut outer: Vec<Range<usize>> = Vec::new();
    for span in spans {
        if outer.last().is_some_and(|last| span.start < last.end) {
            continue;
        }
        outer.push(span);
    }
    outer
        .into_iter()
        .map(|span| span.start + 1..span.end)
        .collect()
}

fn interpret(tag: &TagDescriptor, content: &str) -> Option<FieldUpdate> {
    match tag.target {
        TagTarget::Reply => Some(FieldUpdate::Reply(content.to_string())),
        // An empty region is consumed but never counts as code.
        TagTarget::Code => (!content.is_empty()).then(|| FieldUpdate::Code(content.to_string())),
        TagTarget::Name => Some(FieldUpdate::Name(content.to_string())),
        TagTarget::Description => Some(FieldUpdate::Description(content.to_string())),
        TagTarget::GasEstimate => parse_gas_estimate(content).map(FieldUpdate::GasEstimate),
        TagTarget::TestCode => Some(FieldUpdate::TestCode(content.to_string())),
        TagTarget::Features => Some(FieldUpdate::Features(parse_features(content))),
        TagTarget::Examples => Some(FieldUpdate::Examples(parse_examples(content))),
    }
}

/// Leading-integer parse: `"150,000 gas"` is 150000, `"about 5"` is `None`.
pub fn parse_gas_estimate(content: &str) -> Option<u64> {
    let digits: String = content
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureDetail;

    #[test]
    fn test_drain_multiple_tags_in_one_buffer() {
        let mut buffer = String::from(
            "<name>Fee Hook</name><description>Charges fees</description>\
             <gasEstimate>42000</gasEstimate>",
        );
        let updates = drain(&mut buffer);
        assert_eq!(
            updates,
            vec![
                FieldUpdate::Name("Fee Hook".to_string()),
                FieldUpdate::Description("Charges fees".to_string()),
                FieldUpdate::GasEstimate(42000),
            ]
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_priority_order_is_reapplied_after_each_consume() {
        let mut buffer = "<name>A</name><reply>hi</reply>".to_string();
        let updates = drain(&mut buffer);
        assert_eq!(updates[0], FieldUpdate::Reply("hi".to_string()));
        assert_eq!(updates[1], FieldUpdate::Name("A".to_string()));
    }

    #[test]
    fn test_drain_leaves_incomplete_regions() {
        let mut buffer = "<name>A</name><description>partial".to_string();
        let updates = drain(&mut buffer);
        assert_eq!(updates, vec![FieldUpdate::Name("A".to_string())]);
        assert_eq!(buffer, "<description>partial");
    }

    #[test]
    fn test_drain_is_idempotent_when_nothing_completes() {
        let mut buffer = "text <hookCode>contract A".to_string();
        let before = buffer.clone();
        assert!(drain(&mut buffer).is_empty());
        assert_eq!(buffer, before);
        assert!(drain(&mut buffer).is_empty());
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_bad_gas_estimate_is_consumed_without_update() {
        let mut buffer = "<gasEstimate>unknown</gasEstimate><name>X</name>".to_string();
        let updates = drain(&mut buffer);
        assert_eq!(updates, vec![FieldUpdate::Name("X".to_string())]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_feature_children_do_not_leak_into_top_level() {
        let mut buffer = String::from(
            "<implementationDetails><feature><name>Inner</name>\
             <description>d</description></feature>",
        );
        // Container still open: nothing may be extracted.
        assert!(drain(&mut buffer).is_empty());

        buffer.push_str("</implementationDetails><name>Outer</name>");
        let updates = drain(&mut buffer);
        assert_eq!(
            updates,
            vec![
                FieldUpdate::Name("Outer".to_string()),
                FieldUpdate::Features(vec![FeatureDetail {
                    name: Some("Inner".to_string()),
                    description: Some("d".to_string()),
                    code_snippet: None,
                }]),
            ]
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_tags_quoted_in_open_code_stay_in_code() {
        let mut buffer = String::from("<hookCode>/// emits <name>X</name> label");
        assert!(drain(&mut buffer).is_empty());

        buffer.push_str("\ncontract A{}</hookCode>");
        assert_eq!(
            drain(&mut buffer),
            vec![FieldUpdate::Code(
                "/// emits <name>X</name> label\ncontract A{}".to_string()
            )]
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_unclosed_region_blocks_later_tags() {
        let mut buffer = String::from("<description>mentions <hookCode>x</hookCode> then");
        assert!(drain(&mut buffer).is_empty());
        buffer.push_str("</description>");
        assert_eq!(
            drain(&mut buffer),
            vec![FieldUpdate::Description(
                "mentions <hookCode>x</hookCode> then".to_string()
            )]
        );
    }

    #[test]
    fn test_empty_code_region_is_consumed_without_update() {
        let mut buffer = String::from("<hookCode> </hookCode><name>N</name>");
        assert_eq!(drain(&mut buffer), vec![FieldUpdate::Name("N".to_string())]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_examples_container() {
        let mut buffer =
            "<examples><example>one</example><example>two</example></examples>".to_string();
        let updates = drain(&mut buffer);
        assert_eq!(
            updates,
            vec![FieldUpdate::Examples(vec!["one".to_string(), "two".to_string()])]
        );
    }

    #[test]
    fn test_unknown_tags_stay_inside_content() {
        let mut buffer = "<description>Uses <b>bold</b> text</description>".to_string();
        let updates = drain(&mut buffer);
        assert_eq!(
            updates,
            vec![FieldUpdate::Description("Uses <b>bold</b> text".to_string())]
        );
    }

    #[test]
    fn test_contains_known_marker() {
        assert!(contains_known_marker("prefix <hookCode>"));
        assert!(contains_known_marker("<example>"));
        assert!(!contains_known_marker("{\"name\": \"x\"}"));
        assert!(!contains_known_marker("<unknown>"));
    }

    #[test]
    fn test_parse_gas_estimate() {
        assert_eq!(parse_gas_estimate("42000"), Some(42000));
        assert_eq!(parse_gas_estimate(" 150,000 gas"), Some(150_000));
        assert_eq!(parse_gas_estimate("1_000"), Some(1000));
        assert_eq!(parse_gas_estimate("about 5"), None);
        assert_eq!(parse_gas_estimate(""), None);
    }
}
