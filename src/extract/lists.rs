//! Sub-scans for the list-like container tags.

use super::tags::{find_all, find_tag};
use crate::models::FeatureDetail;

/// Every closed `feature` inside an `implementationDetails` body.
///
/// Features with no recognisable child tags fall back to their trimmed text
/// as the name; blank features are dropped.
pub fn parse_features(container: &str) -> Vec<FeatureDetail> {
    find_all(container, "feature")
        .into_iter()
        .filter_map(|feature| {
            let body = feature.content;
            let mut detail = FeatureDetail {
                name: child(&body, "name"),
                description: child(&body, "description"),
                code_snippet: child(&body, "codeSnippet"),
            };
            if detail.is_empty() {
                if body.is_empty() {
                    return None;
                }
                detail.name = Some(body);
            }
            Some(detail)
        })
        .collect()
}

/// Every closed, non-blank `example` inside an `examples` body.
pub fn parse_examples(container: &str) -> Vec<String> {
    find_all(container, "example")
        .into_iter()
        .map(|m| m.content)
        .filter(|content| !content.is_empty())
        .collect()
}

fn child(body: &str, tag: &str) -> Option<String> {
    find_tag(body, tag)
        .map(|m| m.content)
        .filter(|content| !content.is_empty())
}
