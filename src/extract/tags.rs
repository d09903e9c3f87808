//! Literal `<tag>...</tag>` region lookup.

use std::ops::Range;

/// A completed tag region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    /// Trimmed text between the delimiters
    pub content: String,
    /// Byte range from the start of the opening tag to the end of the closing tag
    pub range: Range<usize>,
}

pub fn open_marker(tag: &str) -> String {
    format!("<{}>", tag)
}

pub fn close_marker(tag: &str) -> String {
    format!("</{}>", tag)
}

/// Find the first complete `<tag>...</tag>` region in `buffer`.
///
/// Returns `None` when the opening tag has not arrived yet, or when it has
/// but its closing tag has not.
pub fn find_tag(buffer: &str, tag: &str) -> Option<TagMatch> {
    find_tag_from(buffer, tag, 0, &[])
}

/// Like [`find_tag`], but skips opening tags that start inside any of the
/// `excluded` byte ranges.
pub fn find_tag_excluding(buffer: &str, tag: &str, excluded: &[Range<usize>]) -> Option<TagMatch> {
    find_tag_from(buffer, tag, 0, excluded)
}

/// Every complete, non-overlapping `<tag>...</tag>` region, in order.
pub fn find_all(buffer: &str, tag: &str) -> Vec<TagMatch> {
    let mut matches = Vec::new();
    let mut pos = 0;
    while let Some(found) = find_tag_from(buffer, tag, pos, &[]) {
        pos = found.range.end;
        matches.push(found);
    }
    matches
}

/// Byte ranges covered by `tag` regions. An unterminated region extends to
/// the end of the buffer.
pub fn region_spans(buffer: &str, tag: &str) -> Vec<Range<usize>> {
    let open = open_marker(tag);
    let close = close_marker(tag);
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(rel) = buffer[pos..].find(&open) {
        let start = pos + rel;
        let body = start + open.len();
        let end = match buffer[body..].find(&close) {
            Some(close_rel) => body + close_rel + close.len(),
            None => buffer.len(),
        };
        spans.push(start..end);
        pos = end;
        if pos >= buffer.len() {
            break;
        }
    }
    spans
}

fn find_tag_from(
    buffer: &str,
    tag: &str,
    from: usize,
    excluded: &[Range<usize>],
) -> Option<TagMatch> {
    let open = open_marker(tag);
    let close = close_marker(tag);
    let mut pos = from;

    loop {
        let start = pos + buffer.get(pos..)?.find(&open)?;
        if let Some(span) = excluded.iter().find(|span| span.contains(&start)) {
            pos = span.end;
            continue;
        }

        let body = start + open.len();
        let close_rel = buffer[body..].find(&close)?;
        let end = body + close_rel + close.len();

        return Some(TagMatch {
            content: buffer[body..body + close_rel].trim().to_string(),
            range: start..end,
        });
    }
}
