//! Stateful SSE line parser.

use super::events::{FrameParseError, SseLine, StreamFrame};
use super::payloads::FramePayload;

/// Literal terminal sentinel carried in a data line.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        // Only the single separator space is dropped; fragment edges matter.
        return SseLine::Data(rest.strip_prefix(' ').unwrap_or(rest).to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Decode an event's type and joined data into a frame.
///
/// Returns `Ok(None)` for keepalives and empty events.
pub fn parse_frame(
    event_type: Option<&str>,
    data: &str,
) -> Result<Option<StreamFrame>, FrameParseError> {
    match event_type {
        Some("done") | Some("end") => return Ok(Some(StreamFrame::Done)),
        Some("ping") | Some("heartbeat") => return Ok(None),
        _ => {}
    }

    if data.trim() == DONE_SENTINEL {
        return Ok(Some(StreamFrame::Done));
    }

    if event_type == Some("error") && !looks_like_json(data) {
        return Ok(Some(StreamFrame::error(data.trim(), None)));
    }

    if !looks_like_json(data) {
        if data.is_empty() {
            return Ok(None);
        }
        return Ok(Some(StreamFrame::Data(data.to_string())));
    }

    let payload: FramePayload =
        serde_json::from_str(data).map_err(|e| FrameParseError::InvalidJson {
            source: e.to_string(),
        })?;

    // Bare JSON without an envelope is model output, not a frame.
    if payload.kind.is_none() && payload.content.is_none() && event_type.is_none() {
        return Ok(Some(StreamFrame::Data(data.to_string())));
    }

    let kind = payload.kind.as_deref().or(event_type).unwrap_or("data");
    match kind {
        "data" | "content" | "chunk" | "delta" | "message" => {
            Ok(Some(StreamFrame::Data(payload.content_text())))
        }
        "error" => {
            let mut message = payload.content_text();
            if message.is_empty() {
                message = payload.message.clone().unwrap_or_default();
            }
            if message.is_empty() {
                message = "Unknown backend error".to_string();
            }
            Ok(Some(StreamFrame::Error {
                message,
                kind: payload.error_type,
            }))
        }
        "done" | "end" => Ok(Some(StreamFrame::Done)),
        "ping" | "heartbeat" => Ok(None),
        other => Err(FrameParseError::UnknownFrameType(other.to_string())),
    }
}

fn looks_like_json(data: &str) -> bool {
    data.trim_start().starts_with('{')
}

/// Stateful SSE parser that accumulates lines and emits complete frames
#[derive(Debug, Default)]
pub struct SseParser {
    /// Current event type being accumulated
    current_event_type: Option<String>,
    /// Accumulated data lines (SSE allows multiple data: lines)
    data_buffer: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser, potentially returning a complete frame
    ///
    /// Returns:
    /// - `Ok(Some(frame))` - A complete frame was decoded
    /// - `Ok(None)` - Line was consumed but the event is incomplete (or a keepalive)
    /// - `Err(error)` - The completed event could not be decoded
    pub fn feed_line(&mut self, line: &str) -> Result<Option<StreamFrame>, FrameParseError> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.current_event_type = Some(event_type);
                Ok(None)
            }
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                Ok(None)
            }
            SseLine::Empty => self.try_emit_frame(),
            SseLine::Comment(_) => Ok(None),
        }
    }

    /// Flush a pending event when the byte stream ends without a blank line.
    pub fn finish(&mut self) -> Result<Option<StreamFrame>, FrameParseError> {
        self.try_emit_frame()
    }

    fn try_emit_frame(&mut self) -> Result<Option<StreamFrame>, FrameParseError> {
        if self.current_event_type.is_none() && self.data_buffer.is_empty() {
            return Ok(None);
        }

        let event_type = self.current_event_type.take();
        let data = self.data_buffer.join("\n");
        self.data_buffer.clear();

        parse_frame(event_type.as_deref(), &data)
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.current_event_type = None;
        self.data_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(parser: &mut SseParser, lines: &[&str]) -> Vec<StreamFrame> {
        lines
            .iter()
            .filter_map(|line| parser.feed_line(line).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_sse_lines() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
        assert_eq!(parse_sse_line("\r"), SseLine::Empty);
        assert_eq!(
            parse_sse_line(": keepalive"),
            SseLine::Comment("keepalive".to_string())
        );
        assert_eq!(parse_sse_line("event: done"), SseLine::Event("done".to_string()));
        assert_eq!(
            parse_sse_line("data:  two spaces"),
            SseLine::Data(" two spaces".to_string())
        );
    }

    #[test]
    fn test_data_frame_with_string_content() {
        let mut parser = SseParser::new();
        let frames = feed_all(
            &mut parser,
            &[r#"data: {"type":"data","content":" there</reply>"}"#, ""],
        );
        assert_eq!(frames, vec![StreamFrame::data(" there</reply>")]);
    }

    #[test]
    fn test_data_frame_with_object_content_is_serialized() {
        let mut parser = SseParser::new();
        let frames = feed_all(
            &mut parser,
            &[r#"data: {"type":"data","content":{"name":"Fee"}}"#, ""],
        );
        assert_eq!(frames, vec![StreamFrame::data(r#"{"name":"Fee"}"#)]);
    }

    #[test]
    fn test_error_frame() {
        let mut parser = SseParser::new();
        let frames = feed_all(
            &mut parser,
            &[
                r#"data: {"type":"error","content":"Rate limited","errorType":"rate_limit"}"#,
                "",
            ],
        );
        assert_eq!(
            frames,
            vec![StreamFrame::error("Rate limited", Some("rate_limit"))]
        );
    }

    #[test]
    fn test_done_sentinels() {
        let mut parser = SseParser::new();
        assert_eq!(
            feed_all(&mut parser, &["data: [DONE]", ""]),
            vec![StreamFrame::Done]
        );
        assert_eq!(
            feed_all(&mut parser, &["event: done", ""]),
            vec![StreamFrame::Done]
        );
    }

    #[test]
    fn test_bare_json_passes_through_as_data() {
        let mut parser = SseParser::new();
        let frames = feed_all(&mut parser, &[r#"data: {"name": "Fee Hook"}"#, ""]);
        assert_eq!(frames, vec![StreamFrame::data(r#"{"name": "Fee Hook"}"#)]);
    }

    #[test]
    fn test_plain_text_data_and_multiline_join() {
        let mut parser = SseParser::new();
        let frames = feed_all(&mut parser, &["data: line one", "data: line two", ""]);
        assert_eq!(frames, vec![StreamFrame::data("line one\nline two")]);
    }

    #[test]
    fn test_pings_and_comments_emit_nothing() {
        let mut parser = SseParser::new();
        assert!(feed_all(&mut parser, &[": hi", "", "event: ping", ""]).is_empty());
    }

    #[test]
    fn test_invalid_json_and_unknown_type() {
        let mut parser = SseParser::new();
        parser.feed_line("data: {not json").unwrap();
        assert!(matches!(
            parser.feed_line(""),
            Err(FrameParseError::InvalidJson { .. })
        ));

        parser.feed_line(r#"data: {"type":"usage"}"#).unwrap();
        assert_eq!(
            parser.feed_line(""),
            Err(FrameParseError::UnknownFrameType("usage".to_string()))
        );
    }

    #[test]
    fn test_finish_flushes_pending_event() {
        let mut parser = SseParser::new();
        parser.feed_line("data: [DONE]").unwrap();
        assert_eq!(parser.finish().unwrap(), Some(StreamFrame::Done));
        assert_eq!(parser.finish().unwrap(), None);
    }

    #[test]
    fn test_reset_discards_partial_event() {
        let mut parser = SseParser::new();
        parser.feed_line("event: error").unwrap();
        parser.feed_line("data: half").unwrap();
        parser.reset();
        assert_eq!(parser.feed_line("").unwrap(), None);
    }
}
