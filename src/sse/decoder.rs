//! Byte-level decoding: arbitrary chunks in, frames out.
//!
//! Chunks from the network split lines (and UTF-8 sequences) anywhere, so
//! bytes are buffered until a full line is available.

use super::events::{FrameParseError, StreamFrame};
use super::parser::SseParser;

#[derive(Debug, Default)]
pub struct FrameDecoder {
    parser: SseParser,
    pending: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and collect every frame it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<StreamFrame, FrameParseError>> {
        self.pending.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = &line[..line.len() - 1];
            if let Some(result) = self.feed_bytes(line) {
                frames.push(result);
            }
        }
        frames
    }

    /// Flush whatever is left once the byte stream has ended.
    pub fn finish(&mut self) -> Vec<Result<StreamFrame, FrameParseError>> {
        let mut frames = Vec::new();
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            if let Some(result) = self.feed_bytes(&line) {
                frames.push(result);
            }
        }
        match self.parser.finish() {
            Ok(Some(frame)) => frames.push(Ok(frame)),
            Ok(None) => {}
            Err(e) => frames.push(Err(e)),
        }
        frames
    }

    fn feed_bytes(&mut self, line: &[u8]) -> Option<Result<StreamFrame, FrameParseError>> {
        let line = match std::str::from_utf8(line) {
            Ok(line) => line,
            Err(_) => {
                self.parser.reset();
                return Some(Err(FrameParseError::InvalidUtf8));
            }
        };
        self.parser.feed_line(line).transpose()
    }
}

/// Decode a complete SSE transcript, e.g. a recorded session.
pub fn decode_transcript(text: &str) -> Vec<Result<StreamFrame, FrameParseError>> {
    let mut decoder = FrameDecoder::new();
    let mut frames = decoder.push(text.as_bytes());
    frames.extend(decoder.finish());
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "data: {\"type\":\"data\",\"content\":\"<name>Fee\"}\n\n\
        : keepalive\n\n\
        data: {\"type\":\"data\",\"content\":\" Hook</name>\"}\r\n\r\n\
        data: [DONE]\n\n";

    fn ok(frames: Vec<Result<StreamFrame, FrameParseError>>) -> Vec<StreamFrame> {
        frames.into_iter().map(|f| f.unwrap()).collect()
    }

    #[test]
    fn test_decode_transcript() {
        assert_eq!(
            ok(decode_transcript(TRANSCRIPT)),
            vec![
                StreamFrame::data("<name>Fee"),
                StreamFrame::data(" Hook</name>"),
                StreamFrame::Done,
            ]
        );
    }

    #[test]
    fn test_byte_at_a_time_matches_whole() {
        let mut decoder = FrameDecoder::new();
        let mut frames = Vec::new();
        for byte in TRANSCRIPT.as_bytes() {
            frames.extend(decoder.push(std::slice::from_ref(byte)));
        }
        frames.extend(decoder.finish());
        assert_eq!(ok(frames), ok(decode_transcript(TRANSCRIPT)));
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let text = "data: {\"type\":\"data\",\"content\":\"héllo\"}\n\n";
        let bytes = text.as_bytes();
        let split = text.find('é').unwrap() + 1;

        let mut decoder = FrameDecoder::new();
        let mut frames = decoder.push(&bytes[..split]);
        frames.extend(decoder.push(&bytes[split..]));
        assert_eq!(ok(frames), vec![StreamFrame::data("héllo")]);
    }

    #[test]
    fn test_missing_trailing_blank_line_is_flushed() {
        let frames = decode_transcript("data: [DONE]");
        assert_eq!(ok(frames), vec![StreamFrame::Done]);
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.push(b"data: \xff\xfe\n");
        assert_eq!(frames, vec![Err(FrameParseError::InvalidUtf8)]);
    }
}
