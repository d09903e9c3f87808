//! Common test utilities for integration tests.
//!
//! Fixtures for tagged model output, SSE transcript builders, and a
//! recording observer for lifecycle assertions.

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use hookstream::parser::StreamParser;
use hookstream::SessionConfig;

/// A complete, well-formed tagged response.
#[allow(dead_code)]
pub const FULL_PAYLOAD: &str = "<reply>Here is a dynamic fee hook.</reply>\
<name>Dynamic Fee Hook</name>\
<description>Raises the fee before swap when volatility is high.</description>\
<hookCode>contract DynamicFee {\n    uint24 fee;\n}</hookCode>\
<gasEstimate>150,000</gasEstimate>\
<testCode>function testFee() public {}</testCode>\
<implementationDetails>\
<feature><name>Volatility oracle</name><description>Tracks price moves</description></feature>\
<feature><name>Fee curve</name><codeSnippet>fee = base * vol;</codeSnippet></feature>\
</implementationDetails>\
<examples><example>Swap 1 ETH in a calm market</example><example>Swap during a spike</example></examples>";

/// Feed fragments in order through a fresh parser.
#[allow(dead_code)]
pub fn feed_all(fragments: &[&str]) -> StreamParser {
    let mut parser = StreamParser::new(&SessionConfig::default());
    for fragment in fragments {
        parser.ingest(fragment);
    }
    parser
}

/// One SSE data event carrying `content` in the backend envelope.
#[allow(dead_code)]
pub fn sse_data_event(content: &str) -> String {
    let payload = serde_json::json!({ "type": "data", "content": content });
    format!("data: {}\n\n", payload)
}

/// SSE error event with an optional `errorType`.
#[allow(dead_code)]
pub fn sse_error_event(message: &str, error_type: Option<&str>) -> String {
    let mut payload = serde_json::json!({ "type": "error", "content": message });
    if let Some(kind) = error_type {
        payload["errorType"] = serde_json::json!(kind);
    }
    format!("data: {}\n\n", payload)
}

/// Full transcript: one data event per fragment, then the terminal sentinel.
#[allow(dead_code)]
pub fn sse_transcript(fragments: &[&str]) -> String {
    let mut body: String = fragments.iter().map(|f| sse_data_event(f)).collect();
    body.push_str("data: [DONE]\n\n");
    body
}
