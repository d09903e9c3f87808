// Fragment boundaries must never change what the parser extracts.

mod common;

use common::{feed_all, FULL_PAYLOAD};
use hookstream::extract;
use hookstream::models::{Complexity, HookType};

#[test]
fn test_full_payload_whole() {
    let parser = feed_all(&[FULL_PAYLOAD]);
    assert_eq!(parser.reply_text(), "Here is a dynamic fee hook.");

    let record = parser.finalize();
    assert_eq!(record.name.as_deref(), Some("Dynamic Fee Hook"));
    assert_eq!(
        record.code.as_deref(),
        Some("contract DynamicFee {\n    uint24 fee;\n}")
    );
    assert_eq!(record.gas_estimate, Some(150_000));
    assert_eq!(record.hook_type, Some(HookType::BeforeSwap));
    assert_eq!(record.test_code.as_deref(), Some("function testFee() public {}"));
    assert_eq!(record.functionalities, vec!["Volatility oracle", "Fee curve"]);
    assert_eq!(record.features.len(), 2);
    assert_eq!(
        record.features[1].code_snippet.as_deref(),
        Some("fee = base * vol;")
    );
    assert_eq!(
        record.examples,
        vec!["Swap 1 ETH in a calm market", "Swap during a spike"]
    );
    assert_eq!(record.complexity, None::<Complexity>);
}

#[test]
fn test_every_two_way_split_matches_whole() {
    let whole = feed_all(&[FULL_PAYLOAD]);
    let expected_reply = whole.reply_text();
    let expected = whole.finalize();

    for (i, _) in FULL_PAYLOAD.char_indices().skip(1) {
        let (head, tail) = FULL_PAYLOAD.split_at(i);
        let parser = feed_all(&[head, tail]);
        assert_eq!(parser.reply_text(), expected_reply, "split at byte {}", i);
        assert_eq!(parser.finalize(), expected, "split at byte {}", i);
    }
}

#[test]
fn test_char_by_char_matches_whole() {
    let expected = feed_all(&[FULL_PAYLOAD]).finalize();

    let chars: Vec<String> = FULL_PAYLOAD.chars().map(String::from).collect();
    let fragments: Vec<&str> = chars.iter().map(String::as_str).collect();
    let parser = feed_all(&fragments);
    assert_eq!(parser.reply_text(), "Here is a dynamic fee hook.");
    assert_eq!(parser.finalize(), expected);
}

#[test]
fn test_every_three_way_split_of_short_payload() {
    let payload = "<reply>Hi there</reply><hookCode>contract A{}</hookCode><name>A</name>";
    let whole = feed_all(&[payload]);
    let expected_reply = whole.reply_text();
    let expected = whole.finalize();

    let bounds: Vec<usize> = payload.char_indices().map(|(i, _)| i).skip(1).collect();
    for (n, &a) in bounds.iter().enumerate() {
        for &b in &bounds[n..] {
            let parser = feed_all(&[&payload[..a], &payload[a..b], &payload[b..]]);
            assert_eq!(parser.reply_text(), expected_reply, "splits {} {}", a, b);
            assert_eq!(parser.finalize(), expected, "splits {} {}", a, b);
        }
    }
}

#[test]
fn test_drain_is_idempotent_once_stable() {
    let mut buffer = String::from("<name>A</name>chatter <description>still typing");
    let first = extract::drain(&mut buffer);
    assert_eq!(first.len(), 1);

    let stable = buffer.clone();
    assert!(extract::drain(&mut buffer).is_empty());
    assert_eq!(buffer, stable);
}

#[test]
fn test_parser_ingest_of_nothing_changes_nothing() {
    let mut parser = feed_all(&["<name>A</name><description>still typing"]);
    let record = parser.record().clone();
    let buffer = parser.buffer().to_string();

    for _ in 0..3 {
        assert!(parser.ingest("").changed().is_empty());
    }
    assert_eq!(parser.record(), &record);
    assert_eq!(parser.buffer(), buffer);
}

/// Whole-payload result must equal every 2-way split of `payload`.
fn assert_split_invariant(payload: &str) {
    let whole = feed_all(&[payload]);
    let expected_reply = whole.reply_text();
    let expected = whole.finalize();

    for (i, _) in payload.char_indices().skip(1) {
        let (head, tail) = payload.split_at(i);
        let parser = feed_all(&[head, tail]);
        assert_eq!(parser.reply_text(), expected_reply, "split at byte {}", i);
        assert_eq!(parser.finalize(), expected, "split at byte {}", i);
    }
}

#[test]
fn test_json_trailer_after_tags_never_overrides() {
    let payload = "<name>Fee Hook</name>\n{\"name\": \"Oops\", \"description\": \"json\"}";
    let record = feed_all(&[payload]).finalize();
    assert_eq!(record.name.as_deref(), Some("Fee Hook"));
    assert!(record.description.is_none());

    assert_split_invariant(payload);
}

#[test]
fn test_json_prefix_before_tags_is_discarded() {
    let payload = "{\"description\": \"json\", \"gasEstimate\": 7}\n<name>Fee Hook</name>";
    let record = feed_all(&[payload]).finalize();
    assert_eq!(record.name.as_deref(), Some("Fee Hook"));
    assert!(record.description.is_none());
    assert_eq!(record.gas_estimate, None);

    assert_split_invariant(payload);
}

#[test]
fn test_tags_quoted_inside_code_stay_in_code() {
    let payload = "<hookCode>/// emits <name>X</name> label\ncontract A{}</hookCode>";
    let record = feed_all(&[payload]).finalize();
    assert_eq!(
        record.code.as_deref(),
        Some("/// emits <name>X</name> label\ncontract A{}")
    );
    assert!(record.name.is_none());

    assert_split_invariant(payload);
}

#[test]
fn test_inert_text_and_stray_markup_between_tags() {
    let payload = "Sure! <b>note</b> first.\n<reply>Done.</reply> some {braces} here \
        <description>mentions <gasEstimate>1</gasEstimate> inline</description>\
        <gasEstimate>21,000</gasEstimate>";
    let record = feed_all(&[payload]).finalize();
    assert_eq!(
        record.description.as_deref(),
        Some("mentions <gasEstimate>1</gasEstimate> inline")
    );
    assert_eq!(record.gas_estimate, Some(21_000));

    assert_split_invariant(payload);
}
