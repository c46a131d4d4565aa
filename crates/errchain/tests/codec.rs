mod common;

use common::{THREE_LEVEL_BYTES, count_warnings, init_tracing, three_level_chain};
use errchain::codec::{binary, dsv, json};
use errchain::codec::{DecodeErrorKind, DecodeOption, Field};
use errchain::{Error, Kind, Location, chain};
use pretty_assertions::assert_eq;

#[test]
fn binary_encode_matches_golden_bytes() {
    let err = three_level_chain();
    assert_eq!(binary::encode(&err), THREE_LEVEL_BYTES);
    assert_eq!(THREE_LEVEL_BYTES.len(), 107);
}

#[test]
fn binary_decode_matches_golden_chain() {
    init_tracing();

    let mut err = Error::default();
    err.unserialize(THREE_LEVEL_BYTES);
    assert_eq!(err, three_level_chain());
}

#[test]
fn binary_round_trip_preserves_every_link() {
    init_tracing();

    let samples: &[(&str, i64, &str)] = &[
        ("", 0, ""),
        ("root cause", -1, "db.rs:12"),
        ("ünïcödé ✓", i64::MAX, "src/日本.rs:1"),
        ("middle", i64::MIN, ""),
        ("", 300, "net.rs:99"),
        ("top", 7, "api.rs:3"),
    ];

    let mut err: Option<Error> = None;
    for &(message, kind, location) in samples {
        let mut builder = Error::builder()
            .message(message)
            .kind(Kind::new(kind))
            .location(location);
        if let Some(cause) = err.take() {
            builder = builder.cause(cause);
        }
        err = Some(builder.build().unwrap());
    }
    let err = err.unwrap();

    let decoded = Error::from_bytes(&err.to_bytes());
    assert_eq!(decoded.depth(), samples.len());
    assert_eq!(decoded, err);

    let expected: Vec<_> = samples.iter().rev().collect();
    for (node, &&(message, kind, location)) in decoded.chain().zip(expected.iter()) {
        assert_eq!(node.message(), message);
        assert_eq!(node.kind(), Kind::new(kind));
        assert_eq!(node.location().as_str(), location);
    }
}

#[test]
fn binary_round_trip_long_strings() {
    let message = "x".repeat(70_000);
    let err = chain!(message.as_str(), chain!(Location::new("deep.rs:1")));
    let bytes = err.to_bytes();
    assert_eq!(bytes.len(), binary::encoded_len(&err));
    assert_eq!(Error::from_bytes(&bytes), err);
}

#[test]
fn binary_decode_deep_chain_without_recursion() {
    let mut bytes = Vec::new();
    for i in 0..100_000 {
        bytes.extend_from_slice(&[(i % 60) as u8 * 2, 0, 0]);
    }

    let err = binary::decode(&bytes);
    assert_eq!(err.depth(), 100_000);
    assert_eq!(err.to_bytes(), bytes);
}

#[test]
fn binary_decode_truncated_message_is_lenient() {
    init_tracing();

    let full = three_level_chain().to_bytes();
    // outer node kind (1 byte) and location (1 + 17 bytes), message prefix cut off
    let truncated = &full[..19];

    let (err, warnings) = count_warnings(|| Error::from_bytes(truncated));
    assert_eq!(warnings, 1);
    assert_eq!(err.kind(), Kind::new(3));
    assert_eq!(err.location().as_str(), "errors_test.rs:19");
    assert_eq!(err.message(), "");
    assert!(err.cause().is_none());

    let failure = binary::decode_with(truncated, &DecodeOption::default().with_strict(true)).unwrap_err();
    assert_eq!(failure.kind(), DecodeErrorKind::UnexpectedEof);
    assert_eq!(failure.field(), Field::Message);
    assert_eq!(failure.offset(), 19);

    let (_, warnings) = count_warnings(|| Error::from_bytes(&full));
    assert_eq!(warnings, 0);
}

#[test]
fn binary_decode_truncated_inner_node_keeps_outer_links() {
    init_tracing();

    let full = three_level_chain().to_bytes();
    let (err, warnings) = count_warnings(|| Error::from_bytes(&full[..full.len() - 5]));
    assert_eq!(warnings, 1);

    assert_eq!(err.depth(), 3);
    assert_eq!(err.message(), "");
    assert_eq!(err.cause().map(Error::message), Some("three_level_chain_middle"));
    let root = err.root_cause();
    assert_eq!(root.kind(), Kind::new(1));
    assert_eq!(root.location().as_str(), "errors_test.rs:17");
    assert_eq!(root.message(), "");
}

#[test]
fn dsv_encode_matches_layout() {
    let expected = "003\x1ferrors_test.rs:19\x1f\x1e\
002\x1ferrors_test.rs:18\x1fthree_level_chain_middle\x1e\
001\x1ferrors_test.rs:17\x1fthings are gonna be bad\x1e";
    assert_eq!(dsv::encode(&three_level_chain()), expected);
    assert_eq!(three_level_chain().to_dsv(), expected);
}

#[test]
fn dsv_fields_split_back_out() {
    let encoded = three_level_chain().to_dsv();
    let records: Vec<Vec<&str>> = encoded
        .split(dsv::RECORD_SEPARATOR)
        .filter(|record| !record.is_empty())
        .map(|record| record.split(dsv::UNIT_SEPARATOR).collect())
        .collect();

    assert_eq!(
        records,
        vec![
            vec!["003", "errors_test.rs:19", ""],
            vec!["002", "errors_test.rs:18", "three_level_chain_middle"],
            vec!["001", "errors_test.rs:17", "things are gonna be bad"],
        ]
    );
}

#[test]
fn display_renders_one_node_per_line() {
    let expected = "@ errors_test.rs:19; \n\
\t@ errors_test.rs:18; three_level_chain_middle\n\
\t@ errors_test.rs:17; things are gonna be bad";
    assert_eq!(three_level_chain().to_string(), expected);
}

#[test]
fn display_single_node() {
    let err = chain!(Location::new("f.rs:10"), "boom");
    assert_eq!(err.to_string(), "@ f.rs:10; boom");
}

#[test]
fn json_matches_nested_layout() {
    let err = three_level_chain();
    let text = json::to_string(&err).unwrap();
    assert_eq!(
        text,
        r#"{"kind":3,"location":"errors_test.rs:19","previous":{"error":"three_level_chain_middle","kind":2,"location":"errors_test.rs:18","previous":{"error":"things are gonna be bad","kind":1,"location":"errors_test.rs:17"}}}"#
    );
    assert_eq!(json::from_str(&text).unwrap(), err);

    let value: serde_json::Value = serde_json::from_str(&json::to_string_pretty(&err).unwrap()).unwrap();
    assert_eq!(value["previous"]["previous"]["kind"], 1);
}

#[test]
fn json_refuses_chain_past_depth_limit() {
    let at_limit = binary::decode(&[2, 0, 0].repeat(json::MAX_JSON_DEPTH));
    let text = json::to_string(&at_limit).unwrap();
    assert_eq!(json::from_str(&text).unwrap(), at_limit);

    let past_limit = binary::decode(&[2, 0, 0].repeat(json::MAX_JSON_DEPTH + 1));
    assert!(json::to_string(&past_limit).is_err());
    assert!(json::to_string_pretty(&past_limit).is_err());
}
