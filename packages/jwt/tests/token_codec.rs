//! Tests for the token codec - segment structure, base64url and JSON handling

use devkit_jwt::{
    JwtError, Operation, base64_url_decode, base64_url_decode_binary, base64_url_encode,
    codec::encode_parts, decode_token,
};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn segment(value: &Value) -> String {
    base64_url_encode(value.to_string().as_bytes())
}

#[test]
fn test_decode_returns_header_payload_and_opaque_signature() {
    let token = format!(
        "{}.{}.c2lnbmF0dXJl",
        segment(&json!({"alg": "HS256", "typ": "JWT"})),
        segment(&json!({"sub": "1234567890", "name": "John Doe"}))
    );

    let decoded = decode_token(&token).expect("well-formed token");

    assert_eq!(decoded.algorithm(), Some("HS256"));
    assert_eq!(decoded.token_type(), Some("JWT"));
    assert_eq!(decoded.payload["name"], "John Doe");
    assert_eq!(decoded.signature, "c2lnbmF0dXJl");
    assert_eq!(decoded.raw, token);
}

#[test]
fn test_decode_accepts_any_typ_and_undecodable_signature() {
    let token = format!(
        "{}.{}.***not-base64***",
        segment(&json!({"alg": "none", "typ": "at+jwt"})),
        segment(&json!({}))
    );

    let decoded = decode_token(&token).expect("signature is never decoded here");
    assert_eq!(decoded.token_type(), Some("at+jwt"));
    assert_eq!(decoded.signature, "***not-base64***");
}

#[test]
fn test_decode_two_segments_mentions_count() {
    let error = decode_token("abc.def").expect_err("two segments");

    assert_eq!(error.operation(), Some(Operation::Decode));
    assert!(matches!(error.root(), JwtError::Format(msg) if msg.contains('2')));
    assert!(error.to_string().starts_with("Failed to decode JWT: "));
}

#[test]
fn test_decode_empty_and_blank_tokens() {
    for token in ["", "   ", "\n"] {
        let error = decode_token(token).expect_err("empty token");
        assert!(matches!(error.root(), JwtError::Format(msg) if msg.contains("empty")));
    }
}

#[test]
fn test_decode_ignores_surrounding_whitespace() {
    let token = format!("{}.{}.sig", segment(&json!({"alg": "HS256"})), segment(&json!({"a": 1})));

    let decoded = decode_token(&format!("  {token}\n")).expect("padded token");
    assert_eq!(decoded.raw, token);
    assert_eq!(decoded.signature, "sig");
    assert_eq!(decoded.payload["a"], 1);
}

#[test]
fn test_decode_four_segments() {
    let error = decode_token("a.b.c.d").expect_err("four segments");
    assert!(matches!(error.root(), JwtError::Format(msg) if msg.contains('4')));
}

#[test]
fn test_decode_non_json_header() {
    // "bm90anNvbg" is base64url for "notjson"
    let error = decode_token("bm90anNvbg.e30.sig").expect_err("header is not JSON");
    assert!(matches!(error.root(), JwtError::Format(msg) if msg.contains("header")));
}

#[test]
fn test_decode_non_object_payload() {
    let token = format!("{}.{}.sig", segment(&json!({"alg": "HS256"})), segment(&json!([1, 2])));
    let error = decode_token(&token).expect_err("payload is an array");
    assert!(matches!(error.root(), JwtError::Format(msg) if msg.contains("JSON object")));
}

#[test]
fn test_decode_invalid_base64_payload() {
    let token = format!("{}.!!!.sig", segment(&json!({"alg": "HS256"})));
    let error = decode_token(&token).expect_err("payload is not base64url");
    assert!(matches!(error.root(), JwtError::Format(msg) if msg.contains("payload")));
}

#[test]
fn test_decode_invalid_utf8_payload() {
    let token = format!(
        "{}.{}.sig",
        segment(&json!({"alg": "HS256"})),
        base64_url_encode(&[0xff, 0xfe, 0xfd])
    );
    let error = decode_token(&token).expect_err("payload is not UTF-8");
    assert!(matches!(error.root(), JwtError::Format(_)));
}

#[test]
fn test_unicode_payload_roundtrip() {
    let payload = json!({"name": "日本語"});
    let token = format!("{}.sig", encode_parts(&json!({"alg": "HS256"}), &payload).unwrap());

    let decoded = decode_token(&token).unwrap();
    assert_eq!(Value::Object(decoded.payload), payload);
}

#[test]
fn test_encode_parts_uses_compact_json_in_insertion_order() {
    let mut header = Map::new();
    header.insert("alg".into(), json!("HS256"));
    header.insert("typ".into(), json!("JWT"));

    let unsigned = encode_parts(&header, &json!({"b": 1, "a": 2})).unwrap();
    let (header_b64, payload_b64) = unsigned.split_once('.').unwrap();

    assert_eq!(base64_url_decode(header_b64).unwrap(), r#"{"alg":"HS256","typ":"JWT"}"#);
    assert_eq!(base64_url_decode(payload_b64).unwrap(), r#"{"b":1,"a":2}"#);
    assert_eq!(header_b64, "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
}

#[test]
fn test_base64url_alphabet_and_padding() {
    // 0xfb 0xff encodes to "+/8=" in the standard alphabet
    assert_eq!(base64_url_encode(&[0xfb, 0xff]), "-_8");
    assert_eq!(base64_url_decode_binary("-_8").unwrap(), vec![0xfb, 0xff]);
    assert_eq!(base64_url_decode_binary("-_8=").unwrap(), vec![0xfb, 0xff]);
    assert_eq!(base64_url_decode("aGk").unwrap(), "hi");
}

#[test]
fn test_base64url_rejects_foreign_characters() {
    let error = base64_url_decode_binary("a+b/").expect_err("standard alphabet");
    assert!(matches!(error, JwtError::Format(_)));
}

#[test]
fn test_signing_input_is_first_two_raw_segments() {
    let token = format!("{}.{}.sig", segment(&json!({"alg": "HS256"})), segment(&json!({"a": 1})));
    let decoded = decode_token(&token).unwrap();
    let expected = token.rsplit_once('.').unwrap().0;
    assert_eq!(decoded.signing_input(), expected);
}

#[test]
fn test_summary_document() {
    let token = format!("{}.{}.sig", segment(&json!({"alg": "HS256"})), segment(&json!({"a": 1})));
    let summary = decode_token(&token).unwrap().summary();

    assert_eq!(
        summary,
        json!({"header": {"alg": "HS256"}, "payload": {"a": 1}, "signature": "sig"})
    );
}

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "\\PC{0,24}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn json_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(("[a-z_]{1,8}", json_leaf()), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_payload_survives_encode_and_decode(payload in json_object()) {
        let unsigned = encode_parts(&json!({"alg": "HS256", "typ": "JWT"}), &payload).unwrap();
        let decoded = decode_token(&format!("{unsigned}.sig")).unwrap();

        prop_assert_eq!(&decoded.payload, &payload);
        prop_assert_eq!(decoded.signing_input(), unsigned.as_str());
    }

    #[test]
    fn prop_binary_base64url_is_lossless(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = base64_url_encode(&bytes);
        prop_assert!(!encoded.contains(['+', '/', '=']));
        prop_assert_eq!(base64_url_decode_binary(&encoded).unwrap(), bytes);
    }
}
