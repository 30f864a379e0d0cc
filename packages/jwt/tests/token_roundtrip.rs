//! End-to-end generate/verify tests over every supported algorithm

mod support;

use devkit_jwt::{
    Jwt, JwtEngine, JwtError, KeyInput, Operation, SignOptions, VerifyOptions, base64_url_encode,
    decode_token, generate_token, verify_token,
};
use proptest::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value, json};

fn payload() -> Map<String, Value> {
    match json!({"sub": "1234567890", "name": "John Doe", "iat": 1_516_239_022}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn tamper(token: &str) -> String {
    let forged = base64_url_encode(br#"{"sub":"attacker"}"#);
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[1] = &forged;
    parts.join(".")
}

#[tokio::test]
async fn test_hmac_roundtrip_all_widths() {
    for alg in ["HS256", "HS384", "HS512"] {
        let token = generate_token(payload(), SignOptions::new(alg).with_secret("k1"))
            .await
            .unwrap();

        let decoded = decode_token(&token).unwrap();
        assert_eq!(decoded.algorithm(), Some(alg));
        assert_eq!(decoded.token_type(), Some("JWT"));
        assert_eq!(decoded.payload, payload());

        let valid = verify_token(token.as_str(), VerifyOptions::new(alg).with_secret("k1"))
            .await
            .unwrap();
        assert!(valid, "{alg}");
    }
}

#[tokio::test]
async fn test_hmac_wrong_secret_is_false_not_error() {
    let token = generate_token(payload(), SignOptions::new("HS256").with_secret("k1"))
        .await
        .unwrap();

    let valid = verify_token(token, VerifyOptions::new("HS256").with_secret("k2"))
        .await
        .unwrap();
    assert!(!valid);
}

#[test]
fn test_generate_and_verify_outside_runtime() {
    let pending = generate_token(payload(), SignOptions::new("HS256").with_secret("k1"));

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let token = runtime.block_on(pending).unwrap();

    let pending = verify_token(token.as_str(), VerifyOptions::new("HS256").with_secret("k1"));
    assert!(runtime.block_on(pending).unwrap());
}

#[tokio::test]
async fn test_verify_ignores_surrounding_whitespace() {
    let token = generate_token(payload(), SignOptions::new("HS256").with_secret("k1"))
        .await
        .unwrap();

    let valid = verify_token(format!("  {token}\n"), VerifyOptions::new("HS256").with_secret("k1"))
        .await
        .unwrap();
    assert!(valid);
}

#[tokio::test]
async fn test_algorithm_mismatch_is_hard_failure() {
    let token = generate_token(payload(), SignOptions::new("HS256").with_secret("k1"))
        .await
        .unwrap();

    let error = verify_token(token, VerifyOptions::new("HS384").with_secret("k1"))
        .await
        .expect_err("declared HS256, expected HS384");

    assert_eq!(error.operation(), Some(Operation::Verify));
    assert_eq!(
        error.root(),
        &JwtError::AlgorithmMismatch {
            expected: "HS384".into(),
            actual: "HS256".into()
        }
    );
    assert!(error.to_string().starts_with("Failed to verify JWT: "));
}

#[tokio::test]
async fn test_mismatch_checked_before_algorithm_support() {
    let token = generate_token(payload(), SignOptions::new("HS256").with_secret("k1"))
        .await
        .unwrap();

    let error = verify_token(token, VerifyOptions::new("XX999").with_secret("k1"))
        .await
        .unwrap_err();
    assert!(matches!(error.root(), JwtError::AlgorithmMismatch { .. }));
}

#[tokio::test]
async fn test_verify_malformed_token_is_format_error() {
    let error = verify_token("abc.def", VerifyOptions::new("HS256").with_secret("k1"))
        .await
        .unwrap_err();
    assert!(matches!(error.root(), JwtError::Format(_)));
    assert!(error.to_string().starts_with("Failed to verify JWT: "));
}

#[tokio::test]
async fn test_generate_errors_carry_prefix() {
    let error = generate_token(payload(), SignOptions::new("HS256"))
        .await
        .unwrap_err();
    assert!(matches!(error.root(), JwtError::KeyRequired(_)));
    assert!(error.to_string().starts_with("Failed to generate JWT: "));

    let error = generate_token(payload(), SignOptions::new("PS256").with_secret("k1"))
        .await
        .unwrap_err();
    assert!(matches!(error.root(), JwtError::Algorithm(_)));
}

#[tokio::test]
async fn test_key_id_lands_in_header() {
    let token = generate_token(
        payload(),
        SignOptions::new("HS256").with_secret("k1").with_key_id("2024-01"),
    )
    .await
    .unwrap();

    let decoded = decode_token(&token).unwrap();
    assert_eq!(decoded.key_id(), Some("2024-01"));

    let plain = generate_token(payload(), SignOptions::new("HS256").with_secret("k1"))
        .await
        .unwrap();
    assert!(!decode_token(&plain).unwrap().header.contains_key("kid"));
}

async fn asymmetric_roundtrip(alg: &str, private: KeyInput, public: KeyInput) {
    let token = generate_token(payload(), SignOptions::new(alg).with_private_key(private))
        .await
        .unwrap_or_else(|e| panic!("{alg} generate: {e}"));

    let options = VerifyOptions::new(alg).with_public_key(public);
    let valid = verify_token(token.as_str(), options.clone())
        .await
        .unwrap_or_else(|e| panic!("{alg} verify: {e}"));
    assert!(valid, "{alg} should verify");

    let forged = verify_token(tamper(&token), options).await.unwrap();
    assert!(!forged, "{alg} tampered payload should not verify");
}

#[tokio::test]
async fn test_asymmetric_roundtrip_with_pem_keys() {
    for alg in ["RS256", "RS384", "RS512", "ES256", "ES384", "ES512"] {
        let keys = support::key_pair_for(alg);
        asymmetric_roundtrip(
            alg,
            keys.private_pem.as_str().into(),
            keys.public_pem.as_str().into(),
        )
        .await;
    }
}

#[tokio::test]
async fn test_asymmetric_roundtrip_with_jwk_objects() {
    for alg in ["RS256", "RS384", "RS512", "ES256", "ES384", "ES512"] {
        let keys = support::key_pair_for(alg);
        asymmetric_roundtrip(alg, keys.private_jwk.clone().into(), keys.public_jwk.clone().into())
            .await;
    }
}

#[tokio::test]
async fn test_mixed_key_encodings() {
    // Signed with a PEM key, verified with the JWK text of the same key
    let keys = &*support::P384;
    asymmetric_roundtrip(
        "ES384",
        keys.private_pem.as_str().into(),
        keys.public_jwk.to_string().into(),
    )
    .await;

    let (pkcs1_private, pkcs1_public) = &*support::RSA_PKCS1;
    asymmetric_roundtrip(
        "RS256",
        pkcs1_private.as_str().into(),
        support::RSA.public_jwk.clone().into(),
    )
    .await;
    asymmetric_roundtrip(
        "RS384",
        support::RSA.private_jwk.clone().into(),
        pkcs1_public.as_str().into(),
    )
    .await;
}

#[tokio::test]
async fn test_ecdsa_signatures_are_fixed_width() {
    for (alg, width) in [("ES256", 64), ("ES384", 96), ("ES512", 132)] {
        let keys = support::key_pair_for(alg);
        let token = generate_token(
            payload(),
            SignOptions::new(alg).with_private_key(keys.private_pem.as_str()),
        )
        .await
        .unwrap();

        let signature = token.rsplit_once('.').unwrap().1;
        let raw = devkit_jwt::base64_url_decode_binary(signature).unwrap();
        assert_eq!(raw.len(), width, "{alg}");
    }
}

#[tokio::test]
async fn test_rsa_wrong_key_is_false() {
    let token = generate_token(
        payload(),
        SignOptions::new("RS256").with_private_key(support::RSA.private_pem.as_str()),
    )
    .await
    .unwrap();

    let valid = verify_token(
        token,
        VerifyOptions::new("RS256").with_public_key(support::RSA_OTHER.public_pem.as_str()),
    )
    .await
    .unwrap();
    assert!(!valid);
}

#[tokio::test]
async fn test_rs256_with_public_jwk_fails_with_key_format() {
    let error = generate_token(
        payload(),
        SignOptions::new("RS256").with_private_key(support::RSA.public_jwk.clone()),
    )
    .await
    .unwrap_err();

    assert!(matches!(error.root(), JwtError::KeyFormat(msg) if msg.contains("missing 'd'")));
}

#[tokio::test]
async fn test_ecdsa_curve_must_match_algorithm() {
    let error = generate_token(
        payload(),
        SignOptions::new("ES384").with_private_key(support::P256.private_jwk.clone()),
    )
    .await
    .unwrap_err();
    assert!(matches!(error.root(), JwtError::KeyFormat(msg) if msg.contains("P-384")));

    let error = generate_token(
        payload(),
        SignOptions::new("ES512").with_private_key(support::P256.private_pem.as_str()),
    )
    .await
    .unwrap_err();
    assert!(matches!(error.root(), JwtError::KeyFormat(_)));
}

#[tokio::test]
async fn test_ecdsa_public_jwk_cannot_sign() {
    let error = generate_token(
        payload(),
        SignOptions::new("ES256").with_private_key(support::P256.public_jwk.clone()),
    )
    .await
    .unwrap_err();
    assert!(matches!(error.root(), JwtError::KeyFormat(msg) if msg.contains("'d'")));
}

#[derive(Serialize)]
struct Claims {
    sub: String,
    admin: bool,
}

#[tokio::test]
async fn test_builder_defaults_to_hs256() {
    let claims = Claims {
        sub: "alice".into(),
        admin: true,
    };

    let token = Jwt::builder().with_secret("k1").sign(&claims).await.unwrap();
    let decoded = Jwt::builder().decode(&token).unwrap();
    assert_eq!(decoded.algorithm(), Some("HS256"));
    assert_eq!(decoded.payload["sub"], "alice");

    assert!(Jwt::builder().with_secret("k1").verify(token.as_str()).await.unwrap());
    assert!(!Jwt::builder().with_secret("k2").verify(token).await.unwrap());
}

#[tokio::test]
async fn test_builder_asymmetric_keys() {
    let keys = &*support::P256;
    let builder = Jwt::builder()
        .with_algorithm("ES256")
        .with_private_key(keys.private_pem.as_str())
        .with_public_key(keys.public_jwk.clone());

    let token = builder.sign(&json!({"scope": "read"})).await.unwrap();
    assert!(builder.verify(token).await.unwrap());
}

#[tokio::test]
async fn test_builder_rejects_non_object_claims() {
    let error = Jwt::builder()
        .with_secret("k1")
        .sign(&json!(["not", "an", "object"]))
        .await
        .unwrap_err();

    assert_eq!(error.operation(), Some(Operation::Generate));
    assert!(matches!(error.root(), JwtError::Serialization(_)));
}

#[tokio::test]
async fn test_engine_builder_shares_engine() {
    let engine = JwtEngine::new();
    let token = engine
        .builder()
        .with_algorithm("HS512")
        .with_secret("k1")
        .sign(&json!({"a": 1}))
        .await
        .unwrap();

    let valid = engine
        .verify_token(token, VerifyOptions::new("HS512").with_secret("k1"))
        .await
        .unwrap();
    assert!(valid);
}

#[test]
fn test_unicode_payload_roundtrip_through_signing() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        let mut claims = Map::new();
        claims.insert("name".into(), json!("日本語"));

        let token = generate_token(claims.clone(), SignOptions::new("HS256").with_secret("k1"))
            .await
            .unwrap();
        assert_eq!(decode_token(&token).unwrap().payload, claims);
    });
}

fn claims_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z]{1,6}", "\\PC{0,16}", 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_hmac_generate_then_verify(
        claims in claims_strategy(),
        alg in prop::sample::select(vec!["HS256", "HS384", "HS512"]),
        secret in "[ -~]{1,32}",
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (decoded, valid) = runtime.block_on(async {
            let token = generate_token(claims.clone(), SignOptions::new(alg).with_secret(&secret))
                .await
                .unwrap();
            let valid = verify_token(token.as_str(), VerifyOptions::new(alg).with_secret(&secret))
                .await
                .unwrap();
            (decode_token(&token).unwrap(), valid)
        });

        prop_assert!(valid);
        prop_assert_eq!(&decoded.payload, &claims);
        prop_assert_eq!(decoded.algorithm(), Some(alg));
    }
}
