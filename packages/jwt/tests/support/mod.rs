//! Key fixtures generated once per test binary

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use once_cell::sync::Lazy;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::{Value, json};

/// Private and public halves of one key in every supported encoding
pub struct KeyPair {
    pub private_pem: String,
    pub public_pem: String,
    pub private_jwk: Value,
    pub public_jwk: Value,
}

fn b64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

static RSA_PRIVATE: Lazy<RsaPrivateKey> = Lazy::new(|| {
    RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).expect("generate RSA key")
});

pub static RSA: Lazy<KeyPair> = Lazy::new(|| {
    let private = &*RSA_PRIVATE;
    let public = RsaPublicKey::from(private);

    let public_jwk = json!({
        "kty": "RSA",
        "n": b64(&public.n().to_bytes_be()),
        "e": b64(&public.e().to_bytes_be()),
    });
    let mut private_jwk = public_jwk.clone();
    private_jwk["d"] = json!(b64(&private.d().to_bytes_be()));
    private_jwk["p"] = json!(b64(&private.primes()[0].to_bytes_be()));
    private_jwk["q"] = json!(b64(&private.primes()[1].to_bytes_be()));

    KeyPair {
        private_pem: rsa::pkcs8::EncodePrivateKey::to_pkcs8_pem(private, LineEnding::LF)
            .expect("encode RSA private key")
            .to_string(),
        public_pem: rsa::pkcs8::EncodePublicKey::to_public_key_pem(&public, LineEnding::LF)
            .expect("encode RSA public key"),
        private_jwk,
        public_jwk,
    }
});

/// The same RSA key as PKCS#1 (`RSA PRIVATE KEY` / `RSA PUBLIC KEY`) PEM
pub static RSA_PKCS1: Lazy<(String, String)> = Lazy::new(|| {
    let private = &*RSA_PRIVATE;
    let public = RsaPublicKey::from(private);
    (
        private
            .to_pkcs1_pem(LineEnding::LF)
            .expect("encode PKCS#1 private key")
            .to_string(),
        public
            .to_pkcs1_pem(LineEnding::LF)
            .expect("encode PKCS#1 public key"),
    )
});

/// Second RSA key, for wrong-key checks
pub static RSA_OTHER: Lazy<KeyPair> = Lazy::new(|| {
    let private =
        RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).expect("generate RSA key");
    let public = RsaPublicKey::from(&private);
    KeyPair {
        private_pem: rsa::pkcs8::EncodePrivateKey::to_pkcs8_pem(&private, LineEnding::LF)
            .expect("encode RSA private key")
            .to_string(),
        public_pem: rsa::pkcs8::EncodePublicKey::to_public_key_pem(&public, LineEnding::LF)
            .expect("encode RSA public key"),
        private_jwk: Value::Null,
        public_jwk: Value::Null,
    }
});

macro_rules! ec_key_pair {
    ($curve:ident, $crv:literal) => {{
        let secret = $curve::SecretKey::random(&mut p256::elliptic_curve::rand_core::OsRng);
        let public = secret.public_key();
        let point = public.to_encoded_point(false);

        let public_jwk = json!({
            "kty": "EC",
            "crv": $crv,
            "x": b64(point.x().expect("x coordinate")),
            "y": b64(point.y().expect("y coordinate")),
        });
        let mut private_jwk = public_jwk.clone();
        private_jwk["d"] = json!(b64(&secret.to_bytes()));

        KeyPair {
            private_pem: secret
                .to_pkcs8_pem(LineEnding::LF)
                .expect("encode EC private key")
                .to_string(),
            public_pem: public
                .to_public_key_pem(LineEnding::LF)
                .expect("encode EC public key"),
            private_jwk,
            public_jwk,
        }
    }};
}

pub static P256: Lazy<KeyPair> = Lazy::new(|| ec_key_pair!(p256, "P-256"));
pub static P384: Lazy<KeyPair> = Lazy::new(|| ec_key_pair!(p384, "P-384"));
pub static P521: Lazy<KeyPair> = Lazy::new(|| ec_key_pair!(p521, "P-521"));

/// Key pair matching an RS*/ES* algorithm name
pub fn key_pair_for(algorithm: &str) -> &'static KeyPair {
    match algorithm {
        "RS256" | "RS384" | "RS512" => &RSA,
        "ES256" => &P256,
        "ES384" => &P384,
        "ES512" => &P521,
        other => panic!("no key pair for {other}"),
    }
}
