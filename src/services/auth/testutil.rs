//! Shared fixtures for token tests: RSA key pairs, signed tokens, raw tokens.
//!
//! Key generation is expensive, so each key is minted once per test binary.

use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rsa::RsaPrivateKey;
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use serde::Serialize;
use serde_json::{Value, json};

use crate::services::auth::jwks::{JsonWebKey, KeySet, SigningKey};

pub const ISSUER: &str = "https://tenant.example.com/";
pub const AUDIENCE: &str = "https://chat.example.com/api";
pub const KID: &str = "key1";

pub struct TestKey {
    encoding_key: EncodingKey,
    n: String,
    e: String,
}

pub static PRIMARY_KEY: LazyLock<TestKey> = LazyLock::new(TestKey::generate);
pub static OTHER_KEY: LazyLock<TestKey> = LazyLock::new(TestKey::generate);

impl TestKey {
    fn generate() -> Self {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("rsa keygen");
        let pem = private
            .to_pkcs1_pem(LineEnding::LF)
            .expect("pkcs1 pem encoding");
        let encoding_key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("rsa encoding key");

        Self {
            encoding_key,
            n: URL_SAFE_NO_PAD.encode(private.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(private.e().to_bytes_be()),
        }
    }

    pub fn jwk(&self, kid: &str) -> JsonWebKey {
        JsonWebKey {
            kty: "RSA".into(),
            kid: Some(kid.into()),
            usage: Some("sig".into()),
            alg: Some("RS256".into()),
            n: Some(self.n.clone()),
            e: Some(self.e.clone()),
        }
    }

    pub fn signing_key(&self, kid: &str) -> SigningKey {
        KeySet {
            keys: vec![self.jwk(kid)],
        }
        .find_signing_key(kid)
        .expect("fixture key is usable")
    }

    pub fn sign(&self, kid: &str, claims: &impl Serialize) -> String {
        self.sign_with(Algorithm::RS256, Some(kid), claims)
    }

    pub fn sign_with(&self, alg: Algorithm, kid: Option<&str>, claims: &impl Serialize) -> String {
        let mut header = Header::new(alg);
        header.kid = kid.map(str::to_owned);
        jsonwebtoken::encode(&header, claims, &self.encoding_key).expect("sign test token")
    }
}

pub fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

/// Claims that pass validation against [`ISSUER`] / [`AUDIENCE`] for an hour.
pub fn valid_claims() -> Value {
    let now = now();
    json!({
        "iss": ISSUER,
        "sub": "auth0|user-1",
        "aud": [AUDIENCE, "https://tenant.example.com/userinfo"],
        "exp": now + 3600,
        "iat": now,
        "scope": "openid read:chats write:chats",
        "azp": "client-123",
    })
}

/// `valid_claims()` with some members replaced.
pub fn claims_with(overrides: Value) -> Value {
    let mut claims = valid_claims();
    if let (Some(base), Some(extra)) = (claims.as_object_mut(), overrides.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    claims
}

/// Unsigned `header.payload.` token for attack-shaped inputs (`alg: none`, ...).
pub fn craft_raw_jwt(header: &Value, payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header).expect("header json"));
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).expect("payload json"));
    format!("{header}.{payload}.")
}
