use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};

use crate::services::auth::error::AuthError;

/// A published key set (`{"keys": [...]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    pub keys: Vec<JsonWebKey>,
}

/// One entry of a published key set.
///
/// Only the members needed to verify RSA signatures are modeled; anything else
/// the provider publishes (`x5c`, `x5t`, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKey {
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

/// RSA public key material selected for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    pub kty: String,
    pub kid: String,
    pub usage: Option<String>,
    // base64url modulus / exponent, as published
    pub n: String,
    pub e: String,
}

impl KeySet {
    /// First entry whose `kid` equals `kid`, as long as it carries RSA
    /// material. Any later entry with the same `kid` is never consulted.
    pub fn find_signing_key(&self, kid: &str) -> Option<SigningKey> {
        let jwk = self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))?;
        SigningKey::from_jwk(jwk)
    }
}

impl SigningKey {
    fn from_jwk(jwk: &JsonWebKey) -> Option<Self> {
        if jwk.kty != "RSA" {
            return None;
        }

        Some(Self {
            kty: jwk.kty.clone(),
            kid: jwk.kid.clone()?,
            usage: jwk.usage.clone(),
            n: jwk.n.clone()?,
            e: jwk.e.clone()?,
        })
    }

    pub fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        Ok(DecodingKey::from_rsa_components(&self.n, &self.e)?)
    }
}
