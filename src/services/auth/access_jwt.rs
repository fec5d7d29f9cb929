use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::services::auth::error::AuthError;
use crate::services::auth::jwks::SigningKey;

/// `aud` may be a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Self::Single(aud) => aud == audience,
            Self::Many(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

/// Claims of an access token whose signature, issuer, audience and expiry
/// have been verified.
///
/// Only `TokenValidator` hands these out. Custom claims are kept verbatim in
/// `extra`, so serializing a value reproduces the claims set that was signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedClaims {
    pub iss: String,
    pub aud: Audience,
    pub exp: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<u64>,

    // Space-delimited granted scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidatedClaims {
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.as_deref().unwrap_or_default().split_whitespace()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.exp)
            .ok()
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// Access-token verifier for a single RSA signing algorithm.
///
/// `jsonwebtoken::Validation` checks:
/// - the header `alg` equals the configured one (no algorithm substitution)
/// - the signature against the resolved provider key
/// - `exp` / `nbf` with leeway
/// - `iss` and `aud` against the configured values
#[derive(Clone)]
pub struct TokenValidator {
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithms", &self.validation.algorithms)
            .field("iss", &self.validation.iss)
            .field("aud", &self.validation.aud)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenValidator {
    pub fn new(issuer: &str, audience: &str, algorithm: Algorithm, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Self { validation }
    }

    /// Verify `token` against `key` and return its claims.
    ///
    /// A token missing `iss`, `aud` or `exp` cannot be decoded into
    /// [`ValidatedClaims`] and is reported as an unparsable token.
    pub fn validate(&self, token: &str, key: &SigningKey) -> Result<ValidatedClaims, AuthError> {
        let decoding_key = key.decoding_key()?;
        let data = jsonwebtoken::decode::<ValidatedClaims>(token, &decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
