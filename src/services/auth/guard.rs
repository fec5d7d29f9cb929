//! Bearer-token guard: the pipeline a protected request runs through.
//!
//! ```text
//! Unauthenticated → Extracting → ResolvingKey → Validating → Authenticated
//!                        └────────────┴─────────────┴──→ Rejected
//! ```
//!
//! Each stage either advances or stops the pipeline; a [`GuardRejection`]
//! records where it stopped. HTTP wiring lives in `middleware::auth::access`.
use std::fmt;

use axum::http::HeaderMap;
use thiserror::Error;

use crate::services::auth::access_jwt::{TokenValidator, ValidatedClaims};
use crate::services::auth::bearer::{authorization_header, extract_bearer_token};
use crate::services::auth::error::{AuthError, InvalidHeader};
use crate::services::auth::jwks::KeySetProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStage {
    Unauthenticated,
    Extracting,
    ResolvingKey,
    Validating,
    Authenticated,
    Rejected,
}

impl fmt::Display for GuardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Extracting => "extracting",
            Self::ResolvingKey => "resolving_key",
            Self::Validating => "validating",
            Self::Authenticated => "authenticated",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Terminal `Rejected` state: the stage that failed and why.
#[derive(Debug, Error)]
#[error("rejected while {stage}: {error}")]
pub struct GuardRejection {
    pub stage: GuardStage,
    #[source]
    pub error: AuthError,
}

impl GuardRejection {
    pub fn new(stage: GuardStage, error: AuthError) -> Self {
        Self { stage, error }
    }
}

// Every failing stage ends the pipeline in `Rejected`.
fn reject(failed: GuardStage, error: AuthError) -> GuardRejection {
    tracing::trace!(from = %failed, to = %GuardStage::Rejected, "guard stop");
    GuardRejection::new(failed, error)
}

#[derive(Debug)]
pub struct TokenGuard {
    keys: KeySetProvider,
    validator: TokenValidator,
}

impl TokenGuard {
    pub fn new(keys: KeySetProvider, validator: TokenValidator) -> Self {
        Self { keys, validator }
    }

    /// Authenticate a request from its headers.
    pub async fn authenticate_headers(
        &self,
        headers: &HeaderMap,
    ) -> Result<ValidatedClaims, GuardRejection> {
        let authorization = authorization_header(headers)
            .map_err(|e| reject(GuardStage::Extracting, e))?;
        self.authenticate(authorization).await
    }

    /// Authenticate a request from its raw `Authorization` header value.
    ///
    /// Nothing is produced unless every stage succeeds.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<ValidatedClaims, GuardRejection> {
        let mut stage = GuardStage::Unauthenticated;
        tracing::trace!(%stage, "guard start");

        stage = GuardStage::Extracting;
        let token = extract_bearer_token(authorization).map_err(|e| reject(stage, e))?;

        stage = GuardStage::ResolvingKey;
        let header = jsonwebtoken::decode_header(token)
            .map_err(|_| reject(stage, AuthError::invalid_header(InvalidHeader::UnparsableToken)))?;
        let key = self
            .keys
            .signing_key(header.kid.as_deref())
            .await
            .map_err(|e| reject(stage, e))?;

        stage = GuardStage::Validating;
        let claims = self
            .validator
            .validate(token, &key)
            .map_err(|e| reject(stage, e))?;

        stage = GuardStage::Authenticated;
        tracing::debug!(%stage, sub = claims.subject(), "bearer token accepted");
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use jsonwebtoken::Algorithm;
    use serde_json::json;

    use super::*;
    use crate::services::auth::jwks::{CachePolicy, KeySet, KeySetError, KeySetSource};
    use crate::services::auth::testutil::{
        AUDIENCE, ISSUER, KID, PRIMARY_KEY, claims_with, craft_raw_jwt, now, valid_claims,
    };

    struct StaticSource {
        keys: KeySet,
        down: AtomicBool,
    }

    #[async_trait]
    impl KeySetSource for StaticSource {
        fn describe(&self) -> &str {
            "static"
        }

        async fn fetch(&self) -> Result<KeySet, KeySetError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(KeySetError::Status(StatusCode::SERVICE_UNAVAILABLE));
            }
            Ok(self.keys.clone())
        }
    }

    fn guard_with(down: bool) -> TokenGuard {
        let source = StaticSource {
            keys: KeySet {
                keys: vec![PRIMARY_KEY.jwk(KID)],
            },
            down: AtomicBool::new(down),
        };
        TokenGuard::new(
            KeySetProvider::new(Arc::new(source), CachePolicy::default()),
            TokenValidator::new(ISSUER, AUDIENCE, Algorithm::RS256, 60),
        )
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    #[tokio::test]
    async fn valid_token_is_authenticated() {
        let token = PRIMARY_KEY.sign(KID, &valid_claims());
        let claims = guard_with(false)
            .authenticate(Some(&bearer(&token)))
            .await
            .unwrap();

        assert_eq!(claims.subject(), Some("auth0|user-1"));
    }

    #[tokio::test]
    async fn missing_header_stops_while_extracting() {
        let rejection = guard_with(false).authenticate(None).await.unwrap_err();

        assert_eq!(rejection.stage, GuardStage::Extracting);
        assert!(matches!(
            rejection.error,
            AuthError::AuthorizationHeaderMissing
        ));
    }

    #[tokio::test]
    async fn basic_scheme_stops_while_extracting() {
        let rejection = guard_with(false)
            .authenticate(Some("Basic xyz"))
            .await
            .unwrap_err();

        assert_eq!(rejection.stage, GuardStage::Extracting);
        assert!(matches!(
            rejection.error,
            AuthError::InvalidHeader(InvalidHeader::MissingBearerScheme)
        ));
    }

    #[tokio::test]
    async fn undecodable_token_stops_while_resolving_key() {
        let rejection = guard_with(false)
            .authenticate(Some("Bearer not-a-jwt"))
            .await
            .unwrap_err();

        assert_eq!(rejection.stage, GuardStage::ResolvingKey);
        assert!(matches!(
            rejection.error,
            AuthError::InvalidHeader(InvalidHeader::UnparsableToken)
        ));
    }

    #[tokio::test]
    async fn unknown_kid_is_key_not_found() {
        let token = PRIMARY_KEY.sign("rotated-away", &valid_claims());
        let rejection = guard_with(false)
            .authenticate(Some(&bearer(&token)))
            .await
            .unwrap_err();

        assert_eq!(rejection.stage, GuardStage::ResolvingKey);
        assert!(matches!(rejection.error, AuthError::KeyNotFound { .. }));
    }

    #[tokio::test]
    async fn token_without_kid_is_key_not_found() {
        let token = PRIMARY_KEY.sign_with(Algorithm::RS256, None, &valid_claims());
        let rejection = guard_with(false)
            .authenticate(Some(&bearer(&token)))
            .await
            .unwrap_err();

        assert!(matches!(
            rejection.error,
            AuthError::KeyNotFound { kid: None }
        ));
    }

    #[tokio::test]
    async fn provider_outage_is_not_reported_as_missing_key() {
        let token = PRIMARY_KEY.sign(KID, &valid_claims());
        let rejection = guard_with(true)
            .authenticate(Some(&bearer(&token)))
            .await
            .unwrap_err();

        assert_eq!(rejection.stage, GuardStage::ResolvingKey);
        assert!(matches!(rejection.error, AuthError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn expired_token_stops_while_validating() {
        let token = PRIMARY_KEY.sign(KID, &claims_with(json!({"exp": now() - 600})));
        let rejection = guard_with(false)
            .authenticate(Some(&bearer(&token)))
            .await
            .unwrap_err();

        assert_eq!(rejection.stage, GuardStage::Validating);
        assert!(matches!(rejection.error, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn alg_none_token_is_rejected() {
        let token = craft_raw_jwt(&json!({"alg": "none", "kid": KID}), &valid_claims());
        let rejection = guard_with(false)
            .authenticate(Some(&bearer(&token)))
            .await
            .unwrap_err();

        assert!(matches!(
            rejection.error,
            AuthError::InvalidHeader(InvalidHeader::UnparsableToken)
        ));
    }

    #[test]
    fn stage_names_are_snake_case() {
        let names: Vec<String> = [
            GuardStage::Unauthenticated,
            GuardStage::Extracting,
            GuardStage::ResolvingKey,
            GuardStage::Validating,
            GuardStage::Authenticated,
            GuardStage::Rejected,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(
            names,
            [
                "unauthenticated",
                "extracting",
                "resolving_key",
                "validating",
                "authenticated",
                "rejected"
            ]
        );
    }

    #[test]
    fn rejection_display_names_stage() {
        let rejection = GuardRejection::new(GuardStage::Validating, AuthError::TokenExpired);
        assert_eq!(
            rejection.to_string(),
            "rejected while validating: token is expired"
        );
    }
}
