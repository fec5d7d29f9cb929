//! Authentication failure taxonomy.
//!
//! Every way the bearer pipeline can fail ends up as exactly one [`AuthError`].
//! The HTTP mapping (status + JSON body) lives in `crate::error`.

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::services::auth::jwks::KeySetError;

/// Why an `Authorization` header or the token inside it was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidHeader {
    MissingBearerScheme,
    TokenNotFound,
    NotBearerToken,
    UnparsableToken,
}

impl InvalidHeader {
    pub fn description(self) -> &'static str {
        match self {
            Self::MissingBearerScheme => "Authorization header must start with Bearer",
            Self::TokenNotFound => "Token not found",
            Self::NotBearerToken => "Authorization header must be Bearer token",
            Self::UnparsableToken => "Unable to parse authentication token.",
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected")]
    AuthorizationHeaderMissing,

    #[error("{}", .0.description())]
    InvalidHeader(InvalidHeader),

    #[error("token is expired")]
    TokenExpired,

    #[error("incorrect claims, please check the audience and issuer")]
    InvalidClaims,

    // Reported to callers as `invalid_header`.
    #[error("Unable to find appropriate key")]
    KeyNotFound { kid: Option<String> },

    #[error("missing required scope: {required}")]
    InsufficientScope { required: String },

    // Shared: one failed fetch answers every caller that was waiting on it.
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(#[source] Arc<KeySetError>),
}

impl AuthError {
    pub fn invalid_header(reason: InvalidHeader) -> Self {
        Self::InvalidHeader(reason)
    }

    /// Stable machine-readable code for the response payload.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthorizationHeaderMissing => "authorization_header_missing",
            Self::InvalidHeader(_) | Self::KeyNotFound { .. } => "invalid_header",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::InsufficientScope { .. } => "insufficient_scope",
            Self::ProviderUnavailable(_) => "provider_unavailable",
        }
    }

    /// Human-readable description for the response payload.
    ///
    /// Unlike `Display`, this never includes provider or transport details.
    pub fn description(&self) -> String {
        match self {
            Self::InsufficientScope { .. } => "You don't have access to this resource".to_string(),
            Self::ProviderUnavailable(_) => {
                "Unable to verify token: identity provider unavailable".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            ErrorKind::InvalidAudience
            | ErrorKind::InvalidIssuer
            | ErrorKind::ImmatureSignature
            | ErrorKind::MissingRequiredClaim(_) => Self::InvalidClaims,
            _ => Self::InvalidHeader(InvalidHeader::UnparsableToken),
        }
    }
}
