use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::auth::ValidatedClaims;
use crate::state::AppState;

use super::AuthCtx;

/// Extractor for handlers behind `middleware::auth::access`.
///
/// Responds 401 when no claims are attached (route mounted without the guard).
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ValidatedClaims>()
            .cloned()
            .map(|claims| AuthCtxExtractor(AuthCtx::new(claims)))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
