//! `Authorization: Bearer <token>` parsing.

use axum::http::{HeaderMap, header};

use crate::services::auth::error::{AuthError, InvalidHeader};

/// The `Authorization` header as text, if present.
///
/// A value with bytes outside visible ASCII cannot carry a compact JWT.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .map(|v| {
            v.to_str()
                .map_err(|_| AuthError::invalid_header(InvalidHeader::UnparsableToken))
        })
        .transpose()
}

/// Returns the bare token from an `Authorization` header value.
///
/// The scheme check runs before the part-count checks, so `Basic a b c` is
/// reported as a wrong scheme rather than too many parts.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header
        .filter(|h| !h.trim().is_empty())
        .ok_or(AuthError::AuthorizationHeaderMissing)?;

    let mut parts = header.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::AuthorizationHeaderMissing)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::invalid_header(InvalidHeader::MissingBearerScheme));
    }

    let token = parts
        .next()
        .ok_or(AuthError::invalid_header(InvalidHeader::TokenNotFound))?;

    if parts.next().is_some() {
        return Err(AuthError::invalid_header(InvalidHeader::NotBearerToken));
    }

    Ok(token)
}
