//! Factory: build the bearer `TokenGuard` from application `AuthConfig`.
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::services::auth::access_jwt::TokenValidator;
use crate::services::auth::guard::TokenGuard;
use crate::services::auth::jwks::{CachePolicy, HttpKeySetSource, KeySetError, KeySetProvider};

pub fn build_token_guard(config: &AuthConfig) -> Result<Arc<TokenGuard>, KeySetError> {
    let source = HttpKeySetSource::new(config.jwks_url.clone(), config.jwks_fetch_timeout)?;
    let policy = CachePolicy {
        ttl: config.jwks_cache_ttl,
        min_refresh_interval: config.jwks_min_refresh,
    };

    let validator = TokenValidator::new(
        &config.issuer,
        &config.audience,
        config.algorithm,
        config.leeway_seconds,
    );

    Ok(Arc::new(TokenGuard::new(
        KeySetProvider::new(Arc::new(source), policy),
        validator,
    )))
}
