//! Per-route scope requirement. Must sit inside `access`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::{AuthError, ValidatedClaims, has_scope};
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
struct RequiredScope(&'static str);

/// Reject requests to `router` whose token does not grant `scope`.
pub fn require(router: Router<AppState>, scope: &'static str) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        RequiredScope(scope),
        scope_middleware,
    ))
}

async fn scope_middleware(
    State(RequiredScope(scope)): State<RequiredScope>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    // No claims means the access guard was not applied; treat as not granted.
    let granted = req
        .extensions()
        .get::<ValidatedClaims>()
        .is_some_and(|claims| has_scope(claims, scope));

    if !granted {
        tracing::warn!(required = scope, "required scope not granted");
        return Err(AuthError::InsufficientScope {
            required: scope.to_string(),
        });
    }

    Ok(next.run(req).await)
}
