//! Bearer token verification → `ValidatedClaims` in request extensions.
//!
//! The token guard runs inline in the request task. On rejection the inner
//! handler is never called and nothing is attached to the request.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::GuardRejection;
use crate::state::AppState;

/// Require a valid bearer token on every route of `router`.
///
/// ```ignore
/// let private = Router::new().route("/private", get(private));
/// let private = middleware::auth::access::apply(private, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, GuardRejection> {
    let claims = match state.guard.authenticate_headers(req.headers()).await {
        Ok(claims) => claims,
        Err(rejection) => {
            tracing::warn!(
                stage = %rejection.stage,
                code = rejection.error.code(),
                error = ?rejection.error,
                "access token rejected"
            );
            return Err(rejection);
        }
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
