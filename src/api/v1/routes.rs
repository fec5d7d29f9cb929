/*
 * Responsibility
 * - v1 URL layout
 * - Decide which routes sit behind which guard (route_layer)
 *   - /health, /public: none
 *   - /private: bearer token
 *   - /private-scoped: bearer token + read:messages
 *   - /session/profile: session
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    health::health,
    messages::{READ_MESSAGES_SCOPE, private, private_scoped, public},
    session::profile,
};
use crate::middleware::auth::{access, scope, session};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let scoped = scope::require(
        Router::new().route("/private-scoped", get(private_scoped)),
        READ_MESSAGES_SCOPE,
    );
    let bearer = access::apply(
        Router::new().route("/private", get(private)).merge(scoped),
        state,
    );

    let logged_in = session::apply(Router::new().route("/session/profile", get(profile)));

    Router::new()
        .route("/health", get(health))
        .route("/public", get(public))
        .merge(bearer)
        .merge(logged_in)
}
