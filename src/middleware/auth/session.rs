//! Session guard: the request must carry a logged-in `Session`.
//!
//! The session itself is populated by the external login collaborator; this
//! guard only looks for the profile marker and never redirects.

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::SessionRejection;
use crate::services::session::Session;
use crate::state::AppState;

pub fn apply(router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn(session_middleware))
}

async fn session_middleware(req: Request<Body>, next: Next) -> Result<Response, SessionRejection> {
    let logged_in = req
        .extensions()
        .get::<Session>()
        .is_some_and(Session::has_profile);

    if !logged_in {
        tracing::warn!(uri = %req.uri(), "session has no profile");
        return Err(SessionRejection);
    }

    Ok(next.run(req).await)
}
