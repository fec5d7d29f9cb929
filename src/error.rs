/*
 * Responsibility
 * - Map authentication failures to HTTP responses (status + JSON body)
 * - Keep provider / transport detail out of the body (it goes to the logs)
 * - Session-guard failure payload
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::services::auth::{AuthError, GuardRejection};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: &'static str,
    pub description: String,
}

impl AuthError {
    /// Status and payload for this failure. Same error, same response.
    pub fn report(&self) -> (StatusCode, ErrorBody) {
        (
            self.status(),
            ErrorBody {
                code: self.code(),
                description: self.description(),
            },
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = self.report();
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        self.error.into_response()
    }
}

#[derive(Debug, Serialize)]
struct SessionFailureBody {
    success: bool,
    error: &'static str,
}

/// The session guard's "not logged in" answer.
///
/// Reported in-band with status 200; browser clients check `success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRejection;

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let body = SessionFailureBody {
            success: false,
            error: "Authentication failure",
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}
