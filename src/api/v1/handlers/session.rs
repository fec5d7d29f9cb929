/*
 * Responsibility
 * - GET /session/profile (behind the session guard)
 */
use axum::{Extension, Json};
use serde_json::{Value, json};

use crate::services::session::Session;

pub async fn profile(Extension(session): Extension<Session>) -> Json<Value> {
    Json(json!({
        "success": true,
        "profile": session.profile().cloned().unwrap_or(Value::Null),
    }))
}
