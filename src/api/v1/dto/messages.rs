/*
 * Responsibility
 * - Response DTOs for the public / private message endpoints
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PrivateMessageResponse {
    pub message: &'static str,
    pub sub: Option<String>,
    pub scopes: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
