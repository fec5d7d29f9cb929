/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - guard: bearer-token pipeline incl. the process-wide key-set cache
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::services::auth::TokenGuard;

#[derive(Clone, Debug)]
pub struct AppState {
    pub guard: Arc<TokenGuard>,
}

impl AppState {
    pub fn new(guard: Arc<TokenGuard>) -> Self {
        Self { guard }
    }
}
