/*
 * Responsibility
 * - The authenticated context as handlers see it
 * - Signature / claim verification is done before this type exists (middleware + services)
 */
use chrono::{DateTime, Utc};

use crate::services::auth::ValidatedClaims;

#[derive(Debug, Clone)]
pub struct AuthCtx {
    claims: ValidatedClaims,
}

impl AuthCtx {
    pub fn new(claims: ValidatedClaims) -> Self {
        Self { claims }
    }

    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }

    pub fn scopes(&self) -> Vec<String> {
        self.claims.scopes().map(str::to_owned).collect()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }
}
