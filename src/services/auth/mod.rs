/*!
 * Bearer-token authentication against an external identity provider
 *
 * Responsibility:
 * - pull the token out of the Authorization header (bearer)
 * - resolve the provider's signing key by `kid` (jwks)
 * - verify signature and standard claims (access_jwt)
 * - check granted scopes (scope)
 * - run the above as one stage machine (guard)
 */

pub mod access_jwt;
pub mod bearer;
pub mod error;
pub mod factory;
pub mod guard;
pub mod jwks;
pub mod scope;

#[cfg(test)]
pub(crate) mod testutil;

pub use access_jwt::{Audience, TokenValidator, ValidatedClaims};
pub use error::{AuthError, InvalidHeader};
pub use factory::build_token_guard;
pub use guard::{GuardRejection, GuardStage, TokenGuard};
pub use scope::has_scope;
