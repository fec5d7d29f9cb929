/*!
 * Identity-provider key sets (JWKS)
 *
 * Responsibility:
 * - fetch the provider's published signing keys (source)
 * - cache them process-wide and pick the key for a token's `kid` (provider)
 * - wire types for the `{"keys": [...]}` payload (types)
 */

mod provider;
mod source;
mod types;

pub use provider::{CachePolicy, DEFAULT_CACHE_TTL, DEFAULT_MIN_REFRESH_INTERVAL, KeySetProvider};
pub use source::{HttpKeySetSource, KeySetError, KeySetSource};
pub use types::{JsonWebKey, KeySet, SigningKey};
