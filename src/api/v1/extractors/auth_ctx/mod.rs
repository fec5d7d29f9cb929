/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the claims verified by the access guard to handlers (AuthCtx)
 * - axum wiring lives in core, the type in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
