//! Guards applied with `route_layer` to the routes that need them.
//!
//! - `access`: bearer token → `ValidatedClaims` in request extensions
//! - `scope`: requires a granted scope (after `access`)
//! - `session`: requires a logged-in browser session

pub mod access;
pub mod scope;
pub mod session;
