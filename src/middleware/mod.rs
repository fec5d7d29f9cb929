/*
 * Responsibility
 * - Router-level middleware
 * - http: request id / tracing / limits, cors, security_headers
 * - auth: bearer guard, session guard, per-route scope check
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
