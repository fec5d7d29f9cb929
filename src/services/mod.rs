/*
 * Responsibility
 * - Domain services (no HTTP routing here)
 * - auth: bearer-token pipeline, session: session-guard boundary type
 */
pub mod auth;
pub mod session;
