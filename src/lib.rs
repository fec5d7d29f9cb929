/*
 * Responsibility
 * - Module tree (shared by the binary and integration tests)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
