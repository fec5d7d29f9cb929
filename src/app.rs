/*
 * Responsibility
 * - Tracing / panic hook setup
 * - Config → dependencies (token guard, OAuth client) → Router
 * - Router-level middleware (security headers, CORS, HTTP stack)
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_token_guard;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins, e.g. RUST_LOG=info,resource_guard=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash loudly. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        issuer = %config.auth.issuer,
        jwks = %config.auth.jwks_url,
        algorithm = ?config.auth.algorithm,
        oauth_client = %config.oauth.client_id,
        "starting resource-guard"
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    axum::serve(listener, app).await.context("serve")?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    let guard = build_token_guard(&config.auth).context("build key-set client")?;
    Ok(AppState::new(guard))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
