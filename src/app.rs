/*
 * Responsibility
 * - Load config, build the identity provider and access registry, assemble the Router
 * - Apply middleware (access, then CORS, then HTTP)
 * - Start axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::services::access::AccessPolicyDispatcher;
use crate::services::identity::build_identity_provider;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins; e.g. RUST_LOG=info,access_gate=debug,tower_http=debug
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
    let config = Config::from_env().context("invalid configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting access gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)
        .await
        .context("failed to build application state")?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState, AppError> {
    let provider = build_identity_provider(config).await?;
    let registry = api::v1::access_registry();

    tracing::info!(
        backend = provider.backend_name(),
        operations = registry.len(),
        "access policy ready"
    );

    let access = Arc::new(AccessPolicyDispatcher::new(registry, provider));
    Ok(AppState::new(access))
}

/// Routes plus the access layer, without transport middleware.
///
/// Everything under `/api/v1` goes through the access middleware;
/// `/health` is added afterwards and stays outside it.
pub fn router(state: AppState) -> Router {
    let gated = Router::new().nest(api::v1::PREFIX, api::v1::routes());

    middleware::auth::access::apply(gated, state.clone())
        .route("/health", get(health))
        .with_state(state)
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = router(state);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
