//! CineDash server binary

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinedash_api::adapters::{InMemoryProfileRepository, InMemorySessionRepository, TmdbClientImpl};
use cinedash_api::config::Config;
use cinedash_api::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cinedash_api=debug,cinedash=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CineDash...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Create adapters
    let tmdb = Arc::new(TmdbClientImpl::new(
        config.tmdb_api_url.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_access_token.clone(),
    ));
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());

    let port = config.port;
    let state = AppState::new(config, tmdb, profiles, sessions)
        .context("Failed to build application state")?;
    tracing::info!(
        admin = %state.auth_service.admin().username,
        "Admin account configured"
    );

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
