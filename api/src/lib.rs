//! CineDash server
//!
//! Server-rendered movie dashboard backed by TMDB, plus a thin JSON proxy
//! in front of the TMDB movie endpoint. Uses hexagonal (ports & adapters)
//! architecture: services depend on port traits, adapters implement them.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod adapters;
pub mod app;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod ui;

#[cfg(test)]
mod test_utils;


use app::{AuthService, BrowseService, ProfileService};
use config::Config;
use domain::ports::{ProfileRepository, SessionRepository, TmdbClient};
use error::AppError;
use ui::{Renderer, SiteInfo};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub browse_service: Arc<BrowseService>,
    pub profile_service: Arc<ProfileService>,
    pub auth_service: Arc<AuthService>,
    pub tmdb: Arc<dyn TmdbClient>,
    pub renderer: Arc<Renderer>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        tmdb: Arc<dyn TmdbClient>,
        profiles: Arc<dyn ProfileRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Result<Self, AppError> {
        let renderer = Renderer::new(SiteInfo {
            image_base_url: config.tmdb_image_url.clone(),
            api_base_url: config.api_base_url.clone(),
        })?;

        let auth_service = AuthService::new(
            sessions,
            &config.admin_username,
            &config.admin_password,
            &config.session_secret,
        )?;

        Ok(Self {
            browse_service: Arc::new(BrowseService::new(tmdb.clone())),
            profile_service: Arc::new(ProfileService::new(profiles)),
            auth_service: Arc::new(auth_service),
            tmdb,
            renderer: Arc::new(renderer),
            config,
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full router
///
/// Login rate limiting keys on the peer IP, so the server must be run
/// with `into_make_service_with_connect_info::<SocketAddr>()` when it is on.
pub fn build_router(state: AppState) -> Router {
    let mut login_routes = Router::new().route("/login", get(handlers::login_page).post(handlers::login));

    if state.config.login_rate_limit {
        // 2 req/sec sustained, burst of 5
        match GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
        {
            Some(governor_config) => {
                login_routes = login_routes.layer(GovernorLayer {
                    config: Arc::new(governor_config),
                });
            }
            None => tracing::warn!("Invalid login rate limit config, rate limiting disabled"),
        }
    }

    // Dashboard pages (session required)
    let dashboard_routes = Router::new()
        .route("/dashboard", get(handlers::overview))
        .route("/dashboard/movies", get(handlers::browse))
        .route("/dashboard/movies/:id", get(handlers::movie_detail))
        .route(
            "/dashboard/profile",
            get(handlers::profile_page).post(handlers::update_profile),
        )
        .route(
            "/dashboard/profile/notifications",
            post(handlers::update_notifications),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .route("/", get(handlers::index))
        // TMDB proxy (no auth)
        .route("/api/tmdb/movie", get(handlers::proxy_missing_id))
        .route("/api/tmdb/movie/", get(handlers::proxy_missing_id))
        .route("/api/tmdb/movie/:id", get(handlers::proxy_movie))
        .route("/api/movies", get(handlers::list_movies))
        .route(
            "/logout",
            get(handlers::logout).post(handlers::logout),
        )
        .merge(login_routes)
        .merge(dashboard_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
