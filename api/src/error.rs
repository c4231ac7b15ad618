//! Unified error types for the CineDash server
//!
//! This module defines error types for each layer:
//! - `ConfigError`: Environment configuration errors (startup only)
//! - `DomainError`: Core business logic errors
//! - `TmdbError`: TMDB API client errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Configuration errors raised while loading the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// TMDB API client errors
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid API key or token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("TMDB error: {0}")]
    Tmdb(#[from] TmdbError),

    /// Proxy request without a movie id
    #[error("Missing id")]
    MissingId,

    /// Proxy upstream failure of any kind
    #[error("Not found")]
    UpstreamNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl AppError {
    /// Status code and public message for this error
    ///
    /// Shared by the JSON and HTML renderings so both agree on the status.
    pub fn status_and_message(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::MissingId => (StatusCode::BAD_REQUEST, "Missing id", None),
            AppError::UpstreamNotFound => (StatusCode::NOT_FOUND, "Not found", None),
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Tmdb(e) => {
                tracing::error!("TMDB error: {}", e);
                match e {
                    TmdbError::Api { status: 404, .. } => {
                        (StatusCode::NOT_FOUND, "Movie not found", None)
                    }
                    TmdbError::RateLimited => {
                        (StatusCode::TOO_MANY_REQUESTS, "Rate limited", None)
                    }
                    _ => (StatusCode::BAD_GATEWAY, "Movie service error", None),
                }
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        }
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.status_and_message();

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_id_has_fixed_body() {
        let (status, body) = body_json(AppError::MissingId).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Missing id" }));
    }

    #[tokio::test]
    async fn upstream_not_found_has_fixed_body() {
        let (status, body) = body_json(AppError::UpstreamNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn tmdb_rate_limit_maps_to_429() {
        let (status, _) = body_json(AppError::Tmdb(TmdbError::RateLimited)).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn internal_details_are_not_leaked() {
        let (status, body) = body_json(AppError::Internal("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("details").is_none());
    }
}
