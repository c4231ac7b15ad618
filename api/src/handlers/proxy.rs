//! TMDB proxy handlers
//!
//! Thin JSON pass-through in front of TMDB.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::AppState;

/// GET /api/tmdb/movie/:id
///
/// Relays TMDB's `/movie/{id}` body byte for byte. Any upstream failure is
/// reported as not found, whatever its cause.
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::MissingId);
    }

    match state.tmdb.movie_raw(id).await {
        Ok(body) => Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response()),
        Err(e) => {
            tracing::warn!(movie_id = %id, error = %e, "TMDB proxy request failed");
            Err(AppError::UpstreamNotFound)
        }
    }
}

/// GET /api/tmdb/movie
pub async fn missing_id() -> AppError {
    AppError::MissingId
}
