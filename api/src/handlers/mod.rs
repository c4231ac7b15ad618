//! HTTP handlers
//!
//! Axum request handlers for the proxy API and the server-rendered pages.

pub mod auth;
pub mod dashboard;
pub mod movies;
pub mod profile;
pub mod proxy;

use axum::response::{Html, IntoResponse, Response};

use crate::error::AppError;
use crate::AppState;

pub use auth::{login, login_page, logout};
pub use dashboard::{index, overview};
pub use movies::{browse, list_movies, movie_detail};
pub use profile::{profile_page, update_notifications, update_profile};
pub use proxy::{get_movie as proxy_movie, missing_id as proxy_missing_id};

/// Turn a page result into a response, rendering errors as HTML
pub(crate) fn page(state: &AppState, result: Result<Html<String>, AppError>) -> Response {
    match result {
        Ok(html) => html.into_response(),
        Err(e) => {
            let (status, message, _) = e.status_and_message();
            (status, state.renderer.render_error(status.as_u16(), message)).into_response()
        }
    }
}
