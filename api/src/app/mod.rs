//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the UI helpers.

pub mod auth_service;
pub mod browse_service;
pub mod profile_service;

pub use auth_service::{hash_session_token, AuthService, SESSION_TTL};
pub use browse_service::{BrowsePage, BrowseService, MoviePage, TMDB_MAX_PAGE};
pub use profile_service::{
    mock_profile, FieldErrors, NotificationsForm, ProfileForm, ProfileService,
};
