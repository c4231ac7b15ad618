//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;
pub mod tmdb;

pub use repositories::{ProfileRepository, SessionRepository};
pub use tmdb::{DiscoverParams, TmdbClient};
