//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod memory;
pub mod tmdb;

pub use memory::{InMemoryProfileRepository, InMemorySessionRepository};
pub use tmdb::TmdbClientImpl;
