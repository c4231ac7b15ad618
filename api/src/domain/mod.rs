//! Domain layer
//!
//! Contains pure business logic with no HTTP or storage dependencies.
//! - `entities`: Domain models (movies, pagination, profiles, sessions)
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
