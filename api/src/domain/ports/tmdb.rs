//! TMDB client port trait
//!
//! Defines the interface for reading movie metadata from TMDB.

use async_trait::async_trait;

use crate::domain::entities::{MovieCredits, MovieDetails, MovieSummary, TmdbPage};
use crate::error::TmdbError;

/// Parameters for `/discover/movie`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverParams {
    /// TMDB `sort_by` value, e.g. `popularity.desc`
    pub sort_by: String,
    /// Minimum runtime in minutes (`with_runtime.gte`)
    pub min_runtime: u32,
    /// Maximum runtime in minutes (`with_runtime.lte`)
    pub max_runtime: u32,
    /// 1-based TMDB page
    pub page: u32,
}

/// Client for the TMDB v3 REST API
#[async_trait]
pub trait TmdbClient: Send + Sync {
    /// Fetch the `/movie/{id}` body exactly as TMDB sent it
    ///
    /// The bytes are checked to be well-formed JSON but never re-encoded,
    /// so key order and number formatting survive.
    async fn movie_raw(&self, id: &str) -> Result<Vec<u8>, TmdbError>;

    /// Fetch `/movie/{id}` as typed details
    async fn movie_details(&self, id: i64) -> Result<MovieDetails, TmdbError>;

    /// Fetch `/movie/{id}/credits`
    async fn movie_credits(&self, id: i64) -> Result<MovieCredits, TmdbError>;

    /// Fetch one page of `/discover/movie`
    async fn discover_movies(
        &self,
        params: &DiscoverParams,
    ) -> Result<TmdbPage<MovieSummary>, TmdbError>;

    /// Fetch this week's trending movies
    async fn trending_movies(&self) -> Result<TmdbPage<MovieSummary>, TmdbError>;
}
