//! Mock implementations of port traits
//!
//! In-memory TMDB stand-in that can be configured per test and records
//! the calls it receives.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::entities::{
    CastMember, MovieCredits, MovieDetails, MovieSummary, TmdbPage,
};
use crate::domain::ports::{DiscoverParams, TmdbClient};
use crate::error::TmdbError;

#[derive(Default)]
pub struct MockTmdbClient {
    /// Results for discover and trending
    movies: Vec<MovieSummary>,
    total_pages: u32,
    /// Reported result count; defaults to the number of `movies`
    total_results: Option<u64>,
    /// Movies known to `/movie/{id}`
    details: HashMap<i64, MovieDetails>,
    /// Raw bodies for the proxy; falls back to serialized details
    raw: HashMap<String, String>,
    cast: HashMap<i64, Vec<CastMember>>,
    /// Status every call fails with, if set
    fail_status: Option<u16>,
    discover_calls: Arc<RwLock<Vec<DiscoverParams>>>,
    raw_calls: Arc<RwLock<Vec<String>>>,
}

impl MockTmdbClient {
    pub fn new() -> Self {
        Self {
            total_pages: 1,
            ..Self::default()
        }
    }

    /// Every call fails with a 500
    pub fn failing() -> Self {
        Self::failing_with(500)
    }

    pub fn failing_with(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::new()
        }
    }

    pub fn with_movies(mut self, movies: Vec<MovieSummary>) -> Self {
        self.movies = movies;
        self
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = total_pages;
        self
    }

    pub fn with_total_results(mut self, total_results: u64) -> Self {
        self.total_results = Some(total_results);
        self
    }

    pub fn with_movie(mut self, id: i64, title: &str) -> Self {
        self.details.insert(
            id,
            MovieDetails {
                id,
                title: title.to_string(),
                overview: format!("Overview of {}", title),
                tagline: String::new(),
                release_date: "1999-10-15".to_string(),
                runtime: Some(139),
                genres: Vec::new(),
                poster_path: None,
                vote_average: 8.4,
                vote_count: 30_000,
                status: "Released".to_string(),
            },
        );
        self
    }

    pub fn with_raw(mut self, id: &str, body: &str) -> Self {
        self.raw.insert(id.to_string(), body.to_string());
        self
    }

    pub fn with_cast(mut self, id: i64, cast: Vec<CastMember>) -> Self {
        self.cast.insert(id, cast);
        self
    }

    pub fn discover_calls(&self) -> Vec<DiscoverParams> {
        self.discover_calls.read().unwrap().clone()
    }

    pub fn raw_calls(&self) -> Vec<String> {
        self.raw_calls.read().unwrap().clone()
    }

    fn check_failure(&self) -> Result<(), TmdbError> {
        match self.fail_status {
            Some(429) => Err(TmdbError::RateLimited),
            Some(401) => Err(TmdbError::Unauthorized),
            Some(status) => Err(TmdbError::Api {
                status,
                message: "Mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> TmdbError {
        TmdbError::Api {
            status: 404,
            message: "The resource you requested could not be found.".to_string(),
        }
    }

    fn page(&self) -> TmdbPage<MovieSummary> {
        TmdbPage {
            page: 1,
            results: self.movies.clone(),
            total_pages: self.total_pages,
            total_results: self.total_results.unwrap_or(self.movies.len() as u64),
        }
    }
}

#[async_trait]
impl TmdbClient for MockTmdbClient {
    async fn movie_raw(&self, id: &str) -> Result<Vec<u8>, TmdbError> {
        self.raw_calls.write().unwrap().push(id.to_string());
        self.check_failure()?;

        if let Some(body) = self.raw.get(id) {
            return Ok(body.clone().into_bytes());
        }
        id.parse::<i64>()
            .ok()
            .and_then(|id| self.details.get(&id))
            .map(|d| serde_json::to_vec(d).unwrap())
            .ok_or_else(Self::not_found)
    }

    async fn movie_details(&self, id: i64) -> Result<MovieDetails, TmdbError> {
        self.check_failure()?;
        self.details.get(&id).cloned().ok_or_else(Self::not_found)
    }

    async fn movie_credits(&self, id: i64) -> Result<MovieCredits, TmdbError> {
        self.check_failure()?;
        if !self.details.contains_key(&id) {
            return Err(Self::not_found());
        }
        Ok(MovieCredits {
            id,
            cast: self.cast.get(&id).cloned().unwrap_or_default(),
            crew: vec![serde_json::json!({ "job": "Director", "name": "David Fincher" })],
        })
    }

    async fn discover_movies(
        &self,
        params: &DiscoverParams,
    ) -> Result<TmdbPage<MovieSummary>, TmdbError> {
        self.discover_calls.write().unwrap().push(params.clone());
        self.check_failure()?;
        let mut page = self.page();
        page.page = params.page;
        Ok(page)
    }

    async fn trending_movies(&self) -> Result<TmdbPage<MovieSummary>, TmdbError> {
        self.check_failure()?;
        Ok(self.page())
    }
}
