//! TMDB API client implementation

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::de::IgnoredAny;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::{MovieCredits, MovieDetails, MovieSummary, TmdbPage};
use crate::domain::ports::{DiscoverParams, TmdbClient};
use crate::error::TmdbError;

/// Implementation of the TMDB API client
pub struct TmdbClientImpl {
    http: Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl TmdbClientImpl {
    pub fn new(base_url: String, api_key: String, access_token: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            access_token,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request carrying both TMDB credentials
    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(self.api_url(path))
            .bearer_auth(&self.access_token)
            .header(header::ACCEPT, "application/json")
            .query(&[("api_key", self.api_key.as_str())])
    }

    /// Map non-success statuses to errors, passing successful responses on
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 401 {
            Err(TmdbError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(TmdbError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(TmdbError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TmdbError> {
        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| TmdbError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl TmdbClient for TmdbClientImpl {
    async fn movie_raw(&self, id: &str) -> Result<Vec<u8>, TmdbError> {
        let resp = self.get(&format!("/movie/{}", encode(id))).send().await?;

        let body = Self::check_status(resp).await?.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&body)
            .map_err(|e| TmdbError::Deserialization(e.to_string()))?;
        Ok(body.to_vec())
    }

    async fn movie_details(&self, id: i64) -> Result<MovieDetails, TmdbError> {
        let resp = self.get(&format!("/movie/{}", id)).send().await?;

        self.handle_response(resp).await
    }

    async fn movie_credits(&self, id: i64) -> Result<MovieCredits, TmdbError> {
        let resp = self.get(&format!("/movie/{}/credits", id)).send().await?;

        self.handle_response(resp).await
    }

    async fn discover_movies(
        &self,
        params: &DiscoverParams,
    ) -> Result<TmdbPage<MovieSummary>, TmdbError> {
        let resp = self
            .get("/discover/movie")
            .query(&[
                ("sort_by", params.sort_by.clone()),
                ("with_runtime.gte", params.min_runtime.to_string()),
                ("with_runtime.lte", params.max_runtime.to_string()),
                ("page", params.page.max(1).to_string()),
            ])
            .send()
            .await?;

        self.handle_response(resp).await
    }

    async fn trending_movies(&self) -> Result<TmdbPage<MovieSummary>, TmdbError> {
        let resp = self.get("/trending/movie/week").send().await?;

        self.handle_response(resp).await
    }
}
