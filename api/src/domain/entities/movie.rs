//! Movie DTOs
//!
//! Pass-through shapes of the TMDB v3 API. Only the fields the pages
//! render are typed; crew entries stay untyped.

use serde::{Deserialize, Deserializer, Serialize};

/// Helper to deserialize null as default (empty vec, empty string, etc.)
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of a TMDB list endpoint (`/discover/movie`, `/trending/...`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TmdbPage<T> {
    pub page: u32,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// Movie as it appears in list results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub overview: String,
    /// `YYYY-MM-DD`, empty when unknown
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Full movie record from `/movie/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tagline: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub release_date: String,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub status: String,
}

/// Response of `/movie/{id}/credits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCredits {
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub cast: Vec<CastMember>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub crew: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub character: String,
    /// Billing order, 0 is top-billed
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
}
