//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::collections::HashMap;

use uuid::Uuid;

use crate::app::mock_profile;
use crate::config::Config;
use crate::domain::entities::{CastMember, CurrentUser, MovieSummary, UserId, UserProfile};

/// Create a test user with default values
pub fn test_user() -> CurrentUser {
    CurrentUser {
        id: UserId(Uuid::new_v4()),
        username: "admin".to_string(),
    }
}

/// Create a test profile (the mocked record for `test_user`)
pub fn test_profile() -> UserProfile {
    mock_profile(&test_user())
}

/// Create a list result movie
pub fn test_movie(id: i64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        overview: format!("Overview of {}", title),
        release_date: "1999-10-15".to_string(),
        poster_path: Some(format!("/poster-{}.jpg", id)),
        vote_average: 7.5,
        vote_count: 1000,
        popularity: 50.0,
    }
}

/// Create a cast entry
pub fn test_cast_member(id: i64, name: &str, order: u32) -> CastMember {
    CastMember {
        id,
        name: name.to_string(),
        character: format!("Character {}", order),
        order,
        profile_path: None,
        known_for_department: Some("Acting".to_string()),
    }
}

/// Environment for a complete test configuration
pub fn test_env() -> HashMap<String, String> {
    [
        ("TMDB_API_URL", "http://tmdb.test/3"),
        ("TMDB_API_KEY", "test-key"),
        ("TMDB_ACCESS_TOKEN", "test-token"),
        ("API_BASE_URL", "http://localhost:8080"),
        ("ADMIN_USERNAME", "admin"),
        ("ADMIN_PASSWORD", "password"),
        ("SESSION_SECRET", "test-secret"),
        ("LOGIN_RATE_LIMIT", "false"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn test_config() -> Config {
    let env = test_env();
    Config::from_lookup(|k| env.get(k).cloned()).unwrap()
}
