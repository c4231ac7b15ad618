use std::env;

use crate::error::ConfigError;

const DEFAULT_IMAGE_URL: &str = "https://image.tmdb.org/t/p";
const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct Config {
    /// TMDB REST base URL, e.g. `https://api.themoviedb.org/3`
    pub tmdb_api_url: String,
    /// TMDB v3 key, sent as the `api_key` query parameter
    pub tmdb_api_key: String,
    /// TMDB v4 read access token, sent as a bearer token
    pub tmdb_access_token: String,
    /// Base URL for poster and profile images
    pub tmdb_image_url: String,
    /// Base URL for this server's own API (used for links to the proxy)
    pub api_base_url: String,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
    /// Key for password HMACs
    pub session_secret: String,
    /// Rate limit `POST /login` per peer IP
    pub login_rate_limit: bool,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let login_rate_limit = match lookup("LOGIN_RATE_LIMIT").as_deref().map(str::trim) {
            None | Some("") | Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOGIN_RATE_LIMIT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            tmdb_api_url: required("TMDB_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            tmdb_api_key: required("TMDB_API_KEY")?,
            tmdb_access_token: required("TMDB_ACCESS_TOKEN")?,
            tmdb_image_url: optional("TMDB_IMAGE_URL", DEFAULT_IMAGE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_base_url: required("API_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            port,
            admin_username: optional("ADMIN_USERNAME", "admin"),
            admin_password: optional("ADMIN_PASSWORD", "admin"),
            session_secret: optional("SESSION_SECRET", "dev-secret-not-for-production"),
            login_rate_limit,
        })
    }
}
