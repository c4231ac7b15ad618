//! Session cookie middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::SESSION_TTL;
use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Extract the session token from the Cookie header(s)
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for a fresh session, expiring with the server-side session
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_TTL.as_secs()
    )
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Session middleware for the dashboard
///
/// Injects the `CurrentUser` into request extensions, or redirects to the
/// sign-in page when there is no valid session.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = session_token(request.headers()).map(str::to_owned) else {
        return Redirect::to("/login").into_response();
    };

    match state.auth_service.authenticate(&token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => {
            tracing::debug!("Unknown session, redirecting to sign-in");
            Redirect::to("/login").into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn finds_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc123; lang=en"),
        );

        assert_eq!(session_token(&headers), Some("abc123"));
    }

    #[test]
    fn missing_or_empty_session_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn session_cookie_lives_as_long_as_the_session() {
        assert!(session_cookie("t").ends_with(&format!("Max-Age={}", SESSION_TTL.as_secs())));
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        assert!(clear_session_cookie().contains("Max-Age=0"));
        assert!(session_cookie("t").starts_with("session=t;"));
    }
}
