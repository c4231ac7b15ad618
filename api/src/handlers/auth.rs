//! Sign-in handlers

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::{clear_session_cookie, session_cookie, session_token};
use crate::error::AppError;
use crate::handlers::page;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    pub error: Option<String>,
    pub logged_out: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginPageQuery>,
) -> Response {
    let mut ctx = state.renderer.context("Sign in");
    ctx.insert("failed", &query.error.is_some());
    ctx.insert("logged_out", &query.logged_out.is_some());
    page(&state, state.renderer.render("login.html", &ctx))
}

/// POST /login
///
/// Opens a session and sets the cookie, or bounces back to the form.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let token = state
        .auth_service
        .login(form.username.trim(), &form.password)
        .await?;

    Ok(match token {
        Some(token) => (
            [(header::SET_COOKIE, session_cookie(&token))],
            Redirect::to("/dashboard"),
        )
            .into_response(),
        None => Redirect::to("/login?error=1").into_response(),
    })
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    if let Some(token) = session_token(&headers) {
        state.auth_service.logout(token).await?;
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/login?logged_out=1"),
    )
        .into_response())
}
