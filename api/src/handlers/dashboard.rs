//! Dashboard overview handlers

use axum::{
    extract::{OriginalUri, State},
    response::{Html, Redirect, Response},
    Extension,
};

use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::handlers::page;
use crate::AppState;

/// GET /
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// GET /dashboard
///
/// Greeting, membership stats and this week's trending movies. A TMDB
/// outage only empties the trending strip.
pub async fn overview(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let result = render_overview(&state, &user, uri.path()).await;
    page(&state, result)
}

async fn render_overview(
    state: &AppState,
    user: &CurrentUser,
    path: &str,
) -> Result<Html<String>, AppError> {
    let profile = state.profile_service.get(user).await?;

    let (trending, trending_unavailable) = match state.browse_service.trending().await {
        Ok(movies) => (movies, false),
        Err(e) => {
            tracing::warn!(error = %e, "Trending movies unavailable");
            (Vec::new(), true)
        }
    };

    let mut ctx = state.renderer.shell_context("Dashboard", path, user);
    ctx.insert("profile", &profile);
    ctx.insert("plan", &profile.membership.plan.to_string());
    ctx.insert("trending", &trending);
    ctx.insert("trending_unavailable", &trending_unavailable);
    state.renderer.render("dashboard.html", &ctx)
}
