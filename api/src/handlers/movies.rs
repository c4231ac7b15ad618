//! Movie browse and detail handlers

use axum::{
    extract::{OriginalUri, Path, Query, State},
    response::{Html, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::app::BrowsePage;
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::handlers::page;
use crate::ui::query_state::{MAX_RUNTIME, MIN_RUNTIME, RUNTIME_STEP};
use crate::ui::{BrowseParams, BrowseQuery, SortBy, ViewMode, DEFAULT_DEBOUNCE};
use crate::AppState;

const BROWSE_PATH: &str = "/dashboard/movies";

#[derive(Debug, Serialize)]
struct SortOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

/// GET /dashboard/movies
///
/// Controls bound to the query string plus the grid or list of results.
pub async fn browse(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<BrowseParams>,
) -> Response {
    let query = BrowseQuery::from(params);
    let result = render_browse(&state, &user, uri.path(), &query).await;
    page(&state, result)
}

async fn render_browse(
    state: &AppState,
    user: &CurrentUser,
    path: &str,
    query: &BrowseQuery,
) -> Result<Html<String>, AppError> {
    let result = state.browse_service.browse(query).await?;

    let sort_options: Vec<SortOption> = SortBy::ALL
        .iter()
        .map(|s| SortOption {
            value: s.as_str(),
            label: s.label(),
            selected: *s == query.sort_by,
        })
        .collect();

    let mut ctx = state.renderer.shell_context("Movies", path, user);
    ctx.insert("query", query);
    ctx.insert("sort_options", &sort_options);
    ctx.insert("grid_href", &query.with_view(ViewMode::Grid).href(BROWSE_PATH));
    ctx.insert("list_href", &query.with_view(ViewMode::List).href(BROWSE_PATH));
    ctx.insert("reset_href", BROWSE_PATH);
    ctx.insert(
        "prev_href",
        &result
            .has_previous()
            .then(|| query.with_page(result.page - 1).href(BROWSE_PATH)),
    );
    ctx.insert(
        "next_href",
        &result
            .has_next()
            .then(|| query.with_page(result.page + 1).href(BROWSE_PATH)),
    );
    ctx.insert("runtime_min", &MIN_RUNTIME);
    ctx.insert("runtime_max", &MAX_RUNTIME);
    ctx.insert("runtime_step", &RUNTIME_STEP);
    ctx.insert("debounce_ms", &(DEFAULT_DEBOUNCE.as_millis() as u64));
    ctx.insert("movies", &result);
    state.renderer.render("movies.html", &ctx)
}

/// GET /api/movies
///
/// The browse result as JSON, same query parameters as the page.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<BrowsePage>, AppError> {
    let query = BrowseQuery::from(params);
    let result = state.browse_service.browse(&query).await?;
    Ok(Json(result))
}

/// Query parameters for the cast table
#[derive(Debug, Default, Deserialize)]
pub struct CastQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<String>,
}

/// GET /dashboard/movies/:id
pub async fn movie_detail(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    Query(cast): Query<CastQuery>,
) -> Response {
    let result = render_movie(&state, &user, uri.path(), &id, &cast).await;
    page(&state, result)
}

async fn render_movie(
    state: &AppState,
    user: &CurrentUser,
    path: &str,
    id: &str,
    cast: &CastQuery,
) -> Result<Html<String>, AppError> {
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| AppError::NotFound(format!("Movie {}", id)))?;
    let cast_page = cast
        .page
        .as_deref()
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1);
    let cast_filter = cast.q.trim();

    let movie = state
        .browse_service
        .movie_page(id, cast_filter, cast_page)
        .await?;

    let detail_path = format!("{}/{}", BROWSE_PATH, id);
    let cast_href = |page: usize| {
        if cast_filter.is_empty() {
            format!("{}?page={}", detail_path, page)
        } else {
            format!("{}?q={}&page={}", detail_path, encode(cast_filter), page)
        }
    };

    let mut ctx = state
        .renderer
        .shell_context(&movie.details.title, path, user);
    ctx.insert("movie", &movie.details);
    ctx.insert("cast", &movie.cast);
    ctx.insert("cast_filter", cast_filter);
    ctx.insert("crew_count", &movie.crew_count);
    ctx.insert(
        "cast_prev_href",
        &movie
            .cast
            .has_previous()
            .then(|| cast_href(movie.cast.page - 1)),
    );
    ctx.insert(
        "cast_next_href",
        &movie.cast.has_next().then(|| cast_href(movie.cast.page + 1)),
    );
    ctx.insert(
        "raw_json_href",
        &format!("{}/api/tmdb/movie/{}", state.config.api_base_url, id),
    );
    state.renderer.render("movie.html", &ctx)
}
