//! Profile handlers
//!
//! Profile page and its two forms. Validation errors re-render the page
//! with the submitted values and a message next to each failing field.

use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::app::{FieldErrors, NotificationsForm, ProfileForm};
use crate::domain::entities::{CurrentUser, UserProfile};
use crate::error::AppError;
use crate::handlers::page;
use crate::AppState;

const PROFILE_PATH: &str = "/dashboard/profile";

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub saved: Option<String>,
}

/// GET /dashboard/profile
pub async fn profile_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ProfileQuery>,
) -> Response {
    let result = match state.profile_service.get(&user).await {
        Ok(profile) => {
            let form = ProfileForm::from_profile(&profile);
            render_profile(
                &state,
                &user,
                uri.path(),
                &profile,
                &form,
                &FieldErrors::new(),
                query.saved.is_some(),
            )
        }
        Err(e) => Err(e),
    };
    page(&state, result)
}

/// POST /dashboard/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    OriginalUri(uri): OriginalUri,
    Form(form): Form<ProfileForm>,
) -> Response {
    let errors = form.validate();
    if errors.is_empty() {
        return match state.profile_service.update(&user, &form).await {
            Ok(_) => Redirect::to(&format!("{}?saved=1", PROFILE_PATH)).into_response(),
            Err(e) => page(&state, Err(e)),
        };
    }

    tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Profile form rejected");
    let result = match state.profile_service.get(&user).await {
        Ok(profile) => render_profile(&state, &user, uri.path(), &profile, &form, &errors, false),
        Err(e) => Err(e),
    };
    match result {
        Ok(html) => (StatusCode::UNPROCESSABLE_ENTITY, html).into_response(),
        Err(e) => page(&state, Err(e)),
    }
}

/// POST /dashboard/profile/notifications
pub async fn update_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<NotificationsForm>,
) -> Response {
    match state
        .profile_service
        .update_notifications(&user, form.into())
        .await
    {
        Ok(_) => Redirect::to(&format!("{}?saved=1", PROFILE_PATH)).into_response(),
        Err(e) => page(&state, Err(e)),
    }
}

fn render_profile(
    state: &AppState,
    user: &CurrentUser,
    path: &str,
    profile: &UserProfile,
    form: &ProfileForm,
    errors: &FieldErrors,
    saved: bool,
) -> Result<Html<String>, AppError> {
    let mut ctx = state.renderer.shell_context("Profile", path, user);
    ctx.insert("profile", profile);
    ctx.insert("full_name", &profile.full_name());
    ctx.insert("initials", &profile.initials());
    ctx.insert("plan", &profile.membership.plan.to_string());
    ctx.insert(
        "member_since",
        &profile.membership.member_since.format("%B %Y").to_string(),
    );
    ctx.insert("form", form);
    ctx.insert("errors", errors);
    ctx.insert("saved", &saved);
    state.renderer.render("profile.html", &ctx)
}
