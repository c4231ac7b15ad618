//! Template rendering
//!
//! Templates are compiled into the binary and loaded once at startup.

use axum::response::Html;
use tera::{Context, Tera};

use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::ui::breadcrumbs::{breadcrumbs, sidebar};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("shell.html", include_str!("../../templates/shell.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("movies.html", include_str!("../../templates/movies.html")),
    ("movie.html", include_str!("../../templates/movie.html")),
    ("profile.html", include_str!("../../templates/profile.html")),
];

/// Site-wide values every page can use
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub image_base_url: String,
    pub api_base_url: String,
}

pub struct Renderer {
    tera: Tera,
    site: SiteInfo,
}

impl Renderer {
    pub fn new(site: SiteInfo) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera, site })
    }

    /// Context for a page outside the dashboard shell
    pub fn context(&self, title: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("title", title);
        ctx.insert("image_base", &self.site.image_base_url);
        ctx.insert("api_base_url", &self.site.api_base_url);
        ctx.insert("version", env!("CARGO_PKG_VERSION"));
        ctx
    }

    /// Context for a page inside the dashboard shell at `path`
    pub fn shell_context(&self, title: &str, path: &str, user: &CurrentUser) -> Context {
        let mut ctx = self.context(title);
        ctx.insert("user", user);
        ctx.insert("breadcrumbs", &breadcrumbs(path));
        ctx.insert("nav", &sidebar(path));
        ctx
    }

    pub fn render(&self, template: &str, ctx: &Context) -> Result<Html<String>, AppError> {
        Ok(Html(self.tera.render(template, ctx)?))
    }

    /// Error page body; falls back to plain text if the template itself fails
    pub fn render_error(&self, status: u16, message: &str) -> Html<String> {
        let mut ctx = self.context(message);
        ctx.insert("status", &status);
        ctx.insert("message", message);
        match self.tera.render("error.html", &ctx) {
            Ok(body) => Html(body),
            Err(e) => {
                tracing::error!("Error template failed: {:?}", e);
                Html(format!("{} {}", status, message))
            }
        }
    }
}
