//! Browse controls bound to URL query parameters
//!
//! `BrowseQuery` is the state of the movie-browse controls (runtime slider,
//! sort select, view switch, search box, pager). It is read from the query
//! string on every request and written back into links, so the URL is the
//! only place the state lives. Unknown or unparseable values fall back to
//! their defaults.

use serde::{Deserialize, Serialize};
use urlencoding::encode;

pub const MIN_RUNTIME: u32 = 0;
pub const MAX_RUNTIME: u32 = 240;
pub const RUNTIME_STEP: u32 = 5;

/// Sort order, serialized with the TMDB `sort_by` spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "popularity.asc")]
    PopularityAsc,
    #[serde(rename = "vote_average.desc")]
    RatingDesc,
    #[serde(rename = "vote_average.asc")]
    RatingAsc,
    #[serde(rename = "primary_release_date.desc")]
    ReleaseDateDesc,
    #[serde(rename = "primary_release_date.asc")]
    ReleaseDateAsc,
    #[serde(rename = "original_title.asc")]
    TitleAsc,
    #[serde(rename = "original_title.desc")]
    TitleDesc,
}

impl SortBy {
    pub const ALL: [SortBy; 8] = [
        SortBy::PopularityDesc,
        SortBy::PopularityAsc,
        SortBy::RatingDesc,
        SortBy::RatingAsc,
        SortBy::ReleaseDateDesc,
        SortBy::ReleaseDateAsc,
        SortBy::TitleAsc,
        SortBy::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PopularityDesc => "popularity.desc",
            SortBy::PopularityAsc => "popularity.asc",
            SortBy::RatingDesc => "vote_average.desc",
            SortBy::RatingAsc => "vote_average.asc",
            SortBy::ReleaseDateDesc => "primary_release_date.desc",
            SortBy::ReleaseDateAsc => "primary_release_date.asc",
            SortBy::TitleAsc => "original_title.asc",
            SortBy::TitleDesc => "original_title.desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::PopularityDesc => "Most popular",
            SortBy::PopularityAsc => "Least popular",
            SortBy::RatingDesc => "Highest rated",
            SortBy::RatingAsc => "Lowest rated",
            SortBy::ReleaseDateDesc => "Newest",
            SortBy::ReleaseDateAsc => "Oldest",
            SortBy::TitleAsc => "Title A-Z",
            SortBy::TitleDesc => "Title Z-A",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the result list is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw query string, every parameter string-typed
#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    #[serde(rename = "minRuntime")]
    pub min_runtime: Option<String>,
    #[serde(rename = "maxRuntime")]
    pub max_runtime: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub view: Option<String>,
    pub q: Option<String>,
    pub page: Option<String>,
}

/// Parsed state of the browse controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseQuery {
    pub min_runtime: u32,
    pub max_runtime: u32,
    pub sort_by: SortBy,
    pub view: ViewMode,
    pub search: String,
    pub page: usize,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            min_runtime: MIN_RUNTIME,
            max_runtime: MAX_RUNTIME,
            sort_by: SortBy::default(),
            view: ViewMode::default(),
            search: String::new(),
            page: 1,
        }
    }
}

fn parse_runtime(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .map(|v| v.min(MAX_RUNTIME))
        .unwrap_or(default)
}

impl From<BrowseParams> for BrowseQuery {
    fn from(params: BrowseParams) -> Self {
        let defaults = BrowseQuery::default();

        Self {
            min_runtime: parse_runtime(params.min_runtime.as_deref(), defaults.min_runtime),
            max_runtime: parse_runtime(params.max_runtime.as_deref(), defaults.max_runtime),
            sort_by: params
                .sort_by
                .as_deref()
                .and_then(SortBy::parse)
                .unwrap_or(defaults.sort_by),
            view: params
                .view
                .as_deref()
                .and_then(ViewMode::parse)
                .unwrap_or(defaults.view),
            search: params.q.map(|q| q.trim().to_string()).unwrap_or_default(),
            page: params
                .page
                .as_deref()
                .and_then(|p| p.trim().parse::<usize>().ok())
                .filter(|p| *p >= 1)
                .unwrap_or(defaults.page),
        }
    }
}

impl BrowseQuery {
    /// Query string for this state, parameters at their default omitted
    pub fn to_query_string(&self) -> String {
        let defaults = BrowseQuery::default();
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if self.min_runtime != defaults.min_runtime {
            pairs.push(("minRuntime", self.min_runtime.to_string()));
        }
        if self.max_runtime != defaults.max_runtime {
            pairs.push(("maxRuntime", self.max_runtime.to_string()));
        }
        if self.sort_by != defaults.sort_by {
            pairs.push(("sortBy", self.sort_by.to_string()));
        }
        if self.view != defaults.view {
            pairs.push(("view", self.view.to_string()));
        }
        if !self.search.is_empty() {
            pairs.push(("q", self.search.clone()));
        }
        if self.page != defaults.page {
            pairs.push(("page", self.page.to_string()));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path` with this state's query string appended
    pub fn href(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }

    /// Changing the sort restarts at the first page
    pub fn with_sort(&self, sort_by: SortBy) -> Self {
        Self {
            sort_by,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_view(&self, view: ViewMode) -> Self {
        Self {
            view,
            ..self.clone()
        }
    }

    pub fn with_runtime(&self, min_runtime: u32, max_runtime: u32) -> Self {
        Self {
            min_runtime: min_runtime.min(MAX_RUNTIME),
            max_runtime: max_runtime.min(MAX_RUNTIME),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: &str) -> Self {
        Self {
            search: search.trim().to_string(),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}
