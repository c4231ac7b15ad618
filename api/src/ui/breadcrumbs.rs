//! Breadcrumbs and sidebar navigation for the dashboard shell

use serde::Serialize;

/// Display names for known path segments
const ROUTE_NAMES: &[(&str, &str)] = &[
    ("dashboard", "Dashboard"),
    ("movies", "Movies"),
    ("profile", "Profile"),
    ("notifications", "Notifications"),
];

fn route_name(segment: &str) -> Option<&'static str> {
    ROUTE_NAMES
        .iter()
        .find(|(key, _)| *key == segment)
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
    /// The last crumb; rendered as plain text
    pub current: bool,
}

/// Build breadcrumbs from a request path, ignoring any query string
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut href = String::new();
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            href.push('/');
            href.push_str(segment);
            let label = match route_name(segment) {
                Some(name) => name.to_string(),
                None => urlencoding::decode(segment)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| segment.to_string()),
            };
            Breadcrumb {
                label,
                href: href.clone(),
                current: i + 1 == segments.len(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

const NAV: &[(&str, &str)] = &[
    ("Overview", "/dashboard"),
    ("Movies", "/dashboard/movies"),
    ("Profile", "/dashboard/profile"),
];

/// Sidebar entries; the longest matching prefix is active
pub fn sidebar(path: &str) -> Vec<NavItem> {
    let active = NAV
        .iter()
        .filter(|(_, href)| path == *href || path.starts_with(&format!("{}/", href)))
        .max_by_key(|(_, href)| href.len())
        .map(|(_, href)| *href);

    NAV.iter()
        .map(|&(label, href)| NavItem {
            label,
            href,
            active: Some(href) == active,
        })
        .collect()
}
