//! UI layer
//!
//! Everything the server-rendered pages need besides data: URL-bound
//! control state, the data table, breadcrumbs, debounced input and the
//! template renderer.

pub mod breadcrumbs;
pub mod debounce;
pub mod query_state;
pub mod render;
pub mod table;

pub use breadcrumbs::{breadcrumbs, sidebar, Breadcrumb, NavItem};
pub use debounce::{DebouncedInput, DEFAULT_DEBOUNCE};
pub use query_state::{BrowseParams, BrowseQuery, SortBy, ViewMode};
pub use render::{Renderer, SiteInfo};
pub use table::{CellValue, DataTable, SortDirection, TableRow, DEFAULT_PAGE_SIZE};
