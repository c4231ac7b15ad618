//! Pagination envelope

use serde::{Deserialize, Serialize};

/// One page of rows plus the totals needed to render a pager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    /// Always at least 1, so an empty result still has a first page
    pub page_count: usize,
    pub total: usize,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Slice `rows` into the requested page
    ///
    /// `page` is clamped to at least 1 and `page_size` to at least 1.
    /// A page past the end yields empty `data` with correct totals.
    pub fn from_rows(rows: Vec<T>, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total = rows.len();
        let page_count = total.div_ceil(page_size).max(1);

        let data = rows
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Self {
            page,
            page_size,
            page_count,
            total,
            data,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}
