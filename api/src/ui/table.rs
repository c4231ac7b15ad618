//! Data table: global filter, column sort, pagination
//!
//! Rows are held in memory; every operation works on the owned row set and
//! the final `paginate` produces the `Paginated` envelope the pages render.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Paginated;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A sortable cell value
///
/// Within one column numbers order before text, and empty cells after both.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Greater,
            (_, CellValue::Empty) => Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A row the table can filter and sort
pub trait TableRow {
    /// Value of a named column; unknown columns are `Empty`
    fn cell(&self, column: &str) -> CellValue;

    /// Text the global filter matches against
    fn searchable_text(&self) -> String;
}

pub struct DataTable<T> {
    rows: Vec<T>,
}

impl<T: TableRow> DataTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    /// Keep rows whose searchable text contains `filter`, ignoring case
    pub fn filter(mut self, filter: &str) -> Self {
        let needle = filter.trim().to_lowercase();
        if !needle.is_empty() {
            self.rows
                .retain(|row| row.searchable_text().to_lowercase().contains(&needle));
        }
        self
    }

    /// Stable sort by a column; empty cells go last in both directions
    pub fn sort_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.rows.sort_by(|a, b| {
            let (a, b) = (a.cell(column), b.cell(column));
            match (&a, &b) {
                (CellValue::Empty, _) | (_, CellValue::Empty) => a.compare(&b),
                _ => match direction {
                    SortDirection::Asc => a.compare(&b),
                    SortDirection::Desc => b.compare(&a),
                },
            }
        });
        self
    }

    pub fn paginate(self, page: usize, page_size: usize) -> Paginated<T> {
        Paginated::from_rows(self.rows, page, page_size)
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        title: &'static str,
        rating: Option<f64>,
    }

    impl TableRow for Row {
        fn cell(&self, column: &str) -> CellValue {
            match column {
                "title" => CellValue::Text(self.title.to_string()),
                "rating" => self.rating.map(CellValue::Number).unwrap_or(CellValue::Empty),
                _ => CellValue::Empty,
            }
        }

        fn searchable_text(&self) -> String {
            self.title.to_string()
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { title: "Alien", rating: Some(8.4) },
            Row { title: "aliens", rating: Some(8.3) },
            Row { title: "Zodiac", rating: None },
            Row { title: "Brazil", rating: Some(7.9) },
        ]
    }

    fn titles(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.title).collect()
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let table = DataTable::new(rows()).filter("  ALIEN ");
        assert_eq!(titles(&table.into_rows()), vec!["Alien", "aliens"]);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(DataTable::new(rows()).filter("").into_rows().len(), 4);
    }

    #[test]
    fn text_sort_ignores_case() {
        let sorted = DataTable::new(rows()).sort_by("title", SortDirection::Asc);
        assert_eq!(
            titles(&sorted.into_rows()),
            vec!["Alien", "aliens", "Brazil", "Zodiac"]
        );
    }

    #[test]
    fn numeric_sort_desc_keeps_empty_last() {
        let sorted = DataTable::new(rows()).sort_by("rating", SortDirection::Desc);
        assert_eq!(
            titles(&sorted.into_rows()),
            vec!["Alien", "aliens", "Brazil", "Zodiac"]
        );

        let sorted = DataTable::new(rows()).sort_by("rating", SortDirection::Asc);
        assert_eq!(
            titles(&sorted.into_rows()),
            vec!["Brazil", "aliens", "Alien", "Zodiac"]
        );
    }

    struct Mixed(CellValue);

    impl TableRow for Mixed {
        fn cell(&self, _column: &str) -> CellValue {
            self.0.clone()
        }

        fn searchable_text(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn mixed_column_orders_numbers_then_text_then_empty() {
        let cells = vec![
            CellValue::Text("b".into()),
            CellValue::Empty,
            CellValue::Number(10.0),
            CellValue::Text("A".into()),
            CellValue::Number(2.0),
            CellValue::Text("10".into()),
        ];
        let rows = cells.into_iter().map(Mixed).collect();

        let sorted: Vec<CellValue> = DataTable::new(rows)
            .sort_by("any", SortDirection::Asc)
            .into_rows()
            .into_iter()
            .map(|m| m.0)
            .collect();

        assert_eq!(
            sorted,
            vec![
                CellValue::Number(2.0),
                CellValue::Number(10.0),
                CellValue::Text("10".into()),
                CellValue::Text("A".into()),
                CellValue::Text("b".into()),
                CellValue::Empty,
            ]
        );
    }

    #[test]
    fn mixed_cells_compare_consistently_both_ways() {
        let values = [
            CellValue::Number(1.0),
            CellValue::Text("1".into()),
            CellValue::Text("a".into()),
            CellValue::Empty,
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.compare(b), b.compare(a).reverse(), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn unknown_column_keeps_original_order() {
        let sorted = DataTable::new(rows()).sort_by("nope", SortDirection::Desc);
        assert_eq!(titles(&sorted.into_rows()), titles(&rows()));
    }

    #[test]
    fn paginate_after_filter_reports_filtered_total() {
        let page = DataTable::new(rows()).filter("a").paginate(1, 2);

        assert_eq!(page.total, 4);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.data.len(), 2);

        let page = DataTable::new(rows()).filter("ali").paginate(1, 20);
        assert_eq!(page.total, 2);
    }
}
