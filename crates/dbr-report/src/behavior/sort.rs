//! Sort-by-column.

use crate::model::Cell;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Header click state: which column is sorted, and which way.
///
/// The first click on a column sorts ascending, a click on the same column
/// toggles the direction, a click on another column starts over ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    column: Option<usize>,
    direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click on `column` and return the resulting direction.
    pub fn click(&mut self, column: usize) -> SortDirection {
        if self.column == Some(column) {
            self.direction = self.direction.reversed();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
        self.direction
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Order two displayed texts by UTF-16 code units, as JavaScript's `<`
/// does, so supplementary-plane characters sort before U+E000..=U+FFFF.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Stable sort of `order` (row indices) by the displayed text of `column`.
///
/// Keys compare with [`compare_text`]. Rows whose keys compare equal keep their relative position in `order`,
/// in both directions. Indices outside `rows` sort as empty text.
pub fn sort_indices(order: &mut [usize], rows: &[Vec<Cell>], column: usize, direction: SortDirection) {
    let key = |index: usize| -> &str {
        rows.get(index)
            .and_then(|row| row.get(column))
            .map(Cell::text)
            .unwrap_or("")
    };
    match direction {
        SortDirection::Ascending => order.sort_by(|&a, &b| compare_text(key(a), key(b))),
        SortDirection::Descending => order.sort_by(|&a, &b| compare_text(key(b), key(a))),
    }
}

/// Row indices of `rows` in sorted order, starting from input order.
pub fn sort_order(rows: &[Vec<Cell>], column: usize, direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    sort_indices(&mut order, rows, column, direction);
    order
}
