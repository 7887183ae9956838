//! Client behavior contract: sort, filter, relative time.
//!
//! The rendered document carries these behaviors through an embedded script
//! ([`script::ACTIVATION_SCRIPT`]). The Rust functions here are the same
//! rules in executable form, used by tests and by consumers that need the
//! visible table without a browser.

pub mod filter;
pub mod script;
pub mod sort;
pub mod time;

pub use filter::FilterSet;
pub use sort::{compare_text, sort_indices, sort_order, SortDirection, SortState};
pub use time::{parse_timestamp, parse_timestamp_in, relative_time, relative_time_str};

use crate::error::Result;
use crate::model::{Cell, ReportSpec};

/// Interactive state of one rendered table: current row order, sort state
/// and filters. Rows are never removed, only hidden.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    spec: &'a ReportSpec,
    order: Vec<usize>,
    sort: SortState,
    filters: FilterSet,
}

impl<'a> TableView<'a> {
    pub fn new(spec: &'a ReportSpec) -> Self {
        Self {
            spec,
            order: (0..spec.rows().len()).collect(),
            sort: SortState::new(),
            filters: FilterSet::new(),
        }
    }

    /// Click the header at `column`: sort the current order stably.
    pub fn click_header(&mut self, column: usize) -> SortDirection {
        let direction = self.sort.click(column);
        sort_indices(&mut self.order, self.spec.rows(), column, direction);
        direction
    }

    /// Type into the filter bound to `key`.
    pub fn set_filter(&mut self, key: &str, text: &str) -> Result<()> {
        let mut next = self.filters.clone();
        next.set(key, text);
        next.resolve(self.spec.headers())?;
        self.filters = next;
        Ok(())
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// All row indices in display order, hidden ones included.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Visible row indices in display order.
    pub fn visible(&self) -> Result<Vec<usize>> {
        let predicates = self.filters.resolve(self.spec.headers())?;
        Ok(self
            .order
            .iter()
            .copied()
            .filter(|&index| filter::row_matches(&self.spec.rows()[index], &predicates))
            .collect())
    }

    /// Visible rows in display order.
    pub fn visible_rows(&self) -> Result<Vec<&'a [Cell]>> {
        let spec: &'a ReportSpec = self.spec;
        let rows = spec.rows();
        Ok(self
            .visible()?
            .into_iter()
            .map(|index| rows[index].as_slice())
            .collect())
    }
}
