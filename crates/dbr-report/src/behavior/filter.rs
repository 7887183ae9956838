//! Multi-field substring filter.

use crate::error::{ReportError, Result};
use crate::model::{Cell, ReportSpec};

use std::collections::BTreeMap;

/// Per-column filter texts, keyed by header name.
///
/// A row passes when, for every non-empty filter, the column's displayed
/// text contains the filter text ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text for one filter key. Empty text clears the constraint.
    pub fn set(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let text = text.into();
        if text.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, text);
        }
    }

    /// Builder-style [`FilterSet::set`].
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(key, text);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Resolve filter keys to column positions.
    pub fn resolve(&self, headers: &[String]) -> Result<Vec<(usize, String)>> {
        self.filters
            .iter()
            .map(|(key, text)| {
                headers
                    .iter()
                    .position(|h| h == key)
                    .map(|index| (index, text.to_lowercase()))
                    .ok_or_else(|| ReportError::UnknownFilterKey(key.clone()))
            })
            .collect()
    }

    /// Indices of rows of `spec` that pass every active filter, in input order.
    pub fn visible_rows(&self, spec: &ReportSpec) -> Result<Vec<usize>> {
        let resolved = self.resolve(spec.headers())?;
        Ok(spec
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row_matches(row, &resolved))
            .map(|(index, _)| index)
            .collect())
    }
}

/// Whether `row` passes every `(column, lowercase needle)` predicate.
pub fn row_matches(row: &[Cell], predicates: &[(usize, String)]) -> bool {
    predicates.iter().all(|(column, needle)| {
        row.get(*column)
            .map(|cell| cell.text().to_lowercase().contains(needle.as_str()))
            .unwrap_or(false)
    })
}
