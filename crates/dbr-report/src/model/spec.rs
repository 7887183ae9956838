//! The canonical report representation and its builder.

use super::cell::{Cell, RawCell};
use crate::error::SchemaError;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Caption shown when the report does not supply one.
pub const DEFAULT_CAPTION: &str = "Click any header to sort table by that column";

/// One navigation link inside a category menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

/// A named navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub links: Vec<NavLink>,
}

/// Category links as supplied: parallel label and url sequences.
///
/// Serialized as a two-element `[labels, urls]` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(Vec<String>, Vec<String>)",
    into = "(Vec<String>, Vec<String>)"
)]
pub struct CategoryLinks {
    pub labels: Vec<String>,
    pub urls: Vec<String>,
}

impl CategoryLinks {
    pub fn new(labels: Vec<String>, urls: Vec<String>) -> Self {
        Self { labels, urls }
    }
}

impl From<(Vec<String>, Vec<String>)> for CategoryLinks {
    fn from((labels, urls): (Vec<String>, Vec<String>)) -> Self {
        Self { labels, urls }
    }
}

impl From<CategoryLinks> for (Vec<String>, Vec<String>) {
    fn from(links: CategoryLinks) -> Self {
        (links.labels, links.urls)
    }
}

/// Immutable, validated report data ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSpec {
    title: String,
    description: String,
    categories: Vec<Category>,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    caption: String,
    updated: String,
}

impl ReportSpec {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in input order; every row has exactly one cell per header.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// The caption as supplied; may be empty.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// The caption to display, falling back to [`DEFAULT_CAPTION`].
    pub fn caption_text(&self) -> &str {
        if self.caption.is_empty() {
            DEFAULT_CAPTION
        } else {
            &self.caption
        }
    }

    pub fn updated(&self) -> &str {
        &self.updated
    }

    /// Position of a header, if present.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// Validate and normalize raw report data into a [`ReportSpec`].
///
/// Rejects an empty title, duplicate header or category names, rows whose
/// length differs from the header count, and categories whose label and
/// url sequences differ in length. Cells are normalized per
/// `From<RawCell> for Cell`.
pub fn build(
    title: &str,
    description: &str,
    categories: Vec<(String, CategoryLinks)>,
    headers: Vec<String>,
    rows: Vec<Vec<RawCell>>,
    caption: &str,
    updated: &str,
) -> Result<ReportSpec, SchemaError> {
    if title.trim().is_empty() {
        return Err(SchemaError::EmptyTitle);
    }

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(SchemaError::DuplicateHeader(header.clone()));
        }
    }

    let mut normalized_rows = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        if row.len() != headers.len() {
            return Err(SchemaError::RowLength {
                row: index,
                expected: headers.len(),
                actual: row.len(),
            });
        }
        normalized_rows.push(row.into_iter().map(Cell::from).collect::<Vec<_>>());
    }

    let mut names = HashSet::new();
    let mut menus = Vec::with_capacity(categories.len());
    for (name, links) in categories {
        if !names.insert(name.clone()) {
            return Err(SchemaError::DuplicateCategory(name));
        }
        if links.labels.len() != links.urls.len() {
            return Err(SchemaError::CategoryLength {
                category: name,
                labels: links.labels.len(),
                urls: links.urls.len(),
            });
        }
        let links = links
            .labels
            .into_iter()
            .zip(links.urls)
            .map(|(label, url)| NavLink { label, url })
            .collect();
        menus.push(Category { name, links });
    }

    debug!(
        title,
        columns = headers.len(),
        rows = normalized_rows.len(),
        categories = menus.len(),
        "Report spec built"
    );

    Ok(ReportSpec {
        title: title.to_string(),
        description: description.to_string(),
        categories: menus,
        headers,
        rows: normalized_rows,
        caption: caption.to_string(),
        updated: updated.to_string(),
    })
}

/// Serializable builder input for [`build`].
///
/// In JSON, `categories` is an object whose entries keep document order:
/// `{"Menu": [["Label"], ["./url.html"]]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "crate::ordered_map")]
    pub categories: Vec<(String, CategoryLinks)>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<RawCell>>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub updated: String,
}

impl ReportInput {
    /// Start a report with its title and last-updated timestamp.
    pub fn new(title: impl Into<String>, updated: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            updated: updated.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Add a navigation menu from parallel label and url lists.
    pub fn with_category<L, U>(mut self, name: impl Into<String>, labels: L, urls: U) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        let links = CategoryLinks::new(
            labels.into_iter().map(Into::into).collect(),
            urls.into_iter().map(Into::into).collect(),
        );
        self.categories.push((name.into(), links));
        self
    }

    pub fn with_headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_row<I>(mut self, row: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawCell>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Parse builder input from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate and normalize into a [`ReportSpec`].
    pub fn build(self) -> Result<ReportSpec, SchemaError> {
        build(
            &self.title,
            &self.description,
            self.categories,
            self.headers,
            self.rows,
            &self.caption,
            &self.updated,
        )
    }
}
