//! Layout: per-view titles, descriptions, captions and category menus.
//!
//! A layout is a JSON document; every field is optional:
//!
//! ```json
//! {
//!   "titles": {"sales_by_region": "Sales by Region"},
//!   "descriptions": {"sales_by_region": "Totals per region"},
//!   "captions": {},
//!   "categories": {"Sales": ["sales_by_region"]},
//!   "ignore_views": ["scratch"],
//!   "paths": {"css_styles": ["style.css"], "javascript": ["report.js"], "report_dir": "out"}
//! }
//! ```

pub mod catalog;

pub use catalog::{Catalog, IdentityParser, RowParser, TableData, MISC_CATEGORY};

use crate::error::Result;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Asset references and output location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPaths {
    /// Stylesheet hrefs, emitted in order.
    #[serde(default)]
    pub css_styles: Vec<String>,
    /// Script srcs, emitted in order after the utility library.
    #[serde(default)]
    pub javascript: Vec<String>,
    /// Directory reports are written to.
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

/// Report layout configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Display title per view; the view name is used when absent.
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
    /// Description per view.
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    /// Caption per view; the default caption is used when absent.
    #[serde(default)]
    pub captions: BTreeMap<String, String>,
    /// Menu name to the views listed under it, in document order.
    #[serde(default, with = "crate::ordered_map")]
    pub categories: Vec<(String, Vec<String>)>,
    /// Views left out of every menu and never rendered.
    #[serde(default)]
    pub ignore_views: Vec<String>,
    #[serde(default)]
    pub paths: LayoutPaths,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load layout from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a layout file. A relative `report_dir` is resolved against the
    /// directory containing the file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut layout = Self::from_json(&json)?;
        if let Some(dir) = layout.paths.report_dir.take() {
            let resolved = match path.parent() {
                Some(base) if dir.is_relative() => base.join(dir),
                _ => dir,
            };
            layout.paths.report_dir = Some(resolved);
        }
        debug!(path = %path.display(), categories = layout.categories.len(), "Layout loaded");
        Ok(layout)
    }

    pub fn with_title(mut self, view: impl Into<String>, title: impl Into<String>) -> Self {
        self.titles.insert(view.into(), title.into());
        self
    }

    pub fn with_description(mut self, view: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions.insert(view.into(), text.into());
        self
    }

    pub fn with_caption(mut self, view: impl Into<String>, caption: impl Into<String>) -> Self {
        self.captions.insert(view.into(), caption.into());
        self
    }

    /// Add a menu listing `views`.
    pub fn with_category<I>(mut self, name: impl Into<String>, views: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.categories
            .push((name.into(), views.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_ignored(mut self, view: impl Into<String>) -> Self {
        self.ignore_views.push(view.into());
        self
    }

    /// Display title for a view.
    pub fn title_for<'a>(&'a self, view: &'a str) -> &'a str {
        self.titles.get(view).map(String::as_str).unwrap_or(view)
    }

    pub fn description_for(&self, view: &str) -> &str {
        self.descriptions.get(view).map(String::as_str).unwrap_or("")
    }

    pub fn caption_for(&self, view: &str) -> &str {
        self.captions.get(view).map(String::as_str).unwrap_or("")
    }
}
