//! Table cell values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single, normalized table entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cell {
    /// Blank cell.
    #[default]
    Empty,
    /// Text shown verbatim (escaped on output).
    Plain { text: String },
    /// Text rendered as a hyperlink to `url`.
    Linked { text: String, url: String },
}

impl Cell {
    /// Create a plain text cell.
    pub fn plain(text: impl Into<String>) -> Self {
        Cell::Plain { text: text.into() }
    }

    /// Create a hyperlinked cell.
    pub fn linked(text: impl Into<String>, url: impl Into<String>) -> Self {
        Cell::Linked {
            text: text.into(),
            url: url.into(),
        }
    }

    /// Text the reader sees; sorting and filtering operate on this.
    pub fn text(&self) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Plain { text } | Cell::Linked { text, .. } => text,
        }
    }

    /// Link target, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Cell::Linked { url, .. } => Some(url),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A cell as handed over by the data source, before normalization.
///
/// In JSON this is `null`, a string, a number, a bool, or a two-element
/// `[label, url]` array where either element may be `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Missing,
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Link(Option<String>, Option<String>),
}

impl RawCell {
    /// A `(label, url)` pair; either side may be absent.
    pub fn link(label: Option<impl Into<String>>, url: Option<impl Into<String>>) -> Self {
        RawCell::Link(label.map(Into::into), url.map(Into::into))
    }
}

impl From<RawCell> for Cell {
    fn from(raw: RawCell) -> Self {
        match raw {
            RawCell::Missing => Cell::Empty,
            RawCell::Text(text) => Cell::Plain { text },
            RawCell::Number(n) => Cell::plain(n.to_string()),
            RawCell::Bool(b) => Cell::plain(b.to_string()),
            // The label decides presence: no label, no cell.
            RawCell::Link(None, _) => Cell::Empty,
            RawCell::Link(Some(text), None) => Cell::Plain { text },
            RawCell::Link(Some(text), Some(url)) => Cell::Linked { text, url },
        }
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Text(s.to_string())
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell::Text(s)
    }
}

impl From<Option<String>> for RawCell {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawCell::Missing, RawCell::Text)
    }
}

impl From<i64> for RawCell {
    fn from(n: i64) -> Self {
        RawCell::Number(n.into())
    }
}

impl From<bool> for RawCell {
    fn from(b: bool) -> Self {
        RawCell::Bool(b)
    }
}
