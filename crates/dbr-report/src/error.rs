//! Error types for report building and generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Shape violations detected while building a [`crate::ReportSpec`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Title is empty or whitespace.
    #[error("report title must not be empty")]
    EmptyTitle,

    /// A row does not have one cell per header.
    #[error("row {row} has {actual} cells, expected {expected} (one per header)")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A category's label and url sequences differ in length.
    #[error("category '{category}' has {labels} labels but {urls} urls")]
    CategoryLength {
        category: String,
        labels: usize,
        urls: usize,
    },

    /// A header name appears more than once.
    #[error("duplicate header '{0}'")]
    DuplicateHeader(String),

    /// A category name appears more than once.
    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),
}

impl SchemaError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            SchemaError::EmptyTitle => 40,
            SchemaError::RowLength { .. } => 41,
            SchemaError::CategoryLength { .. } => 42,
            SchemaError::DuplicateHeader(_) => 43,
            SchemaError::DuplicateCategory(_) => 44,
        }
    }
}

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Input table or navigation does not have the required shape.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Output location is not an existing directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Layout refers to something that does not exist.
    #[error("invalid layout: {0}")]
    Layout(String),

    /// A requested view has no report.
    #[error("unknown view '{0}'")]
    UnknownView(String),

    /// A view name that cannot be used as a report file name.
    #[error("invalid view name '{0}': must be a plain file name")]
    InvalidViewName(String),

    /// A filter was addressed by a name that is not a header.
    #[error("unknown filter key '{0}'")]
    UnknownFilterKey(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_converts_into_report_error() {
        let err: ReportError = SchemaError::DuplicateHeader("name".to_string()).into();
        assert!(matches!(err, ReportError::Schema(SchemaError::DuplicateHeader(_))));
        assert_eq!(err.to_string(), "schema error: duplicate header 'name'");
    }

    #[test]
    fn row_length_message_names_the_row() {
        let err = SchemaError::RowLength {
            row: 2,
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "row 2 has 3 cells, expected 2 (one per header)"
        );
        assert_eq!(err.code(), 41);
    }

    #[test]
    fn not_a_directory_displays_path() {
        let err = ReportError::NotADirectory(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "/no/such/dir is not a directory");
    }
}
