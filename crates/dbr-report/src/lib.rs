//! Self-contained HTML reports for tabular data.
//!
//! Turns a finished table (headers, rows, optionally linked cells) plus
//! category navigation into one HTML document with client-side sorting,
//! multi-column filtering and relative-time display.
//!
//! # Pieces
//!
//! - [`model`]: validates and normalizes input into an immutable [`ReportSpec`]
//! - [`generator`]: deterministically renders a spec into HTML
//! - [`behavior`]: the sort/filter/relative-time rules, in Rust and as the
//!   embedded activation script
//! - [`layout`]: titles, captions and category menus for a set of views,
//!   with the automatic `Misc` menu
//! - [`output`]: writes rendered reports to a directory
//!
//! # Example
//!
//! ```
//! use dbr_report::{ReportGenerator, ReportInput};
//!
//! let spec = ReportInput::new("Cities", "2024-03-01T12:00:00")
//!     .with_headers(["name", "country"])
//!     .with_row(["Leeds", "UK"])
//!     .build()
//!     .unwrap();
//! let html = ReportGenerator::default_config()
//!     .render(&spec, &["style.css"], &["report.js"])
//!     .unwrap();
//! assert!(html.contains("<td>Leeds</td>"));
//! ```

pub mod behavior;
pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod model;
pub mod output;

mod ordered_map;

pub use behavior::{FilterSet, SortDirection, SortState, TableView};
pub use config::{CdnConfig, CdnLibrary, RenderConfig};
pub use error::{ReportError, Result, SchemaError};
pub use generator::{render, ReportGenerator};
pub use layout::{Catalog, IdentityParser, Layout, RowParser, TableData};
pub use model::{build, Cell, RawCell, ReportInput, ReportSpec};
pub use output::{validate_view_name, write_reports};
