//! Report data model.

pub mod cell;
pub mod spec;

pub use cell::{Cell, RawCell};
pub use spec::{build, Category, CategoryLinks, NavLink, ReportInput, ReportSpec, DEFAULT_CAPTION};
