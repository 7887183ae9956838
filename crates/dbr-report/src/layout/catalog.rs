//! A set of views rendered together, each linking to the others.

use super::Layout;
use crate::error::{ReportError, Result};
use crate::generator::ReportGenerator;
use crate::model::{build, CategoryLinks, RawCell, ReportSpec};
use crate::output::validate_view_name;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info, warn};

/// Menu collecting every view not listed in any other category.
pub const MISC_CATEGORY: &str = "Misc";

/// Bytes escaped in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One view's table as produced by the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<RawCell>>,
}

impl TableData {
    pub fn new<I>(headers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_row<I>(mut self, row: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawCell>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }
}

/// Hook applied to each view's table before it is built and rendered.
///
/// Use it to filter or reformat rows, or to turn values into
/// `[label, url]` links.
pub trait RowParser {
    fn parse(&self, view: &str, table: TableData) -> Result<TableData>;
}

/// Passes tables through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityParser;

impl RowParser for IdentityParser {
    fn parse(&self, _view: &str, table: TableData) -> Result<TableData> {
        Ok(table)
    }
}

impl<F> RowParser for F
where
    F: Fn(&str, TableData) -> Result<TableData>,
{
    fn parse(&self, view: &str, table: TableData) -> Result<TableData> {
        self(view, table)
    }
}

/// Views available for reporting, combined with a layout.
#[derive(Debug, Clone)]
pub struct Catalog {
    layout: Layout,
    views: Vec<String>,
    categories: Vec<(String, Vec<String>)>,
}

impl Catalog {
    /// Combine `layout` with the names of the available views.
    ///
    /// Fails if a view name is not a plain file name, the layout ignores a
    /// view that does not exist, lists an unknown or ignored view in a
    /// category, or repeats a category name.
    pub fn new<I>(layout: Layout, available: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let available: BTreeSet<String> = available.into_iter().map(Into::into).collect();
        for view in &available {
            validate_view_name(view)?;
        }

        for view in &layout.ignore_views {
            if !available.contains(view) {
                return Err(ReportError::Layout(format!(
                    "cannot ignore '{view}': it is not a view"
                )));
            }
        }

        let ignored: HashSet<&str> = layout.ignore_views.iter().map(String::as_str).collect();
        let views: Vec<String> = available
            .into_iter()
            .filter(|view| !ignored.contains(view.as_str()))
            .collect();

        let mut names = HashSet::new();
        for (name, entries) in &layout.categories {
            if !names.insert(name.as_str()) {
                return Err(ReportError::Layout(format!("duplicate category '{name}'")));
            }
            for entry in entries {
                if !views.contains(entry) {
                    return Err(ReportError::Layout(format!(
                        "category '{name}' lists '{entry}', which does not have a report"
                    )));
                }
            }
        }

        let categories = with_misc_category(&layout.categories, &views);
        debug!(
            views = views.len(),
            categories = categories.len(),
            "Catalog assembled"
        );

        Ok(Self {
            layout,
            views,
            categories,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Views to render, in name order, ignored views excluded.
    pub fn views(&self) -> &[String] {
        &self.views
    }

    /// Menus with their view names, `Misc` included when needed.
    pub fn categories(&self) -> &[(String, Vec<String>)] {
        &self.categories
    }

    pub fn contains(&self, view: &str) -> bool {
        self.views.iter().any(|v| v == view)
    }

    /// Navigation menus: view titles linking to `./<view>.html`.
    pub fn navigation(&self) -> Vec<(String, CategoryLinks)> {
        self.categories
            .iter()
            .map(|(name, entries)| {
                let labels = entries
                    .iter()
                    .map(|view| self.layout.title_for(view).to_string())
                    .collect();
                let urls = entries.iter().map(|view| report_href(view)).collect();
                (name.clone(), CategoryLinks::new(labels, urls))
            })
            .collect()
    }

    /// Build the report for one view.
    pub fn spec_for(&self, view: &str, table: TableData, updated: &str) -> Result<ReportSpec> {
        if !self.contains(view) {
            return Err(ReportError::UnknownView(view.to_string()));
        }
        if table.rows.is_empty() {
            warn!(view, "View has no rows");
        }
        let spec = build(
            self.layout.title_for(view),
            self.layout.description_for(view),
            self.navigation(),
            table.headers,
            table.rows,
            self.layout.caption_for(view),
            updated,
        )?;
        Ok(spec)
    }

    /// Render `views` (all views when `None`) to HTML, keyed by view name.
    ///
    /// Each table passes through `parser` first. A requested view that is
    /// not in the catalog, or has no table, is an error.
    pub fn render_all<P: RowParser + ?Sized>(
        &self,
        generator: &ReportGenerator,
        tables: &BTreeMap<String, TableData>,
        views: Option<&[String]>,
        updated: &str,
        parser: &P,
    ) -> Result<BTreeMap<String, String>> {
        let selected: &[String] = views.unwrap_or(&self.views);
        let paths = &self.layout.paths;

        let mut reports = BTreeMap::new();
        for view in selected {
            if !self.contains(view) {
                return Err(ReportError::UnknownView(view.clone()));
            }
            let table = tables
                .get(view)
                .cloned()
                .ok_or_else(|| ReportError::UnknownView(view.clone()))?;
            let table = parser.parse(view, table)?;
            let spec = self.spec_for(view, table, updated)?;
            let html = generator.render(&spec, &paths.css_styles, &paths.javascript)?;
            reports.insert(view.clone(), html);
        }

        info!(reports = reports.len(), "Reports rendered");
        Ok(reports)
    }
}

/// Relative link to a view's report file, with the name percent-encoded.
pub fn report_href(view: &str) -> String {
    format!("./{}.html", utf8_percent_encode(view, PATH_SEGMENT))
}

fn with_misc_category(
    categories: &[(String, Vec<String>)],
    views: &[String],
) -> Vec<(String, Vec<String>)> {
    let listed: HashSet<&str> = categories
        .iter()
        .flat_map(|(_, entries)| entries.iter().map(String::as_str))
        .collect();
    let misc: Vec<String> = views
        .iter()
        .filter(|view| !listed.contains(view.as_str()))
        .cloned()
        .collect();

    let mut result = categories.to_vec();
    if !misc.is_empty() && !categories.iter().any(|(name, _)| name == MISC_CATEGORY) {
        result.push((MISC_CATEGORY.to_string(), misc));
    }
    result
}
