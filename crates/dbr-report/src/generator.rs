//! Report generator implementation.

use crate::behavior::script::ACTIVATION_SCRIPT;
use crate::config::{RenderConfig, DOCUMENT_LANG};
use crate::error::Result;
use crate::model::{Category, Cell, ReportSpec};

use tracing::{debug, info};

/// Report generator.
///
/// Output depends only on the report, the asset lists and the configuration:
/// no clock reads, no random ids, no unordered iteration.
pub struct ReportGenerator {
    config: RenderConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(RenderConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `spec` into a complete HTML document.
    ///
    /// `css_assets` become stylesheet links in order; `js_assets` become
    /// script tags in order, after the pinned utility library and before
    /// the activation script.
    pub fn render<C, J>(&self, spec: &ReportSpec, css_assets: &[C], js_assets: &[J]) -> Result<String>
    where
        C: AsRef<str>,
        J: AsRef<str>,
    {
        debug!(
            title = spec.title(),
            css = css_assets.len(),
            js = js_assets.len(),
            "Rendering report"
        );
        let html = self.generate_html(spec, css_assets, js_assets);

        let output = if self.config.minify {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        } else {
            html
        };

        info!(
            bytes = output.len(),
            title = %spec.title(),
            rows = spec.rows().len(),
            "Report generated"
        );

        Ok(output)
    }

    fn generate_html<C, J>(&self, spec: &ReportSpec, css_assets: &[C], js_assets: &[J]) -> String
    where
        C: AsRef<str>,
        J: AsRef<str>,
    {
        let css_links: String = css_assets
            .iter()
            .map(|href| {
                format!(
                    r#"<link rel="stylesheet" href="{}">"#,
                    html_escape(href.as_ref())
                )
            })
            .collect::<Vec<_>>()
            .join("\n    ");

        let cdn = &self.config.cdn_config;
        let library_script = format!(
            r#"<script src="{}" integrity="{}" crossorigin="anonymous"></script>"#,
            html_escape(&cdn.library_url()),
            html_escape(&cdn.library.sri)
        );

        let js_scripts: String = js_assets
            .iter()
            .map(|src| format!(r#"<script src="{}"></script>"#, html_escape(src.as_ref())))
            .collect::<Vec<_>>()
            .join("\n    ");

        let description = if spec.description().is_empty() {
            String::new()
        } else {
            format!(
                r#"<p class="description">{}</p>"#,
                html_escape(spec.description())
            )
        };

        format!(
            r##"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="dbr-report {version}">
    <meta name="report-schema-version" content="{schema_version}">
    {css_links}
    <style>
        body {{
            font-family: ui-sans-serif, system-ui, sans-serif;
            line-height: 1.5;
            margin: 0 auto;
            max-width: 80rem;
            padding: 1rem;
        }}
        .report-nav {{
            display: flex;
            gap: 1rem;
            border-bottom: 1px solid #e5e7eb;
            margin-bottom: 1rem;
        }}
        .nav-menu summary {{
            cursor: pointer;
            font-weight: 600;
        }}
        .nav-menu ul {{
            list-style: none;
            margin: 0;
            padding: 0.25rem 0.5rem;
        }}
        .report-filters {{
            display: flex;
            flex-wrap: wrap;
            gap: 0.5rem;
            margin-bottom: 0.5rem;
        }}
        .report-table {{
            border-collapse: collapse;
            width: 100%;
        }}
        .report-table th,
        .report-table td {{
            border: 1px solid #e5e7eb;
            padding: 0.25rem 0.5rem;
            text-align: left;
        }}
        .report-table th.sortable {{
            cursor: pointer;
        }}
        .report-table th[aria-sort="ascending"]::after {{
            content: " \25B2";
        }}
        .report-table th[aria-sort="descending"]::after {{
            content: " \25BC";
        }}
        .report-table caption {{
            caption-side: bottom;
            color: #6b7280;
            font-size: 0.875rem;
        }}
        @media print {{
            .no-print {{ display: none !important; }}
        }}
    </style>
</head>
<body>
    <nav class="report-nav no-print">
        {menus}
    </nav>

    <header class="report-header">
        <h1>{title}</h1>
        {description}
        <p class="updated">Last updated: <span class="updated-literal">{updated}</span> (<time class="timeago" datetime="{updated}" title="{updated}">{updated}</time>)</p>
    </header>

    <main>
        <div class="report-filters no-print">
            {filters}
        </div>
        <table class="report-table">
            <caption>{caption}</caption>
            <thead>
                <tr>
                    {header_cells}
                </tr>
            </thead>
            <tbody>
                {rows}
            </tbody>
        </table>
    </main>

    {library_script}
    {js_scripts}
    <script>
{activation}
    </script>
</body>
</html>"##,
            lang = DOCUMENT_LANG,
            title = html_escape(spec.title()),
            version = env!("CARGO_PKG_VERSION"),
            schema_version = html_escape(&self.config.schema_version),
            css_links = css_links,
            menus = self.generate_menus(spec.categories()),
            description = description,
            updated = html_escape(spec.updated()),
            filters = self.generate_filters(spec.headers()),
            caption = html_escape(spec.caption_text()),
            header_cells = self.generate_header_cells(spec.headers()),
            rows = self.generate_rows(spec.rows()),
            library_script = library_script,
            js_scripts = js_scripts,
            activation = ACTIVATION_SCRIPT,
        )
    }

    fn generate_menus(&self, categories: &[Category]) -> String {
        categories
            .iter()
            .map(|category| {
                let links: String = category
                    .links
                    .iter()
                    .map(|link| {
                        format!(
                            r#"<li><a href="{}">{}</a></li>"#,
                            html_escape(&link.url),
                            html_escape(&link.label)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n                ");

                format!(
                    r#"<details class="nav-menu">
            <summary>{}</summary>
            <ul>
                {}
            </ul>
        </details>"#,
                    html_escape(&category.name),
                    links
                )
            })
            .collect::<Vec<_>>()
            .join("\n        ")
    }

    fn generate_filters(&self, headers: &[String]) -> String {
        headers
            .iter()
            .map(|header| {
                let header = html_escape(header);
                format!(
                    r#"<input type="search" class="report-filter" data-filter-key="{header}" placeholder="{header}" aria-label="Filter {header}">"#
                )
            })
            .collect::<Vec<_>>()
            .join("\n            ")
    }

    fn generate_header_cells(&self, headers: &[String]) -> String {
        headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let header = html_escape(header);
                format!(
                    r#"<th class="sortable" data-sort-index="{index}" data-header="{header}">{header}</th>"#
                )
            })
            .collect::<Vec<_>>()
            .join("\n                    ")
    }

    fn generate_rows(&self, rows: &[Vec<Cell>]) -> String {
        rows.iter()
            .map(|row| {
                let cells: String = row.iter().map(render_cell).collect();
                format!("<tr>{cells}</tr>")
            })
            .collect::<Vec<_>>()
            .join("\n                ")
    }
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => "<td></td>".to_string(),
        Cell::Plain { text } => format!("<td>{}</td>", html_escape(text)),
        Cell::Linked { text, url } => format!(
            r#"<td><a href="{}">{}</a></td>"#,
            html_escape(url),
            html_escape(text)
        ),
    }
}

/// Render `spec` with the default configuration.
pub fn render<C, J>(spec: &ReportSpec, css_assets: &[C], js_assets: &[J]) -> Result<String>
where
    C: AsRef<str>,
    J: AsRef<str>,
{
    ReportGenerator::default_config().render(spec, css_assets, js_assets)
}

/// Escape HTML special characters.
///
/// Safe for element text and for double- or single-quoted attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
