//! HTML report invariant tests.
//!
//! These tests validate the generated HTML structure without requiring a browser:
//! - Required document structure and metadata
//! - Navigation menus, filter inputs and table in input order
//! - Asset ordering and the pinned utility library
//! - Escaping of every text and URL value
//! - Byte-identical output for identical input

use dbr_report::config::{CdnLibrary, RenderConfig};
use dbr_report::generator::ReportGenerator;
use dbr_report::model::{RawCell, ReportInput, ReportSpec, DEFAULT_CAPTION};
use regex::Regex;

const NO_ASSETS: &[&str] = &[];

/// Create a report with two menus, three columns and mixed cells.
fn test_spec() -> ReportSpec {
    ReportInput::new("Regional Sales", "2024-03-01T12:00:00")
        .with_description("Totals per region")
        .with_category(
            "Sales",
            ["By Region", "By Month"],
            ["./by_region.html", "./by_month.html"],
        )
        .with_category("Misc", ["Users"], ["./users.html"])
        .with_headers(["region", "manager", "total"])
        .with_row(vec![
            RawCell::from("North"),
            RawCell::link(Some("Ann"), Some("./ann.html")),
            RawCell::from(120),
        ])
        .with_row(vec![
            RawCell::from("South"),
            RawCell::link(None::<String>, Some("./ghost.html")),
            RawCell::Missing,
        ])
        .with_row(vec![
            RawCell::from("East"),
            RawCell::link(Some("Bob"), None::<String>),
            RawCell::from(75),
        ])
        .build()
        .unwrap()
}

fn render(spec: &ReportSpec) -> String {
    ReportGenerator::default_config()
        .render(spec, &["base.css", "theme.css"], &["extra.js", "report.js"])
        .unwrap()
}

/// The `<tbody>` content of a rendered document.
fn tbody(html: &str) -> &str {
    let start = html.find("<tbody>").expect("tbody open") + "<tbody>".len();
    let end = html.find("</tbody>").expect("tbody close");
    &html[start..end]
}

fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?} in output"))
}

// ============================================================================
// HTML Structure Tests
// ============================================================================

mod structure {
    use super::*;

    #[test]
    fn test_html_doctype_present() {
        let html = render(&test_spec());
        assert!(
            html.starts_with("<!DOCTYPE html>"),
            "HTML must start with DOCTYPE declaration"
        );
    }

    #[test]
    fn test_html_declares_language_and_charset() {
        let html = render(&test_spec());
        assert!(
            html.contains(r#"<html lang="en-US">"#),
            "HTML must declare en-US language"
        );
        assert!(
            html.contains(r#"charset="UTF-8""#),
            "HTML must specify UTF-8 charset"
        );
        assert!(
            html.contains(r#"name="generator" content="dbr-report "#),
            "HTML must have generator meta tag with version"
        );
    }

    #[test]
    fn test_title_used_for_document_and_heading() {
        let html = render(&test_spec());
        assert!(html.contains("<title>Regional Sales</title>"));
        assert!(html.contains("<h1>Regional Sales</h1>"));
        assert!(html.contains(r#"<p class="description">Totals per region</p>"#));
    }

    #[test]
    fn test_empty_description_is_omitted() {
        let spec = ReportInput::new("Plain", "2024-03-01T12:00:00")
            .with_headers(["a"])
            .build()
            .unwrap();
        let html = render(&spec);
        assert!(!html.contains(r#"class="description""#));
    }

    #[test]
    fn test_updated_emitted_as_text_and_machine_value() {
        let html = render(&test_spec());
        assert!(html.contains(r#"<span class="updated-literal">2024-03-01T12:00:00</span>"#));
        assert!(html.contains(r#"<time class="timeago" datetime="2024-03-01T12:00:00""#));
    }

    #[test]
    fn test_activation_script_embedded_once() {
        let html = render(&test_spec());
        assert_eq!(html.matches("global.DbReport = {").count(), 1);
        assert_eq!(html.matches("function activate(root)").count(), 1);
    }
}

// ============================================================================
// Navigation, Filter and Table Tests
// ============================================================================

mod content {
    use super::*;

    #[test]
    fn test_one_menu_per_category_in_order() {
        let html = render(&test_spec());
        assert_eq!(html.matches(r#"<details class="nav-menu">"#).count(), 2);
        assert!(position(&html, "<summary>Sales</summary>") < position(&html, "<summary>Misc</summary>"));
        assert!(
            position(&html, r#"<a href="./by_region.html">By Region</a>"#)
                < position(&html, r#"<a href="./by_month.html">By Month</a>"#)
        );
    }

    #[test]
    fn test_one_filter_input_per_header_in_order() {
        let html = render(&test_spec());
        let pattern = Regex::new(r#"<input [^>]*data-filter-key="([^"]*)" placeholder="([^"]*)""#)
            .expect("valid regex");
        let keys: Vec<(String, String)> = pattern
            .captures_iter(&html)
            .map(|cap| (cap[1].to_string(), cap[2].to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("region".to_string(), "region".to_string()),
                ("manager".to_string(), "manager".to_string()),
                ("total".to_string(), "total".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_cells_are_sortable_in_order() {
        let html = render(&test_spec());
        let pattern = Regex::new(r#"<th class="sortable" data-sort-index="(\d+)" data-header="([^"]*)">"#)
            .expect("valid regex");
        let headers: Vec<(usize, String)> = pattern
            .captures_iter(&html)
            .map(|cap| (cap[1].parse().unwrap(), cap[2].to_string()))
            .collect();
        assert_eq!(
            headers,
            vec![
                (0, "region".to_string()),
                (1, "manager".to_string()),
                (2, "total".to_string()),
            ]
        );
    }

    #[test]
    fn test_every_row_has_one_cell_per_header() {
        let spec = test_spec();
        let html = render(&spec);
        let rows: Vec<&str> = tbody(&html).matches("<tr>").collect();
        assert_eq!(rows.len(), spec.rows().len());

        let row_pattern = Regex::new(r"<tr>(.*?)</tr>").expect("valid regex");
        for cap in row_pattern.captures_iter(tbody(&html)) {
            assert_eq!(cap[1].matches("<td>").count(), spec.headers().len());
        }
    }

    #[test]
    fn test_rows_keep_input_order_and_cell_rules() {
        let html = render(&test_spec());
        let body = tbody(&html);
        assert!(body.contains(
            r#"<tr><td>North</td><td><a href="./ann.html">Ann</a></td><td>120</td></tr>"#
        ));
        // Label-less link renders blank, url dropped.
        assert!(body.contains("<tr><td>South</td><td></td><td></td></tr>"));
        assert!(!html.contains("ghost.html"));
        // Url-less link renders as plain text.
        assert!(body.contains("<tr><td>East</td><td>Bob</td><td>75</td></tr>"));
        assert!(position(body, "North") < position(body, "South"));
        assert!(position(body, "South") < position(body, "East"));
    }

    #[test]
    fn test_default_caption_when_empty() {
        let html = render(&test_spec());
        assert!(html.contains(&format!("<caption>{DEFAULT_CAPTION}</caption>")));
        assert!(html.contains("<caption>Click any header to sort table by that column</caption>"));
    }

    #[test]
    fn test_caption_verbatim_when_given() {
        let spec = ReportInput::new("T", "2024-03-01T12:00:00")
            .with_headers(["a"])
            .with_caption("Only open orders")
            .build()
            .unwrap();
        let html = render(&spec);
        assert!(html.contains("<caption>Only open orders</caption>"));
        assert!(!html.contains(DEFAULT_CAPTION));
    }
}

// ============================================================================
// Asset Ordering and CDN Pinning Tests
// ============================================================================

mod assets {
    use super::*;

    #[test]
    fn test_assets_in_declared_order() {
        let html = render(&test_spec());
        let base = position(&html, r#"<link rel="stylesheet" href="base.css">"#);
        let theme = position(&html, r#"<link rel="stylesheet" href="theme.css">"#);
        let library = position(&html, "jquery@3.7.1/dist/jquery.min.js");
        let extra = position(&html, r#"<script src="extra.js"></script>"#);
        let report = position(&html, r#"<script src="report.js"></script>"#);
        let activation = position(&html, "global.DbReport");

        assert!(base < theme);
        assert!(theme < library);
        assert!(library < extra);
        assert!(extra < report);
        assert!(report < activation);
    }

    #[test]
    fn test_utility_library_loaded_exactly_once() {
        let html = render(&test_spec());
        assert_eq!(
            html.matches(r#"<script src="https://cdn.jsdelivr.net/npm/jquery@"#)
                .count(),
            1
        );
        assert_eq!(html.matches("jquery.min.js").count(), 1);
    }

    #[test]
    fn test_cdn_script_pinned_with_sri() {
        let html = render(&test_spec());
        let script_pattern =
            Regex::new(r#"<script src="https://cdn\.jsdelivr\.net/npm/([a-z-]+)@(\d+\.\d+\.\d+)/[^"]*"([^>]*)>"#)
                .expect("valid regex");

        let mut found = 0;
        for cap in script_pattern.captures_iter(&html) {
            found += 1;
            let attributes = &cap[3];
            assert!(
                attributes.contains(r#"integrity="sha256-"#)
                    || attributes.contains(r#"integrity="sha384-"#),
                "CDN script tag must have integrity attribute: {}",
                &cap[0]
            );
            assert!(
                attributes.contains(r#"crossorigin="anonymous""#),
                "CDN script tag must have crossorigin attribute: {}",
                &cap[0]
            );
        }
        assert_eq!(found, 1, "exactly one pinned CDN script expected");
    }

    #[test]
    fn test_configured_library_replaces_default() {
        let config = RenderConfig::new().with_library(
            CdnLibrary::new("cash-dom", "8.1.5", "sha384-abc").with_path("dist/cash.min.js"),
        );
        let html = ReportGenerator::new(config)
            .render(&test_spec(), NO_ASSETS, NO_ASSETS)
            .unwrap();
        assert!(html.contains("cash-dom@8.1.5/dist/cash.min.js"));
        assert!(!html.contains("jquery"));
    }

    #[test]
    fn test_no_caller_assets() {
        let html = ReportGenerator::default_config()
            .render(&test_spec(), NO_ASSETS, NO_ASSETS)
            .unwrap();
        assert!(!html.contains(r#"rel="stylesheet""#));
        assert_eq!(html.matches("<script src=").count(), 1);
    }
}

// ============================================================================
// Escaping Tests
// ============================================================================

mod escaping {
    use super::*;

    fn hostile_spec() -> ReportSpec {
        ReportInput::new("<script>alert(1)</script>", r#"2024"><b>"#)
            .with_description("Tom & Jerry")
            .with_category("<i>menu</i>", ["<b>label</b>"], [r#"./a.html" onclick="evil()"#])
            .with_headers(["<th>", r#"say "hi""#])
            .with_row(vec![
                RawCell::from("<img src=x>"),
                RawCell::link(Some("it's"), Some("javascript:'x'")),
            ])
            .with_caption("<u>caption</u>")
            .build()
            .unwrap()
    }

    #[test]
    fn test_text_values_are_escaped() {
        let html = ReportGenerator::default_config()
            .render(&hostile_spec(), NO_ASSETS, NO_ASSETS)
            .unwrap();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("<title>&lt;script&gt;alert(1)&lt;/script&gt;</title>"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("<summary>&lt;i&gt;menu&lt;/i&gt;</summary>"));
        assert!(html.contains("&lt;b&gt;label&lt;/b&gt;"));
        assert!(html.contains("<td>&lt;img src=x&gt;</td>"));
        assert!(html.contains("<caption>&lt;u&gt;caption&lt;/u&gt;</caption>"));
        assert!(html.contains(r#"data-filter-key="say &quot;hi&quot;""#));
        assert!(!html.contains("<u>caption"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_urls_are_escaped_for_attributes() {
        let html = ReportGenerator::default_config()
            .render(&hostile_spec(), NO_ASSETS, NO_ASSETS)
            .unwrap();

        assert!(html.contains(r#"href="./a.html&quot; onclick=&quot;evil()""#));
        assert!(!html.contains(r#"onclick="evil()""#));
        assert!(html.contains(r#"<a href="javascript:&#x27;x&#x27;">it&#x27;s</a>"#));
        assert!(html.contains(r#"datetime="2024&quot;&gt;&lt;b&gt;""#));
    }

    #[test]
    fn test_asset_urls_are_escaped() {
        let html = ReportGenerator::default_config()
            .render(&test_spec(), &[r#"a.css"><script>x()</script>"#], NO_ASSETS)
            .unwrap();
        assert!(html.contains(r#"href="a.css&quot;&gt;&lt;script&gt;x()&lt;/script&gt;""#));
    }
}

// ============================================================================
// Determinism Tests
// ============================================================================

mod determinism {
    use super::*;

    #[test]
    fn test_identical_input_identical_output() {
        let first = render(&test_spec());
        let second = render(&test_spec());
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_contains_no_generation_timestamp() {
        let html = render(&test_spec());
        let year_pattern = Regex::new(r"20\d\d-\d\d-\d\d").expect("valid regex");
        for found in year_pattern.find_iter(&html) {
            assert_eq!(found.as_str(), "2024-03-01", "unexpected date in output");
        }
    }
}
