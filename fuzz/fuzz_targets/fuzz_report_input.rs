//! Fuzz target for report input parsing and rendering.
//!
//! Arbitrary JSON must either be rejected or build into a spec that renders
//! with one body row per input row.

#![no_main]

use dbr_report::{ReportGenerator, ReportInput};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(input) = ReportInput::from_json(json) else {
        return;
    };
    let Ok(spec) = input.build() else {
        return;
    };

    let html = ReportGenerator::default_config()
        .render(&spec, &[] as &[&str], &[] as &[&str])
        .expect("a built spec always renders");
    assert_eq!(html.matches("<tr><td").count() + html.matches("<tr></tr>").count(), spec.rows().len());
});
