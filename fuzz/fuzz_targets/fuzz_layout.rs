//! Fuzz target for layout.json parsing and catalog assembly.

#![no_main]

use dbr_report::{Catalog, Layout};
use libfuzzer_sys::fuzz_target;

const VIEWS: [&str; 3] = ["v_a", "v_b", "Misc"];

fuzz_target!(|data: &[u8]| {
    let Ok(layout) = serde_json::from_slice::<Layout>(data) else {
        return;
    };
    // Rejection is fine; panicking is not.
    if let Ok(catalog) = Catalog::new(layout, VIEWS) {
        let _ = catalog.navigation();
    }
});
