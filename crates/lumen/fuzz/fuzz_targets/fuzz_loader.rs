//! Fuzz target for the JSON loader and the analysis engine.
//!
//! Any input the loader accepts must analyze without panicking, whatever
//! mix of numbers, strings, nulls and nested values its records hold.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lumen::{Loader, Lumen};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(dataset) = Loader::new().load_slice(data) {
        let _ = Lumen::new().with_seed(0).analyze(&dataset);
    }
});
