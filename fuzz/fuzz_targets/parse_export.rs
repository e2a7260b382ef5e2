#![no_main]

use libfuzzer_sys::fuzz_target;
use raphael_core::store::{assemble, parse_export};
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(documents) = parse_export(Path::new("fuzz.ndjson"), content) {
        let count = documents.len();
        let loaded = assemble("fuzz".to_string(), documents);
        assert_eq!(loaded.report.documents, count);
        assert!(loaded.report.projects + loaded.report.sectors + loaded.report.ignored <= count);
    }
});
