#![no_main]

use libfuzzer_sys::fuzz_target;
use raphael_core::model::sector::Sector;
use raphael_core::store::document::{SectorIndex, project_from_value, sector_from_value};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let sectors = vec![Sector::new("Retail", 0), Sector::new("Office", 1)];
    let index = SectorIndex::new(&sectors);
    if let Ok(normalized) = project_from_value(value.clone(), &index) {
        assert!(!normalized.project.slug.is_empty());
        assert!(!normalized.project.name.is_empty());
    }
    let _ = sector_from_value(value);
});
