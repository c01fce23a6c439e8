// crates/geofinder-core/tests/common/mod.rs
#![allow(dead_code)]

use geofinder_core::{MemoryGazetteer, Resolver};
use std::path::PathBuf;

pub fn fixture_path() -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "data", "gazetteer.json"]
        .iter()
        .collect()
}

pub fn gazetteer() -> MemoryGazetteer {
    MemoryGazetteer::load_from_path(fixture_path()).expect("fixture loads")
}

pub fn resolver() -> Resolver<MemoryGazetteer> {
    Resolver::new(gazetteer()).expect("resolver builds")
}
