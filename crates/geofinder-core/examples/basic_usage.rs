//! Basic usage example for geofinder-core
//!
//! This example demonstrates how to:
//! - Load a gazetteer dataset (`.json` or `.json.gz`)
//! - Resolve free-text place names
//! - Inspect the classification, status text and candidate rows
//!
//! Run with `RUST_LOG=geofinder_core=debug` to see every cascade lookup.

use geofinder_core::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== geofinder-core Basic Usage Example ===\n");

    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        [env!("CARGO_MANIFEST_DIR"), "tests", "data", "gazetteer.json"]
            .iter()
            .collect()
    });
    println!("Loading gazetteer from {}...", path.display());
    let gazetteer = MemoryGazetteer::load_from_path(&path)?;
    println!("✓ {} places loaded\n", gazetteer.len());

    let resolver = Resolver::new(gazetteer)?;

    let inputs = [
        ("Dover, Kent, England, United Kingdom", 0),
        ("St Mary's Church, Dover, Kent, England, UK", 0),
        ("Dover, ,England,United Kingdom", 0),
        ("Dovor, Kent, England, UK", 0),
        ("Springfield, , Illinois, USA", 0),
        ("Denver, Colorado, USA", 1800),
        ("München, Bayern, Deutschland", 0),
        ("Paris, France", 0),
        ("Dover --iso us", 0),
    ];

    for (raw, year) in inputs {
        let query = resolver.resolve(raw, year, false)?;
        println!("--- {raw} (event year {year}) ---");
        println!("{:?}: {}", query.classification(), query.status_text);
        if let Some(place) = &query.resolved {
            println!(
                "  → {} [{:.4}, {:.4}] id={}",
                place.full_title(),
                place.lat,
                place.lon,
                place.geoid
            );
        }
        for row in query.results.iter().skip(1) {
            println!("    also: {} ({}) score {:.2}", row.name, row.feature, row.score);
        }
        println!();
    }

    let by_id = resolver.resolve_by_id("gb-dover")?;
    println!("By id gb-dover: {}", by_id.original_entry);

    Ok(())
}
