// crates/geofinder-core/tests/resolve.rs
#![cfg(feature = "json")]

mod common;

use common::resolver;
use geofinder_core::{
    AdvancedSearch, Classification, CountryRecord, Dataset, GeoError, GeoRow, Gazetteer,
    MemoryGazetteer, PlaceRecord, Resolver, SearchCriteria,
};
use std::collections::HashSet;

#[test]
fn dover_kent_is_a_strong_match() {
    let q = resolver()
        .resolve("Dover,Kent,England,United Kingdom", 0, false)
        .unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.results.len(), 1);
    assert_eq!(q.results[0].geoid, "gb-dover");

    let place = q.resolved.unwrap();
    assert_eq!(place.display_name, "Dover, Kent, England, United Kingdom");
    assert_eq!(place.prefix, "");
}

#[test]
fn empty_admin2_placeholder_is_tolerated() {
    let q = resolver()
        .resolve("Dover, ,England,United Kingdom", 0, false)
        .unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.results.len(), 1);
    assert_eq!(q.results[0].geoid, "gb-dover");
}

#[test]
fn nearby_springfields_merge_to_the_capital() {
    let q = resolver()
        .resolve("Springfield, , Illinois, USA", 0, false)
        .unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.results.len(), 1);
    assert_eq!(q.results[0].geoid, "us-springfield-a");
    assert_eq!(q.results[0].feature, "PPLA");
}

#[test]
fn names_newer_than_the_event_are_excluded() {
    let r = resolver();
    let q = r.resolve("Denver, Colorado, USA", 1800, false).unwrap();
    assert_eq!(q.classification(), Classification::NoMatch);
    assert!(q.results.is_empty());

    let q = r.resolve("Denver, Colorado, USA", 1850, false).unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert!(q.flags.date_filtered);

    let q = r.resolve("Denver, Colorado, USA", 0, false).unwrap();
    assert!(!q.flags.date_filtered);
}

#[test]
fn native_country_and_region_names() {
    let r = resolver();
    let q = r.resolve("Zurich, Suisse", 0, false).unwrap();
    assert_eq!(q.components.country_iso, "ch");
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.results[0].geoid, "ch-zh");

    let q = r.resolve("München, Bayern, Deutschland", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.results[0].geoid, "de-munich");
    assert_eq!(q.results[0].feature, "PP1M");
}

#[test]
fn us_state_codes_filter_like_names() {
    let q = resolver().resolve("Dover, Kent, DE, USA", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.results[0].geoid, "us-dover");
    assert_eq!(
        q.resolved.unwrap().display_name,
        "Dover, Kent, Delaware, United States"
    );
}

#[test]
fn unsupported_and_missing_countries_are_terminal() {
    let r = resolver();
    let q = r.resolve("Paris, France", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::NotSupported);
    assert!(q.results.is_empty());
    assert_eq!(q.type_text, "Country");
    assert!(q.status_text.contains("Country is not supported"));

    let q = r.resolve("Dover, Kent, Atlantis", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::NoCountry);
    assert!(q.results.is_empty());
}

#[test]
fn prefix_text_is_carried_to_the_result() {
    let q = resolver()
        .resolve("St Mary's Church, Dover, Kent, England, UK", 0, false)
        .unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.type_text, "Place");
    let place = q.resolved.unwrap();
    assert_eq!(place.prefix, "St Mary's Church");
    assert_eq!(
        place.full_title(),
        "St Mary's Church, Dover, Kent, England, United Kingdom"
    );
}

#[test]
fn cascade_never_leaks_into_the_query() {
    let r = resolver();
    for raw in [
        "St Mary's Church, Dover, Kent, England, UK",
        "Dover, Kent, England, UK",
        "Canterbury, Dover, England, UK",
        "Denver, Colorado, USA",
    ] {
        let parsed = r.parse(raw);
        let resolved = r.resolve(raw, 0, false).unwrap();
        assert_eq!(resolved.components, parsed.components, "{raw}");
        assert_eq!(resolved.original_entry, raw);
    }
}

#[test]
fn wildcard_and_soundex_tiers() {
    let r = resolver();
    let q = r.resolve("Dov*r, Kent, England, UK", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::WildcardMatch);
    assert_eq!(q.results[0].geoid, "gb-dover");
    assert_eq!(q.resolved.unwrap().prefix, "");

    let q = r.resolve("Dovor, Kent, England, UK", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::SoundexMatch);
    assert_eq!(q.results[0].geoid, "gb-dover");
}

#[test]
fn shutdown_disables_fuzzy_tiers() {
    let q = resolver()
        .resolve("Dov*r, Kent, England, UK", 0, true)
        .unwrap();
    assert_eq!(q.classification(), Classification::NoMatch);
}

#[test]
fn inline_and_structured_advanced_search() {
    let r = resolver();
    let q = r.resolve("Dover --iso us", 0, false).unwrap();
    assert!(q.is_advanced());
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.results[0].geoid, "us-dover");
    assert_ne!(q.type_text, "Place");
    let place = q.resolved.unwrap();
    assert_eq!(place.prefix, "");
    assert_eq!(place.full_title(), "Dover, Kent, Delaware, United States");
    assert_eq!(q.results[0].prefix, "");

    let q = r
        .resolve_advanced(
            AdvancedSearch {
                target: "kent".into(),
                iso: String::new(),
                feature: Some("ADM2".into()),
            },
            0,
            false,
        )
        .unwrap();
    assert_eq!(q.classification(), Classification::PartialMatch);
    let ids: HashSet<_> = q.results.iter().map(|r| r.geoid.as_str()).collect();
    assert_eq!(ids, HashSet::from(["gb-kent", "us-de-kent"]));
}

#[test]
fn first_match_collapses_to_best_row() {
    let q = resolver()
        .resolve_first_match("Springfield, , Illinois, USA")
        .unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.results.len(), 1);
    assert_eq!(q.results[0].geoid, "us-springfield-a");
}

#[test]
fn resolve_by_id_renders_the_entry() {
    let r = resolver();
    let q = r.resolve_by_id("gb-dover").unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.original_entry, "Dover, Kent, England, United Kingdom");
    assert_eq!(q.components.country_iso, "gb");

    let q = r.resolve_by_id("nope").unwrap();
    assert_eq!(q.classification(), Classification::NoMatch);
    assert!(q.resolved.is_none());
}

#[test]
fn dataset_country_aliases_are_recognized() {
    let q = resolver()
        .resolve("Dover, Kent, England, Britain", 0, false)
        .unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
    assert_eq!(q.components.country_iso, "gb");
}

#[test]
fn registered_aliases_extend_the_country_dictionary() {
    let mut r = resolver();
    let q = r.resolve("Dover, Kent, England, Blighty", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::NoCountry);

    r.countries_mut().insert("Blighty", "gb");
    let q = r.resolve("Dover, Kent, England, Blighty", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::StrongMatch);
}

#[test]
fn oversized_pools_are_limited() {
    let mut places = vec![PlaceRecord {
        geoid: "eng".into(),
        name: "England".into(),
        aliases: vec![],
        iso: "gb".into(),
        admin1: "ENG".into(),
        admin2: String::new(),
        lat: 52.0,
        lon: -1.0,
        feature: "ADM1".into(),
        population: None,
    }];
    places.extend((0..120i32).map(|i| PlaceRecord {
        geoid: format!("ashford-{i}"),
        name: "Ashford".into(),
        aliases: vec![],
        iso: "gb".into(),
        admin1: "ENG".into(),
        admin2: String::new(),
        lat: 51.0,
        lon: f64::from(i),
        feature: "PPL".into(),
        population: None,
    }));
    let gaz = MemoryGazetteer::from_dataset(Dataset {
        countries: vec![CountryRecord {
            iso: "gb".into(),
            name: "United Kingdom".into(),
            aliases: vec![],
        }],
        places,
    });

    let q = Resolver::new(gaz)
        .unwrap()
        .resolve("Ashford, England, UK", 0, false)
        .unwrap();
    assert!(q.flags.limited);
    assert_eq!(q.results.len(), 100);
    assert_eq!(q.classification(), Classification::MultipleMatches);
    assert_eq!(q.status_text, " First 100 matches shown...");
}

struct Offline;

impl Gazetteer for Offline {
    fn lookup_place(&self, _: &SearchCriteria) -> geofinder_core::Result<Vec<GeoRow>> {
        Err(GeoError::Gazetteer("connection refused".into()))
    }
    fn lookup_by_id(&self, _: &str) -> geofinder_core::Result<Option<GeoRow>> {
        Err(GeoError::Gazetteer("connection refused".into()))
    }
    fn country_name(&self, _: &str) -> geofinder_core::Result<Option<String>> {
        Ok(Some("United Kingdom".into()))
    }
    fn supported_countries(&self) -> geofinder_core::Result<HashSet<String>> {
        Ok(HashSet::from(["gb".to_string()]))
    }
    fn admin1_name(&self, _: &str, _: &str) -> geofinder_core::Result<Option<String>> {
        Ok(None)
    }
    fn admin2_name(&self, _: &str, _: &str, _: &str) -> geofinder_core::Result<Option<String>> {
        Ok(None)
    }
}

#[test]
fn gazetteer_failures_abort_the_resolution() {
    let r = Resolver::new(Offline).unwrap();
    assert!(matches!(
        r.resolve("Dover, Kent, England, UK", 0, false),
        Err(GeoError::Gazetteer(_))
    ));
    assert!(matches!(r.resolve_by_id("1"), Err(GeoError::Gazetteer(_))));

    // Country gating runs before any lookup.
    let q = r.resolve("Paris, France", 0, false).unwrap();
    assert_eq!(q.classification(), Classification::NotSupported);
}
