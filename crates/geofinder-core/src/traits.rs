// crates/geofinder-core/src/traits.rs
use crate::error::Result;
use crate::model::{GeoRow, SearchCriteria};
use std::collections::HashSet;

/// The gazetteer query layer the resolver runs against.
///
/// Storage, indexing and the fuzzy matching tiers (exact, prefix, wildcard,
/// sound-alike) live behind this trait; the resolver only decides *what* to
/// ask. Implementations are read-only from the resolver's point of view, so
/// sharing one across threads only requires the implementation itself to be
/// safe for concurrent reads.
///
/// Any `Err` aborts the resolution in progress and is returned to the caller
/// unchanged. The resolver never retries a failing query.
pub trait Gazetteer {
    /// Rows matching `criteria`, scored (lower is better).
    fn lookup_place(&self, criteria: &SearchCriteria) -> Result<Vec<GeoRow>>;

    /// Exact lookup by persistent identifier.
    fn lookup_by_id(&self, geoid: &str) -> Result<Option<GeoRow>>;

    /// Display name of a country by lowercase ISO2 code.
    fn country_name(&self, iso: &str) -> Result<Option<String>>;

    /// Lowercase ISO2 codes of the countries loaded into the gazetteer.
    fn supported_countries(&self) -> Result<HashSet<String>>;

    /// Display name of a first-level division.
    fn admin1_name(&self, iso: &str, admin1: &str) -> Result<Option<String>>;

    /// Display name of a second-level division.
    fn admin2_name(&self, iso: &str, admin1: &str, admin2: &str) -> Result<Option<String>>;

    /// Other names a country is known by, e.g. `Britain` for `gb`.
    fn country_aliases(&self, _iso: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

impl<G: Gazetteer + ?Sized> Gazetteer for &G {
    fn lookup_place(&self, criteria: &SearchCriteria) -> Result<Vec<GeoRow>> {
        (**self).lookup_place(criteria)
    }
    fn lookup_by_id(&self, geoid: &str) -> Result<Option<GeoRow>> {
        (**self).lookup_by_id(geoid)
    }
    fn country_name(&self, iso: &str) -> Result<Option<String>> {
        (**self).country_name(iso)
    }
    fn supported_countries(&self) -> Result<HashSet<String>> {
        (**self).supported_countries()
    }
    fn admin1_name(&self, iso: &str, admin1: &str) -> Result<Option<String>> {
        (**self).admin1_name(iso, admin1)
    }
    fn admin2_name(&self, iso: &str, admin1: &str, admin2: &str) -> Result<Option<String>> {
        (**self).admin2_name(iso, admin1, admin2)
    }
    fn country_aliases(&self, iso: &str) -> Result<Vec<String>> {
        (**self).country_aliases(iso)
    }
}
