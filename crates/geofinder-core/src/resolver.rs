// crates/geofinder-core/src/resolver.rs

//! # Resolution Facade
//!
//! parse → country check → cascade → rank → classify → render.
//!
//! ```rust
//! use geofinder_core::{Classification, MemoryGazetteer, Resolver};
//!
//! let gaz = MemoryGazetteer::from_json_str(r#"{
//!     "countries": [{ "iso": "gb", "name": "United Kingdom" }],
//!     "places": [
//!         { "geoid": "1", "name": "England", "iso": "gb", "admin1": "ENG",
//!           "lat": 52.0, "lon": -1.0, "feature": "ADM1" },
//!         { "geoid": "2", "name": "Dover", "iso": "gb", "admin1": "ENG",
//!           "lat": 51.12, "lon": 1.31, "feature": "PPL" }
//!     ]
//! }"#)?;
//! let resolver = Resolver::new(gaz)?;
//! let query = resolver.resolve("Dover, England, United Kingdom", 0, false)?;
//! assert_eq!(query.classification(), Classification::StrongMatch);
//! assert_eq!(
//!     query.resolved.unwrap().display_name,
//!     "Dover, , England, United Kingdom"
//! );
//! # Ok::<(), geofinder_core::GeoError>(())
//! ```

use crate::country::CountryDictionary;
use crate::error::Result;
use crate::model::{AdvancedSearch, Classification, PlaceComponents, PlaceQuery, PlaceType};
use crate::parser::parse_place;
use crate::rank::{by_score, classify, rank, RankConfig, Ranked};
use crate::search::{advanced_criteria, annotate_prefixes, describe_row, run_cascade, Hypothesis};
use crate::traits::Gazetteer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Resolver settings. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub rank: RankConfig,
    /// Allow the gazetteer's wildcard and sound-alike tiers.
    pub use_wildcards: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            rank: RankConfig::default(),
            use_wildcards: true,
        }
    }
}

#[cfg(feature = "json")]
impl ResolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            crate::error::GeoError::NotFound(format!(
                "Config not found at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&text)
    }
}

/// Resolves free-text place names against a [`Gazetteer`].
///
/// Holds no per-request state; every call builds and returns its own
/// [`PlaceQuery`].
#[derive(Debug)]
pub struct Resolver<G> {
    gazetteer: G,
    countries: CountryDictionary,
    supported: HashSet<String>,
    config: ResolverConfig,
}

impl<G: Gazetteer> Resolver<G> {
    pub fn new(gazetteer: G) -> Result<Self> {
        Self::with_config(gazetteer, ResolverConfig::default())
    }

    /// Reads the supported countries once and adds the gazetteer's own
    /// country names and aliases to the built-in dictionary.
    pub fn with_config(gazetteer: G, config: ResolverConfig) -> Result<Self> {
        let supported = gazetteer.supported_countries()?;
        let mut countries = CountryDictionary::default();
        for iso in &supported {
            if let Some(name) = gazetteer.country_name(iso)? {
                countries.insert(&name, iso);
            }
            for alias in gazetteer.country_aliases(iso)? {
                countries.insert(&alias, iso);
            }
        }
        debug!(supported = supported.len(), names = countries.len(), "resolver ready");
        Ok(Resolver {
            gazetteer,
            countries,
            supported,
            config,
        })
    }

    pub fn gazetteer(&self) -> &G {
        &self.gazetteer
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// For registering extra country aliases.
    pub fn countries_mut(&mut self) -> &mut CountryDictionary {
        &mut self.countries
    }

    pub fn parse(&self, raw: &str) -> PlaceQuery {
        parse_place(raw, &self.countries)
    }

    /// Full resolution of a place string.
    ///
    /// `event_year` of 0 disables temporal filtering. `shutdown` disables the
    /// wildcard and sound-alike tiers for this call.
    pub fn resolve(&self, raw: &str, event_year: i32, shutdown: bool) -> Result<PlaceQuery> {
        let mut query = self.parse(raw);
        query.event_year = event_year;
        let wildcards = self.config.use_wildcards && !shutdown;

        if let Some(search) = query.advanced.clone() {
            self.run_advanced(&mut query, &search, wildcards)?;
            return Ok(query);
        }

        if query.components.is_empty() {
            query.classification = Some(Classification::NoMatch);
            self.finish(&mut query)?;
            return Ok(query);
        }

        if let Some(failure) = self.country_failure(&query.components) {
            debug!(iso = %query.components.country_iso, ?failure, "country check failed");
            query.classification = Some(failure);
            self.finish(&mut query)?;
            return Ok(query);
        }

        let pool = run_cascade(&self.gazetteer, &query, wildcards)?;
        let ranked = rank(pool, event_year, &self.config.rank);
        query.classification = Some(classify(&ranked, &self.config.rank));
        self.attach(&mut query, ranked);
        self.finish(&mut query)?;
        Ok(query)
    }

    /// Structured search, bypassing the hierarchy parse.
    pub fn resolve_advanced(
        &self,
        search: AdvancedSearch,
        event_year: i32,
        shutdown: bool,
    ) -> Result<PlaceQuery> {
        let mut query = PlaceQuery::new(&search.target);
        query.event_year = event_year;
        query.target = search.target.clone();
        query.components.city = search.target.clone();
        query.components.country_iso = search.iso.clone();
        query.place_type = PlaceType::AdvancedSearch;
        query.advanced = Some(search.clone());
        self.run_advanced(
            &mut query,
            &search,
            self.config.use_wildcards && !shutdown,
        )?;
        Ok(query)
    }

    /// Single standard lookup; the best row, if any, is a strong match.
    pub fn resolve_first_match(&self, raw: &str) -> Result<PlaceQuery> {
        let mut query = self.parse(raw);
        let wildcards = self.config.use_wildcards;
        let criteria = match &query.advanced {
            Some(search) => Some(advanced_criteria(search, wildcards)),
            None => Hypothesis::Standard.criteria(&query.components, wildcards),
        };

        let mut rows = match criteria {
            Some(c) => self.gazetteer.lookup_place(&c)?,
            None => Vec::new(),
        };
        rows.sort_by(by_score);
        rows.truncate(1);

        query.classification = Some(if rows.is_empty() {
            Classification::NoMatch
        } else {
            Classification::StrongMatch
        });
        query.results = rows;
        self.finish(&mut query)?;
        Ok(query)
    }

    /// Exact lookup by gazetteer id. The rendered name becomes the entry text.
    pub fn resolve_by_id(&self, geoid: &str) -> Result<PlaceQuery> {
        let mut query = PlaceQuery::new("");
        query.target = geoid.to_string();

        match self.gazetteer.lookup_by_id(geoid)? {
            Some(row) => {
                let place = describe_row(&self.gazetteer, &row)?;
                query.original_entry = place.display_name.clone();
                query.place_type = place.place_type;
                query.components = PlaceComponents {
                    prefix: String::new(),
                    city: place.city.clone(),
                    admin2: place.admin2.clone(),
                    admin1: place.admin1.clone(),
                    country_name: place.country_name.clone(),
                    country_iso: place.country_iso.clone(),
                };
                query.results = vec![row];
                query.classification = Some(Classification::StrongMatch);
                query.resolved = Some(place);
            }
            None => query.classification = Some(Classification::NoMatch),
        }
        query.set_type_text();
        query.status_text = status_text(&query, &self.config.rank);
        Ok(query)
    }

    fn run_advanced(
        &self,
        query: &mut PlaceQuery,
        search: &AdvancedSearch,
        wildcards: bool,
    ) -> Result<()> {
        let rows = self
            .gazetteer
            .lookup_place(&advanced_criteria(search, wildcards))?;
        let ranked = rank(rows, query.event_year, &self.config.rank);
        query.classification = Some(match ranked.rows.as_slice() {
            [] => Classification::NoMatch,
            [row] if row.score < self.config.rank.strong_match_max => Classification::StrongMatch,
            _ => Classification::PartialMatch,
        });
        self.attach(query, ranked);
        self.finish(query)
    }

    fn country_failure(&self, parts: &PlaceComponents) -> Option<Classification> {
        if parts.country_iso.is_empty() {
            Some(Classification::NoCountry)
        } else if !self.supported.contains(&parts.country_iso) {
            Some(Classification::NotSupported)
        } else {
            None
        }
    }

    fn attach(&self, query: &mut PlaceQuery, ranked: Ranked) {
        query.results = ranked.rows;
        query.flags = ranked.flags;
    }

    /// Prefix annotation, resolved place, type and status text.
    fn finish(&self, query: &mut PlaceQuery) -> Result<()> {
        // Flags of an advanced search are not part of the place name.
        let entry = match &query.advanced {
            Some(search) => search.target.as_str(),
            None => query.original_entry.as_str(),
        };
        annotate_prefixes(&self.gazetteer, entry, &mut query.results)?;

        let classification = query.classification();
        if classification == Classification::NotSupported {
            query.place_type = PlaceType::Country;
        }
        if classification.is_success() {
            if let Some(top) = query.results.first() {
                query.resolved = Some(describe_row(&self.gazetteer, top)?);
            }
        }

        query.set_type_text();
        query.status_text = status_text(query, &self.config.rank);
        debug!(
            input = %query.original_entry,
            ?classification,
            rows = query.results.len(),
            status = %query.status_text,
            "resolved"
        );
        Ok(())
    }
}

fn status_text(query: &PlaceQuery, config: &RankConfig) -> String {
    if query.flags.limited {
        format!(" First {} matches shown...", config.result_limit)
    } else {
        format!("{}  {}", query.type_text, query.classification().message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{CountryRecord, Dataset, MemoryGazetteer, PlaceRecord};

    fn place(geoid: &str, name: &str, iso: &str, admin1: &str, feature: &str) -> PlaceRecord {
        PlaceRecord {
            geoid: geoid.into(),
            name: name.into(),
            aliases: vec![],
            iso: iso.into(),
            admin1: admin1.into(),
            admin2: String::new(),
            lat: 50.0,
            lon: 1.0,
            feature: feature.into(),
            population: None,
        }
    }

    fn resolver() -> Resolver<MemoryGazetteer> {
        let gaz = MemoryGazetteer::from_dataset(Dataset {
            countries: vec![CountryRecord {
                iso: "gb".into(),
                name: "United Kingdom".into(),
                aliases: vec![],
            }],
            places: vec![
                place("0", "United Kingdom", "gb", "", "ADM0"),
                place("1", "England", "gb", "ENG", "ADM1"),
                place("2", "Dover", "gb", "ENG", "PPL"),
            ],
        });
        Resolver::new(gaz).unwrap()
    }

    #[test]
    fn country_only_input() {
        let q = resolver().resolve("United Kingdom", 0, false).unwrap();
        assert_eq!(q.classification(), Classification::StrongMatch);
        assert_eq!(q.type_text, "Country");
        assert_eq!(q.resolved.unwrap().display_name, "United Kingdom");
    }

    #[test]
    fn blank_input_is_no_match() {
        let q = resolver().resolve(" , ", 0, false).unwrap();
        assert_eq!(q.classification(), Classification::NoMatch);
        assert!(q.results.is_empty());
    }

    #[test]
    fn status_text_joins_type_and_message() {
        let q = resolver().resolve("Dover, England, UK", 0, false).unwrap();
        assert_eq!(q.classification(), Classification::StrongMatch);
        assert!(q.status_text.ends_with(Classification::StrongMatch.message()));
    }

    #[test]
    fn first_match_without_hits() {
        let q = resolver().resolve_first_match("Calais, England, UK").unwrap();
        assert_eq!(q.classification(), Classification::NoMatch);
    }

    #[cfg(feature = "json")]
    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg = ResolverConfig::from_json_str(r#"{ "rank": { "score_band": 5.0 } }"#).unwrap();
        assert_eq!(cfg.rank.score_band, 5.0);
        assert_eq!(cfg.rank.merge_distance, 0.5);
        assert!(cfg.use_wildcards);
    }
}
