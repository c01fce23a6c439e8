// crates/geofinder-core/src/memory.rs

//! An in-memory [`Gazetteer`] for tests, benches and small embedded datasets.

use crate::error::{GeoError, Result};
use crate::model::{GeoRow, LookupKind, SearchCriteria, TargetRole};
use crate::tables::feature_rank;
use crate::text::{normalize_match_title, search_normalize};
use crate::traits::Gazetteer;
use regex::Regex;
use rphonetic::{DoubleMetaphone, Encoder};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Score added for each admin filter that names no known division.
pub const UNRESOLVED_FILTER_PENALTY: f64 = 3.0;

/// A country as stored in a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub iso: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A place as stored in a dataset. `admin1`/`admin2` are division codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub geoid: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub iso: String,
    #[serde(default)]
    pub admin1: String,
    #[serde(default)]
    pub admin2: String,
    pub lat: f64,
    pub lon: f64,
    pub feature: String,
    #[serde(default)]
    pub population: Option<u64>,
}

/// The on-disk shape of a gazetteer dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub countries: Vec<CountryRecord>,
    #[serde(default)]
    pub places: Vec<PlaceRecord>,
}

#[derive(Debug, Clone)]
struct Entry {
    row: GeoRow,
    /// Normalized name and aliases.
    keys: Vec<String>,
}

/// Gazetteer held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryGazetteer {
    countries: HashMap<String, CountryRecord>,
    entries: Vec<Entry>,
    by_key: HashMap<String, Vec<usize>>,
    by_id: HashMap<String, usize>,
}

impl MemoryGazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a gazetteer from a dataset. Malformed records are skipped.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let mut gaz = Self::new();
        for country in dataset.countries {
            gaz.add_country(country);
        }
        let total = dataset.places.len();
        for place in dataset.places {
            let geoid = place.geoid.clone();
            if let Err(e) = gaz.add_place(place) {
                warn!(%geoid, error = %e, "skipping place record");
            }
        }
        info!(
            countries = gaz.countries.len(),
            places = gaz.entries.len(),
            skipped = total - gaz.entries.len(),
            "gazetteer loaded"
        );
        gaz
    }

    pub fn add_country(&mut self, mut country: CountryRecord) {
        country.iso = country.iso.trim().to_lowercase();
        self.countries.insert(country.iso.clone(), country);
    }

    /// Adds a place. Populated places are re-coded by population, and US
    /// states are also indexed under their two-letter code.
    pub fn add_place(&mut self, place: PlaceRecord) -> Result<()> {
        if place.geoid.trim().is_empty() {
            return Err(GeoError::InvalidData(format!("place {:?} has no id", place.name)));
        }
        if !place.lat.is_finite() || !place.lon.is_finite() {
            return Err(GeoError::InvalidData(format!(
                "place {} has invalid coordinates",
                place.geoid
            )));
        }
        if self.by_id.contains_key(&place.geoid) {
            return Err(GeoError::InvalidData(format!("duplicate id {}", place.geoid)));
        }

        let name = search_normalize(&place.name);
        if name.is_empty() {
            return Err(GeoError::InvalidData(format!("place {} has no name", place.geoid)));
        }
        let iso = place.iso.trim().to_lowercase();
        let feature = population_feature(&place.feature, place.population);

        let mut keys = vec![name.clone()];
        keys.extend(
            place
                .aliases
                .iter()
                .map(|a| search_normalize(a))
                .filter(|a| !a.is_empty()),
        );
        if iso == "us" && place.feature == "ADM1" && !place.admin1.is_empty() {
            keys.push(place.admin1.to_lowercase());
        }
        keys.dedup();

        let row = GeoRow {
            phonetic_key: phonetic_key(&name),
            name: place.name,
            iso,
            admin1: place.admin1,
            admin2: place.admin2,
            lat: place.lat,
            lon: place.lon,
            feature,
            geoid: place.geoid,
            prefix: String::new(),
            score: 0.0,
            lookup: LookupKind::Exact,
        };

        let idx = self.entries.len();
        for key in &keys {
            self.by_key.entry(key.clone()).or_default().push(idx);
        }
        self.by_id.insert(row.geoid.clone(), idx);
        self.entries.push(Entry { row, keys });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Code of the first-level division named `name` in `iso`.
    fn admin1_code(&self, iso: &str, name: &str) -> Option<String> {
        self.by_key
            .get(name)?
            .iter()
            .map(|&i| &self.entries[i].row)
            .find(|r| r.feature == "ADM1" && (iso.is_empty() || r.iso == iso))
            .map(|r| r.admin1.clone())
    }

    /// Code of the second-level division named `name`, within `admin1` when known.
    fn admin2_code(&self, iso: &str, admin1: Option<&str>, name: &str) -> Option<String> {
        self.by_key
            .get(name)?
            .iter()
            .map(|&i| &self.entries[i].row)
            .find(|r| {
                r.feature == "ADM2"
                    && (iso.is_empty() || r.iso == iso)
                    && admin1.map_or(true, |a1| r.admin1 == a1)
            })
            .map(|r| r.admin2.clone())
    }

    fn division_row(
        &self,
        iso: &str,
        feature: &str,
        admin1: &str,
        admin2: &str,
    ) -> Option<&GeoRow> {
        self.entries.iter().map(|e| &e.row).find(|r| {
            r.feature == feature
                && r.iso == iso
                && r.admin1.eq_ignore_ascii_case(admin1)
                && (feature != "ADM2" || r.admin2.eq_ignore_ascii_case(admin2))
        })
    }

    fn accepts(&self, row: &GeoRow, c: &SearchCriteria, filters: &Filters) -> bool {
        let role_ok = match c.role {
            TargetRole::Country => row.feature == "ADM0",
            TargetRole::Admin1 => row.feature == "ADM1",
            TargetRole::Admin2 => row.feature == "ADM2",
            TargetRole::City => !matches!(row.feature.as_str(), "ADM0" | "ADM1" | "ADM2"),
            TargetRole::Any => true,
        };
        role_ok
            && (c.iso.is_empty() || row.iso == c.iso)
            && c.feature.as_deref().map_or(true, |f| row.feature == f)
            && filters.admin1.as_deref().map_or(true, |a1| row.admin1 == a1)
            && filters.admin2.as_deref().map_or(true, |a2| row.admin2 == a2)
    }

    fn tier_hits(
        &self,
        tier: LookupKind,
        c: &SearchCriteria,
        filters: &Filters,
    ) -> Vec<(usize, usize)> {
        let target = c.target.as_str();
        // (entry, match-title length of the matched key)
        let mut hits: Vec<(usize, usize)> = Vec::new();
        match tier {
            LookupKind::Exact => {
                if let Some(ids) = self.by_key.get(target) {
                    hits.extend(ids.iter().map(|&i| (i, match_len(target))));
                }
            }
            LookupKind::Prefix => {
                for (i, e) in self.entries.iter().enumerate() {
                    if let Some(k) = e.keys.iter().find(|k| k.starts_with(target)) {
                        hits.push((i, match_len(k)));
                    }
                }
            }
            LookupKind::Wildcard => {
                let Some(re) = wildcard_regex(target) else {
                    return hits;
                };
                for (i, e) in self.entries.iter().enumerate() {
                    if let Some(k) = e.keys.iter().find(|k| re.is_match(k)) {
                        hits.push((i, match_len(k)));
                    }
                }
            }
            LookupKind::Soundex => {
                let key = phonetic_key(target);
                if key.is_empty() {
                    return hits;
                }
                for (i, e) in self.entries.iter().enumerate() {
                    if e.row.phonetic_key == key {
                        hits.push((i, match_len(&e.keys[0])));
                    }
                }
            }
        }
        hits.retain(|&(i, _)| self.accepts(&self.entries[i].row, c, filters));
        hits.sort_unstable_by_key(|&(i, _)| i);
        hits.dedup_by_key(|&mut (i, _)| i);
        hits
    }
}

/// Admin filters resolved to division codes.
#[derive(Debug, Default)]
struct Filters {
    admin1: Option<String>,
    admin2: Option<String>,
    unresolved: u32,
}

/// Length of a key once connector and noise words are dropped, so `villa de
/// leyva` is as close to `villa` as `villa leyva` is.
fn match_len(key: &str) -> usize {
    normalize_match_title(key).len()
}

/// Double Metaphone primary code.
fn phonetic_key(name: &str) -> String {
    DoubleMetaphone::default().encode(name)
}

fn population_feature(feature: &str, population: Option<u64>) -> String {
    match population {
        Some(p) if feature.contains("PP") => {
            if p > 1_000_000 {
                "PP1M".to_string()
            } else if p > 100_000 {
                "P1HK".to_string()
            } else if p < 10_000 {
                "PPLL".to_string()
            } else {
                feature.to_string()
            }
        }
        _ => feature.to_string(),
    }
}

/// `dov*r` becomes `^dov.*r$`. `None` when the pattern has no `*`.
fn wildcard_regex(pattern: &str) -> Option<Regex> {
    if !pattern.contains('*') {
        return None;
    }
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).ok()
}

fn tier_base(tier: LookupKind) -> f64 {
    match tier {
        LookupKind::Exact => 0.0,
        LookupKind::Prefix => 5.0,
        LookupKind::Wildcard => 10.0,
        LookupKind::Soundex => 20.0,
    }
}

impl Gazetteer for MemoryGazetteer {
    fn lookup_place(&self, c: &SearchCriteria) -> Result<Vec<GeoRow>> {
        if c.target.is_empty() {
            return Ok(Vec::new());
        }

        let mut filters = Filters::default();
        if let Some(name) = c.admin1.as_deref() {
            match self.admin1_code(&c.iso, name) {
                Some(code) => filters.admin1 = Some(code),
                None => filters.unresolved += 1,
            }
        }
        if let Some(name) = c.admin2.as_deref() {
            match self.admin2_code(&c.iso, filters.admin1.as_deref(), name) {
                Some(code) => filters.admin2 = Some(code),
                None => filters.unresolved += 1,
            }
        }

        let mut tiers = vec![LookupKind::Exact, LookupKind::Prefix];
        if c.wildcards {
            tiers.push(LookupKind::Wildcard);
            if !c.target.contains('*') {
                tiers.push(LookupKind::Soundex);
            }
        }

        for tier in tiers {
            let hits = self.tier_hits(tier, c, &filters);
            if hits.is_empty() {
                continue;
            }
            debug!(search_target = %c.target, ?tier, hits = hits.len(), "memory lookup");
            let penalty = f64::from(filters.unresolved) * UNRESOLVED_FILTER_PENALTY;
            let target_len = match_len(&c.target);
            let rows = hits
                .into_iter()
                .map(|(i, key_len)| {
                    let mut row = self.entries[i].row.clone();
                    let length_diff = if tier == LookupKind::Exact {
                        0.0
                    } else {
                        key_len.abs_diff(target_len) as f64 * 0.5
                    };
                    row.score =
                        tier_base(tier) + penalty + feature_rank(&row.feature) / 20.0 + length_diff;
                    row.lookup = tier;
                    row
                })
                .collect();
            return Ok(rows);
        }
        Ok(Vec::new())
    }

    fn lookup_by_id(&self, geoid: &str) -> Result<Option<GeoRow>> {
        Ok(self.by_id.get(geoid).map(|&i| self.entries[i].row.clone()))
    }

    fn country_name(&self, iso: &str) -> Result<Option<String>> {
        Ok(self
            .countries
            .get(&iso.to_lowercase())
            .map(|c| c.name.clone()))
    }

    fn supported_countries(&self) -> Result<HashSet<String>> {
        Ok(self.countries.keys().cloned().collect())
    }

    fn admin1_name(&self, iso: &str, admin1: &str) -> Result<Option<String>> {
        Ok(self
            .division_row(iso, "ADM1", admin1, "")
            .map(|r| r.name.clone()))
    }

    fn admin2_name(&self, iso: &str, admin1: &str, admin2: &str) -> Result<Option<String>> {
        Ok(self
            .division_row(iso, "ADM2", admin1, admin2)
            .map(|r| r.name.clone()))
    }

    fn country_aliases(&self, iso: &str) -> Result<Vec<String>> {
        Ok(self
            .countries
            .get(&iso.to_lowercase())
            .map(|c| c.aliases.clone())
            .unwrap_or_default())
    }
}
