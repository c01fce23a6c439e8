// crates/geofinder-core/src/model.rs
use crate::tables;
use crate::text::capwords;
use serde::{Deserialize, Serialize};

/// How well a resolution went. Set only by the ranking/classification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    StrongMatch,
    MultipleMatches,
    PartialMatch,
    WildcardMatch,
    SoundexMatch,
    Delete,
    NoCountry,
    NotSupported,
    NoMatch,
}

impl Classification {
    /// Classifications for which the top row is attached as the resolved place.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Classification::StrongMatch
                | Classification::PartialMatch
                | Classification::WildcardMatch
                | Classification::SoundexMatch
                | Classification::MultipleMatches
        )
    }

    /// Country-level outcomes; the cascade never overwrites these.
    pub fn is_country_failure(self) -> bool {
        matches!(self, Classification::NoCountry | Classification::NotSupported)
    }

    pub fn message(self) -> &'static str {
        match self {
            Classification::StrongMatch => "Matched! Click Save to accept:",
            Classification::MultipleMatches => {
                " Multiple matches.  Select one and click Verify or Double-Click"
            }
            Classification::NoMatch => "Not found.  Edit and click Verify.",
            Classification::NotSupported => {
                " Country is not supported. Skip or Add Country in Config"
            }
            Classification::NoCountry => "No Country found.",
            Classification::PartialMatch => "Partial match.  Click Save to accept:",
            Classification::Delete => "Empty.  Click Save to delete entry.",
            Classification::WildcardMatch => "Wildcard match. Click Save to accept:",
            Classification::SoundexMatch => "Soundex match. Click Save to accept:",
        }
    }
}

/// Which matching tier of the gazetteer produced a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupKind {
    #[default]
    Exact,
    Prefix,
    Wildcard,
    Soundex,
}

/// One gazetteer entity as returned by the query interface.
///
/// The phonetic key belongs to the stored entity; `prefix` is filled in per
/// resolution with the input text that the entity's own hierarchy doesn't
/// explain. They are separate fields and never share storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRow {
    pub name: String,
    /// Lowercase ISO2 country code.
    pub iso: String,
    pub admin1: String,
    pub admin2: String,
    pub lat: f64,
    pub lon: f64,
    pub feature: String,
    pub geoid: String,
    #[serde(default)]
    pub phonetic_key: String,
    #[serde(default)]
    pub prefix: String,
    /// Lower is better.
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub lookup: LookupKind,
}

impl GeoRow {
    /// The place type implied by this row's feature code.
    pub fn place_type(&self) -> PlaceType {
        match self.feature.as_str() {
            "ADM0" => PlaceType::Country,
            "ADM1" => PlaceType::Admin1,
            "ADM2" => PlaceType::Admin2,
            _ => PlaceType::City,
        }
    }
}

/// What kind of entity a place is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceType {
    #[default]
    Country,
    Admin1,
    Admin2,
    City,
    Prefix,
    AdvancedSearch,
}

/// Normalized hierarchy slots parsed from the input.
///
/// Empty strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceComponents {
    pub prefix: String,
    pub city: String,
    pub admin2: String,
    pub admin1: String,
    pub country_name: String,
    pub country_iso: String,
}

impl PlaceComponents {
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
            && self.city.is_empty()
            && self.admin2.is_empty()
            && self.admin1.is_empty()
            && self.country_name.is_empty()
    }

    /// The leftmost non-empty hierarchy slot.
    pub fn place_type(&self) -> PlaceType {
        if !self.city.is_empty() {
            PlaceType::City
        } else if !self.admin2.is_empty() {
            PlaceType::Admin2
        } else if !self.admin1.is_empty() {
            PlaceType::Admin1
        } else {
            PlaceType::Country
        }
    }
}

/// Structured search criteria supplied instead of a hierarchy string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedSearch {
    pub target: String,
    /// Lowercase ISO2; empty searches all countries.
    pub iso: String,
    /// Feature code filter, uppercase.
    pub feature: Option<String>,
}

/// Which kind of entity the search target names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRole {
    Country,
    Admin1,
    Admin2,
    City,
    /// No role restriction (advanced search).
    Any,
}

/// One immutable query against the gazetteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub target: String,
    pub role: TargetRole,
    pub iso: String,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub feature: Option<String>,
    /// Enables the wildcard and sound-alike tiers.
    pub wildcards: bool,
}

/// Side information produced by ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFlags {
    /// The candidate pool exceeded the display limit.
    pub limited: bool,
    /// Some kept rows have names newer than the event year.
    pub date_filtered: bool,
}

/// The top-ranked row rendered for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub display_name: String,
    pub prefix: String,
    pub place_type: PlaceType,
    pub city: String,
    pub admin2: String,
    pub admin1: String,
    pub country_name: String,
    pub country_iso: String,
    pub lat: f64,
    pub lon: f64,
    pub feature: String,
    pub geoid: String,
}

impl ResolvedPlace {
    /// Display name with the prefix annotation in front, if any.
    pub fn full_title(&self) -> String {
        if self.prefix.is_empty() {
            self.display_name.clone()
        } else {
            format!("{}, {}", self.prefix, self.display_name)
        }
    }
}

/// Renders `city, admin2, admin1, country` trimmed to the given place type,
/// title-cased.
pub fn format_display_name(
    place_type: PlaceType,
    city: &str,
    admin2: &str,
    admin1: &str,
    country: &str,
) -> String {
    let name = match place_type {
        PlaceType::Country => country.to_string(),
        PlaceType::Admin1 => format!("{admin1}, {country}"),
        PlaceType::Admin2 => format!("{admin2}, {admin1}, {country}"),
        _ => format!("{city}, {admin2}, {admin1}, {country}"),
    };
    capwords(&name)
}

/// Working state of one resolution request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceQuery {
    pub original_entry: String,
    pub components: PlaceComponents,
    pub place_type: PlaceType,
    /// The string submitted by the primary lookup.
    pub target: String,
    /// Event year used for temporal filtering; 0 disables the filter.
    pub event_year: i32,
    /// Set when the request is a structured search, not a hierarchy parse.
    pub advanced: Option<AdvancedSearch>,
    /// The country token was an alternate or native-language name.
    pub country_renamed: bool,
    /// The admin2 token was a historical name rewritten by region rules.
    pub admin2_renamed: bool,
    pub results: Vec<GeoRow>,
    pub classification: Option<Classification>,
    pub flags: ResultFlags,
    pub resolved: Option<ResolvedPlace>,
    pub type_text: String,
    pub status_text: String,
}

impl PlaceQuery {
    pub fn new(original_entry: &str) -> Self {
        PlaceQuery {
            original_entry: original_entry.to_string(),
            ..Default::default()
        }
    }

    /// The final classification; `NoMatch` until one is assigned.
    pub fn classification(&self) -> Classification {
        self.classification.unwrap_or(Classification::NoMatch)
    }

    pub fn is_advanced(&self) -> bool {
        self.advanced.is_some()
    }

    /// Sets the human-readable type of the outcome.
    pub(crate) fn set_type_text(&mut self) {
        let iso = self.components.country_iso.as_str();
        self.type_text = if self.classification() == Classification::NoCountry {
            "Country".to_string()
        } else if let Some(place) = &self.resolved {
            if !place.prefix.is_empty() {
                "Place".to_string()
            } else {
                match place.place_type {
                    PlaceType::Country => "Country".to_string(),
                    PlaceType::Admin1 => tables::district1_type(&place.country_iso).to_string(),
                    PlaceType::Admin2 => "County".to_string(),
                    _ => tables::type_name(&place.feature).to_string(),
                }
            }
        } else {
            match self.place_type {
                PlaceType::Country => "Country".to_string(),
                PlaceType::Admin1 => tables::district1_type(iso).to_string(),
                PlaceType::Admin2 => "County".to_string(),
                PlaceType::Prefix => "Place".to_string(),
                PlaceType::City | PlaceType::AdvancedSearch => String::new(),
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_follows_place_type() {
        assert_eq!(
            format_display_name(PlaceType::City, "dover", "kent", "england", "united kingdom"),
            "Dover, Kent, England, United Kingdom"
        );
        assert_eq!(
            format_display_name(PlaceType::Admin1, "", "", "bavaria", "germany"),
            "Bavaria, Germany"
        );
    }

    #[test]
    fn full_title_prepends_prefix() {
        let place = ResolvedPlace {
            display_name: "Dover, Kent, England, United Kingdom".into(),
            prefix: "St Mary's Church".into(),
            ..Default::default()
        };
        assert_eq!(
            place.full_title(),
            "St Mary's Church, Dover, Kent, England, United Kingdom"
        );
    }

    #[test]
    fn country_failures_are_not_successes() {
        assert!(Classification::NoCountry.is_country_failure());
        assert!(!Classification::NotSupported.is_success());
        assert!(Classification::MultipleMatches.is_success());
    }
}
