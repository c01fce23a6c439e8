// crates/geofinder-core/src/search.rs

//! # Lookup Cascade
//!
//! The parse of a place string is often wrong by one slot: a venue lands in
//! the city position, a town is written where the county belongs, and so on.
//! Rather than guessing, the cascade submits every plausible reading to the
//! gazetteer and pools the rows. Each reading is an immutable
//! [`SearchCriteria`] built from the parsed components, so no hypothesis can
//! leak into the next one or into the caller's query.

use crate::error::Result;
use crate::model::{
    format_display_name, AdvancedSearch, GeoRow, PlaceComponents, PlaceQuery, ResolvedPlace,
    SearchCriteria, TargetRole,
};
use crate::text::{capwords, search_normalize};
use crate::traits::Gazetteer;
use tracing::debug;

/// One reading of the parsed hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hypothesis {
    /// The parse as-is.
    Standard,
    /// Free text in front of the hierarchy names the place itself.
    PrefixAsCity,
    /// The county slot holds a town.
    Admin2AsCity,
    /// The city slot holds a county.
    CityAsAdmin2,
}

impl Hypothesis {
    /// All hypotheses, in submission order.
    pub const CASCADE: [Hypothesis; 4] = [
        Hypothesis::Standard,
        Hypothesis::PrefixAsCity,
        Hypothesis::Admin2AsCity,
        Hypothesis::CityAsAdmin2,
    ];

    /// The criteria for this reading, or `None` when the slot it promotes is
    /// empty.
    pub fn criteria(self, parts: &PlaceComponents, wildcards: bool) -> Option<SearchCriteria> {
        let base = SearchCriteria {
            target: String::new(),
            role: TargetRole::City,
            iso: parts.country_iso.clone(),
            admin1: non_empty(&parts.admin1),
            admin2: non_empty(&parts.admin2),
            feature: None,
            wildcards,
        };

        match self {
            Hypothesis::Standard => {
                let (target, role) = if !parts.city.is_empty() {
                    (parts.city.clone(), TargetRole::City)
                } else if !parts.admin2.is_empty() {
                    (parts.admin2.clone(), TargetRole::Admin2)
                } else if !parts.admin1.is_empty() {
                    (parts.admin1.clone(), TargetRole::Admin1)
                } else if !parts.country_name.is_empty() {
                    (parts.country_name.clone(), TargetRole::Country)
                } else {
                    return None;
                };
                // A slot never filters on itself.
                Some(SearchCriteria {
                    target,
                    role,
                    admin1: if role == TargetRole::Admin1 { None } else { base.admin1 },
                    admin2: if role == TargetRole::Admin2 { None } else { base.admin2 },
                    ..base
                })
            }
            Hypothesis::PrefixAsCity => {
                let target = search_normalize(&parts.prefix);
                (!target.is_empty()).then(|| SearchCriteria { target, ..base })
            }
            Hypothesis::Admin2AsCity => (!parts.admin2.is_empty()).then(|| SearchCriteria {
                target: parts.admin2.clone(),
                admin2: None,
                ..base
            }),
            Hypothesis::CityAsAdmin2 => (!parts.city.is_empty()).then(|| SearchCriteria {
                target: parts.city.clone(),
                role: TargetRole::Admin2,
                admin2: None,
                ..base
            }),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Criteria for a structured search: no hierarchy filters, any role.
pub fn advanced_criteria(search: &AdvancedSearch, wildcards: bool) -> SearchCriteria {
    SearchCriteria {
        target: search.target.clone(),
        role: TargetRole::Any,
        iso: search.iso.clone(),
        admin1: None,
        admin2: None,
        feature: search.feature.clone(),
        wildcards,
    }
}

/// Submits every applicable hypothesis and pools the rows.
///
/// A later hypothesis never discards what an earlier one found; duplicates
/// are left for the ranker. The first gazetteer error aborts the cascade.
pub fn run_cascade<G: Gazetteer + ?Sized>(
    gazetteer: &G,
    query: &PlaceQuery,
    wildcards: bool,
) -> Result<Vec<GeoRow>> {
    let mut pool = Vec::new();
    for hypothesis in Hypothesis::CASCADE {
        let Some(criteria) = hypothesis.criteria(&query.components, wildcards) else {
            continue;
        };
        let rows = gazetteer.lookup_place(&criteria)?;
        debug!(
            ?hypothesis,
            search_target = %criteria.target,
            role = ?criteria.role,
            iso = %criteria.iso,
            rows = rows.len(),
            "cascade lookup"
        );
        pool.extend(rows);
    }
    Ok(pool)
}

/// Renders a gazetteer row with display names for its codes.
pub fn describe_row<G: Gazetteer + ?Sized>(gazetteer: &G, row: &GeoRow) -> Result<ResolvedPlace> {
    let place_type = row.place_type();
    let country_name = gazetteer
        .country_name(&row.iso)?
        .unwrap_or_else(|| row.iso.to_uppercase());
    let admin1 = if row.admin1.is_empty() {
        String::new()
    } else {
        gazetteer
            .admin1_name(&row.iso, &row.admin1)?
            .unwrap_or_else(|| row.admin1.clone())
    };
    let admin2 = if row.admin2.is_empty() {
        String::new()
    } else {
        gazetteer
            .admin2_name(&row.iso, &row.admin1, &row.admin2)?
            .unwrap_or_else(|| row.admin2.clone())
    };

    let display_name = format_display_name(place_type, &row.name, &admin2, &admin1, &country_name);
    Ok(ResolvedPlace {
        display_name,
        prefix: row.prefix.clone(),
        place_type,
        city: row.name.clone(),
        admin2,
        admin1,
        country_name,
        country_iso: row.iso.clone(),
        lat: row.lat,
        lon: row.lon,
        feature: row.feature.clone(),
        geoid: row.geoid.clone(),
    })
}

/// The part of `original_entry` that the row's own name does not explain.
///
/// Looks at the first input token, and at the second only when the input has
/// exactly two tokens. Tokens already contained in the row's display name and
/// wildcard patterns are skipped.
pub fn prefix_for(original_entry: &str, display_name: &str) -> String {
    let name = search_normalize(display_name);
    let tokens: Vec<&str> = original_entry.split(',').collect();

    let mut words = Vec::new();
    for (num, token) in tokens.iter().take(2).enumerate() {
        let item = search_normalize(token);
        if item.is_empty() || item.contains('*') || name.contains(&item) {
            continue;
        }
        if num == 1 && tokens.len() != 2 {
            continue;
        }
        words.push(capwords(&item));
    }
    words.join(" ")
}

/// Fills in the prefix annotation of every row.
pub fn annotate_prefixes<G: Gazetteer + ?Sized>(
    gazetteer: &G,
    original_entry: &str,
    rows: &mut [GeoRow],
) -> Result<()> {
    for row in rows.iter_mut() {
        let place = describe_row(gazetteer, row)?;
        row.prefix = prefix_for(original_entry, &place.display_name);
    }
    Ok(())
}
