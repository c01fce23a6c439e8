// crates/geofinder-core/src/parser.rs

//! # Hierarchy Parser
//!
//! Splits `prefix, city, admin2, admin1, country` from the right. Empty
//! tokens keep their position but count as absent components.

use crate::country::CountryDictionary;
use crate::model::{AdvancedSearch, PlaceQuery, PlaceType};
use crate::region::{admin1_normalize, admin2_normalize};
use crate::text::{country_normalize, search_normalize};
use clap::Parser;
use tracing::debug;

/// Flags accepted inside a place string, e.g. `Dover --iso gb --feature PPL`.
#[derive(Debug, Parser)]
#[command(
    name = "advanced-search",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct AdvancedArgs {
    /// Feature code (PPL, ADM2, CH, ...)
    #[arg(short = 'f', long = "feature")]
    feature: Option<String>,

    /// ISO2 country code
    #[arg(short = 'i', long = "iso")]
    iso: Option<String>,

    /// Same as --iso
    #[arg(short = 'c', long = "country")]
    country: Option<String>,
}

/// Parses a raw place string into a fresh [`PlaceQuery`].
///
/// Never fails: unparseable input yields empty components.
pub fn parse_place(raw: &str, countries: &CountryDictionary) -> PlaceQuery {
    let mut query = PlaceQuery::new(raw);

    if raw.contains("--") {
        let search = parse_advanced(raw);
        query.target = search.target.clone();
        query.components.city = search.target.clone();
        query.components.country_iso = search.iso.clone();
        query.place_type = PlaceType::AdvancedSearch;
        query.advanced = Some(search);
        return query;
    }

    // Open bracket/paren separate components; closing ones are stripped later.
    let res = raw.replace(['[', '('], ",");
    let tokens: Vec<&str> = res.split(',').collect();
    let n = tokens.len();

    if let Some(country) = tokens.last() {
        let (name, renamed) = country_normalize(&search_normalize(country));
        query.country_renamed = renamed;
        if let Some(iso) = countries.iso_for(&name) {
            query.components.country_iso = iso.to_string();
        }
        query.components.country_name = name;
    }
    let iso = query.components.country_iso.clone();
    let parts = &mut query.components;

    if n > 1 {
        parts.admin1 = admin1_normalize(&search_normalize(tokens[n - 2]), &iso);
    }
    if n > 2 {
        let (admin2, renamed) = admin2_normalize(&search_normalize(tokens[n - 3]), &iso);
        parts.admin2 = admin2;
        query.admin2_renamed = renamed;
    }
    if n > 3 {
        parts.city = search_normalize(tokens[n - 4]);
        parts.prefix = tokens[..n - 4]
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    // "New York, New York" means the city, not the county.
    if parts.city.is_empty() && parts.admin2 == "new york" {
        parts.admin2 = "new york city".to_string();
    }

    query.place_type = query.components.place_type();
    query.target = match query.place_type {
        PlaceType::City => query.components.city.clone(),
        PlaceType::Admin2 => query.components.admin2.clone(),
        PlaceType::Admin1 => query.components.admin1.clone(),
        _ => query.components.country_name.clone(),
    };

    debug!(
        input = raw,
        city = %query.components.city,
        admin2 = %query.components.admin2,
        admin1 = %query.components.admin1,
        country = %query.components.country_name,
        iso = %query.components.country_iso,
        prefix = %query.components.prefix,
        country_renamed = query.country_renamed,
        admin2_renamed = query.admin2_renamed,
        "parsed place"
    );
    query
}

/// Parses the inline advanced-search form: first token is the target, tokens
/// containing `--` carry flags. Bad flags are logged and ignored.
pub fn parse_advanced(raw: &str) -> AdvancedSearch {
    let tokens: Vec<&str> = raw.split(',').collect();
    let first = tokens.first().copied().unwrap_or_default();
    let target_text = first.split("--").next().unwrap_or_default();
    let mut search = AdvancedSearch {
        target: search_normalize(target_text),
        ..Default::default()
    };

    let args: Vec<String> = tokens
        .iter()
        .filter_map(|t| t.find("--").map(|at| &t[at..]))
        .flat_map(|t| t.split_whitespace().map(str::to_string))
        .collect();

    match AdvancedArgs::try_parse_from(args) {
        Ok(opts) => {
            if let Some(iso) = opts.country.or(opts.iso) {
                search.iso = iso.trim().to_lowercase();
            }
            search.feature = opts.feature.map(|f| f.trim().to_uppercase());
        }
        Err(e) => debug!(error = %e, input = raw, "ignoring advanced search flags"),
    }
    debug!(
        search_target = %search.target,
        iso = %search.iso,
        feature = ?search.feature,
        "advanced search"
    );
    search
}
