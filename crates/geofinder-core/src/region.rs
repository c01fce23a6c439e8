// crates/geofinder-core/src/region.rs

//! Per-country canonicalization of admin1 (state/province) and admin2
//! (county/district) names.
//!
//! Historical or foreign-language names are rewritten to the names the
//! gazetteer uses today. Rules are whole-name mappings, so applying them to
//! an already-canonical name is a no-op.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Region naming rules for one country.
pub trait RegionRules: Send + Sync {
    /// Rewrites a normalized admin1 name. Must be idempotent.
    fn admin1(&self, name: &str) -> String {
        name.to_string()
    }

    /// Rewrites a normalized admin2 name, reporting whether it changed.
    /// An empty result means the historical unit has no modern counterpart.
    fn admin2(&self, name: &str) -> (String, bool) {
        (name.to_string(), false)
    }
}

/// Countries without special rules.
pub struct NoRules;

impl RegionRules for NoRules {}

/// Rules backed by fixed whole-name tables.
pub struct TableRules {
    admin1: HashMap<&'static str, &'static str>,
    admin2: HashMap<&'static str, &'static str>,
}

impl RegionRules for TableRules {
    fn admin1(&self, name: &str) -> String {
        self.admin1.get(name).copied().unwrap_or(name).to_string()
    }

    fn admin2(&self, name: &str) -> (String, bool) {
        match self.admin2.get(name) {
            Some(modern) => (modern.to_string(), true),
            None => (name.to_string(), false),
        }
    }
}

static GERMANY: Lazy<TableRules> = Lazy::new(|| TableRules {
    admin1: HashMap::from([("bayern", "bavaria")]),
    admin2: HashMap::new(),
});

// Regions merged in the 2016 reform collapse to the merged region's name.
static FRANCE: Lazy<TableRules> = Lazy::new(|| TableRules {
    admin1: HashMap::from([
        ("normandy", "normandie"),
        ("brittany", "bretagne"),
        ("burgundy", "bourgogne franche comte"),
        ("bourgogne", "bourgogne franche comte"),
        ("franche comte", "bourgogne franche comte"),
        ("aquitaine", "nouvelle aquitaine"),
        ("limousin", "nouvelle aquitaine"),
        ("poitou charentes", "nouvelle aquitaine"),
        ("alsace", "grand est"),
        ("champagne ardenne", "grand est"),
        ("lorraine", "grand est"),
        ("languedoc roussillon", "occitanie"),
        ("midi pyrenees", "occitanie"),
        ("nord pas de calais", "hauts de france"),
        ("picardy", "hauts de france"),
        ("picardie", "hauts de france"),
        ("auvergne", "auvergne rhone alpes"),
        ("rhone alpes", "auvergne rhone alpes"),
    ]),
    admin2: HashMap::new(),
});

static GREAT_BRITAIN: Lazy<TableRules> = Lazy::new(|| TableRules {
    admin1: HashMap::new(),
    admin2: HashMap::from([("middlesex", ""), ("breconshire", "sir powys")]),
});

static NO_RULES: NoRules = NoRules;

/// Returns the rules for a lowercase ISO2 country code.
pub fn rules_for(iso: &str) -> &'static dyn RegionRules {
    match iso {
        "de" => &*GERMANY,
        "fr" => &*FRANCE,
        "gb" => &*GREAT_BRITAIN,
        _ => &NO_RULES,
    }
}

/// Canonical admin1 name for `iso`.
pub fn admin1_normalize(name: &str, iso: &str) -> String {
    rules_for(iso).admin1(name)
}

/// Canonical admin2 name for `iso`, with a modified flag.
pub fn admin2_normalize(name: &str, iso: &str) -> (String, bool) {
    rules_for(iso).admin2(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn german_state_names() {
        assert_eq!(admin1_normalize("bayern", "de"), "bavaria");
        assert_eq!(admin1_normalize("bayern", "at"), "bayern");
    }

    #[test]
    fn french_regions_collapse_and_stay_put() {
        for old in ["limousin", "poitou charentes", "aquitaine"] {
            assert_eq!(admin1_normalize(old, "fr"), "nouvelle aquitaine");
        }
        for old in ["burgundy", "franche comte"] {
            let once = admin1_normalize(old, "fr");
            assert_eq!(once, "bourgogne franche comte");
            assert_eq!(admin1_normalize(&once, "fr"), once);
        }
    }

    #[test]
    fn british_counties() {
        assert_eq!(admin2_normalize("breconshire", "gb"), ("sir powys".into(), true));
        assert_eq!(admin2_normalize("middlesex", "gb"), (String::new(), true));
        assert_eq!(admin2_normalize("kent", "gb"), ("kent".into(), false));
        assert_eq!(admin2_normalize("middlesex", "us"), ("middlesex".into(), false));
    }
}
