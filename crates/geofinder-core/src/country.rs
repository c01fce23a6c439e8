// crates/geofinder-core/src/country.rs
use crate::text::search_normalize;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// English country names and common aliases, already search-normalized.
static BUILTIN_COUNTRIES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("argentina", "ar"),
        ("australia", "au"),
        ("austria", "at"),
        ("belgium", "be"),
        ("brazil", "br"),
        ("bulgaria", "bg"),
        ("canada", "ca"),
        ("chile", "cl"),
        ("china", "cn"),
        ("croatia", "hr"),
        ("cuba", "cu"),
        ("czech republic", "cz"),
        ("czechia", "cz"),
        ("denmark", "dk"),
        ("egypt", "eg"),
        ("estonia", "ee"),
        ("finland", "fi"),
        ("france", "fr"),
        ("germany", "de"),
        ("great britain", "gb"),
        ("greece", "gr"),
        ("hungary", "hu"),
        ("iceland", "is"),
        ("india", "in"),
        ("ireland", "ie"),
        ("israel", "il"),
        ("italy", "it"),
        ("japan", "jp"),
        ("latvia", "lv"),
        ("lithuania", "lt"),
        ("luxembourg", "lu"),
        ("mexico", "mx"),
        ("netherlands", "nl"),
        ("the netherlands", "nl"),
        ("holland", "nl"),
        ("nederland", "nl"),
        ("new zealand", "nz"),
        ("norway", "no"),
        ("poland", "pl"),
        ("portugal", "pt"),
        ("romania", "ro"),
        ("russia", "ru"),
        ("scotland", "gb"),
        ("slovakia", "sk"),
        ("slovenia", "si"),
        ("south africa", "za"),
        ("spain", "es"),
        ("sweden", "se"),
        ("switzerland", "ch"),
        ("turkey", "tr"),
        ("uk", "gb"),
        ("ukraine", "ua"),
        ("united kingdom", "gb"),
        ("usa", "us"),
        ("us", "us"),
    ]
});

/// Maps normalized country names to lowercase ISO2 codes.
#[derive(Debug, Clone)]
pub struct CountryDictionary {
    names: HashMap<String, String>,
}

impl Default for CountryDictionary {
    fn default() -> Self {
        let names = BUILTIN_COUNTRIES
            .iter()
            .map(|(name, iso)| (name.to_string(), iso.to_string()))
            .collect();
        CountryDictionary { names }
    }
}

impl CountryDictionary {
    /// A dictionary with no entries.
    pub fn empty() -> Self {
        CountryDictionary {
            names: HashMap::new(),
        }
    }

    /// Adds (or overrides) a name for `iso`.
    pub fn insert(&mut self, name: &str, iso: &str) {
        let key = search_normalize(name);
        if !key.is_empty() {
            self.names.insert(key, iso.to_lowercase());
        }
    }

    /// ISO2 code for an already-normalized country name.
    pub fn iso_for(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
