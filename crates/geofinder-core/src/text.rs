// crates/geofinder-core/src/text.rs

//! # Normalizer
//!
//! Pure text transforms applied to place names before they are used as
//! search keys. Everything here is deterministic and locale-independent.
//!
//! Two strings are derived from a place name and must stay distinct:
//! - the **search** string ([`normalize`]), used as the lookup key;
//! - the **match-quality** string ([`normalize_match_title`]), which also
//!   drops connector and noise words and is only used to compare how close
//!   a candidate is to the input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Which punctuation survives the character filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommaMode {
    /// Commas become spaces. `.` is kept so `st.` and `co.` can be rewritten.
    Strip,
    /// Commas are kept (full titles). `.` becomes a space.
    Keep,
}

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use geofinder_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Tromsø"), "tromso");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Full search normalization of a place name.
///
/// Folds to lowercase ASCII, strips punctuation outside the allow-list for
/// `mode`, canonicalizes common phrases (Saint variants, `co.`, `united
/// states`, `county of X` ...) and trims. The result is idempotent:
/// `normalize(&normalize(s, m), m) == normalize(s, m)`.
///
/// ```rust
/// use geofinder_core::text::{normalize, CommaMode};
///
/// assert_eq!(normalize("Sainte-Foy, Québec", CommaMode::Keep), "st foy, quebec");
/// assert_eq!(normalize("County of Kent", CommaMode::Strip), "kent county");
/// ```
pub fn normalize(text: &str, mode: CommaMode) -> String {
    let folded = fold_key(text);
    let filtered: String = folded
        .chars()
        .map(|ch| if is_allowed(ch, mode) { ch } else { ' ' })
        .collect();
    canonicalize_phrases(&filtered)
}

/// Shorthand for the comma-keeping search normalization used on single
/// hierarchy tokens and full titles.
#[inline]
pub fn search_normalize(text: &str) -> String {
    normalize(text, CommaMode::Keep)
}

fn is_allowed(ch: char, mode: CommaMode) -> bool {
    if ch.is_ascii_alphanumeric() || ch == ' ' || matches!(ch, '$' | '*' | '\'') {
        return true;
    }
    match mode {
        CommaMode::Strip => ch == '.',
        CommaMode::Keep => ch == ',',
    }
}

static RE_RK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\br\.k\. |\br k ").expect("valid regex"));
static RE_SAINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:saints|sainte|sint|saint|sankt) |\bst\. ").expect("valid regex")
});
static RE_COUNTY_ABBR: Lazy<Regex> = Lazy::new(|| Regex::new(r" co\.").expect("valid regex"));
static RE_USA: Lazy<Regex> = Lazy::new(|| Regex::new(r"united states").expect("valid regex"));
static RE_COUNTY_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcounty of ([^,]+)").expect("valid regex"));
static RE_TOWNSHIP_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\btownship of ([^,]+)").expect("valid regex"));
static RE_CATHEDRAL_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcathedral of ([^,]+)").expect("valid regex"));

const MAX_PHRASE_PASSES: usize = 32;

/// Phrase-level canonicalization, repeated until the text stops changing.
fn canonicalize_phrases(text: &str) -> String {
    let mut current = collapse_spaces(text);
    for _ in 0..MAX_PHRASE_PASSES {
        let next = phrase_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn phrase_pass(text: &str) -> String {
    let res = RE_RK.replace_all(text, "rooms katholieke ");
    let res = RE_SAINT.replace_all(&res, "st ");
    let res = RE_COUNTY_ABBR.replace_all(&res, " county");
    let res = RE_USA.replace_all(&res, "usa");
    let res = RE_COUNTY_OF.replace_all(&res, "$1 county");
    let res = RE_TOWNSHIP_OF.replace_all(&res, "$1 township");
    let res = RE_CATHEDRAL_OF.replace_all(&res, "$1 cathedral");

    let mut res = collapse_spaces(&res);
    while let Some(rest) = res.strip_prefix("town of ") {
        res = rest.to_string();
    }
    if !res.contains("amt") {
        if let Some(rest) = res.strip_prefix("mt ") {
            res = format!("mount {rest}");
        }
    }
    collapse_spaces(&res)
}

/// Collapses runs of spaces and trims both ends.
fn collapse_spaces(text: &str) -> String {
    text.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

static RE_NOISE: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"normandy american ", "normandie american "),
        (r"nouveau brunswick", " "),
        (r" de ", " "),
        (r" di ", " "),
        (r" du ", " "),
        (r" of ", " "),
        (r"city of ", " "),
        (r"politischer bezirk ", " "),
    ]
    .into_iter()
    .map(|(pattern, with)| (Regex::new(pattern).expect("valid regex"), with))
    .collect()
});

/// Removes connector words and country-specific noise phrases.
///
/// Only for match-quality comparison. Never feed the result to a lookup.
pub fn remove_noise_words(text: &str) -> String {
    let mut res = text.to_string();
    for (re, with) in RE_NOISE.iter() {
        res = re.replace_all(&res, *with).into_owned();
    }
    collapse_spaces(&res)
}

/// Normalizes a full title for match-quality comparison.
pub fn normalize_match_title(full_title: &str) -> String {
    let res = remove_noise_words(&search_normalize(full_title));
    res.replace(", ", ",")
}

/// Title-cases a display name, keeping the letter after an apostrophe
/// lowercase (`o'brien's` -> `O'Brien's`, not `O'Brien'S`).
pub fn capwords(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        let starts_word = match prev {
            None => true,
            Some(p) => !p.is_alphabetic() && p != '\'',
        };
        let after_name_apostrophe = matches!(prev, Some('\''))
            && out
                .chars()
                .rev()
                .nth(1)
                .is_some_and(|c| c.is_alphabetic())
            && !is_contraction_start(&out);
        if starts_word || after_name_apostrophe {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        prev = Some(ch);
    }
    out
}

/// `O'` style name prefixes capitalize the next letter; `'s`, `'t` do not.
fn is_contraction_start(out: &str) -> bool {
    let word: String = out
        .chars()
        .rev()
        .skip(1)
        .take_while(|c| c.is_alphabetic())
        .collect();
    word.chars().count() > 1
}

static COUNTRY_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("norge", "norway"),
        ("sverige", "sweden"),
        ("osterreich", "austria"),
        ("belgie", "belgium"),
        ("brasil", "brazil"),
        ("danmark", "denmark"),
        ("magyarorszag", "hungary"),
        ("italia", "italy"),
        ("espana", "spain"),
        ("deutschland", "germany"),
        ("prussia", "germany"),
        ("suisse", "switzerland"),
        ("schweiz", "switzerland"),
    ])
});

/// Maps a native-language country name to its English form.
///
/// Returns the (possibly rewritten) name and whether it changed. Applied to
/// the country component only.
///
/// ```rust
/// use geofinder_core::text::country_normalize;
///
/// assert_eq!(country_normalize("Suisse"), ("switzerland".to_string(), true));
/// assert_eq!(country_normalize("France"), ("france".to_string(), false));
/// ```
pub fn country_normalize(name: &str) -> (String, bool) {
    let res = fold_key(name).replace('.', "");
    let res = res.trim();
    match COUNTRY_ALIASES.get(res) {
        Some(english) => (english.to_string(), true),
        None => (res.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_diacritics_and_case() {
        assert_eq!(normalize("Ærøskøbing", CommaMode::Strip), "aeroskobing");
        assert_eq!(fold_key("MÜNCHEN"), "munchen");
    }

    #[test]
    fn strip_mode_drops_commas_keep_mode_keeps_them() {
        assert_eq!(normalize("Dover, Kent", CommaMode::Strip), "dover kent");
        assert_eq!(normalize("Dover, Kent", CommaMode::Keep), "dover, kent");
    }

    #[test]
    fn saint_variants_collapse() {
        for input in ["Saint Paul", "Sankt Paul", "Sint Paul", "St. Paul", "Sainte Paul"] {
            assert_eq!(normalize(input, CommaMode::Strip), "st paul", "{input}");
        }
    }

    #[test]
    fn saint_inside_a_word_is_left_alone() {
        assert_eq!(normalize("Toussaint Bay", CommaMode::Strip), "toussaint bay");
    }

    #[test]
    fn county_and_country_phrases() {
        assert_eq!(normalize("Kent Co.", CommaMode::Strip), "kent county");
        assert_eq!(normalize("Ohio, United States", CommaMode::Keep), "ohio, usa");
        assert_eq!(normalize("Town of Hempstead", CommaMode::Strip), "hempstead");
        assert_eq!(normalize("Township of Ocean", CommaMode::Strip), "ocean township");
        assert_eq!(normalize("Cathedral of Ely", CommaMode::Strip), "ely cathedral");
        assert_eq!(
            normalize("R.K. Kerk, Utrecht", CommaMode::Strip),
            "rooms katholieke kerk utrecht"
        );
        assert_eq!(normalize("R.K. Kerk", CommaMode::Keep), "rooms katholieke kerk");
    }

    #[test]
    fn mount_expansion_skips_amt() {
        assert_eq!(normalize("Mt Vernon", CommaMode::Strip), "mount vernon");
        assert_eq!(normalize("mt amt hof", CommaMode::Strip), "mt amt hof");
    }

    #[test]
    fn rewrite_that_exposes_a_new_match_is_still_idempotent() {
        let once = normalize("County of Saint", CommaMode::Strip);
        assert_eq!(once, "st county");
        assert_eq!(normalize(&once, CommaMode::Strip), once);
    }

    #[test]
    fn noise_words_only_affect_match_title() {
        assert_eq!(search_normalize("Isle of Wight"), "isle of wight");
        assert_eq!(normalize_match_title("Isle of Wight, Hampshire"), "isle wight,hampshire");
    }

    #[test]
    fn capwords_handles_apostrophes() {
        assert_eq!(capwords("o'brien's hill, kent"), "O'Brien's Hill, Kent");
        assert_eq!(capwords("dover"), "Dover");
    }

    #[test]
    fn country_aliases() {
        assert_eq!(country_normalize("Deutschland"), ("germany".into(), true));
        assert_eq!(country_normalize("Österreich"), ("austria".into(), true));
        assert_eq!(country_normalize("u.s.a."), ("usa".into(), false));
    }
}
