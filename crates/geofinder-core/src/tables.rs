// crates/geofinder-core/src/tables.rs

//! Immutable lookup tables, built once per process.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Raw feature priorities. Higher is more important: a capital or large city
/// beats an ordinary town, which beats a hospital or a valley.
pub static FEATURE_PRIORITY: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("PP1M", 100.0),
        ("ADM1", 95.0),
        ("PPLA", 95.0),
        ("PPLC", 95.0),
        ("P1HK", 90.0),
        ("PPLA2", 90.0),
        ("ADM0", 90.0),
        ("PPL", 75.0),
        ("PPLA3", 70.0),
        ("PPLX", 70.0),
        ("PPLA4", 65.0),
        ("ADM2", 60.0),
        ("PPLG", 55.0),
        ("NVB", 50.0),
        ("PPLF", 45.0),
        ("PPLL", 35.0),
        ("PPLQ", 30.0),
        ("PPLR", 25.0),
        ("PPLS", 20.0),
        ("PPLW", 20.0),
        ("MILB", 0.0),
        ("CH", 0.0),
        ("MSQE", 0.0),
        ("CMTY", 0.0),
        ("BTL", 0.0),
        ("ADM3", -70.0),
        ("ADM4", -70.0),
        ("HSP", -70.0),
        ("VAL", -70.0),
        ("MT", -70.0),
    ])
});

/// Feature priority as a rank where lower is better (`100 - raw`).
/// Unknown codes get raw priority 0.
pub fn feature_rank(feature: &str) -> f64 {
    100.0 - FEATURE_PRIORITY.get(feature).copied().unwrap_or(0.0)
}

/// Human-readable names for feature codes.
pub static TYPE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ADM0", "Country"),
        ("ADM1", "City"),
        ("ADM2", "City"),
        ("ADM3", "City"),
        ("ADM4", "City"),
        ("ADMF", "City"),
        ("CH", "Church"),
        ("CSTL", "Castle"),
        ("CMTY", "Cemetery"),
        ("EST", "Estate"),
        ("HSP", "Hospital"),
        ("HSTS", "Historic"),
        ("ISL", "Island"),
        ("MSQE", "Mosque"),
        ("MSTY", "Monastery"),
        ("MT", "Mountain"),
        ("MUS", "Museum"),
        ("PAL", "Palace"),
        ("PPL", "City"),
        ("PPLA", "City"),
        ("PPLA2", "City"),
        ("PPLA3", "City"),
        ("PPLA4", "City"),
        ("PPLC", "City"),
        ("PPLG", "City"),
        ("PPLH", "City"),
        ("PPLL", "Village"),
        ("PPLQ", "City"),
        ("PPLX", "City"),
        ("PRK", "Park"),
        ("PRN", "Prison"),
        ("PRSH", "Parish"),
        ("RUIN", "Ruin"),
        ("RLG", "Religious"),
        ("STG", ""),
        ("SQR", "Square"),
        ("SYG", "Synagogue"),
        ("VAL", "Valley"),
        ("PP1M", "City"),
        ("P1HK", "City"),
    ])
});

pub fn type_name(feature: &str) -> &'static str {
    TYPE_NAMES.get(feature).copied().unwrap_or("")
}

/// The local term for a first-level division.
pub fn district1_type(iso: &str) -> &'static str {
    match iso {
        "al" | "no" => "County",
        "us" | "at" | "bm" | "br" | "de" => "State",
        "ac" | "an" | "ao" | "bb" | "bd" => "Parish",
        "ae" => "Emirate",
        "bc" | "bf" | "bh" | "bl" | "bn" => "District",
        "gb" => "Country",
        _ => "Province",
    }
}

/// Year from which a country's current name is valid, by ISO2.
pub static COUNTRY_START_YEAR: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| HashMap::from([("cu", -1)]));

/// Year from which a state/province's current name is valid, keyed
/// `"{iso}.{admin1 code}"`.
pub static ADMIN1_START_YEAR: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    HashMap::from([
        ("us.al", 1711),
        ("us.ak", 1774),
        ("us.az", 1775),
        ("us.ar", 1686),
        ("us.ca", 1769),
        ("us.co", 1871),
        ("us.ct", 1633),
        ("us.de", 1638),
        ("us.dc", 1650),
        ("us.fl", 1565),
        ("us.ga", 1566),
        ("us.hi", -1),
        ("us.id", 1862),
        ("us.il", 1703),
        ("us.in", 1715),
        ("us.ia", 1785),
        ("us.ks", 1870),
        ("us.ky", 1775),
        ("us.la", 1699),
        ("us.me", 1604),
        ("us.md", 1633),
        ("us.ma", 1620),
        ("us.mi", 1784),
        ("us.mn", 1820),
        ("us.ms", 1699),
        ("us.mo", 1765),
        ("us.mt", 1877),
        ("us.ne", 1854),
        ("us.nv", 1905),
        ("us.nh", 1638),
        ("us.nj", 1624),
        ("us.nm", 1598),
        ("us.ny", 1614),
        ("us.nc", 1653),
        ("us.nd", 1871),
        ("us.oh", 1785),
        ("us.ok", 1889),
        ("us.or", 1811),
        ("us.pa", 1682),
        ("us.ri", 1636),
        ("us.sc", 1663),
        ("us.sd", 1865),
        ("us.tn", 1739),
        ("us.tx", 1685),
        ("us.ut", 1847),
        ("us.vt", 1650),
        ("us.va", 1607),
        ("us.wa", 1825),
        ("us.wv", 1788),
        ("us.wi", 1685),
        ("us.wy", 1867),
        ("ca.01", 1795),
        ("ca.02", 1789),
        ("ca.03", 1733),
        ("ca.04", 1766),
        ("ca.05", 1583),
        ("ca.07", 1604),
        ("ca.08", 1673),
        ("ca.09", 1764),
        ("ca.10", 1541),
        ("ca.11", 1862),
        ("ca.12", 1700),
        ("ca.13", 1700),
        ("ca.14", 1700),
    ])
});

/// Start year for a row's name: admin1 first, then country, else -1.
pub fn name_start_year(iso: &str, admin1: &str) -> i32 {
    let key = format!("{}.{}", iso.to_lowercase(), admin1.to_lowercase());
    ADMIN1_START_YEAR
        .get(key.as_str())
        .or_else(|| COUNTRY_START_YEAR.get(iso.to_lowercase().as_str()))
        .copied()
        .unwrap_or(-1)
}
