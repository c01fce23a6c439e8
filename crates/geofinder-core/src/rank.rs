// crates/geofinder-core/src/rank.rs

//! # Candidate Ranker
//!
//! Turns the pooled rows of every cascade hypothesis into the final ordered,
//! deduplicated result list. Pure function over rows.

use crate::model::{Classification, GeoRow, LookupKind, ResultFlags};
use crate::tables::{feature_rank, name_start_year};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Tuned ranking constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Rows scoring above `min + score_band` are dropped.
    pub score_band: f64,
    /// Tighter band used once the best score is below `strong_band_trigger`.
    pub strong_band: f64,
    pub strong_band_trigger: f64,
    /// A lone row scoring below this is a strong match.
    pub strong_match_max: f64,
    /// Same-named rows closer than this (|dlat| + |dlon|, degrees) are one place.
    pub merge_distance: f64,
    /// Years of slack when checking a name's start year against the event year.
    pub year_padding: i32,
    /// Maximum rows returned.
    pub result_limit: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        RankConfig {
            score_band: 15.0,
            strong_band: 6.0,
            strong_band_trigger: 6.0,
            strong_match_max: 9.0,
            merge_distance: 0.5,
            year_padding: 60,
            result_limit: 100,
        }
    }
}

/// Output of [`rank`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranked {
    pub rows: Vec<GeoRow>,
    pub flags: ResultFlags,
}

impl Ranked {
    pub fn min_score(&self) -> Option<f64> {
        self.rows.first().map(|r| r.score)
    }
}

/// Whether a name with start year `valid_from` can appear in `event_year`.
/// An event year of 0 means unknown and always passes.
pub fn valid_year(event_year: i32, valid_from: i32, padding: i32) -> bool {
    event_year == 0 || event_year + padding >= valid_from
}

/// Whether the row's name existed (with `padding` years of slack) in `event_year`.
pub fn valid_year_for_row(row: &GeoRow, event_year: i32, padding: i32) -> bool {
    valid_year(event_year, name_start_year(&row.iso, &row.admin1), padding)
}

/// Sorts, filters, deduplicates, merges and truncates a candidate pool.
pub fn rank(mut rows: Vec<GeoRow>, event_year: i32, config: &RankConfig) -> Ranked {
    let mut flags = ResultFlags {
        limited: rows.len() > config.result_limit,
        date_filtered: false,
    };

    // Group neighbours of possibly different names together.
    rows.sort_by(|a, b| {
        a.admin1
            .cmp(&b.admin1)
            .then_with(|| a.lon.total_cmp(&b.lon))
    });

    let mut merged: Vec<GeoRow> = Vec::with_capacity(rows.len());
    let mut seen: HashSet<String> = HashSet::new();
    let mut prev: Option<GeoRow> = None;

    for row in rows {
        if !valid_year_for_row(&row, event_year, config.year_padding) {
            debug!(geoid = %row.geoid, event_year, "dropping row: name newer than event");
            continue;
        }
        if !valid_year_for_row(&row, event_year, 0) {
            flags.date_filtered = true;
        }
        if !seen.insert(row.geoid.clone()) {
            continue;
        }

        match &prev {
            Some(p) if p.name == row.name => {
                let distance = (p.lat - row.lat).abs() + (p.lon - row.lon).abs();
                if distance > config.merge_distance {
                    merged.push(row.clone());
                } else if feature_rank(&row.feature) < feature_rank(&p.feature) {
                    // Same place: keep the more important feature.
                    if let Some(last) = merged.last_mut() {
                        *last = row.clone();
                    }
                }
            }
            _ => merged.push(row.clone()),
        }
        prev = Some(row);
    }

    merged.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| a.admin1.cmp(&b.admin1))
            .then_with(|| a.admin2.cmp(&b.admin2))
    });

    let mut out = Vec::with_capacity(merged.len());
    if let Some(min_score) = merged.first().map(|r| r.score) {
        let band = if min_score < config.strong_band_trigger {
            config.strong_band.min(config.score_band)
        } else {
            config.score_band
        };
        out.extend(
            merged
                .into_iter()
                .take_while(|r| r.score <= min_score + band),
        );
    }
    if out.len() > config.result_limit {
        out.truncate(config.result_limit);
    }

    debug!(
        rows = out.len(),
        limited = flags.limited,
        date_filtered = flags.date_filtered,
        "ranked candidates"
    );
    Ranked { rows: out, flags }
}

/// Classification of a ranked hierarchy lookup.
pub fn classify(ranked: &Ranked, config: &RankConfig) -> Classification {
    match ranked.rows.as_slice() {
        [] => Classification::NoMatch,
        [row] if row.score < config.strong_match_max => Classification::StrongMatch,
        [row] => match row.lookup {
            LookupKind::Wildcard => Classification::WildcardMatch,
            LookupKind::Soundex => Classification::SoundexMatch,
            LookupKind::Exact | LookupKind::Prefix => Classification::PartialMatch,
        },
        _ => Classification::MultipleMatches,
    }
}

/// Ordering used by callers that need to re-sort ranked rows.
pub fn by_score(a: &GeoRow, b: &GeoRow) -> Ordering {
    a.score.total_cmp(&b.score)
}
