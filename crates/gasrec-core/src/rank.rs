//! Station ranking.
//!
//! Merges backend station records with the names pulled out of the
//! analysis text and produces the single ordered list that both the list
//! view and the map view are drawn from.

use std::cmp::Ordering;

use serde::Serialize;

use crate::station::StationRecord;

/// Cost difference (in dollars) above which total cost decides the order.
/// At or below it, the higher rating wins.
pub const COST_TIE_THRESHOLD: f64 = 1.0;

/// Decides whether a station name corresponds to a recommended name.
///
/// Ranking only ever goes through this trait, so a stricter matcher can be
/// swapped in without touching the ordering rules.
pub trait NameMatcher {
    fn matches(&self, station_name: &str, recommended: &str) -> bool;
}

/// Case-insensitive containment in either direction. See [`names_match`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl NameMatcher for SubstringMatcher {
    fn matches(&self, station_name: &str, recommended: &str) -> bool {
        names_match(station_name, recommended)
    }
}

/// True when either lowercased name contains the other.
///
/// Symmetric. Short or generic names produce false positives
/// (`"gas"` matches every `"... Gas"` station).
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Visual treatment of a ranked station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayClass {
    /// First station in the final order.
    Recommended,
    Regular,
}

/// A station plus the flags derived while ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStation {
    pub station: StationRecord,
    pub ai_recommended: bool,
    pub display_class: DisplayClass,
}

/// Rank `stations` using [`SubstringMatcher`]. See [`rank_with`].
#[must_use]
pub fn rank(stations: Vec<StationRecord>, recommended_names: &[String]) -> Vec<RankedStation> {
    rank_with(&SubstringMatcher, stations, recommended_names)
}

/// Rank `stations` against `recommended_names`.
///
/// Order:
/// 1. AI-recommended stations first.
/// 2. Within the same status, if total costs differ by more than
///    [`COST_TIE_THRESHOLD`], cheaper first.
/// 3. Otherwise higher rating first (missing rating = 0).
///
/// Ties keep input order. The first station is tagged
/// [`DisplayClass::Recommended`], the rest [`DisplayClass::Regular`]. An
/// empty input returns an empty list.
#[must_use]
pub fn rank_with<M: NameMatcher + ?Sized>(
    matcher: &M,
    stations: Vec<StationRecord>,
    recommended_names: &[String],
) -> Vec<RankedStation> {
    let flagged: Vec<(StationRecord, bool)> = stations
        .into_iter()
        .map(|station| {
            let ai = recommended_names
                .iter()
                .any(|rec| matcher.matches(&station.name, rec));
            (station, ai)
        })
        .collect();

    let ordered = stable_insertion_sort(flagged, |a, b| compare(a.1, &a.0, b.1, &b.0));

    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, (station, ai_recommended))| RankedStation {
            station,
            ai_recommended,
            display_class: if idx == 0 {
                DisplayClass::Recommended
            } else {
                DisplayClass::Regular
            },
        })
        .collect()
}

fn compare(a_ai: bool, a: &StationRecord, b_ai: bool, b: &StationRecord) -> Ordering {
    match (a_ai, b_ai) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    if (a.total_cost - b.total_cost).abs() > COST_TIE_THRESHOLD {
        a.total_cost
            .partial_cmp(&b.total_cost)
            .unwrap_or(Ordering::Equal)
    } else {
        b.rating_or_zero()
            .partial_cmp(&a.rating_or_zero())
            .unwrap_or(Ordering::Equal)
    }
}

/// The cost-threshold rule is not transitive, so `slice::sort_by` may panic
/// or misorder on it. Inserting each element after the last one it does
/// not strictly precede keeps every adjacent pair in rule order and is
/// stable.
fn stable_insertion_sort<T, F>(items: Vec<T>, mut cmp: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let mut pos = out.len();
        while pos > 0 && cmp(&item, &out[pos - 1]) == Ordering::Less {
            pos -= 1;
        }
        out.insert(pos, item);
    }
    out
}

/// Card class from the earlier threshold-based layout.
///
/// Superseded by the rank-driven [`DisplayClass`]; nothing in the
/// presentation path reads it. Kept so old screenshots and fixtures can
/// still be reproduced.
#[deprecated(note = "display class is derived from rank order; see `DisplayClass`")]
#[must_use]
pub fn legacy_display_class(station: &StationRecord, index: usize) -> &'static str {
    if index == 0 {
        "recommended"
    } else if station.distance_miles <= 2.0 {
        "closest"
    } else if station.price_per_gallon <= 3.5 {
        "lowest-price"
    } else {
        ""
    }
}

#[cfg(test)]
#[path = "rank_test.rs"]
mod tests;
