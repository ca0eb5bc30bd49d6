use proptest::prelude::*;

use super::*;
use crate::test_support::priced;

fn names(ranked: &[RankedStation]) -> Vec<&str> {
    ranked.iter().map(|r| r.station.name.as_str()).collect()
}

fn recs(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn small_cost_gap_is_decided_by_rating() {
    let stations = vec![priced("A", 5.00, Some(4.0)), priced("B", 5.50, Some(2.0))];
    let ranked = rank(stations, &[]);
    assert_eq!(names(&ranked), vec!["A", "B"]);

    let stations = vec![priced("B", 5.50, Some(2.0)), priced("A", 5.00, Some(4.0))];
    let ranked = rank(stations, &[]);
    assert_eq!(names(&ranked), vec!["A", "B"]);
}

#[test]
fn large_cost_gap_is_decided_by_cost() {
    let stations = vec![priced("Pricey", 7.00, Some(5.0)), priced("Cheap", 5.00, Some(1.0))];
    let ranked = rank(stations, &[]);
    assert_eq!(names(&ranked), vec!["Cheap", "Pricey"]);
}

#[test]
fn cost_gap_of_exactly_one_dollar_uses_rating() {
    let stations = vec![priced("Cheap", 5.00, Some(3.0)), priced("Rated", 6.00, Some(4.5))];
    let ranked = rank(stations, &[]);
    assert_eq!(names(&ranked), vec!["Rated", "Cheap"]);
}

#[test]
fn missing_rating_counts_as_zero() {
    let stations = vec![priced("Unrated", 5.00, None), priced("Rated", 5.20, Some(0.5))];
    let ranked = rank(stations, &[]);
    assert_eq!(names(&ranked), vec!["Rated", "Unrated"]);
}

#[test]
fn recommended_stations_come_first_regardless_of_cost() {
    let stations = vec![
        priced("Arco", 30.00, Some(3.0)),
        priced("Shell Gas Station", 45.00, Some(2.0)),
        priced("Valero", 31.50, Some(4.0)),
    ];
    let ranked = rank(stations, &recs(&["shell gas"]));
    assert_eq!(names(&ranked), vec!["Shell Gas Station", "Arco", "Valero"]);
    assert!(ranked[0].ai_recommended);
    assert!(!ranked[1].ai_recommended);
    assert!(!ranked[2].ai_recommended);
}

#[test]
fn equal_keys_keep_input_order() {
    let stations = vec![
        priced("First", 10.00, Some(4.0)),
        priced("Second", 10.00, Some(4.0)),
        priced("Third", 10.00, Some(4.0)),
    ];
    let ranked = rank(stations, &[]);
    assert_eq!(names(&ranked), vec!["First", "Second", "Third"]);
}

#[test]
fn first_station_is_the_only_recommended_display_class() {
    let stations = vec![
        priced("A", 5.00, None),
        priced("B", 9.00, None),
        priced("C", 12.00, None),
    ];
    let ranked = rank(stations, &[]);
    assert_eq!(ranked[0].display_class, DisplayClass::Recommended);
    assert!(ranked[1..]
        .iter()
        .all(|r| r.display_class == DisplayClass::Regular));
}

#[test]
fn display_class_serializes_in_snake_case() {
    assert_eq!(
        serde_json::to_value(DisplayClass::Recommended).unwrap(),
        serde_json::json!("recommended")
    );
    assert_eq!(
        serde_json::to_value(DisplayClass::Regular).unwrap(),
        serde_json::json!("regular")
    );
}

#[test]
fn empty_input_ranks_to_empty_output() {
    assert!(rank(Vec::new(), &recs(&["Shell"])).is_empty());
}

#[test]
fn names_match_is_symmetric_and_case_insensitive() {
    assert!(names_match("Shell Gas Station", "shell gas"));
    assert!(names_match("shell gas", "Shell Gas Station"));
    assert!(names_match("CHEVRON", "chevron"));
    assert!(!names_match("Chevron", "Shell"));
}

#[test]
fn custom_matcher_replaces_substring_rule() {
    struct Exact;
    impl NameMatcher for Exact {
        fn matches(&self, station_name: &str, recommended: &str) -> bool {
            station_name == recommended
        }
    }

    let stations = vec![priced("Shell", 5.0, None), priced("Shell Express", 50.0, None)];
    let ranked = rank_with(&Exact, stations, &recs(&["Shell Express"]));
    assert_eq!(names(&ranked), vec!["Shell Express", "Shell"]);
    assert!(!ranked[1].ai_recommended);
}

#[test]
fn intransitive_costs_still_produce_ordered_neighbours() {
    // B beats A and C beats B on rating, A beats C on cost: no total order.
    let stations = vec![
        priced("C", 6.60, Some(5.0)),
        priced("A", 5.00, Some(1.0)),
        priced("B", 5.80, Some(3.0)),
    ];
    let ranked = rank(stations, &[]);
    assert_eq!(ranked.len(), 3);
    assert_adjacent_order(&ranked);
}

#[test]
#[allow(deprecated)]
fn legacy_display_class_uses_thresholds() {
    let mut near = priced("Near", 5.0, None);
    near.distance_miles = 1.5;
    let mut cheap = priced("Cheap", 5.0, None);
    cheap.distance_miles = 4.0;
    cheap.price_per_gallon = 3.25;
    let mut plain = priced("Plain", 5.0, None);
    plain.distance_miles = 4.0;
    plain.price_per_gallon = 3.99;

    assert_eq!(legacy_display_class(&plain, 0), "recommended");
    assert_eq!(legacy_display_class(&near, 1), "closest");
    assert_eq!(legacy_display_class(&cheap, 2), "lowest-price");
    assert_eq!(legacy_display_class(&plain, 3), "");
}

fn assert_adjacent_order(ranked: &[RankedStation]) {
    for pair in ranked.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.ai_recommended || !b.ai_recommended,
            "non-recommended {} precedes recommended {}",
            a.station.name,
            b.station.name
        );
        if a.ai_recommended != b.ai_recommended {
            continue;
        }
        let gap = (a.station.total_cost - b.station.total_cost).abs();
        if gap > COST_TIE_THRESHOLD {
            assert!(
                a.station.total_cost <= b.station.total_cost,
                "{} (${}) precedes cheaper {} (${})",
                a.station.name,
                a.station.total_cost,
                b.station.name,
                b.station.total_cost
            );
        } else {
            assert!(
                a.station.rating_or_zero() >= b.station.rating_or_zero(),
                "{} rated {} precedes {} rated {}",
                a.station.name,
                a.station.rating_or_zero(),
                b.station.name,
                b.station.rating_or_zero()
            );
        }
    }
}

fn station_strategy() -> impl Strategy<Value = (String, f64, Option<f64>)> {
    (
        prop::sample::select(vec!["Shell", "Chevron", "Arco", "Valero", "Mobil", "Costco"]),
        0u32..4000,
        prop::option::of(0u32..=50),
    )
        .prop_map(|(name, cents, rating)| {
            (
                name.to_string(),
                f64::from(cents) / 100.0,
                rating.map(|r| f64::from(r) / 10.0),
            )
        })
}

proptest! {
    #[test]
    fn ranked_output_respects_rules_between_neighbours(
        specs in prop::collection::vec(station_strategy(), 0..24),
        rec in prop::collection::vec(prop::sample::select(vec!["shell", "ARCO", "mobil"]), 0..3),
    ) {
        let stations: Vec<StationRecord> = specs
            .iter()
            .map(|(name, cost, rating)| priced(name, *cost, *rating))
            .collect();
        let rec: Vec<String> = rec.into_iter().map(str::to_string).collect();

        let ranked = rank(stations.clone(), &rec);
        prop_assert_eq!(ranked.len(), stations.len());
        assert_adjacent_order(&ranked);

        let again = rank(stations, &rec);
        prop_assert_eq!(&ranked, &again);

        let reranked = rank(ranked.iter().map(|r| r.station.clone()).collect(), &rec);
        prop_assert_eq!(names(&reranked), names(&ranked));
    }
}
