//! Placement validation properties.
//!
//! Legality must agree with a brute-force "is the result sorted" check,
//! and timelines must stay sorted through any sequence of placements.

use proptest::prelude::*;
use timeline_rules::core::{OrderingPolicy, Song};
use timeline_rules::timeline::{PlacementValidator, Timeline};

fn song(id: &str, year: i32) -> Song {
    Song::new(id, "title", "artist", year.to_string())
}

fn timeline_of(years: &[i32]) -> Timeline {
    Timeline::from_songs(
        years
            .iter()
            .enumerate()
            .map(|(i, &y)| song(&format!("t{i}"), y)),
    )
    .unwrap()
}

/// Queen's 1975 single, then a 1987 song; a 1982 song goes in the middle.
#[test]
fn test_scenario_insert_between() {
    let validator = PlacementValidator::new();
    let mut timeline = Timeline::from_songs(vec![
        Song::new("q", "Bohemian Rhapsody", "Queen", "1975"),
        Song::new("r", "Never Gonna Give You Up", "Rick Astley", "1987"),
    ])
    .unwrap();

    let verdict = timeline
        .place(&validator, Song::new("m", "Billie Jean", "Michael Jackson", "1982"), 1)
        .unwrap();

    assert!(verdict.legal);
    assert_eq!(timeline.years().unwrap(), vec![1975, 1982, 1987]);
}

/// Same timeline; the 1982 song cannot go before 1975.
#[test]
fn test_scenario_insert_before_earlier_card() {
    let validator = PlacementValidator::new();
    let timeline = timeline_of(&[1975, 1987]);

    let verdict = validator.validate(&timeline, &song("m", 1982), 0).unwrap();
    assert!(!verdict.legal);
    assert!(verdict.reason.is_some());
}

fn sorted_after_insert(years: &[i32], year: i32, index: usize, strict: bool) -> bool {
    let mut result = years.to_vec();
    result.insert(index, year);
    result
        .windows(2)
        .all(|w| if strict { w[0] < w[1] } else { w[0] <= w[1] })
}

proptest! {
    #[test]
    fn prop_legality_matches_bruteforce(
        mut years in prop::collection::vec(1950i32..2025, 0..12),
        year in 1950i32..2025,
    ) {
        years.sort_unstable();
        let timeline = timeline_of(&years);
        let validator = PlacementValidator::new();

        for index in 0..=years.len() {
            let verdict = validator.validate(&timeline, &song("x", year), index).unwrap();
            prop_assert_eq!(verdict.legal, sorted_after_insert(&years, year, index, false));
            prop_assert_eq!(verdict.legal, verdict.valid_positions.contains(&index));
        }

        let out_of_range = validator.validate(&timeline, &song("x", year), years.len() + 1);
        prop_assert!(out_of_range.is_err());
    }

    #[test]
    fn prop_strict_legality_matches_bruteforce(
        years in prop::collection::btree_set(1950i32..2025, 0..12),
        year in 1950i32..2025,
    ) {
        let years: Vec<i32> = years.into_iter().collect();
        let timeline = timeline_of(&years);
        let validator = PlacementValidator::with_ordering(OrderingPolicy::Strict);

        for index in 0..=years.len() {
            let verdict = validator.validate(&timeline, &song("x", year), index).unwrap();
            prop_assert_eq!(verdict.legal, sorted_after_insert(&years, year, index, true));
            prop_assert_eq!(verdict.legal, verdict.valid_positions.contains(&index));
        }
    }

    #[test]
    fn prop_timeline_stays_sorted(
        placements in prop::collection::vec((1950i32..2025, 0usize..20), 1..40),
    ) {
        let validator = PlacementValidator::new();
        let mut timeline = Timeline::new();

        for (n, (year, index)) in placements.into_iter().enumerate() {
            let index = index % (timeline.len() + 1);
            let before = timeline.len();
            let verdict = timeline.place(&validator, song(&format!("s{n}"), year), index).unwrap();

            prop_assert!(timeline.is_sorted());
            prop_assert_eq!(timeline.len(), before + usize::from(verdict.legal));
        }
    }
}
