// Property-based tests for the matcher

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use slot_matcher::core::{Matcher, PairTarget};
use slot_matcher::{AvailabilitySlot, RequestSlot, TimeSlot};
use std::collections::HashSet;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 7, 2, 0, 0, 0).unwrap()
}

fn slot((start, length): (i64, i64)) -> TimeSlot {
    TimeSlot::between(
        t0() + Duration::minutes(start * 30),
        t0() + Duration::minutes((start + length) * 30),
        None,
    )
    .unwrap()
}

fn windows(max: usize) -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..16, 1i64..8), 0..max)
}

/// Largest matching by trying every assignment, for small inputs only
fn brute_force(requests: &[RequestSlot], availabilities: &[AvailabilitySlot]) -> usize {
    fn search(
        index: usize,
        requests: &[RequestSlot],
        availabilities: &[AvailabilitySlot],
        used: &mut Vec<bool>,
    ) -> usize {
        if index == requests.len() {
            return 0;
        }

        let mut best = search(index + 1, requests, availabilities, used);
        for (a, availability) in availabilities.iter().enumerate() {
            if !used[a] && availability.can_serve(&requests[index]) {
                used[a] = true;
                best = best.max(1 + search(index + 1, requests, availabilities, used));
                used[a] = false;
            }
        }
        best
    }

    search(0, requests, availabilities, &mut vec![false; availabilities.len()])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_matching_is_maximum(
        request_windows in windows(6),
        availability_windows in windows(6),
    ) {
        let requests: Vec<_> = request_windows.into_iter().map(|w| RequestSlot::new(slot(w))).collect();
        let availabilities: Vec<_> = availability_windows.into_iter().map(|w| AvailabilitySlot::new(slot(w))).collect();

        let matching = Matcher::default().match_all(&requests, &availabilities);

        prop_assert_eq!(matching.len(), brute_force(&requests, &availabilities));
        prop_assert!(matching.is_maximum());
    }

    #[test]
    fn prop_pairs_are_contained_mutual_and_unique(
        request_windows in windows(30),
        availability_windows in windows(30),
    ) {
        let requests: Vec<_> = request_windows.into_iter().map(|w| RequestSlot::new(slot(w))).collect();
        let availabilities: Vec<_> = availability_windows.into_iter().map(|w| AvailabilitySlot::new(slot(w))).collect();

        let matching = Matcher::default().match_all(&requests, &availabilities);
        let graph = matching.graph();
        let mut partners = HashSet::new();

        for &r in matching.matched_requests() {
            let a = graph.paired(r).node().expect("matched request has a partner");
            prop_assert!(graph.slot(a).contains(graph.slot(r)));
            prop_assert_eq!(graph.paired(a), PairTarget::Node(r));
            prop_assert!(partners.insert(a), "volunteer slot paired twice");
        }

        let paired_availabilities = graph
            .availability_ids()
            .iter()
            .filter(|&&a| graph.is_paired(a))
            .count();
        prop_assert_eq!(paired_availabilities, matching.len());
    }

    #[test]
    fn prop_size_does_not_depend_on_order(
        request_windows in windows(20),
        availability_windows in windows(20),
    ) {
        let requests: Vec<_> = request_windows.into_iter().map(|w| RequestSlot::new(slot(w))).collect();
        let availabilities: Vec<_> = availability_windows.into_iter().map(|w| AvailabilitySlot::new(slot(w))).collect();
        let matcher = Matcher::default();

        let forward = matcher.match_all(&requests, &availabilities);

        let reversed_requests: Vec<_> = requests.iter().rev().cloned().collect();
        let reversed_availabilities: Vec<_> = availabilities.iter().rev().cloned().collect();
        let backward = matcher.match_all(&reversed_requests, &reversed_availabilities);

        prop_assert_eq!(forward.len(), backward.len());
    }
}
