// Unit tests for Slot Matcher

use chrono::{DateTime, TimeZone, Utc};
use slot_matcher::core::{Distance, IntervalFault, Layering, MatchingError, PairTarget, SlotGraph};
use slot_matcher::models::{AvailabilitySlot, RequestSlot, Side, TimeSlot};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 7, 2, hour, minute, 0).unwrap()
}

#[test]
fn test_construct_valid_slot() {
    let slot = TimeSlot::new(Some(at(9, 0)), Some(at(9, 30)), Some("isolate".to_string())).unwrap();

    assert_eq!(slot.start(), at(9, 0));
    assert_eq!(slot.end(), at(9, 30));
    assert_eq!(slot.owner(), Some("isolate"));
    assert_eq!(slot.duration(), chrono::Duration::minutes(30));
}

#[test]
fn test_construct_rejects_zero_length() {
    let err = TimeSlot::new(Some(at(9, 0)), Some(at(9, 0)), None).unwrap_err();

    assert!(err.is_invalid_interval());
    assert_eq!(
        err,
        MatchingError::InvalidInterval {
            reason: IntervalFault::NotBefore {
                start: at(9, 0),
                end: at(9, 0)
            }
        }
    );
}

#[test]
fn test_construct_rejects_absent_bounds() {
    let now = at(9, 0);

    assert!(matches!(
        TimeSlot::new(None, Some(now), None),
        Err(MatchingError::InvalidInterval { .. })
    ));
    assert!(matches!(
        TimeSlot::new(Some(now), None, None),
        Err(MatchingError::InvalidInterval { .. })
    ));
    assert!(TimeSlot::new(None, None, None).unwrap_err().is_invalid_interval());
}

#[test]
fn test_contains_edges() {
    let volunteer = TimeSlot::between(at(9, 0), at(11, 0), None).unwrap();

    // Shares the start
    assert!(volunteer.contains(&TimeSlot::between(at(9, 0), at(10, 0), None).unwrap()));
    // Shares the end
    assert!(volunteer.contains(&TimeSlot::between(at(10, 0), at(11, 0), None).unwrap()));
    // Starts a minute early
    assert!(!volunteer.contains(&TimeSlot::between(at(8, 59), at(10, 0), None).unwrap()));
    // Ends a minute late
    assert!(!volunteer.contains(&TimeSlot::between(at(10, 0), at(11, 1), None).unwrap()));
}

#[test]
fn test_owner_does_not_affect_containment() {
    let volunteer = AvailabilitySlot::new(
        TimeSlot::between(at(9, 0), at(11, 0), Some("volunteer".to_string())).unwrap(),
    );
    let request = RequestSlot::new(
        TimeSlot::between(at(9, 0), at(10, 0), Some("isolate".to_string())).unwrap(),
    );

    assert!(volunteer.can_serve(&request));
}

#[test]
fn test_slot_equality_uses_owner() {
    let a = TimeSlot::between(at(9, 0), at(10, 0), Some("a".to_string())).unwrap();
    let b = TimeSlot::between(at(9, 0), at(10, 0), Some("b".to_string())).unwrap();
    let a2 = TimeSlot::between(at(9, 0), at(10, 0), Some("a".to_string())).unwrap();

    assert_ne!(a, b);
    assert_eq!(a, a2);
}

#[test]
fn test_graph_lookup_by_side() {
    let mut graph = SlotGraph::new();
    let r = graph.add_request(RequestSlot::new(
        TimeSlot::between(at(9, 0), at(10, 0), None).unwrap(),
    ));
    let a = graph.add_availability(AvailabilitySlot::new(
        TimeSlot::between(at(9, 0), at(10, 0), None).unwrap(),
    ));

    assert_eq!(graph.side(r), Side::Request);
    assert!(graph.request(r).is_some());
    assert!(graph.availability(r).is_none());
    assert!(graph.availability(a).is_some());
    assert_eq!(graph.slot(r), graph.slot(a));
    assert!(!graph.is_neighbour(r, a));
}

#[test]
fn test_graph_pair_and_clear() {
    let mut graph = SlotGraph::new();
    let r = graph.add_request(RequestSlot::new(
        TimeSlot::between(at(9, 0), at(10, 0), None).unwrap(),
    ));
    let a = graph.add_availability(AvailabilitySlot::new(
        TimeSlot::between(at(9, 0), at(10, 0), None).unwrap(),
    ));
    graph.add_edge(r, a);

    graph.pair(r, a);
    assert!(graph.is_paired(r) && graph.is_paired(a));
    assert_eq!(graph.paired(a), PairTarget::Node(r));

    graph.clear_pairs();
    assert!(graph.paired(r).is_nil());
    assert!(graph.is_neighbour(a, r));
}

#[test]
fn test_layering_is_per_run() {
    let mut graph = SlotGraph::new();
    let r = graph.add_request(RequestSlot::new(
        TimeSlot::between(at(9, 0), at(10, 0), None).unwrap(),
    ));

    let mut first = Layering::for_graph(&graph);
    first.set(PairTarget::Node(r), Distance::ZERO);
    let second = Layering::for_graph(&graph);

    assert_eq!(first.get(PairTarget::Node(r)), Distance::ZERO);
    assert!(second.get(PairTarget::Node(r)).is_infinite());
}
