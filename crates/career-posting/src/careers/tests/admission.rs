use super::common::*;
use crate::careers::admission::{
    evaluate, AdmissionDecision, DenialReason, PostingCapacity, DEFAULT_JOB_LIMIT,
};
use crate::careers::repository::{resolve_plan, DirectoryEntry};

#[test]
fn denies_when_plan_limit_is_exactly_reached() {
    let decision = evaluate(&entry(Some(5), Some(0)), 5);

    assert_eq!(
        decision,
        AdmissionDecision::Denied(DenialReason::CapacityReached {
            capacity: 5,
            active: 5
        })
    );
    assert_eq!(decision.remaining(), 0);
}

#[test]
fn extra_slots_extend_plan_limit() {
    let decision = evaluate(&entry(Some(5), Some(2)), 6);

    assert_eq!(
        decision,
        AdmissionDecision::Admitted {
            capacity: 7,
            active: 6
        }
    );
    assert_eq!(decision.remaining(), 1);
}

#[test]
fn missing_plan_falls_back_to_default_limit() {
    let admitted = evaluate(&entry(None, None), 2);
    assert_eq!(
        admitted,
        AdmissionDecision::Admitted {
            capacity: DEFAULT_JOB_LIMIT,
            active: 2
        }
    );

    let denied = evaluate(&entry(None, None), 3);
    assert!(!denied.is_admitted());
    assert_eq!(denied.capacity(), 3);
}

#[test]
fn plan_without_limit_uses_default() {
    let entry = DirectoryEntry {
        organization: organization("org-a", Some("plan-empty"), None),
        plan: Some(plan("plan-empty", None)),
    };

    assert_eq!(PostingCapacity::for_entry(&entry).base_limit, DEFAULT_JOB_LIMIT);
}

#[test]
fn negative_extra_slots_count_as_zero() {
    let capacity = PostingCapacity::for_entry(&entry(Some(4), Some(-3)));

    assert_eq!(capacity.extra_slots, 0);
    assert_eq!(capacity.total(), 4);
}

#[test]
fn capacity_matches_base_limit_without_extras() {
    for limit in [1, 3, 10, 250] {
        for extras in [None, Some(0)] {
            let capacity = PostingCapacity::for_entry(&entry(Some(limit), extras));
            assert_eq!(capacity.total(), limit);
        }
    }
}

#[test]
fn admission_holds_strictly_below_capacity() {
    for limit in 0..6 {
        for extras in 0..4 {
            let entry = entry(Some(limit), Some(extras));
            let capacity = limit + extras as u64;
            for active in 0..12 {
                let decision = evaluate(&entry, active);
                assert_eq!(
                    decision.is_admitted(),
                    active < capacity,
                    "limit {limit}, extras {extras}, active {active}"
                );
                assert_eq!(decision.capacity(), capacity);
            }
        }
    }
}

#[test]
fn extra_slots_are_monotonic() {
    let active = 6;
    let mut previous = evaluate(&entry(Some(5), Some(0)), active);

    for extras in 1..5_i64 {
        let next = evaluate(&entry(Some(5), Some(extras)), active);
        assert_eq!(next.capacity(), previous.capacity() + 1);
        assert!(next.is_admitted() || !previous.is_admitted());
        previous = next;
    }
}

#[test]
fn evaluation_is_repeatable() {
    let entry = entry(Some(2), Some(1));

    for active in 0..5 {
        assert_eq!(evaluate(&entry, active), evaluate(&entry, active));
    }
}

#[test]
fn capacity_saturates_instead_of_overflowing() {
    let capacity = PostingCapacity::for_entry(&entry(Some(u64::MAX), Some(10)));

    assert_eq!(capacity.total(), u64::MAX);
    assert!(evaluate(&entry(Some(u64::MAX), Some(10)), 1_000).is_admitted());
}

#[test]
fn numeric_plan_reference_resolves_string_plan_id() {
    let plans = vec![plan("7", Some(12)), plan("8", Some(1))];
    let organization: crate::careers::Organization = serde_json::from_value(serde_json::json!({
        "id": "org-numeric",
        "plan": 7
    }))
    .expect("organization deserializes");

    let resolved = resolve_plan(&organization, &plans).expect("plan resolves");
    assert_eq!(resolved.job_limit, Some(12));
}

#[test]
fn unmatched_or_blank_reference_resolves_nothing() {
    let plans = vec![plan("7", Some(12))];

    assert!(resolve_plan(&organization("org", Some("9"), None), &plans).is_none());
    assert!(resolve_plan(&organization("org", Some("  "), None), &plans).is_none());
    assert!(resolve_plan(&organization("org", None, None), &plans).is_none());
}

#[test]
fn decisions_serialize_with_reason() {
    let denied = evaluate(&entry(Some(1), None), 1);
    let value = serde_json::to_value(&denied).expect("decision serializes");

    assert_eq!(value["decision"], "denied");
    assert_eq!(value["reason"], "capacity_reached");
    assert_eq!(value["capacity"], 1);
    assert!(denied.summary().contains("limit reached"));
}
