// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ActorType, BookingStatus, ConflictKind, Frequency, RecurrencePattern, Termination, TimeSlot,
};
use chrono::{NaiveDate, Weekday};

#[test]
fn test_actor_type_serializes_to_canonical_labels() {
    assert_eq!(
        serde_json::to_string(&ActorType::PrivatePerson).unwrap(),
        "\"private-person\""
    );
    assert_eq!(
        serde_json::to_string(&ActorType::LagForeninger).unwrap(),
        "\"lag-foreninger\""
    );
    assert_eq!(
        serde_json::to_string(&ActorType::KommunaleEnheter).unwrap(),
        "\"kommunale-enheter\""
    );
}

#[test]
fn test_actor_type_serde_matches_as_str() {
    let actors = vec![
        ActorType::PrivatePerson,
        ActorType::LagForeninger,
        ActorType::Paraply,
        ActorType::PrivateFirma,
        ActorType::KommunaleEnheter,
    ];

    for actor in actors {
        let json = serde_json::to_string(&actor).unwrap();
        assert_eq!(json, format!("\"{}\"", actor.as_str()));
        let back: ActorType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, actor);
    }
}

#[test]
fn test_booking_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&BookingStatus::Pending).unwrap(),
        "\"pending\""
    );
    let back: BookingStatus = serde_json::from_str("\"cancelled\"").unwrap();
    assert_eq!(back, BookingStatus::Cancelled);
}

#[test]
fn test_conflict_kind_serializes_kebab_case() {
    assert_eq!(
        serde_json::to_string(&ConflictKind::SameZone).unwrap(),
        "\"same-zone\""
    );
    assert_eq!(
        serde_json::to_string(&ConflictKind::Ancestor).unwrap(),
        "\"ancestor\""
    );
}

#[test]
fn test_recurrence_pattern_round_trip() {
    let pattern = RecurrencePattern::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        Frequency::Biweekly,
        2,
        vec![Weekday::Tue, Weekday::Thu],
        vec![TimeSlot::parse("18:00-20:00").unwrap()],
        Termination::OccurrenceCount(10),
    )
    .unwrap();

    let json = serde_json::to_string(&pattern).unwrap();
    let back: RecurrencePattern = serde_json::from_str(&json).unwrap();

    assert_eq!(back, pattern);
}
