// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ActorType, BookingRules, DomainError, FacilityId, TimeSlot, ZoneId};
use std::str::FromStr;

#[test]
fn test_zone_id_normalized_to_lowercase() {
    let id_lower: ZoneId = ZoneId::new("bane-1");
    let id_mixed: ZoneId = ZoneId::new("Bane-1");
    let id_padded: ZoneId = ZoneId::new("  BANE-1 ");

    assert_eq!(id_lower.value(), "bane-1");
    assert_eq!(id_mixed.value(), "bane-1");
    assert_eq!(id_padded.value(), "bane-1");
    assert_eq!(id_lower, id_mixed);
}

#[test]
fn test_facility_id_normalized_to_lowercase() {
    let id: FacilityId = FacilityId::new(" Idrettshall ");
    assert_eq!(id.value(), "idrettshall");
}

#[test]
fn test_actor_type_round_trip() {
    let actors = vec![
        ActorType::PrivatePerson,
        ActorType::LagForeninger,
        ActorType::Paraply,
        ActorType::PrivateFirma,
        ActorType::KommunaleEnheter,
    ];

    for actor in actors {
        let s = actor.as_str();
        match ActorType::parse(s) {
            Ok(parsed) => assert_eq!(actor, parsed),
            Err(e) => panic!("Failed to parse actor type string: {s}: {e}"),
        }
    }
}

#[test]
fn test_actor_type_from_str() {
    assert_eq!(
        ActorType::from_str("lag-foreninger").unwrap(),
        ActorType::LagForeninger
    );
    assert!(ActorType::from_str("foreninger").is_err());
}

#[test]
fn test_legacy_aliases_map_to_canonical() {
    assert_eq!(
        ActorType::from_alias("private").unwrap(),
        ActorType::PrivatePerson
    );
    assert_eq!(
        ActorType::from_alias("nonprofit").unwrap(),
        ActorType::LagForeninger
    );
    assert_eq!(
        ActorType::from_alias("business").unwrap(),
        ActorType::PrivateFirma
    );
}

#[test]
fn test_alias_accepts_canonical_names() {
    assert_eq!(
        ActorType::from_alias("kommunale-enheter").unwrap(),
        ActorType::KommunaleEnheter
    );
}

#[test]
fn test_unmappable_aliases_rejected() {
    // youth and senior have no canonical counterpart in the discount and
    // approval rules and must not be silently mapped
    assert!(matches!(
        ActorType::from_alias("youth"),
        Err(DomainError::InvalidActorType(_))
    ));
    assert!(matches!(
        ActorType::from_alias("senior"),
        Err(DomainError::InvalidActorType(_))
    ));
}

#[test]
fn test_approval_actor_types() {
    assert!(ActorType::LagForeninger.requires_approval());
    assert!(ActorType::Paraply.requires_approval());
    assert!(!ActorType::PrivatePerson.requires_approval());
    assert!(!ActorType::PrivateFirma.requires_approval());
    assert!(!ActorType::KommunaleEnheter.requires_approval());
}

#[test]
fn test_booking_rules_validation() {
    assert!(BookingRules::new(1, 12, Vec::new(), 90, 24).is_ok());

    // Zero minimum duration
    assert!(matches!(
        BookingRules::new(0, 12, Vec::new(), 90, 24),
        Err(DomainError::InvalidBookingRules(_))
    ));

    // Inverted duration bounds
    assert!(matches!(
        BookingRules::new(6, 2, Vec::new(), 90, 24),
        Err(DomainError::InvalidBookingRules(_))
    ));

    // Zero advance horizon
    assert!(matches!(
        BookingRules::new(1, 12, Vec::new(), 0, 24),
        Err(DomainError::InvalidBookingRules(_))
    ));
}

#[test]
fn test_booking_rules_accessors() {
    let slots = vec![TimeSlot::parse("18:00-20:00").unwrap()];
    let rules = BookingRules::new(2, 8, slots.clone(), 60, 48).unwrap();

    assert_eq!(rules.min_duration_hours(), 2);
    assert_eq!(rules.max_duration_hours(), 8);
    assert_eq!(rules.allowed_time_slots(), slots.as_slice());
    assert_eq!(rules.advance_booking_days(), 60);
    assert_eq!(rules.cancellation_hours(), 48);
}
