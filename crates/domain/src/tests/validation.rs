// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BookingOccurrence, BookingRules, BookingStatus, DomainError, ExistingBooking, FacilityId,
    TimeSlot, Zone, ZoneId, can_cancel, cancellation_deadline, validate_against_rules,
    validate_attendee_count, validate_time_slot_allowed,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

fn make_zone(rules: BookingRules) -> Zone {
    Zone::new(
        ZoneId::new("bane-1"),
        FacilityId::new("idrettshall"),
        String::from("Bane 1"),
        120,
        Decimal::new(450, 0),
        None,
        false,
        false,
        rules,
    )
}

fn default_zone() -> Zone {
    make_zone(BookingRules::new(1, 4, Vec::new(), 30, 24).unwrap())
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn occurrence(start: DateTime<Utc>, end: DateTime<Utc>) -> BookingOccurrence {
    BookingOccurrence::new(ZoneId::new("bane-1"), start, end)
}

#[test]
fn test_valid_occurrence_passes() {
    let now = utc(2025, 3, 1, 12, 0);
    let occurrences = vec![occurrence(utc(2025, 3, 5, 10, 0), utc(2025, 3, 5, 12, 0))];

    assert!(validate_against_rules(&default_zone(), &occurrences, now).is_ok());
}

#[test]
fn test_too_short_occurrence_rejected() {
    let now = utc(2025, 3, 1, 12, 0);
    let occurrences = vec![occurrence(utc(2025, 3, 5, 10, 0), utc(2025, 3, 5, 10, 30))];

    let result = validate_against_rules(&default_zone(), &occurrences, now);
    assert!(matches!(
        result,
        Err(DomainError::BookingRuleViolation { rule, .. }) if rule == "min-duration"
    ));
}

#[test]
fn test_too_long_occurrence_rejected() {
    let now = utc(2025, 3, 1, 12, 0);
    let occurrences = vec![occurrence(utc(2025, 3, 5, 8, 0), utc(2025, 3, 5, 14, 0))];

    let result = validate_against_rules(&default_zone(), &occurrences, now);
    assert!(matches!(
        result,
        Err(DomainError::BookingRuleViolation { rule, .. }) if rule == "max-duration"
    ));
}

#[test]
fn test_past_occurrence_rejected() {
    let now = utc(2025, 3, 10, 12, 0);
    let occurrences = vec![occurrence(utc(2025, 3, 5, 10, 0), utc(2025, 3, 5, 12, 0))];

    let result = validate_against_rules(&default_zone(), &occurrences, now);
    assert!(matches!(
        result,
        Err(DomainError::BookingRuleViolation { rule, .. }) if rule == "no-past-bookings"
    ));
}

#[test]
fn test_occurrence_beyond_horizon_rejected() {
    let now = utc(2025, 3, 1, 12, 0);
    // 30-day horizon; this occurrence is two months out
    let occurrences = vec![occurrence(utc(2025, 5, 5, 10, 0), utc(2025, 5, 5, 12, 0))];

    let result = validate_against_rules(&default_zone(), &occurrences, now);
    assert!(matches!(
        result,
        Err(DomainError::BookingRuleViolation { rule, .. }) if rule == "advance-window"
    ));
}

#[test]
fn test_only_offending_occurrence_matters() {
    let now = utc(2025, 3, 1, 12, 0);
    let occurrences = vec![
        occurrence(utc(2025, 3, 5, 10, 0), utc(2025, 3, 5, 12, 0)),
        occurrence(utc(2025, 3, 12, 10, 0), utc(2025, 3, 12, 10, 15)),
    ];

    let result = validate_against_rules(&default_zone(), &occurrences, now);
    assert!(result.is_err());
}

#[test]
fn test_attendee_count_bounds() {
    let zone = default_zone();

    assert!(validate_attendee_count(&zone, 1).is_ok());
    assert!(validate_attendee_count(&zone, 120).is_ok());
    assert!(matches!(
        validate_attendee_count(&zone, 0),
        Err(DomainError::InvalidAttendeeCount { .. })
    ));
    assert!(matches!(
        validate_attendee_count(&zone, 121),
        Err(DomainError::InvalidAttendeeCount { .. })
    ));
}

#[test]
fn test_unrestricted_slots_allow_anything() {
    let rules = BookingRules::new(1, 4, Vec::new(), 30, 24).unwrap();
    let slot = TimeSlot::parse("07:15-08:45").unwrap();

    assert!(validate_time_slot_allowed(&rules, &slot).is_ok());
}

#[test]
fn test_restricted_slots_enforced() {
    let offered = vec![
        TimeSlot::parse("10:00-12:00").unwrap(),
        TimeSlot::parse("18:00-20:00").unwrap(),
    ];
    let rules = BookingRules::new(1, 4, offered, 30, 24).unwrap();

    assert!(validate_time_slot_allowed(&rules, &TimeSlot::parse("18:00-20:00").unwrap()).is_ok());

    let result = validate_time_slot_allowed(&rules, &TimeSlot::parse("12:00-14:00").unwrap());
    assert!(matches!(
        result,
        Err(DomainError::BookingRuleViolation { rule, .. }) if rule == "allowed-time-slots"
    ));
}

#[test]
fn test_cancellation_deadline() {
    let rules = BookingRules::new(1, 4, Vec::new(), 30, 24).unwrap();
    let booking = ExistingBooking::new(
        1,
        ZoneId::new("bane-1"),
        utc(2025, 3, 5, 10, 0),
        utc(2025, 3, 5, 12, 0),
        BookingStatus::Confirmed,
    );

    let deadline = cancellation_deadline(&booking, &rules).unwrap();
    assert_eq!(deadline, utc(2025, 3, 4, 10, 0));
}

#[test]
fn test_can_cancel_respects_notice_period() {
    let rules = BookingRules::new(1, 4, Vec::new(), 30, 24).unwrap();
    let booking = ExistingBooking::new(
        1,
        ZoneId::new("bane-1"),
        utc(2025, 3, 5, 10, 0),
        utc(2025, 3, 5, 12, 0),
        BookingStatus::Confirmed,
    );

    // Two days ahead: fine. Twelve hours ahead: too late.
    assert!(can_cancel(&booking, &rules, utc(2025, 3, 3, 10, 0)));
    assert!(!can_cancel(&booking, &rules, utc(2025, 3, 4, 22, 0)));
}

#[test]
fn test_terminal_bookings_cannot_cancel() {
    let rules = BookingRules::new(1, 4, Vec::new(), 30, 24).unwrap();
    let booking = ExistingBooking::new(
        1,
        ZoneId::new("bane-1"),
        utc(2025, 3, 5, 10, 0),
        utc(2025, 3, 5, 12, 0),
        BookingStatus::Cancelled,
    );

    assert!(!can_cancel(&booking, &rules, utc(2025, 3, 1, 10, 0)));
}
