// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::time_slot::{BookingOccurrence, TimeSlot};
use crate::types::{BookingRules, ExistingBooking, Zone};
use chrono::{DateTime, Duration, Utc};

/// Validates that an attendee count fits the zone.
///
/// # Arguments
///
/// * `zone` - The zone being booked
/// * `attendee_count` - The requested attendee count
///
/// # Returns
///
/// * `Ok(())` if the count is between 1 and the zone's capacity
/// * `Err(DomainError::InvalidAttendeeCount)` otherwise
///
/// # Errors
///
/// Returns an error if the count is zero or exceeds the zone's capacity.
pub fn validate_attendee_count(zone: &Zone, attendee_count: u32) -> Result<(), DomainError> {
    if attendee_count == 0 || attendee_count > zone.capacity {
        return Err(DomainError::InvalidAttendeeCount {
            count: attendee_count,
            capacity: zone.capacity,
        });
    }
    Ok(())
}

/// Validates that a requested slot is permitted by the zone's rules.
///
/// An empty allowed-slot list permits any slot.
///
/// # Arguments
///
/// * `rules` - The zone's booking rules
/// * `slot` - The requested time slot
///
/// # Returns
///
/// * `Ok(())` if the slot is allowed
/// * `Err(DomainError::BookingRuleViolation)` otherwise
///
/// # Errors
///
/// Returns an error if the zone restricts slots and the requested slot is
/// not among them.
pub fn validate_time_slot_allowed(rules: &BookingRules, slot: &TimeSlot) -> Result<(), DomainError> {
    if rules.allowed_time_slots().is_empty() {
        return Ok(());
    }
    if rules.allowed_time_slots().contains(slot) {
        return Ok(());
    }
    Err(DomainError::BookingRuleViolation {
        rule: String::from("allowed-time-slots"),
        reason: format!("slot {} is not offered for this zone", slot.label()),
    })
}

/// Validates a set of occurrences against the zone's booking rules.
///
/// This function checks, per occurrence:
/// - Duration within the zone's minimum and maximum
/// - The occurrence does not start in the past
/// - The occurrence does not start beyond the advance booking horizon
///
/// # Arguments
///
/// * `zone` - The zone being booked
/// * `occurrences` - The resolved occurrences
/// * `evaluation_time` - The caller-supplied "now"
///
/// # Returns
///
/// * `Ok(())` if every occurrence satisfies the rules
/// * `Err(DomainError::BookingRuleViolation)` on the first violation
///
/// # Errors
///
/// Returns an error on the first rule violation, or
/// `DomainError::DateArithmeticOverflow` if the horizon cannot be
/// computed.
pub fn validate_against_rules(
    zone: &Zone,
    occurrences: &[BookingOccurrence],
    evaluation_time: DateTime<Utc>,
) -> Result<(), DomainError> {
    let rules: &BookingRules = &zone.booking_rules;
    let horizon: DateTime<Utc> = evaluation_time
        .checked_add_signed(Duration::days(i64::from(rules.advance_booking_days())))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("computing the advance booking horizon"),
        })?;

    for occurrence in occurrences {
        let minutes: i64 = occurrence.duration_minutes();
        if minutes < i64::from(rules.min_duration_hours()) * 60 {
            return Err(DomainError::BookingRuleViolation {
                rule: String::from("min-duration"),
                reason: format!(
                    "occurrence starting {} is shorter than {} hour(s)",
                    occurrence.start.to_rfc3339(),
                    rules.min_duration_hours()
                ),
            });
        }
        if minutes > i64::from(rules.max_duration_hours()) * 60 {
            return Err(DomainError::BookingRuleViolation {
                rule: String::from("max-duration"),
                reason: format!(
                    "occurrence starting {} is longer than {} hour(s)",
                    occurrence.start.to_rfc3339(),
                    rules.max_duration_hours()
                ),
            });
        }
        if occurrence.start < evaluation_time {
            return Err(DomainError::BookingRuleViolation {
                rule: String::from("no-past-bookings"),
                reason: format!(
                    "occurrence starting {} lies in the past",
                    occurrence.start.to_rfc3339()
                ),
            });
        }
        if occurrence.start > horizon {
            return Err(DomainError::BookingRuleViolation {
                rule: String::from("advance-window"),
                reason: format!(
                    "occurrence starting {} is beyond the {}-day booking horizon",
                    occurrence.start.to_rfc3339(),
                    rules.advance_booking_days()
                ),
            });
        }
    }

    Ok(())
}

/// Computes the latest instant a booking can still be cancelled.
///
/// # Arguments
///
/// * `booking` - The existing booking
/// * `rules` - The zone's booking rules
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the deadline cannot
/// be computed.
pub fn cancellation_deadline(
    booking: &ExistingBooking,
    rules: &BookingRules,
) -> Result<DateTime<Utc>, DomainError> {
    booking
        .start
        .checked_sub_signed(Duration::hours(i64::from(rules.cancellation_hours())))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("computing the cancellation deadline"),
        })
}

/// Returns whether a booking can still be cancelled at `now`.
///
/// Terminal bookings can never be cancelled again.
///
/// # Arguments
///
/// * `booking` - The existing booking
/// * `rules` - The zone's booking rules
/// * `now` - The caller-supplied "now"
#[must_use]
pub fn can_cancel(booking: &ExistingBooking, rules: &BookingRules, now: DateTime<Utc>) -> bool {
    if booking.status.is_terminal() {
        return false;
    }
    cancellation_deadline(booking, rules).is_ok_and(|deadline| now <= deadline)
}
