// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveTime};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Zone id does not exist in the facility's zone set.
    UnknownZone {
        /// The zone id that was requested.
        zone_id: String,
    },
    /// Zone id appears more than once in the facility's zone set.
    DuplicateZone {
        /// The duplicated zone id.
        zone_id: String,
    },
    /// Zone set violates a containment invariant.
    InvalidZoneStructure {
        /// The offending zone id.
        zone_id: String,
        /// Description of the violated invariant.
        reason: String,
    },
    /// Zone id is empty or invalid.
    InvalidZoneId(String),
    /// Facility id is empty or invalid.
    InvalidFacilityId(String),
    /// Actor type string is not part of the canonical enumeration.
    InvalidActorType(String),
    /// Booking status string is not recognized.
    InvalidBookingStatus {
        /// The invalid status string.
        status: String,
    },
    /// Booking status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not allowed.
        reason: String,
    },
    /// Time slot label could not be parsed or is internally inconsistent.
    MalformedTimeSlot {
        /// The offending label.
        label: String,
        /// Description of the parse or consistency failure.
        reason: String,
    },
    /// A wall-clock local time could not be resolved to a single UTC instant.
    UnresolvableLocalTime {
        /// The calendar date.
        date: NaiveDate,
        /// The wall-clock time.
        time: NaiveTime,
        /// Why resolution failed (DST gap or ambiguity).
        reason: String,
    },
    /// Recurrence pattern violates a structural invariant.
    InvalidRecurrence(String),
    /// Booking rules violate a structural invariant.
    InvalidBookingRules(String),
    /// Facility calendar settings are invalid.
    InvalidCalendar(String),
    /// A booking request violates one of the zone's booking rules.
    BookingRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// Description of the violation.
        reason: String,
    },
    /// Attendee count is zero or exceeds the zone's capacity.
    InvalidAttendeeCount {
        /// The requested attendee count.
        count: u32,
        /// The zone's capacity.
        capacity: u32,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownZone { zone_id } => {
                write!(f, "Zone '{zone_id}' not found in facility zone set")
            }
            Self::DuplicateZone { zone_id } => {
                write!(f, "Zone '{zone_id}' appears more than once in zone set")
            }
            Self::InvalidZoneStructure { zone_id, reason } => {
                write!(f, "Invalid zone structure at '{zone_id}': {reason}")
            }
            Self::InvalidZoneId(msg) => write!(f, "Invalid zone id: {msg}"),
            Self::InvalidFacilityId(msg) => write!(f, "Invalid facility id: {msg}"),
            Self::InvalidActorType(msg) => write!(f, "Invalid actor type: {msg}"),
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: {status}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(
                    f,
                    "Invalid status transition from '{from}' to '{to}': {reason}"
                )
            }
            Self::MalformedTimeSlot { label, reason } => {
                write!(f, "Malformed time slot '{label}': {reason}")
            }
            Self::UnresolvableLocalTime { date, time, reason } => {
                write!(f, "Cannot resolve local time {date} {time}: {reason}")
            }
            Self::InvalidRecurrence(msg) => write!(f, "Invalid recurrence pattern: {msg}"),
            Self::InvalidBookingRules(msg) => write!(f, "Invalid booking rules: {msg}"),
            Self::InvalidCalendar(msg) => write!(f, "Invalid facility calendar: {msg}"),
            Self::BookingRuleViolation { rule, reason } => {
                write!(f, "Booking rule '{rule}' violated: {reason}")
            }
            Self::InvalidAttendeeCount { count, capacity } => {
                write!(
                    f,
                    "Invalid attendee count: {count}. Must be between 1 and {capacity}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
