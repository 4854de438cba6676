// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time slot labels and their resolution to absolute intervals.
//!
//! A time slot is a wall-clock `(start, end)` pair in the facility's
//! declared timezone, written as an `"HH:MM-HH:MM"` label. Before any
//! conflict checking or pricing, a slot is resolved against a calendar
//! date into a half-open `[start, end)` pair of UTC instants.
//!
//! ## Invariants
//!
//! - Slots are same-day intervals: `start < end`, no overnight slots
//! - Equality and overlap are computed on resolved intervals, never labels
//! - DST-ambiguous or nonexistent local times are rejected, not guessed

use crate::error::DomainError;
use crate::facility_calendar::FacilityCalendar;
use crate::types::ZoneId;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A wall-clock time slot within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Wall-clock start time.
    start: NaiveTime,
    /// Wall-clock end time (exclusive).
    end: NaiveTime,
}

impl TimeSlot {
    /// Creates a new `TimeSlot`.
    ///
    /// # Arguments
    ///
    /// * `start` - Wall-clock start time
    /// * `end` - Wall-clock end time (must be after the start)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedTimeSlot` if the end does not come
    /// after the start.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::MalformedTimeSlot {
                label: format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")),
                reason: String::from("slot end must be after slot start"),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses a time slot from an `"HH:MM-HH:MM"` label.
    ///
    /// # Arguments
    ///
    /// * `label` - The slot label (e.g. `"18:00-20:00"`)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedTimeSlot` if the label does not have
    /// exactly two `HH:MM` parts or the interval is empty or inverted.
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        let Some((start_part, end_part)) = label.split_once('-') else {
            return Err(DomainError::MalformedTimeSlot {
                label: label.to_string(),
                reason: String::from("expected 'HH:MM-HH:MM'"),
            });
        };

        let start: NaiveTime =
            NaiveTime::parse_from_str(start_part.trim(), "%H:%M").map_err(|e| {
                DomainError::MalformedTimeSlot {
                    label: label.to_string(),
                    reason: format!("invalid start time: {e}"),
                }
            })?;
        let end: NaiveTime = NaiveTime::parse_from_str(end_part.trim(), "%H:%M").map_err(|e| {
            DomainError::MalformedTimeSlot {
                label: label.to_string(),
                reason: format!("invalid end time: {e}"),
            }
        })?;

        Self::new(start, end)
    }

    /// Returns the wall-clock start time.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the wall-clock end time.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns the canonical `"HH:MM-HH:MM"` label for this slot.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }

    /// Returns the slot duration in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }
}

/// One concrete dated and timed instance of a booking request.
///
/// Occurrences are the unit conflict checking and pricing operate on.
/// They are derived values and never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingOccurrence {
    /// The zone this occurrence targets.
    pub zone_id: ZoneId,
    /// Start instant (UTC).
    pub start: DateTime<Utc>,
    /// End instant (UTC), exclusive.
    pub end: DateTime<Utc>,
}

impl BookingOccurrence {
    /// Creates a `BookingOccurrence` from already-resolved instants.
    ///
    /// # Arguments
    ///
    /// * `zone_id` - The target zone
    /// * `start` - Start instant (UTC)
    /// * `end` - End instant (UTC, exclusive)
    #[must_use]
    pub const fn new(zone_id: ZoneId, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            zone_id,
            start,
            end,
        }
    }

    /// Resolves a `(date, slot)` pair into a concrete occurrence through
    /// the facility's declared timezone.
    ///
    /// # Arguments
    ///
    /// * `zone_id` - The target zone
    /// * `date` - The calendar date in the facility timezone
    /// * `slot` - The wall-clock time slot
    /// * `calendar` - The facility calendar carrying the timezone
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnresolvableLocalTime` if either endpoint
    /// falls in a DST gap or ambiguity, or `DomainError::InvalidCalendar`
    /// if the timezone cannot be parsed.
    pub fn resolve(
        zone_id: ZoneId,
        date: NaiveDate,
        slot: &TimeSlot,
        calendar: &FacilityCalendar,
    ) -> Result<Self, DomainError> {
        let tz: Tz = calendar.tz()?;
        let start: DateTime<Utc> = resolve_local(tz, date, slot.start())?;
        let end: DateTime<Utc> = resolve_local(tz, date, slot.end())?;
        Ok(Self::new(zone_id, start, end))
    }

    /// Returns the occurrence duration in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Returns the occurrence duration in hours as an exact decimal.
    #[must_use]
    pub fn duration_hours(&self) -> Decimal {
        Decimal::from(self.duration_minutes()) / Decimal::from(60)
    }
}

/// Resolves a wall-clock local time to a single UTC instant.
fn resolve_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, DomainError> {
    let local = date.and_time(time);
    tz.from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| DomainError::UnresolvableLocalTime {
            date,
            time,
            reason: String::from("ambiguous or non-existent due to DST"),
        })
}
