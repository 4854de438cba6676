// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lokal_booking_domain::{ActorType, DomainError, FacilityId, RecurrencePattern, TimeSlot, ZoneId};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date of the range.
    start: NaiveDate,
    /// Last date of the range (inclusive).
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// # Arguments
    ///
    /// * `start` - First date of the range
    /// * `end` - Last date of the range (inclusive, must not precede the start)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BookingRuleViolation` if the end precedes the
    /// start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::BookingRuleViolation {
                rule: String::from("date-range"),
                reason: format!("range end {end} precedes start {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the first date of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last date of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

/// When the requested booking takes place.
///
/// One-time and ranged requests are treated as length-1 and length-N
/// expansions so the rest of the pipeline is uniform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timing {
    /// A single occurrence on one date.
    OneTime {
        /// The calendar date in the facility timezone.
        date: NaiveDate,
        /// The requested time slot.
        slot: TimeSlot,
    },
    /// One occurrence per day across an inclusive date range.
    DateRange {
        /// First date of the range.
        start: NaiveDate,
        /// Last date of the range (inclusive).
        end: NaiveDate,
        /// The requested time slot, applied to every day.
        slot: TimeSlot,
    },
    /// Occurrences produced by expanding a recurrence pattern.
    Recurring(RecurrencePattern),
}

/// A booking request as received from the form layer.
///
/// A request represents user intent as data only; nothing is validated or
/// resolved until the orchestrator processes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// The facility being booked.
    pub facility_id: FacilityId,
    /// The requested zone within the facility.
    pub zone_id: ZoneId,
    /// The requesting party's category.
    pub actor_type: ActorType,
    /// Free-text purpose of the booking.
    pub purpose: String,
    /// Expected number of attendees.
    pub attendee_count: u32,
    /// When the booking takes place.
    pub timing: Timing,
}

impl BookingRequest {
    /// Creates a new `BookingRequest`.
    ///
    /// # Arguments
    ///
    /// * `facility_id` - The facility being booked
    /// * `zone_id` - The requested zone
    /// * `actor_type` - The requesting party's category
    /// * `purpose` - Free-text purpose
    /// * `attendee_count` - Expected number of attendees
    /// * `timing` - When the booking takes place
    #[must_use]
    pub const fn new(
        facility_id: FacilityId,
        zone_id: ZoneId,
        actor_type: ActorType,
        purpose: String,
        attendee_count: u32,
        timing: Timing,
    ) -> Self {
        Self {
            facility_id,
            zone_id,
            actor_type,
            purpose,
            attendee_count,
            timing,
        }
    }
}
