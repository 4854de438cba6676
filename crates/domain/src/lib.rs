// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking_status;
mod conflict;
mod error;
mod facility_calendar;
mod pricing;
mod recurrence;
mod suggestion;
mod time_slot;
mod types;
mod validation;
mod zone_hierarchy;

#[cfg(test)]
mod tests;

pub use booking_status::BookingStatus;
pub use conflict::{ConflictKind, ConflictResult, check_conflict, check_conflicts, intervals_overlap};
pub use error::DomainError;
pub use facility_calendar::FacilityCalendar;
pub use pricing::{
    OccurrencePrice, PriceBreakdown, PriceLine, PriceLineKind, calculate_price, discount_rate,
};
pub use recurrence::{
    Expansion, ExpansionWarning, Frequency, RecurrencePattern, Termination, expand_recurrence,
};
pub use suggestion::{ZoneSuggestion, suggest_alternative_zones};
pub use time_slot::{BookingOccurrence, TimeSlot};
pub use types::{ActorType, BookingRules, ExistingBooking, FacilityId, Zone, ZoneId};
pub use validation::{
    can_cancel, cancellation_deadline, validate_against_rules, validate_attendee_count,
    validate_time_slot_allowed,
};
pub use zone_hierarchy::{Containment, ZoneHierarchy};
