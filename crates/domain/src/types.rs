// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use crate::time_slot::TimeSlot;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a facility identifier.
///
/// Facility ids are normalized to lowercase to ensure case-insensitive
/// uniqueness across collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacilityId {
    /// The facility id value.
    value: String,
}

impl FacilityId {
    /// Creates a new `FacilityId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The facility id (will be trimmed and lowercased)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_lowercase(),
        }
    }

    /// Returns the facility id value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents a zone identifier within a facility.
///
/// Zone ids are normalized to lowercase to ensure case-insensitive
/// uniqueness within a facility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId {
    /// The zone id value.
    value: String,
}

impl ZoneId {
    /// Creates a new `ZoneId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The zone id (will be trimmed and lowercased)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_lowercase(),
        }
    }

    /// Returns the zone id value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents the category of the requesting party.
///
/// This is the single canonical enumeration; the discount table and the
/// approval rules are defined against it. Presentation layers carrying
/// legacy names must map through [`ActorType::from_alias`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActorType {
    /// A private person.
    PrivatePerson,
    /// A registered club or association.
    LagForeninger,
    /// An umbrella organization coordinating several associations.
    Paraply,
    /// A private company.
    PrivateFirma,
    /// A municipal unit.
    KommunaleEnheter,
}

impl ActorType {
    /// Parses an actor type from its canonical string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidActorType` if the string does not match
    /// a canonical actor type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "private-person" => Ok(Self::PrivatePerson),
            "lag-foreninger" => Ok(Self::LagForeninger),
            "paraply" => Ok(Self::Paraply),
            "private-firma" => Ok(Self::PrivateFirma),
            "kommunale-enheter" => Ok(Self::KommunaleEnheter),
            _ => Err(DomainError::InvalidActorType(format!(
                "Unknown actor type: {s}"
            ))),
        }
    }

    /// Parses an actor type accepting both canonical names and the legacy
    /// presentation aliases (`private`, `nonprofit`, `business`).
    ///
    /// Aliases with no canonical counterpart are rejected rather than
    /// silently mapped onto a discounted category.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidActorType` if the string matches neither
    /// a canonical name nor a known alias.
    pub fn from_alias(s: &str) -> Result<Self, DomainError> {
        match s {
            "private" => Ok(Self::PrivatePerson),
            "nonprofit" => Ok(Self::LagForeninger),
            "business" => Ok(Self::PrivateFirma),
            _ => Self::parse(s),
        }
    }

    /// Returns the canonical string representation of this actor type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PrivatePerson => "private-person",
            Self::LagForeninger => "lag-foreninger",
            Self::Paraply => "paraply",
            Self::PrivateFirma => "private-firma",
            Self::KommunaleEnheter => "kommunale-enheter",
        }
    }

    /// Returns whether bookings by this actor type always require manual
    /// approval before confirmation.
    #[must_use]
    pub const fn requires_approval(&self) -> bool {
        matches!(self, Self::LagForeninger | Self::Paraply)
    }
}

impl std::str::FromStr for ActorType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Booking rules governing how a zone may be reserved.
///
/// Rules are validated at construction and never re-validated downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRules {
    /// Minimum booking duration in whole hours.
    min_duration_hours: u32,
    /// Maximum booking duration in whole hours.
    max_duration_hours: u32,
    /// Time slots this zone may be booked in. Empty means any slot.
    allowed_time_slots: Vec<TimeSlot>,
    /// How far into the future bookings may start, in days.
    advance_booking_days: u32,
    /// How many hours before the booking start a cancellation must arrive.
    cancellation_hours: u32,
}

impl BookingRules {
    /// Creates new `BookingRules`.
    ///
    /// # Arguments
    ///
    /// * `min_duration_hours` - Minimum booking duration (must be at least 1)
    /// * `max_duration_hours` - Maximum booking duration (must be >= minimum)
    /// * `allowed_time_slots` - Permitted slots; empty allows any slot
    /// * `advance_booking_days` - Booking horizon in days (must be at least 1)
    /// * `cancellation_hours` - Cancellation notice period in hours
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingRules` if the duration bounds are
    /// inconsistent or the booking horizon is zero.
    pub fn new(
        min_duration_hours: u32,
        max_duration_hours: u32,
        allowed_time_slots: Vec<TimeSlot>,
        advance_booking_days: u32,
        cancellation_hours: u32,
    ) -> Result<Self, DomainError> {
        if min_duration_hours == 0 {
            return Err(DomainError::InvalidBookingRules(String::from(
                "Minimum duration must be at least 1 hour",
            )));
        }
        if min_duration_hours > max_duration_hours {
            return Err(DomainError::InvalidBookingRules(format!(
                "Minimum duration {min_duration_hours}h exceeds maximum {max_duration_hours}h"
            )));
        }
        if advance_booking_days == 0 {
            return Err(DomainError::InvalidBookingRules(String::from(
                "Advance booking horizon must be at least 1 day",
            )));
        }
        Ok(Self {
            min_duration_hours,
            max_duration_hours,
            allowed_time_slots,
            advance_booking_days,
            cancellation_hours,
        })
    }

    /// Returns the minimum booking duration in hours.
    #[must_use]
    pub const fn min_duration_hours(&self) -> u32 {
        self.min_duration_hours
    }

    /// Returns the maximum booking duration in hours.
    #[must_use]
    pub const fn max_duration_hours(&self) -> u32 {
        self.max_duration_hours
    }

    /// Returns the permitted time slots. Empty means any slot is allowed.
    #[must_use]
    pub fn allowed_time_slots(&self) -> &[TimeSlot] {
        &self.allowed_time_slots
    }

    /// Returns the booking horizon in days.
    #[must_use]
    pub const fn advance_booking_days(&self) -> u32 {
        self.advance_booking_days
    }

    /// Returns the cancellation notice period in hours.
    #[must_use]
    pub const fn cancellation_hours(&self) -> u32 {
        self.cancellation_hours
    }
}

/// A bookable unit of a facility.
///
/// A zone with `is_main_zone == true` and no parent represents the whole
/// facility; zones with a parent are sub-zones contained within it.
/// Containment is exactly one level deep. Structural invariants across the
/// full zone set are enforced by `ZoneHierarchy::from_zones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// The zone's identifier, unique within the facility.
    pub zone_id: ZoneId,
    /// The facility this zone belongs to.
    pub facility_id: FacilityId,
    /// Display name (informational, not unique).
    pub name: String,
    /// Maximum number of attendees.
    pub capacity: u32,
    /// Rental price per hour.
    pub price_per_hour: Decimal,
    /// The containing main zone, if this is a sub-zone.
    pub parent_zone_id: Option<ZoneId>,
    /// Whether this zone represents the whole facility.
    pub is_main_zone: bool,
    /// Whether the weekend/evening surcharge applies to this zone.
    pub surcharge_opt_in: bool,
    /// Rules governing how this zone may be booked.
    pub booking_rules: BookingRules,
}

impl Zone {
    /// Creates a new `Zone`.
    ///
    /// # Arguments
    ///
    /// * `zone_id` - The zone identifier
    /// * `facility_id` - The owning facility
    /// * `name` - Display name
    /// * `capacity` - Maximum attendee count
    /// * `price_per_hour` - Rental price per hour
    /// * `parent_zone_id` - Containing main zone for sub-zones
    /// * `is_main_zone` - Whether this zone is the whole facility
    /// * `surcharge_opt_in` - Whether surcharges apply to this zone
    /// * `booking_rules` - The zone's booking rules
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        zone_id: ZoneId,
        facility_id: FacilityId,
        name: String,
        capacity: u32,
        price_per_hour: Decimal,
        parent_zone_id: Option<ZoneId>,
        is_main_zone: bool,
        surcharge_opt_in: bool,
        booking_rules: BookingRules,
    ) -> Self {
        Self {
            zone_id,
            facility_id,
            name,
            capacity,
            price_per_hour,
            parent_zone_id,
            is_main_zone,
            surcharge_opt_in,
            booking_rules,
        }
    }
}

/// An existing reservation as read from the booking store.
///
/// This is a read model: the core never mutates it. Only bookings whose
/// status participates in conflicts are considered by the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    /// The store-assigned booking identifier.
    pub booking_id: i64,
    /// The booked zone.
    pub zone_id: ZoneId,
    /// Start of the booked interval (UTC).
    pub start: DateTime<Utc>,
    /// End of the booked interval (UTC), exclusive.
    pub end: DateTime<Utc>,
    /// Current workflow status.
    pub status: BookingStatus,
}

impl ExistingBooking {
    /// Creates a new `ExistingBooking` read model.
    ///
    /// # Arguments
    ///
    /// * `booking_id` - The store-assigned identifier
    /// * `zone_id` - The booked zone
    /// * `start` - Interval start (UTC)
    /// * `end` - Interval end (UTC, exclusive)
    /// * `status` - Current workflow status
    #[must_use]
    pub const fn new(
        booking_id: i64,
        zone_id: ZoneId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: BookingStatus,
    ) -> Self {
        Self {
            booking_id,
            zone_id,
            start,
            end,
            status,
        }
    }
}
