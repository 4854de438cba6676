// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Facility-level calendar and pricing policy.
//!
//! This module defines the validated settings object the algorithms read
//! their policy knobs from:
//! - Declared IANA timezone (all slot labels are wall-clock times in it)
//! - VAT rate and weekend/evening surcharge percentages
//! - The evening band for surcharge purposes
//! - The recurrence expansion cap
//! - Approval thresholds for duration and attendee count
//!
//! ## Invariants
//!
//! - Settings are validated once at construction, never downstream
//! - Percentages are expressed as whole-number percent values (25 = 25%)
//! - The evening band is a same-day interval (`start < end`)

use crate::error::DomainError;
use chrono::NaiveTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validated facility calendar and pricing policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityCalendar {
    /// Declared IANA timezone (e.g. "Europe/Oslo").
    timezone: String,
    /// VAT percentage applied to the discounted and surcharged subtotal.
    vat_rate: Decimal,
    /// Weekend/evening surcharge percentage. Zero disables the surcharge.
    weekend_evening_surcharge: Decimal,
    /// Start of the evening band (wall-clock).
    evening_start: NaiveTime,
    /// End of the evening band (wall-clock).
    evening_end: NaiveTime,
    /// Hard cap on recurrence expansion, in months from the start date.
    expansion_cap_months: u32,
    /// Bookings longer than this many hours require approval.
    approval_duration_hours: u32,
    /// Bookings with more attendees than this require approval.
    approval_attendee_limit: u32,
}

impl FacilityCalendar {
    /// Creates a new `FacilityCalendar`.
    ///
    /// # Arguments
    ///
    /// * `timezone` - IANA timezone name
    /// * `vat_rate` - VAT percentage (0-100)
    /// * `weekend_evening_surcharge` - Surcharge percentage (0-100, 0 = off)
    /// * `evening_start` - Start of the evening band
    /// * `evening_end` - End of the evening band (must be after the start)
    /// * `expansion_cap_months` - Expansion cap in months (1-24)
    /// * `approval_duration_hours` - Approval threshold in hours (at least 1)
    /// * `approval_attendee_limit` - Approval threshold in attendees (at least 1)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCalendar` if:
    /// - The timezone is not a valid IANA timezone
    /// - A percentage is outside 0-100
    /// - The evening band is empty or inverted
    /// - A threshold is zero or the expansion cap is outside 1-24 months
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timezone: String,
        vat_rate: Decimal,
        weekend_evening_surcharge: Decimal,
        evening_start: NaiveTime,
        evening_end: NaiveTime,
        expansion_cap_months: u32,
        approval_duration_hours: u32,
        approval_attendee_limit: u32,
    ) -> Result<Self, DomainError> {
        if timezone.parse::<Tz>().is_err() {
            return Err(DomainError::InvalidCalendar(format!(
                "Unknown timezone: {timezone}"
            )));
        }
        if vat_rate < Decimal::ZERO || vat_rate > Decimal::ONE_HUNDRED {
            return Err(DomainError::InvalidCalendar(format!(
                "VAT rate must be between 0 and 100, got {vat_rate}"
            )));
        }
        if weekend_evening_surcharge < Decimal::ZERO
            || weekend_evening_surcharge > Decimal::ONE_HUNDRED
        {
            return Err(DomainError::InvalidCalendar(format!(
                "Surcharge must be between 0 and 100, got {weekend_evening_surcharge}"
            )));
        }
        if evening_start >= evening_end {
            return Err(DomainError::InvalidCalendar(format!(
                "Evening band start {evening_start} must be before end {evening_end}"
            )));
        }
        if !(1..=24).contains(&expansion_cap_months) {
            return Err(DomainError::InvalidCalendar(format!(
                "Expansion cap must be between 1 and 24 months, got {expansion_cap_months}"
            )));
        }
        if approval_duration_hours == 0 {
            return Err(DomainError::InvalidCalendar(String::from(
                "Approval duration threshold must be at least 1 hour",
            )));
        }
        if approval_attendee_limit == 0 {
            return Err(DomainError::InvalidCalendar(String::from(
                "Approval attendee threshold must be at least 1",
            )));
        }
        Ok(Self {
            timezone,
            vat_rate,
            weekend_evening_surcharge,
            evening_start,
            evening_end,
            expansion_cap_months,
            approval_duration_hours,
            approval_attendee_limit,
        })
    }

    /// Creates a calendar with the municipal standard policy: 25% VAT,
    /// no surcharge, a 17:00-23:00 evening band, a 6-month expansion cap,
    /// and approval thresholds of 8 hours and 100 attendees.
    ///
    /// # Arguments
    ///
    /// * `timezone` - IANA timezone name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCalendar` if the timezone is invalid.
    pub fn with_defaults(timezone: &str) -> Result<Self, DomainError> {
        let evening_start: NaiveTime = NaiveTime::from_hms_opt(17, 0, 0).ok_or_else(|| {
            DomainError::InvalidCalendar(String::from("Invalid default evening start"))
        })?;
        let evening_end: NaiveTime = NaiveTime::from_hms_opt(23, 0, 0).ok_or_else(|| {
            DomainError::InvalidCalendar(String::from("Invalid default evening end"))
        })?;
        Self::new(
            timezone.to_string(),
            Decimal::new(25, 0),
            Decimal::ZERO,
            evening_start,
            evening_end,
            6,
            8,
            100,
        )
    }

    /// Returns the declared timezone name.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Parses the declared timezone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCalendar` if the timezone no longer
    /// parses (only possible if the calendar was deserialized from
    /// untrusted data).
    pub fn tz(&self) -> Result<Tz, DomainError> {
        self.timezone
            .parse()
            .map_err(|_| DomainError::InvalidCalendar(format!("Unknown timezone: {}", self.timezone)))
    }

    /// Returns the VAT percentage.
    #[must_use]
    pub const fn vat_rate(&self) -> Decimal {
        self.vat_rate
    }

    /// Returns the weekend/evening surcharge percentage.
    #[must_use]
    pub const fn weekend_evening_surcharge(&self) -> Decimal {
        self.weekend_evening_surcharge
    }

    /// Returns the start of the evening band.
    #[must_use]
    pub const fn evening_start(&self) -> NaiveTime {
        self.evening_start
    }

    /// Returns the end of the evening band.
    #[must_use]
    pub const fn evening_end(&self) -> NaiveTime {
        self.evening_end
    }

    /// Returns the expansion cap in months.
    #[must_use]
    pub const fn expansion_cap_months(&self) -> u32 {
        self.expansion_cap_months
    }

    /// Returns the approval threshold in hours.
    #[must_use]
    pub const fn approval_duration_hours(&self) -> u32 {
        self.approval_duration_hours
    }

    /// Returns the approval threshold in attendees.
    #[must_use]
    pub const fn approval_attendee_limit(&self) -> u32 {
        self.approval_attendee_limit
    }

    /// Returns whether a wall-clock time falls within the evening band.
    #[must_use]
    pub fn is_evening(&self, time: NaiveTime) -> bool {
        time >= self.evening_start && time < self.evening_end
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let calendar = FacilityCalendar::with_defaults("Europe/Oslo").unwrap();
        assert_eq!(calendar.timezone(), "Europe/Oslo");
        assert_eq!(calendar.vat_rate(), Decimal::new(25, 0));
        assert_eq!(calendar.weekend_evening_surcharge(), Decimal::ZERO);
        assert_eq!(calendar.expansion_cap_months(), 6);
        assert_eq!(calendar.approval_duration_hours(), 8);
        assert_eq!(calendar.approval_attendee_limit(), 100);
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let result = FacilityCalendar::with_defaults("Invalid/Timezone");
        assert!(result.is_err());
    }

    #[test]
    fn test_vat_out_of_range_rejected() {
        let result = FacilityCalendar::new(
            String::from("Europe/Oslo"),
            Decimal::new(101, 0),
            Decimal::ZERO,
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            6,
            8,
            100,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_inverted_evening_band_rejected() {
        let result = FacilityCalendar::new(
            String::from("Europe/Oslo"),
            Decimal::new(25, 0),
            Decimal::ZERO,
            NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            6,
            8,
            100,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_expansion_cap_rejected() {
        let result = FacilityCalendar::new(
            String::from("Europe/Oslo"),
            Decimal::new(25, 0),
            Decimal::ZERO,
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            0,
            8,
            100,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_evening_band_membership() {
        let calendar = FacilityCalendar::with_defaults("Europe/Oslo").unwrap();

        assert!(calendar.is_evening(NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
        assert!(calendar.is_evening(NaiveTime::from_hms_opt(20, 30, 0).unwrap()));
        // The band is half-open: its end is not inside it
        assert!(!calendar.is_evening(NaiveTime::from_hms_opt(23, 0, 0).unwrap()));
        assert!(!calendar.is_evening(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }
}
