// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence pattern expansion.
//!
//! This module turns a recurrence specification into the concrete,
//! ordered list of occurrences it denotes.
//!
//! ## Invariants
//!
//! - Output is strictly ascending by start instant, with no duplicates
//! - Expansion is a pure function of its inputs; nothing is cached
//! - Weeks are counted from the pattern start date; a date belongs to
//!   week `floor(days_since_start / 7)`
//! - `Biweekly` composes multiplicatively with `interval`: effective
//!   step is `2 * interval` weeks
//! - `Monthly` repeats on the start date's day-of-month, clamped into
//!   shorter months, and ignores the weekday set
//! - Regardless of the termination rule, nothing is emitted beyond the
//!   facility's expansion cap; truncation is reported as a warning, not
//!   an error

use crate::error::DomainError;
use crate::facility_calendar::FacilityCalendar;
use crate::time_slot::{BookingOccurrence, TimeSlot};
use crate::types::ZoneId;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How often a recurring booking repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    /// Every `interval` weeks.
    Weekly,
    /// Every `2 * interval` weeks.
    Biweekly,
    /// Every `interval` months, on the start date's day-of-month.
    Monthly,
}

impl Frequency {
    /// Parses a frequency from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecurrence` if the string is not a
    /// valid frequency.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(DomainError::InvalidRecurrence(format!(
                "Unknown frequency: {s}"
            ))),
        }
    }

    /// Returns the string representation of this frequency.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }
}

/// When a recurrence stops.
///
/// Exactly one rule applies; the enum makes the mutual exclusion
/// structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Stop once an occurrence date would pass this date (inclusive).
    EndDate(NaiveDate),
    /// Stop after this many occurrences have been emitted.
    OccurrenceCount(u32),
}

/// Non-fatal policy warnings attached to a successful expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpansionWarning {
    /// The configured termination reaches beyond the expansion cap; the
    /// output was truncated at the cap.
    TruncatedAtCap {
        /// The cap that was applied, in months from the start date.
        cap_months: u32,
    },
}

/// Result of expanding a recurrence pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    /// Concrete occurrences, strictly ascending by start instant.
    pub occurrences: Vec<BookingOccurrence>,
    /// Policy warnings. Never causes the expansion to fail.
    pub warnings: Vec<ExpansionWarning>,
}

/// A validated recurrence specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    /// First date the pattern is anchored at.
    start_date: NaiveDate,
    /// Repeat frequency.
    frequency: Frequency,
    /// Repeat interval (1 = every cycle).
    interval: u32,
    /// Selected weekdays, normalized ascending from Monday.
    weekdays: Vec<Weekday>,
    /// Selected time slots, normalized ascending by start.
    time_slots: Vec<TimeSlot>,
    /// The termination rule.
    termination: Termination,
}

impl RecurrencePattern {
    /// Creates a validated `RecurrencePattern`.
    ///
    /// Weekdays and time slots are deduplicated and sorted so that
    /// expansion order is independent of input order.
    ///
    /// # Arguments
    ///
    /// * `start_date` - First date the pattern is anchored at
    /// * `frequency` - Repeat frequency
    /// * `interval` - Repeat interval (must be at least 1)
    /// * `weekdays` - Selected weekdays (must be non-empty)
    /// * `time_slots` - Selected time slots (must be non-empty)
    /// * `termination` - The termination rule
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecurrence` if:
    /// - `interval` is zero
    /// - `weekdays` or `time_slots` is empty
    /// - The end date precedes the start date
    /// - The occurrence count is zero
    pub fn new(
        start_date: NaiveDate,
        frequency: Frequency,
        interval: u32,
        weekdays: Vec<Weekday>,
        time_slots: Vec<TimeSlot>,
        termination: Termination,
    ) -> Result<Self, DomainError> {
        if interval == 0 {
            return Err(DomainError::InvalidRecurrence(String::from(
                "Interval must be at least 1",
            )));
        }
        if weekdays.is_empty() {
            return Err(DomainError::InvalidRecurrence(String::from(
                "Weekday set must not be empty",
            )));
        }
        if time_slots.is_empty() {
            return Err(DomainError::InvalidRecurrence(String::from(
                "Time slot set must not be empty",
            )));
        }
        match termination {
            Termination::EndDate(end_date) => {
                if end_date < start_date {
                    return Err(DomainError::InvalidRecurrence(format!(
                        "End date {end_date} precedes start date {start_date}"
                    )));
                }
            }
            Termination::OccurrenceCount(count) => {
                if count == 0 {
                    return Err(DomainError::InvalidRecurrence(String::from(
                        "Occurrence count must be at least 1",
                    )));
                }
            }
        }

        let mut weekdays: Vec<Weekday> = weekdays;
        weekdays.sort_by_key(Weekday::num_days_from_monday);
        weekdays.dedup();

        let mut time_slots: Vec<TimeSlot> = time_slots;
        time_slots.sort();
        time_slots.dedup();

        Ok(Self {
            start_date,
            frequency,
            interval,
            weekdays,
            time_slots,
            termination,
        })
    }

    /// Returns the pattern's anchor date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the repeat frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the repeat interval.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns the selected weekdays, ascending from Monday.
    #[must_use]
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    /// Returns the selected time slots, ascending by start.
    #[must_use]
    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    /// Returns the termination rule.
    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }
}

/// Expands a recurrence pattern into concrete occurrences for a zone.
///
/// # Arguments
///
/// * `pattern` - The validated recurrence pattern
/// * `zone_id` - The zone every occurrence targets
/// * `calendar` - Facility calendar providing the timezone and the
///   expansion cap
///
/// # Returns
///
/// An `Expansion` whose occurrences are strictly ascending by start
/// instant. If the configured termination reaches beyond the cap, the
/// output is truncated and a `TruncatedAtCap` warning is attached.
///
/// # Errors
///
/// Returns an error if:
/// - Date arithmetic overflows (`DateArithmeticOverflow`)
/// - An occurrence falls on a DST gap or ambiguity
///   (`UnresolvableLocalTime`)
pub fn expand_recurrence(
    pattern: &RecurrencePattern,
    zone_id: &ZoneId,
    calendar: &FacilityCalendar,
) -> Result<Expansion, DomainError> {
    let cap_date: NaiveDate = pattern
        .start_date
        .checked_add_months(Months::new(calendar.expansion_cap_months()))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("computing the expansion cap date"),
        })?;

    match pattern.frequency {
        Frequency::Weekly | Frequency::Biweekly => {
            expand_weekly(pattern, zone_id, calendar, cap_date)
        }
        Frequency::Monthly => expand_monthly(pattern, zone_id, calendar, cap_date),
    }
}

/// Walks the calendar day by day, emitting matching weekday/slot pairs in
/// selected weeks.
fn expand_weekly(
    pattern: &RecurrencePattern,
    zone_id: &ZoneId,
    calendar: &FacilityCalendar,
    cap_date: NaiveDate,
) -> Result<Expansion, DomainError> {
    let step_weeks: i64 = i64::from(pattern.interval)
        * match pattern.frequency {
            Frequency::Biweekly => 2,
            Frequency::Weekly | Frequency::Monthly => 1,
        };

    let mut occurrences: Vec<BookingOccurrence> = Vec::new();
    let mut date: NaiveDate = pattern.start_date;

    while date <= cap_date {
        if let Termination::EndDate(end_date) = pattern.termination {
            if date > end_date {
                return Ok(finish(occurrences, false, calendar));
            }
        }

        let week_index: i64 = date.signed_duration_since(pattern.start_date).num_days() / 7;
        if week_index % step_weeks == 0 && pattern.weekdays.contains(&date.weekday()) {
            for slot in &pattern.time_slots {
                occurrences.push(BookingOccurrence::resolve(
                    zone_id.clone(),
                    date,
                    slot,
                    calendar,
                )?);
                if let Termination::OccurrenceCount(count) = pattern.termination {
                    if occurrences.len() >= count as usize {
                        return Ok(finish(occurrences, false, calendar));
                    }
                }
            }
        }

        date = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("advancing the expansion cursor"),
            })?;
    }

    let truncated: bool = termination_reaches_past(pattern.termination, cap_date, &occurrences);
    Ok(finish(occurrences, truncated, calendar))
}

/// Emits the start date's day-of-month every `interval` months, clamped
/// into shorter months.
fn expand_monthly(
    pattern: &RecurrencePattern,
    zone_id: &ZoneId,
    calendar: &FacilityCalendar,
    cap_date: NaiveDate,
) -> Result<Expansion, DomainError> {
    let mut occurrences: Vec<BookingOccurrence> = Vec::new();
    let mut cycle: u32 = 0;

    loop {
        let date: NaiveDate = pattern
            .start_date
            .checked_add_months(Months::new(cycle * pattern.interval))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("advancing the monthly expansion cursor"),
            })?;

        if date > cap_date {
            let truncated: bool =
                termination_reaches_past(pattern.termination, cap_date, &occurrences);
            return Ok(finish(occurrences, truncated, calendar));
        }
        if let Termination::EndDate(end_date) = pattern.termination {
            if date > end_date {
                return Ok(finish(occurrences, false, calendar));
            }
        }

        for slot in &pattern.time_slots {
            occurrences.push(BookingOccurrence::resolve(
                zone_id.clone(),
                date,
                slot,
                calendar,
            )?);
            if let Termination::OccurrenceCount(count) = pattern.termination {
                if occurrences.len() >= count as usize {
                    return Ok(finish(occurrences, false, calendar));
                }
            }
        }

        cycle += 1;
    }
}

/// Decides whether stopping at the cap truncated the configured
/// termination.
fn termination_reaches_past(
    termination: Termination,
    cap_date: NaiveDate,
    occurrences: &[BookingOccurrence],
) -> bool {
    match termination {
        Termination::EndDate(end_date) => end_date > cap_date,
        Termination::OccurrenceCount(count) => occurrences.len() < count as usize,
    }
}

/// Assembles the expansion result, attaching the cap warning if needed.
fn finish(
    occurrences: Vec<BookingOccurrence>,
    truncated: bool,
    calendar: &FacilityCalendar,
) -> Expansion {
    let warnings: Vec<ExpansionWarning> = if truncated {
        vec![ExpansionWarning::TruncatedAtCap {
            cap_months: calendar.expansion_cap_months(),
        }]
    } else {
        Vec::new()
    };
    Expansion {
        occurrences,
        warnings,
    }
}
