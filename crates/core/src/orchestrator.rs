// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking request pipeline.
//!
//! A request moves through Draft → Expanded → Validated and terminates
//! as committed, partially conflicted, or rejected:
//!
//! 1. Draft: structural validation (zone known, attendees fit, slots
//!    offered)
//! 2. Expanded: timing becomes a concrete occurrence list; one-time and
//!    ranged requests are length-1/length-N expansions
//! 3. Validated: occurrences are checked against a fresh snapshot of
//!    existing bookings and partitioned into clean and conflicted
//! 4. Terminal: all-clean requests are priced and handed to the store's
//!    atomic commit; anything else is surfaced to the caller
//!
//! ## Invariants
//!
//! - No caching between invocations; every call re-fetches the snapshot
//! - Caller-input problems become a `Rejected` outcome, never a
//!   `CoreError`
//! - A commit-time race triggers exactly one re-validation pass; a second
//!    race surfaces as a transient store error

use crate::error::CoreError;
use crate::outcome::{BookingOutcome, RejectionReason};
use crate::request::{BookingRequest, DateRange, Timing};
use crate::store::{BookingStore, CommitRequest, StoreError, ZoneDirectory};
use chrono::{DateTime, Days, NaiveDate, Utc};
use lokal_booking_domain::{
    BookingOccurrence, BookingStatus, ConflictResult, DomainError, ExpansionWarning,
    FacilityCalendar, PriceBreakdown, Zone, ZoneHierarchy, calculate_price, check_conflicts,
    expand_recurrence, suggest_alternative_zones, validate_against_rules, validate_attendee_count,
    validate_time_slot_allowed,
};
use tracing::{debug, info, warn};

/// Processes a booking request end to end.
///
/// # Arguments
///
/// * `store` - The booking persistence collaborator
/// * `directory` - The zone configuration collaborator
/// * `request` - The booking request
/// * `calendar` - The facility's calendar and pricing policy
/// * `evaluation_time` - The caller-supplied "now"
///
/// # Returns
///
/// The terminal `BookingOutcome`. Malformed requests and conflicted
/// requests are outcomes, not errors.
///
/// # Errors
///
/// Returns a `CoreError` only for collaborator failures: the store is
/// unreachable, the zone directory serves invalid data, or a commit race
/// persists through the single re-validation pass.
pub fn process_booking<S, Z>(
    store: &S,
    directory: &Z,
    request: &BookingRequest,
    calendar: &FacilityCalendar,
    evaluation_time: DateTime<Utc>,
) -> Result<BookingOutcome, CoreError>
where
    S: BookingStore,
    Z: ZoneDirectory,
{
    // Draft: collaborator data must be structurally sound
    let zone_set: Vec<Zone> = directory.zone_hierarchy(&request.facility_id)?;
    let hierarchy: ZoneHierarchy = ZoneHierarchy::from_zones(zone_set)?;

    // Draft: request-level structural validation
    let zone: &Zone = match hierarchy.zone(&request.zone_id) {
        Ok(zone) => zone,
        Err(err) => return Ok(rejected(err)),
    };
    if let Err(err) = validate_attendee_count(zone, request.attendee_count) {
        return Ok(rejected(err));
    }

    // Expanded
    let (occurrences, warnings) = match expand_timing(request, zone, calendar) {
        Ok(expanded) => expanded,
        Err(err) => return Ok(rejected(err)),
    };
    if occurrences.is_empty() {
        return Ok(rejected(DomainError::InvalidRecurrence(String::from(
            "Pattern produced no occurrences",
        ))));
    }
    debug!(
        occurrences = occurrences.len(),
        warnings = warnings.len(),
        "expanded booking request"
    );
    if let Err(err) = validate_against_rules(zone, &occurrences, evaluation_time) {
        return Ok(rejected(err));
    }

    // Validated: partition against a fresh snapshot
    let range: DateRange = occurrence_date_range(&occurrences)?;
    let snapshot = store.fetch_existing_bookings(&request.facility_id, &range)?;
    let results: Vec<Option<ConflictResult>> =
        check_conflicts(&hierarchy, &occurrences, &snapshot)?;

    if results.iter().any(Option::is_some) {
        let suggestions = suggest_alternative_zones(
            &hierarchy,
            &request.zone_id,
            &occurrences,
            &snapshot,
            request.attendee_count,
        )?;
        let (clean, conflicted) = partition_results(&occurrences, results);
        debug!(
            clean = clean.len(),
            conflicted = conflicted.len(),
            "conflicts found at validation"
        );
        if clean.is_empty() {
            return Ok(BookingOutcome::Rejected {
                reason: RejectionReason::FullyConflicted {
                    conflicts: conflicted,
                    suggestions,
                },
            });
        }
        return Ok(BookingOutcome::PartiallyConflicted {
            clean,
            conflicted,
            suggestions,
            warnings,
        });
    }

    // Terminal: price and commit
    let breakdown: PriceBreakdown =
        calculate_price(zone, &occurrences, request.actor_type, calendar)?;
    let requires_approval: bool = breakdown.requires_approval
        || request.attendee_count > calendar.approval_attendee_limit();
    let status: BookingStatus = if requires_approval {
        BookingStatus::Pending
    } else {
        BookingStatus::Confirmed
    };

    let commit_request: CommitRequest = CommitRequest {
        facility_id: request.facility_id.clone(),
        occurrences,
        breakdown,
        actor_type: request.actor_type,
        purpose: request.purpose.clone(),
        attendee_count: request.attendee_count,
        status,
    };

    let mut revalidated: bool = false;
    loop {
        match store.commit(&commit_request) {
            Ok(receipt) => {
                info!(
                    bookings = receipt.booking_ids.len(),
                    status = status.as_str(),
                    "booking committed"
                );
                return Ok(BookingOutcome::Committed {
                    breakdown: commit_request.breakdown,
                    confirmed_occurrences: commit_request.occurrences,
                    receipt,
                    committed_status: status,
                    requires_approval,
                    warnings,
                });
            }
            Err(StoreError::ConcurrentConflict {
                conflicting_booking_id,
            }) => {
                if revalidated {
                    return Err(CoreError::Store(StoreError::ConcurrentConflict {
                        conflicting_booking_id,
                    }));
                }
                revalidated = true;
                warn!(
                    conflicting_booking_id,
                    "commit raced; revalidating against a fresh snapshot"
                );

                let snapshot = store.fetch_existing_bookings(&request.facility_id, &range)?;
                let results: Vec<Option<ConflictResult>> =
                    check_conflicts(&hierarchy, &commit_request.occurrences, &snapshot)?;
                if results.iter().any(Option::is_some) {
                    let suggestions = suggest_alternative_zones(
                        &hierarchy,
                        &request.zone_id,
                        &commit_request.occurrences,
                        &snapshot,
                        request.attendee_count,
                    )?;
                    let (clean, conflicted) =
                        partition_results(&commit_request.occurrences, results);
                    if clean.is_empty() {
                        return Ok(BookingOutcome::Rejected {
                            reason: RejectionReason::FullyConflicted {
                                conflicts: conflicted,
                                suggestions,
                            },
                        });
                    }
                    return Ok(BookingOutcome::PartiallyConflicted {
                        clean,
                        conflicted,
                        suggestions,
                        warnings,
                    });
                }
                // The fresh snapshot is clean again; retry the commit once
            }
            Err(err) => return Err(CoreError::Store(err)),
        }
    }
}

/// Wraps a caller-input error as a rejected outcome.
const fn rejected(err: DomainError) -> BookingOutcome {
    BookingOutcome::Rejected {
        reason: RejectionReason::Invalid(err),
    }
}

/// Turns the request timing into a concrete occurrence list.
fn expand_timing(
    request: &BookingRequest,
    zone: &Zone,
    calendar: &FacilityCalendar,
) -> Result<(Vec<BookingOccurrence>, Vec<ExpansionWarning>), DomainError> {
    match &request.timing {
        Timing::OneTime { date, slot } => {
            validate_time_slot_allowed(&zone.booking_rules, slot)?;
            let occurrence =
                BookingOccurrence::resolve(request.zone_id.clone(), *date, slot, calendar)?;
            Ok((vec![occurrence], Vec::new()))
        }
        Timing::DateRange { start, end, slot } => {
            validate_time_slot_allowed(&zone.booking_rules, slot)?;
            let range: DateRange = DateRange::new(*start, *end)?;
            let mut occurrences: Vec<BookingOccurrence> = Vec::new();
            let mut date: NaiveDate = range.start();
            while date <= range.end() {
                occurrences.push(BookingOccurrence::resolve(
                    request.zone_id.clone(),
                    date,
                    slot,
                    calendar,
                )?);
                date = date.checked_add_days(Days::new(1)).ok_or_else(|| {
                    DomainError::DateArithmeticOverflow {
                        operation: String::from("advancing the date range cursor"),
                    }
                })?;
            }
            Ok((occurrences, Vec::new()))
        }
        Timing::Recurring(pattern) => {
            for slot in pattern.time_slots() {
                validate_time_slot_allowed(&zone.booking_rules, slot)?;
            }
            let expansion = expand_recurrence(pattern, &request.zone_id, calendar)?;
            Ok((expansion.occurrences, expansion.warnings))
        }
    }
}

/// Computes the date range the snapshot must cover.
fn occurrence_date_range(occurrences: &[BookingOccurrence]) -> Result<DateRange, DomainError> {
    let mut start: Option<NaiveDate> = None;
    let mut end: Option<NaiveDate> = None;
    for occurrence in occurrences {
        let occ_start: NaiveDate = occurrence.start.date_naive();
        let occ_end: NaiveDate = occurrence.end.date_naive();
        start = Some(start.map_or(occ_start, |s| s.min(occ_start)));
        end = Some(end.map_or(occ_end, |e| e.max(occ_end)));
    }
    match (start, end) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => Err(DomainError::InvalidRecurrence(String::from(
            "Cannot compute a snapshot range for an empty occurrence list",
        ))),
    }
}

/// Splits occurrences into clean and conflicted per the check results.
fn partition_results(
    occurrences: &[BookingOccurrence],
    results: Vec<Option<ConflictResult>>,
) -> (Vec<BookingOccurrence>, Vec<ConflictResult>) {
    let mut clean: Vec<BookingOccurrence> = Vec::new();
    let mut conflicted: Vec<ConflictResult> = Vec::new();
    for (occurrence, result) in occurrences.iter().zip(results) {
        match result {
            Some(conflict) => conflicted.push(conflict),
            None => clean.push(occurrence.clone()),
        }
    }
    (clean, conflicted)
}
