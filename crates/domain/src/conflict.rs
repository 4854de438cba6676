// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict detection between candidate occurrences and existing bookings.
//!
//! Two intervals conflict iff `start_a < end_b && start_b < end_a`
//! (half-open overlap; touching endpoints never conflict). A candidate
//! on zone Z collides with holding bookings on Z itself, on Z's main
//! zone, or on any of Z's sub-zones. Siblings never collide.
//!
//! ## Invariants
//!
//! - Checking is read-only and idempotent; no state is retained
//! - Batch checks evaluate occurrences independently and preserve order
//! - Only bookings whose status holds its slots participate
//! - The reported conflicting booking is deterministic: earliest start,
//!   then lowest booking id

use crate::error::DomainError;
use crate::time_slot::BookingOccurrence;
use crate::types::{ExistingBooking, ZoneId};
use crate::zone_hierarchy::{Containment, ZoneHierarchy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a conflicting booking relates to the candidate zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    /// The existing booking is on the candidate zone itself.
    SameZone,
    /// The existing booking is on a zone containing the candidate.
    Ancestor,
    /// The existing booking is on a zone contained in the candidate.
    Descendant,
}

impl ConflictKind {
    /// Returns the string representation of this conflict kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SameZone => "same-zone",
            Self::Ancestor => "ancestor",
            Self::Descendant => "descendant",
        }
    }
}

/// A detected conflict, carried as data for user-facing messaging.
///
/// Conflicts are expected outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResult {
    /// The candidate occurrence that collided.
    pub occurrence: BookingOccurrence,
    /// The existing booking it collided with.
    pub conflicting_booking_id: i64,
    /// How the conflicting booking relates to the candidate zone.
    pub kind: ConflictKind,
}

/// Returns whether two half-open intervals overlap.
///
/// Touching endpoints (one interval ending exactly where the other
/// starts) do not overlap.
#[must_use]
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Checks a candidate interval on a zone against the existing bookings.
///
/// # Arguments
///
/// * `hierarchy` - The facility's validated zone set
/// * `zone_id` - The candidate zone
/// * `start` - Candidate interval start (UTC)
/// * `end` - Candidate interval end (UTC, exclusive)
/// * `existing` - Snapshot of existing bookings
///
/// # Returns
///
/// `Ok(Some(ConflictResult))` describing the conflict, or `Ok(None)` if
/// the interval is free.
///
/// # Errors
///
/// Returns `DomainError::UnknownZone` if the candidate zone is not in the
/// facility's zone set.
pub fn check_conflict(
    hierarchy: &ZoneHierarchy,
    zone_id: &ZoneId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: &[ExistingBooking],
) -> Result<Option<ConflictResult>, DomainError> {
    let containment: Containment = hierarchy.resolve_containment(zone_id)?;

    let mut best: Option<(&ExistingBooking, ConflictKind)> = None;
    for booking in existing {
        if !booking.status.participates_in_conflicts() {
            continue;
        }
        let kind: ConflictKind = if booking.zone_id == *zone_id {
            ConflictKind::SameZone
        } else if containment.ancestors.contains(&booking.zone_id) {
            ConflictKind::Ancestor
        } else if containment.descendants.contains(&booking.zone_id) {
            ConflictKind::Descendant
        } else {
            continue;
        };
        if !intervals_overlap(start, end, booking.start, booking.end) {
            continue;
        }
        let earlier: bool = match best {
            None => true,
            Some((current, _)) => {
                (booking.start, booking.booking_id) < (current.start, current.booking_id)
            }
        };
        if earlier {
            best = Some((booking, kind));
        }
    }

    Ok(best.map(|(booking, kind)| ConflictResult {
        occurrence: BookingOccurrence::new(zone_id.clone(), start, end),
        conflicting_booking_id: booking.booking_id,
        kind,
    }))
}

/// Checks a batch of occurrences against the existing bookings.
///
/// Each occurrence is evaluated independently: its conflict status never
/// depends on sibling occurrences in the same request. The result vector
/// has exactly one entry per input occurrence, in input order.
///
/// # Arguments
///
/// * `hierarchy` - The facility's validated zone set
/// * `occurrences` - Candidate occurrences
/// * `existing` - Snapshot of existing bookings
///
/// # Errors
///
/// Returns `DomainError::UnknownZone` if any occurrence targets a zone
/// outside the facility's zone set.
pub fn check_conflicts(
    hierarchy: &ZoneHierarchy,
    occurrences: &[BookingOccurrence],
    existing: &[ExistingBooking],
) -> Result<Vec<Option<ConflictResult>>, DomainError> {
    let mut results: Vec<Option<ConflictResult>> = Vec::with_capacity(occurrences.len());
    for occurrence in occurrences {
        results.push(check_conflict(
            hierarchy,
            &occurrence.zone_id,
            occurrence.start,
            occurrence.end,
            existing,
        )?);
    }
    Ok(results)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::booking_status::BookingStatus;
    use crate::types::{BookingRules, FacilityId, Zone};
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn make_zone(id: &str, parent: Option<&str>, is_main: bool) -> Zone {
        Zone::new(
            ZoneId::new(id),
            FacilityId::new("idrettshall"),
            id.to_string(),
            120,
            Decimal::new(450, 0),
            parent.map(ZoneId::new),
            is_main,
            false,
            BookingRules::new(1, 12, Vec::new(), 90, 24).unwrap(),
        )
    }

    fn make_hierarchy() -> ZoneHierarchy {
        ZoneHierarchy::from_zones(vec![
            make_zone("hele-hallen", None, true),
            make_zone("bane-1", Some("hele-hallen"), false),
            make_zone("bane-2", Some("hele-hallen"), false),
        ])
        .unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn make_booking(id: i64, zone: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ExistingBooking {
        ExistingBooking::new(id, ZoneId::new(zone), start, end, BookingStatus::Confirmed)
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (
                utc(2025, 3, 1, 10, 0),
                utc(2025, 3, 1, 12, 0),
                utc(2025, 3, 1, 11, 0),
                utc(2025, 3, 1, 13, 0),
            ),
            (
                utc(2025, 3, 1, 10, 0),
                utc(2025, 3, 1, 12, 0),
                utc(2025, 3, 1, 12, 0),
                utc(2025, 3, 1, 14, 0),
            ),
            (
                utc(2025, 3, 1, 10, 0),
                utc(2025, 3, 1, 12, 0),
                utc(2025, 3, 2, 10, 0),
                utc(2025, 3, 2, 12, 0),
            ),
        ];

        for (a_start, a_end, b_start, b_end) in cases {
            assert_eq!(
                intervals_overlap(a_start, a_end, b_start, b_end),
                intervals_overlap(b_start, b_end, a_start, a_end)
            );
        }
    }

    #[test]
    fn test_touching_endpoints_never_conflict() {
        let hierarchy = make_hierarchy();
        let existing = vec![make_booking(
            1,
            "bane-1",
            utc(2025, 3, 1, 8, 0),
            utc(2025, 3, 1, 10, 0),
        )];

        let result = check_conflict(
            &hierarchy,
            &ZoneId::new("bane-1"),
            utc(2025, 3, 1, 10, 0),
            utc(2025, 3, 1, 12, 0),
            &existing,
        )
        .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_same_zone_conflict() {
        let hierarchy = make_hierarchy();
        let existing = vec![make_booking(
            7,
            "bane-1",
            utc(2025, 3, 1, 9, 0),
            utc(2025, 3, 1, 11, 0),
        )];

        let result = check_conflict(
            &hierarchy,
            &ZoneId::new("bane-1"),
            utc(2025, 3, 1, 10, 0),
            utc(2025, 3, 1, 12, 0),
            &existing,
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.conflicting_booking_id, 7);
        assert_eq!(result.kind, ConflictKind::SameZone);
    }

    #[test]
    fn test_whole_facility_blocks_sub_zone() {
        let hierarchy = make_hierarchy();
        // Whole facility booked 14:00-16:00
        let existing = vec![make_booking(
            3,
            "hele-hallen",
            utc(2025, 3, 1, 14, 0),
            utc(2025, 3, 1, 16, 0),
        )];

        // Sub-zone candidate 15:00-15:30 collides with its ancestor
        let result = check_conflict(
            &hierarchy,
            &ZoneId::new("bane-1"),
            utc(2025, 3, 1, 15, 0),
            utc(2025, 3, 1, 15, 30),
            &existing,
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.kind, ConflictKind::Ancestor);
        assert_eq!(result.conflicting_booking_id, 3);
    }

    #[test]
    fn test_sub_zone_blocks_whole_facility() {
        let hierarchy = make_hierarchy();
        let existing = vec![make_booking(
            4,
            "bane-2",
            utc(2025, 3, 1, 14, 0),
            utc(2025, 3, 1, 16, 0),
        )];

        let result = check_conflict(
            &hierarchy,
            &ZoneId::new("hele-hallen"),
            utc(2025, 3, 1, 15, 0),
            utc(2025, 3, 1, 17, 0),
            &existing,
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.kind, ConflictKind::Descendant);
    }

    #[test]
    fn test_siblings_never_conflict() {
        let hierarchy = make_hierarchy();
        let existing = vec![make_booking(
            5,
            "bane-2",
            utc(2025, 3, 1, 14, 0),
            utc(2025, 3, 1, 16, 0),
        )];

        let result = check_conflict(
            &hierarchy,
            &ZoneId::new("bane-1"),
            utc(2025, 3, 1, 14, 0),
            utc(2025, 3, 1, 16, 0),
            &existing,
        )
        .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_cancelled_and_rejected_never_conflict() {
        let hierarchy = make_hierarchy();
        let mut cancelled = make_booking(6, "bane-1", utc(2025, 3, 1, 9, 0), utc(2025, 3, 1, 11, 0));
        cancelled.status = BookingStatus::Cancelled;
        let mut rejected = make_booking(7, "bane-1", utc(2025, 3, 1, 9, 0), utc(2025, 3, 1, 11, 0));
        rejected.status = BookingStatus::Rejected;

        let result = check_conflict(
            &hierarchy,
            &ZoneId::new("bane-1"),
            utc(2025, 3, 1, 10, 0),
            utc(2025, 3, 1, 12, 0),
            &[cancelled, rejected],
        )
        .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_pending_bookings_hold_their_slots() {
        let hierarchy = make_hierarchy();
        let mut pending = make_booking(8, "bane-1", utc(2025, 3, 1, 9, 0), utc(2025, 3, 1, 11, 0));
        pending.status = BookingStatus::Pending;

        let result = check_conflict(
            &hierarchy,
            &ZoneId::new("bane-1"),
            utc(2025, 3, 1, 10, 0),
            utc(2025, 3, 1, 12, 0),
            &[pending],
        )
        .unwrap();

        assert!(result.is_some());
    }

    #[test]
    fn test_reported_conflict_is_deterministic() {
        let hierarchy = make_hierarchy();
        // Two overlapping bookings; the earliest-starting one is reported
        let existing = vec![
            make_booking(12, "bane-1", utc(2025, 3, 1, 10, 30), utc(2025, 3, 1, 12, 0)),
            make_booking(11, "bane-1", utc(2025, 3, 1, 9, 0), utc(2025, 3, 1, 11, 0)),
        ];

        let result = check_conflict(
            &hierarchy,
            &ZoneId::new("bane-1"),
            utc(2025, 3, 1, 10, 0),
            utc(2025, 3, 1, 12, 0),
            &existing,
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.conflicting_booking_id, 11);
    }

    #[test]
    fn test_batch_preserves_order_and_independence() {
        let hierarchy = make_hierarchy();
        let existing = vec![make_booking(
            9,
            "bane-1",
            utc(2025, 3, 8, 10, 0),
            utc(2025, 3, 8, 12, 0),
        )];

        let occurrences: Vec<BookingOccurrence> = (0..4)
            .map(|week| {
                BookingOccurrence::new(
                    ZoneId::new("bane-1"),
                    utc(2025, 3, 1 + week * 7, 10, 0),
                    utc(2025, 3, 1 + week * 7, 12, 0),
                )
            })
            .collect();

        let results = check_conflicts(&hierarchy, &occurrences, &existing).unwrap();

        assert_eq!(results.len(), 4);
        assert!(results[0].is_none());
        assert!(results[1].is_some());
        assert!(results[2].is_none());
        assert!(results[3].is_none());
    }

    #[test]
    fn test_checking_is_idempotent() {
        let hierarchy = make_hierarchy();
        let existing = vec![make_booking(
            10,
            "hele-hallen",
            utc(2025, 3, 1, 14, 0),
            utc(2025, 3, 1, 16, 0),
        )];
        let occurrences = vec![BookingOccurrence::new(
            ZoneId::new("bane-1"),
            utc(2025, 3, 1, 15, 0),
            utc(2025, 3, 1, 15, 30),
        )];

        let first = check_conflicts(&hierarchy, &occurrences, &existing).unwrap();
        let second = check_conflicts(&hierarchy, &occurrences, &existing).unwrap();

        assert_eq!(first, second);
    }
}
