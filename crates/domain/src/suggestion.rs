// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Alternative zone suggestions for conflicted requests.
//!
//! When a request cannot be satisfied on its zone, the caller can offer
//! other zones of the same facility that fit the party and are free for
//! every requested occurrence.
//!
//! ## Ordering Rules (Authoritative)
//!
//! Suggestions are ordered by:
//! 1. Capacity (smallest adequate fit first)
//! 2. Tie Breaker 1: price per hour (cheapest first)
//! 3. Tie Breaker 2: zone id (lexicographic)
//!
//! ## Invariants
//!
//! - The ordering is a strict total order: zone ids are unique, so no
//!   two suggestions can compare equal
//! - A suggested zone is free for the complete occurrence set, never a
//!   subset

use crate::conflict::check_conflict;
use crate::error::DomainError;
use crate::time_slot::BookingOccurrence;
use crate::types::{ExistingBooking, Zone, ZoneId};
use crate::zone_hierarchy::ZoneHierarchy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One suggested alternative zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSuggestion {
    /// The suggested zone.
    pub zone_id: ZoneId,
    /// Display name of the zone.
    pub name: String,
    /// The zone's capacity.
    pub capacity: u32,
    /// The zone's hourly rate.
    pub price_per_hour: Decimal,
}

/// Suggests alternative zones that fit the party and are free for every
/// requested occurrence.
///
/// # Arguments
///
/// * `hierarchy` - The facility's validated zone set
/// * `requested` - The originally requested zone (never suggested back)
/// * `occurrences` - The requested occurrences
/// * `existing` - Snapshot of existing bookings
/// * `attendee_count` - The requested attendee count
///
/// # Returns
///
/// Suggestions ordered by capacity, then price, then zone id.
///
/// # Errors
///
/// Returns `DomainError::UnknownZone` if the hierarchy and occurrence
/// data disagree (only possible with hand-built inputs).
pub fn suggest_alternative_zones(
    hierarchy: &ZoneHierarchy,
    requested: &ZoneId,
    occurrences: &[BookingOccurrence],
    existing: &[ExistingBooking],
    attendee_count: u32,
) -> Result<Vec<ZoneSuggestion>, DomainError> {
    let mut candidates: Vec<&Zone> = Vec::new();

    'zones: for zone in hierarchy.zones() {
        if &zone.zone_id == requested {
            continue;
        }
        if zone.capacity < attendee_count {
            continue;
        }
        for occurrence in occurrences {
            let conflict = check_conflict(
                hierarchy,
                &zone.zone_id,
                occurrence.start,
                occurrence.end,
                existing,
            )?;
            if conflict.is_some() {
                continue 'zones;
            }
        }
        candidates.push(zone);
    }

    candidates.sort_by(|a, b| {
        a.capacity
            .cmp(&b.capacity)
            .then_with(|| a.price_per_hour.cmp(&b.price_per_hour))
            .then_with(|| a.zone_id.cmp(&b.zone_id))
    });

    Ok(candidates
        .into_iter()
        .map(|zone| ZoneSuggestion {
            zone_id: zone.zone_id.clone(),
            name: zone.name.clone(),
            capacity: zone.capacity,
            price_per_hour: zone.price_per_hour,
        })
        .collect())
}
