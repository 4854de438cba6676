// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator contracts for persistence and zone configuration.
//!
//! The core performs I/O only through these traits. Reads return a
//! snapshot; `commit` is the sole mutating call and the final arbiter of
//! conflict truth: it must re-check conflicts atomically at persistence
//! time and signal `StoreError::ConcurrentConflict` when a competing
//! booking arrived between snapshot and commit.
//!
//! `MemoryBookingStore` is the in-process reference implementation: a
//! mutex-serialized check-and-insert that honors the commit contract.

use crate::request::DateRange;
use chrono::{DateTime, Days, NaiveTime, Utc};
use lokal_booking_domain::{
    ActorType, BookingOccurrence, BookingStatus, DomainError, ExistingBooking, FacilityId,
    PriceBreakdown, Zone, ZoneHierarchy, ZoneId, check_conflict,
};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::debug;

/// Errors signaled by the booking store or zone directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A competing booking was persisted between snapshot and commit.
    ConcurrentConflict {
        /// The booking that won the race.
        conflicting_booking_id: i64,
    },
    /// The requested facility is not served by this store.
    FacilityNotFound(String),
    /// The store is unreachable or internally inconsistent.
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConcurrentConflict {
                conflicting_booking_id,
            } => {
                write!(
                    f,
                    "Commit lost a race against booking {conflicting_booking_id}"
                )
            }
            Self::FacilityNotFound(facility) => write!(f, "Facility '{facility}' not found"),
            Self::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The commit payload handed to the booking store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
    /// The facility being booked.
    pub facility_id: FacilityId,
    /// The occurrences to persist, all conflict-free at snapshot time.
    pub occurrences: Vec<BookingOccurrence>,
    /// The price breakdown computed for the occurrences.
    pub breakdown: PriceBreakdown,
    /// The requesting party's category.
    pub actor_type: ActorType,
    /// Free-text purpose of the booking.
    pub purpose: String,
    /// Expected number of attendees.
    pub attendee_count: u32,
    /// The workflow status to persist the bookings with.
    pub status: BookingStatus,
}

/// The store's acknowledgement of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    /// Store-assigned ids, one per committed occurrence, in order.
    pub booking_ids: Vec<i64>,
}

/// Read-mostly zone configuration collaborator.
pub trait ZoneDirectory {
    /// Returns the facility's full zone set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FacilityNotFound` if the facility is unknown.
    fn zone_hierarchy(&self, facility_id: &FacilityId) -> Result<Vec<Zone>, StoreError>;
}

/// Booking persistence collaborator.
pub trait BookingStore {
    /// Returns a snapshot of existing bookings touching the date range.
    ///
    /// The snapshot reflects only non-deleted rows as of call time.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the snapshot cannot be produced.
    fn fetch_existing_bookings(
        &self,
        facility_id: &FacilityId,
        range: &DateRange,
    ) -> Result<Vec<ExistingBooking>, StoreError>;

    /// Atomically re-checks conflicts and persists the occurrences.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConcurrentConflict` if a competing booking
    /// invalidated the caller's snapshot, or another `StoreError` if
    /// persistence fails.
    fn commit(&self, request: &CommitRequest) -> Result<CommitReceipt, StoreError>;
}

/// Mutable state behind the memory store's mutex.
#[derive(Debug)]
struct MemoryStoreState {
    /// All persisted bookings.
    bookings: Vec<ExistingBooking>,
    /// Next booking id to assign.
    next_id: i64,
}

/// In-memory reference implementation of both collaborator traits.
///
/// Commit serializes on a mutex and re-runs the conflict check against
/// the live booking set, which makes it the final arbiter the contract
/// requires.
#[derive(Debug)]
pub struct MemoryBookingStore {
    /// The facility this store serves.
    facility_id: FacilityId,
    /// The facility's validated zone set.
    hierarchy: ZoneHierarchy,
    /// Serialized mutable state.
    state: Mutex<MemoryStoreState>,
}

impl MemoryBookingStore {
    /// Creates a store for one facility.
    ///
    /// # Arguments
    ///
    /// * `facility_id` - The facility this store serves
    /// * `zones` - The facility's zone set
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the zone set violates the containment
    /// invariants.
    pub fn new(facility_id: FacilityId, zones: Vec<Zone>) -> Result<Self, DomainError> {
        let hierarchy: ZoneHierarchy = ZoneHierarchy::from_zones(zones)?;
        Ok(Self {
            facility_id,
            hierarchy,
            state: Mutex::new(MemoryStoreState {
                bookings: Vec::new(),
                next_id: 1,
            }),
        })
    }

    /// Inserts a booking directly, bypassing conflict checking.
    ///
    /// This exists to seed fixtures and to model bookings created by
    /// other writers.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store mutex is poisoned.
    pub fn insert_booking(
        &self,
        zone_id: ZoneId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: BookingStatus,
    ) -> Result<i64, StoreError> {
        let mut state = self.lock_state()?;
        let booking_id: i64 = state.next_id;
        state.next_id += 1;
        state
            .bookings
            .push(ExistingBooking::new(booking_id, zone_id, start, end, status));
        Ok(booking_id)
    }

    /// Returns a copy of every persisted booking.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store mutex is poisoned.
    pub fn all_bookings(&self) -> Result<Vec<ExistingBooking>, StoreError> {
        Ok(self.lock_state()?.bookings.clone())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, MemoryStoreState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable(String::from("store mutex poisoned")))
    }
}

impl ZoneDirectory for MemoryBookingStore {
    fn zone_hierarchy(&self, facility_id: &FacilityId) -> Result<Vec<Zone>, StoreError> {
        if facility_id != &self.facility_id {
            return Err(StoreError::FacilityNotFound(
                facility_id.value().to_string(),
            ));
        }
        Ok(self.hierarchy.zones().to_vec())
    }
}

impl BookingStore for MemoryBookingStore {
    fn fetch_existing_bookings(
        &self,
        facility_id: &FacilityId,
        range: &DateRange,
    ) -> Result<Vec<ExistingBooking>, StoreError> {
        if facility_id != &self.facility_id {
            return Err(StoreError::FacilityNotFound(
                facility_id.value().to_string(),
            ));
        }

        let start_bound: DateTime<Utc> = range.start().and_time(NaiveTime::MIN).and_utc();
        let end_bound: DateTime<Utc> = range
            .end()
            .checked_add_days(Days::new(1))
            .ok_or_else(|| StoreError::Unavailable(String::from("date range out of bounds")))?
            .and_time(NaiveTime::MIN)
            .and_utc();

        let state = self.lock_state()?;
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.start < end_bound && b.end > start_bound)
            .cloned()
            .collect())
    }

    fn commit(&self, request: &CommitRequest) -> Result<CommitReceipt, StoreError> {
        if request.facility_id != self.facility_id {
            return Err(StoreError::FacilityNotFound(
                request.facility_id.value().to_string(),
            ));
        }

        let mut state = self.lock_state()?;

        // Final serialized conflict check against the live booking set
        for occurrence in &request.occurrences {
            let conflict = check_conflict(
                &self.hierarchy,
                &occurrence.zone_id,
                occurrence.start,
                occurrence.end,
                &state.bookings,
            )
            .map_err(|e| StoreError::Unavailable(format!("conflict check failed: {e}")))?;

            if let Some(conflict) = conflict {
                debug!(
                    conflicting_booking_id = conflict.conflicting_booking_id,
                    "commit lost the conflict race"
                );
                return Err(StoreError::ConcurrentConflict {
                    conflicting_booking_id: conflict.conflicting_booking_id,
                });
            }
        }

        let mut booking_ids: Vec<i64> = Vec::with_capacity(request.occurrences.len());
        for occurrence in &request.occurrences {
            let booking_id: i64 = state.next_id;
            state.next_id += 1;
            state.bookings.push(ExistingBooking::new(
                booking_id,
                occurrence.zone_id.clone(),
                occurrence.start,
                occurrence.end,
                request.status,
            ));
            booking_ids.push(booking_id);
        }

        debug!(
            count = booking_ids.len(),
            status = request.status.as_str(),
            "committed bookings"
        );
        Ok(CommitReceipt { booking_ids })
    }
}
