// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::CommitReceipt;
use lokal_booking_domain::{
    BookingOccurrence, BookingStatus, ConflictResult, DomainError, ExpansionWarning,
    PriceBreakdown, ZoneSuggestion,
};

/// Why a booking request was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The request itself was malformed; fix the form input.
    Invalid(DomainError),
    /// Every requested occurrence collided with an existing booking; pick
    /// different times or one of the suggested zones.
    FullyConflicted {
        /// One conflict per requested occurrence.
        conflicts: Vec<ConflictResult>,
        /// Alternative zones free for the full occurrence set.
        suggestions: Vec<ZoneSuggestion>,
    },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "Request invalid: {err}"),
            Self::FullyConflicted { conflicts, .. } => {
                write!(f, "All {} requested occurrence(s) conflict", conflicts.len())
            }
        }
    }
}

/// The outcome of processing a booking request.
///
/// This is the only shape the UI layer is allowed to depend on. The three
/// variants keep "your request was malformed", "some of your times are
/// taken", and "everything is booked" distinguishable end-to-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Every occurrence was free and the commit succeeded.
    Committed {
        /// The aggregate price breakdown.
        breakdown: PriceBreakdown,
        /// The occurrences that were committed, in order.
        confirmed_occurrences: Vec<BookingOccurrence>,
        /// The store's commit receipt.
        receipt: CommitReceipt,
        /// The status the bookings were committed with.
        committed_status: BookingStatus,
        /// Whether the booking awaits manual approval.
        requires_approval: bool,
        /// Non-fatal expansion warnings.
        warnings: Vec<ExpansionWarning>,
    },
    /// Some, but not all, occurrences collided. Nothing was committed;
    /// the caller decides whether to book the clean subset.
    PartiallyConflicted {
        /// Occurrences that were free, in request order.
        clean: Vec<BookingOccurrence>,
        /// One entry per conflicted occurrence, in request order.
        conflicted: Vec<ConflictResult>,
        /// Alternative zones free for the full occurrence set.
        suggestions: Vec<ZoneSuggestion>,
        /// Non-fatal expansion warnings.
        warnings: Vec<ExpansionWarning>,
    },
    /// The request was structurally invalid or every occurrence collided.
    Rejected {
        /// Why the request was rejected.
        reason: RejectionReason,
    },
}

impl BookingOutcome {
    /// Returns whether the request was committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Returns whether the request was rejected.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
