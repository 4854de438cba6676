// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use lokal_booking_domain::DomainError;

/// Errors that can occur while orchestrating a booking request.
///
/// Caller-input problems never surface here; they become a rejected
/// outcome instead. `CoreError` is reserved for collaborator failures and
/// inconsistent collaborator data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Collaborator-supplied data violated a domain rule.
    DomainViolation(DomainError),
    /// The booking store or zone directory failed.
    Store(StoreError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Store(err) => write!(f, "Store failure: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
