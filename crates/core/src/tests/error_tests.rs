// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::StoreError;
use lokal_booking_domain::DomainError;

#[test]
fn test_store_error_display() {
    let err: StoreError = StoreError::ConcurrentConflict {
        conflicting_booking_id: 42,
    };
    assert_eq!(format!("{err}"), "Commit lost a race against booking 42");

    let err: StoreError = StoreError::FacilityNotFound(String::from("annet-bygg"));
    assert_eq!(format!("{err}"), "Facility 'annet-bygg' not found");

    let err: StoreError = StoreError::Unavailable(String::from("test"));
    assert_eq!(format!("{err}"), "Store unavailable: test");
}

#[test]
fn test_core_error_display_and_conversions() {
    let domain_err: DomainError = DomainError::UnknownZone {
        zone_id: String::from("bane-9"),
    };
    let err: CoreError = domain_err.clone().into();
    assert_eq!(err, CoreError::DomainViolation(domain_err));
    assert_eq!(
        format!("{err}"),
        "Domain violation: Zone 'bane-9' not found in facility zone set"
    );

    let store_err: StoreError = StoreError::Unavailable(String::from("test"));
    let err: CoreError = store_err.clone().into();
    assert_eq!(err, CoreError::Store(store_err));
    assert_eq!(format!("{err}"), "Store failure: Store unavailable: test");
}
