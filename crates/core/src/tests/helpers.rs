// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request::{BookingRequest, Timing};
use crate::store::MemoryBookingStore;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use lokal_booking_domain::{
    ActorType, BookingRules, FacilityCalendar, FacilityId, TimeSlot, Zone, ZoneId,
};
use rust_decimal::Decimal;

pub fn create_test_facility_id() -> FacilityId {
    FacilityId::new("idrettshall")
}

pub fn create_test_calendar() -> FacilityCalendar {
    FacilityCalendar::with_defaults("Europe/Oslo").unwrap()
}

/// The fixed "now" every orchestrator test evaluates against.
pub fn evaluation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap()
}

fn open_rules() -> BookingRules {
    BookingRules::new(1, 12, Vec::new(), 365, 24).unwrap()
}

fn make_zone(
    id: &str,
    capacity: u32,
    price: i64,
    parent: Option<&str>,
    is_main: bool,
    rules: BookingRules,
) -> Zone {
    Zone::new(
        ZoneId::new(id),
        create_test_facility_id(),
        id.to_string(),
        capacity,
        Decimal::new(price, 0),
        parent.map(ZoneId::new),
        is_main,
        false,
        rules,
    )
}

/// A main hall with two sub-zones, plus a standalone meeting room that
/// only offers two fixed slots.
pub fn create_test_zones() -> Vec<Zone> {
    let restricted = BookingRules::new(
        1,
        12,
        vec![
            TimeSlot::parse("10:00-12:00").unwrap(),
            TimeSlot::parse("18:00-20:00").unwrap(),
        ],
        365,
        24,
    )
    .unwrap();

    vec![
        make_zone("hele-hallen", 300, 1200, None, true, open_rules()),
        make_zone("bane-1", 80, 450, Some("hele-hallen"), false, open_rules()),
        make_zone("bane-2", 80, 400, Some("hele-hallen"), false, open_rules()),
        make_zone("moterom", 20, 150, None, false, restricted),
    ]
}

pub fn create_test_store() -> MemoryBookingStore {
    MemoryBookingStore::new(create_test_facility_id(), create_test_zones()).unwrap()
}

pub fn one_time_request(
    zone: &str,
    on: NaiveDate,
    slot_label: &str,
    actor_type: ActorType,
    attendee_count: u32,
) -> BookingRequest {
    BookingRequest::new(
        create_test_facility_id(),
        ZoneId::new(zone),
        actor_type,
        String::from("Trening"),
        attendee_count,
        Timing::OneTime {
            date: on,
            slot: TimeSlot::parse(slot_label).unwrap(),
        },
    )
}
