//! Shared fixtures: the reference shop used across integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use fadeflow::domain::{parse_time_of_day, Service, SlotTemplate};
use fadeflow::infra::{FixedClock, MemoryStore, Persistence};
use fadeflow::notifications::{LogNotifier, NotificationDispatcher};
use fadeflow::services::{AvailabilityResolver, BookingPolicy, BookingRequest, ReservationManager};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

pub fn t(raw: &str) -> NaiveTime {
    parse_time_of_day(raw).unwrap()
}

/// One 30-minute service at 25.00, two slots a day.
pub fn classic_cut() -> Service {
    Service::new(1, "Classic Cut", 30, Decimal::new(2500, 2))
}

pub fn policy() -> BookingPolicy {
    BookingPolicy::new(
        SlotTemplate::parse_list("09:00,09:30").unwrap(),
        5,
        Arc::new(FixedClock::on(today())),
    )
}

pub fn persistence() -> Arc<Persistence> {
    Arc::new(Persistence::from_memory(Arc::new(MemoryStore::new(vec![classic_cut()]))))
}

pub fn resolver(uow: Arc<Persistence>) -> AvailabilityResolver<Persistence> {
    AvailabilityResolver::new(uow, policy())
}

pub fn manager(uow: Arc<Persistence>) -> ReservationManager<Persistence> {
    let (dispatcher, _failures) = NotificationDispatcher::new(Arc::new(LogNotifier));
    ReservationManager::new(uow, policy(), dispatcher)
}

pub fn request(time: &str) -> BookingRequest {
    BookingRequest {
        service_id: 1,
        date: today().format("%Y-%m-%d").to_string(),
        time: time.to_string(),
        name: "Ama".to_string(),
        phone: "0551234567".to_string(),
        email: None,
    }
}
