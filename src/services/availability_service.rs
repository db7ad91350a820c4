//! Availability resolver - which slots of a day are still bookable.
//!
//! Reads are not linearizable with commits: a slot reported open may be
//! taken by the time it is submitted, which the commit path reports as
//! `SlotTaken`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::Arc;

use super::booking_policy::BookingPolicy;
use crate::domain::{Service, SlotStatus};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Open start times for `service_id` on `date`, in template order.
    ///
    /// `InvalidDate` outside the booking window, `NotFound` for an unknown
    /// service. An empty list is a valid answer.
    async fn open_slots(&self, service_id: i32, date: NaiveDate) -> AppResult<Vec<NaiveTime>>;

    /// Every template slot on `date` with its availability; same checks.
    async fn slot_grid(&self, service_id: i32, date: NaiveDate) -> AppResult<Vec<SlotStatus>>;

    /// Dates currently open for booking
    fn booking_dates(&self) -> Vec<NaiveDate>;
}

pub struct AvailabilityResolver<U: UnitOfWork> {
    uow: Arc<U>,
    policy: BookingPolicy,
}

impl<U: UnitOfWork> AvailabilityResolver<U> {
    pub fn new(uow: Arc<U>, policy: BookingPolicy) -> Self {
        Self { uow, policy }
    }

    /// Validate the request and collect the confirmed start times of the day.
    async fn taken_on(
        &self,
        service_id: i32,
        date: NaiveDate,
    ) -> AppResult<(Service, Vec<NaiveDateTime>)> {
        self.policy.check_date(date)?;
        let service = self.uow.services().find_by_id(service_id).await?.ok_or_not_found()?;

        let (from, until) = BookingPolicy::day_range(date)?;
        let taken = self
            .uow
            .reservations()
            .find_confirmed_between(from, until)
            .await?
            .into_iter()
            .map(|r| r.starts_at)
            .collect();

        Ok((service, taken))
    }
}

#[async_trait]
impl<U: UnitOfWork> AvailabilityService for AvailabilityResolver<U> {
    async fn open_slots(&self, service_id: i32, date: NaiveDate) -> AppResult<Vec<NaiveTime>> {
        let (service, taken) = self.taken_on(service_id, date).await?;
        let open = self.policy.template().open_on(date, &taken);

        tracing::debug!(
            service = %service.name,
            date = %date,
            open = open.len(),
            "Resolved open slots"
        );

        Ok(open)
    }

    async fn slot_grid(&self, service_id: i32, date: NaiveDate) -> AppResult<Vec<SlotStatus>> {
        let (_, taken) = self.taken_on(service_id, date).await?;
        Ok(self.policy.template().grid_on(date, &taken))
    }

    fn booking_dates(&self) -> Vec<NaiveDate> {
        self.policy.booking_dates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_time_of_day, ContactDetails, Reservation, SlotTemplate};
    use crate::errors::AppError;
    use crate::infra::{FixedClock, MockReservationRepository, MockServiceRepository, Persistence};
    use rust_decimal::Decimal;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn resolver(services: MockServiceRepository, reservations: MockReservationRepository) -> AvailabilityResolver<Persistence> {
        let uow = Arc::new(Persistence::new(Arc::new(services), Arc::new(reservations)));
        let policy = BookingPolicy::new(
            SlotTemplate::parse_list("09:00,09:30").unwrap(),
            5,
            Arc::new(FixedClock::on(date())),
        );
        AvailabilityResolver::new(uow, policy)
    }

    #[tokio::test]
    async fn test_open_slots_excludes_confirmed() {
        let mut services = MockServiceRepository::new();
        services
            .expect_find_by_id()
            .returning(|id| Ok(Some(Service::new(id, "Classic Cut", 30, Decimal::new(2500, 2)))));

        let mut reservations = MockReservationRepository::new();
        reservations.expect_find_confirmed_between().returning(|from, _| {
            let contact = ContactDetails::parse("Ama", "0551234567", None).unwrap();
            let starts_at = from.date().and_time(parse_time_of_day("09:00").unwrap());
            Ok(vec![Reservation::confirmed(1, starts_at, contact, chrono::Utc::now())])
        });

        let open = resolver(services, reservations).open_slots(1, date()).await.unwrap();
        assert_eq!(open, vec![parse_time_of_day("09:30").unwrap()]);
    }

    #[tokio::test]
    async fn test_date_checked_before_store_access() {
        // No expectations: any repository call would panic
        let services = MockServiceRepository::new();
        let reservations = MockReservationRepository::new();

        let past = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        let result = resolver(services, reservations).open_slots(1, past).await;
        assert!(matches!(result, Err(AppError::InvalidDate(_))));
    }

    #[tokio::test]
    async fn test_unknown_service_is_not_found() {
        let mut services = MockServiceRepository::new();
        services.expect_find_by_id().returning(|_| Ok(None));
        let reservations = MockReservationRepository::new();

        let result = resolver(services, reservations).slot_grid(99, date()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut services = MockServiceRepository::new();
        services
            .expect_find_by_id()
            .returning(|id| Ok(Some(Service::new(id, "Classic Cut", 30, Decimal::new(2500, 2)))));
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_confirmed_between()
            .returning(|_, _| Err(AppError::StoreUnavailable("connection reset".into())));

        let result = resolver(services, reservations).open_slots(1, date()).await;
        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }
}
