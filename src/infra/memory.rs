//! In-memory store for `serve --in-memory` and tests.
//!
//! Implements both repository traits over plain vectors. Every operation
//! takes the single mutex once, so the confirmed-slot check and the insert
//! in `insert_confirmed` cannot interleave with another commit.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::repositories::{ReservationRepository, ServiceRepository};
use crate::config::SEED_SERVICES;
use crate::domain::{Reservation, ReservationStatus, ReservationWithService, Service};
use crate::errors::{AppError, AppResult};

/// Services and reservations held in process memory.
pub struct MemoryStore {
    services: Vec<Service>,
    reservations: Mutex<Vec<Reservation>>,
}

impl MemoryStore {
    /// Store with the given catalog and no reservations.
    pub fn new(mut services: Vec<Service>) -> Self {
        services.sort_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)));
        Self {
            services,
            reservations: Mutex::new(Vec::new()),
        }
    }

    /// Store with the default seeded catalog.
    pub fn seeded() -> Self {
        let services = SEED_SERVICES
            .iter()
            .zip(1..)
            .map(|(&(name, duration, cents), id)| {
                Service::new(id, name, duration, Service::price_from_cents(cents))
            })
            .collect();
        Self::new(services)
    }

    fn reservations(&self) -> AppResult<MutexGuard<'_, Vec<Reservation>>> {
        self.reservations
            .lock()
            .map_err(|_| AppError::StoreUnavailable("in-memory store lock poisoned".into()))
    }

    fn service(&self, id: i32) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Service>> {
        Ok(self.services.clone())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        Ok(self.service(id).cloned())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn find_confirmed_between(
        &self,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> AppResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .reservations()?
            .iter()
            .filter(|r| r.is_confirmed() && r.starts_at >= from && r.starts_at < until)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.starts_at);
        Ok(found)
    }

    async fn insert_confirmed(&self, reservation: Reservation) -> AppResult<Reservation> {
        let mut reservations = self.reservations()?;

        if reservations
            .iter()
            .any(|r| r.is_confirmed() && r.starts_at == reservation.starts_at)
        {
            tracing::info!(starts_at = %reservation.starts_at, "Slot collision on insert");
            return Err(AppError::SlotTaken);
        }

        reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        Ok(self.reservations()?.iter().find(|r| r.id == id).cloned())
    }

    async fn cancel(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Reservation>> {
        let mut reservations = self.reservations()?;

        Ok(reservations.iter_mut().find(|r| r.id == id).map(|r| {
            if r.is_confirmed() {
                r.status = ReservationStatus::Cancelled;
                r.cancelled_at = Some(at);
            }
            r.clone()
        }))
    }

    async fn list_with_service(
        &self,
        from: Option<NaiveDateTime>,
    ) -> AppResult<Vec<ReservationWithService>> {
        let reservations = self.reservations()?;

        let mut entries = reservations
            .iter()
            .filter(|r| from.map_or(true, |from| r.starts_at >= from))
            .map(|r| {
                let service = self.service(r.service_id).ok_or_else(|| {
                    AppError::internal(format!("Booking {} references a missing service", r.id))
                })?;
                Ok(ReservationWithService {
                    reservation: r.clone(),
                    service_name: service.name.clone(),
                    price: service.price,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        entries.sort_by_key(|e| e.reservation.starts_at);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactDetails;
    use chrono::NaiveDate;
    use tokio_test::assert_ok;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn reservation(starts_at: NaiveDateTime) -> Reservation {
        let contact = ContactDetails::parse("Ama", "0551234567", None).unwrap();
        Reservation::confirmed(1, starts_at, contact, Utc::now())
    }

    #[tokio::test]
    async fn test_seeded_catalog_ordered_by_price() {
        let store = MemoryStore::seeded();
        let services = assert_ok!(ServiceRepository::list(&store).await);
        assert_eq!(services.len(), SEED_SERVICES.len());
        assert!(services.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[tokio::test]
    async fn test_insert_rejects_confirmed_collision() {
        let store = MemoryStore::seeded();
        assert_ok!(store.insert_confirmed(reservation(at(9, 0))).await);

        let second = store.insert_confirmed(reservation(at(9, 0))).await;
        assert!(matches!(second, Err(AppError::SlotTaken)));
    }

    #[tokio::test]
    async fn test_cancelled_row_frees_slot() {
        let store = MemoryStore::seeded();
        let first = assert_ok!(store.insert_confirmed(reservation(at(9, 0))).await);
        assert_ok!(store.cancel(first.id, Utc::now()).await);

        assert_ok!(store.insert_confirmed(reservation(at(9, 0))).await);
        let all = assert_ok!(store.list_with_service(None).await);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_twice_keeps_first_timestamp() {
        let store = MemoryStore::seeded();
        let r = assert_ok!(store.insert_confirmed(reservation(at(10, 0))).await);

        let first = assert_ok!(store.cancel(r.id, Utc::now()).await).unwrap();
        let second = assert_ok!(store.cancel(r.id, Utc::now()).await).unwrap();
        assert_eq!(first.cancelled_at, second.cancelled_at);
        assert!(assert_ok!(store.cancel(Uuid::new_v4(), Utc::now()).await).is_none());
    }

    #[tokio::test]
    async fn test_range_is_half_open() {
        let store = MemoryStore::seeded();
        assert_ok!(store.insert_confirmed(reservation(at(9, 0))).await);
        assert_ok!(store.insert_confirmed(reservation(at(9, 30))).await);

        let found = assert_ok!(store.find_confirmed_between(at(9, 0), at(9, 30)).await);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].starts_at, at(9, 0));
    }
}
