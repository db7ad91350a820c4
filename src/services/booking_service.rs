//! Reservation manager - commits, cancels and reports bookings.
//!
//! `commit_reservation` re-validates a request in a fixed order and then
//! hands the collision check to the store's atomic conditional insert:
//!
//! 1. contact fields, then non-blank date and time (`Validation`, naming the field)
//! 2. service exists (`NotFound`)
//! 3. date parses and lies inside the booking window (`InvalidDate`)
//! 4. time parses and is a template slot (`InvalidSlot`)
//! 5. slot not held by a confirmed reservation (`SlotTaken`, atomic with the insert)
//!
//! The confirmation email is dispatched on a detached task after the insert
//! and can never fail the booking.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;
use uuid::Uuid;

use super::booking_policy::{parse_date, parse_time, BookingPolicy};
use crate::domain::{BookingStats, ContactDetails, Reservation, ReservationWithService};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::notifications::{BookingNotice, NotificationDispatcher};

/// A customer's booking submission, as entered.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub service_id: i32,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

#[async_trait]
pub trait BookingService: Send + Sync {
    /// Validate and atomically commit a reservation.
    async fn commit_reservation(&self, request: BookingRequest) -> AppResult<Reservation>;

    /// Cancel a reservation; cancelling twice returns it unchanged.
    async fn cancel_reservation(&self, id: Uuid) -> AppResult<Reservation>;

    /// Reservations starting at or after `from` (all when `None`), ascending.
    async fn list_reservations(
        &self,
        from: Option<NaiveDateTime>,
    ) -> AppResult<Vec<ReservationWithService>>;

    /// Revenue and count statistics over confirmed reservations.
    async fn stats(&self, from: Option<NaiveDateTime>) -> AppResult<BookingStats>;
}

pub struct ReservationManager<U: UnitOfWork> {
    uow: Arc<U>,
    policy: BookingPolicy,
    notifications: NotificationDispatcher,
}

impl<U: UnitOfWork> ReservationManager<U> {
    pub fn new(uow: Arc<U>, policy: BookingPolicy, notifications: NotificationDispatcher) -> Self {
        Self {
            uow,
            policy,
            notifications,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for ReservationManager<U> {
    async fn commit_reservation(&self, request: BookingRequest) -> AppResult<Reservation> {
        let contact =
            ContactDetails::parse(&request.name, &request.phone, request.email.as_deref())?;
        if request.date.trim().is_empty() {
            return Err(AppError::validation("date: is required"));
        }
        if request.time.trim().is_empty() {
            return Err(AppError::validation("time: is required"));
        }

        let service = self
            .uow
            .services()
            .find_by_id(request.service_id)
            .await?
            .ok_or_not_found()?;

        let date = parse_date(&request.date)?;
        self.policy.check_date(date)?;
        let time = parse_time(&request.time)?;
        self.policy.check_time(time)?;

        let candidate = Reservation::confirmed(
            service.id,
            date.and_time(time),
            contact,
            self.policy.utc_now(),
        );
        let reservation = self.uow.reservations().insert_confirmed(candidate).await?;

        tracing::info!(
            reservation_id = %reservation.id,
            service = %service.name,
            starts_at = %reservation.starts_at,
            "Reservation confirmed"
        );

        match reservation.customer_email.as_deref() {
            Some(email) => {
                let notice = BookingNotice::new(
                    reservation.customer_name.as_str(),
                    email,
                    service.name.as_str(),
                    reservation.starts_at,
                );
                self.notifications.dispatch(reservation.id, notice);
            }
            None => {
                tracing::debug!(reservation_id = %reservation.id, "No email given, skipping confirmation");
            }
        }

        Ok(reservation)
    }

    async fn cancel_reservation(&self, id: Uuid) -> AppResult<Reservation> {
        let reservation = self
            .uow
            .reservations()
            .cancel(id, self.policy.utc_now())
            .await?
            .ok_or_not_found()?;

        tracing::info!(
            reservation_id = %reservation.id,
            starts_at = %reservation.starts_at,
            "Reservation cancelled"
        );

        Ok(reservation)
    }

    async fn list_reservations(
        &self,
        from: Option<NaiveDateTime>,
    ) -> AppResult<Vec<ReservationWithService>> {
        self.uow.reservations().list_with_service(from).await
    }

    async fn stats(&self, from: Option<NaiveDateTime>) -> AppResult<BookingStats> {
        let entries = self.uow.reservations().list_with_service(from).await?;
        Ok(BookingStats::from_entries(&entries))
    }
}
