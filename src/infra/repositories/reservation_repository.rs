//! Reservation repository.
//!
//! The collision invariant (one confirmed booking per start time) is enforced
//! by the store itself: `insert_confirmed` is a single conditional insert and
//! reports a collision as [`AppError::SlotTaken`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use super::entities::booking::{self, ActiveModel, Entity as BookingEntity};
use super::entities::service::Entity as ServiceEntity;
use crate::config::{CONFIRMED_SLOT_INDEX, STATUS_CANCELLED, STATUS_CONFIRMED};
use crate::domain::{Reservation, ReservationWithService, Service};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reservation persistence.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Confirmed reservations starting in `[from, until)`, ordered by start
    async fn find_confirmed_between(
        &self,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> AppResult<Vec<Reservation>>;

    /// Persist a confirmed reservation unless its start time is already held
    /// by another confirmed reservation (`SlotTaken`). Check and write are
    /// one atomic operation.
    async fn insert_confirmed(&self, reservation: Reservation) -> AppResult<Reservation>;

    /// Find a reservation by ID, whatever its status
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>>;

    /// Mark a confirmed reservation cancelled. Already-cancelled rows are left
    /// untouched. Returns the current row, or `None` for an unknown ID.
    async fn cancel(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Reservation>>;

    /// Every reservation starting at or after `from` (all when `None`),
    /// ordered by start, joined with its service
    async fn list_with_service(
        &self,
        from: Option<NaiveDateTime>,
    ) -> AppResult<Vec<ReservationWithService>>;
}

/// SeaORM-backed reservation store
pub struct ReservationStore {
    db: DatabaseConnection,
}

impl ReservationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Whether a write failed on the confirmed-slot uniqueness constraint.
fn is_slot_collision(err: &DbErr) -> bool {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => true,
        _ => {
            let message = err.to_string();
            message.contains(CONFIRMED_SLOT_INDEX) || message.contains("UNIQUE constraint failed")
        }
    }
}

#[async_trait]
impl ReservationRepository for ReservationStore {
    async fn find_confirmed_between(
        &self,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> AppResult<Vec<Reservation>> {
        let models = BookingEntity::find()
            .filter(booking::Column::Status.eq(STATUS_CONFIRMED))
            .filter(booking::Column::StartsAt.gte(from))
            .filter(booking::Column::StartsAt.lt(until))
            .order_by_asc(booking::Column::StartsAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(booking::Model::into_domain).collect()
    }

    async fn insert_confirmed(&self, reservation: Reservation) -> AppResult<Reservation> {
        let active_model = ActiveModel::from(&reservation);

        match BookingEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
        {
            Ok(_) => Ok(reservation),
            Err(err) if is_slot_collision(&err) => {
                tracing::info!(starts_at = %reservation.starts_at, "Slot collision on insert");
                Err(AppError::SlotTaken)
            }
            Err(err) => Err(AppError::from(err)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        let result = BookingEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(booking::Model::into_domain).transpose()
    }

    async fn cancel(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Reservation>> {
        // Conditional update so a repeated cancel keeps the first timestamp
        BookingEntity::update_many()
            .col_expr(booking::Column::Status, Expr::value(STATUS_CANCELLED))
            .col_expr(booking::Column::CancelledAt, Expr::value(at))
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(STATUS_CONFIRMED))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        self.find_by_id(id).await
    }

    async fn list_with_service(
        &self,
        from: Option<NaiveDateTime>,
    ) -> AppResult<Vec<ReservationWithService>> {
        let mut query = BookingEntity::find().find_also_related(ServiceEntity);
        if let Some(from) = from {
            query = query.filter(booking::Column::StartsAt.gte(from));
        }

        let rows = query
            .order_by_asc(booking::Column::StartsAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter()
            .map(|(model, service)| {
                let service = service.map(Service::from).ok_or_else(|| {
                    AppError::internal(format!("Booking {} references a missing service", model.id))
                })?;
                Ok(ReservationWithService {
                    reservation: model.into_domain()?,
                    service_name: service.name,
                    price: service.price,
                })
            })
            .collect()
    }
}
