//! Booking (reservation) entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Reservation, ReservationStatus};
use crate::errors::AppResult;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: i32,
    /// Local wall-clock start in the shop's zone
    pub starts_at: DateTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub cancelled_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity; fails only on an unknown stored status.
    pub fn into_domain(self) -> AppResult<Reservation> {
        Ok(Reservation {
            id: self.id,
            service_id: self.service_id,
            starts_at: self.starts_at,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            status: self.status.parse::<ReservationStatus>()?,
            created_at: self.created_at,
            cancelled_at: self.cancelled_at,
        })
    }
}

impl From<&Reservation> for ActiveModel {
    fn from(reservation: &Reservation) -> Self {
        use sea_orm::Set;

        ActiveModel {
            id: Set(reservation.id),
            service_id: Set(reservation.service_id),
            starts_at: Set(reservation.starts_at),
            customer_name: Set(reservation.customer_name.clone()),
            customer_phone: Set(reservation.customer_phone.clone()),
            customer_email: Set(reservation.customer_email.clone()),
            status: Set(reservation.status.as_str().to_string()),
            created_at: Set(reservation.created_at),
            cancelled_at: Set(reservation.cancelled_at),
        }
    }
}
