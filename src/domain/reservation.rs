//! Reservation entity and the customer contact details it carries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::config::{MAX_NAME_LENGTH, PHONE_PATTERN, STATUS_CANCELLED, STATUS_CONFIRMED};
use crate::errors::{AppError, AppResult};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => STATUS_CONFIRMED,
            ReservationStatus::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_CONFIRMED => Ok(ReservationStatus::Confirmed),
            STATUS_CANCELLED => Ok(ReservationStatus::Cancelled),
            other => Err(AppError::internal(format!("Unknown reservation status '{}'", other))),
        }
    }
}

/// Validated customer contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl ContactDetails {
    /// Trim and validate raw form input.
    ///
    /// Checks run name, phone, then email; the first failure names its field.
    /// A blank email counts as absent.
    pub fn parse(name: &str, phone: &str, email: Option<&str>) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name: is required"));
        }
        if name.chars().count() as u64 > MAX_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "name: must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }

        let phone = phone.trim();
        if phone.is_empty() {
            return Err(AppError::validation("phone: is required"));
        }
        if !PHONE_RE.is_match(phone) {
            return Err(AppError::validation("phone: is not a valid phone number"));
        }

        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) if !email.validate_email() => {
                return Err(AppError::validation("email: is not a valid email address"));
            }
            Some(email) => Some(email.to_string()),
            None => None,
        };

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email,
        })
    }
}

/// A booked (or formerly booked) slot.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub service_id: i32,
    /// Local start date-time in the shop's zone
    #[schema(value_type = String, example = "2025-06-10T09:30:00")]
    pub starts_at: NaiveDateTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// A fresh confirmed reservation, not yet persisted.
    pub fn confirmed(
        service_id: i32,
        starts_at: NaiveDateTime,
        contact: ContactDetails,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_id,
            starts_at,
            customer_name: contact.name,
            customer_phone: contact.phone,
            customer_email: contact.email,
            status: ReservationStatus::Confirmed,
            created_at,
            cancelled_at: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }
}

/// Reservation joined with the catalog data an operator listing shows.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReservationWithService {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub service_name: String,
    #[schema(value_type = String, example = "25.00")]
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_strings() {
        assert_eq!("confirmed".parse::<ReservationStatus>().unwrap(), ReservationStatus::Confirmed);
        assert_eq!(ReservationStatus::Cancelled.to_string(), "cancelled");
        assert!("pending".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_contact_trims_and_accepts_ghanaian_number() {
        let contact = ContactDetails::parse("  Ama ", "0551234567", None).unwrap();
        assert_eq!(contact.name, "Ama");
        assert_eq!(contact.phone, "0551234567");
        assert_eq!(contact.email, None);
    }

    #[test]
    fn test_contact_accepts_international_format() {
        assert!(ContactDetails::parse("Kofi", "+233 55 123 4567", None).is_ok());
        assert!(ContactDetails::parse("Kofi", "020 7946-0958", None).is_ok());
    }

    #[test]
    fn test_contact_checks_name_before_phone() {
        let err = ContactDetails::parse("", "", None).unwrap_err();
        assert!(err.to_string().starts_with("name"));
    }

    #[test]
    fn test_contact_rejects_bad_phone() {
        let err = ContactDetails::parse("Ama", "call me", None).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("phone")));
    }

    #[test]
    fn test_contact_email_rules() {
        let blank = ContactDetails::parse("Ama", "0551234567", Some("   ")).unwrap();
        assert_eq!(blank.email, None);

        let ok = ContactDetails::parse("Ama", "0551234567", Some("ama@example.com")).unwrap();
        assert_eq!(ok.email.as_deref(), Some("ama@example.com"));

        let err = ContactDetails::parse("Ama", "0551234567", Some("not-an-email")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("email")));
    }

    #[test]
    fn test_name_length_limit() {
        let long = "a".repeat(MAX_NAME_LENGTH as usize + 1);
        assert!(ContactDetails::parse(&long, "0551234567", None).is_err());
    }

    #[test]
    fn test_new_reservation_is_confirmed() {
        let contact = ContactDetails::parse("Ama", "0551234567", None).unwrap();
        let starts_at = chrono::NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let created_at = Utc::now();
        let reservation = Reservation::confirmed(1, starts_at, contact, created_at);
        assert!(reservation.is_confirmed());
        assert_eq!(reservation.created_at, created_at);
        assert!(reservation.cancelled_at.is_none());
    }
}
