//! Service catalog entry.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// A bookable barbershop service (haircut, shave, ...).
///
/// Reference data: seeded by migration, never mutated by the booking flow.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Service {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Classic Cut")]
    pub name: String,
    #[schema(example = 30)]
    pub duration_minutes: i32,
    /// Price as a decimal string
    #[schema(value_type = String, example = "25.00")]
    pub price: Decimal,
}

impl Service {
    pub fn new(id: i32, name: impl Into<String>, duration_minutes: i32, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            duration_minutes,
            price,
        }
    }

    /// Stored integer cents for a price.
    pub fn price_to_cents(price: Decimal) -> i64 {
        let cents = (price * Decimal::ONE_HUNDRED).round();
        cents.to_i64().unwrap_or(i64::MAX)
    }

    /// Price for stored integer cents.
    pub fn price_from_cents(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_cents_conversion() {
        let price = Decimal::new(2550, 2);
        assert_eq!(Service::price_to_cents(price), 2550);
        assert_eq!(Service::price_from_cents(2550), price);
        assert_eq!(Service::price_from_cents(4000).to_string(), "40.00");
    }

    #[test]
    fn test_price_serializes_as_string() {
        let service = Service::new(1, "Fade", 45, Decimal::new(3000, 2));
        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["price"], "30.00");
        assert_eq!(json["duration_minutes"], 45);
    }
}
