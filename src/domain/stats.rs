//! Operator dashboard statistics.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::reservation::ReservationWithService;

/// Revenue and booking count for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyRevenue {
    #[schema(value_type = String, example = "2025-06-10")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "75.00")]
    pub revenue: Decimal,
    pub bookings: u64,
}

/// Totals over confirmed reservations, with a per-day breakdown in date order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookingStats {
    #[schema(value_type = String, example = "250.00")]
    pub total_revenue: Decimal,
    pub total_bookings: u64,
    pub daily: Vec<DailyRevenue>,
}

impl BookingStats {
    /// Aggregate entries; cancelled reservations are skipped.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ReservationWithService>,
    {
        let mut by_day: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();

        for entry in entries
            .into_iter()
            .filter(|entry| entry.reservation.is_confirmed())
        {
            let day = by_day
                .entry(entry.reservation.starts_at.date())
                .or_insert((Decimal::ZERO, 0));
            day.0 += entry.price;
            day.1 += 1;
        }

        let daily: Vec<DailyRevenue> = by_day
            .into_iter()
            .map(|(date, (revenue, bookings))| DailyRevenue {
                date,
                revenue,
                bookings,
            })
            .collect();

        Self {
            total_revenue: daily.iter().map(|d| d.revenue).sum(),
            total_bookings: daily.iter().map(|d| d.bookings).sum(),
            daily,
        }
    }
}
