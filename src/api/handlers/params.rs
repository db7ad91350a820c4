//! Wire-format parsing shared by handlers.
//!
//! Booking submissions carry their date and time through as raw strings so
//! the manager can keep its validation order; query parameters are parsed here.

use chrono::{NaiveDateTime, NaiveTime};

use crate::errors::AppResult;
pub use crate::services::parse_date;

/// Lower bound for listings: a date (start of day) or a full local date-time.
pub fn parse_from(raw: &str) -> AppResult<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(at);
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(at);
    }
    parse_date(raw).map(|date| date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_from_accepts_date_or_datetime() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(parse_from("2025-06-10").unwrap(), date.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            parse_from("2025-06-10T13:30").unwrap(),
            date.and_hms_opt(13, 30, 0).unwrap()
        );
        assert!(matches!(parse_from("tomorrow"), Err(AppError::InvalidDate(_))));
    }
}
