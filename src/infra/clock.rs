//! Local wall clock of the shop's single fixed zone.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Source of "now" for booking-window checks.
pub trait Clock: Send + Sync {
    /// Current local date-time in the shop's zone
    fn now(&self) -> NaiveDateTime;

    /// Current instant, used for `created_at` and `cancelled_at`
    fn utc_now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// System time shifted to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Stopped at midday on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN) + chrono::Duration::hours(12),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// The stopped local time read as UTC.
    fn utc_now(&self) -> DateTime<Utc> {
        self.now.and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.utc_now(), clock.utc_now());
        assert_eq!(clock.utc_now().naive_utc(), date.and_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_system_clock_applies_offset() {
        let east = SystemClock::new(FixedOffset::east_opt(14 * 3600).unwrap());
        let west = SystemClock::new(FixedOffset::west_opt(12 * 3600).unwrap());
        let diff = east.now() - west.now();
        assert!((diff.num_hours() - 26).abs() <= 1);
    }
}
