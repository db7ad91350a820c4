//! Booking window and slot grid rules shared by availability and commits.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::sync::Arc;

use crate::config::{Config, DATE_FORMAT};
use crate::domain::{format_time_of_day, parse_time_of_day, SlotTemplate};
use crate::errors::{AppError, AppResult};
use crate::infra::Clock;

/// `YYYY-MM-DD`, or `InvalidDate`.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::invalid_date(format!("'{}' is not a YYYY-MM-DD date", raw)))
}

/// `HH:MM`, or `InvalidSlot`.
pub fn parse_time(raw: &str) -> AppResult<NaiveTime> {
    parse_time_of_day(raw)
        .ok_or_else(|| AppError::invalid_slot(format!("'{}' is not a HH:MM time", raw)))
}

/// Which dates and times may be booked.
#[derive(Clone)]
pub struct BookingPolicy {
    template: SlotTemplate,
    window_days: u32,
    clock: Arc<dyn Clock>,
}

impl BookingPolicy {
    pub fn new(template: SlotTemplate, window_days: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            template,
            window_days: window_days.max(1),
            clock,
        }
    }

    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self::new(config.slot_template.clone(), config.booking_window_days, clock)
    }

    pub fn template(&self) -> &SlotTemplate {
        &self.template
    }

    /// Current local date-time.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Current instant, for audit timestamps.
    pub fn utc_now(&self) -> DateTime<Utc> {
        self.clock.utc_now()
    }

    /// Today and the following days of the window, in order.
    pub fn booking_dates(&self) -> Vec<NaiveDate> {
        let today = self.clock.today();
        (0..self.window_days)
            .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
            .collect()
    }

    /// `InvalidDate` unless `date` lies inside the window.
    pub fn check_date(&self, date: NaiveDate) -> AppResult<()> {
        let first = self.clock.today();
        let last = first.checked_add_days(Days::new(u64::from(self.window_days - 1)));
        match last {
            Some(last) if first <= date && date <= last => Ok(()),
            // Window runs past the calendar's end
            None if first <= date => Ok(()),
            Some(last) => Err(AppError::invalid_date(format!(
                "{} is outside the booking window ({} to {})",
                date.format(DATE_FORMAT),
                first.format(DATE_FORMAT),
                last.format(DATE_FORMAT)
            ))),
            None => Err(AppError::invalid_date(format!(
                "{} is before the booking window opens ({})",
                date.format(DATE_FORMAT),
                first.format(DATE_FORMAT)
            ))),
        }
    }

    /// `InvalidSlot` unless `time` is a template member.
    pub fn check_time(&self, time: NaiveTime) -> AppResult<()> {
        if self.template.contains(time) {
            Ok(())
        } else {
            Err(AppError::invalid_slot(format!(
                "{} is not a bookable time",
                format_time_of_day(time)
            )))
        }
    }

    /// Half-open local range `[date 00:00, next day 00:00)`.
    pub fn day_range(date: NaiveDate) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
        let start = date.and_time(NaiveTime::MIN);
        let end = date
            .checked_add_days(Days::new(1))
            .map(|next| next.and_time(NaiveTime::MIN))
            .ok_or_else(|| AppError::invalid_date("Date is out of range"))?;
        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::FixedClock;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn policy() -> BookingPolicy {
        BookingPolicy::new(SlotTemplate::default(), 5, Arc::new(FixedClock::on(day(10))))
    }

    #[test]
    fn test_window_is_today_plus_four() {
        let dates = policy().booking_dates();
        assert_eq!(dates, vec![day(10), day(11), day(12), day(13), day(14)]);
    }

    #[test]
    fn test_check_date_bounds() {
        let policy = policy();
        assert!(policy.check_date(day(10)).is_ok());
        assert!(policy.check_date(day(14)).is_ok());
        assert!(matches!(policy.check_date(day(9)), Err(AppError::InvalidDate(_))));
        assert!(matches!(policy.check_date(day(15)), Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn test_check_date_over_wide_window() {
        let policy = BookingPolicy::new(SlotTemplate::default(), u32::MAX, Arc::new(FixedClock::on(day(10))));
        let far = NaiveDate::from_ymd_opt(9000, 1, 1).unwrap();
        assert!(policy.check_date(far).is_ok());
        assert!(matches!(policy.check_date(day(9)), Err(AppError::InvalidDate(_))));

        let err = policy.check_date(day(9)).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(msg) if msg.contains("2025-06-10")));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2025-06-10 ").unwrap(), day(10));
        assert!(matches!(parse_date("10/06/2025"), Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(matches!(parse_time("half nine"), Err(AppError::InvalidSlot(_))));
    }

    #[test]
    fn test_check_time_requires_template_member() {
        let policy = policy();
        assert!(policy.check_time(parse_time_of_day("09:30").unwrap()).is_ok());
        let err = policy.check_time(parse_time_of_day("09:15").unwrap()).unwrap_err();
        assert!(matches!(err, AppError::InvalidSlot(msg) if msg.contains("09:15")));
    }

    #[test]
    fn test_day_range() {
        let (start, end) = BookingPolicy::day_range(day(30)).unwrap();
        assert_eq!(start, day(30).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_window_crosses_month() {
        let policy = BookingPolicy::new(SlotTemplate::default(), 3, Arc::new(FixedClock::on(day(30))));
        let dates = policy.booking_dates();
        assert_eq!(dates.last().copied(), NaiveDate::from_ymd_opt(2025, 7, 2));
    }
}
