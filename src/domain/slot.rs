//! Slot template - the fixed daily grid of bookable start times.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::{DEFAULT_SLOT_TEMPLATE, TIME_OF_DAY_FORMAT};

/// Reasons a slot template definition is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotTemplateError {
    #[error("slot template must contain at least one time")]
    Empty,

    #[error("'{0}' is not a HH:MM time of day")]
    Malformed(String),

    #[error("slot times must be strictly ascending ('{0}' is out of order)")]
    NotAscending(String),
}

/// Parse a wire-format time of day (`HH:MM`).
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_OF_DAY_FORMAT).ok()
}

/// Render a time of day in wire format (`HH:MM`).
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_OF_DAY_FORMAT).to_string()
}

/// Ordered, duplicate-free sequence of bookable start times.
///
/// The same template applies to every operating day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTemplate {
    times: Vec<NaiveTime>,
}

impl SlotTemplate {
    /// Build a template, rejecting empty or unordered input.
    pub fn new(times: Vec<NaiveTime>) -> Result<Self, SlotTemplateError> {
        if times.is_empty() {
            return Err(SlotTemplateError::Empty);
        }
        if let Some(pair) = times.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(SlotTemplateError::NotAscending(format_time_of_day(pair[1])));
        }
        Ok(Self { times })
    }

    /// Parse a comma-separated list such as `"09:00,09:30,10:00"`.
    pub fn parse_list(raw: &str) -> Result<Self, SlotTemplateError> {
        let times = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                parse_time_of_day(part).ok_or_else(|| SlotTemplateError::Malformed(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(times)
    }

    pub fn times(&self) -> &[NaiveTime] {
        &self.times
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.times.binary_search(&time).is_ok()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Template times that do not coincide with any taken start time on `date`.
    ///
    /// Only exact time-of-day matches remove a slot; taken times on other
    /// dates are ignored.
    pub fn open_on(&self, date: NaiveDate, taken: &[NaiveDateTime]) -> Vec<NaiveTime> {
        self.grid_on(date, taken)
            .into_iter()
            .filter(|slot| slot.available)
            .map(|slot| slot.time)
            .collect()
    }

    /// Every template time on `date` with its availability.
    pub fn grid_on(&self, date: NaiveDate, taken: &[NaiveDateTime]) -> Vec<SlotStatus> {
        self.times
            .iter()
            .map(|&time| SlotStatus {
                time,
                available: !taken
                    .iter()
                    .any(|start| start.date() == date && start.time() == time),
            })
            .collect()
    }
}

impl Default for SlotTemplate {
    fn default() -> Self {
        Self {
            times: DEFAULT_SLOT_TEMPLATE
                .iter()
                .filter_map(|raw| parse_time_of_day(raw))
                .collect(),
        }
    }
}

/// One cell of the slot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct SlotStatus {
    #[serde(serialize_with = "serialize_time_of_day")]
    #[schema(value_type = String, example = "09:30")]
    pub time: NaiveTime,
    pub available: bool,
}

pub(crate) fn serialize_time_of_day<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_time_of_day(*time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: &str) -> NaiveTime {
        parse_time_of_day(raw).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn test_default_template() {
        let template = SlotTemplate::default();
        assert_eq!(template.len(), 10);
        assert_eq!(template.times()[0], t("09:00"));
        assert_eq!(template.times()[9], t("15:00"));
        assert!(!template.contains(t("12:00")));
    }

    #[test]
    fn test_rejects_unordered_and_duplicates() {
        assert_eq!(
            SlotTemplate::parse_list("09:30,09:00"),
            Err(SlotTemplateError::NotAscending("09:00".into()))
        );
        assert!(SlotTemplate::parse_list("09:00,09:00").is_err());
        assert_eq!(SlotTemplate::parse_list(" , "), Err(SlotTemplateError::Empty));
        assert_eq!(
            SlotTemplate::parse_list("09:00,nine"),
            Err(SlotTemplateError::Malformed("nine".into()))
        );
    }

    #[test]
    fn test_open_on_removes_exact_matches_only() {
        let template = SlotTemplate::parse_list("09:00,09:30,10:00").unwrap();
        let taken = vec![
            date().and_time(t("09:30")),
            // same time on another day does not block
            date().succ_opt().unwrap().and_time(t("09:00")),
            // off-grid start does not block a neighbour
            date().and_hms_opt(9, 45, 0).unwrap(),
        ];

        assert_eq!(template.open_on(date(), &taken), vec![t("09:00"), t("10:00")]);
    }

    #[test]
    fn test_grid_marks_taken() {
        let template = SlotTemplate::parse_list("09:00,09:30").unwrap();
        let grid = template.grid_on(date(), &[date().and_time(t("09:00"))]);
        assert!(!grid[0].available);
        assert!(grid[1].available);
    }

    #[test]
    fn test_slot_status_wire_format() {
        let status = SlotStatus {
            time: t("13:30"),
            available: true,
        };
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json["time"], "13:30");
    }
}
