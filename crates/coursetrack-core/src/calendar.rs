//! Month grid for the calendar view.
//!
//! A grid is a flat run of day cells, Monday first, always a whole number of
//! weeks long. Slots before the 1st and after the last day of the month are
//! empty. Each day carries the events that *start* on it; multi-day events
//! appear only under their start day.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::model::CalendarEvent;

const DAYS_PER_WEEK: usize = 7;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CalendarError {
    #[error("month must be in 1..=12, got {0}")]
    InvalidMonth(u32),
    #[error("year {0} is out of range")]
    InvalidYear(i32),
}

/// One slot of the grid. `date` is `None` for padding slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

impl DayCell {
    fn empty() -> Self {
        Self {
            date: None,
            is_today: false,
            events: Vec::new(),
        }
    }

    /// Day of month, or `None` for padding.
    pub fn day(&self) -> Option<u32> {
        self.date.map(|d| d.day())
    }
}

/// Build the day cells for `month` (1 = January) of `year`.
///
/// Event start dates and "today" are both read in `now`'s time zone, and an
/// event lands on a day when year, month and day-of-month all match. Events
/// with no start date are never placed. Within a day, events keep the order
/// they were given in.
pub fn build_month<Tz: TimeZone>(
    year: i32,
    month: u32,
    events: &[CalendarEvent],
    now: &DateTime<Tz>,
) -> Result<Vec<DayCell>, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidYear(year))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(CalendarError::InvalidYear(year))?;

    let days_in_month = (next_first - first).num_days() as usize;
    let leading = first.weekday().num_days_from_monday() as usize;
    let today = now.date_naive();
    let tz = now.timezone();

    let mut cells = Vec::with_capacity((leading + days_in_month).div_ceil(DAYS_PER_WEEK) * 7);
    cells.extend((0..leading).map(|_| DayCell::empty()));
    cells.extend(first.iter_days().take(days_in_month).map(|date| DayCell {
        date: Some(date),
        is_today: date == today,
        events: Vec::new(),
    }));

    let mut placed = 0usize;
    for event in events {
        let Some(start) = event.start_date else {
            continue;
        };
        let local = start.with_timezone(&tz).date_naive();
        if local.year() == year && local.month() == month {
            cells[leading + local.day0() as usize].events.push(event.clone());
            placed += 1;
        }
    }

    while cells.len() % DAYS_PER_WEEK != 0 {
        cells.push(DayCell::empty());
    }

    debug!(
        year,
        month,
        cells = cells.len(),
        events = events.len(),
        placed,
        "built month grid"
    );
    Ok(cells)
}

/// A built month, with helpers for rendering it week by week.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build<Tz: TimeZone>(
        year: i32,
        month: u32,
        events: &[CalendarEvent],
        now: &DateTime<Tz>,
    ) -> Result<Self, CalendarError> {
        let cells = build_month(year, month, events, now)?;
        Ok(Self { year, month, cells })
    }

    /// Rows of exactly seven cells, Monday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn event_count(&self) -> usize {
        self.cells.iter().map(|c| c.events.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventKind;
    use chrono::{FixedOffset, Utc};

    fn now(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    fn event(id: &str, start: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            id: id.into(),
            kind: EventKind::Lesson,
            title: format!("event {id}"),
            course_title: "History".into(),
            course_id: "c1".into(),
            start_date: start.map(|s| s.parse().unwrap()),
            end_date: None,
        }
    }

    fn first_day_index(cells: &[DayCell]) -> usize {
        cells.iter().position(|c| c.date.is_some()).unwrap()
    }

    #[test]
    fn february_2024_starts_on_thursday() {
        let cells = build_month(2024, 2, &[], &now("2024-06-01T00:00:00Z")).unwrap();
        assert!(cells[..3].iter().all(|c| c.date.is_none()));
        assert_eq!(cells[3].day(), Some(1));
        // 3 leading + 29 days = 32, padded to 35.
        assert_eq!(cells.len(), 35);
        assert_eq!(cells[31].day(), Some(29));
        assert!(cells[32..].iter().all(|c| c.date.is_none()));
    }

    #[test]
    fn every_month_is_whole_weeks_and_aligned() {
        let at = now("2030-01-01T00:00:00Z");
        for year in [1999, 2023, 2024, 2100] {
            for month in 1..=12 {
                let cells = build_month(year, month, &[], &at).unwrap();
                assert_eq!(cells.len() % 7, 0, "{year}-{month}");
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                assert_eq!(
                    first_day_index(&cells),
                    first.weekday().num_days_from_monday() as usize,
                    "{year}-{month}"
                );
            }
        }
    }

    #[test]
    fn month_starting_monday_has_no_leading_padding() {
        // 1 January 2024 is a Monday.
        let cells = build_month(2024, 1, &[], &now("2024-01-15T00:00:00Z")).unwrap();
        assert_eq!(cells[0].day(), Some(1));
        assert_eq!(cells.len(), 35);
    }

    #[test]
    fn events_bucketed_by_start_day_in_order() {
        let events = vec![
            event("e1", Some("2024-02-14T09:00:00Z")),
            event("e2", Some("2024-02-01T23:59:59Z")),
            event("e3", Some("2024-02-14T08:00:00Z")),
            event("other-month", Some("2024-03-14T08:00:00Z")),
            event("undated", None),
        ];
        let cells = build_month(2024, 2, &events, &now("2024-06-01T00:00:00Z")).unwrap();

        let feb14 = cells.iter().find(|c| c.day() == Some(14)).unwrap();
        let ids: Vec<&str> = feb14.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e3"]);

        let total: usize = cells.iter().map(|c| c.events.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn multi_day_event_only_on_start_day() {
        let mut e = event("trip", Some("2024-02-10T10:00:00Z"));
        e.end_date = Some("2024-02-12T10:00:00Z".parse().unwrap());
        let cells = build_month(2024, 2, &[e], &now("2024-06-01T00:00:00Z")).unwrap();
        let with_events: Vec<u32> = cells
            .iter()
            .filter(|c| !c.events.is_empty())
            .filter_map(|c| c.day())
            .collect();
        assert_eq!(with_events, [10]);
    }

    #[test]
    fn start_day_read_in_viewer_time_zone() {
        // 23:30 UTC on the 9th is already the 10th at UTC+2.
        let e = event("late", Some("2024-02-09T23:30:00Z"));
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = now("2024-02-01T00:00:00Z").with_timezone(&cest);
        let cells = build_month(2024, 2, &[e], &at).unwrap();
        let day = cells.iter().find(|c| !c.events.is_empty()).unwrap();
        assert_eq!(day.day(), Some(10));
    }

    #[test]
    fn today_flag_follows_now() {
        let cells = build_month(2024, 2, &[], &now("2024-02-20T15:00:00Z")).unwrap();
        let flagged: Vec<u32> = cells
            .iter()
            .filter(|c| c.is_today)
            .filter_map(|c| c.day())
            .collect();
        assert_eq!(flagged, [20]);

        let other = build_month(2024, 3, &[], &now("2024-02-20T15:00:00Z")).unwrap();
        assert!(other.iter().all(|c| !c.is_today));
    }

    #[test]
    fn invalid_month_rejected() {
        let at = now("2024-01-01T00:00:00Z");
        assert_eq!(
            build_month(2024, 0, &[], &at),
            Err(CalendarError::InvalidMonth(0))
        );
        assert_eq!(
            build_month(2024, 13, &[], &at),
            Err(CalendarError::InvalidMonth(13))
        );
    }

    #[test]
    fn grid_weeks_are_rows_of_seven() {
        let grid = MonthGrid::build(2024, 2, &[], &now("2024-02-01T00:00:00Z")).unwrap();
        let weeks: Vec<&[DayCell]> = grid.weeks().collect();
        assert_eq!(weeks.len(), 5);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert_eq!(grid.event_count(), 0);
    }
}
