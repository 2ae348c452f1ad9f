//! Terminal rendering for the status table and the calendar month grid.

use std::fmt::{Display, Write};

use chrono::TimeZone;

use coursetrack_client::CourseFailure;
use coursetrack_core::{DayCell, EventKind, MonthGrid, ResolvedItem};

const MAX_TITLE: usize = 40;
const MAX_EVENTS_PER_DAY: usize = 3;
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ── Status table ──

/// Render resolved items as one row each, with due times shown in `tz`.
/// Items are expected to be sorted.
pub fn render_status<Tz>(items: &[ResolvedItem], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    if items.is_empty() {
        out.push_str("No assignments or quizzes.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<10}  {:<10}  {:<17}  {:<24}  {}",
        "KIND", "STATUS", "DUE", "COURSE", "TITLE"
    );
    for item in items {
        let due = item
            .due()
            .map(|d| d.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "{:<10}  {:<10}  {:<17}  {:<24}  {}",
            item.kind_label(),
            item.status_label(),
            due,
            truncate(item.course_title(), 24),
            truncate(item.title(), MAX_TITLE),
        );
        match item {
            ResolvedItem::Assignment(a) => {
                if let Some(r) = &a.result {
                    let _ = write!(out, "  [grade {}]", r.grade);
                }
                if a.status.has_submission()
                    && let Some(s) = &a.submission
                {
                    let _ = write!(out, "  \"{}\"", truncate(s.content.trim(), 30));
                }
                if let Some(n) = a.submission_count {
                    let _ = write!(out, "  ({n} submitted)");
                }
            }
            ResolvedItem::Quiz(q) => {
                if let Some(r) = &q.result {
                    let _ = write!(out, "  [score {}]", r.score);
                }
            }
        }
        out.push('\n');
    }
    out
}

/// One line per course that was skipped, or nothing when all loaded.
pub fn render_failures(failures: &[CourseFailure]) -> String {
    let mut out = String::new();
    if failures.is_empty() {
        return out;
    }
    let _ = writeln!(out, "\n{} course(s) failed to load:", failures.len());
    for f in failures {
        let _ = writeln!(out, "  {:<24} {}", truncate(&f.course_title, 24), f.error);
    }
    out
}

// ── Calendar ──

/// Render a month as a seven-column grid, followed by the events per day.
///
/// `tz` must be the zone the grid was built in, so event times agree with
/// the day they are listed under.
pub fn render_month<Tz>(grid: &MonthGrid, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let name = MONTHS
        .get(grid.month as usize - 1)
        .copied()
        .unwrap_or("?");
    let _ = writeln!(out, "{name} {}", grid.year);

    for day in WEEKDAYS {
        let _ = write!(out, "{day:>5}");
    }
    out.push('\n');

    for week in grid.weeks() {
        for cell in week {
            let _ = write!(out, "{:>5}", day_label(cell));
        }
        out.push('\n');
    }

    let busy: Vec<&DayCell> = grid.cells.iter().filter(|c| !c.events.is_empty()).collect();
    if busy.is_empty() {
        return out;
    }
    out.push('\n');
    for cell in busy {
        let Some(date) = cell.date else { continue };
        let _ = writeln!(out, "{}", date.format("%a %d %b"));
        for event in cell.events.iter().take(MAX_EVENTS_PER_DAY) {
            let kind = match event.kind {
                EventKind::Lesson => "lesson",
                EventKind::Quiz => "quiz",
            };
            let time = event
                .start_date
                .map(|s| s.with_timezone(tz).format("%H:%M").to_string())
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {time:<5}  {kind:<6}  {}  ({})",
                truncate(&event.title, MAX_TITLE),
                event.course_title
            );
        }
        if cell.events.len() > MAX_EVENTS_PER_DAY {
            let _ = writeln!(
                out,
                "  ... and {} more",
                cell.events.len() - MAX_EVENTS_PER_DAY
            );
        }
    }
    out
}

// Day number, with `*` for today and `+` for days with events.
fn day_label(cell: &DayCell) -> String {
    match cell.day() {
        None => String::new(),
        Some(d) => {
            let mut s = d.to_string();
            if cell.is_today {
                s.push('*');
            }
            if !cell.events.is_empty() {
                s.push('+');
            }
            s
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let short: String = s.chars().take(max - 3).collect();
        format!("{short}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};
    use coursetrack_client::{ApiError, CourseError};
    use coursetrack_core::{CalendarEvent, Quiz, QuizResult, QuizStatus, ResolvedQuiz};

    fn now() -> DateTime<Utc> {
        "2024-02-20T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn status_rows_include_score() {
        let items = vec![ResolvedItem::Quiz(ResolvedQuiz {
            quiz: Quiz {
                id: "q1".into(),
                course_id: "c1".into(),
                title: "Fractions".into(),
                start_date: None,
                end_date: Some("2024-02-01T10:00:00Z".parse().unwrap()),
            },
            course_title: "Maths".into(),
            status: QuizStatus::Returned,
            result: Some(QuizResult {
                score: 7.5,
                submitted_at: None,
            }),
        })];
        let out = render_status(&items, &Utc);
        let row = out.lines().nth(1).unwrap();
        assert!(row.starts_with("quiz"));
        assert!(row.contains("returned"));
        assert!(row.contains("2024-02-01 10:00"));
        assert!(row.ends_with("[score 7.5]"));
    }

    #[test]
    fn empty_status_message() {
        assert_eq!(render_status(&[], &Utc), "No assignments or quizzes.\n");
    }

    #[test]
    fn failures_listed_with_reason() {
        let failures = vec![CourseFailure {
            course_id: "c9".into(),
            course_title: "Geography".into(),
            error: CourseError::ItemFetchFailed(ApiError::Server {
                status: 502,
                body: "bad gateway".into(),
            }),
        }];
        let out = render_failures(&failures);
        assert!(out.contains("1 course(s) failed to load"));
        assert!(out.contains("Geography"));
        assert!(out.contains("502"));
        assert!(render_failures(&[]).is_empty());
    }

    #[test]
    fn month_grid_marks_today_and_events() {
        let event = CalendarEvent {
            id: "l1".into(),
            kind: EventKind::Lesson,
            title: "Volcanoes".into(),
            course_title: "Geography".into(),
            course_id: "c9".into(),
            start_date: Some("2024-02-14T09:30:00Z".parse().unwrap()),
            end_date: None,
        };
        let grid = MonthGrid::build(2024, 2, &[event], &now()).unwrap();
        let out = render_month(&grid, &Utc);

        assert!(out.starts_with("February 2024\n"));
        assert!(out.contains("20*"));
        assert!(out.contains("14+"));
        assert!(out.contains("09:30  lesson  Volcanoes  (Geography)"));
        // Title, header, five weeks, blank line, one day heading, one event.
        assert_eq!(out.lines().count(), 10);
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn event_time_matches_the_day_it_is_listed_under() {
        // 23:30 UTC on the 9th is 01:30 on the 10th at UTC+2.
        let event = CalendarEvent {
            id: "l2".into(),
            kind: EventKind::Lesson,
            title: "Late".into(),
            course_title: "Geo".into(),
            course_id: "c9".into(),
            start_date: Some("2024-02-09T23:30:00Z".parse().unwrap()),
            end_date: None,
        };
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let grid = MonthGrid::build(2024, 2, &[event], &now().with_timezone(&tz)).unwrap();
        let out = render_month(&grid, &tz);

        assert!(out.contains("Sat 10 Feb\n  01:30  lesson  Late  (Geo)"), "{out}");
        assert!(!out.contains("23:30"));
    }

    #[test]
    fn due_column_uses_viewer_zone() {
        let items = vec![ResolvedItem::Quiz(ResolvedQuiz {
            quiz: Quiz {
                id: "q2".into(),
                course_id: "c1".into(),
                title: "Midnight".into(),
                start_date: None,
                end_date: Some("2024-02-09T23:30:00Z".parse().unwrap()),
            },
            course_title: "Maths".into(),
            status: QuizStatus::Upcoming,
            result: None,
        })];
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let out = render_status(&items, &tz);
        assert!(out.contains("2024-02-10 01:30"), "{out}");
    }
}
