//! Records returned by the learning-management backend, and the calendar
//! projection built from them.
//!
//! The backend speaks camelCase JSON with RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course the current user is enrolled in or teaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// An assignment belonging to exactly one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    pub deadline: DateTime<Utc>,
}

/// A quiz belonging to exactly one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// A scheduled lesson. Only used as a calendar event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// A student's submission for an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub content: String,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Only populated on the teacher's per-assignment listing.
    #[serde(default)]
    pub student: Option<String>,
}

/// The grade issued for an assignment submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    pub grade: f64,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// A graded quiz attempt. Quiz submissions are atomic, so its presence also
/// proves the quiz was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: f64,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Lesson,
    Quiz,
}

/// A dated entry on the calendar, projected from a lesson or a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub kind: EventKind,
    pub title: String,
    pub course_title: String,
    pub course_id: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl CalendarEvent {
    pub fn from_lesson(lesson: &Lesson, course: &Course) -> Self {
        Self {
            id: lesson.id.clone(),
            kind: EventKind::Lesson,
            title: lesson.title.clone(),
            course_title: course.title.clone(),
            course_id: course.id.clone(),
            start_date: lesson.start_date,
            end_date: lesson.end_date,
        }
    }

    pub fn from_quiz(quiz: &Quiz, course: &Course) -> Self {
        Self {
            id: quiz.id.clone(),
            kind: EventKind::Quiz,
            title: quiz.title.clone(),
            course_title: course.title.clone(),
            course_id: course.id.clone(),
            start_date: quiz.start_date,
            end_date: quiz.end_date,
        }
    }
}
