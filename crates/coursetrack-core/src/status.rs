//! Derived lifecycle status for assignments and quizzes.
//!
//! The backend never stores a status; it is reconstructed on every load from
//! the item itself, the presence of its submission/result records, and the
//! current time. Every resolver here is a pure function of those inputs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Assignment, AssignmentResult, Quiz, QuizResult, Submission};

/// Who is looking at the items. Decides which records are probed and which
/// status rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewer {
    #[default]
    Student,
    Teacher,
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Viewer::Student => f.write_str("student"),
            Viewer::Teacher => f.write_str("teacher"),
        }
    }
}

impl FromStr for Viewer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Viewer::Student),
            "teacher" | "owner" => Ok(Viewer::Teacher),
            other => Err(format!("unknown viewer role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Upcoming,
    Submitted,
    Returned,
    PastDue,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Upcoming => "upcoming",
            AssignmentStatus::Submitted => "submitted",
            AssignmentStatus::Returned => "returned",
            AssignmentStatus::PastDue => "past_due",
        }
    }

    /// Whether a submission exists for this status, i.e. its content is worth showing.
    pub fn has_submission(self) -> bool {
        matches!(self, AssignmentStatus::Submitted | AssignmentStatus::Returned)
    }
}

/// Quizzes have no `past_due` state: an unsubmitted quiz stays `Upcoming`
/// for students even after it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    Upcoming,
    Returned,
}

impl QuizStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuizStatus::Upcoming => "upcoming",
            QuizStatus::Returned => "returned",
        }
    }
}

/// Resolve an assignment's status for the student who owns the probes.
///
/// Rules are applied in priority order:
/// 1. a result exists → `Returned` (grading freezes the state, even over a resubmission)
/// 2. a submission exists → `Submitted` (late submissions included)
/// 3. `now` is past the deadline → `PastDue`
/// 4. otherwise → `Upcoming`
pub fn resolve_assignment(
    assignment: &Assignment,
    submission: Option<&Submission>,
    result: Option<&AssignmentResult>,
    now: DateTime<Utc>,
) -> AssignmentStatus {
    if result.is_some() {
        AssignmentStatus::Returned
    } else if submission.is_some() {
        AssignmentStatus::Submitted
    } else if now > assignment.deadline {
        AssignmentStatus::PastDue
    } else {
        AssignmentStatus::Upcoming
    }
}

/// Resolve an assignment's status for its teacher. There is no single
/// submission to probe, so only the deadline matters.
pub fn resolve_assignment_for_teacher(
    assignment: &Assignment,
    now: DateTime<Utc>,
) -> AssignmentStatus {
    if now > assignment.deadline {
        AssignmentStatus::PastDue
    } else {
        AssignmentStatus::Upcoming
    }
}

/// Resolve a quiz's status for a student: graded attempt or nothing.
pub fn resolve_quiz(result: Option<&QuizResult>) -> QuizStatus {
    match result {
        Some(_) => QuizStatus::Returned,
        None => QuizStatus::Upcoming,
    }
}

/// Resolve a quiz's status for its teacher. `Returned` here means "closed,
/// ready for review". A quiz with no end date never closes.
pub fn resolve_quiz_for_teacher(quiz: &Quiz, now: DateTime<Utc>) -> QuizStatus {
    match quiz.end_date {
        Some(end) if now > end => QuizStatus::Returned,
        _ => QuizStatus::Upcoming,
    }
}
