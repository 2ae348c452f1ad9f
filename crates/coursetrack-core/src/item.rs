//! Items with their derived status attached, as handed to the UI layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Assignment, AssignmentResult, Quiz, QuizResult, Submission};
use crate::status::{AssignmentStatus, QuizStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAssignment {
    pub assignment: Assignment,
    pub course_title: String,
    pub status: AssignmentStatus,
    /// The student's own submission, shown once the item is submitted or returned.
    pub submission: Option<Submission>,
    pub result: Option<AssignmentResult>,
    /// Teacher view only: how many students have handed in.
    pub submission_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedQuiz {
    pub quiz: Quiz,
    pub course_title: String,
    pub status: QuizStatus,
    pub result: Option<QuizResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedItem {
    Assignment(ResolvedAssignment),
    Quiz(ResolvedQuiz),
}

impl ResolvedItem {
    pub fn id(&self) -> &str {
        match self {
            ResolvedItem::Assignment(a) => &a.assignment.id,
            ResolvedItem::Quiz(q) => &q.quiz.id,
        }
    }

    pub fn course_id(&self) -> &str {
        match self {
            ResolvedItem::Assignment(a) => &a.assignment.course_id,
            ResolvedItem::Quiz(q) => &q.quiz.course_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ResolvedItem::Assignment(a) => &a.assignment.title,
            ResolvedItem::Quiz(q) => &q.quiz.title,
        }
    }

    pub fn course_title(&self) -> &str {
        match self {
            ResolvedItem::Assignment(a) => &a.course_title,
            ResolvedItem::Quiz(q) => &q.course_title,
        }
    }

    /// Deadline for assignments, end date for quizzes.
    pub fn due(&self) -> Option<DateTime<Utc>> {
        match self {
            ResolvedItem::Assignment(a) => Some(a.assignment.deadline),
            ResolvedItem::Quiz(q) => q.quiz.end_date,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            ResolvedItem::Assignment(a) => a.status.as_str(),
            ResolvedItem::Quiz(q) => q.status.as_str(),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            ResolvedItem::Assignment(_) => "assignment",
            ResolvedItem::Quiz(_) => "quiz",
        }
    }
}

/// Sort items for display: soonest due first, undated last, then by title.
pub fn sort_for_display(items: &mut [ResolvedItem]) {
    items.sort_by(|a, b| match (a.due(), b.due()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.title().cmp(b.title())),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.title().cmp(b.title()),
    });
}
