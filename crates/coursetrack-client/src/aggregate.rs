//! Fan-out aggregation: turn a course list into resolved items or calendar events.
//!
//! Every course is fetched independently and at most `max_concurrent_courses`
//! are in flight at once. Inside a course, all items are resolved together,
//! and each item's probes are joined before its status is computed. A course
//! that fails contributes nothing and is reported in [`Resolution::failures`];
//! only `AuthRequired` aborts the whole call.

use std::future::Future;

use chrono::{DateTime, Utc};
use coursetrack_core::{
    Assignment, CalendarEvent, Course, Quiz, ResolvedAssignment, ResolvedItem, ResolvedQuiz,
    Viewer, resolve_assignment, resolve_assignment_for_teacher, resolve_quiz,
    resolve_quiz_for_teacher,
};
use futures::future::{try_join, try_join_all};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, warn};

use crate::{AggregateError, ApiError, CourseApi, CourseError, probe};

pub const DEFAULT_MAX_CONCURRENT_COURSES: usize = 8;

/// A course that contributed nothing to an aggregation, and why.
#[derive(Debug)]
pub struct CourseFailure {
    pub course_id: String,
    pub course_title: String,
    pub error: CourseError,
}

/// The merged output of one aggregation pass.
///
/// `items` arrive in completion order; treat them as a set and sort before
/// display.
#[derive(Debug)]
pub struct Resolution<T> {
    pub items: Vec<T>,
    pub failures: Vec<CourseFailure>,
}

impl<T> Resolution<T> {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Resolves items and calendar events for one viewer against a [`CourseApi`].
pub struct Aggregator<A> {
    api: A,
    viewer: Viewer,
    max_concurrent_courses: usize,
}

impl<A: CourseApi> Aggregator<A> {
    pub fn new(api: A, viewer: Viewer) -> Self {
        Self {
            api,
            viewer,
            max_concurrent_courses: DEFAULT_MAX_CONCURRENT_COURSES,
        }
    }

    /// Cap the number of courses fetched concurrently. Zero is treated as one.
    pub fn with_max_concurrent_courses(mut self, n: usize) -> Self {
        self.max_concurrent_courses = n.max(1);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// List the current user's courses and resolve every item in them.
    pub async fn load_dashboard(&self) -> Result<Resolution<ResolvedItem>, AggregateError> {
        let courses = self.api.list_courses().await?;
        info!(courses = courses.len(), viewer = %self.viewer, "loading dashboard");
        self.resolve_all(&courses).await
    }

    /// List the current user's courses and collect their calendar events.
    pub async fn load_calendar(&self) -> Result<Resolution<CalendarEvent>, AggregateError> {
        let courses = self.api.list_courses().await?;
        info!(courses = courses.len(), "loading calendar events");
        self.resolve_events(&courses).await
    }

    pub async fn resolve_all(
        &self,
        courses: &[Course],
    ) -> Result<Resolution<ResolvedItem>, AggregateError> {
        self.resolve_all_at(courses, Utc::now()).await
    }

    /// Resolve every item of every course as of `now`.
    pub async fn resolve_all_at(
        &self,
        courses: &[Course],
        now: DateTime<Utc>,
    ) -> Result<Resolution<ResolvedItem>, AggregateError> {
        let resolution = self
            .fan_out(courses, |course| self.course_items(course, now))
            .await?;
        info!(
            items = resolution.items.len(),
            failed_courses = resolution.failures.len(),
            "resolved item statuses"
        );
        Ok(resolution)
    }

    /// Project every course's lessons and quizzes into calendar events.
    pub async fn resolve_events(
        &self,
        courses: &[Course],
    ) -> Result<Resolution<CalendarEvent>, AggregateError> {
        let resolution = self
            .fan_out(courses, |course| self.course_events(course))
            .await?;
        info!(
            events = resolution.items.len(),
            failed_courses = resolution.failures.len(),
            "collected calendar events"
        );
        Ok(resolution)
    }

    /// Run `per_course` for every course with bounded concurrency and merge.
    ///
    /// A course error is recorded and skipped, except `AuthRequired`, which
    /// stops the stream and drops the courses still in flight.
    async fn fan_out<'a, T, F, Fut>(
        &self,
        courses: &'a [Course],
        per_course: F,
    ) -> Result<Resolution<T>, AggregateError>
    where
        F: Fn(&'a Course) -> Fut,
        Fut: Future<Output = Result<Vec<T>, CourseError>>,
    {
        let outcomes: Vec<(&Course, Result<Vec<T>, CourseError>)> = stream::iter(courses)
            .map(|course| {
                let fut = per_course(course);
                async move { (course, fut.await) }
            })
            .buffer_unordered(self.max_concurrent_courses)
            .map(|(course, outcome)| match outcome {
                Err(e) if e.is_auth() => {
                    warn!(course_id = %course.id, "session rejected, aborting aggregation");
                    Err(AggregateError::AuthRequired)
                }
                other => Ok((course, other)),
            })
            .try_collect()
            .await?;

        let mut items = Vec::new();
        let mut failures = Vec::new();
        for (course, outcome) in outcomes {
            match outcome {
                Ok(course_items) => {
                    debug!(course_id = %course.id, count = course_items.len(), "course resolved");
                    items.extend(course_items);
                }
                Err(error) => {
                    warn!(course_id = %course.id, title = %course.title, error = %error, "course skipped");
                    failures.push(CourseFailure {
                        course_id: course.id.clone(),
                        course_title: course.title.clone(),
                        error,
                    });
                }
            }
        }
        Ok(Resolution { items, failures })
    }

    async fn course_items(
        &self,
        course: &Course,
        now: DateTime<Utc>,
    ) -> Result<Vec<ResolvedItem>, CourseError> {
        let (assignments, quizzes) = try_join(
            self.api.list_assignments(&course.id),
            self.api.list_quizzes(&course.id),
        )
        .await
        .map_err(CourseError::ItemFetchFailed)?;

        let (mut resolved, quizzes) = try_join(
            try_join_all(
                assignments
                    .into_iter()
                    .map(|a| self.resolve_assignment(course, a, now)),
            ),
            try_join_all(quizzes.into_iter().map(|q| self.resolve_quiz(course, q, now))),
        )
        .await
        .map_err(CourseError::CourseFetchFailed)?;

        resolved.extend(quizzes);
        Ok(resolved)
    }

    async fn resolve_assignment(
        &self,
        course: &Course,
        assignment: Assignment,
        now: DateTime<Utc>,
    ) -> Result<ResolvedItem, ApiError> {
        let resolved = match self.viewer {
            Viewer::Student => {
                let (submission, result) = try_join(
                    probe(self.api.get_submission(&assignment.id)),
                    probe(self.api.get_result(&assignment.id)),
                )
                .await?;
                let status =
                    resolve_assignment(&assignment, submission.as_ref(), result.as_ref(), now);
                ResolvedAssignment {
                    course_title: course.title.clone(),
                    status,
                    submission,
                    result,
                    submission_count: None,
                    assignment,
                }
            }
            Viewer::Teacher => {
                let submissions = self.api.list_submissions(&assignment.id).await?;
                ResolvedAssignment {
                    course_title: course.title.clone(),
                    status: resolve_assignment_for_teacher(&assignment, now),
                    submission: None,
                    result: None,
                    submission_count: Some(submissions.len()),
                    assignment,
                }
            }
        };
        Ok(ResolvedItem::Assignment(resolved))
    }

    async fn resolve_quiz(
        &self,
        course: &Course,
        quiz: Quiz,
        now: DateTime<Utc>,
    ) -> Result<ResolvedItem, ApiError> {
        let resolved = match self.viewer {
            Viewer::Student => {
                let result = probe(self.api.get_quiz_submission(&quiz.id)).await?;
                ResolvedQuiz {
                    course_title: course.title.clone(),
                    status: resolve_quiz(result.as_ref()),
                    result,
                    quiz,
                }
            }
            Viewer::Teacher => ResolvedQuiz {
                course_title: course.title.clone(),
                status: resolve_quiz_for_teacher(&quiz, now),
                result: None,
                quiz,
            },
        };
        Ok(ResolvedItem::Quiz(resolved))
    }

    async fn course_events(&self, course: &Course) -> Result<Vec<CalendarEvent>, CourseError> {
        let (lessons, quizzes) = try_join(
            self.api.list_lessons(&course.id),
            self.api.list_quizzes(&course.id),
        )
        .await
        .map_err(CourseError::ItemFetchFailed)?;

        let events = lessons
            .iter()
            .map(|l| CalendarEvent::from_lesson(l, course))
            .chain(quizzes.iter().map(|q| CalendarEvent::from_quiz(q, course)))
            .collect();
        Ok(events)
    }
}
