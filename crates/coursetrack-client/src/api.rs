//! The backend contract the aggregation core is written against.

use async_trait::async_trait;
use coursetrack_core::{
    Assignment, AssignmentResult, Course, Lesson, Quiz, QuizResult, Submission,
};

use crate::ApiError;

/// One authenticated call per method, decoded into typed records.
///
/// The single-record lookups (`get_submission`, `get_result`,
/// `get_quiz_submission`) signal "nothing there yet" with
/// [`ApiError::NotFound`]; wrap them in [`probe`](crate::probe) to get an
/// `Option` instead.
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// Courses visible to the current user. Fails with `AuthRequired` when
    /// the session is missing or expired.
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;

    async fn list_assignments(&self, course_id: &str) -> Result<Vec<Assignment>, ApiError>;

    async fn list_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>, ApiError>;

    async fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>, ApiError>;

    /// The current user's submission for an assignment.
    async fn get_submission(&self, assignment_id: &str) -> Result<Submission, ApiError>;

    /// The grade issued for the current user's submission.
    async fn get_result(&self, assignment_id: &str) -> Result<AssignmentResult, ApiError>;

    /// The current user's graded quiz attempt.
    async fn get_quiz_submission(&self, quiz_id: &str) -> Result<QuizResult, ApiError>;

    /// Every student's submission for an assignment (teacher only). An empty
    /// list is a normal answer.
    async fn list_submissions(&self, assignment_id: &str) -> Result<Vec<Submission>, ApiError>;
}
