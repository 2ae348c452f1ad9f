//! HTTP implementation of [`CourseApi`] against the learning-management REST API.

use std::time::Duration;

use async_trait::async_trait;
use coursetrack_core::{
    Assignment, AssignmentResult, Course, Lesson, Quiz, QuizResult, Submission,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{ApiError, AuthContext, CourseApi};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Authenticated REST client. The session is fixed at construction.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    auth: AuthContext,
}

impl HttpClient {
    /// Create a client for the given backend base URL.
    ///
    /// `base_url` should be like `https://lms.example.org` (a trailing slash is trimmed).
    pub fn new(base_url: String, auth: AuthContext) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, auth, DEFAULT_TIMEOUT)
    }

    /// Like [`new`](Self::new), with a per-request timeout. A request that
    /// exceeds it fails with [`ApiError::Timeout`].
    pub fn with_timeout(
        base_url: String,
        auth: AuthContext,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// GET `path` and decode the JSON body. `resource` names the record in
    /// `NotFound` errors.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(self.auth.token())
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(classify(status.as_u16(), body, resource));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Map a non-success status onto the error taxonomy.
fn classify(status: u16, body: String, resource: &str) -> ApiError {
    match status {
        401 | 403 => ApiError::AuthRequired,
        404 => ApiError::not_found(resource),
        408 | 504 => ApiError::Timeout(format!("server returned {status}")),
        _ => ApiError::Server { status, body },
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(err.to_string())
    } else {
        ApiError::Http(err)
    }
}

#[async_trait]
impl CourseApi for HttpClient {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let courses: Vec<Course> = self.get_json("courses", "course list").await?;
        debug!(count = courses.len(), "listed courses");
        Ok(courses)
    }

    async fn list_assignments(&self, course_id: &str) -> Result<Vec<Assignment>, ApiError> {
        self.get_json(&format!("courses/{course_id}/assignments"), "assignment list")
            .await
    }

    async fn list_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>, ApiError> {
        self.get_json(&format!("courses/{course_id}/quizzes"), "quiz list")
            .await
    }

    async fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>, ApiError> {
        self.get_json(&format!("courses/{course_id}/lessons"), "lesson list")
            .await
    }

    async fn get_submission(&self, assignment_id: &str) -> Result<Submission, ApiError> {
        self.get_json(
            &format!("assignments/{assignment_id}/submission"),
            "submission",
        )
        .await
    }

    async fn get_result(&self, assignment_id: &str) -> Result<AssignmentResult, ApiError> {
        self.get_json(&format!("assignments/{assignment_id}/result"), "result")
            .await
    }

    async fn get_quiz_submission(&self, quiz_id: &str) -> Result<QuizResult, ApiError> {
        self.get_json(&format!("quizzes/{quiz_id}/submission"), "quiz submission")
            .await
    }

    async fn list_submissions(&self, assignment_id: &str) -> Result<Vec<Submission>, ApiError> {
        self.get_json(
            &format!("assignments/{assignment_id}/submissions"),
            "submission list",
        )
        .await
    }
}
