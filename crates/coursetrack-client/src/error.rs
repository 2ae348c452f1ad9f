use thiserror::Error;

/// A classified failure from a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    AuthRequired,

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "http")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::AuthRequired)
    }
}

/// Why one course contributed nothing to an aggregation.
#[derive(Debug, Error)]
pub enum CourseError {
    /// The course's item (or lesson) listing could not be fetched.
    #[error("listing items failed: {0}")]
    ItemFetchFailed(#[source] ApiError),

    /// An item inside the course failed with something other than "not found".
    #[error("fetching item details failed: {0}")]
    CourseFetchFailed(#[source] ApiError),
}

impl CourseError {
    pub fn api_error(&self) -> &ApiError {
        match self {
            CourseError::ItemFetchFailed(e) | CourseError::CourseFetchFailed(e) => e,
        }
    }

    pub fn is_auth(&self) -> bool {
        self.api_error().is_auth()
    }
}

/// Failures that abort a whole aggregation call.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("authentication required")]
    AuthRequired,

    #[error("listing courses failed: {0}")]
    CourseList(#[source] ApiError),
}

impl From<ApiError> for AggregateError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthRequired => AggregateError::AuthRequired,
            other => AggregateError::CourseList(other),
        }
    }
}
