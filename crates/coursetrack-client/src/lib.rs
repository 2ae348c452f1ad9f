//! Client side of coursetrack: the backend contract, existence probes, and the
//! concurrent aggregation that reconstructs per-item status.

mod aggregate;
mod api;
mod auth;
mod error;
mod probe;

#[cfg(feature = "http")]
pub mod http;

pub use aggregate::{
    Aggregator, CourseFailure, DEFAULT_MAX_CONCURRENT_COURSES, Resolution,
};
pub use api::CourseApi;
pub use auth::AuthContext;
pub use error::{AggregateError, ApiError, CourseError};
pub use probe::probe;

#[cfg(feature = "http")]
pub use http::HttpClient;
