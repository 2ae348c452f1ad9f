use std::future::Future;

use crate::ApiError;

/// Await a lookup whose "not found" answer means absence.
///
/// `NotFound` becomes `Ok(None)`. Every other error, timeouts included, is
/// passed through untouched: a broken request is not evidence that nothing
/// was submitted.
pub async fn probe<T, F>(call: F) -> Result<Option<T>, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match call.await {
        Ok(value) => Ok(Some(value)),
        Err(ApiError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
