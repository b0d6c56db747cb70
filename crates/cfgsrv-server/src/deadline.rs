//! Caller-supplied request deadlines.
//!
//! The server has no timeout of its own. A caller may send
//! `x-request-timeout-ms`; if the store has not answered within that budget
//! the request fails fast with 504. The blocking store call itself is not
//! interrupted and may still complete.

use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::{ApiError, ServiceError};

pub const DEADLINE_HEADER: &str = "x-request-timeout-ms";

/// The request's deadline, if the caller set one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(pub Option<Duration>);

impl<S: Send + Sync> FromRequestParts<S> for Deadline {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(DEADLINE_HEADER) else {
            return Ok(Deadline(None));
        };
        let millis = raw
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .ok_or_else(|| {
                ApiError::BadRequest(format!("{} must be a whole number of milliseconds", DEADLINE_HEADER))
            })?;
        Ok(Deadline(Some(Duration::from_millis(millis))))
    }
}

impl Deadline {
    /// Runs a blocking service call on the blocking pool, bounded by the
    /// deadline when one is set.
    pub async fn run<T, F>(self, call: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    {
        let task = tokio::task::spawn_blocking(call);
        let joined = match self.0 {
            Some(budget) => tokio::time::timeout(budget, task)
                .await
                .map_err(|_| ApiError::DeadlineExceeded(budget.as_millis()))?,
            None => task.await,
        };
        let result =
            joined.map_err(|e| ApiError::InternalError(format!("store task failed: {}", e)))?;
        Ok(result?)
    }
}
