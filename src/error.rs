//! Error types used by the environment controller and its backends.
//!
//! This module defines three error types:
//!
//! - [`BackendError`] — failures reported by the orchestration backend query surface.
//! - [`EnvironmentError`] — failures of controller operations that touch the attached stream.
//! - [`InvalidState`] — a status string outside the four known process states.
//!
//! The enums provide helper methods (`as_label`, `as_message`) for logging/metrics,
//! and [`BackendError::is_not_found`] to separate "workload missing" from real failures.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the orchestration backend.
///
/// `NotFound` is an expected outcome for some controller operations
/// (`exists`, `exit_state`) and a real failure for others (`is_running`).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend has no workload with the requested identity.
    #[error("workload {id:?} not found")]
    NotFound {
        /// The identity that was looked up.
        id: String,
    },

    /// The backend API rejected or failed the request.
    #[error("backend api error ({status}): {message}")]
    Api {
        /// Backend status code (HTTP-style).
        status: u16,
        /// Message reported by the backend.
        message: String,
    },

    /// The query did not complete within the configured timeout.
    #[error("backend query timed out after {timeout:?}")]
    Timeout {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// The caller's cancellation token fired before the query completed.
    #[error("backend query cancelled")]
    Canceled,
}

impl BackendError {
    /// Returns `true` if the workload does not exist on the backend.
    ///
    /// # Example
    /// ```
    /// use podvisor::BackendError;
    ///
    /// let err = BackendError::NotFound { id: "srv-1".into() };
    /// assert!(err.is_not_found());
    /// assert!(!BackendError::Canceled.is_not_found());
    /// ```
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound { .. })
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BackendError::NotFound { .. } => "backend_not_found",
            BackendError::Api { .. } => "backend_api",
            BackendError::Timeout { .. } => "backend_timeout",
            BackendError::Canceled => "backend_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BackendError::NotFound { id } => format!("not found: {id}"),
            BackendError::Api { status, message } => format!("api error {status}: {message}"),
            BackendError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            BackendError::Canceled => "context cancelled".to_string(),
        }
    }
}

/// # Errors produced by environment operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// A backend query failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// An operation needed the console stream but nothing is attached.
    #[error("not attached to the workload console")]
    NotAttached,

    /// Writing to the attached console stream failed.
    #[error("console stream error: {error}")]
    Stream {
        /// The underlying error message.
        error: String,
    },
}

impl EnvironmentError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use podvisor::EnvironmentError;
    ///
    /// assert_eq!(EnvironmentError::NotAttached.as_label(), "environment_not_attached");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EnvironmentError::Backend(e) => e.as_label(),
            EnvironmentError::NotAttached => "environment_not_attached",
            EnvironmentError::Stream { .. } => "environment_stream",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EnvironmentError::Backend(e) => e.as_message(),
            EnvironmentError::NotAttached => "not attached".to_string(),
            EnvironmentError::Stream { error } => format!("stream: {error}"),
        }
    }
}

/// A status string that is not one of the known process states.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid server state received: {value}")]
pub struct InvalidState {
    /// The rejected input.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            BackendError::NotFound { id: "a".into() }.as_label(),
            "backend_not_found"
        );
        assert_eq!(
            BackendError::Timeout { timeout: Duration::from_secs(1) }.as_label(),
            "backend_timeout"
        );
        let wrapped: EnvironmentError = BackendError::Canceled.into();
        assert_eq!(wrapped.as_label(), "backend_canceled");
    }

    #[test]
    fn test_api_error_display() {
        let err = BackendError::Api {
            status: 500,
            message: "etcd unavailable".into(),
        };
        assert_eq!(err.to_string(), "backend api error (500): etcd unavailable");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_state_display() {
        let err = InvalidState { value: "paused".into() };
        assert_eq!(err.to_string(), "invalid server state received: paused");
    }
}
