//! Result and error types for the harness.

use thiserror::Error;

/// Result type for harness operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum SuiteError {
    /// A wait-for-visibility or readiness bound was exceeded
    #[error("Operation timed out after {ms}ms waiting for {what}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// What was being waited for
        what: String,
    },

    /// An act primitive was rejected after its visibility wait passed
    #[error("Action failed: {message}")]
    Action {
        /// Error message
        message: String,
    },

    /// Navigation to a URL failed
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Operation issued against a session that has been closed
    #[error("Session is closed; the page object has outlived its session")]
    SessionClosed,

    /// Fixture setup failed before the test body ran
    #[error("Fixture setup failed: {message}")]
    Setup {
        /// Error message
        message: String,
    },

    /// Screenshot capture or persistence failed
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuiteError {
    /// Build a timeout error from a duration and a description of the wait.
    #[must_use]
    pub fn timeout(elapsed: std::time::Duration, what: impl Into<String>) -> Self {
        Self::Timeout {
            ms: elapsed.as_millis() as u64,
            what: what.into(),
        }
    }

    /// Whether this error is a fixture setup failure.
    #[must_use]
    pub const fn is_setup(&self) -> bool {
        matches!(self, Self::Setup { .. })
    }

    /// Whether this error is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
