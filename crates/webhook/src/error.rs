//! Webhook error type
//!
//! A code-plus-message value produced by components. The code maps
//! directly to the HTTP status the front end reports.

use thiserror::Error;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Status code used for aggregate dispatch failures
pub const STATUS_INTERNAL: u16 = 500;

/// Status code used when the request was cancelled mid-flight
///
/// 499 is the de-facto "client closed request" status.
pub const STATUS_CANCELLED: u16 = 499;

/// Error reported by a webhook component
///
/// Carries the transport status code the caller should see plus a
/// human-readable message. Components set the code; the pipeline and the
/// front end pass both through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WebhookError {
    /// Transport status code (HTTP status)
    pub code: u16,

    /// Human-readable message
    pub message: String,
}

impl WebhookError {
    /// Create an error with an explicit status code
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// Create a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    /// Create a 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(STATUS_INTERNAL, message)
    }

    /// Create a cancellation error
    pub fn cancelled() -> Self {
        Self::new(STATUS_CANCELLED, "operation cancelled")
    }

    /// Whether this error was caused by cancellation
    pub fn is_cancelled(&self) -> bool {
        self.code == STATUS_CANCELLED
    }
}
