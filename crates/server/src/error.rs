//! Server error types

use std::io;

use thiserror::Error;

/// Errors that can occur while running the HTTP front end
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listener
    #[error("failed to bind to {address}: {source}")]
    Bind {
        /// The address that could not be bound
        address: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The HTTP server failed while serving
    #[error("http server error: {0}")]
    Http(#[source] io::Error),
}
