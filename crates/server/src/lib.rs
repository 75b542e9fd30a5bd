//! hookd - HTTP Front End
//!
//! Routes inbound HTTP requests by exact path to the pipeline table,
//! drives the executor, and renders its outcome as an HTTP response.
//!
//! # Responses
//!
//! - Success: `200 OK` with per-stage timing headers
//!   (`X-Hookd-Time-To-Receive`, `-Transform`, `-Dispatch`, `-Process`)
//! - Failure: the originating component's status code with its message as
//!   a plain-text body (newline-joined for dispatch aggregates)
//! - Unknown path: `404` straight from the table lookup; the executor is
//!   never invoked
//! - Intentionally ignored events: `200 OK` with the total-time header
//!
//! # Debug echo
//!
//! When `daemon.allow_debug` is set AND the request carries a non-empty
//! `debug` query parameter, the final post-transform payload is echoed
//! back as `text/plain` alongside the normal headers. A diagnostic layer
//! on top of the normal outcome, not a replacement for it.
//!
//! # Example
//!
//! ```ignore
//! use hookd_server::WebhookServer;
//! use tokio_util::sync::CancellationToken;
//!
//! let server = WebhookServer::new(config.daemon.clone(), Arc::new(table));
//! server.run(CancellationToken::new()).await?;
//! ```

mod error;
mod handler;

pub use error::ServerError;

use std::sync::Arc;

use hookd_config::DaemonConfig;
use hookd_pipeline::PipelineTable;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use handler::{build_router, AppState};

/// HTTP front end serving a pipeline table
pub struct WebhookServer {
    config: DaemonConfig,
    table: Arc<PipelineTable>,
}

impl WebhookServer {
    /// Create a server for the given daemon config and table
    pub fn new(config: DaemonConfig, table: Arc<PipelineTable>) -> Self {
        Self { config, table }
    }

    /// Run the server until cancelled
    ///
    /// Binds to the configured address and serves requests with graceful
    /// shutdown: in-flight requests finish, the listener stops accepting.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), ServerError> {
        let bind_addr = self.config.bind_address();

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServerError::Bind {
                address: bind_addr.clone(),
                source: e,
            })?;

        tracing::info!(
            address = %bind_addr,
            webhooks = self.table.len(),
            endpoints = ?self.table.endpoints(),
            allow_debug = self.config.allow_debug,
            "hookd listening for requests"
        );

        let state = Arc::new(AppState {
            table: Arc::clone(&self.table),
            allow_debug: self.config.allow_debug,
            max_payload_size: self.config.max_payload_size,
            shutdown: cancel.clone(),
        });

        let app = build_router(state);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(cancel))
            .await
            .map_err(ServerError::Http);

        tracing::info!("hookd server stopped");

        result
    }
}

/// Shutdown signal future
async fn shutdown_signal(cancel: CancellationToken) {
    cancel.cancelled().await;
}
