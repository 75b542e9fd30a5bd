//! HTTP dispatcher - POST payloads to a target URL
//!
//! The descriptor is the target itself: `https://example.com/hook`.
//! Delivery is a single POST with no retries; any transport error or
//! non-2xx answer is reported as a dispatch failure. The request-scoped
//! cancellation token is honored mid-flight.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use hookd_registry::{DispatcherFactory, RegistryError, RegistryResult};
use hookd_webhook::{
    ComponentDescriptor, Dispatcher, WebhookError, WebhookResult,
};
use tokio_util::sync::CancellationToken;
use url::Url;

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

/// Dispatcher that POSTs the payload to a fixed URL
#[derive(Debug)]
pub struct HttpDispatcher {
    target: Url,
    client: reqwest::Client,
}

impl HttpDispatcher {
    /// Create a dispatcher for the given target URL
    pub fn new(target: Url) -> Self {
        Self {
            target,
            client: reqwest::Client::new(),
        }
    }

    /// The configured target URL
    pub fn target(&self) -> &Url {
        &self.target
    }
}

impl Dispatcher for HttpDispatcher {
    fn dispatch<'a>(
        &'a self,
        payload: Bytes,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let send = self
                .client
                .post(self.target.clone())
                .header("Content-Type", "application/octet-stream")
                .body(payload)
                .send();

            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(WebhookError::cancelled()),
                result = send => result.map_err(|e| {
                    WebhookError::internal(format!("POST {} failed: {e}", self.target))
                })?,
            };

            let status = response.status();
            if !status.is_success() {
                return Err(WebhookError::internal(format!(
                    "POST {} answered {status}",
                    self.target
                )));
            }

            tracing::debug!(target = %self.target, status = %status, "payload delivered");
            Ok(())
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Factory for `http://...` and `https://...`
pub struct HttpDispatcherFactory;

impl DispatcherFactory for HttpDispatcherFactory {
    fn create(&self, descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Dispatcher>> {
        let target = descriptor.url().clone();

        if target.host_str().is_none() {
            return Err(RegistryError::invalid_descriptor(
                descriptor.scheme(),
                "target URL must have a host",
            ));
        }

        Ok(Box::new(HttpDispatcher::new(target)))
    }
}
