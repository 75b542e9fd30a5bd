//! Log dispatcher - emit payloads to the structured log
//!
//! Handy during development and as a delivery audit trail alongside a
//! real target.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use hookd_registry::{DispatcherFactory, RegistryResult};
use hookd_webhook::{ComponentDescriptor, Dispatcher, WebhookResult};
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "log_test.rs"]
mod tests;

/// Dispatcher that logs each payload at info level
#[derive(Debug)]
pub struct LogDispatcher;

impl Dispatcher for LogDispatcher {
    fn dispatch<'a>(
        &'a self,
        payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<()>> + Send + 'a>> {
        Box::pin(async move {
            tracing::info!(
                bytes = payload.len(),
                payload = %String::from_utf8_lossy(&payload),
                "webhook payload"
            );
            Ok(())
        })
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Factory for `log://`
pub struct LogDispatcherFactory;

impl DispatcherFactory for LogDispatcherFactory {
    fn create(&self, _descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Dispatcher>> {
        Ok(Box::new(LogDispatcher))
    }
}
