//! Null dispatcher - discard payloads

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use hookd_registry::{DispatcherFactory, RegistryResult};
use hookd_webhook::{ComponentDescriptor, Dispatcher, WebhookResult};
use tokio_util::sync::CancellationToken;

/// Dispatcher that accepts and discards every payload
#[derive(Debug)]
pub struct NullDispatcher;

impl Dispatcher for NullDispatcher {
    fn dispatch<'a>(
        &'a self,
        _payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<()>> + Send + 'a>> {
        Box::pin(async move { Ok(()) })
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

/// Factory for `null://`
pub struct NullDispatcherFactory;

impl DispatcherFactory for NullDispatcherFactory {
    fn create(&self, _descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Dispatcher>> {
        Ok(Box::new(NullDispatcher))
    }
}
