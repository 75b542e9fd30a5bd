//! Insecure receiver - no validation

use std::future::Future;
use std::pin::Pin;

use hookd_registry::{ReceiverFactory, RegistryResult};
use hookd_webhook::{
    ComponentDescriptor, InboundRequest, Received, Receiver, WebhookResult,
};
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "insecure_test.rs"]
mod tests;

/// Receiver that accepts any request and passes the body through
#[derive(Debug)]
pub struct InsecureReceiver;

impl Receiver for InsecureReceiver {
    fn receive<'a>(
        &'a self,
        request: &'a InboundRequest,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Received>> + Send + 'a>> {
        Box::pin(async move { Ok(Received::Payload(request.body.clone())) })
    }

    fn name(&self) -> &'static str {
        "insecure"
    }
}

/// Factory for `insecure://`
pub struct InsecureReceiverFactory;

impl ReceiverFactory for InsecureReceiverFactory {
    fn create(&self, _descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Receiver>> {
        Ok(Box::new(InsecureReceiver))
    }
}
