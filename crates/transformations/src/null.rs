//! Null transformation - pass-through
//!
//! Useful as a placeholder in bindings and as the baseline in tests.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use hookd_registry::{RegistryResult, TransformationFactory};
use hookd_webhook::{ComponentDescriptor, Transformation, WebhookResult};
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "null_test.rs"]
mod tests;

/// Transformation that returns its input unchanged
#[derive(Debug)]
pub struct NullTransformation;

impl Transformation for NullTransformation {
    fn transform<'a>(
        &'a self,
        payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Bytes>> + Send + 'a>> {
        Box::pin(async move { Ok(payload) })
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

/// Factory for `null://`
pub struct NullTransformationFactory;

impl TransformationFactory for NullTransformationFactory {
    fn create(
        &self,
        _descriptor: &ComponentDescriptor,
    ) -> RegistryResult<Box<dyn Transformation>> {
        Ok(Box::new(NullTransformation))
    }
}
