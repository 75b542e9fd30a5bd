//! Stub components shared by the table and executor tests
//!
//! Everything here is deliberately tiny: receivers that echo or refuse,
//! transformations that do visible string work, dispatchers that count
//! invocations. Tests inject these through the registry exactly the way
//! production components are injected.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use hookd_registry::{
    ComponentRegistry, DispatcherFactory, ReceiverFactory, RegistryResult,
    TransformationFactory,
};
use hookd_webhook::{
    ComponentDescriptor, Dispatcher, InboundRequest, Received, Receiver, Transformation,
    WebhookError, WebhookResult,
};
use tokio_util::sync::CancellationToken;

/// Receiver that passes the request body through
#[derive(Debug)]
pub struct EchoReceiver;

impl Receiver for EchoReceiver {
    fn receive<'a>(
        &'a self,
        request: &'a InboundRequest,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Received>> + Send + 'a>> {
        Box::pin(async move { Ok(Received::Payload(request.body.clone())) })
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// Receiver that intentionally ignores every event
#[derive(Debug)]
pub struct IgnoringReceiver;

impl Receiver for IgnoringReceiver {
    fn receive<'a>(
        &'a self,
        _request: &'a InboundRequest,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Received>> + Send + 'a>> {
        Box::pin(async move { Ok(Received::Ignored) })
    }

    fn name(&self) -> &'static str {
        "ignoring"
    }
}

/// Receiver that fails with a fixed code and message
#[derive(Debug)]
pub struct FailingReceiver {
    pub code: u16,
    pub message: &'static str,
}

impl Receiver for FailingReceiver {
    fn receive<'a>(
        &'a self,
        _request: &'a InboundRequest,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Received>> + Send + 'a>> {
        Box::pin(async move { Err(WebhookError::new(self.code, self.message)) })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Transformation that uppercases the payload
#[derive(Debug)]
pub struct UppercaseTransformation;

impl Transformation for UppercaseTransformation {
    fn transform<'a>(
        &'a self,
        payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Bytes>> + Send + 'a>> {
        Box::pin(async move { Ok(Bytes::from(payload.to_ascii_uppercase())) })
    }

    fn name(&self) -> &'static str {
        "uppercase"
    }
}

/// Transformation that appends a fixed suffix
#[derive(Debug)]
pub struct AppendTransformation {
    pub suffix: &'static str,
}

impl Transformation for AppendTransformation {
    fn transform<'a>(
        &'a self,
        payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Bytes>> + Send + 'a>> {
        Box::pin(async move {
            let mut out = payload.to_vec();
            out.extend_from_slice(self.suffix.as_bytes());
            Ok(Bytes::from(out))
        })
    }

    fn name(&self) -> &'static str {
        "append"
    }
}

/// Transformation that always fails, recording whether it ran
#[derive(Debug)]
pub struct FailingTransformation {
    pub code: u16,
    pub message: &'static str,
    pub invoked: Arc<AtomicUsize>,
}

impl Transformation for FailingTransformation {
    fn transform<'a>(
        &'a self,
        _payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Bytes>> + Send + 'a>> {
        self.invoked.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Err(WebhookError::new(self.code, self.message)) })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Transformation that records its invocations and passes through
#[derive(Debug)]
pub struct CountingTransformation {
    pub invoked: Arc<AtomicUsize>,
}

impl Transformation for CountingTransformation {
    fn transform<'a>(
        &'a self,
        payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Bytes>> + Send + 'a>> {
        self.invoked.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(payload) })
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Dispatcher that records its invocations and the payloads it saw
#[derive(Debug)]
pub struct RecordingDispatcher {
    pub invoked: Arc<AtomicUsize>,
}

impl Dispatcher for RecordingDispatcher {
    fn dispatch<'a>(
        &'a self,
        _payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<()>> + Send + 'a>> {
        self.invoked.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(()) })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Dispatcher that always fails with a fixed message
#[derive(Debug)]
pub struct FailingDispatcher {
    pub message: &'static str,
}

impl Dispatcher for FailingDispatcher {
    fn dispatch<'a>(
        &'a self,
        _payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<()>> + Send + 'a>> {
        Box::pin(async move { Err(WebhookError::internal(self.message)) })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Dispatcher that sleeps before succeeding, flagging its completion
#[derive(Debug)]
pub struct SlowDispatcher {
    pub delay: Duration,
    pub completed: Arc<AtomicBool>,
}

impl Dispatcher for SlowDispatcher {
    fn dispatch<'a>(
        &'a self,
        _payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<()>> + Send + 'a>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            self.completed.store(true, Ordering::SeqCst);
            Ok(())
        })
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

/// Dispatcher that reports cancellation if the token fires first
#[derive(Debug)]
pub struct CancelAwareDispatcher;

impl Dispatcher for CancelAwareDispatcher {
    fn dispatch<'a>(
        &'a self,
        _payload: Bytes,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<()>> + Send + 'a>> {
        Box::pin(async move {
            tokio::select! {
                _ = cancel.cancelled() => Err(WebhookError::cancelled()),
                _ = tokio::time::sleep(Duration::from_secs(30)) => Ok(()),
            }
        })
    }

    fn name(&self) -> &'static str {
        "cancel_aware"
    }
}

// Factories wiring the stubs into a registry, for table-construction tests

pub struct EchoReceiverFactory;

impl ReceiverFactory for EchoReceiverFactory {
    fn create(&self, _descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Receiver>> {
        Ok(Box::new(EchoReceiver))
    }
}

pub struct UppercaseFactory;

impl TransformationFactory for UppercaseFactory {
    fn create(
        &self,
        _descriptor: &ComponentDescriptor,
    ) -> RegistryResult<Box<dyn Transformation>> {
        Ok(Box::new(UppercaseTransformation))
    }
}

pub struct RecordingDispatcherFactory {
    pub invoked: Arc<AtomicUsize>,
}

impl DispatcherFactory for RecordingDispatcherFactory {
    fn create(&self, _descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Dispatcher>> {
        Ok(Box::new(RecordingDispatcher {
            invoked: Arc::clone(&self.invoked),
        }))
    }
}

/// Registry with one stub of each kind registered
///
/// Returns the shared dispatcher invocation counter alongside the
/// registry.
pub fn stub_registry() -> (ComponentRegistry, Arc<AtomicUsize>) {
    let invoked = Arc::new(AtomicUsize::new(0));

    let mut registry = ComponentRegistry::new();
    registry.register_receiver("echo", EchoReceiverFactory).unwrap();
    registry
        .register_transformation("upper", UppercaseFactory)
        .unwrap();
    registry
        .register_dispatcher(
            "record",
            RecordingDispatcherFactory {
                invoked: Arc::clone(&invoked),
            },
        )
        .unwrap();

    (registry, invoked)
}
