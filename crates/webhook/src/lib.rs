//! hookd - Webhook component model
//!
//! Core traits and types shared by every hookd crate. A webhook pipeline is
//! assembled from three component kinds, each behind its own capability
//! trait:
//!
//! ```text
//! [Request] → [Receiver] → [Transformation]* → [Dispatcher]+
//! ```
//!
//! - **Receiver**: authenticates and parses an inbound request into a
//!   payload, or decides the event is intentionally ignored.
//! - **Transformation**: maps one payload to another.
//! - **Dispatcher**: delivers a payload to an external target.
//!
//! # Design Principles
//!
//! - **Thread-safe**: components may be called from concurrent request
//!   tasks and must be `Send + Sync`.
//! - **Cancellable**: every call takes the request-scoped
//!   [`CancellationToken`] so a client disconnect propagates into in-flight
//!   component work.
//! - **No magic error codes**: an intentionally ignored event (a liveness
//!   ping, an uninteresting event type) is [`Received::Ignored`], not an
//!   error with a reserved code. The error channel carries only real
//!   failures.
//!
//! # Example
//!
//! ```ignore
//! struct EchoReceiver;
//!
//! impl Receiver for EchoReceiver {
//!     fn receive<'a>(
//!         &'a self,
//!         request: &'a InboundRequest,
//!         _cancel: &'a CancellationToken,
//!     ) -> Pin<Box<dyn Future<Output = WebhookResult<Received>> + Send + 'a>> {
//!         Box::pin(async move { Ok(Received::Payload(request.body.clone())) })
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "echo"
//!     }
//! }
//! ```

mod descriptor;
mod error;
mod request;

pub use descriptor::{ComponentDescriptor, DescriptorError};
pub use error::WebhookError;
pub use request::InboundRequest;

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;

/// Result type for webhook component operations
pub type WebhookResult<T> = Result<T, WebhookError>;

/// Outcome of a receive call
///
/// Receivers distinguish "here is the payload" from "this event is valid
/// but warrants no further processing". The latter short-circuits the
/// pipeline into a success-shaped no-op: no transformation runs, no
/// dispatcher is invoked, and the caller sees success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// The parsed payload, to be carried through the pipeline
    Payload(Bytes),

    /// Valid event, intentionally skipped (e.g. a ping)
    Ignored,
}

/// Trait for inbound request receivers
///
/// A receiver authenticates and parses an inbound HTTP request into a
/// payload. Failures carry the transport status code the caller should
/// see, verbatim.
pub trait Receiver: std::fmt::Debug + Send + Sync {
    /// Receive an inbound request, producing a payload or an ignore
    ///
    /// # Errors
    ///
    /// Returns a [`WebhookError`] whose code maps directly to the HTTP
    /// status reported to the caller (e.g. 401 for a bad signature).
    fn receive<'a>(
        &'a self,
        request: &'a InboundRequest,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Received>> + Send + 'a>>;

    /// Name of this receiver for logging
    fn name(&self) -> &'static str;
}

/// Trait for payload transformations
///
/// Transformations run sequentially in binding order; the output of one is
/// the input of the next. The first failure aborts the chain.
pub trait Transformation: std::fmt::Debug + Send + Sync {
    /// Map a payload to a new payload
    fn transform<'a>(
        &'a self,
        payload: Bytes,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Bytes>> + Send + 'a>>;

    /// Name of this transformation for logging
    fn name(&self) -> &'static str;
}

/// Trait for payload dispatchers
///
/// All dispatchers bound to a pipeline run concurrently against the same
/// final payload. Delivery is best-effort: nothing is retried, and a
/// failure is reported back to the webhook caller.
pub trait Dispatcher: std::fmt::Debug + Send + Sync {
    /// Deliver a payload to this dispatcher's target
    fn dispatch<'a>(
        &'a self,
        payload: Bytes,
        cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<()>> + Send + 'a>>;

    /// Name of this dispatcher for logging
    fn name(&self) -> &'static str;
}
