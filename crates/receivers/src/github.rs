//! GitHub receiver - HMAC-signed webhook validation
//!
//! Verifies the `X-Hub-Signature-256` header GitHub attaches to webhook
//! deliveries: `sha256=` followed by the hex HMAC-SHA256 of the raw body
//! under the shared secret. `ping` events (sent when a hook is first
//! configured) are valid but warrant no processing, so they come back as
//! ignored rather than as payloads.

use std::future::Future;
use std::pin::Pin;

use hmac::{Hmac, Mac};
use hookd_registry::{ReceiverFactory, RegistryError, RegistryResult};
use hookd_webhook::{
    ComponentDescriptor, InboundRequest, Received, Receiver, WebhookError, WebhookResult,
};
use sha2::Sha256;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "github_test.rs"]
mod tests;

/// Event type header GitHub sets on every delivery
const EVENT_HEADER: &str = "X-GitHub-Event";

/// Signature header carrying the HMAC-SHA256 of the body
const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Receiver validating GitHub webhook deliveries
#[derive(Debug)]
pub struct GitHubReceiver {
    secret: String,
}

impl GitHubReceiver {
    /// Create a receiver with the given shared secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Receiver for GitHubReceiver {
    fn receive<'a>(
        &'a self,
        request: &'a InboundRequest,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Received>> + Send + 'a>> {
        Box::pin(async move {
            let event = request
                .header(EVENT_HEADER)
                .ok_or_else(|| WebhookError::bad_request("missing X-GitHub-Event header"))?;

            let signature = request
                .header(SIGNATURE_HEADER)
                .ok_or_else(|| WebhookError::unauthorized("missing X-Hub-Signature-256 header"))?;

            let hex_digest = signature.strip_prefix("sha256=").ok_or_else(|| {
                WebhookError::unauthorized("malformed X-Hub-Signature-256 header")
            })?;

            let digest = hex::decode(hex_digest).map_err(|_| {
                WebhookError::unauthorized("malformed X-Hub-Signature-256 header")
            })?;

            let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
                .map_err(|_| WebhookError::internal("invalid HMAC key"))?;
            mac.update(&request.body);
            mac.verify_slice(&digest)
                .map_err(|_| WebhookError::unauthorized("signature mismatch"))?;

            // Signature checked first so a forged ping cannot probe the
            // endpoint
            if event == "ping" {
                return Ok(Received::Ignored);
            }

            Ok(Received::Payload(request.body.clone()))
        })
    }

    fn name(&self) -> &'static str {
        "github"
    }
}

/// Factory for `github://?secret=...`
pub struct GitHubReceiverFactory;

impl ReceiverFactory for GitHubReceiverFactory {
    fn create(&self, descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Receiver>> {
        let secret = descriptor.param("secret").ok_or_else(|| {
            RegistryError::invalid_descriptor(
                descriptor.scheme(),
                "missing required parameter 'secret'",
            )
        })?;

        if secret.is_empty() {
            return Err(RegistryError::invalid_descriptor(
                descriptor.scheme(),
                "parameter 'secret' must not be empty",
            ));
        }

        Ok(Box::new(GitHubReceiver::new(secret)))
    }
}

/// Compute the `X-Hub-Signature-256` value for a payload
///
/// Used by the `send-github` CLI command and by tests to produce valid
/// deliveries.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}
