//! Pipeline executor
//!
//! Runs one request through a definition's receive → transform → dispatch
//! sequence, producing a [`PipelineOutcome`].
//!
//! # State machine
//!
//! ```text
//! Receiving ──ignored──→ Ignored
//!     │
//!     ▼
//! Transforming ──error──→ Failed
//!     │
//!     ▼
//! Dispatching ──any failure──→ Failed (aggregate)
//!     │
//!     ▼
//! Completed
//! ```
//!
//! Nothing is retried at any stage; every failure is terminal for the
//! request and scoped to it alone.

use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::future::join_all;
use hookd_webhook::{InboundRequest, Received, WebhookError};
use tokio_util::sync::CancellationToken;

use crate::definition::PipelineDefinition;

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;

/// Per-stage wall-clock durations for one execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timings {
    /// Time spent in the receiver
    pub receive: Duration,

    /// Time spent in the transformation chain (zero-step chains included)
    pub transform: Duration,

    /// Time from first dispatch to the slowest dispatcher returning
    pub dispatch: Duration,

    /// Total elapsed time across the whole pipeline
    pub total: Duration,
}

/// Result of one pipeline execution
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Every stage succeeded
    Completed {
        /// The final post-transform payload
        payload: Bytes,
        /// Per-stage durations
        timings: Timings,
    },

    /// The receiver intentionally skipped this event
    ///
    /// Success-shaped: no transformation ran, no dispatcher was invoked.
    Ignored {
        /// Total elapsed time
        total: Duration,
    },

    /// A stage failed
    ///
    /// Receiver and transformation failures carry the component's own
    /// code and message verbatim; dispatch failures carry a synthesized
    /// internal-error code with every failing dispatcher's message,
    /// newline-joined.
    Failed(WebhookError),
}

impl PipelineDefinition {
    /// Execute this pipeline against an inbound request
    ///
    /// Receiving and transforming are strictly sequential. Dispatching
    /// invokes every dispatcher concurrently with the same final payload
    /// and only completes once all of them have returned - each result
    /// lands in its own slot, so no two dispatchers ever touch shared
    /// state.
    ///
    /// Partial dispatch success is not surfaced separately: one failing
    /// dispatcher fails the request even though the others may have
    /// delivered. Delivery here is deliberately best-effort, not atomic.
    ///
    /// The `cancel` token is handed to every component call; a cancelled
    /// in-flight dispatcher reports a cancellation-flavored error rather
    /// than being forcibly killed.
    pub async fn execute(
        &self,
        request: &InboundRequest,
        cancel: &CancellationToken,
    ) -> PipelineOutcome {
        let started = Instant::now();

        // Receiving
        let stage = Instant::now();
        let payload = match self.receiver().receive(request, cancel).await {
            Ok(Received::Payload(payload)) => payload,
            Ok(Received::Ignored) => {
                tracing::debug!(
                    endpoint = self.endpoint(),
                    receiver = self.receiver().name(),
                    "event intentionally ignored"
                );
                return PipelineOutcome::Ignored {
                    total: started.elapsed(),
                };
            }
            Err(err) => {
                tracing::debug!(
                    endpoint = self.endpoint(),
                    receiver = self.receiver().name(),
                    code = err.code,
                    error = %err,
                    "receive failed"
                );
                return PipelineOutcome::Failed(err);
            }
        };
        let receive = stage.elapsed();

        // Transforming - binding order, fail-fast
        let stage = Instant::now();
        let mut payload = payload;
        for step in self.transformations() {
            payload = match step.transform(payload, cancel).await {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::debug!(
                        endpoint = self.endpoint(),
                        transformation = step.name(),
                        code = err.code,
                        error = %err,
                        "transform failed"
                    );
                    return PipelineOutcome::Failed(err);
                }
            };
        }
        let transform = stage.elapsed();

        // Dispatching - concurrent fan-out with a join barrier; results
        // land in one slot per dispatcher position
        let stage = Instant::now();
        let results = join_all(
            self.dispatchers()
                .iter()
                .map(|d| d.dispatch(payload.clone(), cancel)),
        )
        .await;
        let dispatch = stage.elapsed();

        let mut failures = Vec::new();
        for (dispatcher, result) in self.dispatchers().iter().zip(results) {
            if let Err(err) = result {
                tracing::warn!(
                    endpoint = self.endpoint(),
                    dispatcher = dispatcher.name(),
                    code = err.code,
                    error = %err,
                    "dispatch failed"
                );
                failures.push(err.message);
            }
        }

        if !failures.is_empty() {
            return PipelineOutcome::Failed(WebhookError::internal(failures.join("\n")));
        }

        PipelineOutcome::Completed {
            payload,
            timings: Timings {
                receive,
                transform,
                dispatch,
                total: started.elapsed(),
            },
        }
    }
}
