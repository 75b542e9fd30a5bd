//! Tests for the pipeline executor

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use hookd_webhook::InboundRequest;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::definition::PipelineDefinition;
use crate::test_util::{
    AppendTransformation, CancelAwareDispatcher, CountingTransformation, EchoReceiver,
    FailingDispatcher, FailingReceiver, FailingTransformation, IgnoringReceiver,
    RecordingDispatcher, SlowDispatcher, UppercaseTransformation,
};

fn request(body: &'static [u8]) -> InboundRequest {
    InboundRequest::new("/hook", body)
}

fn recording(invoked: &Arc<AtomicUsize>) -> Box<RecordingDispatcher> {
    Box::new(RecordingDispatcher {
        invoked: Arc::clone(invoked),
    })
}

#[tokio::test]
async fn test_transformations_run_in_binding_order() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![
            Box::new(UppercaseTransformation),
            Box::new(AppendTransformation { suffix: "!" }),
        ],
        vec![recording(&invoked)],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b"hi"), &CancellationToken::new())
        .await;

    match outcome {
        PipelineOutcome::Completed { payload, timings } => {
            assert_eq!(&payload[..], b"HI!");
            assert!(timings.total >= timings.receive);
        }
        other => panic!("expected Completed, got {other:?}"),
    }
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_reversed_order_reverses_result() {
    // append then uppercase: the suffix gets uppercased too
    let invoked = Arc::new(AtomicUsize::new(0));
    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![
            Box::new(AppendTransformation { suffix: "x" }),
            Box::new(UppercaseTransformation),
        ],
        vec![recording(&invoked)],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b"hi"), &CancellationToken::new())
        .await;

    match outcome {
        PipelineOutcome::Completed { payload, .. } => assert_eq!(&payload[..], b"HIX"),
        other => panic!("expected Completed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transform_failure_short_circuits() {
    let failed = Arc::new(AtomicUsize::new(0));
    let later = Arc::new(AtomicUsize::new(0));
    let dispatched = Arc::new(AtomicUsize::new(0));

    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![
            Box::new(FailingTransformation {
                code: 422,
                message: "unparseable payload",
                invoked: Arc::clone(&failed),
            }),
            Box::new(CountingTransformation {
                invoked: Arc::clone(&later),
            }),
        ],
        vec![recording(&dispatched)],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b"hi"), &CancellationToken::new())
        .await;

    match outcome {
        PipelineOutcome::Failed(err) => {
            // Exactly the failing transformation's code and message
            assert_eq!(err.code, 422);
            assert_eq!(err.message, "unparseable payload");
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    assert_eq!(failed.load(Ordering::SeqCst), 1);
    assert_eq!(later.load(Ordering::SeqCst), 0, "later step must never run");
    assert_eq!(dispatched.load(Ordering::SeqCst), 0, "nothing may dispatch");
}

#[tokio::test]
async fn test_receive_failure_is_verbatim() {
    let dispatched = Arc::new(AtomicUsize::new(0));
    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(FailingReceiver {
            code: 401,
            message: "bad signature",
        }),
        vec![],
        vec![recording(&dispatched)],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b""), &CancellationToken::new())
        .await;

    match outcome {
        PipelineOutcome::Failed(err) => {
            assert_eq!(err.code, 401);
            assert_eq!(err.message, "bad signature");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(dispatched.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_ignored_event_skips_everything() {
    let transformed = Arc::new(AtomicUsize::new(0));
    let dispatched = Arc::new(AtomicUsize::new(0));

    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(IgnoringReceiver),
        vec![Box::new(CountingTransformation {
            invoked: Arc::clone(&transformed),
        })],
        vec![recording(&dispatched)],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b"ping"), &CancellationToken::new())
        .await;

    assert!(matches!(outcome, PipelineOutcome::Ignored { .. }));
    assert_eq!(transformed.load(Ordering::SeqCst), 0);
    assert_eq!(dispatched.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_one_failing_dispatcher_fails_the_request() {
    let a = Arc::new(AtomicUsize::new(0));
    let c = Arc::new(AtomicUsize::new(0));

    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![],
        vec![
            recording(&a),
            Box::new(FailingDispatcher {
                message: "target unreachable",
            }),
            recording(&c),
        ],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b"hi"), &CancellationToken::new())
        .await;

    match outcome {
        PipelineOutcome::Failed(err) => {
            assert_eq!(err.code, 500);
            assert!(err.message.contains("target unreachable"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    // The healthy dispatchers still ran - fan-out is not fail-fast
    assert_eq!(a.load(Ordering::SeqCst), 1);
    assert_eq!(c.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_multiple_failures_newline_joined_in_binding_order() {
    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![],
        vec![
            Box::new(FailingDispatcher { message: "first down" }),
            Box::new(FailingDispatcher { message: "second down" }),
        ],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b"hi"), &CancellationToken::new())
        .await;

    match outcome {
        PipelineOutcome::Failed(err) => {
            assert_eq!(err.message, "first down\nsecond down");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_waits_for_slowest_dispatcher() {
    let completed = Arc::new(AtomicBool::new(false));
    let fast_a = Arc::new(AtomicUsize::new(0));
    let fast_b = Arc::new(AtomicUsize::new(0));
    let delay = Duration::from_millis(50);

    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![],
        vec![
            recording(&fast_a),
            recording(&fast_b),
            Box::new(SlowDispatcher {
                delay,
                completed: Arc::clone(&completed),
            }),
        ],
    )
    .unwrap();

    let started = Instant::now();
    let outcome = definition
        .execute(&request(b"hi"), &CancellationToken::new())
        .await;

    // The outcome only exists after the slow dispatcher has finished
    assert!(matches!(outcome, PipelineOutcome::Completed { .. }));
    assert!(completed.load(Ordering::SeqCst));
    assert!(started.elapsed() >= delay);
    assert_eq!(fast_a.load(Ordering::SeqCst), 1);
    assert_eq!(fast_b.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dispatch_timing_recorded() {
    let completed = Arc::new(AtomicBool::new(false));
    let delay = Duration::from_millis(20);

    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![],
        vec![Box::new(SlowDispatcher {
            delay,
            completed,
        })],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b"hi"), &CancellationToken::new())
        .await;

    match outcome {
        PipelineOutcome::Completed { timings, .. } => {
            assert!(timings.dispatch >= delay);
            assert!(timings.total >= timings.dispatch);
        }
        other => panic!("expected Completed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancellation_reaches_in_flight_dispatchers() {
    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![],
        vec![Box::new(CancelAwareDispatcher)],
    )
    .unwrap();

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        canceller.cancel();
    });

    let outcome = definition.execute(&request(b"hi"), &cancel).await;

    match outcome {
        PipelineOutcome::Failed(err) => {
            assert!(err.message.contains("cancelled"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_payload_still_dispatches() {
    // An empty post-transform payload is not short-circuited; the
    // dispatchers decide what it means
    let dispatched = Arc::new(AtomicUsize::new(0));
    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![],
        vec![recording(&dispatched)],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b""), &CancellationToken::new())
        .await;

    match outcome {
        PipelineOutcome::Completed { payload, .. } => assert!(payload.is_empty()),
        other => panic!("expected Completed, got {other:?}"),
    }
    assert_eq!(dispatched.load(Ordering::SeqCst), 1);
}

#[test]
fn test_definition_invariants() {
    let err = PipelineDefinition::new(
        "",
        Box::new(EchoReceiver),
        vec![],
        vec![Box::new(FailingDispatcher { message: "x" })],
    )
    .unwrap_err();
    assert!(matches!(err, crate::TableError::MissingEndpoint));

    let err = PipelineDefinition::new("/hook", Box::new(EchoReceiver), vec![], vec![]).unwrap_err();
    assert!(matches!(err, crate::TableError::NoDispatchers));
}

#[tokio::test]
async fn test_payload_shared_across_dispatchers() {
    // All dispatchers observe the same final payload
    use std::sync::Mutex;

    #[derive(Debug)]
    struct CapturingDispatcher {
        seen: Arc<Mutex<Vec<Bytes>>>,
    }

    impl hookd_webhook::Dispatcher for CapturingDispatcher {
        fn dispatch<'a>(
            &'a self,
            payload: Bytes,
            _cancel: &'a CancellationToken,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = hookd_webhook::WebhookResult<()>> + Send + 'a>,
        > {
            Box::pin(async move {
                self.seen.lock().unwrap().push(payload);
                Ok(())
            })
        }

        fn name(&self) -> &'static str {
            "capturing"
        }
    }

    let seen = Arc::new(Mutex::new(Vec::new()));
    let definition = PipelineDefinition::new(
        "/hook",
        Box::new(EchoReceiver),
        vec![Box::new(UppercaseTransformation)],
        vec![
            Box::new(CapturingDispatcher { seen: Arc::clone(&seen) }),
            Box::new(CapturingDispatcher { seen: Arc::clone(&seen) }),
        ],
    )
    .unwrap();

    let outcome = definition
        .execute(&request(b"hello"), &CancellationToken::new())
        .await;
    assert!(matches!(outcome, PipelineOutcome::Completed { .. }));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|p| &p[..] == b"HELLO"));
}
