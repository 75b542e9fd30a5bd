//! Webhook request handler
//!
//! One fallback handler serves every configured endpoint: paths are
//! matched exactly against the pipeline table, not against axum routes,
//! so adding a webhook never touches the router.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use hookd_pipeline::{PipelineOutcome, PipelineTable, Timings};
use hookd_webhook::{InboundRequest, WebhookError};
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "handler_test.rs"]
mod tests;

/// Timing response headers, one per pipeline stage plus the total
const TIME_TO_RECEIVE: &str = "x-hookd-time-to-receive";
const TIME_TO_TRANSFORM: &str = "x-hookd-time-to-transform";
const TIME_TO_DISPATCH: &str = "x-hookd-time-to-dispatch";
const TIME_TO_PROCESS: &str = "x-hookd-time-to-process";

/// Shared state for the webhook handler
pub(crate) struct AppState {
    pub table: Arc<PipelineTable>,
    pub allow_debug: bool,
    pub max_payload_size: usize,
    pub shutdown: CancellationToken,
}

/// Build the axum router
pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    Router::new().fallback(handle_webhook).with_state(state)
}

/// Handle one webhook delivery
async fn handle_webhook(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();

    // Unknown endpoint: answer before reading the body or touching any
    // component
    if state.table.get(&path).is_none() {
        return (StatusCode::NOT_FOUND, "404 Not found\n").into_response();
    }

    let query: HashMap<String, String> = parts
        .uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();

    let body = match axum::body::to_bytes(body, state.max_payload_size).await {
        Ok(body) => body,
        Err(_) => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("payload exceeds {} bytes\n", state.max_payload_size),
            )
                .into_response();
        }
    };

    let debug_requested = query.get("debug").is_some_and(|v| !v.is_empty());

    let inbound = InboundRequest {
        path,
        query,
        headers: parts.headers,
        body,
    };

    // Request-scoped cancellation: a daemon shutdown cancels the child
    // token, and dropping the guard (client disconnect drops this handler
    // future) cancels it too. The execution itself runs in a spawned task
    // so in-flight dispatchers observe cancellation and return, instead
    // of being dropped mid-send.
    let token = state.shutdown.child_token();
    let guard = token.clone().drop_guard();

    let table = Arc::clone(&state.table);
    let execution = tokio::spawn(async move {
        match table.get(&inbound.path) {
            Some(definition) => definition.execute(&inbound, &token).await,
            // Presence was checked before the spawn; the table is immutable
            None => PipelineOutcome::Failed(WebhookError::new(404, "404 Not found")),
        }
    });

    let outcome = match execution.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "pipeline execution task failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "internal error\n").into_response();
        }
    };
    drop(guard);

    render_outcome(outcome, state.allow_debug && debug_requested)
}

/// Translate a pipeline outcome into an HTTP response
fn render_outcome(outcome: PipelineOutcome, echo_payload: bool) -> Response {
    match outcome {
        PipelineOutcome::Completed { payload, timings } => {
            let mut response = if echo_payload {
                let mut response = Response::new(Body::from(payload));
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain"),
                );
                response.headers_mut().insert(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                );
                response
            } else {
                Response::new(Body::empty())
            };

            set_timing_headers(&mut response, &timings);
            response
        }

        PipelineOutcome::Ignored { total } => {
            let mut response = Response::new(Body::empty());
            insert_duration(&mut response, TIME_TO_PROCESS, total);
            response
        }

        PipelineOutcome::Failed(err) => {
            let status =
                StatusCode::from_u16(err.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, format!("{}\n", err.message)).into_response()
        }
    }
}

fn set_timing_headers(response: &mut Response, timings: &Timings) {
    insert_duration(response, TIME_TO_RECEIVE, timings.receive);
    insert_duration(response, TIME_TO_TRANSFORM, timings.transform);
    insert_duration(response, TIME_TO_DISPATCH, timings.dispatch);
    insert_duration(response, TIME_TO_PROCESS, timings.total);
}

fn insert_duration(response: &mut Response, name: &'static str, value: std::time::Duration) {
    if let Ok(value) = HeaderValue::from_str(&format!("{value:?}")) {
        response.headers_mut().insert(name, value);
    }
}
