//! GitHub commits transformation
//!
//! Reduces a GitHub push-event payload to the files it touched: one
//! `sha,path` CSV row per added, modified, or removed path, in commit
//! order. Downstream dispatchers get a small, line-oriented payload
//! instead of the full event JSON.

use std::fmt::Write as _;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use hookd_registry::{RegistryResult, TransformationFactory};
use hookd_webhook::{
    ComponentDescriptor, Transformation, WebhookError, WebhookResult,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "github_commits_test.rs"]
mod tests;

/// Transformation extracting `sha,path` rows from a push event
#[derive(Debug)]
pub struct GitHubCommitsTransformation;

impl GitHubCommitsTransformation {
    fn extract(payload: &[u8]) -> WebhookResult<String> {
        let event: Value = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::bad_request(format!("payload is not JSON: {e}")))?;

        let commits = event
            .get("commits")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                WebhookError::bad_request("payload is not a GitHub push event (no commits array)")
            })?;

        let mut out = String::new();

        for commit in commits {
            let sha = commit.get("id").and_then(Value::as_str).unwrap_or("");

            for field in ["added", "modified", "removed"] {
                let Some(paths) = commit.get(field).and_then(Value::as_array) else {
                    continue;
                };
                for path in paths.iter().filter_map(Value::as_str) {
                    // Infallible for String, but keeps the row atomic
                    let _ = writeln!(out, "{sha},{path}");
                }
            }
        }

        Ok(out)
    }
}

impl Transformation for GitHubCommitsTransformation {
    fn transform<'a>(
        &'a self,
        payload: Bytes,
        _cancel: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = WebhookResult<Bytes>> + Send + 'a>> {
        Box::pin(async move { Self::extract(&payload).map(Bytes::from) })
    }

    fn name(&self) -> &'static str {
        "github-commits"
    }
}

/// Factory for `github-commits://`
pub struct GitHubCommitsFactory;

impl TransformationFactory for GitHubCommitsFactory {
    fn create(
        &self,
        _descriptor: &ComponentDescriptor,
    ) -> RegistryResult<Box<dyn Transformation>> {
        Ok(Box::new(GitHubCommitsTransformation))
    }
}
