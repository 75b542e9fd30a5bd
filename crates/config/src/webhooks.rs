//! Webhook binding configuration
//!
//! A binding ties one endpoint to one receiver, an ordered list of
//! transformations, and a set of dispatchers - all referenced by the names
//! they were declared under.

use serde::Deserialize;

/// One webhook binding
///
/// Field-presence validation (non-empty endpoint, receiver, dispatchers)
/// happens at pipeline-table construction, not at parse time, so a config
/// file can be linted as TOML without a registry in hand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookBinding {
    /// Endpoint path this webhook is served on (e.g. `/github-test`)
    #[serde(default)]
    pub endpoint: String,

    /// Name of the receiver to parse inbound requests with
    #[serde(default)]
    pub receiver: String,

    /// Names of transformations, applied in this order
    #[serde(default)]
    pub transformations: Vec<String>,

    /// Names of dispatchers, all invoked concurrently
    #[serde(default)]
    pub dispatchers: Vec<String>,
}
