//! Pipeline table construction errors

use hookd_registry::{ComponentKind, RegistryError};
use hookd_webhook::DescriptorError;
use thiserror::Error;

/// Result type for table construction
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur while building the pipeline table
///
/// All of these abort the whole build - no partial table is exposed.
#[derive(Debug, Error)]
pub enum TableError {
    /// The binding list is empty
    #[error("no webhooks defined")]
    NoWebhooksDefined,

    /// A binding is missing a required field
    ///
    /// Offsets are 1-based, matching the order bindings appear in the
    /// configuration file.
    #[error("missing {field} at offset {offset}")]
    MissingField {
        /// 1-based binding position
        offset: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// A binding references a component name that was never declared
    #[error("unknown {kind} name '{name}'")]
    UnknownComponentName {
        /// Component kind being resolved
        kind: ComponentKind,
        /// The unresolved name
        name: String,
    },

    /// A declared descriptor string does not parse
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Component construction failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Two bindings share an endpoint
    #[error("endpoint '{endpoint}' already configured")]
    DuplicateEndpoint {
        /// The conflicting endpoint
        endpoint: String,
    },

    /// A definition was constructed with an empty endpoint
    #[error("webhook endpoint must not be empty")]
    MissingEndpoint,

    /// A definition was constructed with no dispatchers
    #[error("webhook must have at least one dispatcher")]
    NoDispatchers,
}

impl TableError {
    /// Create a MissingField error
    pub fn missing_field(offset: usize, field: &'static str) -> Self {
        Self::MissingField { offset, field }
    }

    /// Create an UnknownComponentName error
    pub fn unknown_component(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self::UnknownComponentName {
            kind,
            name: name.into(),
        }
    }

    /// Create a DuplicateEndpoint error
    pub fn duplicate_endpoint(endpoint: impl Into<String>) -> Self {
        Self::DuplicateEndpoint {
            endpoint: endpoint.into(),
        }
    }
}
