//! Registry error types

use thiserror::Error;

use crate::ComponentKind;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur when registering or building components
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No factory registered under this scheme for this kind
    #[error("unknown {kind} scheme '{scheme}'")]
    UnknownScheme {
        /// Component kind whose table was consulted
        kind: ComponentKind,
        /// The unresolved scheme
        scheme: String,
    },

    /// A factory is already registered under this (kind, scheme) pair
    #[error("{kind} scheme '{scheme}' already registered")]
    DuplicateScheme {
        /// Component kind whose table was being extended
        kind: ComponentKind,
        /// The conflicting scheme
        scheme: String,
    },

    /// The factory rejected the descriptor's parameters
    ///
    /// The message is the factory's own, passed through unchanged.
    #[error("invalid descriptor for scheme '{scheme}': {message}")]
    InvalidDescriptor {
        /// Scheme of the offending descriptor
        scheme: String,
        /// Factory-reported reason
        message: String,
    },
}

impl RegistryError {
    /// Create an UnknownScheme error
    pub fn unknown_scheme(kind: ComponentKind, scheme: impl Into<String>) -> Self {
        Self::UnknownScheme {
            kind,
            scheme: scheme.into(),
        }
    }

    /// Create a DuplicateScheme error
    pub fn duplicate_scheme(kind: ComponentKind, scheme: impl Into<String>) -> Self {
        Self::DuplicateScheme {
            kind,
            scheme: scheme.into(),
        }
    }

    /// Create an InvalidDescriptor error
    pub fn invalid_descriptor(scheme: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            scheme: scheme.into(),
            message: message.into(),
        }
    }
}
