//! Pipeline definition
//!
//! An immutable binding of one endpoint to its constructed components.
//! Definitions exclusively own their components: even when two endpoints
//! are configured with textually identical descriptors, each gets freshly
//! built instances.

use hookd_webhook::{Dispatcher, Receiver, Transformation};

use crate::error::{TableError, TableResult};

/// One endpoint's receiver, transformations, and dispatchers
pub struct PipelineDefinition {
    endpoint: String,
    receiver: Box<dyn Receiver>,
    transformations: Vec<Box<dyn Transformation>>,
    dispatchers: Vec<Box<dyn Dispatcher>>,
}

impl PipelineDefinition {
    /// Create a definition, enforcing its invariants
    ///
    /// # Errors
    ///
    /// - [`TableError::MissingEndpoint`] if `endpoint` is empty
    /// - [`TableError::NoDispatchers`] if `dispatchers` is empty
    ///
    /// An empty transformation list is fine - the payload passes through
    /// unchanged.
    pub fn new(
        endpoint: impl Into<String>,
        receiver: Box<dyn Receiver>,
        transformations: Vec<Box<dyn Transformation>>,
        dispatchers: Vec<Box<dyn Dispatcher>>,
    ) -> TableResult<Self> {
        let endpoint = endpoint.into();

        if endpoint.is_empty() {
            return Err(TableError::MissingEndpoint);
        }

        if dispatchers.is_empty() {
            return Err(TableError::NoDispatchers);
        }

        Ok(Self {
            endpoint,
            receiver,
            transformations,
            dispatchers,
        })
    }

    /// The endpoint path this definition is bound to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The bound receiver
    pub fn receiver(&self) -> &dyn Receiver {
        self.receiver.as_ref()
    }

    /// The bound transformations, in execution order
    pub fn transformations(&self) -> &[Box<dyn Transformation>] {
        &self.transformations
    }

    /// The bound dispatchers
    pub fn dispatchers(&self) -> &[Box<dyn Dispatcher>] {
        &self.dispatchers
    }
}

impl std::fmt::Debug for PipelineDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineDefinition")
            .field("endpoint", &self.endpoint)
            .field("receiver", &self.receiver.name())
            .field(
                "transformations",
                &self
                    .transformations
                    .iter()
                    .map(|t| t.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "dispatchers",
                &self.dispatchers.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
