//! hookd - Component Registry
//!
//! The registry maps descriptor schemes to factory functions, enabling
//! configuration-driven component instantiation. One table per component
//! kind: receivers, transformations, dispatchers.
//!
//! # Design
//!
//! - **Compile-time extensibility**: implement a factory trait, register
//!   it under a scheme, and the component becomes expressible purely in
//!   configuration - the pipeline table and executor never change.
//! - **No global state**: the registry is a value passed explicitly into
//!   table construction, so tests can inject stub components.
//! - **Fresh instances**: `build_*` invokes the factory every time; two
//!   builds from the same descriptor yield independent instances.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = ComponentRegistry::new();
//! registry.register_receiver("insecure", InsecureReceiverFactory)?;
//!
//! // From config
//! let descriptor = ComponentDescriptor::parse("insecure://")?;
//! let receiver = registry.build_receiver(&descriptor)?;
//! ```

mod error;
mod registry;

pub use error::{RegistryError, RegistryResult};
pub use registry::{
    ComponentRegistry, DispatcherFactory, ReceiverFactory, TransformationFactory,
};

/// The three component kinds a registry can build
///
/// Used in error reporting so "unknown scheme 'github'" says which table
/// was consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Receiver,
    Transformation,
    Dispatcher,
}

impl ComponentKind {
    /// Lowercase label for messages and logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Receiver => "receiver",
            Self::Transformation => "transformation",
            Self::Dispatcher => "dispatcher",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
