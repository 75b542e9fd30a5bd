//! Component registry - scheme → factory tables
//!
//! Populated once at process start, read-only afterwards. Each component
//! kind has its own table, so a receiver and a dispatcher may share a
//! scheme name (e.g. `null`) without colliding.

use std::collections::HashMap;

use hookd_webhook::{ComponentDescriptor, Dispatcher, Receiver, Transformation};

use crate::error::{RegistryError, RegistryResult};
use crate::ComponentKind;

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;

/// Factory trait for creating receivers
pub trait ReceiverFactory: Send + Sync {
    /// Create a receiver instance from a descriptor
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidDescriptor`] if the descriptor's
    /// parameters are invalid for this factory.
    fn create(&self, descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Receiver>>;
}

/// Factory trait for creating transformations
pub trait TransformationFactory: Send + Sync {
    /// Create a transformation instance from a descriptor
    fn create(&self, descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Transformation>>;
}

/// Factory trait for creating dispatchers
pub trait DispatcherFactory: Send + Sync {
    /// Create a dispatcher instance from a descriptor
    fn create(&self, descriptor: &ComponentDescriptor) -> RegistryResult<Box<dyn Dispatcher>>;
}

/// Registry of component factories, one table per kind
///
/// # Example
///
/// ```ignore
/// let mut registry = ComponentRegistry::new();
/// registry.register_dispatcher("log", LogDispatcherFactory)?;
///
/// let descriptor = ComponentDescriptor::parse("log://")?;
/// let dispatcher = registry.build_dispatcher(&descriptor)?;
/// ```
#[derive(Default)]
pub struct ComponentRegistry {
    receivers: HashMap<String, Box<dyn ReceiverFactory>>,
    transformations: HashMap<String, Box<dyn TransformationFactory>>,
    dispatchers: HashMap<String, Box<dyn DispatcherFactory>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a receiver factory under a scheme
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateScheme`] if the scheme is already
    /// taken in the receiver table.
    pub fn register_receiver<F: ReceiverFactory + 'static>(
        &mut self,
        scheme: &str,
        factory: F,
    ) -> RegistryResult<()> {
        if self.receivers.contains_key(scheme) {
            return Err(RegistryError::duplicate_scheme(
                ComponentKind::Receiver,
                scheme,
            ));
        }
        self.receivers.insert(scheme.to_string(), Box::new(factory));
        Ok(())
    }

    /// Register a transformation factory under a scheme
    pub fn register_transformation<F: TransformationFactory + 'static>(
        &mut self,
        scheme: &str,
        factory: F,
    ) -> RegistryResult<()> {
        if self.transformations.contains_key(scheme) {
            return Err(RegistryError::duplicate_scheme(
                ComponentKind::Transformation,
                scheme,
            ));
        }
        self.transformations
            .insert(scheme.to_string(), Box::new(factory));
        Ok(())
    }

    /// Register a dispatcher factory under a scheme
    pub fn register_dispatcher<F: DispatcherFactory + 'static>(
        &mut self,
        scheme: &str,
        factory: F,
    ) -> RegistryResult<()> {
        if self.dispatchers.contains_key(scheme) {
            return Err(RegistryError::duplicate_scheme(
                ComponentKind::Dispatcher,
                scheme,
            ));
        }
        self.dispatchers
            .insert(scheme.to_string(), Box::new(factory));
        Ok(())
    }

    /// Build a receiver from a descriptor
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownScheme`] if no receiver factory is
    ///   registered under the descriptor's scheme
    /// - [`RegistryError::InvalidDescriptor`] if the factory rejects the
    ///   descriptor's parameters (the factory's message passes through
    ///   unchanged)
    pub fn build_receiver(
        &self,
        descriptor: &ComponentDescriptor,
    ) -> RegistryResult<Box<dyn Receiver>> {
        let factory = self.receivers.get(descriptor.scheme()).ok_or_else(|| {
            RegistryError::unknown_scheme(ComponentKind::Receiver, descriptor.scheme())
        })?;
        factory.create(descriptor)
    }

    /// Build a transformation from a descriptor
    pub fn build_transformation(
        &self,
        descriptor: &ComponentDescriptor,
    ) -> RegistryResult<Box<dyn Transformation>> {
        let factory = self
            .transformations
            .get(descriptor.scheme())
            .ok_or_else(|| {
                RegistryError::unknown_scheme(ComponentKind::Transformation, descriptor.scheme())
            })?;
        factory.create(descriptor)
    }

    /// Build a dispatcher from a descriptor
    pub fn build_dispatcher(
        &self,
        descriptor: &ComponentDescriptor,
    ) -> RegistryResult<Box<dyn Dispatcher>> {
        let factory = self.dispatchers.get(descriptor.scheme()).ok_or_else(|| {
            RegistryError::unknown_scheme(ComponentKind::Dispatcher, descriptor.scheme())
        })?;
        factory.create(descriptor)
    }

    /// Check if a scheme is registered for a kind
    pub fn contains(&self, kind: ComponentKind, scheme: &str) -> bool {
        match kind {
            ComponentKind::Receiver => self.receivers.contains_key(scheme),
            ComponentKind::Transformation => self.transformations.contains_key(scheme),
            ComponentKind::Dispatcher => self.dispatchers.contains_key(scheme),
        }
    }

    /// Registered schemes for a kind, sorted for stable output
    pub fn schemes(&self, kind: ComponentKind) -> Vec<&str> {
        let mut schemes: Vec<&str> = match kind {
            ComponentKind::Receiver => self.receivers.keys().map(String::as_str).collect(),
            ComponentKind::Transformation => {
                self.transformations.keys().map(String::as_str).collect()
            }
            ComponentKind::Dispatcher => self.dispatchers.keys().map(String::as_str).collect(),
        };
        schemes.sort_unstable();
        schemes
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("receivers", &self.schemes(ComponentKind::Receiver))
            .field("transformations", &self.schemes(ComponentKind::Transformation))
            .field("dispatchers", &self.schemes(ComponentKind::Dispatcher))
            .finish()
    }
}
