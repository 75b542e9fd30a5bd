//! Pipeline table - endpoint → definition lookup
//!
//! The table is compiled once at startup from configuration and never
//! mutated, so per-request lookups need no locking. Construction is
//! strictly sequential and all-or-nothing: the first failing binding
//! aborts the whole build.

use std::collections::HashMap;

use hookd_config::Config;
use hookd_registry::{ComponentKind, ComponentRegistry};
use hookd_webhook::{ComponentDescriptor, Dispatcher, Receiver, Transformation};

use crate::definition::PipelineDefinition;
use crate::error::{TableError, TableResult};

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;

/// Immutable mapping from endpoint path to pipeline definition
pub struct PipelineTable {
    webhooks: HashMap<String, PipelineDefinition>,
}

impl std::fmt::Debug for PipelineTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineTable")
            .field("webhooks", &self.webhooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PipelineTable {
    /// Build the table from configuration through a component registry
    ///
    /// Bindings are processed in configuration order. For each binding:
    /// required fields are checked, referenced names are resolved against
    /// the named descriptor tables, components are built through the
    /// registry, and the assembled definition is inserted under its
    /// endpoint.
    ///
    /// # Errors
    ///
    /// - [`TableError::NoWebhooksDefined`] if the binding list is empty
    /// - [`TableError::MissingField`] for an empty endpoint, receiver
    ///   name, or dispatcher list (1-based offset)
    /// - [`TableError::UnknownComponentName`] if a referenced name was
    ///   never declared
    /// - descriptor parse and registry build failures, propagated
    ///   unchanged
    /// - [`TableError::DuplicateEndpoint`] if two bindings share a path
    pub fn from_config(config: &Config, registry: &ComponentRegistry) -> TableResult<Self> {
        if config.webhooks.is_empty() {
            return Err(TableError::NoWebhooksDefined);
        }

        let mut webhooks = HashMap::with_capacity(config.webhooks.len());

        for (i, binding) in config.webhooks.iter().enumerate() {
            let offset = i + 1;

            if binding.endpoint.is_empty() {
                return Err(TableError::missing_field(offset, "endpoint"));
            }

            if binding.receiver.is_empty() {
                return Err(TableError::missing_field(offset, "receiver"));
            }

            if binding.dispatchers.is_empty() {
                return Err(TableError::missing_field(offset, "dispatchers"));
            }

            let receiver = build_receiver(config, registry, &binding.receiver)?;

            let mut transformations: Vec<Box<dyn Transformation>> =
                Vec::with_capacity(binding.transformations.len());
            for name in &binding.transformations {
                transformations.push(build_transformation(config, registry, name)?);
            }

            let mut dispatchers: Vec<Box<dyn Dispatcher>> =
                Vec::with_capacity(binding.dispatchers.len());
            for name in &binding.dispatchers {
                dispatchers.push(build_dispatcher(config, registry, name)?);
            }

            let definition = PipelineDefinition::new(
                binding.endpoint.clone(),
                receiver,
                transformations,
                dispatchers,
            )?;

            if webhooks.contains_key(definition.endpoint()) {
                return Err(TableError::duplicate_endpoint(definition.endpoint()));
            }

            tracing::debug!(
                endpoint = definition.endpoint(),
                receiver = definition.receiver().name(),
                transformations = definition.transformations().len(),
                dispatchers = definition.dispatchers().len(),
                "webhook configured"
            );

            webhooks.insert(definition.endpoint().to_string(), definition);
        }

        Ok(Self { webhooks })
    }

    /// Look up a definition by exact endpoint path
    pub fn get(&self, endpoint: &str) -> Option<&PipelineDefinition> {
        self.webhooks.get(endpoint)
    }

    /// Number of configured webhooks
    pub fn len(&self) -> usize {
        self.webhooks.len()
    }

    /// Whether the table is empty
    ///
    /// Only reachable in tests - `from_config` rejects empty binding
    /// lists.
    pub fn is_empty(&self) -> bool {
        self.webhooks.is_empty()
    }

    /// Configured endpoint paths, sorted for stable output
    pub fn endpoints(&self) -> Vec<&str> {
        let mut endpoints: Vec<&str> = self.webhooks.keys().map(String::as_str).collect();
        endpoints.sort_unstable();
        endpoints
    }
}

fn build_receiver(
    config: &Config,
    registry: &ComponentRegistry,
    name: &str,
) -> TableResult<Box<dyn Receiver>> {
    let descriptor = config
        .receiver_descriptor(name)
        .ok_or_else(|| TableError::unknown_component(ComponentKind::Receiver, name))?;
    let descriptor = ComponentDescriptor::parse(descriptor)?;
    Ok(registry.build_receiver(&descriptor)?)
}

fn build_transformation(
    config: &Config,
    registry: &ComponentRegistry,
    name: &str,
) -> TableResult<Box<dyn Transformation>> {
    let descriptor = config
        .transformation_descriptor(name)
        .ok_or_else(|| TableError::unknown_component(ComponentKind::Transformation, name))?;
    let descriptor = ComponentDescriptor::parse(descriptor)?;
    Ok(registry.build_transformation(&descriptor)?)
}

fn build_dispatcher(
    config: &Config,
    registry: &ComponentRegistry,
    name: &str,
) -> TableResult<Box<dyn Dispatcher>> {
    let descriptor = config
        .dispatcher_descriptor(name)
        .ok_or_else(|| TableError::unknown_component(ComponentKind::Dispatcher, name))?;
    let descriptor = ComponentDescriptor::parse(descriptor)?;
    Ok(registry.build_dispatcher(&descriptor)?)
}
