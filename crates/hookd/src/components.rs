//! Built-in component wiring
//!
//! Every built-in receiver, transformation, and dispatcher registered
//! under its scheme. Adding a component means adding one line here -
//! the pipeline table and executor never change.

use hookd_dispatchers::{HttpDispatcherFactory, LogDispatcherFactory, NullDispatcherFactory};
use hookd_receivers::{GitHubReceiverFactory, InsecureReceiverFactory};
use hookd_registry::{ComponentRegistry, RegistryResult};
use hookd_transformations::{GitHubCommitsFactory, NullTransformationFactory};

/// Registry with all built-in components registered
pub fn default_registry() -> RegistryResult<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();

    registry.register_receiver("insecure", InsecureReceiverFactory)?;
    registry.register_receiver("github", GitHubReceiverFactory)?;

    registry.register_transformation("null", NullTransformationFactory)?;
    registry.register_transformation("github-commits", GitHubCommitsFactory)?;

    registry.register_dispatcher("log", LogDispatcherFactory)?;
    registry.register_dispatcher("null", NullDispatcherFactory)?;
    registry.register_dispatcher("http", HttpDispatcherFactory)?;
    registry.register_dispatcher("https", HttpDispatcherFactory)?;

    Ok(registry)
}
