//! Container Bootstrap
//!
//! Composition root: turns an [`AppConfig`] into a ready container.
//!
//! ```text
//! AppConfig → ResolverConfig → FactoryRegistry ─┐
//!                                 ↑             ├→ Container
//!                              linkme           │
//!           DefinitionsConfig → DefinitionLoader┘
//! ```

use tracing::info;
use wirebox_application::{Container, FactoryRegistry};
use wirebox_domain::Result;

use crate::config::{AppConfig, ResolverConfig};
use crate::definitions::DefinitionLoader;

/// Build the factory registry described by the resolver configuration
pub fn build_registry(config: &ResolverConfig) -> Result<FactoryRegistry> {
    let mut registry =
        FactoryRegistry::new().with_direct_extensions(config.direct_extensions.iter().cloned());
    if config.link_factories {
        registry.register_linked()?;
    }
    Ok(registry)
}

/// Create a container and prepare the configured definitions file into it
pub fn init_container(config: &AppConfig) -> Result<Container> {
    let registry = build_registry(&config.resolver)?;
    let classes = registry.list().len();
    let container = Container::with_registry(registry);

    let entries = match &config.definitions.path {
        Some(path) => DefinitionLoader::new(path)?.load_into(&container)?,
        None => 0,
    };

    info!(classes, entries, "container initialized");
    Ok(container)
}
