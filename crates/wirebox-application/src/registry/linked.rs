//! Link-time Factory Registration
//!
//! Crates contribute service factories with `#[linkme::distributed_slice]`;
//! [`FactoryRegistry::with_linked`](super::FactoryRegistry::with_linked)
//! collects them at runtime.
//!
//! ```ignore
//! use wirebox_application::registry::{SERVICE_FACTORIES, ServiceFactoryEntry};
//!
//! #[linkme::distributed_slice(SERVICE_FACTORIES)]
//! static MAILER: ServiceFactoryEntry = ServiceFactoryEntry {
//!     name: "app.mail.Mailer",
//!     description: "SMTP mailer",
//!     factory: |args| Ok(Box::new(Mailer::new(args))),
//! };
//! ```

use wirebox_domain::{Result, Service, Value};

/// Registry entry for a service factory
pub struct ServiceFactoryEntry {
    /// Class identifier the factory is registered under (e.g. "app.mail.Mailer")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function building an instance from constructor arguments
    pub factory: fn(Vec<Value>) -> Result<Box<dyn Service>>,
}

// Auto-collection via linkme distributed slices - factories submit entries at compile time
#[linkme::distributed_slice]
pub static SERVICE_FACTORIES: [ServiceFactoryEntry] = [..];

/// List all link-time factories
///
/// Returns `(name, description)` pairs, useful for CLI help.
pub fn list_linked_factories() -> Vec<(&'static str, &'static str)> {
    SERVICE_FACTORIES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
