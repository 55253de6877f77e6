//! # wirebox
//!
//! A dependency injection container keyed by flat strings. Parameters,
//! service definitions, aliases and listener groups live side by side; the
//! key prefix decides how each value is compiled on first access.
//!
//! ## Example
//!
//! ```
//! use wirebox::{Container, Value};
//!
//! let container = Container::default();
//! container.prepare(serde_json::json!({
//!     "parameters.host": "localhost",
//!     "parameters.port": 5432,
//!     "parameters.dsn": "postgres://%parameters.host%:%parameters.port%",
//!     "aliases.dsn": "parameters.dsn"
//! }))?;
//!
//! assert_eq!(container.get("aliases.dsn")?, Value::from("postgres://localhost:5432"));
//! # Ok::<(), wirebox::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - values, descriptors, errors and ports
//! - `application` - the container and the factory registry
//! - `infrastructure` - configuration, logging, emitters and definition files
//! - `cli` - the `wirebox` command

pub mod cli;

/// Domain layer - values, descriptors, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wirebox_domain::*;
}

/// Application layer - container and factory registry
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use wirebox_application::*;
}

/// Infrastructure layer - config, logging, emitters and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wirebox_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the container and registry at the crate root
pub use application::{Container, FactoryRegistry, SERVICE_FACTORIES, ServiceFactoryEntry};

// Re-export bootstrap entry points
pub use infrastructure::{AppConfig, ConfigLoader, LocalEmitter, init_container};
