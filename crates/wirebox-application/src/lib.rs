//! # Application Layer
//!
//! The resolution engine. [`Container`] stores parameters, aliases, listener
//! groups and service definitions under flat string keys and compiles them
//! lazily on first access. [`FactoryRegistry`] maps class identifiers to
//! factories so the container can construct services.
//!
//! ```ignore
//! use std::sync::Arc;
//! use wirebox_application::{Container, FactoryRegistry};
//!
//! let mut registry = FactoryRegistry::new();
//! registry.register_type("app.Greeter", |args| Ok(Greeter::new(args)))?;
//!
//! let container = Container::with_registry(registry);
//! container
//!     .set("parameters.name", "world")?
//!     .set("services.greeter", serde_json::json!({
//!         "class": "app.Greeter",
//!         "arguments": ["hello %parameters.name%"]
//!     }))?;
//! let greeter = container.get("services.greeter")?;
//! ```

pub mod container;
pub mod registry;

pub use container::Container;
pub use registry::{FactoryRegistry, SERVICE_FACTORIES, ServiceFactoryEntry, list_linked_factories};
