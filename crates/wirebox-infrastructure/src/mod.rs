//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the container.
//!
//! ## Module Categories
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/env configuration with figment |
//! | [`constants`] | Centralized infrastructure constants |
//! | [`bootstrap`] | Builds a configured container |
//! | [`definitions`] | JSON/TOML definition files |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Events
//! | Module | Description |
//! |--------|-------------|
//! | [`emitter`] | In-process event emitter |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod definitions;
pub mod emitter;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{build_registry, init_container};
pub use config::{AppConfig, ConfigLoader};
pub use definitions::{DefinitionFormat, DefinitionLoader};
pub use emitter::LocalEmitter;
pub use error_ext::ErrorContext;
