//! Configuration management
//!
//! Layered configuration: built-in defaults, then a `wirebox.toml` file, then
//! `WIREBOX_*` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DefinitionsConfig, LoggingConfig, ResolverConfig};
