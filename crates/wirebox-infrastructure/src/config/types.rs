//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wirebox_application::registry::DIRECT_LOOKUP_EXTENSIONS;

use crate::constants::DEFAULT_LOG_LEVEL;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Class resolution configuration
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Definition file configuration
    #[serde(default)]
    pub definitions: DefinitionsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Include source file and line in every event
    pub with_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            with_location: false,
        }
    }
}

/// Class resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Extensions whose class identifiers are looked up as a single segment
    pub direct_extensions: Vec<String>,

    /// Register factories contributed at link time
    pub link_factories: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            direct_extensions: DIRECT_LOOKUP_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            link_factories: true,
        }
    }
}

/// Definition file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionsConfig {
    /// JSON or TOML file prepared into the container at startup
    pub path: Option<PathBuf>,
}
