//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Key prefixes and interpolation markers are defined in
//! `wirebox_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wirebox.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wirebox";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "WIREBOX";

/// Separator between nested keys in environment variables (`WIREBOX_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "WIREBOX_LOG";

// ============================================================================
// DEFINITION FILE CONSTANTS
// ============================================================================

/// Extension of JSON definition files
pub const JSON_EXTENSION: &str = "json";

/// Extension of TOML definition files
pub const TOML_EXTENSION: &str = "toml";

/// Top-level tables of a definitions file that are flattened into prefixed keys
pub const DEFINITION_SECTIONS: &[&str] = &["parameters", "services", "aliases", "listeners"];
