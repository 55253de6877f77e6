//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `wirebox get <KEY>` | Compile a key and print it as JSON |
//! | `wirebox keys` | List stored keys in definition order |
//! | `wirebox classes` | List the classes the registry can build |

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use wirebox_domain::Value;
use wirebox_infrastructure::config::AppConfig;
use wirebox_infrastructure::{ConfigLoader, build_registry, init_container};

/// Command line interface for wirebox
#[derive(Parser, Debug)]
#[command(name = "wirebox")]
#[command(about = "wirebox - Inspect container definitions")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Definitions file (JSON or TOML), overrides `definitions.path`
    #[arg(short, long)]
    pub definitions: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compile a key and print its value as JSON
    Get {
        /// Key to resolve, e.g. `services.mailer`
        key: String,
    },
    /// List stored keys
    Keys,
    /// List registered classes
    Classes,
}

impl Cli {
    /// Load configuration from `--config` (or the default locations)
    /// and apply command line overrides
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }
        let mut config = loader.load().context("Failed to load configuration")?;
        if let Some(path) = &self.definitions {
            config.definitions.path = Some(path.clone());
        }
        Ok(config)
    }
}

/// Run `command` against a container built from `config`, returning the output
pub fn execute(command: &Command, config: &AppConfig) -> anyhow::Result<String> {
    match command {
        Command::Get { key } => {
            let container = init_container(config).context("Failed to build container")?;
            let value = container
                .get(key)
                .with_context(|| format!("Failed to resolve \"{key}\""))?;
            Ok(serde_json::to_string_pretty(&render(&value))?)
        }
        Command::Keys => {
            let container = init_container(config).context("Failed to build container")?;
            Ok(container.keys().join("\n"))
        }
        Command::Classes => {
            let registry = build_registry(&config.resolver).context("Failed to build registry")?;
            Ok(registry.list().join("\n"))
        }
    }
}

/// JSON view of a compiled value
///
/// Plain data maps one to one; constructed services, opaque values and
/// descriptors are summarized.
pub fn render(value: &Value) -> serde_json::Value {
    match value {
        Value::Array(items) => serde_json::Value::Array(items.iter().map(render).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.iter().map(|(k, v)| (k.clone(), render(v))).collect(),
        ),
        Value::Object(service) => json!({ "$object": service.class() }),
        Value::Opaque(_) => json!("$opaque"),
        Value::Service(descriptor) => json!({ "$service": descriptor.class_identifier() }),
        Value::Call(call) => json!({
            "$call": {
                "method": call.method_name(),
                "arguments": call.arguments().iter().map(render).collect::<Vec<_>>(),
            }
        }),
        Value::Listener(listener) => json!({
            "$listener": {
                "target": listener.target_key(),
                "method": listener.call().method_name(),
                "arguments": listener.call().arguments().iter().map(render).collect::<Vec<_>>(),
            }
        }),
        plain => plain.to_json().unwrap_or(serde_json::Value::Null),
    }
}
