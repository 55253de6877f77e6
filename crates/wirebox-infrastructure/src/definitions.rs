//! Definition files
//!
//! Reads container definitions from JSON or TOML and feeds them to
//! [`Container::prepare`]. Keys are the container's flat keys:
//!
//! ```toml
//! "parameters.host" = "localhost"
//!
//! ["services.mailer"]
//! class = "app.mail.Mailer"
//! arguments = ["%parameters.host%"]
//! ```
//!
//! Top-level `parameters`, `services`, `aliases` and `listeners` tables are
//! flattened one level, so the following is equivalent:
//!
//! ```toml
//! [parameters]
//! host = "localhost"
//!
//! [services.mailer]
//! class = "app.mail.Mailer"
//! arguments = ["%parameters.host%"]
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use wirebox_application::Container;
use wirebox_domain::{Error, Result, Value, ValueMap};

use crate::constants::{DEFINITION_SECTIONS, JSON_EXTENSION, TOML_EXTENSION};
use crate::error_ext::ErrorContext;

/// Serialization format of a definitions file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// JSON object
    Json,
    /// TOML document
    Toml,
}

impl DefinitionFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(JSON_EXTENSION) => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case(TOML_EXTENSION) => Ok(Self::Toml),
            _ => Err(Error::config(format!(
                "Cannot detect definition format of {}: use a .json or .toml file",
                path.display()
            ))),
        }
    }

    /// Parse definitions text into a flat map value
    pub fn parse(self, text: &str) -> Result<Value> {
        let raw: serde_json::Value = match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Toml => toml::from_str(text).context("Failed to parse TOML definitions")?,
        };
        flatten_sections(Value::from(raw))
    }
}

impl fmt::Display for DefinitionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str(JSON_EXTENSION),
            Self::Toml => f.write_str(TOML_EXTENSION),
        }
    }
}

/// Loader for a definitions file
#[derive(Debug, Clone)]
pub struct DefinitionLoader {
    path: PathBuf,
    format: DefinitionFormat,
}

impl DefinitionLoader {
    /// Create a loader for `path`, detecting the format from its extension
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = DefinitionFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    /// Override the detected format
    #[must_use]
    pub fn with_format(mut self, format: DefinitionFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DefinitionFormat {
        self.format
    }

    /// Read and parse the file
    pub fn read(&self) -> Result<Value> {
        let text = std::fs::read_to_string(&self.path)
            .io_context(format!("Failed to read definitions {}", self.path.display()))?;
        self.format.parse(&text)
    }

    /// Read the file and prepare every entry into `container`
    ///
    /// Returns the number of entries set.
    pub fn load_into(&self, container: &Container) -> Result<usize> {
        let definitions = self.read()?;
        let count = definitions.as_map().map_or(0, ValueMap::len);
        container.prepare(definitions)?;
        debug!(
            path = %self.path.display(),
            format = %self.format,
            entries = count,
            "definitions loaded"
        );
        Ok(count)
    }
}

/// Expand `{"parameters": {"a": 1}}` into `{"parameters.a": 1}`
///
/// Only the reserved section tables are expanded; other entries are kept as
/// written. The root must be a map.
fn flatten_sections(root: Value) -> Result<Value> {
    let entries = match root {
        Value::Map(entries) => entries,
        other => {
            return Err(Error::invalid_type(
                "definitions",
                "map",
                other.kind().as_str(),
            ));
        }
    };

    let mut flat = ValueMap::new();
    for (key, value) in entries {
        match value {
            Value::Map(section) if DEFINITION_SECTIONS.contains(&key.as_str()) => {
                for (name, entry) in section {
                    flat.insert(format!("{key}.{name}"), entry);
                }
            }
            value => {
                flat.insert(key, value);
            }
        }
    }
    Ok(Value::Map(flat))
}
