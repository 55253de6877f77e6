//! `%key%` interpolation
//!
//! A string that is exactly one reference (`%parameters.port%`) is replaced by
//! the referenced value with its kind preserved; `%?key%` yields null when the
//! key is absent. References embedded in longer text are stringified.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;
use wirebox_domain::constants::{OPTIONAL_REFERENCE_MARKER, REFERENCE_DELIMITER};
use wirebox_domain::{Error, Result, Value};

use super::Container;

static FULL_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%([^%\s]+)%$").expect("Invalid regex"));

static EMBEDDED_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([^%\s]+)%").expect("Invalid regex"));

impl Container {
    /// Resolve the references held in `text`
    pub(crate) fn replace_keys(&self, text: &str) -> Result<Value> {
        if !text.contains(REFERENCE_DELIMITER) {
            return Ok(Value::from(text));
        }

        if let Some(name) = FULL_REFERENCE.captures(text).and_then(|c| c.get(1)) {
            let name = name.as_str();
            trace!(reference = %name, "full reference");
            if let Some(optional) = name.strip_prefix(OPTIONAL_REFERENCE_MARKER) {
                if !self.has(optional) {
                    return Ok(Value::Null);
                }
                return self.get(optional);
            }
            return self.get(name);
        }

        let mut resolved: HashMap<&str, String> = HashMap::new();
        for captures in EMBEDDED_REFERENCE.captures_iter(text) {
            let Some(name) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if resolved.contains_key(name) {
                continue;
            }
            let value = self.get(name)?;
            let replacement = value
                .to_text()
                .ok_or_else(|| Error::replace_value_invalid_type(name, value.kind().as_str()))?;
            trace!(reference = %name, "embedded reference");
            resolved.insert(name, replacement);
        }

        if resolved.is_empty() {
            return Ok(Value::from(text));
        }
        let replaced = EMBEDDED_REFERENCE.replace_all(text, |captures: &Captures<'_>| {
            captures
                .get(1)
                .and_then(|name| resolved.get(name.as_str()))
                .cloned()
                .unwrap_or_else(|| captures[0].to_string())
        });
        Ok(Value::from(replaced.into_owned()))
    }

    /// Interpolate every string inside plain arrays and maps
    ///
    /// Map keys stay as written; non-plain values pass through.
    pub(crate) fn replace_keys_recursive(&self, value: Value) -> Result<Value> {
        match value {
            Value::String(text) => self.replace_keys(&text),
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.replace_keys_recursive(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Map(entries) => entries
                .into_iter()
                .map(|(key, item)| Ok((key, self.replace_keys_recursive(item)?)))
                .collect::<Result<_>>()
                .map(Value::Map),
            other => Ok(other),
        }
    }
}
