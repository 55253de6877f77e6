//! Deferred value

use crate::value::Value;

/// A raw value that has not been compiled yet
///
/// Exists only to tell "not yet compiled" apart from "compiled, and equal to
/// its raw form".
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredValue {
    raw: Value,
}

impl DeferredValue {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}
