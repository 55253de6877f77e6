//! Listener binding descriptor

use crate::descriptors::call::CallDescriptor;
use crate::error::{Error, Result};
use crate::value::Value;

/// "When this event fires, invoke this call on the service at this key"
#[derive(Debug, Clone, PartialEq)]
pub struct ListenerDescriptor {
    target_key: String,
    call: CallDescriptor,
}

impl ListenerDescriptor {
    pub fn new(target_key: impl Into<String>, call: CallDescriptor) -> Self {
        Self {
            target_key: target_key.into(),
            call,
        }
    }

    /// Bind `method(arguments)` on the service stored at `target_key`
    pub fn with_method(
        target_key: impl Into<String>,
        method: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Result<Self> {
        Ok(Self::new(target_key, CallDescriptor::new(method, arguments)?))
    }

    pub fn target_key(&self) -> &str {
        &self.target_key
    }

    pub fn call(&self) -> &CallDescriptor {
        &self.call
    }

    /// Build a listener from a declarative `[method, arguments]` tuple
    ///
    /// `method` is either a method name or a [`Value::Call`]; in the latter
    /// case the call's own arguments are used and the second element only
    /// has to be an array.
    pub fn from_tuple(target_key: impl Into<String>, tuple: &Value) -> Result<Self> {
        Ok(Self::new(target_key, call_from_tuple(tuple)?))
    }

    /// Normalize declarative listener input
    ///
    /// Accepts a single listener, a map `{ "<target key>": [method, args] }`
    /// or a sequence `[["<target key>", [method, args]], ...]`.
    pub fn from_value(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Listener(listener) => Ok(vec![*listener]),
            Value::Map(map) => map
                .iter()
                .map(|(target, tuple)| Self::from_tuple(target.as_str(), tuple))
                .collect(),
            Value::Array(entries) => entries.iter().map(Self::from_entry).collect(),
            other => Err(Error::listener_invalid_type(format!(
                "listener value has type {}, required: map, array or listener definition",
                other.kind()
            ))),
        }
    }

    fn from_entry(entry: &Value) -> Result<Self> {
        match entry {
            Value::Listener(listener) => Ok((**listener).clone()),
            Value::Array(items) => match items.as_slice() {
                [Value::String(target), tuple, ..] => Self::from_tuple(target.as_str(), tuple),
                [other, _, ..] => Err(Error::listener_invalid_type(format!(
                    "listener target has type {}, required: string",
                    other.kind()
                ))),
                _ => Err(Error::listener_syntax(
                    "target key and call are not defined",
                )),
            },
            other => Err(Error::listener_invalid_type(format!(
                "listener entry has type {}, required: array",
                other.kind()
            ))),
        }
    }
}

/// Parse a declarative `[method or call, arguments]` listener tuple into a call
pub(crate) fn call_from_tuple(tuple: &Value) -> Result<CallDescriptor> {
    let Value::Array(items) = tuple else {
        return Err(Error::listener_invalid_type(format!(
            "listener tuple has type {}, required: array",
            tuple.kind()
        )));
    };
    let [method, arguments, ..] = items.as_slice() else {
        return Err(Error::listener_syntax(
            "method and arguments are not defined",
        ));
    };
    let Value::Array(arguments) = arguments else {
        return Err(Error::listener_invalid_type(format!(
            "listener arguments have type {}, required: array",
            arguments.kind()
        )));
    };
    match method {
        // A complete call carries its own arguments
        Value::Call(call) => Ok((**call).clone()),
        Value::String(method) => CallDescriptor::new(method.as_str(), arguments.clone()),
        other => Err(Error::listener_invalid_type(format!(
            "listener method has type {}, required: string or call definition",
            other.kind()
        ))),
    }
}
