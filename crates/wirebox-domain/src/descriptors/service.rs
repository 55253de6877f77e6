//! Service definition descriptor
//!
//! A [`ServiceDescriptor`] is assembled either through its chaining setters
//! or from a declarative map:
//!
//! ```text
//! {
//!   "class": "app.mail.Mailer",          // or "className"
//!   "arguments": ["%parameters.dsn%"],
//!   "properties": { "retries": 3 },
//!   "calls": [["set_logger", ["%services.logger%"]]],
//!   "listeners": { "app.shutdown": [["flush", []]] },
//!   "alias": "mailer",
//!   "public": false
//! }
//! ```
//!
//! Once stored in the container the descriptor is never normalized again.

use indexmap::IndexMap;

use crate::constants::{
    FIELD_ALIAS, FIELD_ARGUMENTS, FIELD_CALLS, FIELD_CLASS, FIELD_CLASS_NAME, FIELD_LISTENERS,
    FIELD_PROPERTIES, FIELD_PUBLIC,
};
use crate::descriptors::call::CallDescriptor;
use crate::descriptors::listener::call_from_tuple;
use crate::error::{Error, Result};
use crate::value::{Value, ValueMap};

/// Declarative definition of a constructible service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    class_identifier: String,
    constructor_arguments: Vec<Value>,
    alias: Option<String>,
    properties: ValueMap,
    calls: Vec<CallDescriptor>,
    listeners_by_event: IndexMap<String, Vec<CallDescriptor>>,
    is_public: bool,
}

impl ServiceDescriptor {
    /// Create a descriptor for `class_identifier` built with `arguments`
    ///
    /// Fails with [`Error::ServiceSyntax`] when the identifier is empty.
    pub fn new(class_identifier: impl Into<String>, arguments: Vec<Value>) -> Result<Self> {
        let class_identifier = class_identifier.into();
        if class_identifier.is_empty() {
            return Err(Error::service_syntax("class identifier is empty"));
        }
        Ok(Self {
            class_identifier,
            constructor_arguments: arguments,
            alias: None,
            properties: ValueMap::new(),
            calls: Vec::new(),
            listeners_by_event: IndexMap::new(),
            is_public: true,
        })
    }

    /// Declare an alias; the container stores it under `aliases.<alias>`
    ///
    /// Fails with [`Error::AliasInvalidType`] when the alias is empty.
    pub fn set_alias(mut self, alias: impl Into<String>) -> Result<Self> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(Error::alias_invalid_type("alias is empty"));
        }
        self.alias = Some(alias);
        Ok(self)
    }

    /// Assign `value` to property `name` after construction
    #[must_use]
    pub fn set_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Append a post-construction call
    pub fn add_call(self, method: impl Into<String>, arguments: Vec<Value>) -> Result<Self> {
        Ok(self.with_call(CallDescriptor::new(method, arguments)?))
    }

    /// Append an already built post-construction call
    #[must_use]
    pub fn with_call(mut self, call: CallDescriptor) -> Self {
        self.calls.push(call);
        self
    }

    /// Fire `method(arguments)` on this service whenever `event` fires
    pub fn add_listener(
        self,
        event: impl Into<String>,
        method: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Result<Self> {
        Ok(self.with_listener(event, CallDescriptor::new(method, arguments)?))
    }

    /// Register an already built call as listener of `event`
    #[must_use]
    pub fn with_listener(mut self, event: impl Into<String>, call: CallDescriptor) -> Self {
        self.listeners_by_event
            .entry(event.into())
            .or_default()
            .push(call);
        self
    }

    #[must_use]
    pub fn set_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn class_identifier(&self) -> &str {
        &self.class_identifier
    }

    pub fn constructor_arguments(&self) -> &[Value] {
        &self.constructor_arguments
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn properties(&self) -> &ValueMap {
        &self.properties
    }

    pub fn calls(&self) -> &[CallDescriptor] {
        &self.calls
    }

    pub fn listeners(&self) -> &IndexMap<String, Vec<CallDescriptor>> {
        &self.listeners_by_event
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// Normalize a declarative map into a validated descriptor
    ///
    /// `className` wins over `class` when both are present. Unknown fields
    /// are ignored.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let Value::Map(raw) = raw else {
            return Err(Error::service_invalid_type(format!(
                "service definition has type {}, required: map",
                raw.kind()
            )));
        };

        let class = raw
            .get(FIELD_CLASS_NAME)
            .or_else(|| raw.get(FIELD_CLASS))
            .ok_or_else(|| Error::service_syntax("className or class is not defined"))?;
        let Value::String(class) = class else {
            return Err(Error::service_invalid_type(format!(
                "className has type {}, required: string",
                class.kind()
            )));
        };

        let arguments = match raw.get(FIELD_ARGUMENTS) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                return Err(Error::service_invalid_type(format!(
                    "arguments have type {}, required: array",
                    other.kind()
                )));
            }
        };
        let mut descriptor = Self::new(class.as_str(), arguments)?;

        if let Some(properties) = raw.get(FIELD_PROPERTIES) {
            let Value::Map(properties) = properties else {
                return Err(Error::service_invalid_type(format!(
                    "properties have type {}, required: map",
                    properties.kind()
                )));
            };
            for (name, value) in properties {
                descriptor = descriptor.set_property(name.as_str(), value.clone());
            }
        }

        if let Some(calls) = raw.get(FIELD_CALLS) {
            for call in service_calls(calls)? {
                descriptor = descriptor.with_call(call);
            }
        }

        if let Some(listeners) = raw.get(FIELD_LISTENERS) {
            let Value::Map(listeners) = listeners else {
                return Err(Error::listener_invalid_type(format!(
                    "listeners have type {}, required: map",
                    listeners.kind()
                )));
            };
            for (event, tuples) in listeners {
                let Value::Array(tuples) = tuples else {
                    return Err(Error::listener_invalid_type(format!(
                        "listeners of \"{event}\" have type {}, required: array",
                        tuples.kind()
                    )));
                };
                for (index, tuple) in tuples.iter().enumerate() {
                    let call = call_from_tuple(tuple).map_err(|err| match err {
                        Error::ListenerSyntax { .. } => Error::listener_syntax(format!(
                            "listener {event}[{index}]: method and arguments are not defined"
                        )),
                        other => other,
                    })?;
                    descriptor = descriptor.with_listener(event.as_str(), call);
                }
            }
        }

        if let Some(alias) = raw.get(FIELD_ALIAS) {
            let Value::String(alias) = alias else {
                return Err(Error::alias_invalid_type(format!(
                    "alias has type {}, required: string",
                    alias.kind()
                )));
            };
            descriptor = descriptor.set_alias(alias.as_str())?;
        }

        if let Some(public) = raw.get(FIELD_PUBLIC) {
            let Value::Bool(public) = public else {
                return Err(Error::public_invalid_type(format!(
                    "public has type {}, required: boolean",
                    public.kind()
                )));
            };
            descriptor = descriptor.set_public(*public);
        }

        Ok(descriptor)
    }
}

fn service_calls(calls: &Value) -> Result<Vec<CallDescriptor>> {
    let Value::Array(calls) = calls else {
        return Err(Error::service_invalid_type(format!(
            "calls have type {}, required: array",
            calls.kind()
        )));
    };
    calls
        .iter()
        .enumerate()
        .map(|(index, call)| {
            let Value::Array(items) = call else {
                return Err(Error::service_invalid_type(format!(
                    "call {index} has type {}, required: array",
                    call.kind()
                )));
            };
            match items.as_slice() {
                [Value::String(method), Value::Array(arguments), ..] => {
                    CallDescriptor::new(method.as_str(), arguments.clone())
                }
                [Value::String(_), other, ..] => Err(Error::service_invalid_type(format!(
                    "call {index} arguments have type {}, required: array",
                    other.kind()
                ))),
                [other, _, ..] => Err(Error::service_invalid_type(format!(
                    "call {index} method has type {}, required: string",
                    other.kind()
                ))),
                _ => Err(Error::service_syntax(format!(
                    "call {index}: method and arguments are not defined"
                ))),
            }
        })
        .collect()
}
