//! Container values
//!
//! [`Value`] is the tagged variant stored in and returned by the container.
//! Plain data (`Null`, `Bool`, `Number`, `String`, `Array`, `Map`) is
//! configuration: it takes part in `%key%` interpolation. Every other variant
//! is opaque to interpolation and passed through untouched:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Object` | a constructed service instance |
//! | `Opaque` | an arbitrary caller value, tagged as such at `set` time |
//! | `Service` | a declarative service definition |
//! | `Call` | a method call definition |
//! | `Listener` | a single listener binding |

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Number;

use crate::descriptors::{CallDescriptor, ListenerDescriptor, ServiceDescriptor};
use crate::error::{Error, Result};
use crate::ports::service::ServiceRef;

/// Map type used for `Value::Map`, keeping declaration order
pub type ValueMap = IndexMap<String, Value>;

/// A value held by the container
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer or float
    Number(Number),
    /// Text, possibly containing `%key%` references
    String(String),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// Mapping from name to value
    Map(ValueMap),
    /// Constructed service instance
    Object(ServiceRef),
    /// Caller value that is never interpolated
    Opaque(Opaque),
    /// Declarative service definition
    Service(Box<ServiceDescriptor>),
    /// Method call definition
    Call(Box<CallDescriptor>),
    /// Listener binding
    Listener(Box<ListenerDescriptor>),
}

/// Kind of a [`Value`], used for validation and error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `Value::Null`
    Null,
    /// `Value::Bool`
    Bool,
    /// `Value::Number`
    Number,
    /// `Value::String`
    String,
    /// `Value::Array`
    Array,
    /// `Value::Map`
    Map,
    /// `Value::Object`
    Object,
    /// `Value::Opaque`
    Opaque,
    /// `Value::Service`
    Service,
    /// `Value::Call`
    Call,
    /// `Value::Listener`
    Listener,
}

impl ValueKind {
    /// Lowercase name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Map => "map",
            Self::Object => "object",
            Self::Opaque => "opaque",
            Self::Service => "service definition",
            Self::Call => "call definition",
            Self::Listener => "listener definition",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that `value` is one of the `expected` kinds
///
/// Fails with [`Error::InvalidType`] naming `context`, the accepted kinds and
/// the kind that was found.
pub fn validate(value: &Value, expected: &[ValueKind], context: &str) -> Result<()> {
    let kind = value.kind();
    if expected.contains(&kind) {
        return Ok(());
    }
    let expected = expected
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(Error::invalid_type(context, expected, kind.as_str()))
}

impl Value {
    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Map(_) => ValueKind::Map,
            Self::Object(_) => ValueKind::Object,
            Self::Opaque(_) => ValueKind::Opaque,
            Self::Service(_) => ValueKind::Service,
            Self::Call(_) => ValueKind::Call,
            Self::Listener(_) => ValueKind::Listener,
        }
    }

    /// Wrap an arbitrary value so it is stored and returned untouched
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    /// Whether this is plain configuration data that takes part in interpolation
    pub fn is_plain(&self) -> bool {
        matches!(
            self,
            Self::Null
                | Self::Bool(_)
                | Self::Number(_)
                | Self::String(_)
                | Self::Array(_)
                | Self::Map(_)
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ServiceRef> {
        match self {
            Self::Object(service) => Some(service),
            _ => None,
        }
    }

    pub fn as_listener(&self) -> Option<&ListenerDescriptor> {
        match self {
            Self::Listener(listener) => Some(listener),
            _ => None,
        }
    }

    /// Text used when this value is substituted into a larger string
    ///
    /// Only strings and numbers have a textual form. Integral floats drop
    /// their fraction, so `2.0` reads as `2`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(number_text(n)),
            _ => None,
        }
    }

    /// Convert plain data to JSON
    ///
    /// Returns `None` when the value contains anything that is not plain data.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        Some(match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Value::Number(n.clone()),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(items) => serde_json::Value::Array(
                items.iter().map(Self::to_json).collect::<Option<Vec<_>>>()?,
            ),
            Self::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
                    .collect::<Option<serde_json::Map<_, _>>>()?,
            ),
            _ => return None,
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Opaque(a), Self::Opaque(b)) => a.ptr_eq(b),
            (Self::Service(a), Self::Service(b)) => a == b,
            (Self::Call(a), Self::Call(b)) => a == b,
            (Self::Listener(a), Self::Listener(b)) => a == b,
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON number form and become `Null`
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Self::Map(map)
    }
}

impl From<ServiceRef> for Value {
    fn from(service: ServiceRef) -> Self {
        Self::Object(service)
    }
}

impl From<ServiceDescriptor> for Value {
    fn from(descriptor: ServiceDescriptor) -> Self {
        Self::Service(Box::new(descriptor))
    }
}

impl From<CallDescriptor> for Value {
    fn from(call: CallDescriptor) -> Self {
        Self::Call(Box::new(call))
    }
}

impl From<ListenerDescriptor> for Value {
    fn from(listener: ListenerDescriptor) -> Self {
        Self::Listener(Box::new(listener))
    }
}

/// Integral floats below 1e21 print without a fraction; `-0.0` prints as `0`
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

/// Shared caller value that the container never looks into
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the wrapped value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles share the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}
