//! Method call descriptor

use crate::error::{Error, Result};
use crate::value::Value;

/// A method name with its positional arguments
///
/// Immutable once built. Arguments may still contain `%key%` references;
/// they are interpolated by the container when the call is made.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    method_name: String,
    arguments: Vec<Value>,
}

impl CallDescriptor {
    /// Create a call descriptor
    ///
    /// Fails with [`Error::InvalidType`] when `method_name` is empty.
    pub fn new(method_name: impl Into<String>, arguments: Vec<Value>) -> Result<Self> {
        let method_name = method_name.into();
        if method_name.is_empty() {
            return Err(Error::invalid_type(
                "method name",
                "non-empty string",
                "empty string",
            ));
        }
        Ok(Self {
            method_name,
            arguments,
        })
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }
}
