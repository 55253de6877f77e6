//! Class resolution port

use std::sync::Arc;

use crate::error::Result;
use crate::ports::service::Service;
use crate::value::Value;

/// Constructor for a service class, called with interpolated arguments
pub type ServiceFactory = Arc<dyn Fn(Vec<Value>) -> Result<Box<dyn Service>> + Send + Sync>;

/// Maps class identifiers to factories
///
/// The container never discovers constructible types itself; the embedding
/// application supplies an implementation at startup.
pub trait ClassResolver: Send + Sync {
    /// Look up the factory registered for `class`
    ///
    /// Fails with [`crate::Error::Class`] when nothing is registered.
    fn resolve(&self, class: &str) -> Result<ServiceFactory>;
}
