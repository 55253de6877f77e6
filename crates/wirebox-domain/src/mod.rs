//! # Domain Layer
//!
//! Values, declarative descriptors, the error taxonomy and the ports the
//! container consumes. Nothing here resolves or constructs anything; that is
//! the job of `wirebox-application`.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value`] | Tagged container values and kind validation |
//! | [`descriptors`] | Call, deferred, listener and service descriptors |
//! | [`ports`] | Service, class resolver and event emitter contracts |
//! | [`error`] | Error taxonomy |
//! | [`constants`] | Key prefixes and interpolation markers |

pub mod constants;
pub mod descriptors;
pub mod error;
pub mod ports;
pub mod value;

pub use descriptors::{CallDescriptor, DeferredValue, ListenerDescriptor, ServiceDescriptor};
pub use error::{Error, Result};
pub use ports::{ClassResolver, EventEmitter, EventHandler, Service, ServiceFactory, ServiceRef};
pub use value::{Opaque, Value, ValueKind, ValueMap, validate};
