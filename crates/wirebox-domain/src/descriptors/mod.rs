//! Declarative descriptors
//!
//! Value holders describing what the container should build and wire:
//! method calls, deferred raw values, listener bindings and services.

pub mod call;
pub mod deferred;
pub mod listener;
pub mod service;

pub use call::CallDescriptor;
pub use deferred::DeferredValue;
pub use listener::ListenerDescriptor;
pub use service::ServiceDescriptor;
