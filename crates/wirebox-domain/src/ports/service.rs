//! Service Port
//!
//! Rust has no runtime reflection, so a constructed service describes its own
//! callable surface: the container asks [`Service::has_method`] before every
//! post-construction call or listener invocation and reports a missing method
//! as [`crate::Error::MethodReference`].

use std::any::TypeId;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use downcast_rs::{Downcast, impl_downcast};
use parking_lot::ReentrantMutex;

use crate::error::{Error, Result};
use crate::value::Value;

/// A constructed object the container can configure and call
///
/// # Example
///
/// ```rust
/// use wirebox_domain::{Error, Result, Service, Value};
///
/// #[derive(Default)]
/// struct Counter {
///     total: i64,
/// }
///
/// impl Service for Counter {
///     fn has_method(&self, method: &str) -> bool {
///         method == "add"
///     }
///
///     fn call(&mut self, method: &str, args: Vec<Value>) -> Result<()> {
///         match method {
///             "add" => {
///                 self.total += args.first().and_then(Value::as_i64).unwrap_or(0);
///                 Ok(())
///             }
///             other => Err(Error::method_reference("Counter", other)),
///         }
///     }
///
///     fn set_property(&mut self, name: &str, _value: Value) -> Result<()> {
///         Err(Error::invocation(name, "Counter has no properties"))
///     }
/// }
/// ```
pub trait Service: Downcast + Send {
    /// Whether `method` can be called on this instance
    fn has_method(&self, method: &str) -> bool;

    /// Invoke `method` with positional arguments
    fn call(&mut self, method: &str, args: Vec<Value>) -> Result<()>;

    /// Assign a property after construction
    fn set_property(&mut self, name: &str, value: Value) -> Result<()>;

    /// Read a property back, when the service exposes it
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl_downcast!(Service);

/// Shared handle to a constructed service
///
/// Clones share the same instance; equality is identity. Other threads wait
/// while the instance is in use. A call that re-enters the same instance on
/// its own thread (a method emitting an event this service listens to) fails
/// with [`crate::Error::Invocation`] instead of blocking.
#[derive(Clone)]
pub struct ServiceRef {
    class: Arc<str>,
    type_id: TypeId,
    inner: Arc<ReentrantMutex<RefCell<Box<dyn Service>>>>,
}

impl ServiceRef {
    pub fn new(class: impl Into<String>, service: Box<dyn Service>) -> Self {
        let type_id = (*service).as_any().type_id();
        Self {
            class: Arc::from(class.into()),
            type_id,
            inner: Arc::new(ReentrantMutex::new(RefCell::new(service))),
        }
    }

    /// Wrap a concrete service value
    pub fn from_service<S: Service>(class: impl Into<String>, service: S) -> Self {
        Self::new(class, Box::new(service))
    }

    /// Class identifier the instance was built from
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Whether both handles point at the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn has_method(&self, method: &str) -> Result<bool> {
        let guard = self.inner.lock();
        let service = guard.try_borrow().map_err(|_| self.busy(method))?;
        Ok(service.has_method(method))
    }

    pub fn call(&self, method: &str, args: Vec<Value>) -> Result<()> {
        let guard = self.inner.lock();
        let mut service = guard.try_borrow_mut().map_err(|_| self.busy(method))?;
        service.call(method, args)
    }

    pub fn set_property(&self, name: &str, value: Value) -> Result<()> {
        let guard = self.inner.lock();
        let mut service = guard.try_borrow_mut().map_err(|_| self.busy(name))?;
        service.set_property(name, value)
    }

    /// Read a property back; `None` while the instance is busy on this thread
    pub fn property(&self, name: &str) -> Option<Value> {
        let guard = self.inner.lock();
        let service = guard.try_borrow().ok()?;
        service.property(name)
    }

    /// Whether the instance is a `T`
    pub fn is<T: Service>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Run `f` against the instance as a `T`
    ///
    /// Returns `None` when the instance is of another type or busy on this
    /// thread.
    pub fn with<T: Service, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.inner.lock();
        let service = guard.try_borrow().ok()?;
        service.downcast_ref::<T>().map(f)
    }

    /// Run `f` against the instance as a mutable `T`
    pub fn with_mut<T: Service, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let guard = self.inner.lock();
        let mut service = guard.try_borrow_mut().ok()?;
        service.downcast_mut::<T>().map(f)
    }

    fn busy(&self, member: &str) -> Error {
        Error::invocation(
            format!("{}::{member}", self.class),
            "instance is already in use on this thread (re-entrant call)",
        )
    }
}

impl fmt::Debug for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRef")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}
