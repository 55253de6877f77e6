//! Dependency Injection Container
//!
//! A flat key/value store with lazy compilation. The key prefix decides what
//! a value means and how it is compiled:
//!
//! | Prefix | Stored value | Compiled into |
//! |--------|--------------|---------------|
//! | `parameters.` | any value | interpolated value |
//! | `services.` | service definition | constructed [`ServiceRef`] |
//! | `aliases.` | target key | value of the target key |
//! | `listeners.` | listener bindings | fired bindings, arguments resolved |
//! | `public.` | boolean | the same boolean |
//!
//! Keys without a reserved prefix behave like parameters.
//!
//! ## Compilation
//!
//! `set` stores every value deferred. The first `get` compiles it and pins
//! the result in the slot, so later `get`s return the identical value. A
//! failed compilation leaves the slot deferred.
//!
//! ## Concurrency
//!
//! All operations run under one re-entrant lock. Recursion on the same
//! thread (interpolation, construction, emitter callbacks) re-enters it;
//! other threads wait until the outermost call returns.

mod build;
mod interpolate;
mod keys;
mod store;

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::{Arc, Weak};

use parking_lot::ReentrantMutex;
use tracing::{debug, info, warn};
use wirebox_domain::constants::{ALIASES_PREFIX, LISTENERS_PREFIX, PUBLIC_PREFIX};
use wirebox_domain::{
    ClassResolver, DeferredValue, Error, EventEmitter, ListenerDescriptor, Result, Service,
    ServiceDescriptor, Value, ValueKind, validate,
};

use crate::registry::FactoryRegistry;
pub use keys::KeyKind;
use store::{Checkout, SlotState, Store};

/// The dependency injection container
///
/// Cloning is cheap and yields a handle to the same store.
///
/// # Example
///
/// ```rust
/// use wirebox_application::Container;
/// use wirebox_domain::Value;
///
/// let container = Container::default();
/// container
///     .set("parameters.port", 8080)?
///     .set("parameters.host", "localhost")?
///     .set("parameters.url", "http://%parameters.host%:%parameters.port%")?
///     .set("parameters.listen", "%parameters.port%")?;
///
/// assert_eq!(container.get("parameters.url")?, Value::from("http://localhost:8080"));
/// assert_eq!(container.get("parameters.listen")?, Value::from(8080));
/// # Ok::<(), wirebox_domain::Error>(())
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<Inner>,
}

struct Inner {
    state: ReentrantMutex<RefCell<State>>,
    resolver: Arc<dyn ClassResolver>,
}

#[derive(Default)]
struct State {
    store: Store,
    emitters: Vec<WatchedEmitter>,
}

struct WatchedEmitter {
    emitter: Arc<dyn EventEmitter>,
    forwarded: HashSet<String>,
}

impl Default for Container {
    /// A container whose registry has no factories
    fn default() -> Self {
        Self::with_registry(FactoryRegistry::new())
    }
}

impl Container {
    /// Create a container resolving classes through `resolver`
    pub fn new(resolver: Arc<dyn ClassResolver>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: ReentrantMutex::new(RefCell::new(State::default())),
                resolver,
            }),
        }
    }

    /// Create a container resolving classes through a factory registry
    pub fn with_registry(registry: FactoryRegistry) -> Self {
        Self::new(Arc::new(registry))
    }

    /// Check if a key is stored
    pub fn has(&self, key: &str) -> bool {
        self.with_state(|state| state.store.contains(key))
    }

    /// Whether the value under `key` has already been compiled
    pub fn is_compiled(&self, key: &str) -> bool {
        self.with_state(|state| {
            matches!(state.store.state(key), Some(SlotState::Compiled(_)))
        })
    }

    /// Stored keys in the order they were first set
    pub fn keys(&self) -> Vec<String> {
        self.with_state(|state| state.store.keys().map(str::to_string).collect())
    }

    /// Store `value` under `key`
    ///
    /// Setting a `listeners.` key appends to the listener group instead of
    /// replacing it.
    ///
    /// # Errors
    ///
    /// * [`Error::ServiceInvalidType`] / [`Error::ServiceSyntax`] for bad service definitions
    /// * [`Error::ListenerInvalidType`] / [`Error::ListenerSyntax`] for bad listener bindings
    /// * [`Error::AliasInvalidType`] when an alias target is not a string
    /// * [`Error::AliasOverflow`] when an alias key is set twice
    /// * [`Error::PublicInvalidType`] when a visibility flag is not a boolean
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<&Self> {
        let _guard = self.inner.state.lock();
        let value = value.into();

        match KeyKind::of(key) {
            KeyKind::Service => self.set_service(key, value)?,
            KeyKind::Listener => self.add_listeners(key, value)?,
            KeyKind::Alias => {
                if !matches!(value, Value::String(_)) {
                    return Err(Error::alias_invalid_type(format!(
                        "value of \"{key}\" has type {}, required: string",
                        value.kind()
                    )));
                }
                if self.has(key) {
                    return Err(Error::alias_overflow(key));
                }
                self.store_deferred(key, value);
            }
            KeyKind::Public => {
                if !matches!(value, Value::Bool(_)) {
                    return Err(Error::public_invalid_type(format!(
                        "value of \"{key}\" has type {}, required: boolean",
                        value.kind()
                    )));
                }
                self.store_deferred(key, value);
            }
            KeyKind::Parameter | KeyKind::Other => self.store_deferred(key, value),
        }

        Ok(self)
    }

    /// Get the compiled value of `key`
    ///
    /// Alias keys resolve to the value of the key they point at, following
    /// chains of aliases.
    ///
    /// # Errors
    ///
    /// * [`Error::KeyReference`] when the key is absent
    /// * [`Error::AliasKeyReference`] when an alias points at an absent key
    /// * [`Error::AliasCycle`] when an alias chain loops
    /// * [`Error::CircularReference`] when a value refers to itself while compiling
    /// * any error raised while compiling the value
    pub fn get(&self, key: &str) -> Result<Value> {
        let _guard = self.inner.state.lock();
        let mut trail: Vec<String> = Vec::new();
        let mut current = key.to_string();

        loop {
            let value = self.fetch(&current)?;
            if KeyKind::of(&current) != KeyKind::Alias {
                return Ok(value);
            }

            let target = match value {
                Value::String(target) => target,
                other => {
                    return Err(Error::alias_invalid_type(format!(
                        "\"{current}\" resolved to {}, required: string",
                        other.kind()
                    )));
                }
            };
            if !self.has(&target) {
                return Err(Error::alias_key_reference(current, target));
            }

            trail.push(current);
            if trail.contains(&target) {
                trail.push(target);
                return Err(Error::AliasCycle { chain: trail });
            }
            debug!(alias = %trail.last().map_or("", String::as_str), target = %target, "following alias");
            current = target;
        }
    }

    /// Get a constructed service and run `f` against it as a `T`
    pub fn get_service<T: Service, R>(&self, key: &str, f: impl FnOnce(&T) -> R) -> Result<R> {
        let value = self.get(key)?;
        let Value::Object(service) = &value else {
            return Err(Error::invalid_type(key, "object", value.kind().as_str()));
        };
        service.with::<T, R>(f).ok_or_else(|| {
            Error::invalid_type(
                key,
                std::any::type_name::<T>(),
                format!("instance of \"{}\"", service.class()),
            )
        })
    }

    /// Set every entry of a declarative map
    ///
    /// Fails with [`Error::InvalidType`] when `data` is not a map; otherwise
    /// with the first error raised by [`Container::set`].
    pub fn prepare(&self, data: impl Into<Value>) -> Result<&Self> {
        let data = data.into();
        validate(&data, &[ValueKind::Map], "container data")?;
        let Value::Map(entries) = data else {
            return Ok(self);
        };

        let _guard = self.inner.state.lock();
        let count = entries.len();
        for (key, value) in entries {
            self.set(&key, value)?;
        }
        info!(entries = count, "container prepared");
        Ok(self)
    }

    /// Watch `emitter`: firing an event named after a `listeners.` key
    /// replays that listener group
    pub fn add_emitter(&self, emitter: Arc<dyn EventEmitter>) -> &Self {
        let _guard = self.inner.state.lock();
        let listener_keys: Vec<String> = self.with_state(|state| {
            state.emitters.push(WatchedEmitter {
                emitter,
                forwarded: HashSet::new(),
            });
            state
                .store
                .keys()
                .filter(|key| KeyKind::of(key) == KeyKind::Listener)
                .map(str::to_string)
                .collect()
        });
        for key in listener_keys {
            self.forward_event(&key);
        }
        self
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let guard = self.inner.state.lock();
        let mut state = guard.borrow_mut();
        f(&mut state)
    }

    fn store_deferred(&self, key: &str, value: Value) {
        self.with_state(|state| {
            state
                .store
                .put(key, SlotState::Uncompiled(DeferredValue::new(value)));
        });
    }

    fn set_service(&self, key: &str, value: Value) -> Result<()> {
        let value = match value {
            Value::Map(_) => Value::from(ServiceDescriptor::from_value(&value)?),
            value @ (Value::Service(_) | Value::Object(_) | Value::Opaque(_)) => value,
            other => {
                return Err(Error::service_invalid_type(format!(
                    "value of \"{key}\" has type {}, required: map, service definition or object",
                    other.kind()
                )));
            }
        };

        if let Value::Service(descriptor) = &value {
            if let Some(alias) = descriptor.alias() {
                self.set(&format!("{ALIASES_PREFIX}{alias}"), key)?;
            }
            for (event, calls) in descriptor.listeners() {
                for call in calls {
                    self.set(
                        &format!("{LISTENERS_PREFIX}{event}"),
                        ListenerDescriptor::new(key, call.clone()),
                    )?;
                }
            }
            if !descriptor.is_public() {
                // Stored compiled; the flag is informational only.
                self.with_state(|state| {
                    state.store.put(
                        &format!("{PUBLIC_PREFIX}{key}"),
                        SlotState::Compiled(Value::Bool(false)),
                    );
                });
            }
        }

        self.store_deferred(key, value);
        Ok(())
    }

    fn add_listeners(&self, key: &str, value: Value) -> Result<()> {
        let added = ListenerDescriptor::from_value(value)?;

        let mut group = match self.with_state(|state| match state.store.state(key) {
            None => Ok(Value::Array(Vec::new())),
            Some(SlotState::Uncompiled(deferred)) => Ok(deferred.raw().clone()),
            Some(SlotState::Compiled(value)) => Ok(value.clone()),
            Some(SlotState::Compiling) => Err(Error::circular_reference(key)),
        })? {
            Value::Array(items) => items,
            other => {
                return Err(Error::listener_invalid_type(format!(
                    "\"{key}\" holds {}, required: array of listeners",
                    other.kind()
                )));
            }
        };
        group.extend(added.into_iter().map(Value::from));
        self.store_deferred(key, Value::Array(group));

        self.forward_event(key);
        Ok(())
    }

    /// Subscribe every watched emitter that does not forward `key` yet
    fn forward_event(&self, key: &str) {
        let pending: Vec<Arc<dyn EventEmitter>> = self.with_state(|state| {
            state
                .emitters
                .iter_mut()
                .filter_map(|watched| {
                    watched
                        .forwarded
                        .insert(key.to_string())
                        .then(|| Arc::clone(&watched.emitter))
                })
                .collect()
        });

        for emitter in pending {
            let weak: Weak<Inner> = Arc::downgrade(&self.inner);
            let event = key.to_string();
            emitter.subscribe(
                key,
                Arc::new(move || {
                    let Some(inner) = weak.upgrade() else {
                        return;
                    };
                    debug!(event = %event, "emitter fired listener group");
                    if let Err(err) = (Container { inner }).get(&event) {
                        warn!(event = %event, error = %err, "listener group failed");
                    }
                }),
            );
        }
    }

    /// Read one slot, compiling it if needed; no alias handling
    fn fetch(&self, key: &str) -> Result<Value> {
        match self.with_state(|state| state.store.checkout(key))? {
            Checkout::Deferred(id, deferred) => {
                match self.compile(key, deferred.raw().clone()) {
                    Ok(value) => {
                        debug!(key = %key, kind = %value.kind(), "compiled entry");
                        self.with_state(|state| state.store.finish(id, value.clone()));
                        Ok(value)
                    }
                    Err(err) => {
                        self.with_state(|state| state.store.abort(id, deferred));
                        Err(err)
                    }
                }
            }
            Checkout::Compiled(value) => {
                if KeyKind::of(key) == KeyKind::Listener {
                    self.call_listeners(&listener_group(key, &value)?, false)?;
                }
                Ok(value)
            }
        }
    }

    /// Compile a raw value according to its key and shape
    fn compile(&self, key: &str, raw: Value) -> Result<Value> {
        match (KeyKind::of(key), raw) {
            (KeyKind::Service, Value::Service(descriptor)) => self.build_service(&descriptor),
            (KeyKind::Listener, raw) => {
                let compiled = self.call_listeners(&listener_group(key, &raw)?, true)?;
                Ok(Value::Array(compiled.into_iter().map(Value::from).collect()))
            }
            (_, Value::String(text)) => self.replace_keys(&text),
            (_, value @ (Value::Array(_) | Value::Map(_))) => self.replace_keys_recursive(value),
            (_, value) => Ok(value),
        }
    }
}

/// Read a listener group back out of its stored array
fn listener_group(key: &str, value: &Value) -> Result<Vec<ListenerDescriptor>> {
    let Value::Array(items) = value else {
        return Err(Error::listener_invalid_type(format!(
            "\"{key}\" holds {}, required: array of listeners",
            value.kind()
        )));
    };
    items
        .iter()
        .map(|item| {
            item.as_listener().cloned().ok_or_else(|| {
                Error::listener_invalid_type(format!(
                    "\"{key}\" contains {}, required: listener definition",
                    item.kind()
                ))
            })
        })
        .collect()
}
