//! Shared test services and emitters

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use wirebox_application::{Container, FactoryRegistry};
use wirebox_domain::{Error, EventEmitter, EventHandler, Result, Service, Value, ValueMap};

pub const FIXTURE_CLASS: &str = "test.fixtures.Fixture";

/// Service recording everything the container does to it
#[derive(Debug, Default)]
pub struct Fixture {
    pub arguments: Vec<Value>,
    pub properties: ValueMap,
    pub values: ValueMap,
    pub calls: Vec<(String, Vec<Value>)>,
}

impl Fixture {
    pub fn new(arguments: Vec<Value>) -> Self {
        Self {
            arguments,
            ..Self::default()
        }
    }
}

impl Service for Fixture {
    fn has_method(&self, method: &str) -> bool {
        matches!(method, "set" | "touch")
    }

    fn call(&mut self, method: &str, args: Vec<Value>) -> Result<()> {
        self.calls.push((method.to_string(), args.clone()));
        match (method, args.as_slice()) {
            ("set", [Value::String(key), value, ..]) => {
                self.values.insert(key.clone(), value.clone());
                Ok(())
            }
            ("set", _) => Err(Error::invocation("set", "expected a key and a value")),
            ("touch", _) => Ok(()),
            (other, _) => Err(Error::method_reference("Fixture", other)),
        }
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<()> {
        self.properties.insert(name.to_string(), value);
        Ok(())
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }
}

pub fn registry() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    registry
        .register_type(FIXTURE_CLASS, |args| Ok(Fixture::new(args)))
        .expect("fixture registers");
    registry
}

pub fn container() -> Container {
    Container::with_registry(registry())
}

/// Read a field of the fixture stored at `key`
pub fn fixture<R>(container: &Container, key: &str, f: impl FnOnce(&Fixture) -> R) -> R {
    container
        .get_service::<Fixture, R>(key, f)
        .expect("fixture service")
}

/// Emitter firing handlers synchronously on demand
#[derive(Default)]
pub struct RecordingEmitter {
    handlers: Mutex<HashMap<String, Vec<EventHandler>>>,
}

impl RecordingEmitter {
    pub fn fire(&self, event: &str) {
        let handlers = self.handlers.lock().get(event).cloned().unwrap_or_default();
        for handler in handlers {
            handler();
        }
    }

    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.lock().get(event).map_or(0, Vec::len)
    }
}

impl EventEmitter for RecordingEmitter {
    fn subscribe(&self, event: &str, handler: EventHandler) {
        self.handlers
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }
}

pub fn emitter() -> Arc<RecordingEmitter> {
    Arc::new(RecordingEmitter::default())
}
