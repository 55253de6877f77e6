//! In-process Event Emitter
//!
//! Synchronous [`EventEmitter`] implementation. Handlers run on the thread
//! calling [`LocalEmitter::emit`], in subscription order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use wirebox_domain::{EventEmitter, EventHandler};

/// Event emitter dispatching to handlers registered in this process
#[derive(Default)]
pub struct LocalEmitter {
    handlers: RwLock<HashMap<String, Vec<EventHandler>>>,
}

impl LocalEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Run every handler subscribed to `event`
    ///
    /// Returns the number of handlers that ran. Handlers may subscribe or
    /// emit again; the handler table is not locked while they run.
    pub fn emit(&self, event: &str) -> usize {
        let handlers: Vec<EventHandler> = self
            .handlers
            .read()
            .get(event)
            .cloned()
            .unwrap_or_default();
        debug!(event = %event, handlers = handlers.len(), "emitting event");
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    /// Number of handlers subscribed to `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.handlers.read().get(event).map_or(0, Vec::len)
    }

    /// Events with at least one handler, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl EventEmitter for LocalEmitter {
    fn subscribe(&self, event: &str, handler: EventHandler) {
        self.handlers
            .write()
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }
}

impl fmt::Debug for LocalEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalEmitter")
            .field("events", &self.event_names())
            .finish()
    }
}
