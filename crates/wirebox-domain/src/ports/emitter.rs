//! Event emitter port

use std::sync::Arc;

/// Callback run when a subscribed event fires
pub type EventHandler = Arc<dyn Fn() + Send + Sync>;

/// An event source the container can be told to watch
///
/// For every `listeners.<event>` key the container subscribes a handler under
/// the full key name; firing that event makes the container replay the
/// listener group.
pub trait EventEmitter: Send + Sync {
    /// Run `handler` each time `event` fires
    fn subscribe(&self, event: &str, handler: EventHandler);
}
