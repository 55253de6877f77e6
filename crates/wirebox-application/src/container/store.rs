//! Slot arena backing the container
//!
//! Every key owns one slot for the lifetime of the container. A slot moves
//! through `Uncompiled(raw) -> Compiling -> Compiled(value)`; re-`set`
//! overwrites the state in place and keeps the slot index.

use std::collections::HashMap;

use wirebox_domain::{DeferredValue, Error, Result, Value};

/// Index of a slot in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotId(usize);

#[derive(Debug)]
pub(crate) enum SlotState {
    Uncompiled(DeferredValue),
    Compiling,
    Compiled(Value),
}

#[derive(Debug)]
struct Slot {
    key: String,
    state: SlotState,
}

/// Result of checking a slot out for reading
pub(crate) enum Checkout {
    /// The slot was deferred and is now marked as compiling
    Deferred(SlotId, DeferredValue),
    /// The slot already holds its compiled value
    Compiled(Value),
}

#[derive(Debug, Default)]
pub(crate) struct Store {
    slots: Vec<Slot>,
    index: HashMap<String, SlotId>,
}

impl Store {
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn state(&self, key: &str) -> Option<&SlotState> {
        self.index.get(key).map(|id| &self.slots[id.0].state)
    }

    /// Keys in the order they were first set
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.key.as_str())
    }

    /// Store `state` under `key`, reusing the key's slot when it exists
    pub fn put(&mut self, key: &str, state: SlotState) -> SlotId {
        if let Some(&id) = self.index.get(key) {
            self.slots[id.0].state = state;
            return id;
        }
        let id = SlotId(self.slots.len());
        self.slots.push(Slot {
            key: key.to_string(),
            state,
        });
        self.index.insert(key.to_string(), id);
        id
    }

    /// Take the value of `key` for reading
    ///
    /// A deferred slot is marked as compiling; the caller must `finish` or
    /// `abort` it. Checking out a slot that is already compiling means the
    /// key refers to itself.
    pub fn checkout(&mut self, key: &str) -> Result<Checkout> {
        let id = *self
            .index
            .get(key)
            .ok_or_else(|| Error::key_reference(key))?;
        let slot = &mut self.slots[id.0];
        match std::mem::replace(&mut slot.state, SlotState::Compiling) {
            SlotState::Uncompiled(deferred) => Ok(Checkout::Deferred(id, deferred)),
            SlotState::Compiled(value) => {
                slot.state = SlotState::Compiled(value.clone());
                Ok(Checkout::Compiled(value))
            }
            SlotState::Compiling => Err(Error::circular_reference(key)),
        }
    }

    /// Memoize the compiled value, unless the key was re-set meanwhile
    pub fn finish(&mut self, id: SlotId, value: Value) {
        let slot = &mut self.slots[id.0];
        if matches!(slot.state, SlotState::Compiling) {
            slot.state = SlotState::Compiled(value);
        }
    }

    /// Put the deferred value back after a failed compilation
    pub fn abort(&mut self, id: SlotId, deferred: DeferredValue) {
        let slot = &mut self.slots[id.0];
        if matches!(slot.state, SlotState::Compiling) {
            slot.state = SlotState::Uncompiled(deferred);
        }
    }
}
