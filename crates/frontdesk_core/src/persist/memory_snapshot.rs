//! In-memory snapshot slots for tests and throwaway sessions.

use super::{PersistResult, SnapshotStore};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    /// Raw slot contents, for assertions.
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> PersistResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
