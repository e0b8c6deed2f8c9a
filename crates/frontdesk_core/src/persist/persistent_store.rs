//! Store wrapper that snapshots after every applied mutation.
//!
//! # Invariants
//! - A mutation that changes state is written before `apply` returns `Ok`.
//! - When the write fails the in-memory state is rolled back, so memory and
//!   the durable slot never diverge.
//! - Mutations that leave state unchanged (not-found misses) skip the write.

use super::{encode_state, load_state, PersistResult, SnapshotStore, ROOT_KEY};
use crate::clock::Clock;
use crate::store::reception_store::{ReceptionStore, StoreOptions};
use log::{debug, error};
use std::time::Instant;

pub struct PersistentStore<S: SnapshotStore> {
    store: ReceptionStore,
    snapshots: S,
}

impl<S: SnapshotStore> PersistentStore<S> {
    /// Rehydrates the store from `snapshots`, or starts empty.
    pub fn open(snapshots: S, clock: impl Clock + 'static, options: StoreOptions) -> Self {
        let state = load_state(&snapshots);
        Self {
            store: ReceptionStore::with_state(state, clock, options),
            snapshots,
        }
    }

    /// Read access for rendering.
    pub fn store(&self) -> &ReceptionStore {
        &self.store
    }

    pub fn snapshots(&self) -> &S {
        &self.snapshots
    }

    /// Runs `mutate` against the store and snapshots the result.
    ///
    /// # Errors
    /// - Returns the write error when the snapshot cannot be stored; the
    ///   store is left exactly as it was before `mutate` ran.
    pub fn apply<T>(
        &mut self,
        operation: &'static str,
        mutate: impl FnOnce(&mut ReceptionStore) -> T,
    ) -> PersistResult<T> {
        let before = self.store.state().clone();
        let output = mutate(&mut self.store);

        if *self.store.state() == before {
            debug!("event=state_persist module=persist status=skip op={operation} reason=unchanged");
            return Ok(output);
        }

        if let Err(err) = self.persist(operation) {
            self.store.restore_state(before);
            return Err(err);
        }
        Ok(output)
    }

    /// Writes the current state to the root slot.
    pub fn persist(&self, operation: &'static str) -> PersistResult<()> {
        let started_at = Instant::now();
        let result = encode_state(self.store.state())
            .and_then(|text| self.snapshots.write(ROOT_KEY, &text).map(|()| text.len()));

        match result {
            Ok(bytes) => {
                debug!(
                    "event=state_persist module=persist status=ok op={operation} key={ROOT_KEY} bytes={bytes} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=state_persist module=persist status=error op={operation} key={ROOT_KEY} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}
