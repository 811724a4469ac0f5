//! Holder of the authoritative world state.
//!
//! Readers take an `Arc` to the current snapshot and work on it without any
//! lock held. Writers publish a complete replacement value. The pointer lock
//! is only ever held for an `Arc` clone or swap; building replacements and
//! freeing superseded states happen outside it.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use warsim_core::enums::UnitStatus;
use warsim_core::state::WorldState;
use warsim_core::types::{FactionId, GeoPosition, UnitId};

/// Atomically swappable pointer to the latest `WorldState`.
///
/// There is one intended writer, the engine. Other writers must build their
/// replacement from a fresh snapshot; publishing is last-writer-wins and
/// nothing is merged.
#[derive(Debug, Default)]
pub struct WorldStore {
    current: RwLock<Arc<WorldState>>,
    /// Serializes writers so a read-clone-replace edit cannot interleave
    /// with another publish. Readers never touch it.
    writer: Mutex<()>,
}

impl WorldStore {
    pub fn new(initial: WorldState) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            writer: Mutex::new(()),
        }
    }

    /// The latest published state. Never blocks on a running tick.
    pub fn get_snapshot(&self) -> Arc<WorldState> {
        Arc::clone(&self.current.read())
    }

    /// Publish `next`, replacing whatever was current.
    pub fn update_state(&self, next: WorldState) {
        self.publish(Arc::new(next));
    }

    pub(crate) fn publish(&self, next: Arc<WorldState>) {
        let _writer = self.writer.lock();
        drop(self.swap(next));
    }

    /// Swap the pointer and hand back the previous state, so the caller drops
    /// it after the lock is released.
    fn swap(&self, next: Arc<WorldState>) -> Arc<WorldState> {
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Replace a faction's ally list. Returns false for an unknown faction.
    pub fn update_allies(&self, faction: FactionId, allies: Vec<FactionId>) -> bool {
        self.modify(|state| {
            let Some(entry) = state.factions.iter_mut().find(|f| f.id == faction) else {
                return false;
            };
            entry.allies = allies;
            true
        })
    }

    /// Teleport a unit and mark it moving. Returns false for an unknown unit.
    pub fn relocate_unit(&self, unit: UnitId, position: GeoPosition) -> bool {
        self.modify(|state| {
            let Some(entry) = state.units.iter_mut().find(|u| u.id == unit) else {
                return false;
            };
            entry.position = position;
            entry.status = UnitStatus::Moving;
            true
        })
    }

    /// Read-clone-replace while holding the writer lock, so concurrent
    /// writers do not lose each other's edits. Readers keep seeing the
    /// previous state until the swap. The tick counter is left untouched.
    fn modify(&self, edit: impl FnOnce(&mut WorldState) -> bool) -> bool {
        let _writer = self.writer.lock();
        let mut next = WorldState::clone(&self.get_snapshot());
        if !edit(&mut next) {
            return false;
        }
        drop(self.swap(Arc::new(next)));
        true
    }
}
