//! Weak Handles
//!
//! Weak handles observe an object without keeping it alive. The mark phase
//! never looks at this table.
//!
//! Two flavours exist:
//! - **Short** handles (the default) die as soon as a collection finds their
//!   target unreachable, even when the target still has a finalizer to run.
//! - **Long** handles (`track_resurrection`) survive finalization and die
//!   only when the target is actually reclaimed.
//!
//! A dead handle stays dead. Handles are issued from a counter and never
//! reused, so resolving an old handle can never yield a newer object.

use super::header::ObjectId;
use crate::error::{GcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque weak handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeakHandle(pub u32);

impl fmt::Display for WeakHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weak#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct WeakSlot {
    target: Option<ObjectId>,
    track_resurrection: bool,
}

/// WeakHandleTable - handle -> target mapping
#[derive(Debug, Default)]
pub struct WeakHandleTable {
    slots: Vec<WeakSlot>,
    cleared: u64,
}

impl WeakHandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new handle for `target`
    pub fn create(&mut self, target: ObjectId, track_resurrection: bool) -> WeakHandle {
        assert!(self.slots.len() < u32::MAX as usize, "weak handle space exhausted");
        let handle = WeakHandle(self.slots.len() as u32);
        self.slots.push(WeakSlot {
            target: Some(target),
            track_resurrection,
        });
        handle
    }

    /// Current target, `None` once the handle is dead
    pub fn resolve(&self, handle: WeakHandle) -> Result<Option<ObjectId>> {
        self.slots
            .get(handle.0 as usize)
            .map(|slot| slot.target)
            .ok_or(GcError::UnknownWeakHandle { handle })
    }

    /// Whether the handle was created with `track_resurrection`
    pub fn tracks_resurrection(&self, handle: WeakHandle) -> Result<bool> {
        self.slots
            .get(handle.0 as usize)
            .map(|slot| slot.track_resurrection)
            .ok_or(GcError::UnknownWeakHandle { handle })
    }

    /// Kill short handles whose target fails `is_live`
    ///
    /// Returns the number of handles invalidated.
    pub fn clear_short<F>(&mut self, mut is_live: F) -> usize
    where
        F: FnMut(ObjectId) -> bool,
    {
        let mut count = 0;
        for slot in self.slots.iter_mut().filter(|slot| !slot.track_resurrection) {
            if let Some(target) = slot.target {
                if !is_live(target) {
                    slot.target = None;
                    count += 1;
                }
            }
        }
        self.cleared += count as u64;
        count
    }

    /// Kill every handle (short or long) still pointing at a reclaimed object
    pub fn clear_reclaimed<F>(&mut self, mut was_reclaimed: F) -> usize
    where
        F: FnMut(ObjectId) -> bool,
    {
        let mut count = 0;
        for slot in &mut self.slots {
            if let Some(target) = slot.target {
                if was_reclaimed(target) {
                    slot.target = None;
                    count += 1;
                }
            }
        }
        self.cleared += count as u64;
        count
    }

    /// Handles issued so far
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Handles that still resolve to an object
    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.target.is_some()).count()
    }

    /// Total handles invalidated over the collector's lifetime
    pub fn cleared_total(&self) -> u64 {
        self.cleared
    }
}
