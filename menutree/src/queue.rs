//! Pending add/remove requests.
//!
//! Producers on any thread only ever touch these queues; the tree itself is
//! edited when the render thread drains them. Each queue has its own lock so
//! additions and removals never contend with each other or with a traversal.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use crate::handler::Handler;

/// A drained batch, ready to be applied.
#[derive(Default)]
pub struct Batch {
    /// Paths to remove. Applied first.
    pub removals: BTreeSet<String>,
    /// Paths to add, keyed by path. Applied after removals.
    pub additions: BTreeMap<String, Handler>,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.additions.is_empty()
    }
}

impl fmt::Debug for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batch")
            .field("removals", &self.removals)
            .field("additions", &self.additions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The two request queues.
///
/// Lock order is always removals, then additions.
#[derive(Default)]
pub struct RequestQueues {
    removals: Mutex<BTreeSet<String>>,
    additions: Mutex<BTreeMap<String, Handler>>,
}

impl RequestQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `path` for removal. Removing the same path twice before a drain
    /// queues it once.
    pub fn push_removal(&self, path: String) {
        lock(&self.removals).insert(path);
    }

    /// Queue `handler` to be attached at `path`. A later addition for the same
    /// path replaces an earlier one that has not been drained yet.
    pub fn push_addition(&self, path: String, handler: Handler) {
        lock(&self.additions).insert(path, handler);
    }

    /// Queue a removal and an addition for the same path so that both land in
    /// the same batch.
    pub fn push_replacement(&self, path: String, handler: Handler) {
        let mut removals = lock(&self.removals);
        let mut additions = lock(&self.additions);
        removals.insert(path.clone());
        additions.insert(path, handler);
    }

    /// Take everything queued so far, leaving both queues empty.
    pub fn drain(&self) -> Batch {
        let mut removals = lock(&self.removals);
        let mut additions = lock(&self.additions);
        Batch {
            removals: std::mem::take(&mut *removals),
            additions: std::mem::take(&mut *additions),
        }
    }

    pub fn pending_removals(&self) -> usize {
        lock(&self.removals).len()
    }

    pub fn pending_additions(&self) -> usize {
        lock(&self.additions).len()
    }
}

impl fmt::Debug for RequestQueues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestQueues")
            .field("removals", &self.pending_removals())
            .field("additions", &self.pending_additions())
            .finish()
    }
}

/// Lock `mutex`, recovering the data if a previous holder panicked. Queue
/// inserts cannot leave the data half-written.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
