//! Tracks artworks with a generation currently running.
//!
//! A second generation for the same artwork is refused instead of racing
//! the first one's write. The id is released when the guard drops, which
//! covers success, failure and a cancelled request future alike.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use atelier_core::types::DbId;

#[derive(Debug, Default)]
pub struct InFlightGenerations {
    ids: Mutex<HashSet<DbId>>,
}

impl InFlightGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `artwork_id` as generating. Returns `None` if it already is.
    pub fn try_acquire(self: &Arc<Self>, artwork_id: DbId) -> Option<InFlightGuard> {
        let inserted = self
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(artwork_id);
        inserted.then(|| InFlightGuard {
            owner: Arc::clone(self),
            artwork_id,
        })
    }
}

/// Releases its artwork id on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    owner: Arc<InFlightGenerations>,
    artwork_id: DbId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.owner
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.artwork_id);
    }
}
