//! External request sources and the in-memory call store
//!
//! External calls are floors requested from outside the car. The dispatcher
//! only ever polls for them; a source hands back whatever is queued at that
//! moment and may forget floors once they have been delivered.

use crate::types::Floor;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Anything that can be polled for floors requested from outside the car
///
/// Polls must not block for long and carry no ordering guarantee. A failed
/// poll is reported as an empty one.
pub trait ExternalRequestSource {
    /// Take the floors currently requested
    fn poll(&mut self) -> Vec<Floor>;
}

/// Owned store of floor calls waiting to be delivered
///
/// Clones share the same calls, so one clone can sit behind a
/// [`CallServer`](super::CallServer) while another is used to add calls.
#[derive(Debug, Clone, Default)]
pub struct CallStore {
    calls: Arc<Mutex<Vec<Floor>>>,
}

impl CallStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn calls(&self) -> MutexGuard<'_, Vec<Floor>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a called floor
    pub fn add_call(&self, floor: Floor) {
        debug!(floor, "External call stored");
        self.calls().push(floor);
    }

    /// Snapshot of the queued calls, oldest first
    pub fn pending(&self) -> Vec<Floor> {
        self.calls().clone()
    }

    /// Remove delivered calls, one stored occurrence per delivered floor
    ///
    /// Calls added after the snapshot was taken are kept.
    pub fn remove_delivered(&self, delivered: &[Floor]) {
        let mut calls = self.calls();
        for floor in delivered {
            if let Some(position) = calls.iter().position(|f| f == floor) {
                calls.remove(position);
            }
        }
    }

    /// Number of queued calls
    pub fn len(&self) -> usize {
        self.calls().len()
    }

    /// Whether no call is queued
    pub fn is_empty(&self) -> bool {
        self.calls().is_empty()
    }
}

impl ExternalRequestSource for CallStore {
    fn poll(&mut self) -> Vec<Floor> {
        std::mem::take(&mut *self.calls())
    }
}
