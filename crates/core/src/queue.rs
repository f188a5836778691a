//! Durable queue of deferred operations
//!
//! Entries live under a shared key prefix; each enqueue mints a fresh
//! monotonic id, so the store's key-ordered enumeration is creation order.
//! Enqueues never overwrite: key uniqueness, not last-write-wins, is what
//! prevents loss under concurrent submission.

use crate::id::IdGen;
use crate::kv::{KvError, KvStore};
use crate::op::PendingOperation;
use crate::target::FocusTarget;
use std::sync::Arc;

/// Durable queue of pending status changes
#[derive(Clone)]
pub struct PendingQueue<G: IdGen> {
    store: Arc<dyn KvStore>,
    prefix: String,
    ids: G,
}

impl<G: IdGen> PendingQueue<G> {
    pub fn new(store: Arc<dyn KvStore>, prefix: impl Into<String>, ids: G) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            ids,
        }
    }

    /// Append a new operation under a fresh unique key.
    pub fn enqueue(&self, target: FocusTarget) -> Result<PendingOperation, KvError> {
        let op = PendingOperation::new(self.ids.next(), target);
        let payload = serde_json::to_vec(&op)?;
        self.store.put(&self.key_for(&op.id), &payload)?;
        tracing::debug!(id = %op.id, target = %op.target, "operation queued");
        Ok(op)
    }

    /// Snapshot all queued operations in key (= creation) order.
    ///
    /// Entries that no longer parse are skipped with a warning rather than
    /// failing the whole drain.
    pub fn list_all(&self) -> Result<Vec<(String, PendingOperation)>, KvError> {
        let mut ops = Vec::new();
        for (key, payload) in self.store.list(&self.prefix)? {
            match serde_json::from_slice(&payload) {
                Ok(op) => ops.push((key, op)),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "skipping unreadable queue entry");
                }
            }
        }
        Ok(ops)
    }

    /// Remove an entry by its storage key. Removing a missing key is fine.
    pub fn remove(&self, key: &str) -> Result<(), KvError> {
        self.store.delete(key)
    }

    /// Drop every queued operation. The explicit operator escape hatch;
    /// returns how many entries were discarded.
    pub fn clear(&self) -> Result<usize, KvError> {
        let entries = self.store.list(&self.prefix)?;
        let count = entries.len();
        for (key, _) in entries {
            self.store.delete(&key)?;
        }
        if count > 0 {
            tracing::info!(count, "queue cleared");
        }
        Ok(count)
    }

    pub fn len(&self) -> Result<usize, KvError> {
        Ok(self.store.list(&self.prefix)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, KvError> {
        Ok(self.len()? == 0)
    }

    fn key_for(&self, id: &str) -> String {
        format!("{}{}", self.prefix, id)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
