// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable exclusive-lock flag
//!
//! The lock is a single boolean key in the store and the only source of
//! truth for "is it safe to call the upstream client now". Acquisition goes
//! through compare-and-swap, so two gates (or a gate and the drainer) racing
//! for a free lock cannot both win, within or across processes.

use crate::kv::{KvError, KvStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const LOCKED: &[u8] = b"true";
const UNLOCKED: &[u8] = b"false";

/// Boolean exclusive-lock abstraction over a `KvStore` key
#[derive(Clone)]
pub struct LockStore {
    store: Arc<dyn KvStore>,
    key: String,
}

impl LockStore {
    pub fn new(store: Arc<dyn KvStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Read the current flag. An absent key reads as unlocked.
    pub fn is_locked(&self) -> Result<bool, KvError> {
        Ok(self.store.get(&self.key)?.as_deref() == Some(LOCKED))
    }

    /// Unconditional administrative write. Idempotent: re-unlocking an
    /// unlocked lock is a no-op, not an error.
    pub fn set_locked(&self, locked: bool) -> Result<(), KvError> {
        self.store
            .put(&self.key, if locked { LOCKED } else { UNLOCKED })
    }

    /// Attempt to take the lock: compare-and-swap unlocked -> locked.
    /// Returns false when the lock is already held or another acquirer won
    /// the race. Never blocks waiting for the lock.
    pub fn try_acquire(&self) -> Result<bool, KvError> {
        let current = self.store.get(&self.key)?;
        if current.as_deref() == Some(LOCKED) {
            return Ok(false);
        }
        self.store
            .compare_and_swap(&self.key, current.as_deref(), LOCKED)
    }

    /// Release the lock. Unconditional and idempotent; releasing also wakes
    /// every subscriber, which is what re-triggers the drainer.
    pub fn release(&self) -> Result<(), KvError> {
        self.set_locked(false)
    }

    /// Subscribe to lock-state changes.
    ///
    /// The store has no native change notification, so this spawns a poller
    /// that emits the current value immediately and then every observed
    /// change. Delivery is at-least-once and coalescing: rapid toggles
    /// between polls collapse, so events are wake-ups, not authoritative
    /// state - consumers re-read the lock before acting.
    pub fn subscribe(&self, poll_interval: Duration) -> LockWatch {
        let (tx, rx) = mpsc::channel(16);
        let store = self.clone();

        let task = tokio::spawn(async move {
            let mut last: Option<bool> = None;
            loop {
                match store.is_locked() {
                    Ok(value) => {
                        if last != Some(value) {
                            last = Some(value);
                            if tx.send(value).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "lock watch read failed");
                    }
                }
                tokio::time::sleep(poll_interval).await;
            }
        });

        LockWatch { rx, task }
    }
}

/// A cancellable subscription to lock-state changes.
/// Dropping the watch stops the underlying poller.
pub struct LockWatch {
    rx: mpsc::Receiver<bool>,
    task: JoinHandle<()>,
}

impl LockWatch {
    /// Wait for the next observed lock value.
    /// Returns `None` only if the poller has stopped.
    pub async fn recv(&mut self) -> Option<bool> {
        self.rx.recv().await
    }
}

impl Drop for LockWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
