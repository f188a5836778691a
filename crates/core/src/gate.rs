// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-request decision logic: execute now or defer
//!
//! The gate never waits for the lock. A compare-and-swap either wins the
//! lock and executes inline, or loses and enqueues the operation for the
//! drainer. The lock is released on every inline outcome, success or not.

use crate::client::{StatusClient, StatusError};
use crate::id::IdGen;
use crate::kv::KvError;
use crate::lock::LockStore;
use crate::queue::PendingQueue;
use crate::target::FocusTarget;
use std::sync::Arc;
use thiserror::Error;

/// Result of submitting one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Lock was free; the change was performed inline.
    Executed,
    /// Lock was held; the operation is durably queued for the next drain.
    Queued { id: String },
}

/// Gate errors
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Store(#[from] KvError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

/// Per-incoming-operation gate over the shared lock and queue
pub struct RequestGate<C, G: IdGen> {
    lock: LockStore,
    queue: PendingQueue<G>,
    client: Arc<C>,
}

impl<C, G: IdGen> Clone for RequestGate<C, G> {
    fn clone(&self) -> Self {
        Self {
            lock: self.lock.clone(),
            queue: self.queue.clone(),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: StatusClient, G: IdGen> RequestGate<C, G> {
    pub fn new(lock: LockStore, queue: PendingQueue<G>, client: Arc<C>) -> Self {
        Self {
            lock,
            queue,
            client,
        }
    }

    /// Submit one well-formed operation.
    ///
    /// Target validation happens at the HTTP boundary; by the time a target
    /// reaches the gate it is known.
    ///
    /// If the upstream call succeeds but the release write fails, the error
    /// is surfaced even though the change applied: the lock is now stuck and
    /// the caller should learn the relay is degraded, not that all is well.
    pub async fn submit(&self, target: FocusTarget) -> Result<GateOutcome, GateError> {
        if !self.lock.try_acquire()? {
            let op = self.queue.enqueue(target)?;
            tracing::info!(id = %op.id, target = %target, "lock held, operation deferred");
            return Ok(GateOutcome::Queued { id: op.id });
        }

        tracing::info!(target = %target, "lock acquired, executing inline");
        let result = self.client.set_status(target).await;

        // Unlock on every outcome; a failed call must not wedge the lock
        if let Err(e) = self.lock.release() {
            tracing::error!(error = %e, "failed to release lock after inline call");
            if result.is_ok() {
                return Err(e.into());
            }
        }

        result?;
        Ok(GateOutcome::Executed)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
