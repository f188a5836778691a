// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background drain loop for deferred operations
//!
//! A single long-lived state machine per process: Idle (subscribed, waiting
//! for a release event) -> Draining (lock held, processing the queue) ->
//! Idle. Operations enqueued while a drain is in flight wait for the next
//! cycle; releasing the lock at the end of a batch is itself the event that
//! guarantees the loop re-triggers.

use crate::client::{StatusClient, StatusError};
use crate::id::IdGen;
use crate::kv::KvError;
use crate::lock::LockStore;
use crate::op::PendingOperation;
use crate::queue::PendingQueue;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Drainer tuning
#[derive(Clone, Debug)]
pub struct DrainerConfig {
    /// Lock watch poll interval
    pub poll_interval: Duration,
    /// Back-off after a store failure before resubscribing
    pub retry_backoff: Duration,
}

impl Default for DrainerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(250),
            retry_backoff: Duration::from_secs(1),
        }
    }
}

/// Outcome of one drain cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Entries delivered upstream successfully
    pub processed: usize,
    /// Entries removed whose upstream call failed (terminal, logged)
    pub failed: usize,
    /// True when the batch stopped early on an unreachable upstream;
    /// entries not yet removed stay queued
    pub aborted: bool,
}

/// Long-lived queue drainer
pub struct Drainer<C, G: IdGen> {
    lock: LockStore,
    queue: PendingQueue<G>,
    client: Arc<C>,
    config: DrainerConfig,
}

impl<C: StatusClient, G: IdGen> Drainer<C, G> {
    pub fn new(
        lock: LockStore,
        queue: PendingQueue<G>,
        client: Arc<C>,
        config: DrainerConfig,
    ) -> Self {
        Self {
            lock,
            queue,
            client,
            config,
        }
    }

    /// Run until the shutdown flag flips to true.
    ///
    /// The subscription emits the current lock value first, so a process
    /// starting with a free lock and a leftover queue drains immediately
    /// instead of waiting for a transition.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("drainer started");
        let mut events = self.lock.subscribe(self.config.poll_interval);

        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(false) => {
                            if let Err(e) = self.drain_cycle().await {
                                tracing::warn!(error = %e, "drain cycle failed, backing off");
                                tokio::time::sleep(self.config.retry_backoff).await;
                                // Resubscribe so the initial-value event retries the drain
                                events = self.lock.subscribe(self.config.poll_interval);
                            }
                        }
                        Some(true) => {
                            tracing::debug!("lock taken elsewhere");
                        }
                        None => {
                            tracing::warn!("lock watch ended, resubscribing");
                            tokio::time::sleep(self.config.retry_backoff).await;
                            events = self.lock.subscribe(self.config.poll_interval);
                        }
                    }
                }
                changed = shutdown.changed() => {
                    // A dropped sender means the daemon is gone; stop too
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("drainer stopping");
                        return;
                    }
                }
            }
        }
    }

    /// One drain attempt: snapshot the queue, take the lock, deliver every
    /// entry in order, release.
    ///
    /// The event that got us here is only a wake-up; the queue and lock are
    /// re-read before anything happens. An empty queue acquires nothing -
    /// no needless lock churn.
    pub async fn drain_cycle(&self) -> Result<DrainReport, KvError> {
        let entries = self.queue.list_all()?;
        if entries.is_empty() {
            return Ok(DrainReport::default());
        }

        if !self.lock.try_acquire()? {
            // Lost the race; whoever won will release and re-trigger us
            tracing::debug!("drain skipped, lock contended");
            return Ok(DrainReport::default());
        }

        tracing::info!(pending = entries.len(), "draining queue");
        let result = self.deliver(entries).await;

        // Unlock even when the batch died on a store error; a wedged lock
        // would outlive the backoff and stall every later drain
        if let Err(e) = self.lock.release() {
            tracing::error!(error = %e, "failed to release lock after drain");
            if result.is_ok() {
                return Err(e);
            }
        }

        result
    }

    async fn deliver(
        &self,
        entries: Vec<(String, PendingOperation)>,
    ) -> Result<DrainReport, KvError> {
        let mut report = DrainReport::default();

        for (key, op) in entries {
            // Remove before executing: double-processing ambiguity is
            // resolved toward at-most-once
            self.queue.remove(&key)?;

            match self.client.set_status(op.target).await {
                Ok(()) => {
                    tracing::info!(id = %op.id, target = %op.target, "deferred operation delivered");
                    report.processed += 1;
                }
                Err(StatusError::Unreachable(reason)) => {
                    tracing::error!(
                        id = %op.id,
                        target = %op.target,
                        %reason,
                        "upstream unreachable, aborting batch"
                    );
                    report.failed += 1;
                    report.aborted = true;
                    break;
                }
                Err(e) => {
                    // Partial-failure semantics: log and keep going
                    tracing::error!(id = %op.id, target = %op.target, error = %e, "deferred operation failed");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
#[path = "drainer_tests.rs"]
mod tests;
