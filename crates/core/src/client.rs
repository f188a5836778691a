// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream status client seam
//!
//! The upstream session is exclusive: at most one `set_status` call may be
//! in flight at any time, which is exactly what the lock guards. The client
//! itself is opaque to this crate.

use crate::target::FocusTarget;
use async_trait::async_trait;
use thiserror::Error;

/// Upstream call failures
#[derive(Debug, Error)]
pub enum StatusError {
    /// Could not reach the upstream at all. During a drain this aborts the
    /// remaining batch; entries not yet taken stay queued.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The upstream answered and refused the change.
    #[error("status change rejected: {0}")]
    Rejected(String),
}

/// Opaque capability to perform one state change against the upstream
#[async_trait]
pub trait StatusClient: Send + Sync {
    async fn set_status(&self, target: FocusTarget) -> Result<(), StatusError>;
}

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStatusClient, StatusCall};

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{StatusClient, StatusError};
    use crate::target::FocusTarget;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Recorded upstream call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct StatusCall {
        pub target: FocusTarget,
        pub accepted: bool,
    }

    /// Fake status client for testing: records every call and can be
    /// scripted to fail.
    #[derive(Clone, Default)]
    pub struct FakeStatusClient {
        calls: Arc<Mutex<Vec<StatusCall>>>,
        failures: Arc<Mutex<VecDeque<StatusError>>>,
        in_flight: Arc<Mutex<usize>>,
        max_in_flight: Arc<Mutex<usize>>,
    }

    impl FakeStatusClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a failure for an upcoming call (consumed in order).
        pub fn push_failure(&self, error: StatusError) {
            self.failures
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push_back(error);
        }

        /// All recorded calls, in order.
        pub fn calls(&self) -> Vec<StatusCall> {
            self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }

        /// Targets of accepted calls only.
        pub fn accepted_targets(&self) -> Vec<FocusTarget> {
            self.calls()
                .into_iter()
                .filter(|c| c.accepted)
                .map(|c| c.target)
                .collect()
        }

        /// Highest number of concurrently in-flight calls observed.
        /// Anything above 1 is a mutual-exclusion violation.
        pub fn max_in_flight(&self) -> usize {
            *self.max_in_flight.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl StatusClient for FakeStatusClient {
        async fn set_status(&self, target: FocusTarget) -> Result<(), StatusError> {
            {
                let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
                *in_flight += 1;
                let mut max = self.max_in_flight.lock().unwrap_or_else(|e| e.into_inner());
                if *in_flight > *max {
                    *max = *in_flight;
                }
            }

            // Yield so overlapping callers would actually overlap here
            tokio::task::yield_now().await;

            let outcome = self
                .failures
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front();

            *self.in_flight.lock().unwrap_or_else(|e| e.into_inner()) -= 1;

            match outcome {
                Some(error) => {
                    self.calls
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .push(StatusCall {
                            target,
                            accepted: false,
                        });
                    Err(error)
                }
                None => {
                    self.calls
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .push(StatusCall {
                            target,
                            accepted: true,
                        });
                    Ok(())
                }
            }
        }
    }
}
