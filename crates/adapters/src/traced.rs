// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced client wrapper for consistent observability

use async_trait::async_trait;
use fx_core::{FocusTarget, StatusClient, StatusError};

/// Wrapper that adds tracing to any StatusClient
#[derive(Clone)]
pub struct TracedStatusClient<C> {
    inner: C,
}

impl<C> TracedStatusClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: StatusClient> StatusClient for TracedStatusClient<C> {
    async fn set_status(&self, target: FocusTarget) -> Result<(), StatusError> {
        let span = tracing::info_span!("status.set", target = %target);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.set_status(target).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                "status change applied"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "status change failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
