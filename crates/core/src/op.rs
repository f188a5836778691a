// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred unit of work

use crate::target::FocusTarget;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A durably stored, uniquely keyed deferred status change.
///
/// Exists in the queue exactly while it has not yet been executed;
/// the drainer removes it before attempting the upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub id: String,
    pub target: FocusTarget,
    pub created_at: DateTime<Utc>,
}

impl PendingOperation {
    pub fn new(id: impl Into<String>, target: FocusTarget) -> Self {
        Self {
            id: id.into(),
            target,
            created_at: Utc::now(),
        }
    }
}
