// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Focus targets and their upstream document-id mapping

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A logical focus state the upstream account can be switched to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FocusTarget {
    Work,
    Sleep,
    Drive,
    DoNotDisturb,
    None,
}

impl FocusTarget {
    /// All recognized targets, in a stable order
    pub const ALL: [FocusTarget; 5] = [
        FocusTarget::Work,
        FocusTarget::Sleep,
        FocusTarget::Drive,
        FocusTarget::DoNotDisturb,
        FocusTarget::None,
    ];

    /// The opaque upstream identifier this target resolves to
    pub fn document_id(&self) -> &'static str {
        match self {
            FocusTarget::Work => "5418063924933173277",
            FocusTarget::Sleep => "5451959871257713464",
            FocusTarget::Drive => "5445085952194124000",
            FocusTarget::DoNotDisturb => "5332296662142434561",
            FocusTarget::None => "5276020560361432449",
        }
    }

    /// Canonical wire name (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            FocusTarget::Work => "work",
            FocusTarget::Sleep => "sleep",
            FocusTarget::Drive => "drive",
            FocusTarget::DoNotDisturb => "doNotDisturb",
            FocusTarget::None => "none",
        }
    }
}

impl fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for an unrecognized target name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status: {0}")]
pub struct UnknownTarget(pub String);

impl FromStr for FocusTarget {
    type Err = UnknownTarget;

    /// Accepts the canonical camelCase names plus kebab/snake variants
    /// for CLI ergonomics.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(FocusTarget::Work),
            "sleep" => Ok(FocusTarget::Sleep),
            "drive" => Ok(FocusTarget::Drive),
            "doNotDisturb" | "do-not-disturb" | "do_not_disturb" => Ok(FocusTarget::DoNotDisturb),
            "none" => Ok(FocusTarget::None),
            other => Err(UnknownTarget(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
