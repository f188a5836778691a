// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-driven daemon configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind: SocketAddr,
    /// Root directory of the durable store
    pub state_dir: PathBuf,
    /// Base URL of the upstream bridge
    pub bridge_url: String,
    /// Shared secret required in `x-auth-token`; absent means open access
    pub auth_token: Option<String>,
    /// Lock watch poll interval
    pub poll_interval: Duration,
    /// Drainer back-off after a store failure
    pub retry_backoff: Duration,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("could not determine state directory (set FX_STATE_DIR or HOME)")]
    NoStateDir,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bridge_url = lookup("FX_BRIDGE_URL").ok_or(ConfigError::Missing("FX_BRIDGE_URL"))?;

        let bind = match lookup("FX_BIND") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: "FX_BIND",
                reason: format!("{}", e),
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 8787)),
        };

        let state_dir = match lookup("FX_STATE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_state_dir(&lookup)?,
        };

        let auth_token = lookup("FX_AUTH_TOKEN").filter(|t| !t.is_empty());

        let poll_interval = duration_var(&lookup, "FX_POLL_INTERVAL", Duration::from_millis(250))?;
        let retry_backoff = duration_var(&lookup, "FX_RETRY_BACKOFF", Duration::from_secs(1))?;

        Ok(Self {
            bind,
            state_dir,
            bridge_url,
            auth_token,
            poll_interval,
            retry_backoff,
        })
    }
}

fn duration_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match lookup(name) {
        Some(raw) => humantime::parse_duration(&raw).map_err(|e| ConfigError::Invalid {
            name,
            reason: format!("{}", e),
        }),
        None => Ok(default),
    }
}

/// Default store root: XDG_STATE_HOME or ~/.local/state
fn default_state_dir(lookup: &impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(xdg) = lookup("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("fx"));
    }
    let home = lookup("HOME").ok_or(ConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/fx"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
