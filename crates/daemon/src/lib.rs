// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fx-daemon: HTTP front end and drainer host for the fx focus relay

pub mod config;
pub mod server;

pub use config::{Config, ConfigError};
pub use server::{router, AppState};
