// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock override commands
//!
//! These write the lock flag directly. Forcing the lock off while a drain
//! is genuinely in flight re-opens the exclusivity window, so this is for
//! recovering from a crash that left the flag stuck, not routine use.

use clap::Subcommand;
use fx_core::LockStore;
use fx_store::FileKvStore;
use std::sync::Arc;

const LOCK_KEY: &str = "locked";

#[derive(Subcommand)]
pub enum LockCommand {
    /// Print the current lock state
    Show,
    /// Force the lock to a value
    Set {
        /// true to lock, false to unlock
        #[arg(action = clap::ArgAction::Set, value_parser = clap::value_parser!(bool))]
        value: bool,
    },
    /// Invert the current lock state
    Toggle,
}

pub fn handle(store: Arc<FileKvStore>, command: LockCommand) -> anyhow::Result<()> {
    let lock = LockStore::new(store, LOCK_KEY);

    let value = match command {
        LockCommand::Show => lock.is_locked()?,
        LockCommand::Set { value } => {
            lock.set_locked(value)?;
            value
        }
        LockCommand::Toggle => {
            let value = !lock.is_locked()?;
            lock.set_locked(value)?;
            value
        }
    };

    println!("{}", if value { "Locked" } else { "Unlocked" });
    Ok(())
}
