// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fx - focus status relay CLI
//!
//! Administrative entry point operating directly on the durable store,
//! bypassing the gate and drainer. This is the operator escape hatch for a
//! stuck lock and for inspecting or discarding the pending queue.

mod commands;
mod completions;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{lock, queue};
use fx_store::FileKvStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fx", version, about = "fx - focus status relay")]
struct Cli {
    /// Store root directory (defaults to FX_STATE_DIR, then the XDG state dir)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or force the exclusive lock
    Lock {
        #[command(subcommand)]
        command: lock::LockCommand,
    },
    /// Inspect or clear the pending operation queue
    Queue {
        #[command(subcommand)]
        command: queue::QueueCommand,
    },
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        completions::write_completions::<Cli>(args.shell, &mut std::io::stdout());
        return Ok(());
    }

    let state_dir = resolve_state_dir(cli.state_dir)?;
    let store = Arc::new(FileKvStore::open(&state_dir)?);

    match cli.command {
        Commands::Lock { command } => lock::handle(store, command),
        Commands::Queue { command } => queue::handle(store, command),
        Commands::Completions(_) => Ok(()),
    }
}

/// Same resolution order as the daemon: flag, FX_STATE_DIR,
/// XDG_STATE_HOME/fx, ~/.local/state/fx.
fn resolve_state_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var("FX_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("fx"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("cannot determine state dir: set --state-dir or HOME"))?;
    Ok(PathBuf::from(home).join(".local/state/fx"))
}
