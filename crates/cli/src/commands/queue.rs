// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue inspection commands

use crate::output::{self, OutputFormat};
use clap::Subcommand;
use fx_core::{MonotonicIdGen, PendingQueue};
use fx_store::FileKvStore;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

const QUEUE_PREFIX: &str = "queue/";

#[derive(Subcommand)]
pub enum QueueCommand {
    /// List pending operations in drain order
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Discard every pending operation
    Clear,
}

#[derive(Serialize)]
struct QueueEntryInfo {
    id: String,
    target: String,
    created_at: String,
}

impl fmt::Display for QueueEntryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<30} {:<14} {}",
            self.id, self.target, self.created_at
        )
    }
}

pub fn handle(store: Arc<FileKvStore>, command: QueueCommand) -> anyhow::Result<()> {
    let queue = PendingQueue::new(store, QUEUE_PREFIX, MonotonicIdGen::new());

    match command {
        QueueCommand::List { format } => {
            let entries: Vec<_> = queue
                .list_all()?
                .into_iter()
                .map(|(_, op)| QueueEntryInfo {
                    id: op.id,
                    target: op.target.to_string(),
                    created_at: op.created_at.to_rfc3339(),
                })
                .collect();

            if entries.is_empty() {
                match format {
                    OutputFormat::Text => println!("queue is empty"),
                    OutputFormat::Json => println!("[]"),
                }
            } else {
                output::print_list(&entries, format);
            }
        }
        QueueCommand::Clear => {
            let count = queue.clear()?;
            println!("Cleared {} operation(s)", count);
        }
    }

    Ok(())
}
