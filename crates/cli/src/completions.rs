// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion output
//!
//! `fx completions <shell>` prints a completion script to stdout; users
//! redirect it to wherever their shell loads completions from, e.g.
//! `fx completions zsh > ~/.zfunc/_fx`.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Arguments for the completions command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write a completion script for `shell` to `out`. The binary name is taken
/// from the command definition rather than repeated here.
pub fn write_completions<C: CommandFactory>(shell: Shell, out: &mut impl Write) {
    let mut cmd = C::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}
