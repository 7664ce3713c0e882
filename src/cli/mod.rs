// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for git-acp using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! git-acp [global options] <command>
//! acp   [ARGS_FILE] [--defaults FILE] [--set KEY=VALUE]...
//! mactp [ARGS_FILE] [--defaults FILE] [--set KEY=VALUE]...
//! version
//! ```
//!
//! Ansible runs a binary module as `git-acp <args file>`; the `acp` and
//! `mactp` subcommands take that file as their positional argument.

pub mod global;
pub mod module;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::module::ModuleArgs;
use clap::{Parser, Subcommand};

/// Ansible git add/commit/push modules.
#[derive(Debug, Parser)]
#[command(
    name = "git-acp",
    author,
    version,
    about = "Ansible binary modules for git add/commit/push",
    long_about = "git-acp Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs the git_acp and git_mactp modules. The result is printed\n\
                  as one JSON document on stdout; logs go to stderr.",
    after_help = "ARGUMENTS:\n\n\
                  Module arguments are merged from, lowest priority first: the\n\
                  --defaults TOML file, the JSON args file, GIT_ACP_* environment\n\
                  variables (nested keys use '__', e.g. GIT_ACP_GIT_CONFIG__USER_NAME)\n\
                  and --set KEY=VALUE overrides."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs git_acp: add, commit and push.
    Acp(ModuleArgs),

    /// Runs git_mactp: merge, add, commit, tag and push.
    Mactp(ModuleArgs),

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
