// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments shared by the module subcommands.

use clap::Args;
use std::path::PathBuf;

/// Arguments for `acp` and `mactp`.
#[derive(Debug, Clone, Default, Args)]
pub struct ModuleArgs {
    /// JSON arguments file written by the controller.
    #[arg(value_name = "ARGS_FILE")]
    pub args_file: Option<PathBuf>,

    /// TOML file of site defaults, overridden by every other source.
    #[arg(short = 'D', long = "defaults", value_name = "FILE")]
    pub defaults: Option<PathBuf>,

    /// Sets a module argument, such as 'push=false' or 'git_config.user_name=bot'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value, action = clap::ArgAction::Append)]
    pub overrides: Vec<(String, String)>,
}

/// Splits `key=value` at the first `=`.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty.
pub fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{input}'")),
    }
}
