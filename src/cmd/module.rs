// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `acp` and `mactp` commands.
//!
//! ```text
//! ModuleArgs --> ParamsLoader --> RawParams --> module::execute --> Outcome
//!                     |              |                                |
//!                (load error)    no_log values                     to_json
//!                     |              '-----------> Redactor <---------'
//!                     v                               |
//!               FailureReport ----------------> stdout (one JSON line)
//! ```

use std::io::Write as _;

use anyhow::Context;
use serde_json::Value;
use tracing::{debug, error};

use crate::cli::module::ModuleArgs;
use crate::config::{ENV_PREFIX, ParamsLoader};
use crate::error::{AcpResult, Result};
use crate::core::redact::Redactor;
use crate::module::result::FailureReport;
use crate::module::{ModuleKind, execute};

/// Runs a module and prints its result on stdout.
///
/// Returns the process exit code: 0 on success, 1 when the module failed.
///
/// # Errors
///
/// Returns an error only if the result cannot be written; module failures
/// are reported on stdout.
pub async fn run_module_command(kind: ModuleKind, args: &ModuleArgs) -> Result<u8> {
    let raw = match build_loader(args).and_then(ParamsLoader::build) {
        Ok(raw) => raw,
        Err(err) => {
            let redactor = Redactor::new(Vec::new())?;
            let message = redactor.redact_str(&err.to_string());
            error!(module = %kind, error = %message, "failed to load module arguments");
            let report = FailureReport::from(&err);
            let json = serde_json::to_value(&report).context("failed to serialize failure")?;
            emit(&redactor.redact(json))?;
            return Ok(1);
        }
    };

    for line in raw.format_options() {
        debug!(module = %kind, "{line}");
    }

    let redactor = Redactor::new(raw.no_log_values())?;
    let outcome = execute(kind, raw).await;
    let code = outcome.exit_code();
    emit(&redactor.redact(outcome.to_json()?))?;
    Ok(code)
}

/// Assembles the argument sources in priority order.
///
/// # Errors
///
/// Returns an error if an override key is invalid.
pub fn build_loader(args: &ModuleArgs) -> AcpResult<ParamsLoader> {
    let mut loader = ParamsLoader::new();
    if let Some(defaults) = &args.defaults {
        loader = loader.add_toml_file(defaults);
    }
    if let Some(args_file) = &args.args_file {
        loader = loader.add_json_file(args_file);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    for (key, value) in &args.overrides {
        loader = loader.set(key, value.as_str())?;
    }

    for line in loader.format_loaded_files() {
        debug!("argument source {line}");
    }
    Ok(loader)
}

fn emit(value: &Value) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, value).context("failed to write module result")?;
    writeln!(stdout).context("failed to write module result")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
