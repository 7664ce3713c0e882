// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module result protocol.
//!
//! ```text
//! success (exit 0)                     failure (exit 1)
//! {                                    {
//!   "changed": true,                     "failed": true,
//!   "failed": false,                     "changed": false,
//!   "warnings": [...],   (if any)        "msg": "Error in running '...' command",
//!   "git_commit": {                      "rc": 1,          (command failures)
//!     "output": "...",                   "command": "...",
//!     "error": "...",                    "stdout": "...",
//!     "changed": true                    "stderr": "..."
//!   },                                 }
//!   "git_push": {...}
//! }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{AcpError, GitError, ProcessError};

/// Git operation a record belongs to, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Operation {
    #[serde(rename = "git_checkout")]
    Checkout,
    #[serde(rename = "git_config")]
    Config,
    #[serde(rename = "git_remote")]
    Remote,
    #[serde(rename = "git_pull")]
    Pull,
    #[serde(rename = "git_merge")]
    Merge,
    #[serde(rename = "git_commit")]
    Commit,
    #[serde(rename = "git_tag")]
    Tag,
    #[serde(rename = "git_clean")]
    Clean,
    #[serde(rename = "git_push")]
    Push,
}

impl Operation {
    /// Result key of this operation.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Checkout => "git_checkout",
            Self::Config => "git_config",
            Self::Remote => "git_remote",
            Self::Pull => "git_pull",
            Self::Merge => "git_merge",
            Self::Commit => "git_commit",
            Self::Tag => "git_tag",
            Self::Clean => "git_clean",
            Self::Push => "git_push",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Captured outcome of one git operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationRecord {
    pub output: String,
    pub error: String,
    pub changed: bool,
}

impl OperationRecord {
    #[must_use]
    pub fn new(output: impl Into<String>, error: impl Into<String>, changed: bool) -> Self {
        Self {
            output: output.into(),
            error: error.into(),
            changed,
        }
    }

    /// Record for a write skipped in check mode.
    #[must_use]
    pub fn predicted() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }
}

/// Successful module result.
///
/// `changed` is derived from the records so it can never disagree with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleResult {
    changed: bool,
    failed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(flatten)]
    operations: BTreeMap<Operation, OperationRecord>,
}

impl ModuleResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the record of an operation that ran.
    pub fn record(&mut self, operation: Operation, record: OperationRecord) -> &mut Self {
        self.operations.insert(operation, record);
        self.changed = self.operations.values().any(|r| r.changed);
        self
    }

    pub fn warn(&mut self, message: impl Into<String>) -> &mut Self {
        let message = message.into();
        if !message.is_empty() {
            self.warnings.push(message);
        }
        self
    }

    pub fn extend_warnings(&mut self, warnings: impl IntoIterator<Item = String>) -> &mut Self {
        for warning in warnings {
            self.warn(warning);
        }
        self
    }

    #[must_use]
    pub const fn changed(&self) -> bool {
        self.changed
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub fn get(&self, operation: Operation) -> Option<&OperationRecord> {
        self.operations.get(&operation)
    }

    /// Operations that ran, in reporting order.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.operations.keys().copied()
    }

    #[must_use]
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

/// Failed module result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    failed: bool,
    changed: bool,
    msg: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rc: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stderr: Option<String>,
}

impl FailureReport {
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            failed: true,
            changed: false,
            msg: msg.into(),
            warnings: Vec::new(),
            rc: None,
            command: None,
            stdout: None,
            stderr: None,
        }
    }

    /// Attaches warnings raised before the failure.
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    #[must_use]
    pub fn msg(&self) -> &str {
        &self.msg
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub const fn rc(&self) -> Option<i32> {
        self.rc
    }

    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    #[must_use]
    pub fn stdout(&self) -> Option<&str> {
        self.stdout.as_deref()
    }

    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        self.stderr.as_deref()
    }
}

impl From<&AcpError> for FailureReport {
    fn from(err: &AcpError) -> Self {
        let command_failure = |command: &str, rc: i32, stdout: &str, stderr: &str| Self {
            rc: Some(rc),
            command: Some(command.to_string()),
            stdout: Some(stdout.to_string()),
            stderr: Some(stderr.to_string()),
            ..Self::new(format!("Error in running '{command}' command"))
        };

        match err {
            AcpError::Git(git) => match git.as_ref() {
                GitError::CommandFailed {
                    command,
                    rc,
                    stdout,
                    stderr,
                } => command_failure(command, *rc, stdout, stderr),
                other => Self::new(other.to_string()),
            },
            AcpError::Process(process) => match process.as_ref() {
                ProcessError::NonZeroExit {
                    command,
                    code,
                    stdout,
                    stderr,
                } => command_failure(command, *code, stdout, stderr),
                other => Self::new(other.to_string()),
            },
            other => Self::new(other.to_string()),
        }
    }
}
