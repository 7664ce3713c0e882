// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command runner.
//!
//! ```text
//!        Public API
//!   ops.rs  status.rs  url.rs
//!        \      |
//!         v     v
//!      ,------------------,
//!      |       Git        |  executable, work tree, env, check mode
//!      '--+----------+----'
//!         |          |
//!         v          v
//!     query.rs   ProcessBuilder
//!   (gix, read)  (git CLI, read + write)
//!    .is_repo     .run(args, accepted codes)
//!    .branch
//!                 SshWrapper --> GIT_SSH / GIT_KEY / GIT_SSH_OPTS
//!                 Redactor   --> masked log lines
//! ```
//!
//! **`query`** opens the repository in-process and never spawns.
//! **`Git::run`** spawns the git CLI; exit codes outside the accepted set
//! become [`GitError::CommandFailed`].

pub mod ops;
pub mod query;
pub mod ssh;
pub mod status;
pub mod url;


use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
use crate::core::redact::Redactor;
use crate::error::{AcpError, AcpResult, GitError, ProcessError};

use ssh::SshWrapper;

/// Locale git runs under so its messages can be matched.
const LOCALE: &str = "C.UTF-8";

/// A git work tree together with everything needed to run git in it.
#[derive(Debug, Clone)]
pub struct Git {
    executable: PathBuf,
    path: PathBuf,
    env: Env,
    check_mode: bool,
    redactor: Option<Arc<Redactor>>,
}

impl Git {
    /// Prepares to run git in `path`.
    ///
    /// `executable` defaults to `git` looked up on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be found or `path` is not inside a
    /// git work tree.
    pub fn open(executable: Option<&Path>, path: &Path, check_mode: bool) -> AcpResult<Self> {
        let executable = match executable {
            Some(exe) => exe.to_path_buf(),
            None => ProcessBuilder::which("git")?.program().clone(),
        };

        if !query::is_git_repo(path) {
            return Err(GitError::NotARepository {
                path: path.display().to_string(),
            }
            .into());
        }

        if let Ok(Some(branch)) = query::current_branch(path) {
            info!(path = %path.display(), %branch, "opened work tree");
        }

        Ok(Self {
            executable,
            path: path.to_path_buf(),
            env: base_env(),
            check_mode,
            redactor: None,
        })
    }

    /// Routes ssh through `wrapper` for every following command.
    #[must_use]
    pub fn with_ssh(mut self, wrapper: &SshWrapper) -> Self {
        wrapper.apply(&mut self.env);
        self
    }

    /// Masks secrets in the log lines of every following command.
    #[must_use]
    pub fn with_redactor(mut self, redactor: Arc<Redactor>) -> Self {
        self.redactor = Some(redactor);
        self
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn env(&self) -> &Env {
        &self.env
    }

    /// Whether writes are predicted instead of executed.
    #[must_use]
    pub const fn check_mode(&self) -> bool {
        self.check_mode
    }

    /// Builds a git invocation in the work tree without running it.
    pub fn command<I, S>(&self, args: I) -> ProcessBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let command = ProcessBuilder::new(&self.executable)
            .args(args)
            .cwd(&self.path)
            .env(self.env.clone())
            .capture_output();
        match &self.redactor {
            Some(redactor) => command.redact_with(Arc::clone(redactor)),
            None => command,
        }
    }

    /// Runs git and accepts any exit code in `accepted`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] with the full command line and
    /// both streams when git exits with any other code.
    pub async fn run<I, S>(&self, args: I, accepted: &[i32]) -> AcpResult<ProcessOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command(args)
            .success_codes(accepted.iter().copied())
            .run()
            .await
            .map_err(command_failure)
    }
}

/// Inherited environment with a fixed locale and prompts disabled.
fn base_env() -> Env {
    let mut env = current_env();
    for key in ["LANG", "LC_ALL", "LC_MESSAGES", "LC_CTYPE"] {
        env.set(key, LOCALE);
    }
    env.set("GIT_TERMINAL_PROMPT", "0");
    env
}

fn command_failure(err: AcpError) -> AcpError {
    match err {
        AcpError::Process(process) => match *process {
            ProcessError::NonZeroExit {
                command,
                code,
                stdout,
                stderr,
            } => GitError::CommandFailed {
                command,
                rc: code,
                stdout,
                stderr,
            }
            .into(),
            other => other.into(),
        },
        other => other,
    }
}
