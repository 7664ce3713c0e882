// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations used by the sequencers.
//!
//! ```text
//! add             git add -- <files>
//! commit          git commit -m <msg>           rc 1 = nothing to commit
//! pull            git -C <path> pull <target> [<branch>] <opts>
//! push            git push <target> [--push-option=..] [<branch>] [--force] [<tag>]
//! clean           git clean -fd [-X | -x]
//! checkout        git checkout <branch>
//! merge           git merge <opts> <branch>
//! tag             git tag <name>
//! configure_user  git config --<scope> user.{name,email} [<value>]
//! ensure_remote   git remote get-url --all <remote> || git remote add
//! ```
//!
//! Every write returns a predicted record in check mode without running.

use regex::Regex;
use tracing::{debug, info};

use super::Git;
use crate::config::types::{CleanMode, UserConfig};
use crate::core::process::builder::ProcessOutput;
use crate::error::{AcpError, AcpResult};
use crate::module::result::OperationRecord;

/// Exit codes of `git remote get-url` for a remote that does not exist.
/// Older git dies with 128, newer git exits with 2.
const MISSING_REMOTE: [i32; 2] = [2, 128];

/// Arguments of a `git push`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PushRequest<'a> {
    /// Remote name or URL.
    pub target: &'a str,
    /// Omitted to let git pick the refspec from `push.default`.
    pub branch: Option<&'a str>,
    pub push_option: Option<&'a str>,
    pub force: bool,
    /// Tag created in this run.
    pub tag: Option<&'a str>,
}

impl PushRequest<'_> {
    /// Push arguments after the executable.
    ///
    /// `--push-option` sits between the target and the branch.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["push".to_string(), self.target.to_string()];
        if let Some(option) = self.push_option {
            args.push(format!("--push-option={option}"));
        }
        if let Some(branch) = self.branch {
            args.push(branch.to_string());
        }
        if self.force {
            args.push("--force".to_string());
        }
        if let Some(tag) = self.tag {
            args.push(tag.to_string());
        }
        args
    }
}

/// Arguments of `git clean` for a clean mode.
#[must_use]
pub fn clean_args(mode: CleanMode) -> Vec<&'static str> {
    let mut args = vec!["clean", "-fd"];
    match mode {
        CleanMode::Untracked => {}
        CleanMode::Ignored => args.push("-X"),
        CleanMode::All => args.push("-x"),
    }
    args
}

/// Whether pull or merge output reports nothing to integrate.
///
/// # Errors
///
/// Returns an error if the pattern fails to compile.
pub fn is_up_to_date(output: &ProcessOutput) -> AcpResult<bool> {
    let pattern = Regex::new(r"Already up[ -]to[ -]date")
        .map_err(|e| AcpError::other(format!("failed to compile up-to-date pattern: {e}")))?;
    Ok(pattern.is_match(output.stdout()) || pattern.is_match(output.stderr()))
}

fn record(output: ProcessOutput, changed: bool) -> OperationRecord {
    let (stdout, stderr) = output.into_streams();
    OperationRecord::new(stdout, stderr, changed)
}

impl Git {
    /// Stages `files`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git add` exits non-zero.
    pub async fn add(&self, files: &[String]) -> AcpResult<()> {
        if self.check_mode() {
            debug!(?files, "check mode: skipping git add");
            return Ok(());
        }
        self.run(
            ["add", "--"].into_iter().map(String::from).chain(files.iter().cloned()),
            &[0],
        )
        .await?;
        Ok(())
    }

    /// Commits the index. Exit code 1 means there was nothing to commit.
    ///
    /// # Errors
    ///
    /// Returns an error for any exit code other than 0 or 1.
    pub async fn commit(&self, message: &str) -> AcpResult<OperationRecord> {
        if self.check_mode() {
            return Ok(OperationRecord::predicted());
        }
        let output = self.run(["commit", "-m", message], &[0, 1]).await?;
        let changed = output.exit_code() == 0;
        info!(changed, "git commit");
        Ok(record(output, changed))
    }

    /// Pulls `branch` from `target` (remote name or URL).
    ///
    /// Without a branch git merges the remote HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if `git pull` exits non-zero.
    pub async fn pull(
        &self,
        target: &str,
        branch: Option<&str>,
        options: &[String],
    ) -> AcpResult<OperationRecord> {
        if self.check_mode() {
            return Ok(OperationRecord::predicted());
        }
        let path = self.path().to_string_lossy().into_owned();
        let args = ["-C".to_string(), path, "pull".to_string(), target.to_string()]
            .into_iter()
            .chain(branch.map(String::from))
            .chain(options.iter().cloned());
        let output = self.run(args, &[0]).await?;
        let changed = !is_up_to_date(&output)?;
        info!(changed, "git pull");
        Ok(record(output, changed))
    }

    /// Pushes to the remote.
    ///
    /// git reports push progress on stderr, so the record's `output` holds
    /// stderr and `error` holds stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push` exits non-zero.
    pub async fn push(&self, request: &PushRequest<'_>) -> AcpResult<OperationRecord> {
        if self.check_mode() {
            return Ok(OperationRecord::predicted());
        }
        let output = self.run(request.args(), &[0]).await?;
        let (stdout, stderr) = output.into_streams();
        let changed = !stderr.contains("Everything up-to-date");
        info!(changed, "git push");
        Ok(OperationRecord::new(stderr, stdout, changed))
    }

    /// Removes untracked and/or ignored files.
    ///
    /// # Errors
    ///
    /// Returns an error if `git clean` exits non-zero.
    pub async fn clean(&self, mode: CleanMode) -> AcpResult<OperationRecord> {
        if self.check_mode() {
            return Ok(OperationRecord::predicted());
        }
        let output = self.run(clean_args(mode), &[0]).await?;
        let changed = !output.stdout().trim().is_empty();
        info!(%mode, changed, "git clean");
        Ok(record(output, changed))
    }

    /// Switches to `branch`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git checkout` exits non-zero.
    pub async fn checkout(&self, branch: &str) -> AcpResult<OperationRecord> {
        if self.check_mode() {
            return Ok(OperationRecord::predicted());
        }
        let output = self.run(["checkout", branch], &[0]).await?;
        let changed =
            !(output.stdout().contains("Already on") || output.stderr().contains("Already on"));
        Ok(record(output, changed))
    }

    /// Merges `branch` into the current branch.
    ///
    /// # Errors
    ///
    /// Returns an error if `git merge` exits non-zero.
    pub async fn merge(&self, branch: &str, options: &[String]) -> AcpResult<OperationRecord> {
        if self.check_mode() {
            return Ok(OperationRecord::predicted());
        }
        let args = std::iter::once("merge".to_string())
            .chain(options.iter().cloned())
            .chain(std::iter::once(branch.to_string()));
        let output = self.run(args, &[0]).await?;
        let changed = !is_up_to_date(&output)?;
        info!(changed, "git merge");
        Ok(record(output, changed))
    }

    /// Creates a lightweight tag at HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if `git tag` exits non-zero, e.g. when the tag exists.
    pub async fn tag(&self, name: &str) -> AcpResult<OperationRecord> {
        if self.check_mode() {
            return Ok(OperationRecord::predicted());
        }
        let output = self.run(["tag", name], &[0]).await?;
        Ok(record(output, true))
    }

    /// Sets `user.name` and `user.email` where they differ from `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing the config fails.
    pub async fn configure_user(&self, user: &UserConfig) -> AcpResult<OperationRecord> {
        let scope = user.scope.flag();
        let mut outputs = Vec::new();
        let mut errors = Vec::new();
        let mut changed = false;

        for (key, wanted) in [("user.name", &user.name), ("user.email", &user.email)] {
            // rc 1 means the key is unset
            let current = self.run(["config", scope, key], &[0, 1]).await?;
            if current.stdout().trim() == wanted.as_str() {
                continue;
            }
            changed = true;
            if self.check_mode() {
                continue;
            }
            let set = self.run(["config", scope, key, wanted.as_str()], &[0]).await?;
            let (stdout, stderr) = set.into_streams();
            outputs.push(stdout);
            errors.push(stderr);
        }

        info!(changed, "git config user");
        Ok(OperationRecord::new(outputs.concat(), errors.concat(), changed))
    }

    /// Adds remote `name` pointing at `url` unless it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for a reason other than a missing
    /// remote, or if adding it fails.
    pub async fn ensure_remote(&self, name: &str, url: &str) -> AcpResult<OperationRecord> {
        let accepted = [0, MISSING_REMOTE[0], MISSING_REMOTE[1]];
        let existing = self
            .run(["remote", "get-url", "--all", name], &accepted)
            .await?;
        if existing.success() {
            debug!(remote = name, "remote exists");
            return Ok(record(existing, false));
        }

        if self.check_mode() {
            return Ok(OperationRecord::predicted());
        }
        let added = self.run(["remote", "add", name, url], &[0]).await?;
        info!(remote = name, "remote added");
        Ok(record(added, true))
    }
}
