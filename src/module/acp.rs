// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git_acp`: add, commit and push.
//!
//! ```text
//! url checks
//!    |
//! git_config? --> config user (only if different)
//!    |
//! status
//!    |-- changes + untracked + clean --> git clean --> done
//!    v
//! mode? --> ensure remote (pull/push target = remote name, else url)
//!    |
//! pull?
//!    |-- no changes --> warn "nothing to commit" --> done
//!    v
//! add --> commit --(nothing committed)--> warn --> done
//!    |
//! push?
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use super::Session;
use super::result::{ModuleResult, Operation};
use crate::config::types::{AcpParams, TransportMode};
use crate::core::redact::Redactor;
use crate::error::{AcpResult, GitError};
use crate::git::ops::PushRequest;
use crate::git::url;

/// Warning raised when the work tree has nothing to commit.
pub const NOTHING_TO_COMMIT: &str = "nothing to commit, working tree clean";

/// Runs `git_acp`, recording each operation in `result`.
///
/// # Errors
///
/// Returns the first fatal error; `result` keeps what ran before it.
pub async fn run(
    params: &AcpParams,
    redactor: &Arc<Redactor>,
    result: &mut ModuleResult,
) -> AcpResult<()> {
    let common = &params.common;
    let session = Session::start(common, params.mode, redactor, result)?;
    let git = &session.git;

    if let Some(user) = &params.git_config {
        result.record(Operation::Config, git.configure_user(user).await?);
    }

    let changed = git.status().await?;

    if let Some(mode) = params.clean
        && !changed.is_empty()
        && changed.untracked()
    {
        info!(%mode, "untracked files present, cleaning instead of committing");
        result.record(Operation::Clean, git.clean(mode).await?);
        return Ok(());
    }

    let target = match params.mode {
        Some(mode) => {
            let remote_url = remote_url(params, mode)?;
            result.record(
                Operation::Remote,
                git.ensure_remote(&params.remote, &remote_url).await?,
            );
            params.remote.as_str()
        }
        None => common.url.as_str(),
    };

    if common.pull {
        result.record(
            Operation::Pull,
            git.pull(target, Some(&params.branch), &common.pull_options)
                .await?,
        );
    }

    if changed.is_empty() {
        debug!("work tree clean, skipping add and commit");
        result.warn(NOTHING_TO_COMMIT);
        return Ok(());
    }

    git.add(&params.add).await?;
    let commit = git.commit(&params.comment).await?;
    let committed = commit.changed;
    if !committed {
        result.warn(commit.output.trim());
    }
    result.record(Operation::Commit, commit);
    if !committed {
        return Ok(());
    }

    if common.push {
        let request = PushRequest {
            target,
            branch: Some(&params.branch),
            push_option: common.push_option.as_deref(),
            force: common.push_force,
            tag: None,
        };
        result.record(Operation::Push, git.push(&request).await?);
    }

    Ok(())
}

/// URL to register for the remote; https mode embeds the credentials.
fn remote_url(params: &AcpParams, mode: TransportMode) -> AcpResult<String> {
    let url = &params.common.url;
    if mode != TransportMode::Https {
        return Ok(url.clone());
    }

    let user = params.user.as_deref().unwrap_or_default();
    let token = params.token.as_deref().unwrap_or_default();
    url::with_credentials(url, user, token).ok_or_else(|| {
        GitError::Precondition("HTTPS mode selected but not HTTPS URL provided".to_string()).into()
    })
}
