// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git_mactp`: merge, add, commit, tag and push.
//!
//! ```text
//! url checks --> checkout <branch>? --> pull? --> status
//!    |
//!    +-- merge given          --> git merge
//!    +-- changes and add      --> git add, git commit
//!    +-- tag given            --> git tag (pushed with the branch)
//!    +-- otherwise            --> push disabled
//!    |
//! push?
//! ```

use std::sync::Arc;

use tracing::info;

use super::Session;
use super::result::{ModuleResult, Operation};
use crate::config::types::MactpParams;
use crate::core::redact::Redactor;
use crate::error::{AcpResult, ParamError};
use crate::git::ops::PushRequest;

/// Runs `git_mactp`, recording each operation in `result`.
///
/// # Errors
///
/// Returns the first fatal error; `result` keeps what ran before it.
pub async fn run(
    params: &MactpParams,
    redactor: &Arc<Redactor>,
    result: &mut ModuleResult,
) -> AcpResult<()> {
    let common = &params.common;
    let session = Session::start(common, None, redactor, result)?;
    let git = &session.git;
    let branch = params.branch.as_deref();

    if let Some(branch) = branch {
        result.record(Operation::Checkout, git.checkout(branch).await?);
    }

    if common.pull {
        result.record(
            Operation::Pull,
            git.pull(&common.url, branch, &common.pull_options).await?,
        );
    }

    let changed = git.status().await?;
    let mut push = common.push;
    let mut created_tag = None;

    if let Some(merge) = &params.merge {
        result.record(
            Operation::Merge,
            git.merge(merge, &params.merge_options).await?,
        );
    } else if let Some(add) = &params.add
        && !changed.is_empty()
    {
        let message = params.message.as_deref().ok_or_else(|| ParamError::RequiredBy {
            key: "add".to_string(),
            missing: "message".to_string(),
        })?;
        git.add(add).await?;
        let commit = git.commit(message).await?;
        if !commit.changed {
            result.warn(commit.output.trim());
        }
        result.record(Operation::Commit, commit);
    } else if let Some(tag) = &params.tag {
        result.record(Operation::Tag, git.tag(tag).await?);
        created_tag = Some(tag.as_str());
    } else {
        info!("nothing to merge, commit or tag; push disabled");
        push = false;
    }

    if push {
        let request = PushRequest {
            target: &common.url,
            branch,
            push_option: common.push_option.as_deref(),
            force: common.push_force,
            tag: created_tag,
        };
        result.record(Operation::Push, git.push(&request).await?);
    }

    Ok(())
}
