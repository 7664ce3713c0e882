// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository queries using gix.
//!
//! ```text
//! query.rs --> gix::discover --> .git/ (no subprocess)
//! ```

use std::path::Path;

use crate::error::{AcpResult, GitError};

/// Check if path is inside a git work tree.
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    gix::discover(path).is_ok_and(|repo| repo.workdir().is_some())
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn current_branch(path: &Path) -> AcpResult<Option<String>> {
    let repo = gix::discover(path).map_err(|e| GitError::Gix(e.to_string()))?;
    let head = repo
        .head_name()
        .map_err(|e| GitError::Gix(e.to_string()))?;
    Ok(head.map(|name| name.shorten().to_string()))
}
