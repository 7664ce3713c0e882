// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Changed-file detection from `git status --porcelain`.
//!
//! ```text
//!  M src/lib.rs          -> "src/lib.rs"
//! ?? notes.txt           -> "notes.txt"   untracked = true
//! R  old.rs -> new.rs    -> "new.rs"
//! ```
//!
//! Only the last whitespace-separated token of each line is kept, so quoted
//! paths containing spaces come back truncated.

use std::collections::BTreeSet;

use tracing::debug;

use super::Git;
use crate::error::AcpResult;

/// Files reported by `git status --porcelain`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedFiles {
    files: BTreeSet<String>,
    untracked: bool,
}

impl ChangedFiles {
    /// Parses porcelain status output.
    #[must_use]
    pub fn parse(porcelain: &str) -> Self {
        let files = porcelain
            .lines()
            .filter_map(|line| line.split_whitespace().last())
            .map(String::from)
            .collect();
        let untracked = porcelain.contains("Untracked")
            || porcelain.lines().any(|line| line.starts_with("??"));

        Self { files, untracked }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether any entry is untracked.
    #[must_use]
    pub const fn untracked(&self) -> bool {
        self.untracked
    }

    #[must_use]
    pub fn contains(&self, file: &str) -> bool {
        self.files.contains(file)
    }

    /// Changed paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

impl Git {
    /// Lists changed files. Runs in check mode too.
    ///
    /// # Errors
    ///
    /// Returns an error if `git status` exits non-zero.
    pub async fn status(&self) -> AcpResult<ChangedFiles> {
        let output = self.run(["status", "--porcelain"], &[0]).await?;
        let changed = ChangedFiles::parse(output.stdout());
        debug!(
            files = changed.len(),
            untracked = changed.untracked(),
            "status"
        );
        Ok(changed)
    }
}
