// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! SSH wrapper script handed to git through `GIT_SSH`.
//!
//! ```text
//! SshWrapper::create(tmpdir, ssh_params)
//!   tmpdir writable? --no--> system temp dir
//!   write template, chmod 755, close
//!        |
//!        v
//! apply(&mut Env)
//!   GIT_SSH      = wrapper path
//!   GIT_KEY      = key_file      (removed when unset)
//!   GIT_SSH_OPTS = ssh options   (removed when unset)
//!        |
//!        v
//! drop --> wrapper deleted
//! ```

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, warn};

use crate::config::types::SshParams;
use crate::core::env::container::Env;
use crate::error::AcpResult;

const WRAPPER_TEMPLATE: &str = r#"#!/bin/sh
if [ -z "$GIT_SSH_OPTS" ]; then
    BASEOPTS=""
else
    BASEOPTS=$GIT_SSH_OPTS
fi

# Let ssh fail rather than prompt
BASEOPTS="$BASEOPTS -o BatchMode=yes"

if [ -z "$GIT_KEY" ]; then
    ssh $BASEOPTS "$@"
else
    ssh -i "$GIT_KEY" -o IdentitiesOnly=yes $BASEOPTS "$@"
fi
"#;

/// Executable wrapper that lives as long as this value.
#[derive(Debug)]
pub struct SshWrapper {
    path: TempPath,
    key_file: Option<PathBuf>,
    opts: Option<String>,
}

impl SshWrapper {
    /// Writes the wrapper under `tmpdir`, or the system temp dir when
    /// `tmpdir` is absent or not writable.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be written to either location.
    pub fn create(tmpdir: Option<&Path>, params: Option<&SshParams>) -> AcpResult<Self> {
        let file = match tmpdir {
            Some(dir) => Self::temp_file_in(dir).or_else(|err| {
                warn!(dir = %dir.display(), error = %err, "module tmpdir not writable, using system temp dir");
                Self::temp_file_in(&std::env::temp_dir())
            })?,
            None => Self::temp_file_in(&std::env::temp_dir())?,
        };
        let path = Self::finish(file)?;
        debug!(wrapper = %path.display(), "ssh wrapper written");

        Ok(Self {
            path,
            key_file: params.and_then(|p| p.key_file.clone()),
            opts: params.and_then(SshParams::effective_opts),
        })
    }

    fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("git-acp-ssh-")
            .suffix(".sh")
            .tempfile_in(dir)?;
        file.write_all(WRAPPER_TEMPLATE.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    /// Closes the write handle so the script can be executed.
    fn finish(file: NamedTempFile) -> std::io::Result<TempPath> {
        let path = file.into_temp_path();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
        }
        Ok(path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn key_file(&self) -> Option<&Path> {
        self.key_file.as_deref()
    }

    #[must_use]
    pub fn opts(&self) -> Option<&str> {
        self.opts.as_deref()
    }

    /// Points git at the wrapper and replaces any inherited key or options.
    pub fn apply(&self, env: &mut Env) {
        env.set("GIT_SSH", self.path.to_string_lossy());
        let key = self.key_file.as_ref().map(|k| k.to_string_lossy());
        env.set_or_remove("GIT_KEY", key.as_deref());
        env.set_or_remove("GIT_SSH_OPTS", self.opts.as_deref());
    }
}
