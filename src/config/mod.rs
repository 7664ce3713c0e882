// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module arguments.
//!
//! # Source Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. declared defaults (applied during resolution)
//! 2. --defaults FILE (TOML)
//! 3. args file (JSON, argv[1] from the controller)
//! 4. GIT_ACP_* env vars
//! 5. --set key=value overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GIT_ACP_PUSH=no              → push = false
//! GIT_ACP_BRANCH=develop       → branch = "develop"
//! GIT_ACP_PULL_OPTIONS=--ff    → pull_options = ["--ff"]
//! GIT_ACP_GIT_CONFIG__MODE=global → git_config.mode = "global"
//! ```
//!
//! # Resolution
//!
//! ```text
//! RawParams --into_acp()---> AcpParams
//!           --into_mactp()-> MactpParams
//! ```

pub mod loader;
pub mod rules;
pub mod types;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::ParamError;

pub use loader::ParamsLoader;
use rules::{ACP_RULES, MACTP_RULES};
use types::{
    AcpParams, CommonParams, FrameworkArgs, ListParam, MactpParams, RawParams, UserConfig,
};

/// Environment variable prefix for argument overrides.
pub const ENV_PREFIX: &str = "GIT_ACP";

/// Characters that turn a pathspec into a glob.
const GLOB_CHARS: &[char] = &['*', '?', '['];

fn default_pull_options() -> ListParam {
    ListParam(vec!["--no-edit".to_string()])
}

impl RawParams {
    /// Create a new argument loader.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use git_acp::config::types::RawParams;
    ///
    /// let params = RawParams::builder()
    ///     .add_json_file("/tmp/args.json")
    ///     .with_env_prefix("GIT_ACP")
    ///     .build()?
    ///     .into_acp()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ParamsLoader {
        ParamsLoader::new()
    }

    /// Validates and resolves the arguments for `git_acp`.
    ///
    /// `message` is accepted as an alias of `comment`.
    ///
    /// # Errors
    ///
    /// Returns the first rule violation, before anything touches the
    /// working tree.
    pub fn into_acp(mut self) -> Result<AcpParams, ParamError> {
        ACP_RULES.check_unsupported(&self)?;
        if let Some(message) = self.message.take()
            && self.comment.is_none()
        {
            self.comment = Some(message);
        }
        ACP_RULES.check_exclusive(&self)?;

        self.add
            .get_or_insert_with(|| ListParam(vec![".".to_string()]));
        self.branch.get_or_insert_with(|| "main".to_string());
        self.remote.get_or_insert_with(|| "origin".to_string());
        self.apply_common_defaults();
        ACP_RULES.check_resolved(&self)?;

        let git_config = self.git_config.take().map(UserConfig::try_from).transpose()?;
        let add: Vec<String> = self.add.take().map(Vec::from).unwrap_or_default();
        check_pathspecs(&add)?;

        let comment = self
            .comment
            .take()
            .ok_or_else(|| ParamError::Together("comment, add".to_string()))?;

        Ok(AcpParams {
            comment,
            add,
            branch: self.branch.take().unwrap_or_default(),
            mode: self.mode,
            remote: self.remote.take().unwrap_or_default(),
            user: self.user.take(),
            token: self.token.take(),
            git_config,
            clean: self.clean,
            common: self.take_common()?,
        })
    }

    /// Validates and resolves the arguments for `git_mactp`.
    ///
    /// # Errors
    ///
    /// Returns the first rule violation, before anything touches the
    /// working tree.
    pub fn into_mactp(mut self) -> Result<MactpParams, ParamError> {
        MACTP_RULES.check_unsupported(&self)?;
        MACTP_RULES.check_exclusive(&self)?;
        self.apply_common_defaults();
        MACTP_RULES.check_resolved(&self)?;

        let add: Option<Vec<String>> = self.add.take().map(Vec::from);
        if let Some(add) = &add {
            check_pathspecs(add)?;
        }

        Ok(MactpParams {
            message: self.message.take(),
            add,
            branch: self.branch.take(),
            merge: self.merge.take(),
            merge_options: self.merge_options.take().map(Vec::from).unwrap_or_default(),
            tag: self.tag.take(),
            common: self.take_common()?,
        })
    }

    /// Format the supplied arguments for logging, one `key = value` per line.
    ///
    /// `no_log` parameters are shown as `[hidden]`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        for key in self.supplied() {
            let value = if matches!(key, "url" | "token") {
                "[hidden]".to_string()
            } else {
                self.display_value(key)
            };
            options.insert(key, value);
        }

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn display_value(&self, key: &str) -> String {
        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        let list = |l: &Option<ListParam>| l.as_ref().map(|l| l.0.join(","));
        let value = match key {
            "path" => path(&self.path),
            "executable" => path(&self.executable),
            "comment" => self.comment.clone(),
            "message" => self.message.clone(),
            "add" => list(&self.add),
            "branch" => self.branch.clone(),
            "pull" => self.pull.map(|b| b.to_string()),
            "pull_options" => list(&self.pull_options),
            "push" => self.push.map(|b| b.to_string()),
            "push_option" => self.push_option.clone(),
            "push_force" => self.push_force.map(|b| b.to_string()),
            "mode" => self.mode.map(|m| m.to_string()),
            "remote" => self.remote.clone(),
            "user" => self.user.clone(),
            "git_config" => self.git_config.as_ref().map(|c| format!("{c:?}")),
            "ssh_params" => self.ssh_params.as_ref().map(|s| format!("{s:?}")),
            "clean" => self.clean.map(|c| c.to_string()),
            "merge" => self.merge.clone(),
            "merge_options" => list(&self.merge_options),
            "tag" => self.tag.clone(),
            _ => None,
        };
        value.unwrap_or_default()
    }

    fn apply_common_defaults(&mut self) {
        self.pull.get_or_insert(false);
        self.pull_options.get_or_insert_with(default_pull_options);
        self.push.get_or_insert(true);
        self.push_force.get_or_insert(false);
    }

    fn take_common(&mut self) -> Result<CommonParams, ParamError> {
        let path = self
            .path
            .take()
            .ok_or_else(|| ParamError::Missing("path".to_string()))?;
        let url = self
            .url
            .take()
            .ok_or_else(|| ParamError::Missing("url".to_string()))?;

        Ok(CommonParams {
            path,
            url,
            executable: self.executable.take(),
            pull: self.pull.unwrap_or(false),
            pull_options: self.pull_options.take().map(Vec::from).unwrap_or_default(),
            push: self.push.unwrap_or(true),
            push_option: self.push_option.take(),
            push_force: self.push_force.unwrap_or(false),
            ssh: self.ssh_params.take(),
            framework: FrameworkArgs {
                tmpdir: self.ansible_tmpdir.take(),
                check_mode: self.ansible_check_mode.unwrap_or(false),
            },
        })
    }
}

/// Rejects `add` entries that git would expand as globs.
fn check_pathspecs(add: &[String]) -> Result<(), ParamError> {
    let globs: Vec<&str> = add
        .iter()
        .map(String::as_str)
        .filter(|entry| entry.contains(GLOB_CHARS))
        .collect();

    if globs.is_empty() {
        Ok(())
    } else {
        Err(ParamError::Invalid(format!(
            "add does not accept file globs: {}",
            globs.join(", ")
        )))
    }
}
