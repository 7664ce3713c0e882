// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parameter types.
//!
//! ```text
//! RawParams   every declared key as Option (what the caller supplied)
//!    |  rules: unsupported, exclusive, defaults, required, together, one_of, if
//!    v
//! AcpParams / MactpParams   resolved, defaults applied
//!
//! Choices: TransportMode ssh|https|local, CleanMode ignored|untracked|all,
//!          ConfigScope local|global
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::error::ParamError;

/// Transport selected with `mode`; enables URL checks and remote management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Ssh,
    Https,
    Local,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::Https => write!(f, "https"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Which files `git clean` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanMode {
    /// Only files ignored by `.gitignore` (`-X`).
    Ignored,
    /// Only untracked, non-ignored files.
    Untracked,
    /// Untracked and ignored files (`-x`).
    All,
}

impl std::fmt::Display for CleanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignored => write!(f, "ignored"),
            Self::Untracked => write!(f, "untracked"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Scope passed to `git config --<scope>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    #[default]
    Local,
    Global,
}

impl ConfigScope {
    /// Returns the `git config` flag for this scope.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Local => "--local",
            Self::Global => "--global",
        }
    }
}

/// `ssh_params` suboptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SshParams {
    /// Private key file on the target host.
    pub key_file: Option<PathBuf>,
    /// Add `-o StrictHostKeyChecking=no` to the ssh options.
    pub accept_hostkey: bool,
    /// Extra ssh options, e.g. `-o UserKnownHostsFile=/tmp/known_hosts`.
    pub ssh_opts: Option<String>,
}

impl SshParams {
    /// Returns the ssh options with `accept_hostkey` folded in.
    #[must_use]
    pub fn effective_opts(&self) -> Option<String> {
        const NO_HOSTKEY_CHECK: &str = "-o StrictHostKeyChecking=no";

        match (&self.ssh_opts, self.accept_hostkey) {
            (Some(opts), true) if !opts.contains(NO_HOSTKEY_CHECK) => {
                Some(format!("{opts} {NO_HOSTKEY_CHECK}"))
            }
            (Some(opts), _) => Some(opts.clone()),
            (None, true) => Some(NO_HOSTKEY_CHECK.to_string()),
            (None, false) => None,
        }
    }
}

/// `git_config` suboptions: local committer identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfigParams {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub mode: ConfigScope,
}

/// Resolved committer identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserConfig {
    pub name: String,
    pub email: String,
    pub scope: ConfigScope,
}

impl TryFrom<GitConfigParams> for UserConfig {
    type Error = ParamError;

    fn try_from(params: GitConfigParams) -> Result<Self, Self::Error> {
        match (params.user_name, params.user_email) {
            (Some(name), Some(email)) => Ok(Self {
                name,
                email,
                scope: params.mode,
            }),
            _ => Err(ParamError::Together(
                "git_config.user_name, git_config.user_email".to_string(),
            )),
        }
    }
}

/// A list parameter; a plain string is split on commas like Ansible does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ListParam(pub Vec<String>);

impl<'de> Deserialize<'de> for ListParam {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(joined) => Self(
                joined
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            OneOrMany::Many(items) => Self(items),
        })
    }
}

impl From<ListParam> for Vec<String> {
    fn from(list: ListParam) -> Self {
        list.0
    }
}

/// Every declared parameter as supplied by the caller.
///
/// `None` means "not supplied"; defaults are applied by the rules when the
/// parameters are resolved for a concrete module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParams {
    pub path: Option<PathBuf>,
    pub url: Option<String>,
    pub executable: Option<PathBuf>,
    pub comment: Option<String>,
    pub message: Option<String>,
    pub add: Option<ListParam>,
    pub branch: Option<String>,
    pub pull: Option<bool>,
    pub pull_options: Option<ListParam>,
    pub push: Option<bool>,
    pub push_option: Option<String>,
    pub push_force: Option<bool>,
    pub mode: Option<TransportMode>,
    pub remote: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
    pub git_config: Option<GitConfigParams>,
    pub ssh_params: Option<SshParams>,
    pub clean: Option<CleanMode>,
    pub merge: Option<String>,
    pub merge_options: Option<ListParam>,
    pub tag: Option<String>,

    /// Module temp dir handed over by the controller.
    #[serde(rename = "_ansible_tmpdir")]
    pub ansible_tmpdir: Option<PathBuf>,
    /// Check mode requested by the controller.
    #[serde(rename = "_ansible_check_mode")]
    pub ansible_check_mode: Option<bool>,

    /// Top-level keys that no module declares, filled in by the loader.
    #[serde(skip)]
    pub unknown: Vec<String>,
}

impl RawParams {
    /// Every parameter name any module declares.
    pub const DECLARED: &'static [&'static str] = &[
        "path",
        "url",
        "executable",
        "comment",
        "message",
        "add",
        "branch",
        "pull",
        "pull_options",
        "push",
        "push_option",
        "push_force",
        "mode",
        "remote",
        "user",
        "token",
        "git_config",
        "ssh_params",
        "clean",
        "merge",
        "merge_options",
        "tag",
    ];

    /// Returns whether a declared parameter currently has a value.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        match key {
            "path" => self.path.is_some(),
            "url" => self.url.is_some(),
            "executable" => self.executable.is_some(),
            "comment" => self.comment.is_some(),
            "message" => self.message.is_some(),
            "add" => self.add.is_some(),
            "branch" => self.branch.is_some(),
            "pull" => self.pull.is_some(),
            "pull_options" => self.pull_options.is_some(),
            "push" => self.push.is_some(),
            "push_option" => self.push_option.is_some(),
            "push_force" => self.push_force.is_some(),
            "mode" => self.mode.is_some(),
            "remote" => self.remote.is_some(),
            "user" => self.user.is_some(),
            "token" => self.token.is_some(),
            "git_config" => self.git_config.is_some(),
            "ssh_params" => self.ssh_params.is_some(),
            "clean" => self.clean.is_some(),
            "merge" => self.merge.is_some(),
            "merge_options" => self.merge_options.is_some(),
            "tag" => self.tag.is_some(),
            _ => false,
        }
    }

    /// Returns the string form of a choice parameter, for `required_if`.
    #[must_use]
    pub fn choice_value(&self, key: &str) -> Option<String> {
        match key {
            "mode" => self.mode.map(|m| m.to_string()),
            "clean" => self.clean.map(|c| c.to_string()),
            _ => None,
        }
    }

    /// Names of the declared parameters that were supplied.
    #[must_use]
    pub fn supplied(&self) -> Vec<&'static str> {
        Self::DECLARED
            .iter()
            .copied()
            .filter(|key| self.is_set(key))
            .collect()
    }

    /// Values that must never appear in module output.
    #[must_use]
    pub fn no_log_values(&self) -> Vec<String> {
        [self.url.as_deref(), self.token.as_deref()]
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Settings supplied by the controller rather than the task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkArgs {
    /// Where the SSH wrapper is written; the system temp dir when `None`.
    pub tmpdir: Option<PathBuf>,
    /// Run read-only commands only and predict the outcome of writes.
    pub check_mode: bool,
}

/// Settings shared by both modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonParams {
    pub path: PathBuf,
    pub url: String,
    pub executable: Option<PathBuf>,
    pub pull: bool,
    pub pull_options: Vec<String>,
    pub push: bool,
    pub push_option: Option<String>,
    pub push_force: bool,
    pub ssh: Option<SshParams>,
    pub framework: FrameworkArgs,
}

/// Resolved `git_acp` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcpParams {
    pub common: CommonParams,
    pub comment: String,
    pub add: Vec<String>,
    pub branch: String,
    pub mode: Option<TransportMode>,
    pub remote: String,
    pub user: Option<String>,
    pub token: Option<String>,
    pub git_config: Option<UserConfig>,
    pub clean: Option<CleanMode>,
}

/// Resolved `git_mactp` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MactpParams {
    pub common: CommonParams,
    pub message: Option<String>,
    pub add: Option<Vec<String>>,
    pub branch: Option<String>,
    pub merge: Option<String>,
    pub merge_options: Vec<String>,
    pub tag: Option<String>,
}
