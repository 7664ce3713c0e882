// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declarative argument rules, checked in the order Ansible applies them.
//!
//! ```text
//! unsupported keys
//!   -> mutually_exclusive   (supplied values only)
//!   -> defaults applied     (by the caller)
//!   -> required
//!   -> required_together
//!   -> required_one_of
//!   -> required_if
//!   -> required_by
//! ```

use super::types::RawParams;
use crate::error::ParamError;

/// `key == value` requires every parameter in `requirements`.
#[derive(Debug, Clone, Copy)]
pub struct RequiredIf {
    pub key: &'static str,
    pub value: &'static str,
    pub requirements: &'static [&'static str],
}

/// A supplied `key` requires every parameter in `requirements`.
#[derive(Debug, Clone, Copy)]
pub struct RequiredBy {
    pub key: &'static str,
    pub requirements: &'static [&'static str],
}

/// Argument declaration of one module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleRules {
    pub name: &'static str,
    pub parameters: &'static [&'static str],
    pub required: &'static [&'static str],
    pub required_together: &'static [&'static [&'static str]],
    pub required_one_of: &'static [&'static [&'static str]],
    pub mutually_exclusive: &'static [&'static [&'static str]],
    pub required_if: &'static [RequiredIf],
    pub required_by: &'static [RequiredBy],
}

pub const ACP_RULES: ModuleRules = ModuleRules {
    name: "git_acp",
    parameters: &[
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
    ],
    required: &["path", "url"],
    required_together: &[&["comment", "add"]],
    required_one_of: &[&["add", "pull", "push"]],
    mutually_exclusive: &[],
    required_if: &[RequiredIf {
        key: "mode",
        value: "https",
        requirements: &["user", "token"],
    }],
    required_by: &[],
};

pub const MACTP_RULES: ModuleRules = ModuleRules {
    name: "git_mactp",
    parameters: &[
        "path",
        "url",
        "executable",
        "message",
        "add",
        "branch",
        "pull",
        "pull_options",
        "push",
        "push_option",
        "push_force",
        "ssh_params",
        "merge",
        "merge_options",
        "tag",
    ],
    required: &["path", "url"],
    required_together: &[&["tag", "branch"]],
    required_one_of: &[&["add", "pull", "push", "tag", "branch", "merge"]],
    mutually_exclusive: &[&["add", "tag", "merge"]],
    required_if: &[],
    required_by: &[RequiredBy {
        key: "add",
        requirements: &["message"],
    }],
};

impl ModuleRules {
    /// Rejects keys the module does not declare.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::Unsupported` listing the offending keys, sorted.
    pub fn check_unsupported(&self, raw: &RawParams) -> Result<(), ParamError> {
        let mut keys: Vec<&str> = raw
            .supplied()
            .into_iter()
            .filter(|key| !self.parameters.contains(key))
            .chain(raw.unknown.iter().map(String::as_str))
            .collect();

        if keys.is_empty() {
            return Ok(());
        }
        keys.sort_unstable();
        keys.dedup();

        Err(ParamError::Unsupported {
            module: self.name.to_string(),
            keys: keys.join(", "),
        })
    }

    /// Checks `mutually_exclusive` against the supplied values.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::Exclusive` naming the first violated group.
    pub fn check_exclusive(&self, raw: &RawParams) -> Result<(), ParamError> {
        for group in self.mutually_exclusive {
            if count_set(raw, group) > 1 {
                return Err(ParamError::Exclusive(group.join("|")));
            }
        }
        Ok(())
    }

    /// Checks every rule that runs after defaults are applied.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check_resolved(&self, raw: &RawParams) -> Result<(), ParamError> {
        let missing: Vec<&str> = self
            .required
            .iter()
            .copied()
            .filter(|key| !raw.is_set(key))
            .collect();
        if !missing.is_empty() {
            return Err(ParamError::Missing(missing.join(", ")));
        }

        for group in self.required_together {
            let set = count_set(raw, group);
            if set != 0 && set != group.len() {
                return Err(ParamError::Together(group.join(", ")));
            }
        }

        for group in self.required_one_of {
            if count_set(raw, group) == 0 {
                return Err(ParamError::OneOf(group.join(", ")));
            }
        }

        for rule in self.required_if {
            if raw.choice_value(rule.key).as_deref() != Some(rule.value) {
                continue;
            }
            let missing = missing_of(raw, rule.requirements);
            if !missing.is_empty() {
                return Err(ParamError::RequiredIf {
                    key: rule.key.to_string(),
                    value: rule.value.to_string(),
                    missing,
                });
            }
        }

        for rule in self.required_by {
            if !raw.is_set(rule.key) {
                continue;
            }
            let missing = missing_of(raw, rule.requirements);
            if !missing.is_empty() {
                return Err(ParamError::RequiredBy {
                    key: rule.key.to_string(),
                    missing,
                });
            }
        }

        Ok(())
    }
}

fn count_set(raw: &RawParams, group: &[&str]) -> usize {
    group.iter().filter(|key| raw.is_set(key)).count()
}

fn missing_of(raw: &RawParams, keys: &[&str]) -> String {
    keys.iter()
        .copied()
        .filter(|key| !raw.is_set(key))
        .collect::<Vec<_>>()
        .join(", ")
}
