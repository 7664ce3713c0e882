// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable struct and copy-on-write implementation.
//!
//! ```text
//! Env (copy-on-write)
//! data: Arc<BTreeMap<String, String>>
//! clone shares Arc until the first write (Arc::make_mut)
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

/// A set of environment variables with copy-on-write semantics.
///
/// Clones share the underlying map until one of them is modified, so the
/// base environment can be handed to every git invocation cheaply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    data: Arc<BTreeMap<String, String>>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            data: Arc::new(vars),
        }
    }

    /// Sets an environment variable, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.data).insert(key.into(), value.into());
        self
    }

    /// Sets an environment variable when `value` is present, removes it otherwise.
    pub fn set_or_remove(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(key),
        }
    }

    /// Gets an environment variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Removes an environment variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.data.contains_key(key) {
            Arc::make_mut(&mut self.data).remove(key);
        }
        self
    }

    /// Returns an iterator over environment variables.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if both environments share the same storage.
    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}
