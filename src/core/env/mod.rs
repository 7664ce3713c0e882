// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! ```text
//! Env (copy-on-write BTreeMap<String, String>)
//! Sources: current_env(), Env::new()
//! Ops: set/get/remove/extend
//! ```
//!
//! Git commands receive a complete environment block built from the
//! current process environment plus per-invocation overrides, so the
//! module never mutates its own process environment.

pub mod container;


/// Captures the current process environment.
#[must_use]
pub fn current_env() -> container::Env {
    let vars = std::env::vars().collect();
    container::Env::from_map(vars)
}
