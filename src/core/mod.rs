// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process and environment management.
//!
//! ```text
//!         core
//!          |
//!     +----+----+---------+
//!     |         |         |
//!     v         v         v
//!    env     process    redact
//!     |         |         |
//!    Env     Builder   Redactor
//!   (COW)    Output   (no_log, userinfo)
//! ```

pub mod env;
pub mod process;
pub mod redact;
