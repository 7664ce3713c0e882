// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |                 acp / mactp
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  args file, TOML, env,    |
//!              |  Ansible argument rules   |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |          module           |
//!              |  acp / mactp sequencers,  |
//!              |  result protocol, no_log  |
//!              '-------------+-------------'
//!                            v
//!                          git
//!              status, ops, url checks, SSH wrapper
//!
//!   +-----------------------------------------+
//!   |  core   process, env                    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod module;
