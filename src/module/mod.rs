// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module sequencers.
//!
//! ```text
//! execute(kind, RawParams)
//!    |  rules (no subprocess yet)
//!    v
//! Session::start
//!    url checks --> warnings / fatal
//!    Git::open  --> executable, gix repository check
//!    SshWrapper --> GIT_SSH env on every command
//!    Redactor   --> masked command lines in the log
//!    |
//!    v
//! acp::run  |  mactp::run   --> ModuleResult (records + warnings)
//!    |
//!    v
//! Outcome::Success | Outcome::Failure(FailureReport)
//! ```

pub mod acp;
pub mod mactp;
pub mod result;


use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::types::{CommonParams, RawParams, TransportMode};
use crate::core::redact::Redactor;
use crate::error::{AcpError, AcpResult};
use crate::git::Git;
use crate::git::ssh::SshWrapper;
use crate::git::url::{self, UrlCheck};

use result::{FailureReport, ModuleResult};

/// Which module to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// `git_acp`: add, commit, push.
    Acp,
    /// `git_mactp`: merge, add, commit, tag, push.
    Mactp,
}

impl ModuleKind {
    /// Module name as the controller knows it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Acp => "git_acp",
            Self::Mactp => "git_mactp",
        }
    }
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Final state of a module run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(ModuleResult),
    Failure(FailureReport),
}

impl Outcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Process exit code: 0 on success, 1 on failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Success(_) => 0,
            Self::Failure(_) => 1,
        }
    }

    /// JSON document to print on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be serialized.
    pub fn to_json(&self) -> AcpResult<Value> {
        let value = match self {
            Self::Success(result) => serde_json::to_value(result),
            Self::Failure(report) => serde_json::to_value(report),
        };
        value.map_err(|e| AcpError::other(format!("failed to serialize module result: {e}")))
    }
}

/// Validates `raw` for `kind` and runs the module.
///
/// Never returns early on error: failures become [`Outcome::Failure`] with
/// any warnings raised before them.
pub async fn execute(kind: ModuleKind, raw: RawParams) -> Outcome {
    let mut result = ModuleResult::new();

    let redactor = match Redactor::new(raw.no_log_values()) {
        Ok(redactor) => Arc::new(redactor),
        Err(err) => return Outcome::Failure(FailureReport::from(&err)),
    };

    let run = match kind {
        ModuleKind::Acp => match raw.into_acp() {
            Ok(params) => acp::run(&params, &redactor, &mut result).await,
            Err(err) => Err(err.into()),
        },
        ModuleKind::Mactp => match raw.into_mactp() {
            Ok(params) => mactp::run(&params, &redactor, &mut result).await,
            Err(err) => Err(err.into()),
        },
    };

    match run {
        Ok(()) => {
            info!(module = %kind, changed = result.changed(), "module finished");
            Outcome::Success(result)
        }
        Err(err) => {
            let message = redactor.redact_str(&err.to_string());
            error!(module = %kind, error = %message, "module failed");
            let warnings = result.take_warnings();
            Outcome::Failure(FailureReport::from(&err).with_warnings(warnings))
        }
    }
}

/// Git access for one module run; removes the SSH wrapper when dropped.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) git: Git,
    _wrapper: SshWrapper,
}

impl Session {
    /// Runs the URL checks, opens the work tree and installs the SSH wrapper.
    ///
    /// Every git command of the session logs through `redactor`.
    pub(crate) fn start(
        common: &CommonParams,
        mode: Option<TransportMode>,
        redactor: &Arc<Redactor>,
        result: &mut ModuleResult,
    ) -> AcpResult<Self> {
        let check = UrlCheck {
            url: &common.url,
            mode,
            has_ssh_params: common.ssh.is_some(),
            has_push_option: common.push_option.is_some(),
        };
        let warnings = url::warnings(&check);
        for warning in &warnings {
            warn!("{warning}");
        }
        result.extend_warnings(warnings);
        url::check(&check)?;

        let wrapper = SshWrapper::create(common.framework.tmpdir.as_deref(), common.ssh.as_ref())?;
        let git = Git::open(
            common.executable.as_deref(),
            &common.path,
            common.framework.check_mode,
        )?
        .with_ssh(&wrapper)
        .with_redactor(Arc::clone(redactor));

        if git.check_mode() {
            info!("check mode: write operations will be predicted");
        }

        Ok(Self {
            git,
            _wrapper: wrapper,
        })
    }
}
