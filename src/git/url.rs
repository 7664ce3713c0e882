// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote URL checks run before any git command.
//!
//! ```text
//! https://...            ssh_params given  -> warning
//! ssh://git@github.com   any mode          -> fatal
//! mode=local             https / git@ / ssh://git@ url, push_option -> fatal
//! mode=https             url not https://  -> fatal
//! mode=ssh               url not git@ / ssh://git@ -> fatal
//! ```

use crate::config::types::TransportMode;
use crate::error::GitError;

const GITHUB_SSH_SCHEME: &str = "ssh://git@github.com";

/// Inputs of the URL checks.
#[derive(Debug, Clone, Copy)]
pub struct UrlCheck<'a> {
    pub url: &'a str,
    pub mode: Option<TransportMode>,
    pub has_ssh_params: bool,
    pub has_push_option: bool,
}

/// Non-fatal URL findings, collected before [`check`] can fail.
#[must_use]
pub fn warnings(input: &UrlCheck<'_>) -> Vec<String> {
    let mut warnings = Vec::new();
    if is_https(input.url) && input.has_ssh_params {
        warnings.push(r#"SSH Parameters will be ignored as "https" in url"#.to_string());
    }
    warnings
}

/// Validates the remote URL against the transport settings.
///
/// # Errors
///
/// Returns `GitError::Precondition` when the URL cannot work with the
/// selected transport.
pub fn check(input: &UrlCheck<'_>) -> Result<(), GitError> {
    let url = input.url;

    if url.starts_with(GITHUB_SSH_SCHEME) {
        return Err(GitError::Precondition(
            r#"GitHub does not support "ssh://" URL. Please remove it from url"#.to_string(),
        ));
    }

    match input.mode {
        Some(TransportMode::Local) => {
            if is_https(url) || is_ssh(url) {
                return Err(GitError::Precondition(
                    "SSH or HTTPS mode selected but repo is LOCAL".to_string(),
                ));
            }
            if input.has_push_option {
                return Err(GitError::Precondition(
                    r#""--push-option" not supported with mode "local""#.to_string(),
                ));
            }
        }
        Some(TransportMode::Https) if !is_https(url) => {
            return Err(GitError::Precondition(format!(
                "HTTPS mode selected but url ({url}) is not HTTPS"
            )));
        }
        Some(TransportMode::Ssh) if !is_ssh(url) => {
            return Err(GitError::Precondition(format!(
                "SSH mode selected but url ({url}) not starting with git@ or ssh://git@"
            )));
        }
        _ => {}
    }

    Ok(())
}

#[must_use]
pub fn is_https(url: &str) -> bool {
    url.starts_with("https://")
}

#[must_use]
pub fn is_ssh(url: &str) -> bool {
    url.starts_with("git@") || url.starts_with("ssh://git@")
}

/// Embeds credentials into an `https://` URL.
///
/// Returns `None` for any other scheme.
#[must_use]
pub fn with_credentials(url: &str, user: &str, token: &str) -> Option<String> {
    url.strip_prefix("https://")
        .map(|rest| format!("https://{user}:{token}@{rest}"))
}
