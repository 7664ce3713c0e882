// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AcpError, AcpResult, GitError, ParamError, ProcessError};

#[test]
fn test_command_failed_display() {
    let err = GitError::CommandFailed {
        command: "/usr/bin/git push origin main".to_string(),
        rc: 128,
        stdout: String::new(),
        stderr: "fatal: unable to access".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"Error in running '/usr/bin/git push origin main' command");
}

#[test]
fn test_param_error_display() {
    let errors = [
        ParamError::Together("comment, add".to_string()).to_string(),
        ParamError::OneOf("add, pull, push".to_string()).to_string(),
        ParamError::RequiredIf {
            key: "mode".to_string(),
            value: "https".to_string(),
            missing: "user, token".to_string(),
        }
        .to_string(),
        ParamError::Unsupported {
            module: "git_acp".to_string(),
            keys: "colour".to_string(),
        }
        .to_string(),
    ];
    insta::assert_snapshot!(errors.join("\n"), @r"
    parameters are required together: comment, add
    one of the following is required: add, pull, push
    mode is https but all of the following are missing: user, token
    Unsupported parameters for (git_acp) module: colour
    ");
}

#[test]
fn test_boxed_conversion_keeps_message() {
    let err: AcpError = ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    }
    .into();
    assert!(matches!(err, AcpError::Process(_)));
    assert_eq!(
        err.to_string(),
        "Failed to find required executable \"git\" in paths"
    );
}

#[test]
fn test_acp_error_size() {
    // Box<str> variants are 16 bytes (fat pointer), plus discriminant
    let size = std::mem::size_of::<AcpError>();
    assert!(size <= 24, "AcpError is {size} bytes, expected <= 24");
}

#[test]
fn test_acp_result_size() {
    let size = std::mem::size_of::<AcpResult<()>>();
    assert!(size <= 24, "AcpResult<()> is {size} bytes, expected <= 24");
}
