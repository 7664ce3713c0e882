// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write as _;
use std::path::PathBuf;

use super::types::{CleanMode, ConfigScope, RawParams, SshParams, TransportMode};
use super::ParamsLoader;
use crate::error::ParamError;

fn load(json: &str) -> RawParams {
    ParamsLoader::new()
        .add_json_str(json)
        .build()
        .expect("arguments should load")
}

#[test]
fn test_acp_defaults() {
    let params = load(r#"{"path": "/srv/repo", "url": "git@github.com:o/r.git", "comment": "msg"}"#)
        .into_acp()
        .expect("valid acp arguments");

    assert_eq!(params.add, vec!["."]);
    assert_eq!(params.branch, "main");
    assert_eq!(params.remote, "origin");
    assert_eq!(params.comment, "msg");
    assert!(!params.common.pull);
    assert!(params.common.push);
    assert!(!params.common.push_force);
    assert_eq!(params.common.pull_options, vec!["--no-edit"]);
    assert_eq!(params.common.path, PathBuf::from("/srv/repo"));
    assert!(!params.common.framework.check_mode);
}

#[test]
fn test_acp_message_alias() {
    let params = load(r#"{"path": "/r", "url": "/tmp/remote.git", "message": "via alias"}"#)
        .into_acp()
        .expect("message is an alias of comment");
    assert_eq!(params.comment, "via alias");
}

#[test]
fn test_ansible_booleans_and_lists() {
    let params = load(
        r#"{"path": "/r", "url": "/tmp/remote.git", "comment": "c",
            "add": "a.txt, b.txt", "pull": "yes", "push": "no",
            "pull_options": ["--rebase", "--autostash"]}"#,
    )
    .into_acp()
    .expect("valid acp arguments");

    assert_eq!(params.add, vec!["a.txt", "b.txt"]);
    assert!(params.common.pull);
    assert!(!params.common.push);
    assert_eq!(params.common.pull_options, vec!["--rebase", "--autostash"]);
}

#[test]
fn test_framework_keys() {
    let params = load(
        r#"{"path": "/r", "url": "/tmp/remote.git", "comment": "c",
            "_ansible_tmpdir": "/tmp/ansible-tmp", "_ansible_check_mode": true,
            "_ansible_verbosity": 0}"#,
    )
    .into_acp()
    .expect("framework keys are accepted");

    assert!(params.common.framework.check_mode);
    assert_eq!(
        params.common.framework.tmpdir,
        Some(PathBuf::from("/tmp/ansible-tmp"))
    );
}

#[test]
fn test_nested_parameters() {
    let params = load(
        r#"{"path": "/r", "url": "https://example.com/o/r.git", "comment": "c",
            "mode": "https", "user": "bot", "token": "secret", "clean": "all",
            "git_config": {"user_name": "Bot", "user_email": "bot@example.com", "mode": "global"},
            "ssh_params": {"key_file": "/keys/id", "accept_hostkey": true}}"#,
    )
    .into_acp()
    .expect("valid acp arguments");

    assert_eq!(params.mode, Some(TransportMode::Https));
    assert_eq!(params.clean, Some(CleanMode::All));
    let user = params.git_config.expect("git_config resolved");
    assert_eq!(user.name, "Bot");
    assert_eq!(user.scope, ConfigScope::Global);
    assert_eq!(
        params.common.ssh,
        Some(SshParams {
            key_file: Some(PathBuf::from("/keys/id")),
            accept_hostkey: true,
            ssh_opts: None,
        })
    );
}

#[test]
fn test_unsupported_parameters() {
    let err = load(r#"{"path": "/r", "url": "u", "tag": "v1", "colour": "red"}"#)
        .into_acp()
        .expect_err("tag and colour are not git_acp parameters");
    insta::assert_snapshot!(err, @"Unsupported parameters for (git_acp) module: colour, tag");
}

#[test]
fn test_missing_required() {
    let err = load(r#"{"comment": "c"}"#)
        .into_acp()
        .expect_err("path and url are required");
    assert_eq!(err, ParamError::Missing("path, url".to_string()));
}

#[test]
fn test_acp_required_if_https() {
    let err = load(r#"{"path": "/r", "url": "https://h/r.git", "comment": "c", "mode": "https", "user": "u"}"#)
        .into_acp()
        .expect_err("token is required for https");
    insta::assert_snapshot!(err, @"mode is https but all of the following are missing: token");
}

#[test]
fn test_acp_git_config_needs_both_keys() {
    let err = load(r#"{"path": "/r", "url": "u", "comment": "c", "git_config": {"user_name": "n"}}"#)
        .into_acp()
        .expect_err("email is missing");
    assert!(matches!(err, ParamError::Together(_)));
}

#[test]
fn test_add_rejects_globs() {
    let err = load(r#"{"path": "/r", "url": "u", "comment": "c", "add": ["src/*.rs", "README"]}"#)
        .into_acp()
        .expect_err("globs are rejected");
    insta::assert_snapshot!(err, @"add does not accept file globs: src/*.rs");
}

#[test]
fn test_mactp_exclusive() {
    let err = load(r#"{"path": "/r", "url": "u", "add": ["a"], "merge": "dev", "message": "m"}"#)
        .into_mactp()
        .expect_err("add and merge are exclusive");
    insta::assert_snapshot!(err, @"parameters are mutually exclusive: add|tag|merge");
}

#[test]
fn test_mactp_tag_requires_branch() {
    let err = load(r#"{"path": "/r", "url": "u", "tag": "v1.0"}"#)
        .into_mactp()
        .expect_err("tag needs branch");
    assert_eq!(err, ParamError::Together("tag, branch".to_string()));
}

#[test]
fn test_mactp_add_requires_message() {
    let err = load(r#"{"path": "/r", "url": "u", "add": ["a"]}"#)
        .into_mactp()
        .expect_err("add needs a message");
    insta::assert_snapshot!(err, @"missing parameter(s) required by 'add': message");
}

#[test]
fn test_mactp_resolves() {
    let params = load(
        r#"{"path": "/r", "url": "u", "merge": "feature", "merge_options": "--no-ff,--no-edit"}"#,
    )
    .into_mactp()
    .expect("valid mactp arguments");

    assert_eq!(params.merge.as_deref(), Some("feature"));
    assert_eq!(params.merge_options, vec!["--no-ff", "--no-edit"]);
    assert!(params.branch.is_none());
    assert!(params.add.is_none());
    assert!(params.common.push);

    let params = load(r#"{"path": "/r", "url": "u", "tag": "v1.0", "branch": "release"}"#)
        .into_mactp()
        .expect("tag with branch is valid");
    assert_eq!(params.tag.as_deref(), Some("v1.0"));
    assert_eq!(params.branch.as_deref(), Some("release"));
}

#[test]
fn test_mactp_branch_requires_tag() {
    let err = load(r#"{"path": "/r", "url": "u", "merge": "feature", "branch": "main"}"#)
        .into_mactp()
        .expect_err("branch without tag");
    assert_eq!(err, ParamError::Together("tag, branch".to_string()));
}

#[test]
fn test_mactp_rejects_acp_only_keys() {
    let err = load(r#"{"path": "/r", "url": "u", "mode": "ssh", "comment": "c"}"#)
        .into_mactp()
        .expect_err("mode and comment belong to git_acp");
    insta::assert_snapshot!(err, @"Unsupported parameters for (git_mactp) module: comment, mode");
}

#[test]
fn test_override_and_defaults_file() {
    let mut defaults = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(defaults, "branch = \"develop\"\npush_force = true").expect("write defaults");

    let loader = ParamsLoader::new()
        .add_toml_file(defaults.path())
        .add_json_str(r#"{"path": "/r", "url": "u", "comment": "c", "push_force": false}"#)
        .set("pull", "true")
        .expect("valid override");
    assert_eq!(loader.loaded_files().len(), 2);

    let params = loader
        .build()
        .expect("arguments should load")
        .into_acp()
        .expect("valid acp arguments");

    assert_eq!(params.branch, "develop");
    assert!(!params.common.push_force);
    assert!(params.common.pull);
}

#[test]
fn test_env_prefix_overrides_args() {
    // SAFETY: the variables use a prefix no other test reads.
    unsafe {
        std::env::set_var("GITACPTEST_PUSH", "no");
        std::env::set_var("GITACPTEST_BRANCH", "develop");
        std::env::set_var("GITACPTEST_GIT_CONFIG__USER_EMAIL", "env@example.com");
    }

    let params = ParamsLoader::new()
        .add_json_str(
            r#"{"path": "/r", "url": "u", "comment": "c", "push": true, "branch": "main",
                "git_config": {"user_name": "n", "user_email": "args@example.com"}}"#,
        )
        .with_env_prefix("GITACPTEST")
        .build()
        .expect("arguments should load")
        .into_acp()
        .expect("valid acp arguments");

    assert!(!params.common.push, "GITACPTEST_PUSH should override the args file");
    assert_eq!(params.branch, "develop");
    assert_eq!(
        params.git_config.map(|c| c.email).as_deref(),
        Some("env@example.com")
    );

    // SAFETY: same as above.
    unsafe {
        std::env::remove_var("GITACPTEST_PUSH");
        std::env::remove_var("GITACPTEST_BRANCH");
        std::env::remove_var("GITACPTEST_GIT_CONFIG__USER_EMAIL");
    }
}

#[test]
fn test_format_options_hides_secrets() {
    let raw = load(r#"{"path": "/r", "url": "https://h/r.git", "token": "t0k", "push": false}"#);
    insta::assert_debug_snapshot!(raw.format_options(), @r#"
    [
        "path  = /r",
        "push  = false",
        "token = [hidden]",
        "url   = [hidden]",
    ]
    "#);
    assert_eq!(raw.no_log_values(), vec!["https://h/r.git", "t0k"]);
}

#[test]
fn test_effective_ssh_opts() {
    let params = SshParams {
        key_file: None,
        accept_hostkey: true,
        ssh_opts: Some("-o UserKnownHostsFile=/dev/null".to_string()),
    };
    assert_eq!(
        params.effective_opts().as_deref(),
        Some("-o UserKnownHostsFile=/dev/null -o StrictHostKeyChecking=no")
    );

    let already = SshParams {
        ssh_opts: Some("-o StrictHostKeyChecking=no".to_string()),
        ..params
    };
    assert_eq!(
        already.effective_opts().as_deref(),
        Some("-o StrictHostKeyChecking=no")
    );
    assert_eq!(SshParams::default().effective_opts(), None);
}
