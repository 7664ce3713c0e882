// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `git_mactp` module.

use git_acp::config::ParamsLoader;
use git_acp::module::result::{FailureReport, ModuleResult, Operation};
use git_acp::module::{ModuleKind, Outcome, execute};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to run git commands in a directory, returning stdout.
fn run_git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Work tree on `main` with a `develop` branch, and a bare remote holding both.
struct Repos {
    _dir: TempDir,
    work: PathBuf,
    remote: PathBuf,
}

fn setup() -> Repos {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let work = dir.path().join("work");
    let remote = dir.path().join("remote.git");
    fs::create_dir(&work).unwrap();

    run_git(&["init", "-q"], &work);
    run_git(&["symbolic-ref", "HEAD", "refs/heads/main"], &work);
    run_git(&["config", "user.email", "test@test.com"], &work);
    run_git(&["config", "user.name", "Test"], &work);
    fs::write(work.join("README.md"), "# Test\n").unwrap();
    run_git(&["add", "README.md"], &work);
    run_git(&["commit", "-q", "-m", "Initial commit"], &work);
    run_git(&["branch", "develop"], &work);
    run_git(&["clone", "-q", "--bare", "work", "remote.git"], dir.path());

    Repos {
        _dir: dir,
        work,
        remote,
    }
}

async fn run_mactp(repos: &Repos, extra: Value) -> Outcome {
    let mut args = json!({"path": repos.work, "url": repos.remote});
    if let (Some(args), Value::Object(extra)) = (args.as_object_mut(), extra) {
        args.extend(extra);
    }
    let raw = ParamsLoader::new()
        .add_json_str(&args.to_string())
        .build()
        .expect("arguments should load");
    execute(ModuleKind::Mactp, raw).await
}

fn expect_success(outcome: Outcome) -> ModuleResult {
    match outcome {
        Outcome::Success(result) => result,
        Outcome::Failure(report) => panic!("git_mactp failed: {report:?}"),
    }
}

fn expect_failure(outcome: Outcome) -> FailureReport {
    match outcome {
        Outcome::Failure(report) => report,
        Outcome::Success(result) => panic!("git_mactp succeeded: {result:?}"),
    }
}

// =============================================================================
// Checkout / add / commit / push
// =============================================================================

#[tokio::test]
async fn mactp_commits_current_branch() {
    let repos = setup();
    run_git(&["checkout", "-q", "develop"], &repos.work);
    fs::write(repos.work.join("feature.txt"), "feature\n").unwrap();

    let result = expect_success(
        run_mactp(&repos, json!({"add": ["feature.txt"], "message": "Add feature"})).await,
    );

    assert!(result.get(Operation::Checkout).is_none());
    assert!(result.get(Operation::Commit).is_some_and(|r| r.changed));
    assert!(result.get(Operation::Push).is_some_and(|r| r.changed));
    assert!(result.changed());
    assert_eq!(
        run_git(&["log", "--format=%s", "develop"], &repos.remote),
        "Add feature\nInitial commit\n"
    );
    assert_eq!(
        run_git(&["log", "--format=%s", "main"], &repos.remote),
        "Initial commit\n"
    );
}

#[tokio::test]
async fn mactp_reports_operations_in_order() {
    let repos = setup();
    fs::write(repos.work.join("feature.txt"), "feature\n").unwrap();

    let result = expect_success(
        run_mactp(
            &repos,
            json!({"add": "feature.txt", "message": "m", "pull": true}),
        )
        .await,
    );

    insta::assert_debug_snapshot!(result.operations().collect::<Vec<_>>(), @r"
    [
        Pull,
        Commit,
        Push,
    ]
    ");
    assert!(result.get(Operation::Pull).is_some_and(|r| !r.changed));
}

// =============================================================================
// Merge / tag
// =============================================================================

#[tokio::test]
async fn mactp_merge_and_push() {
    let repos = setup();
    run_git(&["checkout", "-q", "develop"], &repos.work);
    fs::write(repos.work.join("dev.txt"), "dev\n").unwrap();
    run_git(&["add", "dev.txt"], &repos.work);
    run_git(&["commit", "-q", "-m", "Dev work"], &repos.work);
    run_git(&["checkout", "-q", "main"], &repos.work);

    let result = expect_success(
        run_mactp(
            &repos,
            json!({"merge": "develop", "merge_options": "--no-ff,--no-edit"}),
        )
        .await,
    );

    assert!(result.get(Operation::Merge).is_some_and(|r| r.changed));
    assert!(result.get(Operation::Push).is_some_and(|r| r.changed));
    let parents = run_git(&["log", "-1", "--format=%p", "main"], &repos.remote);
    assert_eq!(parents.split_whitespace().count(), 2);
}

#[tokio::test]
async fn mactp_merge_up_to_date_is_unchanged() {
    let repos = setup();

    let result = expect_success(
        run_mactp(&repos, json!({"merge": "develop", "push": false})).await,
    );

    assert!(result.get(Operation::Merge).is_some_and(|r| !r.changed));
    assert!(!result.changed());
}

#[tokio::test]
async fn mactp_tag_with_branch_checks_out_first() {
    let repos = setup();

    let result = expect_success(
        run_mactp(&repos, json!({"branch": "develop", "tag": "v0.1"})).await,
    );

    assert!(result.get(Operation::Checkout).is_some_and(|r| r.changed));
    assert!(result.get(Operation::Tag).is_some_and(|r| r.changed));
    assert_eq!(
        run_git(&["rev-parse", "v0.1^{commit}"], &repos.remote),
        run_git(&["rev-parse", "develop"], &repos.remote)
    );
}

#[tokio::test]
async fn mactp_existing_tag_fails() {
    let repos = setup();
    run_git(&["tag", "v1.0"], &repos.work);

    let report = expect_failure(
        run_mactp(&repos, json!({"branch": "main", "tag": "v1.0"})).await,
    );

    assert_eq!(report.rc(), Some(128));
    assert!(report.command().is_some_and(|c| c.ends_with("tag v1.0")));
    assert!(report.stderr().is_some_and(|s| s.contains("already exists")));
}

#[tokio::test]
async fn mactp_check_mode_predicts_tag() {
    let repos = setup();

    let result = expect_success(
        run_mactp(
            &repos,
            json!({"branch": "main", "tag": "v2.0", "_ansible_check_mode": true}),
        )
        .await,
    );

    assert!(result.get(Operation::Tag).is_some_and(|r| r.changed));
    assert!(result.get(Operation::Push).is_some_and(|r| r.changed));
    assert_eq!(run_git(&["tag", "--list"], &repos.work), "");
    assert_eq!(run_git(&["tag", "--list"], &repos.remote), "");
}

// =============================================================================
// Argument rules
// =============================================================================

#[tokio::test]
async fn mactp_rules_fail_before_running() {
    let repos = setup();
    fs::write(repos.work.join("feature.txt"), "feature\n").unwrap();

    let report = expect_failure(run_mactp(&repos, json!({"tag": "v1.0"})).await);
    insta::assert_snapshot!(report.msg(), @"parameters are required together: tag, branch");

    let report = expect_failure(
        run_mactp(&repos, json!({"add": ["."], "tag": "v1.0", "branch": "main", "message": "m"}))
            .await,
    );
    insta::assert_snapshot!(report.msg(), @"parameters are mutually exclusive: add|tag|merge");

    let report = expect_failure(run_mactp(&repos, json!({"add": ["."]})).await);
    insta::assert_snapshot!(report.msg(), @"missing parameter(s) required by 'add': message");

    assert!(run_git(&["status", "--porcelain"], &repos.work).contains("?? feature.txt"));
}
