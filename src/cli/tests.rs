// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::module::parse_key_value;
use crate::cli::{Cli, Command};
use crate::logging::LogLevel;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["git-acp", "version"]).unwrap();
    assert!(matches!(cli.command, Command::Version));
}

#[test]
fn test_parse_acp_args_file() {
    let cli = Cli::try_parse_from(["git-acp", "acp", "/tmp/ansible/args"]).unwrap();
    insta::assert_debug_snapshot!(cli.command, @r#"
    Acp(
        ModuleArgs {
            args_file: Some(
                "/tmp/ansible/args",
            ),
            defaults: None,
            overrides: [],
        },
    )
    "#);
}

#[test]
fn test_parse_mactp_overrides() {
    let cli = Cli::try_parse_from([
        "git-acp",
        "-l",
        "4",
        "mactp",
        "--defaults",
        "site.toml",
        "--set",
        "tag=v1.0",
        "-s",
        "push_option=ci.skip=true",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(4));
    let Command::Mactp(args) = cli.command else {
        panic!("expected mactp");
    };
    assert_eq!(args.args_file, None);
    assert_eq!(
        args.overrides,
        vec![
            ("tag".to_string(), "v1.0".to_string()),
            ("push_option".to_string(), "ci.skip=true".to_string()),
        ]
    );
}

#[test]
fn test_parse_rejects_bad_override() {
    assert!(Cli::try_parse_from(["git-acp", "acp", "--set", "novalue"]).is_err());
    assert!(parse_key_value("=x").is_err());
    assert_eq!(
        parse_key_value(" branch =dev").unwrap(),
        ("branch".to_string(), "dev".to_string())
    );
}

#[test]
fn test_parse_rejects_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["git-acp", "-l", "7", "version"]).is_err());
}

#[test]
fn test_log_config_defaults() {
    let cli = Cli::try_parse_from(["git-acp", "version"]).unwrap();
    let config = cli.global.to_log_config();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), None);

    let cli = Cli::try_parse_from([
        "git-acp",
        "-l",
        "3",
        "--log-file",
        "/var/log/git-acp.log",
        "--json-log",
        "version",
    ])
    .unwrap();
    let config = cli.global.to_log_config();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.log_file(), Some("/var/log/git-acp.log"));
    assert!(config.json_file());
}
