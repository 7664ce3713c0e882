// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(9), None);
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    insta::assert_debug_snapshot!(filters, @r#"
    [
        "off",
        "git_acp=error",
        "git_acp=warn",
        "git_acp=info",
        "git_acp=debug",
        "git_acp=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("4").expect("valid level");
    assert_eq!(level, LogLevel::DEBUG);
    assert!(serde_json::from_str::<LogLevel>("12").is_err());
    assert_eq!(serde_json::to_string(&LogLevel::TRACE).unwrap(), "5");
}
