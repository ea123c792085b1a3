// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn no_config_path_yields_defaults() {
    let config = load_scheduler_config(None).expect("defaults always load");
    assert_eq!(
        config.list_operations_default_page_size,
        SchedulerConfig::default().list_operations_default_page_size
    );
}

#[test]
fn config_path_overrides_are_applied() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config file");
    writeln!(file, "operation_poll_timeout_secs = 30").expect("write temp config file");

    let config = load_scheduler_config(Some(file.path())).expect("valid config file");
    assert_eq!(config.operation_poll_timeout, std::time::Duration::from_secs(30));
}

#[test]
fn missing_config_path_is_an_error() {
    let err = load_scheduler_config(Some(Path::new("/nonexistent/remex-config.toml")));
    assert!(err.is_err());
}

#[test]
fn malformed_config_path_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config file");
    writeln!(file, "not_a_real_field = 1").expect("write temp config file");

    let err = load_scheduler_config(Some(file.path()));
    assert!(err.is_err());
}

#[test]
fn cli_parses_default_flags() {
    let cli = Cli::parse_from(["remex"]);
    assert_eq!(cli.actions, 3);
    assert_eq!(cli.workers, 2);
    assert_eq!(cli.poll_interval_ms, 200);
    assert!(cli.config.is_none());
}

#[test]
fn cli_parses_overridden_flags() {
    let cli = Cli::parse_from(["remex", "--actions", "10", "--workers", "5", "--config", "cfg.toml"]);
    assert_eq!(cli.actions, 10);
    assert_eq!(cli.workers, 5);
    assert_eq!(cli.config.as_deref(), Some(Path::new("cfg.toml")));
}
