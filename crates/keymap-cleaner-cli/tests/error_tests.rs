//! Error handling tests
//!
//! Tests for CLI error types, user-friendly messages and exit codes.

use keymap_cleaner::{CleanerError, ConfigError, ParseError, RegistryError};
use keymap_cleaner_cli::error::CliError;

#[test]
fn test_diagnostics_found_exits_with_two() {
    let error = CliError::DiagnosticsFound(3);
    assert_eq!(error.exit_code(), 2);
    assert!(error.user_message().contains("3 problem(s)"));
}

#[test]
fn test_other_errors_exit_with_one() {
    assert_eq!(CliError::Internal("boom".to_string()).exit_code(), 1);
    assert_eq!(CliError::Config("bad".to_string()).exit_code(), 1);
}

#[test]
fn test_registry_error_suggests_sources() {
    let error = CliError::from(RegistryError::NoSources);
    let msg = error.user_message();
    assert!(msg.contains("No command source could be read"));
    assert!(msg.contains("--commands"));
}

#[test]
fn test_parse_error_message() {
    let error = CliError::from(CleanerError::from(ParseError::InvalidJson(
        "expected value at line 1 column 1".to_string(),
    )));
    let msg = error.user_message();
    assert!(msg.contains("not valid JSON"));
    assert!(msg.contains("line 1 column 1"));
}

#[test]
fn test_config_error_points_at_config_command() {
    let error = CliError::from(ConfigError::Validation("app_folder must not be empty".to_string()));
    let msg = error.user_message();
    assert!(msg.contains("app_folder must not be empty"));
    assert!(msg.contains("keymap-cleaner config"));
}

#[test]
fn test_io_error_conversion() {
    let error = CliError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
    assert!(error.user_message().contains("File operation failed"));
}

#[test]
fn test_incomplete_registry_suggests_snapshot_or_force() {
    let error = CliError::IncompleteRegistry;
    let msg = error.user_message();
    assert_eq!(error.exit_code(), 1);
    assert!(msg.contains("--commands FILE"));
    assert!(msg.contains("--force"));
}
