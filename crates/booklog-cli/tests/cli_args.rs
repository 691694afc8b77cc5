//! Argument parsing for booklog-tool.

use booklog_cli::{command, usage_exit_code, Invocation, LogFormat};
use booklog_core::{IdMode, TagOperation};
use clap::error::ErrorKind;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn add_tag_with_defaults() {
    let inv = Invocation::try_parse_from(["booklog-tool", "add-tag", "-t", "2024", "-f", "ids.txt"])
        .unwrap();

    assert_eq!(inv.operation, TagOperation::AddTag("2024".to_string()));
    assert_eq!(inv.file, PathBuf::from("ids.txt"));
    assert_eq!(inv.mode, IdMode::ItemId);
    assert_eq!(inv.delay, Duration::from_millis(500));
    assert_eq!(inv.config_path, None);
    assert_eq!(inv.base_url, None);
    assert_eq!(inv.logging.format, LogFormat::Text);
    assert_eq!(inv.logging.level, None);
}

#[test]
fn update_location_by_isbn() {
    let inv = Invocation::try_parse_from([
        "booklog-tool",
        "update-location",
        "--location",
        "Tokyo",
        "--file",
        "isbns.txt",
        "--id",
        "isbn",
    ])
    .unwrap();

    assert_eq!(inv.operation, TagOperation::SetLocation("Tokyo".to_string()));
    assert_eq!(inv.mode, IdMode::Isbn);
}

#[test]
fn global_flags_after_the_subcommand() {
    let inv = Invocation::try_parse_from([
        "booklog-tool",
        "add-tag",
        "-t",
        "x",
        "-f",
        "ids.txt",
        "--delay-ms",
        "0",
        "--config",
        "/tmp/creds.json",
        "--log-format",
        "json",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert_eq!(inv.delay, Duration::ZERO);
    assert_eq!(inv.config_path, Some(PathBuf::from("/tmp/creds.json")));
    assert_eq!(inv.logging.format, LogFormat::Json);
    assert_eq!(inv.logging.level.as_deref(), Some("debug"));
}

#[test]
fn global_flags_before_the_subcommand() {
    let inv = Invocation::try_parse_from([
        "booklog-tool",
        "--delay-ms",
        "1500",
        "update-location",
        "-l",
        "desk",
        "-f",
        "ids.txt",
    ])
    .unwrap();

    assert_eq!(inv.delay, Duration::from_millis(1500));
}

#[test]
fn unknown_id_type_is_a_usage_error() {
    let err = command()
        .try_get_matches_from(["booklog-tool", "add-tag", "-t", "x", "-f", "ids.txt", "-i", "asin"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn missing_required_flags() {
    let err = command()
        .try_get_matches_from(["booklog-tool", "add-tag", "-f", "ids.txt"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

    let err = command()
        .try_get_matches_from(["booklog-tool", "update-location", "-l", "desk"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn subcommand_is_required() {
    let err = command().try_get_matches_from(["booklog-tool"]).unwrap_err();
    assert_eq!(
        err.kind(),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
}

#[test]
fn no_help_subcommand() {
    let err = command()
        .try_get_matches_from(["booklog-tool", "help"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
}

#[test]
fn delay_must_be_a_number() {
    let err = command()
        .try_get_matches_from(["booklog-tool", "add-tag", "-t", "x", "-f", "ids", "--delay-ms", "soon"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn usage_errors_exit_with_one() {
    for args in [
        vec!["booklog-tool"],
        vec!["booklog-tool", "add-tag", "-f", "ids.txt"],
        vec!["booklog-tool", "update-location", "-l", "desk", "-f", "ids.txt", "-i", "asin"],
    ] {
        let err = command().try_get_matches_from(args.clone()).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1, "{args:?}");
    }
}

#[test]
fn help_and_version_exit_with_zero() {
    for args in [
        vec!["booklog-tool", "--help"],
        vec!["booklog-tool", "add-tag", "--help"],
        vec!["booklog-tool", "--version"],
    ] {
        let err = command().try_get_matches_from(args.clone()).unwrap_err();
        assert_eq!(usage_exit_code(&err), 0, "{args:?}");
    }
}
