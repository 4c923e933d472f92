//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: exec and trace accept each other's flags without error
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use gkd_selector::Verbosity;

use super::*;
use crate::cli::commands::{ast_command, check_command, exec_command, fmt_command, trace_command};

#[test]
fn check_accepts_many_selectors() {
    let m = check_command()
        .try_get_matches_from(["check", "A > B", "[text^='x']"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.selectors, vec!["A > B", "[text^='x']"]);
    assert_eq!(params.file, None);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn check_accepts_file_flag() {
    let m = check_command()
        .try_get_matches_from(["check", "-f", "rules.txt", "--recursion-limit", "8"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert!(params.selectors.is_empty());
    assert_eq!(params.file, Some(PathBuf::from("rules.txt")));
    assert_eq!(params.recursion_limit, Some(8));
}

#[test]
fn fmt_and_ast_require_selector() {
    assert!(fmt_command().try_get_matches_from(["fmt"]).is_err());
    assert!(ast_command().try_get_matches_from(["ast"]).is_err());

    let m = fmt_command()
        .try_get_matches_from(["fmt", "A>B", "--color", "never"])
        .unwrap();
    let params = FmtParams::from_matches(&m);
    assert_eq!(params.selector, "A>B");
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn exec_extracts_flags() {
    let m = exec_command()
        .try_get_matches_from([
            "exec",
            "A > B",
            "snapshot.json",
            "--first",
            "--tracks",
            "--compact",
            "--color",
            "always",
        ])
        .unwrap();
    let params = ExecParams::from_matches(&m);
    assert_eq!(params.selector, "A > B");
    assert_eq!(params.snapshot, PathBuf::from("snapshot.json"));
    assert!(params.first);
    assert!(params.tracks);
    assert!(params.compact);
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn exec_requires_snapshot() {
    let result = exec_command().try_get_matches_from(["exec", "A"]);
    assert!(result.is_err());
}

#[test]
fn exec_accepts_trace_flags() {
    let result = exec_command().try_get_matches_from(["exec", "A", "s.json", "-vv"]);
    assert!(
        result.is_ok(),
        "exec should accept trace flags: {:?}",
        result.err()
    );
}

#[test]
fn trace_accepts_exec_flags() {
    let result = trace_command().try_get_matches_from([
        "trace",
        "A",
        "s.json",
        "--first",
        "--tracks",
        "--compact",
    ]);
    assert!(
        result.is_ok(),
        "trace should accept exec flags: {:?}",
        result.err()
    );
}

#[test]
fn trace_counts_verbosity() {
    let cases = [
        (vec!["trace", "A", "s.json"], Verbosity::Default),
        (vec!["trace", "A", "s.json", "-v"], Verbosity::Verbose),
        (vec!["trace", "A", "s.json", "-vv"], Verbosity::VeryVerbose),
        (vec!["trace", "A", "s.json", "-vvv"], Verbosity::VeryVerbose),
    ];
    for (argv, expected) in cases {
        let m = trace_command().try_get_matches_from(argv).unwrap();
        assert_eq!(TraceParams::from_matches(&m).verbosity, expected);
    }
}

#[test]
fn hidden_flags_stay_out_of_help() {
    let help = trace_command().render_help().to_string();
    assert!(help.contains("Verbosity level"));
    assert!(!help.contains("--tracks"));
    assert!(!help.contains("--compact"));

    let help = exec_command().render_help().to_string();
    assert!(help.contains("--tracks"));
    assert!(!help.contains("Verbosity level"));
}

#[test]
fn rejects_unknown_color() {
    let result = fmt_command().try_get_matches_from(["fmt", "A", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn cli_requires_subcommand() {
    assert!(build_cli().try_get_matches_from(["gkd"]).is_err());
    let m = build_cli()
        .try_get_matches_from(["gkd", "ast", "A"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("ast"));
}
