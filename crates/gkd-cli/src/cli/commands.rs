//! Command builders for the CLI.
//!
//! `exec` and `trace` both run a selector against a snapshot, so each
//! accepts the other's flags, hidden from `--help`.

use clap::Command;

use super::args::*;

/// Add hidden exec output args (for commands that don't produce JSON).
fn with_hidden_exec_args(cmd: Command) -> Command {
    cmd.arg(first_arg().hide(true))
        .arg(tracks_arg().hide(true))
        .arg(compact_arg().hide(true))
}

/// Add hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("gkd")
        .about("Check, format and run GKD selectors against node-tree snapshots")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(fmt_command())
        .subcommand(ast_command())
        .subcommand(exec_command())
        .subcommand(trace_command())
}

/// Validate selectors.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate selectors")
        .override_usage(
            "\
  gkd check <SELECTOR>...
  gkd check -f <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  gkd check '[text^="跳过"]'            # one selector
  gkd check 'A > B' 'C + D'             # several
  gkd check -f rules.txt                # one selector per line"#,
        )
        .arg(selectors_arg())
        .arg(selector_file_arg())
        .arg(recursion_limit_arg())
        .arg(color_arg())
}

/// Print a selector in canonical form.
pub fn fmt_command() -> Command {
    Command::new("fmt")
        .about("Print a selector in canonical form")
        .after_help(
            r#"EXAMPLES:
  gkd fmt 'A>B  C[a="x"]'               # A > B C[a='x']"#,
        )
        .arg(selector_arg())
        .arg(recursion_limit_arg())
        .arg(color_arg())
}

/// Show the parsed stages of a selector.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the parsed stages of a selector")
        .after_help(
            r#"EXAMPLES:
  gkd ast '@TextView[text^="跳过"] + LinearLayout'"#,
        )
        .arg(selector_arg())
        .arg(recursion_limit_arg())
        .arg(color_arg())
}

/// Run a selector against a snapshot and output JSON.
///
/// Accepts trace flags for a unified CLI experience, but ignores them.
pub fn exec_command() -> Command {
    let cmd = Command::new("exec")
        .about("Run a selector against a snapshot and output JSON")
        .override_usage(
            "\
  gkd exec <SELECTOR> <SNAPSHOT> [--first] [--tracks] [--compact]",
        )
        .after_help(
            r#"EXAMPLES:
  gkd exec '[text^="跳过"]' snapshot.json           # every match
  gkd exec '[text^="跳过"]' snapshot.json --first   # first match only
  gkd exec 'A > @B' snapshot.json --tracks          # whole paths
  gkd exec 'A' snapshot.json --compact | jq         # one-line JSON"#,
        )
        .arg(selector_arg())
        .arg(snapshot_arg())
        .arg(first_arg())
        .arg(tracks_arg())
        .arg(compact_arg())
        .arg(recursion_limit_arg())
        .arg(color_arg());

    with_hidden_trace_args(cmd)
}

/// Trace selector matching against a snapshot.
///
/// Accepts exec flags for a unified CLI experience, but ignores them.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace selector matching against a snapshot")
        .override_usage(
            "\
  gkd trace <SELECTOR> <SNAPSHOT> [-v|-vv]",
        )
        .after_help(
            r#"EXAMPLES:
  gkd trace 'A > B' snapshot.json       # accepted nodes and matches
  gkd trace 'A > B' snapshot.json -v    # also rejections and backtracking
  gkd trace 'A > B' snapshot.json -vv   # also every visited node"#,
        )
        .arg(selector_arg())
        .arg(snapshot_arg())
        .arg(verbose_arg())
        .arg(recursion_limit_arg())
        .arg(color_arg());

    with_hidden_exec_args(cmd)
}
