//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose. Flags that a
//! command accepts but ignores are attached with `.hide(true)`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Selector text (positional).
pub fn selector_arg() -> Arg {
    Arg::new("selector")
        .value_name("SELECTOR")
        .required(true)
        .help("Selector text")
}

/// Zero or more selectors (positional, for `check`).
pub fn selectors_arg() -> Arg {
    Arg::new("selectors")
        .value_name("SELECTOR")
        .num_args(0..)
        .help("Selectors to validate")
}

/// File with one selector per line (-f/--file).
pub fn selector_file_arg() -> Arg {
    Arg::new("file")
        .short('f')
        .long("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Read selectors from FILE, one per line (`-` for stdin)")
}

/// Snapshot JSON file (positional).
pub fn snapshot_arg() -> Arg {
    Arg::new("snapshot")
        .value_name("SNAPSHOT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Snapshot JSON file (`-` for stdin)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Stop at the first match (--first).
pub fn first_arg() -> Arg {
    Arg::new("first")
        .long("first")
        .action(ArgAction::SetTrue)
        .help("Report only the first match")
}

/// Report whole tracks (--tracks).
pub fn tracks_arg() -> Arg {
    Arg::new("tracks")
        .long("tracks")
        .action(ArgAction::SetTrue)
        .help("Report every stage's node instead of the tracked one")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty)")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for verbose, -vv for very verbose)")
}

/// Parenthesis nesting cap (--recursion-limit).
pub fn recursion_limit_arg() -> Arg {
    Arg::new("recursion_limit")
        .long("recursion-limit")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Maximum parenthesis nesting inside filters")
}
