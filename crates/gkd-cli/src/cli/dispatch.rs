//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap.
//! `from_matches()` only pulls the fields a command uses, so hidden unified
//! flags are parsed and then dropped here.

use std::path::PathBuf;

use clap::ArgMatches;
use gkd_selector::Verbosity;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::exec::ExecArgs;
use crate::commands::fmt::FmtArgs;
use crate::commands::trace::TraceArgs;

pub struct CheckParams {
    pub selectors: Vec<String>,
    pub file: Option<PathBuf>,
    pub recursion_limit: Option<u32>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selectors: m
                .get_many::<String>("selectors")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            file: m.get_one::<PathBuf>("file").cloned(),
            recursion_limit: m.get_one::<u32>("recursion_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            selectors: p.selectors,
            file: p.file,
            recursion_limit: p.recursion_limit,
            color: p.color.should_colorize(),
        }
    }
}

pub struct FmtParams {
    pub selector: String,
    pub recursion_limit: Option<u32>,
    pub color: ColorChoice,
}

impl FmtParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selector: required_selector(m),
            recursion_limit: m.get_one::<u32>("recursion_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<FmtParams> for FmtArgs {
    fn from(p: FmtParams) -> Self {
        Self {
            selector: p.selector,
            recursion_limit: p.recursion_limit,
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub selector: String,
    pub recursion_limit: Option<u32>,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selector: required_selector(m),
            recursion_limit: m.get_one::<u32>("recursion_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            selector: p.selector,
            recursion_limit: p.recursion_limit,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExecParams {
    pub selector: String,
    pub snapshot: PathBuf,
    pub first: bool,
    pub tracks: bool,
    pub compact: bool,
    pub recursion_limit: Option<u32>,
    pub color: ColorChoice,
    // Note: verbose is parsed but not extracted (unified flags)
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selector: required_selector(m),
            snapshot: required_snapshot(m),
            first: m.get_flag("first"),
            tracks: m.get_flag("tracks"),
            compact: m.get_flag("compact"),
            recursion_limit: m.get_one::<u32>("recursion_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        Self {
            selector: p.selector,
            snapshot: p.snapshot,
            first: p.first,
            tracks: p.tracks,
            pretty: !p.compact,
            recursion_limit: p.recursion_limit,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub selector: String,
    pub snapshot: PathBuf,
    pub verbosity: Verbosity,
    pub recursion_limit: Option<u32>,
    pub color: ColorChoice,
    // Note: first, tracks, compact are parsed but not extracted (unified flags)
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selector: required_selector(m),
            snapshot: required_snapshot(m),
            verbosity: parse_verbosity(m),
            recursion_limit: m.get_one::<u32>("recursion_limit").copied(),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        Self {
            selector: p.selector,
            snapshot: p.snapshot,
            verbosity: p.verbosity,
            recursion_limit: p.recursion_limit,
            color: p.color.should_colorize(),
        }
    }
}

fn required_selector(m: &ArgMatches) -> String {
    m.get_one::<String>("selector")
        .cloned()
        .expect("clap enforces the selector argument")
}

fn required_snapshot(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("snapshot")
        .cloned()
        .expect("clap enforces the snapshot argument")
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_verbosity(m: &ArgMatches) -> Verbosity {
    match m.get_count("verbose") {
        0 => Verbosity::Default,
        1 => Verbosity::Verbose,
        _ => Verbosity::VeryVerbose,
    }
}
