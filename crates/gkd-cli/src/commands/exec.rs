//! Run a selector against a snapshot and print the matches as JSON.

use std::path::PathBuf;

use gkd_selector::Selector;
use gkd_snapshot::{Node, NodeId, Snapshot};
use serde_json::Value;

use super::run_common::{compile_selector, open_snapshot};

pub struct ExecArgs {
    pub selector: String,
    pub snapshot: PathBuf,
    pub first: bool,
    pub tracks: bool,
    pub pretty: bool,
    pub recursion_limit: Option<u32>,
    pub color: bool,
}

pub fn run(args: ExecArgs) {
    let selector = compile_selector(&args.selector, args.recursion_limit, args.color);
    let snapshot = open_snapshot(&args.snapshot);

    let result = collect(&selector, &snapshot, args.first, args.tracks);
    let output = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: JSON serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Matches as JSON: nodes, or per-stage node arrays with `tracks`; a single
/// value (or `null`) with `first`.
pub fn collect(selector: &Selector, snapshot: &Snapshot, first: bool, tracks: bool) -> Value {
    let root = snapshot.root();
    let node = |id: NodeId| node_json(snapshot.node(id));

    match (tracks, first) {
        (false, false) => Value::Array(selector.match_all(&root, snapshot).map(node).collect()),
        (false, true) => selector.match_first(&root, snapshot).map_or(Value::Null, node),
        (true, false) => Value::Array(
            selector
                .match_all_tracks(&root, snapshot)
                .map(|track| Value::Array(track.into_iter().map(node).collect()))
                .collect(),
        ),
        (true, true) => selector
            .match_tracks(&root, snapshot)
            .map_or(Value::Null, |track| {
                Value::Array(track.into_iter().map(node).collect())
            }),
    }
}

fn node_json(node: &Node) -> Value {
    serde_json::to_value(node).unwrap_or(Value::Null)
}
