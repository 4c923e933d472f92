//! Trace selector matching for debugging.

use std::path::PathBuf;

use gkd_selector::{Colors, PrintTracer, Verbosity};
use gkd_snapshot::NodeId;

use super::run_common::{compile_selector, open_snapshot};

pub struct TraceArgs {
    pub selector: String,
    pub snapshot: PathBuf,
    pub verbosity: Verbosity,
    pub recursion_limit: Option<u32>,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let selector = compile_selector(&args.selector, args.recursion_limit, args.color);
    let snapshot = open_snapshot(&args.snapshot);

    let colors = Colors::new(args.color);
    let mut tracer = PrintTracer::new(
        |id: &NodeId| snapshot.label(*id),
        args.verbosity,
        colors,
    );

    let matches: Vec<NodeId> = selector
        .match_all_traced(&snapshot.root(), &snapshot, &mut tracer)
        .collect();
    tracer.print();

    if matches.is_empty() {
        std::process::exit(1);
    }

    println!("{}---{}", colors.dim, colors.reset);
    for id in matches {
        println!("{}", snapshot.label(id));
    }
}
