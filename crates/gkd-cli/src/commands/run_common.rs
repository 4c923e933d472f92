//! Shared logic for commands that compile a selector.

use std::path::Path;

use gkd_selector::Selector;
use gkd_snapshot::Snapshot;

use super::loader::load_snapshot;

/// Compile `source`, or print the diagnostic and exit.
pub fn compile_selector(source: &str, recursion_limit: Option<u32>, color: bool) -> Selector {
    let mut builder = Selector::builder(source);
    if let Some(limit) = recursion_limit {
        builder = builder.recursion_limit(limit);
    }

    builder.compile().unwrap_or_else(|err| {
        eprintln!("{}", err.printer(source).colored(color).render());
        std::process::exit(1);
    })
}

/// Load the snapshot at `path`, or print the error and exit.
pub fn open_snapshot(path: &Path) -> Snapshot {
    load_snapshot(path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
