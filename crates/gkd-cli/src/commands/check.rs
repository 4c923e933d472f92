use std::path::PathBuf;

use gkd_selector::Selector;

use super::loader::{SelectorLine, load_selector_file};

pub struct CheckArgs {
    pub selectors: Vec<String>,
    pub file: Option<PathBuf>,
    pub recursion_limit: Option<u32>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let mut inputs: Vec<(Option<String>, SelectorLine)> = args
        .selectors
        .into_iter()
        .map(|text| (None, SelectorLine { line: 1, text }))
        .collect();

    if let Some(path) = &args.file {
        let lines = load_selector_file(path).unwrap_or_else(|e| {
            eprintln!("error: {}", e);
            std::process::exit(1);
        });
        let name = path.display().to_string();
        inputs.extend(lines.into_iter().map(|line| (Some(name.clone()), line)));
    }

    if inputs.is_empty() {
        eprintln!("error: no selectors given: pass them as arguments or use -f/--file");
        std::process::exit(1);
    }

    let mut failures = 0usize;
    for (path, input) in &inputs {
        let mut builder = Selector::builder(&input.text);
        if let Some(limit) = args.recursion_limit {
            builder = builder.recursion_limit(limit);
        }
        let Err(err) = builder.compile() else {
            continue;
        };

        failures += 1;
        let mut printer = err
            .printer(&input.text)
            .line_start(input.line)
            .colored(args.color);
        if let Some(path) = path {
            printer = printer.path(path);
        }
        eprintln!("{}", printer.render());
    }

    if failures > 0 {
        eprintln!(
            "error: {failures} of {} selectors failed to compile",
            inputs.len()
        );
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
