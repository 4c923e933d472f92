//! Show the parsed stages of a selector.

use super::run_common::compile_selector;

pub struct AstArgs {
    pub selector: String,
    pub recursion_limit: Option<u32>,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let selector = compile_selector(&args.selector, args.recursion_limit, args.color);
    print!("{}", selector.dump());
}
