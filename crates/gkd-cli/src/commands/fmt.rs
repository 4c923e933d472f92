//! Print a selector in canonical form.

use super::run_common::compile_selector;

pub struct FmtArgs {
    pub selector: String,
    pub recursion_limit: Option<u32>,
    pub color: bool,
}

pub fn run(args: FmtArgs) {
    let selector = compile_selector(&args.selector, args.recursion_limit, args.color);
    println!("{selector}");
}
