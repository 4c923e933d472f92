pub mod ast;
pub mod check;
pub mod exec;
pub mod fmt;
pub mod loader;
pub mod run_common;
pub mod trace;

#[cfg(test)]
mod loader_tests;
