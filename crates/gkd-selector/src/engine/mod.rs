//! Matching engine: runs compiled stages against a host tree.
//!
//! The host tree is reached only through [`Adapter`]. Matching is lazy and
//! depth-first; see [`matcher`] for the frame stack that drives it.

mod adapter;
mod eval;
mod matcher;
mod trace;
mod value;
mod walk;

#[cfg(test)]
mod matcher_tests;
#[cfg(test)]
mod trace_tests;

pub use adapter::{Adapter, FnAdapter};
pub use eval::{accepts, compare, evaluate};
pub use matcher::{Matches, Origin, Tracks};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use value::Value;

pub(crate) use matcher::Walker;
