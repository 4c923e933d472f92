//! GKD selectors: a CSS-like query language for accessibility node trees.
//!
//! # Example
//!
//! ```
//! use gkd_selector::Selector;
//!
//! let selector = Selector::compile("@TextView[text^='跳过'] + LinearLayout").unwrap();
//! assert_eq!(selector.track_index(), 0);
//! assert_eq!(selector.to_string(), "@TextView[text^='跳过'] + LinearLayout");
//! ```
//!
//! Matching needs an [`Adapter`] describing the host tree; see
//! [`Selector::match_all`].

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod colors;
pub mod diagnostics;
pub mod engine;
pub mod parser;
pub mod quick_find;
mod selector;

#[cfg(test)]
mod quick_find_tests;
#[cfg(test)]
mod selector_tests;
#[cfg(test)]
mod test_utils;

pub use colors::Colors;
pub use diagnostics::{ErrorPrinter, LexError, ParseError, Span, SyntaxError};
pub use engine::{Adapter, FnAdapter, NoopTracer, PrintTracer, Tracer, Value, Verbosity};
pub use quick_find::{QuickFindAttribute, QuickFindHint};
pub use selector::{Selector, SelectorBuilder, check, compile};

/// Result type for selector compilation.
pub type Result<T> = std::result::Result<T, SyntaxError>;
