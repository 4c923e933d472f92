//! Selector parsing: lexer, grammar and the typed AST.
//!
//! # Architecture
//!
//! ```text
//! source → lexer → Vec<Token> → Parser → Vec<Stage>
//! ```
//!
//! Tokens are zero-copy spans; the parser slices source text only when it
//! needs a name or literal value. Parsing is fail-fast: the first error is
//! returned and nothing is recovered.

pub mod ast;
mod core;
mod escape;
mod grammar;
pub mod lexer;
pub(crate) mod render;


pub use ast::{
    AttributeSet, BinaryExpression, Combinator, CompareOperator, Connector, Counting, Expression,
    Literal, LogicalOperator, Quantifier, Stage,
};
pub use core::{DEFAULT_RECURSION_LIMIT, Parser};
pub use escape::{EscapeError, quote, unescape};
pub use lexer::{Token, TokenKind, lex, token_text};

use crate::diagnostics::SyntaxError;

/// Lexes and parses `source` with the default nesting limit.
pub fn parse(source: &str) -> Result<Vec<Stage>, SyntaxError> {
    parse_with_limit(source, DEFAULT_RECURSION_LIMIT)
}

pub fn parse_with_limit(source: &str, recursion_limit: u32) -> Result<Vec<Stage>, SyntaxError> {
    let tokens = lex(source)?;
    let stages = Parser::new(source, tokens)
        .with_recursion_limit(recursion_limit)
        .parse()?;
    Ok(stages)
}
