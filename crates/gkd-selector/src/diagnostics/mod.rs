//! Syntax errors reported while compiling a selector.
//!
//! Lexing and parsing stop at the first problem, so a selector produces at
//! most one [`SyntaxError`]. Every error carries a byte [`Span`] into the
//! source; [`SyntaxError::printer`] renders it as an annotated snippet.

mod printer;


use std::fmt;
use std::ops::Range;

pub use printer::ErrorPrinter;

/// Half-open byte range into selector source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    #[inline]
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Failure while splitting source into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character `{ch}`")]
    UnexpectedChar { position: usize, ch: char },

    #[error("unterminated string literal")]
    UnterminatedString { position: usize },

    #[error("invalid escape sequence `{sequence}`")]
    InvalidEscape { position: usize, sequence: String },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. } => *position,
        }
    }

    pub fn span(&self) -> Span {
        let start = self.position();
        let len = match self {
            LexError::UnexpectedChar { ch, .. } => ch.len_utf8(),
            LexError::UnterminatedString { .. } => 1,
            LexError::InvalidEscape { sequence, .. } => sequence.len().max(1),
        };
        Span::new(start, start + len)
    }
}

/// Failure while building the selector from tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Unexpected {
        span: Span,
        expected: &'static str,
        found: String,
    },

    #[error("selector is empty")]
    EmptySelector { span: Span },

    #[error("combinator `{combinator}` is not followed by a selector stage")]
    DanglingCombinator {
        span: Span,
        combinator: &'static str,
    },

    #[error("operator `{operator}` does not accept {literal} literals")]
    IncompatibleLiteral {
        span: Span,
        operator: &'static str,
        literal: &'static str,
    },

    #[error("invalid quantifier: {reason}")]
    InvalidQuantifier { span: Span, reason: &'static str },

    #[error("number literal is out of range")]
    NumberOutOfRange { span: Span },

    #[error("nesting exceeds the recursion limit of {limit}")]
    RecursionLimitExceeded { span: Span, limit: u32 },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Unexpected { span, .. }
            | ParseError::EmptySelector { span }
            | ParseError::DanglingCombinator { span, .. }
            | ParseError::IncompatibleLiteral { span, .. }
            | ParseError::InvalidQuantifier { span, .. }
            | ParseError::NumberOutOfRange { span }
            | ParseError::RecursionLimitExceeded { span, .. } => *span,
        }
    }

    pub fn position(&self) -> usize {
        self.span().start
    }
}

/// Any error produced while compiling selector source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// Byte offset where the problem starts.
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::Lex(err) => err.position(),
            SyntaxError::Parse(err) => err.position(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(err) => err.span(),
            SyntaxError::Parse(err) => err.span(),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn printer<'e, 's>(&'e self, source: &'s str) -> ErrorPrinter<'e, 's> {
        ErrorPrinter::new(self).source(source)
    }
}
