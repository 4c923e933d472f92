//! Parser state and low-level token operations.

use super::lexer::{Token, TokenKind, token_text};
use crate::diagnostics::{ParseError, Span};

/// Default cap on parenthesis nesting inside filters.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) depth: u32,
    recursion_limit: u32,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn peek(&self) -> Option<Token> {
        self.nth(0)
    }

    pub(super) fn nth(&self, lookahead: usize) -> Option<Token> {
        self.tokens.get(self.pos + lookahead).copied()
    }

    pub(super) fn current_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Span of the current token, or an empty span at the end of input.
    pub(super) fn current_span(&self) -> Span {
        self.peek()
            .map_or_else(|| Span::empty(self.source.len()), |t| t.span)
    }

    pub(super) fn previous(&self) -> Option<Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)).copied()
    }

    /// True when the current token directly follows the previous one.
    pub(super) fn touches_previous(&self) -> bool {
        match (self.previous(), self.peek()) {
            (Some(prev), Some(current)) => prev.touches(&current),
            _ => false,
        }
    }

    pub(super) fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    pub(super) fn bump(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    pub(super) fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    pub(super) fn unexpected(&self, expected: &'static str) -> ParseError {
        let found = match self.peek() {
            Some(token) => format!("`{}`", self.text(&token)),
            None => "end of input".to_string(),
        };
        ParseError::Unexpected {
            span: self.current_span(),
            expected,
            found,
        }
    }

    pub(super) fn enter_nesting(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.recursion_limit {
            return Err(ParseError::RecursionLimitExceeded {
                span: self.current_span(),
                limit: self.recursion_limit,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
