//! Lexer for selector source.
//!
//! Produces span-based tokens without storing text; text is sliced from source
//! only when needed. Whitespace is lexed as a real token and then dropped, since
//! the parser only cares whether two tokens touch (see [`Token::touches`]).
//!
//! Lexing is strict: the first unrecognized character or malformed string
//! literal aborts with a [`LexError`].

use logos::Logos;

use super::escape;
use crate::diagnostics::{LexError, Span};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(",")]
    Comma,

    #[token("@")]
    At,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("~")]
    Tilde,

    #[token(">")]
    Gt,

    #[token(">>")]
    GtGt,

    #[token(">=")]
    GtEq,

    #[token("<")]
    Lt,

    #[token("<<")]
    LtLt,

    #[token("<=")]
    LtEq,

    #[token("=")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("^=")]
    CaretEq,

    #[token("$=")]
    DollarEq,

    #[token("*=")]
    StarEq,

    #[token("&&")]
    AndAnd,

    #[token("||")]
    OrOr,

    /// Integer or fixed-point number, optionally negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Node names, attribute names, `n` and the `true`/`false`/`null` keywords.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*")]
    Id,

    /// Quoted with `"`, `'` or a backtick; escapes are validated after lexing.
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    #[regex(r"`([^`\\]|\\.)*`")]
    Str,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
}

impl TokenKind {
    /// Tokens that may open a selector stage.
    pub fn starts_stage(self) -> bool {
        matches!(
            self,
            TokenKind::Id | TokenKind::Star | TokenKind::At | TokenKind::BracketOpen
        )
    }

    /// Human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::BracketOpen => "`[`",
            TokenKind::BracketClose => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::At => "`@`",
            TokenKind::Star => "`*`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Tilde => "`~`",
            TokenKind::Gt => "`>`",
            TokenKind::GtGt => "`>>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtLt => "`<<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Eq => "`=`",
            TokenKind::NotEq => "`!=`",
            TokenKind::CaretEq => "`^=`",
            TokenKind::DollarEq => "`$=`",
            TokenKind::StarEq => "`*=`",
            TokenKind::AndAnd => "`&&`",
            TokenKind::OrOr => "`||`",
            TokenKind::Number => "number",
            TokenKind::Id => "identifier",
            TokenKind::Str => "string literal",
            TokenKind::Whitespace => "whitespace",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// True when `next` starts exactly where this token ends.
    #[inline]
    pub fn touches(&self, next: &Token) -> bool {
        self.span.end == next.span.start
    }
}

/// Tokenizes source into span-based tokens, whitespace removed.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => return Err(unexpected_at(source, range.start)),
        };

        match kind {
            TokenKind::Whitespace => continue,
            TokenKind::Str => {
                let body = &source[range.start + 1..range.end - 1];
                if let Err(err) = escape::unescape(body) {
                    return Err(LexError::InvalidEscape {
                        position: range.start + 1 + err.offset,
                        sequence: err.sequence,
                    });
                }
            }
            _ => {}
        }

        tokens.push(Token::new(kind, range.into()));
    }

    Ok(tokens)
}

fn unexpected_at(source: &str, position: usize) -> LexError {
    match source[position..].chars().next() {
        Some('"' | '\'' | '`') => LexError::UnterminatedString { position },
        Some(ch) => LexError::UnexpectedChar { position, ch },
        None => LexError::UnterminatedString { position },
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span.range()]
}
