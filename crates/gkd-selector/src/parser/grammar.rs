//! Grammar productions.
//!
//! ```text
//! selector    = stage (connector stage)*
//! connector   = combinator quantifier? | <whitespace>
//! combinator  = ">" | ">>" | "+" | "~" | "<" | "<<"
//! quantifier  = "(" index ("," index)* ")" | "(" polynomial ")" | index | "n"
//! stage       = "@"? (name | "*")? filter*
//! filter      = "@"? "[" expression "]"
//! expression  = conjunction ("||" conjunction)*
//! conjunction = primary ("&&" primary)*
//! primary     = "(" expression ")" | name operator literal
//! ```
//!
//! Tokens inside a stage must touch; whitespace between two stages is the
//! descendant combinator.

use super::ast::{
    AttributeSet, BinaryExpression, Combinator, CompareOperator, Connector, Expression, Literal,
    LogicalOperator, Quantifier, Stage,
};
use super::core::Parser;
use super::escape::unescape;
use super::lexer::{Token, TokenKind};
use crate::diagnostics::{ParseError, Span};

/// Sum of `a·n` and constant terms written inside a quantifier.
#[derive(Debug, Default)]
struct Polynomial {
    step: i64,
    offset: i64,
    has_n: bool,
    terms: usize,
}

impl Parser<'_> {
    pub fn parse(mut self) -> Result<Vec<Stage>, ParseError> {
        if self.eof() {
            return Err(ParseError::EmptySelector {
                span: Span::new(0, self.source.len()),
            });
        }

        let mut stages = vec![self.parse_stage(None)?];
        while !self.eof() {
            let connector = self.parse_connector()?;
            stages.push(self.parse_stage(Some(connector))?);
        }
        Ok(stages)
    }

    fn parse_connector(&mut self) -> Result<Connector, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("combinator"));
        };

        let combinator = match token.kind {
            TokenKind::Gt => Combinator::Child,
            TokenKind::GtGt => Combinator::Descendant,
            TokenKind::Plus => Combinator::NextSibling,
            TokenKind::Tilde => Combinator::AnySubsequentSibling,
            TokenKind::Lt => Combinator::ParentOf,
            TokenKind::LtLt => Combinator::AncestorOf,
            kind if kind.starts_stage() => {
                if self.touches_previous() {
                    return Err(self.unexpected("whitespace or a combinator between stages"));
                }
                return Ok(Connector::new(Combinator::Descendant));
            }
            _ => return Err(self.unexpected("combinator")),
        };
        self.bump();

        let connector = self.parse_quantifier(combinator)?;
        if self.eof() {
            return Err(ParseError::DanglingCombinator {
                span: token.span,
                combinator: combinator.symbol(),
            });
        }
        Ok(connector)
    }

    fn parse_quantifier(&mut self, combinator: Combinator) -> Result<Connector, ParseError> {
        let Some(token) = self.peek() else {
            return Ok(Connector::new(combinator));
        };
        let touching = self.touches_previous();

        let connector = match token.kind {
            TokenKind::ParenOpen => {
                let quantifier = self.parse_quantifier_group()?;
                Connector::new(combinator).with_quantifier(quantifier)
            }
            TokenKind::Number if touching => {
                self.bump();
                let index = self.parse_index(&token)?;
                Connector::new(combinator).with_quantifier(Quantifier::Indices(vec![index]))
            }
            TokenKind::Id if touching && self.text(&token) == "n" => {
                self.bump();
                Connector::new(combinator.transitive())
            }
            _ => return Ok(Connector::new(combinator)),
        };

        // A stage may not touch its quantifier: `>2B`, `>2n+1 B`.
        if self.touches_previous() && self.current_kind().is_some_and(TokenKind::starts_stage) {
            return Err(self.unexpected("whitespace after the quantifier"));
        }
        Ok(connector)
    }

    fn parse_quantifier_group(&mut self) -> Result<Quantifier, ParseError> {
        let open = self.expect(TokenKind::ParenOpen, "`(`")?;
        let first_span = self.current_span();
        let first = self.parse_polynomial()?;

        let quantifier = if self.at(TokenKind::Comma) {
            if first.has_n || first.terms != 1 {
                return Err(ParseError::InvalidQuantifier {
                    span: first_span,
                    reason: "a position list only takes plain numbers",
                });
            }
            let mut indices = vec![checked_index(first.offset, first_span)?];
            while self.eat(TokenKind::Comma) {
                let token = self.expect(TokenKind::Number, "position")?;
                indices.push(self.parse_index(&token)?);
            }
            Quantifier::Indices(indices)
        } else {
            let span = open.span.cover(self.current_span());
            first.into_quantifier(span)?
        };

        self.expect(TokenKind::ParenClose, "`)` to close the quantifier")?;
        Ok(quantifier)
    }

    fn parse_polynomial(&mut self) -> Result<Polynomial, ParseError> {
        let mut poly = Polynomial::default();

        loop {
            let sign = match self.peek() {
                Some(t) if t.kind == TokenKind::Plus && poly.terms > 0 => {
                    self.bump();
                    1
                }
                Some(t) if t.kind == TokenKind::Minus => {
                    self.bump();
                    -1
                }
                Some(t)
                    if t.kind == TokenKind::Number
                        && (poly.terms == 0 || self.text(&t).starts_with('-')) =>
                {
                    1
                }
                Some(t) if t.kind == TokenKind::Id && poly.terms == 0 => 1,
                _ if poly.terms == 0 => return Err(self.unexpected("quantifier term")),
                _ => break,
            };
            self.parse_term(&mut poly, sign)?;
        }

        Ok(poly)
    }

    fn parse_term(&mut self, poly: &mut Polynomial, sign: i64) -> Result<(), ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("number or `n`"));
        };

        match token.kind {
            TokenKind::Number => {
                self.bump();
                let value = self
                    .parse_whole(&token)?
                    .checked_mul(sign)
                    .ok_or(ParseError::NumberOutOfRange { span: token.span })?;
                let slot = if self.at_variable() {
                    self.bump();
                    poly.has_n = true;
                    &mut poly.step
                } else {
                    &mut poly.offset
                };
                *slot = slot
                    .checked_add(value)
                    .ok_or(ParseError::NumberOutOfRange { span: token.span })?;
            }
            TokenKind::Id if self.text(&token) == "n" => {
                self.bump();
                poly.has_n = true;
                poly.step = poly
                    .step
                    .checked_add(sign)
                    .ok_or(ParseError::NumberOutOfRange { span: token.span })?;
            }
            _ => return Err(self.unexpected("number or `n`")),
        }

        poly.terms += 1;
        Ok(())
    }

    /// `n` glued to the coefficient just consumed, as in `2n`.
    fn at_variable(&self) -> bool {
        self.touches_previous()
            && self
                .peek()
                .is_some_and(|t| t.kind == TokenKind::Id && self.text(&t) == "n")
    }

    fn parse_whole(&self, token: &Token) -> Result<i64, ParseError> {
        let text = self.text(token);
        if text.contains('.') {
            return Err(ParseError::InvalidQuantifier {
                span: token.span,
                reason: "positions must be whole numbers",
            });
        }
        text.parse()
            .map_err(|_| ParseError::NumberOutOfRange { span: token.span })
    }

    fn parse_index(&self, token: &Token) -> Result<usize, ParseError> {
        checked_index(self.parse_whole(token)?, token.span)
    }

    fn parse_stage(&mut self, connector: Option<Connector>) -> Result<Stage, ParseError> {
        let mut attributes = AttributeSet::default();
        let mut parts = 0usize;
        let mut started = false;

        if self.eat(TokenKind::At) {
            attributes.tracked = true;
            started = true;
        }

        if let Some(token) = self.peek()
            && matches!(token.kind, TokenKind::Id | TokenKind::Star)
            && (!started || self.touches_previous())
        {
            self.bump();
            if token.kind == TokenKind::Id {
                attributes.name = Some(self.text(&token).to_string());
            }
            parts += 1;
            started = true;
        }

        while !started || self.touches_previous() {
            match self.current_kind() {
                Some(TokenKind::BracketOpen) => {
                    attributes.expressions.push(self.parse_filter()?);
                    parts += 1;
                }
                Some(TokenKind::At)
                    if self.nth(1).is_some_and(|t| t.kind == TokenKind::BracketOpen) =>
                {
                    self.bump();
                    attributes.tracked = true;
                }
                _ => break,
            }
            started = true;
        }

        if parts == 0 {
            return Err(self.unexpected("selector stage"));
        }

        Ok(Stage {
            connector,
            attributes,
        })
    }

    fn parse_filter(&mut self) -> Result<Expression, ParseError> {
        self.expect(TokenKind::BracketOpen, "`[`")?;
        let expr = self.parse_expression()?;
        self.expect(TokenKind::BracketClose, "`]` to close the filter")?;
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_conjunction()?;
        while self.eat(TokenKind::OrOr) {
            let right = self.parse_conjunction()?;
            left = Expression::Logical {
                left: Box::new(left),
                operator: LogicalOperator::Or,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_conjunction(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_primary()?;
        while self.eat(TokenKind::AndAnd) {
            let right = self.parse_primary()?;
            left = Expression::Logical {
                left: Box::new(left),
                operator: LogicalOperator::And,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        if !self.at(TokenKind::ParenOpen) {
            return self.parse_comparison().map(Expression::Binary);
        }

        self.enter_nesting()?;
        self.bump();
        let inner = self.parse_expression()?;
        self.expect(TokenKind::ParenClose, "`)`")?;
        self.exit_nesting();
        Ok(Expression::Group(Box::new(inner)))
    }

    fn parse_comparison(&mut self) -> Result<BinaryExpression, ParseError> {
        let name = self.expect(TokenKind::Id, "attribute name")?;

        let operator = match self.current_kind() {
            Some(TokenKind::Eq) => CompareOperator::Equal,
            Some(TokenKind::NotEq) => CompareOperator::NotEqual,
            Some(TokenKind::CaretEq) => CompareOperator::StartsWith,
            Some(TokenKind::StarEq) => CompareOperator::Contains,
            Some(TokenKind::DollarEq) => CompareOperator::EndsWith,
            Some(TokenKind::Gt) => CompareOperator::Greater,
            Some(TokenKind::GtEq) => CompareOperator::GreaterOrEqual,
            Some(TokenKind::Lt) => CompareOperator::Less,
            Some(TokenKind::LtEq) => CompareOperator::LessOrEqual,
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.bump();

        let (value, span) = self.parse_literal()?;
        if !operator.accepts(&value) {
            return Err(ParseError::IncompatibleLiteral {
                span,
                operator: operator.symbol(),
                literal: value.kind_name(),
            });
        }

        Ok(BinaryExpression {
            name: self.text(&name).to_string(),
            operator,
            value,
        })
    }

    fn parse_literal(&mut self) -> Result<(Literal, Span), ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("literal"));
        };
        let text = self.text(&token);

        let literal = match token.kind {
            TokenKind::Str => {
                let body = &text[1..text.len() - 1];
                Literal::Str(unescape(body).map_err(|_| self.unexpected("string literal"))?)
            }
            TokenKind::Number if text.contains('.') => Literal::Float(
                text.parse::<f64>()
                    .ok()
                    .filter(|x| x.is_finite())
                    .ok_or(ParseError::NumberOutOfRange { span: token.span })?,
            ),
            TokenKind::Number => Literal::Int(
                text.parse()
                    .map_err(|_| ParseError::NumberOutOfRange { span: token.span })?,
            ),
            TokenKind::Id => match text {
                "true" => Literal::Bool(true),
                "false" => Literal::Bool(false),
                "null" => Literal::Null,
                _ => return Err(self.unexpected("literal")),
            },
            _ => return Err(self.unexpected("literal")),
        };

        self.bump();
        Ok((literal, token.span))
    }
}

impl Polynomial {
    fn into_quantifier(self, span: Span) -> Result<Quantifier, ParseError> {
        if !self.has_n || self.step == 0 {
            return Ok(Quantifier::Indices(vec![checked_index(self.offset, span)?]));
        }
        if self.step < 0 && self.offset < 1 {
            return Err(ParseError::InvalidQuantifier {
                span,
                reason: "progression never reaches a position of 1 or more",
            });
        }
        Ok(Quantifier::Progression {
            step: self.step,
            offset: self.offset,
        })
    }
}

fn checked_index(value: i64, span: Span) -> Result<usize, ParseError> {
    usize::try_from(value)
        .ok()
        .filter(|index| *index >= 1)
        .ok_or(ParseError::InvalidQuantifier {
            span,
            reason: "positions start at 1",
        })
}
