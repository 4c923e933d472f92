//! Typed selector AST.
//!
//! A selector is a non-empty list of [`Stage`]s written left to right. Every
//! stage after the first carries the [`Connector`] that relates it to the
//! stage before it. Textual rendering lives in `render.rs`.

use serde::{Serialize, Serializer};

/// Literal on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "number",
            Literal::Bool(_) => "boolean",
            Literal::Null => "null",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Int(_) | Literal::Float(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOperator {
    Equal,
    NotEqual,
    StartsWith,
    Contains,
    EndsWith,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl CompareOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOperator::Equal => "=",
            CompareOperator::NotEqual => "!=",
            CompareOperator::StartsWith => "^=",
            CompareOperator::Contains => "*=",
            CompareOperator::EndsWith => "$=",
            CompareOperator::Greater => ">",
            CompareOperator::GreaterOrEqual => ">=",
            CompareOperator::Less => "<",
            CompareOperator::LessOrEqual => "<=",
        }
    }

    /// `^=`, `*=` and `$=` only make sense on text.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            CompareOperator::StartsWith | CompareOperator::Contains | CompareOperator::EndsWith
        )
    }

    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            CompareOperator::Greater
                | CompareOperator::GreaterOrEqual
                | CompareOperator::Less
                | CompareOperator::LessOrEqual
        )
    }

    /// Whether a literal of this kind may appear on the right of the operator.
    pub fn accepts(self, literal: &Literal) -> bool {
        if self.is_textual() {
            matches!(literal, Literal::Str(_))
        } else if self.is_ordering() {
            literal.is_numeric()
        } else {
            true
        }
    }
}

impl Serialize for CompareOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

/// `name op literal`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub name: String,
    pub operator: CompareOperator,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary(BinaryExpression),
    Logical {
        left: Box<Expression>,
        operator: LogicalOperator,
        right: Box<Expression>,
    },
    /// Explicit parentheses, kept so rendering reproduces them.
    Group(Box<Expression>),
}

impl Expression {
    /// Strips any number of enclosing parentheses.
    pub fn ungrouped(&self) -> &Expression {
        let mut expr = self;
        while let Expression::Group(inner) = expr {
            expr = inner;
        }
        expr
    }

    /// Every comparison in left-to-right order.
    pub fn binaries(&self) -> Vec<&BinaryExpression> {
        let mut out = Vec::new();
        self.collect_binaries(&mut out);
        out
    }

    fn collect_binaries<'a>(&'a self, out: &mut Vec<&'a BinaryExpression>) {
        match self {
            Expression::Binary(binary) => out.push(binary),
            Expression::Logical { left, right, .. } => {
                left.collect_binaries(out);
                right.collect_binaries(out);
            }
            Expression::Group(inner) => inner.collect_binaries(out),
        }
    }
}

/// Node test of a single stage: optional name plus bracketed filters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeSet {
    /// `None` for `*` or a stage written only with filters.
    pub name: Option<String>,
    pub expressions: Vec<Expression>,
    /// Marked with `@`.
    pub tracked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// `>`
    Child,
    /// `>>`, or plain whitespace between stages
    Descendant,
    /// `+`
    NextSibling,
    /// `~`
    AnySubsequentSibling,
    /// `<`
    ParentOf,
    /// `<<`
    AncestorOf,
}

/// What a quantifier position counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counting {
    /// Raw offset along the axis, matching or not.
    Position,
    /// Only candidates that pass the node test.
    Occurrence,
}

impl Combinator {
    pub fn symbol(self) -> &'static str {
        match self {
            Combinator::Child => ">",
            Combinator::Descendant => ">>",
            Combinator::NextSibling => "+",
            Combinator::AnySubsequentSibling => "~",
            Combinator::ParentOf => "<",
            Combinator::AncestorOf => "<<",
        }
    }

    /// Target of the `n` shorthand (`>n`, `<n`, `+n`).
    pub fn transitive(self) -> Combinator {
        match self {
            Combinator::Child => Combinator::Descendant,
            Combinator::ParentOf => Combinator::AncestorOf,
            Combinator::NextSibling => Combinator::AnySubsequentSibling,
            other => other,
        }
    }

    pub fn counting(self) -> Counting {
        match self {
            Combinator::Descendant | Combinator::AncestorOf => Counting::Occurrence,
            _ => Counting::Position,
        }
    }

    /// Without a quantifier, only the nearest candidate is considered.
    pub fn nearest_only(self) -> bool {
        matches!(self, Combinator::NextSibling | Combinator::ParentOf)
    }
}

/// 1-based position filter attached to a combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quantifier {
    /// `(1,2,9)` or a bare `3`.
    Indices(Vec<usize>),
    /// `(an+b)` for n = 0, 1, 2, ...; `step` is never zero.
    Progression { step: i64, offset: i64 },
}

impl Quantifier {
    pub fn contains(&self, position: usize) -> bool {
        match self {
            Quantifier::Indices(indices) => indices.contains(&position),
            Quantifier::Progression { step, offset } => {
                // Wide enough that no i64 offset or step can overflow.
                let (step, offset) = (i128::from(*step), i128::from(*offset));
                let Ok(position) = i128::try_from(position) else {
                    return false;
                };
                let delta = position - offset;
                delta % step == 0 && delta / step >= 0
            }
        }
    }

    /// Largest position that can ever be contained, if finite.
    pub fn upper_bound(&self) -> Option<usize> {
        match self {
            Quantifier::Indices(indices) => indices.iter().copied().max(),
            Quantifier::Progression { step, offset } if *step < 0 => {
                Some(usize::try_from(*offset).unwrap_or(0))
            }
            Quantifier::Progression { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub combinator: Combinator,
    pub quantifier: Option<Quantifier>,
}

impl Connector {
    pub fn new(combinator: Combinator) -> Self {
        Self {
            combinator,
            quantifier: None,
        }
    }

    pub fn with_quantifier(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = Some(quantifier);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// Relation to the previous stage; `None` only for the first stage.
    pub connector: Option<Connector>,
    pub attributes: AttributeSet,
}
