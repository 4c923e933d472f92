//! Canonical textual form of the AST.
//!
//! Output re-parses to an equal AST: strings are single-quoted and escaped,
//! combinators use their symbolic form and a lone index is written bare
//! (`>3`). Whitespace is normalized to one space around combinators.

use std::fmt;

use super::ast::{
    AttributeSet, BinaryExpression, Combinator, CompareOperator, Connector, Expression, Literal,
    LogicalOperator, Quantifier, Stage,
};
use super::escape::quote;

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => f.write_str(&quote(s)),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write_float(f, *x),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
        }
    }
}

/// Positional notation with a fractional part, the only float form the lexer
/// reads back (`0.0000001`, never `1e-7`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let text = x.to_string();
    if text.contains('.') {
        f.write_str(&text)
    } else {
        write!(f, "{text}.0")
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, self.operator, self.value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Binary(binary) => write!(f, "{binary}"),
            Expression::Group(inner) => write!(f, "({inner})"),
            Expression::Logical {
                left,
                operator,
                right,
            } => {
                write_operand(f, left, *operator)?;
                f.write_str(operator.symbol())?;
                write_operand(f, right, *operator)
            }
        }
    }
}

// `&&` binds tighter than `||`, so an ungrouped `||` under `&&` needs parens.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    operand: &Expression,
    parent: LogicalOperator,
) -> fmt::Result {
    match operand {
        Expression::Logical {
            operator: LogicalOperator::Or,
            ..
        } if parent == LogicalOperator::And => write!(f, "({operand})"),
        _ => write!(f, "{operand}"),
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tracked {
            f.write_str("@")?;
        }
        match &self.name {
            Some(name) => f.write_str(name)?,
            None if self.expressions.is_empty() => f.write_str("*")?,
            None => {}
        }
        for expr in &self.expressions {
            write!(f, "[{expr}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Indices(indices) => match indices.as_slice() {
                [single] => write!(f, "{single}"),
                _ => {
                    f.write_str("(")?;
                    for (i, index) in indices.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{index}")?;
                    }
                    f.write_str(")")
                }
            },
            Quantifier::Progression { step, offset } => {
                f.write_str("(")?;
                match step {
                    1 => f.write_str("n")?,
                    -1 => f.write_str("-n")?,
                    _ => write!(f, "{step}n")?,
                }
                match offset {
                    0 => {}
                    o if *o > 0 => write!(f, "+{o}")?,
                    o => write!(f, "{o}")?,
                }
                f.write_str(")")
            }
        }
    }
}

/// Renders with the surrounding spaces, ready to sit between two stages.
impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quantifier {
            None if self.combinator == Combinator::Descendant => f.write_str(" "),
            None => write!(f, " {} ", self.combinator.symbol()),
            Some(quantifier) => write!(f, " {}{} ", self.combinator.symbol(), quantifier),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(connector) = &self.connector {
            write!(f, "{connector}")?;
        }
        write!(f, "{}", self.attributes)
    }
}

/// Indented, one-fact-per-line view of parsed stages.
pub fn dump(stages: &[Stage]) -> String {
    let mut out = String::new();
    for (i, stage) in stages.iter().enumerate() {
        write_stage(&mut out, i, stage).expect("String write never fails");
    }
    out
}

fn write_stage(out: &mut String, index: usize, stage: &Stage) -> fmt::Result {
    use std::fmt::Write;

    write!(out, "Stage {index}")?;
    if let Some(connector) = &stage.connector {
        write!(out, " {:?}", connector.combinator)?;
        if let Some(quantifier) = &connector.quantifier {
            write!(out, " {quantifier}")?;
        }
    }
    writeln!(out)?;

    let attributes = &stage.attributes;
    match &attributes.name {
        Some(name) => writeln!(out, "  Name {name}")?,
        None => writeln!(out, "  Any")?,
    }
    if attributes.tracked {
        writeln!(out, "  Tracked")?;
    }
    for expr in &attributes.expressions {
        writeln!(out, "  Filter {expr}")?;
    }
    Ok(())
}
