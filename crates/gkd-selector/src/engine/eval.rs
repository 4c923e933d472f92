//! Attribute predicate evaluation against a single node.
//!
//! A missing attribute fails every comparison, including `!=`. A live value
//! of the wrong type fails too, except that integers and floats compare
//! numerically with each other.

use std::cmp::Ordering;

use super::adapter::Adapter;
use super::value::Value;
use crate::parser::ast::{
    AttributeSet, BinaryExpression, CompareOperator, Expression, Literal, LogicalOperator,
};

pub fn evaluate<T, A>(expr: &Expression, node: &T, adapter: &A) -> bool
where
    A: Adapter<T> + ?Sized,
{
    match expr {
        Expression::Binary(binary) => evaluate_binary(binary, node, adapter),
        Expression::Logical {
            left,
            operator: LogicalOperator::And,
            right,
        } => evaluate(left, node, adapter) && evaluate(right, node, adapter),
        Expression::Logical {
            left,
            operator: LogicalOperator::Or,
            right,
        } => evaluate(left, node, adapter) || evaluate(right, node, adapter),
        Expression::Group(inner) => evaluate(inner, node, adapter),
    }
}

fn evaluate_binary<T, A>(binary: &BinaryExpression, node: &T, adapter: &A) -> bool
where
    A: Adapter<T> + ?Sized,
{
    let value = adapter.attribute(node, &binary.name);
    compare(value.as_ref(), binary.operator, &binary.value)
}

/// Node test for one stage: name, then every filter.
pub fn accepts<T, A>(attributes: &AttributeSet, node: &T, adapter: &A) -> bool
where
    A: Adapter<T> + ?Sized,
{
    if let Some(expected) = &attributes.name {
        match adapter.name(node) {
            Some(actual) if actual == expected.as_str() => {}
            _ => return false,
        }
    }

    attributes
        .expressions
        .iter()
        .all(|expr| evaluate(expr, node, adapter))
}

/// Applies `operator` to a live value (absent as `None`) and a literal.
pub fn compare(value: Option<&Value<'_>>, operator: CompareOperator, literal: &Literal) -> bool {
    let Some(value) = value else {
        return false;
    };

    match operator {
        CompareOperator::Equal => equals(value, literal),
        CompareOperator::NotEqual => match literal {
            Literal::Null => !value.is_null(),
            _ => same_kind(value, literal) && !equals(value, literal),
        },
        CompareOperator::StartsWith => text_test(value, literal, |v, l| v.starts_with(l)),
        CompareOperator::Contains => text_test(value, literal, |v, l| v.contains(l)),
        CompareOperator::EndsWith => text_test(value, literal, |v, l| v.ends_with(l)),
        CompareOperator::Greater => order(value, literal).is_some_and(Ordering::is_gt),
        CompareOperator::GreaterOrEqual => order(value, literal).is_some_and(Ordering::is_ge),
        CompareOperator::Less => order(value, literal).is_some_and(Ordering::is_lt),
        CompareOperator::LessOrEqual => order(value, literal).is_some_and(Ordering::is_le),
    }
}

fn equals(value: &Value<'_>, literal: &Literal) -> bool {
    match (value, literal) {
        (Value::Str(v), Literal::Str(l)) => v == l,
        (Value::Bool(v), Literal::Bool(l)) => v == l,
        (Value::Null, Literal::Null) => true,
        _ => order(value, literal) == Some(Ordering::Equal),
    }
}

fn same_kind(value: &Value<'_>, literal: &Literal) -> bool {
    match (value, literal) {
        (Value::Str(_), Literal::Str(_))
        | (Value::Bool(_), Literal::Bool(_))
        | (Value::Null, Literal::Null) => true,
        _ => value.as_f64().is_some() && literal.is_numeric(),
    }
}

fn text_test(value: &Value<'_>, literal: &Literal, test: impl Fn(&str, &str) -> bool) -> bool {
    match (value.as_str(), literal.as_str()) {
        (Some(v), Some(l)) => test(v, l),
        _ => false,
    }
}

/// Numeric ordering; integers compare exactly, mixed pairs through `f64`.
fn order(value: &Value<'_>, literal: &Literal) -> Option<Ordering> {
    match (value, literal) {
        (Value::Int(v), Literal::Int(l)) => Some(v.cmp(l)),
        (Value::Int(v), Literal::Float(l)) => (*v as f64).partial_cmp(l),
        (Value::Float(v), Literal::Int(l)) => v.partial_cmp(&(*l as f64)),
        (Value::Float(v), Literal::Float(l)) => v.partial_cmp(l),
        _ => None,
    }
}
