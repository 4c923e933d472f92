//! Recognizes selectors whose first stage can be served by a host index.
//!
//! Accessibility frameworks can look nodes up by view id or by text much
//! faster than a full scan. When stage 0 is a single such comparison, the
//! host may fetch those nodes first and start matching from them.

use serde::Serialize;

use crate::parser::ast::{CompareOperator, Expression, Literal, Stage};

/// Attribute that hosts commonly index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickFindAttribute {
    Id,
    Vid,
    Text,
}

impl QuickFindAttribute {
    pub fn name(self) -> &'static str {
        match self {
            QuickFindAttribute::Id => "id",
            QuickFindAttribute::Vid => "vid",
            QuickFindAttribute::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickFindHint {
    pub attribute: QuickFindAttribute,
    pub operator: CompareOperator,
    pub value: String,
}

impl QuickFindHint {
    pub fn attribute_name(&self) -> &'static str {
        self.attribute.name()
    }
}

/// Hint for `stage`, if its only filter is an indexable comparison.
pub fn quick_find_hint(stage: &Stage) -> Option<QuickFindHint> {
    let [Expression::Binary(binary)] = stage.attributes.expressions.as_slice() else {
        return None;
    };
    let Literal::Str(value) = &binary.value else {
        return None;
    };

    let attribute = match (binary.name.as_str(), binary.operator) {
        ("id", CompareOperator::Equal) => QuickFindAttribute::Id,
        ("vid", CompareOperator::Equal) => QuickFindAttribute::Vid,
        (
            "text",
            CompareOperator::Equal
            | CompareOperator::StartsWith
            | CompareOperator::Contains
            | CompareOperator::EndsWith,
        ) => QuickFindAttribute::Text,
        _ => return None,
    };

    Some(QuickFindHint {
        attribute,
        operator: binary.operator,
        value: value.clone(),
    })
}
