use crate::Selector;
use crate::parser::ast::CompareOperator;
use crate::quick_find::{QuickFindAttribute, QuickFindHint};

fn hint(source: &str) -> Option<QuickFindHint> {
    Selector::compile(source)
        .expect("selector should compile")
        .quick_find()
        .cloned()
}

#[test]
fn id_equality() {
    assert_eq!(
        hint("[id='com.app:id/skip'] > TextView"),
        Some(QuickFindHint {
            attribute: QuickFindAttribute::Id,
            operator: CompareOperator::Equal,
            value: "com.app:id/skip".to_string(),
        })
    );
}

#[test]
fn vid_equality() {
    let found = hint("Button[vid=\"close\"]").unwrap();
    assert_eq!(found.attribute, QuickFindAttribute::Vid);
    assert_eq!(found.attribute_name(), "vid");
    assert_eq!(found.value, "close");
}

#[test]
fn text_accepts_all_string_operators() {
    for (source, operator) in [
        ("[text='跳过']", CompareOperator::Equal),
        ("[text^='跳过']", CompareOperator::StartsWith),
        ("[text*='跳过']", CompareOperator::Contains),
        ("[text$='跳过']", CompareOperator::EndsWith),
    ] {
        let found = hint(source).unwrap_or_else(|| panic!("{source} should have a hint"));
        assert_eq!(found.attribute, QuickFindAttribute::Text);
        assert_eq!(found.operator, operator);
        assert_eq!(found.value, "跳过");
    }
}

#[test]
fn rejected_shapes() {
    for source in [
        // id only supports equality
        "[id^='com.app']",
        "[vid!='close']",
        // not a string literal
        "[id=1]",
        "[text=null]",
        // more than one test
        "[id='a'][text='b']",
        "[id='a'&&text='b']",
        "[(id='a')]",
        // not indexable
        "[desc='a']",
        "TextView",
    ] {
        assert_eq!(hint(source), None, "{source} should have no hint");
    }
}

#[test]
fn only_first_stage_counts() {
    assert_eq!(hint("A > [id='b']"), None);
}

#[test]
fn serializes_lowercase() {
    let found = hint("[text$='s']").unwrap();
    let json = serde_json::to_string(&found).unwrap();
    insta::assert_snapshot!(json, @r#"{"attribute":"text","operator":"$=","value":"s"}"#);
}
