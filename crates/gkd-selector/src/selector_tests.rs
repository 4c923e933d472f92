use crate::test_utils::{TestTree, sample_tree};
use crate::{Selector, SyntaxError, check, compile};

#[test]
fn dump_lists_metadata() {
    let selector = Selector::compile("[id='skip'] + @TextView[text^='跳过']").unwrap();
    insta::assert_snapshot!(selector.dump(), @r"
    Stage 0
      Any
      Filter id='skip'
    Stage 1 NextSibling
      Name TextView
      Tracked
      Filter text^='跳过'
    TrackIndex 1
    QuickFind id = 'skip'
    ");
}

#[test]
fn dump_marks_anchored_selectors() {
    let selector = Selector::compile("[depth=0] > *").unwrap();
    insta::assert_snapshot!(selector.dump(), @r"
    Stage 0
      Any
      Filter depth=0
    Stage 1 Child
      Any
    TrackIndex 1
    Anchored
    ");
}

#[test]
fn anchoring_needs_depth_zero_first() {
    assert!(Selector::compile("[depth=0][text='a']").unwrap().is_anchored());
    assert!(!Selector::compile("[text='a'][depth=0]").unwrap().is_anchored());
    assert!(!Selector::compile("[depth=0||text='a']").unwrap().is_anchored());
    assert!(!Selector::compile("[depth=1]").unwrap().is_anchored());
    assert!(!Selector::compile("A > [depth=0]").unwrap().is_anchored());
}

#[test]
fn tracked_stages_in_order() {
    let selector = Selector::compile("A > @B > @C").unwrap();
    assert_eq!(selector.tracked_stages(), &[1, 2]);
    assert_eq!(selector.track_index(), 1);

    let untracked = Selector::compile("A > B > C").unwrap();
    assert!(untracked.tracked_stages().is_empty());
    assert_eq!(untracked.track_index(), 2);
}

#[test]
fn display_renders_canonical_source() {
    let selector = Selector::compile("A    B >> C[a=\"x\"]").unwrap();
    insta::assert_snapshot!(selector.to_string(), @"A B C[a='x']");
    let again = Selector::compile(&selector.to_string()).unwrap();
    assert_eq!(again, selector);
}

#[test]
fn parses_through_std_traits() {
    let parsed: Selector = "A > B".parse().unwrap();
    let converted = Selector::try_from("A > B").unwrap();
    assert_eq!(parsed, converted);
    assert_eq!(parsed, compile("A > B").unwrap());
}

#[test]
fn empty_source_is_rejected() {
    let err = "".parse::<Selector>().unwrap_err();
    assert!(matches!(err, SyntaxError::Parse(_)));
    insta::assert_snapshot!(err.to_string(), @"selector is empty");
}

#[test]
fn check_reports_validity() {
    assert!(check("A > B"));
    assert!(Selector::check("@[text^='x']"));
    assert!(!check("A >"));
    assert!(!check("[text^=1]"));
    assert!(!check("[text='open"));
}

#[test]
fn builder_applies_recursion_limit() {
    let source = "[((a=1))]";
    assert!(Selector::builder(source).compile().is_ok());

    let err = Selector::builder(source)
        .recursion_limit(1)
        .compile()
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"nesting exceeds the recursion limit of 1");
}

#[test]
fn selector_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Selector>();

    let selector = Selector::compile("B > C").unwrap();
    let tree = sample_tree();
    let found = std::thread::scope(|scope| {
        let handle = scope.spawn(|| selector.match_first(&TestTree::ROOT, &tree));
        handle.join().unwrap()
    });
    assert_eq!(found, Some(tree.find("C#x3")));
}
