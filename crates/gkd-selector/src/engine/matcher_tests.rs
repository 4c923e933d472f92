use std::borrow::Cow;

use crate::Selector;
use crate::engine::FnAdapter;
use crate::test_utils::{TestTree, el, sample_tree};

fn all(tree: &TestTree, source: &str) -> String {
    let selector = Selector::compile(source).expect("selector should compile");
    tree.labels(selector.match_all(&TestTree::ROOT, tree))
}

fn tracks(tree: &TestTree, source: &str) -> Vec<String> {
    let selector = Selector::compile(source).expect("selector should compile");
    selector
        .match_all_tracks(&TestTree::ROOT, tree)
        .map(|track| tree.labels(track))
        .collect()
}

/// P → C1 .. C5, each with `index` 1..=5
fn five_children() -> TestTree {
    let mut parent = el("P");
    for (i, id) in ["c1", "c2", "c3", "c4", "c5"].into_iter().enumerate() {
        parent = parent.child(el("C").id(id).attr("index", i as i64 + 1));
    }
    TestTree::new(el("Root").child(parent))
}

#[test]
fn scan_matches_by_attribute() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "*[id='x1']"), @"A#x1");
    insta::assert_snapshot!(all(&tree, "[id^='x']"), @"A#x1 B#x2 C#x3");
}

#[test]
fn scan_includes_context() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "Root"), @"Root");
}

#[test]
fn child_combinator() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "Root > *"), @"A#x1 B#x2");
    insta::assert_snapshot!(all(&tree, "A > *"), @"");
}

#[test]
fn descendant_combinator() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "Root *[id='x3']"), @"C#x3");
    insta::assert_snapshot!(all(&tree, "Root >> *"), @"A#x1 B#x2 C#x3");
}

#[test]
fn next_sibling_takes_only_the_nearest() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "A + *"), @"B#x2");
    insta::assert_snapshot!(all(&tree, "B + *"), @"");

    let tree = five_children();
    insta::assert_snapshot!(all(&tree, "[id='c1'] + [id='c3']"), @"");
    insta::assert_snapshot!(all(&tree, "[id='c1'] +2 [id='c3']"), @"C#c3");
}

#[test]
fn any_subsequent_sibling() {
    let tree = five_children();
    insta::assert_snapshot!(all(&tree, "[id='c3'] ~ C"), @"C#c4 C#c5");
    insta::assert_snapshot!(all(&tree, "[id='c1'] ~(2,4) C"), @"C#c3 C#c5");
}

#[test]
fn parent_of_takes_only_the_nearest() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "C < *"), @"B#x2");
    insta::assert_snapshot!(all(&tree, "C < Root"), @"");
    insta::assert_snapshot!(all(&tree, "C <2 Root"), @"Root");
}

#[test]
fn ancestor_of_counts_matching_ancestors() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "C << *"), @"B#x2 Root");
    insta::assert_snapshot!(all(&tree, "C <<2 *"), @"Root");
    insta::assert_snapshot!(all(&tree, "C <<1 Root"), @"Root");
}

#[test]
fn child_quantifier_counts_raw_positions() {
    let tree = five_children();
    insta::assert_snapshot!(all(&tree, "P >(2,4) C"), @"C#c2 C#c4");
    insta::assert_snapshot!(all(&tree, "P >(2n+1) *"), @"C#c1 C#c3 C#c5");
    insta::assert_snapshot!(all(&tree, "P >(-n+2) *"), @"C#c1 C#c2");
}

#[test]
fn child_quantifier_counts_non_matching_children_too() {
    let tree = TestTree::new(
        el("P")
            .child(el("X").id("x1"))
            .child(el("Y"))
            .child(el("X").id("x2")),
    );
    insta::assert_snapshot!(all(&tree, "P >2 X"), @"");
    insta::assert_snapshot!(all(&tree, "P >3 X"), @"X#x2");
}

#[test]
fn descendant_quantifier_counts_matching_occurrences() {
    // Pre-order below P: X1, Y, X2, X3, X4. Matching X occurrences 1..4.
    let tree = TestTree::new(
        el("P")
            .child(el("X").id("1"))
            .child(el("Y"))
            .child(el("X").id("2").child(el("X").id("3")))
            .child(el("X").id("4")),
    );
    insta::assert_snapshot!(all(&tree, "P >>(2n+1) X"), @"X#1 X#3");
    insta::assert_snapshot!(all(&tree, "P >>2 X"), @"X#2");
}

#[test]
fn extreme_progression_offsets_match_without_overflow() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "Root >(n-9223372036854775808) *"), @"A#x1 B#x2");
    insta::assert_snapshot!(all(&tree, "Root >(-n+9223372036854775807) *"), @"A#x1 B#x2");
    insta::assert_snapshot!(all(&tree, "C <<(n-9223372036854775808) *"), @"B#x2 Root");
}

#[test]
fn n_shorthand_reaches_any_distance() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "Root >n C"), @"C#x3");
    insta::assert_snapshot!(all(&tree, "C <n Root"), @"Root");

    let tree = five_children();
    insta::assert_snapshot!(all(&tree, "[id='c1'] +n [id='c4']"), @"C#c4");
}

#[test]
fn track_index_reports_first_tracked_stage() {
    let tree = TestTree::new(
        el("Root")
            .child(el("Text").attr("text", "跳过 5s"))
            .child(el("Layout").child(el("Text").attr("text", "点击跳转详情"))),
    );
    let selector = Selector::compile("@Text[text^='跳过'] + Layout Text[text*='跳转']").unwrap();
    assert_eq!(selector.track_index(), 0);

    let first = selector.match_first(&TestTree::ROOT, &tree);
    assert_eq!(first, Some(1));

    let track = selector.match_tracks(&TestTree::ROOT, &tree).unwrap();
    assert_eq!(track, vec![1, 2, 3]);
}

#[test]
fn untracked_selector_reports_last_stage() {
    let tree = sample_tree();
    let selector = Selector::compile("Root > B > C").unwrap();
    assert_eq!(selector.track_index(), 2);
    assert_eq!(selector.match_first(&TestTree::ROOT, &tree), Some(tree.find("C#x3")));
}

#[test]
fn match_all_reports_each_node_once() {
    let tree = sample_tree();
    insta::assert_snapshot!(all(&tree, "* C"), @"C#x3");
    assert_eq!(tracks(&tree, "* C"), vec!["Root C#x3", "B#x2 C#x3"]);
}

#[test]
fn backtracks_across_stages() {
    // Only the second B has a C child; the first B must be abandoned.
    let tree = TestTree::new(
        el("Root")
            .child(el("B").id("b1").child(el("D")))
            .child(el("B").id("b2").child(el("C"))),
    );
    assert_eq!(tracks(&tree, "Root > B > C"), vec!["Root B#b2 C"]);
}

#[test]
fn anchored_selector_only_tries_the_context() {
    let tree = TestTree::new(
        el("Root")
            .attr("depth", 0)
            .child(el("Inner").attr("depth", 0).child(el("Leaf"))),
    );
    let anchored = Selector::compile("[depth=0] > Leaf").unwrap();
    assert!(anchored.is_anchored());
    assert_eq!(anchored.match_first(&TestTree::ROOT, &tree), None);

    let scanning = Selector::compile("[depth<=0] > Leaf").unwrap();
    assert!(!scanning.is_anchored());
    assert_eq!(scanning.match_first(&TestTree::ROOT, &tree), Some(2));
}

#[test]
fn context_limits_the_scan() {
    let tree = sample_tree();
    let selector = Selector::compile("[id^='x']").unwrap();
    let b = tree.find("B#x2");
    assert_eq!(tree.labels(selector.match_all(&b, &tree)), "B#x2 C#x3");
}

#[test]
fn matching_is_repeatable() {
    let tree = sample_tree();
    let selector = Selector::compile("Root >n *").unwrap();
    let first: Vec<usize> = selector.match_all(&TestTree::ROOT, &tree).collect();
    let second: Vec<usize> = selector.match_all(&TestTree::ROOT, &tree).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn results_are_lazy() {
    let tree = five_children();
    let selector = Selector::compile("C").unwrap();
    let mut matches = selector.match_all(&TestTree::ROOT, &tree);
    assert_eq!(matches.next().map(|n| tree.label(n)), Some("C#c1".to_string()));
    assert_eq!(matches.next().map(|n| tree.label(n)), Some("C#c2".to_string()));
}

#[test]
fn fn_adapter_drives_matching() {
    let tree = sample_tree();
    let adapter = FnAdapter::new(
        |node: &usize, name: &str| tree.value(*node, name),
        |node: &usize| Some(Cow::Borrowed(tree.name_of(*node))),
        |node: &usize| tree.children_of(*node),
        |node: &usize| tree.parent_of(*node),
    );

    let selector = Selector::compile("B > C").unwrap();
    let found = selector.match_first(&TestTree::ROOT, &adapter);
    assert_eq!(found, Some(tree.find("C#x3")));
}
