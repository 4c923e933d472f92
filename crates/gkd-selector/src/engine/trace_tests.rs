use crate::Colors;
use crate::Selector;
use crate::engine::{PrintTracer, Verbosity};
use crate::test_utils::{TestTree, sample_tree};

fn trace(source: &str, verbosity: Verbosity, colors: Colors) -> Vec<String> {
    let tree = sample_tree();
    let selector = Selector::compile(source).expect("selector should compile");
    let mut tracer = PrintTracer::new(|node: &usize| tree.label(*node), verbosity, colors);
    let _: Vec<usize> = selector
        .match_all_traced(&TestTree::ROOT, &tree, &mut tracer)
        .collect();
    tracer.into_lines()
}

#[test]
fn default_shows_accepts_and_matches() {
    let lines = trace("B > C", Verbosity::Default, Colors::OFF);
    assert_eq!(lines, vec!["   0 ✓ B#x2", "   1 ✓ C#x3", "  ● B#x2 → C#x3"]);
}

#[test]
fn verbose_adds_rejects_and_backtracking() {
    let lines = trace("B > C", Verbosity::Verbose, Colors::OFF);
    assert_eq!(
        lines,
        vec![
            "   0 ✗ Root",
            "   0 ✗ A#x1",
            "   0 ✓ B#x2",
            "   1 ✓ C#x3",
            "  ● B#x2 → C#x3",
            "   1 ↩",
            "   0 ✗ C#x3",
            "   0 ↩",
        ]
    );
}

#[test]
fn very_verbose_adds_visits() {
    let lines = trace("B > C", Verbosity::VeryVerbose, Colors::OFF);
    assert_eq!(
        lines,
        vec![
            "   0 · Root",
            "   0 ✗ Root",
            "   0 · A#x1",
            "   0 ✗ A#x1",
            "   0 · B#x2",
            "   0 ✓ B#x2",
            "   1 · C#x3",
            "   1 ✓ C#x3",
            "  ● B#x2 → C#x3",
            "   1 ↩",
            "   0 · C#x3",
            "   0 ✗ C#x3",
            "   0 ↩",
        ]
    );
}

#[test]
fn colored_lines_carry_escape_codes() {
    let lines = trace("C", Verbosity::Default, Colors::ON);
    assert_eq!(
        lines,
        vec![
            "   0 \x1b[32m✓\x1b[0m C#x3",
            "  \x1b[32m●\x1b[0m C#x3",
        ]
    );
}

#[test]
fn tracer_stays_with_caller() {
    let tree = sample_tree();
    let selector = Selector::compile("A").unwrap();
    let mut tracer = PrintTracer::new(|node: &usize| tree.label(*node), Verbosity::Default, Colors::OFF);

    let first = selector
        .match_all_traced(&TestTree::ROOT, &tree, &mut tracer)
        .next();
    assert_eq!(first, Some(tree.find("A#x1")));

    let found = tracer.lines().len();
    let _ = selector
        .match_all_traced(&TestTree::ROOT, &tree, &mut tracer)
        .count();
    assert!(tracer.lines().len() > found);
}
