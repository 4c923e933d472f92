use std::io::Write;
use std::path::Path;

use gkd_snapshot::NodeId;

use super::exec::collect;
use super::loader::{
    LoadError, SelectorLine, load_selector_file, load_snapshot, parse_selector_lines,
};

const SNAPSHOT: &str = r#"{"nodes": [
    {"id": 0, "pid": -1, "attr": {"name": "FrameLayout"}},
    {"id": 1, "pid": 0, "attr": {"name": "TextView", "text": "跳过"}},
    {"id": 2, "pid": 0, "attr": {"name": "LinearLayout"}},
    {"id": 3, "pid": 2, "attr": {"name": "TextView", "text": "详情"}}
]}"#;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn selector_lines_skip_blanks_and_comments() {
    let lines = parse_selector_lines("# skip buttons\n\n  [text^='跳过']  \nA > B\n");
    assert_eq!(
        lines,
        vec![
            SelectorLine {
                line: 3,
                text: "[text^='跳过']".to_string(),
            },
            SelectorLine {
                line: 4,
                text: "A > B".to_string(),
            },
        ]
    );
}

#[test]
fn loads_selector_file() {
    let file = write_temp("A\n\nB + C\n");
    let lines = load_selector_file(file.path()).unwrap();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["A", "B + C"]);
    assert_eq!(lines[1].line, 3);
}

#[test]
fn missing_file_reports_path() {
    let err = load_selector_file(Path::new("/nonexistent/rules.txt")).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(
        err.to_string()
            .starts_with("failed to read '/nonexistent/rules.txt': "),
        "{err}"
    );
}

#[test]
fn loads_snapshot_file() {
    let file = write_temp(SNAPSHOT);
    let snapshot = load_snapshot(file.path()).unwrap();
    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot.label(NodeId::new(3)), "TextView#3");
}

#[test]
fn invalid_snapshot_reports_cause() {
    let file = write_temp(r#"{"nodes": []}"#);
    let err = load_snapshot(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Snapshot { .. }));
    assert!(err.to_string().ends_with(": snapshot has no nodes"), "{err}");
}

#[test]
fn exec_output_shapes() {
    let file = write_temp(SNAPSHOT);
    let snapshot = load_snapshot(file.path()).unwrap();
    let selector = gkd_selector::compile("FrameLayout > TextView").unwrap();

    let all = collect(&selector, &snapshot, false, false);
    insta::assert_snapshot!(all.to_string(), @r#"[{"attr":{"name":"TextView","text":"跳过"},"id":1}]"#);

    let none = collect(&gkd_selector::compile("Button").unwrap(), &snapshot, true, false);
    insta::assert_snapshot!(none.to_string(), @"null");

    let tracks = collect(&gkd_selector::compile("LinearLayout > TextView").unwrap(), &snapshot, true, true);
    insta::assert_snapshot!(tracks.to_string(), @r#"[{"attr":{"name":"LinearLayout"},"id":2},{"attr":{"name":"TextView","text":"详情"},"id":3}]"#);
}
