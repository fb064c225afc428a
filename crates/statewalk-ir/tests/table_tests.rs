use std::collections::HashSet;
use std::path::PathBuf;

use statewalk_ir::parse::{detect_layout_file, load_table, parse_table};
use statewalk_ir::table::{parse_linear, parse_matrix};
use statewalk_ir::{Layout, Table, TableError, TransitionRecord};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn transition_set(name: &str) -> HashSet<TransitionRecord> {
    load_table(fixture(name))
        .unwrap()
        .transitions()
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn test_detect_linear_layouts() {
    for name in [
        "linear_loop.csv",
        "linear_fork.csv",
        "linear_fork_dos.csv",
        "linear_loopback_dos.csv",
    ] {
        assert_eq!(
            detect_layout_file(fixture(name)).unwrap(),
            Layout::Linear,
            "{name} should be linear"
        );
    }
}

#[test]
fn test_detect_matrix_layouts() {
    for name in [
        "matrix_loop.csv",
        "matrix_fork.csv",
        "matrix_loopback_dos.csv",
    ] {
        assert_eq!(
            detect_layout_file(fixture(name)).unwrap(),
            Layout::Matrix,
            "{name} should be matrix"
        );
    }
}

#[test]
fn test_detect_unknown_layout() {
    let err = detect_layout_file(fixture("unknown_layout.csv")).unwrap_err();
    match err {
        TableError::UnknownLayout { cell } => assert_eq!(cell, "State"),
        other => panic!("Expected UnknownLayout, got: {other:?}"),
    }
}

#[test]
fn test_detect_empty_file() {
    let err = detect_layout_file(fixture("empty.csv")).unwrap_err();
    assert!(matches!(err, TableError::EmptyInput), "got: {err:?}");
}

#[test]
fn test_detect_missing_file() {
    let err = detect_layout_file(fixture("madeupname_that_just_aint_real.csv")).unwrap_err();
    assert!(matches!(err, TableError::MissingSource { .. }), "got: {err:?}");
}

#[test]
fn test_whitespace_only_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.csv");
    std::fs::write(&path, "\r\n\r\n").unwrap();

    let err = detect_layout_file(&path).unwrap_err();
    assert!(matches!(err, TableError::EmptyInput), "got: {err:?}");
}

#[test]
fn test_header_only_is_insufficient() {
    for name in ["linear_header_only.csv", "matrix_header_only.csv"] {
        let err = load_table(fixture(name)).unwrap().transitions().unwrap_err();
        assert!(
            matches!(err, TableError::InsufficientData),
            "{name}: got {err:?}"
        );
    }
}

#[test]
fn test_parsers_reject_empty_grid() {
    let table = Table::default();
    assert!(matches!(parse_linear(&table), Err(TableError::EmptyInput)));
    assert!(matches!(parse_matrix(&table), Err(TableError::EmptyInput)));
}

#[test]
fn test_linear_transitions_in_row_order() {
    let transitions = load_table(fixture("linear_fork.csv"))
        .unwrap()
        .transitions()
        .unwrap();
    assert_eq!(
        transitions,
        vec![
            TransitionRecord::new("STATEA", "action1", "STATEB"),
            TransitionRecord::new("STATEB", "action2", "STATEC"),
            TransitionRecord::new("STATEC", "action3", "STATED"),
            TransitionRecord::new("STATEC", "action4", "STATEE"),
        ]
    );
}

#[test]
fn test_dos_and_unix_tables_agree() {
    assert_eq!(
        transition_set("linear_fork.csv"),
        transition_set("linear_fork_dos.csv")
    );
}

#[test]
fn test_matrix_and_linear_describe_same_transitions() {
    assert_eq!(
        transition_set("linear_loop.csv"),
        transition_set("matrix_loop.csv")
    );
    assert_eq!(
        transition_set("linear_fork.csv"),
        transition_set("matrix_fork.csv")
    );
    assert_eq!(
        transition_set("linear_loopback_dos.csv"),
        transition_set("matrix_loopback_dos.csv")
    );
}

#[test]
fn test_matrix_cell_with_several_actions() {
    let transitions = load_table(fixture("matrix_multi_action.csv"))
        .unwrap()
        .transitions()
        .unwrap();
    assert_eq!(
        transitions,
        vec![
            TransitionRecord::new("A", "go", "B"),
            TransitionRecord::new("A", "jump", "B"),
            TransitionRecord::new("A", "skip", "B"),
        ]
    );
}

#[test]
fn test_matrix_quoted_cell_is_trimmed() {
    let transitions = transition_set("matrix_login.csv");
    assert!(transitions.contains(&TransitionRecord::new("HOME", "click_log_in", "LOGGED")));
    assert_eq!(transitions.len(), 3);
}

#[test]
fn test_matrix_quoted_cell_spans_lines() {
    let table = parse_table("Start/End,A,B\nA,,\"go\njump\"\nB,back,\n").unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows()[1], vec!["A", "", "go\njump"]);

    let transitions = table.transitions().unwrap();
    assert_eq!(
        transitions,
        vec![
            TransitionRecord::new("A", "go", "B"),
            TransitionRecord::new("A", "jump", "B"),
            TransitionRecord::new("B", "back", "A"),
        ]
    );
}

#[test]
fn test_linear_quoted_cell_with_dos_break() {
    let table = parse_table("Start State,Action,End State\r\nA,\"go\r\n\",B\r\n").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.transitions().unwrap(),
        vec![TransitionRecord::new("A", "go", "B")]
    );
}

#[test]
fn test_unterminated_quote() {
    let err = parse_table("Start/End,A\nA,\"go\n").unwrap_err();
    assert!(
        matches!(err, TableError::UnterminatedQuote { row: 1 }),
        "got: {err:?}"
    );
}

#[test]
fn test_matrix_cell_beyond_header() {
    let table = Table::from_rows([vec!["Start/End", "B"], vec!["A", "go", "stray"]]);
    let err = table.transitions().unwrap_err();
    assert!(
        matches!(err, TableError::UnmatchedColumn { row: 1, column: 2 }),
        "got: {err:?}"
    );
}

#[test]
fn test_linear_short_row() {
    let table = Table::from_rows([
        vec!["Start State", "Action", "End State"],
        vec!["A", "go"],
    ]);
    let err = table.transitions().unwrap_err();
    assert!(
        matches!(err, TableError::ShortRow { row: 1, found: 2 }),
        "got: {err:?}"
    );
}

#[test]
fn test_linear_blank_action() {
    let table = Table::from_rows([
        vec!["Start State", "Action", "End State"],
        vec!["A", "  ", "B"],
    ]);
    let err = table.transitions().unwrap_err();
    assert!(
        matches!(err, TableError::BlankCell { row: 1, column: 1 }),
        "got: {err:?}"
    );
}

#[test]
fn test_transition_display() {
    let t = TransitionRecord::new("STATEA", "action1", "STATEB");
    assert_eq!(t.to_string(), "STATEA,action1 => STATEB");
}
