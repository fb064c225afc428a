use std::path::PathBuf;

use statewalk_graph::{create_dot_graph, GraphError, GraphKind, GraphModel, NodeShape};
use statewalk_model::{ModelBuilder, StateMachine};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../statewalk-ir/tests/fixtures")
        .join(name)
}

/// STATEA -action1-> STATEB -action2 (guarded)-> STATEC, which forks to D and E.
fn guarded_fork_model() -> StateMachine<bool> {
    let mut builder = ModelBuilder::<bool>::new();
    builder
        .define_action_with("action1", |done: &mut bool| *done = true)
        .define_action("action2")
        .define_action("action3")
        .define_action("action4");
    builder.define_guard("action2", |done: &bool| *done).unwrap();
    builder.attach_transition("STATEA", "action1", "STATEB").unwrap();
    builder.attach_transition("STATEB", "action2", "STATEC").unwrap();
    builder.attach_transition("STATEC", "action3", "STATED").unwrap();
    builder.attach_transition("STATEC", "action4", "STATEE").unwrap();
    builder.build()
}

#[test]
fn test_render_simple_graph() {
    let mut graph = GraphModel::new();
    graph.set_name("test_graph");
    graph.set_kind(GraphKind::Digraph);
    graph.set_node_shape(NodeShape::Ellipse);
    graph.add_edge("TEST1", "TEST2", "take_me_to_test_2", false);

    let text = graph.render().unwrap();
    assert_eq!(
        text,
        "digraph test_graph {\n  node [shape = ellipse];\n  TEST1 -> TEST2 [ label = \"take_me_to_test_2\" ];\n}\n"
    );
}

#[test]
fn test_render_requires_name_and_kind() {
    let mut graph = GraphModel::new();
    graph.set_name("test_graph");
    graph.add_edge("TEST1", "TEST2", "take_me_to_test_2", false);

    match graph.render().unwrap_err() {
        GraphError::IncompleteGraph { missing } => assert_eq!(missing, "type"),
        other => panic!("Expected IncompleteGraph, got: {other:?}"),
    }

    let graph = GraphModel::new();
    match graph.render().unwrap_err() {
        GraphError::IncompleteGraph { missing } => assert_eq!(missing, "name, type"),
        other => panic!("Expected IncompleteGraph, got: {other:?}"),
    }
}

#[test]
fn test_edge_fields_arity() {
    let mut graph = GraphModel::new();
    graph.add_edge_fields(&["A", "B", "go"]).unwrap();
    graph.add_edge_fields(&["B", "C", "stop", "true"]).unwrap();
    assert_eq!(graph.edges().len(), 2);
    assert!(graph.edges()[1].guarded);

    let err = graph.add_edge_fields(&["A", "B"]).unwrap_err();
    assert!(matches!(err, GraphError::EdgeArity { count: 2 }));
    let err = graph
        .add_edge_fields(&["A", "B", "go", "true", "extra"])
        .unwrap_err();
    assert!(matches!(err, GraphError::EdgeArity { count: 5 }));
    let err = graph.add_edge_fields(&["A", "B", "go", "maybe"]).unwrap_err();
    assert!(matches!(err, GraphError::InvalidGuardFlag { .. }));
}

#[test]
fn test_backslash_in_label_keeps_string_closed() {
    let mut graph = GraphModel::new();
    graph.set_name("g");
    graph.set_kind(GraphKind::Digraph);
    graph.add_edge("A", "B", r"go\", false);

    let text = graph.render().unwrap();
    assert!(text.contains(r#"  A -> B [ label = "go\\" ];"#), "{text}");
}

#[test]
fn test_undirected_graph_uses_plain_edges() {
    let mut graph = GraphModel::new();
    graph.set_name("g");
    graph.set_kind(GraphKind::Graph);
    graph.set_node_shape(NodeShape::Box);
    graph.add_edge("A", "B", "ab", false);

    let text = graph.render().unwrap();
    assert!(text.starts_with("graph g {\n  node [shape = box];\n"));
    assert!(text.contains("  A -- B [ label = \"ab\" ];\n"));
}

#[test]
fn test_model_graph_marks_guards() {
    let graph = create_dot_graph(&guarded_fork_model());
    let text = graph.render().unwrap();

    assert!(text.starts_with("digraph State_Model {\n  node [shape = ellipse];\n"));
    assert_eq!(text.matches("Guard/").count(), 1);
    assert!(text.contains("  STATEB -> STATEC [ label = \"Guard/action2\" ];\n"));
    assert!(text.contains("  STATEA -> STATEB [ label = \"action1\" ];\n"));
    assert_eq!(graph.edges().len(), 4);
}

#[test]
fn test_table_graphs_have_one_edge_per_transition() {
    for (name, transitions) in [
        ("linear_loop.csv", 2),
        ("linear_fork.csv", 4),
        ("matrix_loopback_dos.csv", 8),
    ] {
        let sm: StateMachine = ModelBuilder::load_table(fixture(name)).unwrap();
        let graph = create_dot_graph(&sm);
        assert_eq!(graph.edges().len(), transitions, "{name}");
        assert!(!graph.render().unwrap().contains("Guard/"), "{name}");
    }
}

#[test]
fn test_output_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.dot");

    let graph = create_dot_graph(&guarded_fork_model());
    graph.output(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, graph.render().unwrap());
}

#[test]
fn test_output_incomplete_graph_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.dot");

    let err = GraphModel::new().output(&path).unwrap_err();
    assert!(matches!(err, GraphError::IncompleteGraph { .. }));
    assert!(!path.exists());
}
