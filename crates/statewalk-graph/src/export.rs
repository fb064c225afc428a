use statewalk_ir::ActionName;
use statewalk_model::{AdjacencyModel, StateMachine};

use crate::graph::{GraphKind, GraphModel, NodeShape};

pub const DEFAULT_GRAPH_NAME: &str = "State_Model";

/// One edge per transition, labelled with its action. Guarded actions are
/// flagged so the renderer can mark them.
pub fn graph_from_adjacency(adjacency: &AdjacencyModel, guarded: &[ActionName]) -> GraphModel {
    let mut graph = GraphModel::new();
    graph.set_name(DEFAULT_GRAPH_NAME);
    graph.set_kind(GraphKind::Digraph);
    graph.set_node_shape(NodeShape::Ellipse);

    for (_, edges) in adjacency.iter() {
        for transition in edges {
            let is_guarded = guarded.iter().any(|a| a == transition.action());
            graph.add_edge(
                transition.start(),
                transition.end(),
                transition.action(),
                is_guarded,
            );
        }
    }
    graph
}

/// Graph of a runnable model, with its guards marked.
pub fn create_dot_graph<C>(machine: &StateMachine<C>) -> GraphModel {
    graph_from_adjacency(machine.adjacency(), machine.guarded_actions())
}
