pub mod export;
pub mod graph;

pub use export::{create_dot_graph, graph_from_adjacency};
pub use graph::{GraphEdge, GraphError, GraphKind, GraphModel, NodeShape};
