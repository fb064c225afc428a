//! Graph value rendered to the DOT language.
//!
//! A thin mirror of the edges it is given: nodes are implicit, parallel
//! edges are kept, and node names are written as-is.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Graph is incomplete, missing: {missing}")]
    IncompleteGraph { missing: String },

    #[error("Edge needs from, to, label and an optional guard flag; got {count} fields")]
    EdgeArity { count: usize },

    #[error("Invalid guard flag '{value}', expected true or false")]
    InvalidGuardFlag { value: String },

    #[error("Failed to write graph to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Digraph,
    Graph,
}

impl GraphKind {
    fn edge_op(self) -> &'static str {
        match self {
            GraphKind::Digraph => "->",
            GraphKind::Graph => "--",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Digraph => f.write_str("digraph"),
            GraphKind::Graph => f.write_str("graph"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeShape {
    #[default]
    Ellipse,
    Box,
    Circle,
    DoubleCircle,
    Plaintext,
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeShape::Ellipse => "ellipse",
            NodeShape::Box => "box",
            NodeShape::Circle => "circle",
            NodeShape::DoubleCircle => "doublecircle",
            NodeShape::Plaintext => "plaintext",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub guarded: bool,
}

impl GraphEdge {
    /// Label as drawn: guarded edges are prefixed with `Guard/`.
    pub fn display_label(&self) -> String {
        if self.guarded {
            format!("Guard/{}", self.label)
        } else {
            self.label.clone()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    name: Option<String>,
    kind: Option<GraphKind>,
    node_shape: NodeShape,
    edges: Vec<GraphEdge>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn kind(&self) -> Option<GraphKind> {
        self.kind
    }

    pub fn set_kind(&mut self, kind: GraphKind) {
        self.kind = Some(kind);
    }

    pub fn node_shape(&self) -> NodeShape {
        self.node_shape
    }

    pub fn set_node_shape(&mut self, shape: NodeShape) {
        self.node_shape = shape;
    }

    pub fn add_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
        guarded: bool,
    ) {
        self.edges.push(GraphEdge {
            from: from.into(),
            to: to.into(),
            label: label.into(),
            guarded,
        });
    }

    /// Add an edge from loose fields: `from, to, label[, guarded]`.
    pub fn add_edge_fields(&mut self, fields: &[&str]) -> Result<(), GraphError> {
        let guarded = match fields {
            [_, _, _] => false,
            [_, _, _, flag] => match flag.trim() {
                "true" => true,
                "false" => false,
                other => {
                    return Err(GraphError::InvalidGuardFlag {
                        value: other.to_string(),
                    })
                }
            },
            _ => {
                return Err(GraphError::EdgeArity {
                    count: fields.len(),
                })
            }
        };
        self.add_edge(fields[0], fields[1], fields[2], guarded);
        Ok(())
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Render as DOT. Name and kind must be set first.
    pub fn render(&self) -> Result<String, GraphError> {
        let (name, kind) = match (&self.name, self.kind) {
            (Some(name), Some(kind)) => (name, kind),
            (name, kind) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name");
                }
                if kind.is_none() {
                    missing.push("type");
                }
                return Err(GraphError::IncompleteGraph {
                    missing: missing.join(", "),
                });
            }
        };

        let mut out = format!("{kind} {name} {{\n");
        out.push_str(&format!("  node [shape = {}];\n", self.node_shape));
        for edge in &self.edges {
            out.push_str(&format!(
                "  {} {} {} [ label = \"{}\" ];\n",
                edge.from,
                kind.edge_op(),
                edge.to,
                escape_label(&edge.display_label())
            ));
        }
        out.push_str("}\n");
        Ok(out)
    }

    /// Render and write to `path`.
    pub fn output(&self, path: impl AsRef<Path>) -> Result<(), GraphError> {
        let path = path.as_ref();
        let text = self.render()?;
        fs::write(path, text).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), edges = self.edges.len(), "wrote dot graph");
        Ok(())
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
