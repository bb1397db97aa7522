//! Integrity checks run before a graph is accepted.

use std::collections::HashSet;

use thiserror::Error;

use super::Graph;

/// A graph that breaks referential integrity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Edge {edge_id} references missing node {missing_node}")]
    DanglingEdge {
        edge_id: String,
        missing_node: String,
    },

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),
}

/// Check that node ids are unique and every edge endpoint exists.
///
/// Duplicates are reported before dangling edges.
pub fn validate(graph: &Graph) -> Result<(), ValidationError> {
    match integrity_issues(graph).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Collect every integrity issue in graph order.
pub fn integrity_issues(graph: &Graph) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    let mut ids: HashSet<&str> = HashSet::with_capacity(graph.nodes.len());

    for node in &graph.nodes {
        if !ids.insert(node.id.as_str()) {
            issues.push(ValidationError::DuplicateNodeId(node.id.clone()));
        }
    }

    for edge in &graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !ids.contains(endpoint.as_str()) {
                issues.push(ValidationError::DanglingEdge {
                    edge_id: edge.id.clone(),
                    missing_node: endpoint.clone(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, EdgeType, Node, NodeType};

    #[test]
    fn test_valid_graph() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("n1", NodeType::Module, "Main"));
        graph.add_node(Node::new("n2", NodeType::Form, "Login"));
        graph.add_edge(Edge::new("n1", "n2", EdgeType::Uses));
        assert_eq!(validate(&graph), Ok(()));
    }

    #[test]
    fn test_empty_graph_is_valid() {
        assert!(validate(&Graph::new()).is_ok());
    }

    #[test]
    fn test_dangling_edge() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("n1", NodeType::Module, "Main"));
        graph.add_edge(Edge::new("n1", "ghost", EdgeType::Uses).with_id("e1"));
        assert_eq!(
            validate(&graph),
            Err(ValidationError::DanglingEdge {
                edge_id: "e1".into(),
                missing_node: "ghost".into(),
            })
        );
    }

    #[test]
    fn test_duplicate_node_id() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("n1", NodeType::Module, "Main"));
        graph.add_node(Node::new("n1", NodeType::Class, "Other"));
        assert_eq!(
            validate(&graph),
            Err(ValidationError::DuplicateNodeId("n1".into()))
        );
    }

    #[test]
    fn test_all_issues_collected() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a", NodeType::Module, "A"));
        graph.add_node(Node::new("a", NodeType::Module, "A2"));
        graph.add_edge(Edge::new("x", "y", EdgeType::Calls));
        let issues = integrity_issues(&graph);
        assert_eq!(issues.len(), 3);
        assert!(matches!(issues[0], ValidationError::DuplicateNodeId(_)));
    }
}
