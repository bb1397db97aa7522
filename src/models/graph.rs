//! The graph payload delivered by an external scanner.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationError};
use super::{Edge, Node};

/// Information about the scanned project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphMetadata {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub root_path: String,
    /// Primary language.
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_lines: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<DateTime<Utc>>,
    /// Version of the producer that built this graph.
    #[serde(default)]
    pub parser_version: String,
}

/// Ordered nodes and edges plus project metadata.
///
/// Insertion order is kept for stable iteration; it carries no priority.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub metadata: GraphMetadata,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: GraphMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_from<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    pub fn edges_to<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    pub fn in_degree(&self, node_id: &str) -> usize {
        self.edges_to(node_id).count()
    }

    pub fn out_degree(&self, node_id: &str) -> usize {
        self.edges_from(node_id).count()
    }

    /// Node type labels present, in first-seen order.
    pub fn node_types(&self) -> Vec<String> {
        first_seen(self.nodes.iter().map(Node::type_label))
    }

    /// Edge type labels present, in first-seen order.
    pub fn edge_types(&self) -> Vec<String> {
        first_seen(self.edges.iter().map(Edge::type_label))
    }

    /// Whether every node has a position.
    pub fn is_positioned(&self) -> bool {
        self.nodes.iter().all(|n| n.position.is_some())
    }

    /// First integrity problem, if any.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }

    /// Every integrity problem, for reporting.
    pub fn integrity_issues(&self) -> Vec<ValidationError> {
        validation::integrity_issues(self)
    }
}

fn first_seen<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}
