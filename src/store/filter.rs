//! Pure filtering over an immutable graph snapshot.

use std::collections::{BTreeSet, HashSet};

use crate::models::{Edge, Graph, Node};

/// The three inputs the filtered views derive from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Node type labels currently shown.
    pub visible_node_types: BTreeSet<String>,
    /// Edge type labels currently shown.
    pub visible_edge_types: BTreeSet<String>,
    /// Free-text query; empty means no text filter.
    pub search_query: String,
}

impl FilterState {
    /// Every type present in `graph` visible, no query.
    pub fn all_visible(graph: &Graph) -> Self {
        Self {
            visible_node_types: graph.node_types().into_iter().collect(),
            visible_edge_types: graph.edge_types().into_iter().collect(),
            search_query: String::new(),
        }
    }
}

/// Toggle `label` in `set` (symmetric difference). Returns the new membership.
pub fn toggle(set: &mut BTreeSet<String>, label: &str) -> bool {
    if set.remove(label) {
        false
    } else {
        set.insert(label.to_string());
        true
    }
}

/// Nodes whose type is visible and that match the query, in graph order.
pub fn filter_nodes<'g>(graph: &'g Graph, state: &FilterState) -> Vec<&'g Node> {
    let needle = state.search_query.to_lowercase();
    graph
        .nodes
        .iter()
        .filter(|n| state.visible_node_types.contains(n.type_label()))
        .filter(|n| n.matches_lowercase(&needle))
        .collect()
}

/// Edges whose type is visible and whose endpoints are both in `nodes`.
pub fn filter_edges<'g>(graph: &'g Graph, state: &FilterState, nodes: &[&Node]) -> Vec<&'g Edge> {
    let visible: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    graph
        .edges
        .iter()
        .filter(|e| state.visible_edge_types.contains(e.type_label()))
        .filter(|e| visible.contains(e.source.as_str()) && visible.contains(e.target.as_str()))
        .collect()
}
