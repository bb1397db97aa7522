//! ECS components for the graph scene.
//!
//! Components are data attached to entities. Each entity can have
//! any combination of components.

use bevy::prelude::*;

use crate::models::{EdgeType, NodeType};
use crate::store::GraphStore;

/// Parent of every node entity. Auto-rotation spins this group.
#[derive(Component, Default)]
pub struct GraphRoot {
    /// Accumulated rotation around the Y axis (radians).
    pub angle: f32,
}

/// Sphere mesh representing one graph node.
#[derive(Component)]
pub struct GraphNode {
    /// Node id in the store.
    pub id: String,
    pub node_type: NodeType,
    /// Drawn radius before visual state and size multiplier.
    pub radius: f32,
}

/// Ring drawn around the selected node.
#[derive(Component)]
pub struct SelectionRing;

/// Which node a floating label follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Selected,
    Hovered,
}

/// Screen-space label that follows the selected or hovered node.
#[derive(Component)]
pub struct FloatingLabel {
    pub role: LabelRole,
}

/// Container of the legend buttons.
#[derive(Component)]
pub struct LegendPanel;

/// The type a legend entry filters on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendEntry {
    Node(NodeType),
    Edge(EdgeType),
}

impl LegendEntry {
    pub fn is_visible(&self, store: &GraphStore) -> bool {
        match self {
            LegendEntry::Node(t) => store.is_node_type_visible(t),
            LegendEntry::Edge(t) => store.is_edge_type_visible(t),
        }
    }

    pub fn toggle(&self, store: &mut GraphStore) {
        match self {
            LegendEntry::Node(t) => store.toggle_node_type(t),
            LegendEntry::Edge(t) => store.toggle_edge_type(t),
        }
    }
}

/// Legend entry toggling the visibility of one node or edge type.
#[derive(Component)]
pub struct LegendButton {
    pub entry: LegendEntry,
}

/// Marker component for the info panel text content.
#[derive(Component)]
pub struct InfoPanelText;

/// Status line: placeholders, result counts and the search prompt.
#[derive(Component)]
pub struct StatusText;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, Graph, Node};

    fn store() -> GraphStore {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a", NodeType::Controller, "UserController"));
        graph.add_node(Node::new("b", NodeType::Model, "User"));
        graph.add_edge(Edge::new("a", "b", EdgeType::Uses));
        let mut store = GraphStore::new();
        store.set_graph(graph).unwrap();
        store
    }

    #[test]
    fn test_edge_entry_toggles_edge_filter() {
        let mut store = store();
        let entry = LegendEntry::Edge(EdgeType::Uses);
        assert!(entry.is_visible(&store));

        entry.toggle(&mut store);
        assert!(!entry.is_visible(&store));
        assert!(store.filtered_edges().is_empty());
        assert_eq!(store.filtered_nodes().len(), 2);

        entry.toggle(&mut store);
        assert_eq!(store.filtered_edges().len(), 1);
    }

    #[test]
    fn test_node_entry_toggles_node_filter() {
        let mut store = store();
        let entry = LegendEntry::Node(NodeType::Model);
        entry.toggle(&mut store);
        assert!(!entry.is_visible(&store));
        assert_eq!(store.filtered_nodes().len(), 1);
        assert!(LegendEntry::Edge(EdgeType::Uses).is_visible(&store));
    }
}
