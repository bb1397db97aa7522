//! Graph store: the single source of truth for the loaded graph,
//! filters, search, selection and hover.
//!
//! Filtered views are derived on every read from (graph, visible types,
//! query); nothing is cached, so a mutation followed by a read always
//! reflects the mutation. Subscribers are told about each effective change.
//!
//! "No graph loaded" is a normal state: every accessor returns an empty
//! result instead of failing.

mod annotations;
mod delivery;
mod filter;
mod observer;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

pub use annotations::Annotation;
pub use delivery::{channel, DeliveryStatus, GraphDelivery, GraphProducer};
pub use filter::{filter_edges, filter_nodes, toggle, FilterState};
pub use observer::{ChangeRecorder, StoreChange, StoreObserver, SubscriptionId};

use crate::error::AppError;
use crate::models::{Edge, EdgeType, Graph, Node, NodeType};

/// Direction of a connection relative to the inspected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// One relation of a node, with the node on the other end.
#[derive(Debug, Clone, Copy)]
pub struct Connection<'g> {
    pub edge: &'g Edge,
    pub direction: Direction,
    pub other: &'g Node,
}

/// Reactive state container for the explorer.
#[derive(Default)]
pub struct GraphStore {
    graph: Option<Arc<Graph>>,
    filter: FilterState,
    selected: Option<Node>,
    hovered: Option<Node>,
    annotations: HashMap<String, Annotation>,
    observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
    next_subscription: u64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register an observer notified after every effective change.
    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn notify(&self, change: StoreChange) {
        for (_, observer) in &self.observers {
            observer.on_change(&change);
        }
    }

    // =========================================================================
    // Graph lifecycle
    // =========================================================================

    /// Validate and install `graph`, replacing any previous one.
    ///
    /// Every node and edge type present becomes visible, and selection and
    /// hover from the previous graph are cleared. The search query is kept.
    /// An invalid graph is rejected and the store is left untouched.
    pub fn set_graph(&mut self, graph: Graph) -> Result<(), AppError> {
        if let Err(e) = graph.validate() {
            tracing::warn!("Rejected graph '{}': {}", graph.metadata.project_name, e);
            return Err(e.into());
        }

        let fresh = FilterState::all_visible(&graph);
        tracing::debug!(
            "Installed graph '{}': {} nodes, {} edges, {} node types",
            graph.metadata.project_name,
            graph.node_count(),
            graph.edge_count(),
            fresh.visible_node_types.len()
        );

        self.filter.visible_node_types = fresh.visible_node_types;
        self.filter.visible_edge_types = fresh.visible_edge_types;
        self.graph = Some(Arc::new(graph));
        self.selected = None;
        self.hovered = None;
        self.notify(StoreChange::GraphReplaced);
        Ok(())
    }

    /// Remove the graph and every selection derived from it.
    pub fn clear_graph(&mut self) {
        if self.graph.is_none() && self.selected.is_none() && self.hovered.is_none() {
            return;
        }
        self.graph = None;
        self.selected = None;
        self.hovered = None;
        self.filter.visible_node_types.clear();
        self.filter.visible_edge_types.clear();
        tracing::debug!("Graph cleared");
        self.notify(StoreChange::GraphCleared);
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_deref()
    }

    /// Shared handle to the current immutable graph.
    pub fn snapshot(&self) -> Option<Arc<Graph>> {
        self.graph.clone()
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }

    // =========================================================================
    // Selection & hover
    // =========================================================================

    /// Set the selected node. Does not consult the graph or the filters.
    pub fn select_node(&mut self, node: Option<Node>) {
        if self.selected == node {
            return;
        }
        tracing::debug!("Selected {:?}", node.as_ref().map(|n| &n.id));
        self.selected = node;
        self.notify(StoreChange::SelectionChanged);
    }

    /// Select by id; an id absent from the current graph clears the selection.
    pub fn select_node_by_id(&mut self, id: Option<&str>) {
        let node = id.and_then(|id| self.find_node(id)).cloned();
        self.select_node(node);
    }

    /// Set the hovered node. Never touches the selection.
    pub fn hover_node(&mut self, node: Option<Node>) {
        if self.hovered == node {
            return;
        }
        self.hovered = node;
        self.notify(StoreChange::HoverChanged);
    }

    /// Hover by id; an id absent from the current graph clears the hover.
    pub fn hover_node_by_id(&mut self, id: Option<&str>) {
        if self.hovered.as_ref().map(|n| n.id.as_str()) == id {
            return;
        }
        let node = id.and_then(|id| self.find_node(id)).cloned();
        self.hover_node(node);
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_ref()
    }

    pub fn hovered_node(&self) -> Option<&Node> {
        self.hovered.as_ref()
    }

    // =========================================================================
    // Filters & search
    // =========================================================================

    /// Set the free-text query. Empty means no text filter.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.filter.search_query == query {
            return;
        }
        self.filter.search_query = query;
        self.notify(StoreChange::SearchChanged);
    }

    pub fn search_query(&self) -> &str {
        &self.filter.search_query
    }

    /// Flip the visibility of a node type.
    pub fn toggle_node_type(&mut self, node_type: &NodeType) {
        let visible = toggle(&mut self.filter.visible_node_types, node_type.label());
        tracing::debug!("Node type '{}' visible: {}", node_type, visible);
        self.notify(StoreChange::NodeTypesChanged);
    }

    /// Flip the visibility of an edge type.
    pub fn toggle_edge_type(&mut self, edge_type: &EdgeType) {
        let visible = toggle(&mut self.filter.visible_edge_types, edge_type.label());
        tracing::debug!("Edge type '{}' visible: {}", edge_type, visible);
        self.notify(StoreChange::EdgeTypesChanged);
    }

    pub fn is_node_type_visible(&self, node_type: &NodeType) -> bool {
        self.filter.visible_node_types.contains(node_type.label())
    }

    pub fn is_edge_type_visible(&self, edge_type: &EdgeType) -> bool {
        self.filter.visible_edge_types.contains(edge_type.label())
    }

    pub fn visible_node_types(&self) -> &BTreeSet<String> {
        &self.filter.visible_node_types
    }

    pub fn visible_edge_types(&self) -> &BTreeSet<String> {
        &self.filter.visible_edge_types
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Nodes passing the type filter and search query, in graph order.
    pub fn filtered_nodes(&self) -> Vec<&Node> {
        match &self.graph {
            Some(graph) => filter_nodes(graph, &self.filter),
            None => Vec::new(),
        }
    }

    /// Edges of a visible type whose endpoints are both in `filtered_nodes()`.
    pub fn filtered_edges(&self) -> Vec<&Edge> {
        match &self.graph {
            Some(graph) => {
                let nodes = filter_nodes(graph, &self.filter);
                filter_edges(graph, &self.filter, &nodes)
            }
            None => Vec::new(),
        }
    }

    /// Filtered relations of `node_id`, with the node on the other end.
    pub fn connections_of(&self, node_id: &str) -> Vec<Connection<'_>> {
        let Some(graph) = self.graph.as_deref() else {
            return Vec::new();
        };
        self.filtered_edges()
            .into_iter()
            .filter_map(|edge| {
                let (direction, other_id) = if edge.source == node_id {
                    (Direction::Outgoing, &edge.target)
                } else if edge.target == node_id {
                    (Direction::Incoming, &edge.source)
                } else {
                    return None;
                };
                let other = graph.find_node(other_id)?;
                Some(Connection {
                    edge,
                    direction,
                    other,
                })
            })
            .collect()
    }

    /// Node count per type in the loaded graph, in first-seen order.
    pub fn type_counts(&self) -> Vec<(NodeType, usize)> {
        let Some(graph) = self.graph.as_deref() else {
            return Vec::new();
        };
        let mut counts: Vec<(NodeType, usize)> = Vec::new();
        for node in &graph.nodes {
            match counts.iter_mut().find(|(t, _)| *t == node.node_type) {
                Some((_, count)) => *count += 1,
                None => counts.push((node.node_type.clone(), 1)),
            }
        }
        counts
    }

    /// Edge count per type in the loaded graph, in first-seen order.
    pub fn edge_type_counts(&self) -> Vec<(EdgeType, usize)> {
        let Some(graph) = self.graph.as_deref() else {
            return Vec::new();
        };
        let mut counts: Vec<(EdgeType, usize)> = Vec::new();
        for edge in &graph.edges {
            match counts.iter_mut().find(|(t, _)| *t == edge.edge_type) {
                Some((_, count)) => *count += 1,
                None => counts.push((edge.edge_type.clone(), 1)),
            }
        }
        counts
    }

    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.graph.as_deref().and_then(|g| g.find_node(id))
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    /// Attach or replace the annotation of `node_id`. An empty one removes it.
    pub fn annotate(&mut self, node_id: &str, annotation: Annotation) {
        if annotation.is_empty() {
            self.remove_annotation(node_id);
            return;
        }
        if self.annotations.get(node_id) == Some(&annotation) {
            return;
        }
        self.annotations.insert(node_id.to_string(), annotation);
        self.notify(StoreChange::AnnotationChanged(node_id.to_string()));
    }

    pub fn remove_annotation(&mut self, node_id: &str) {
        if self.annotations.remove(node_id).is_some() {
            self.notify(StoreChange::AnnotationChanged(node_id.to_string()));
        }
    }

    pub fn annotation(&self, node_id: &str) -> Option<&Annotation> {
        self.annotations.get(node_id)
    }
}
