//! End-to-end store behaviour on graphs read from JSON payloads.

use std::collections::HashSet;

use codeorbit::appearance::{AppearanceStore, MemoryStorage, DEFAULT_NODE_COLORS};
use codeorbit::config::LayoutConfig;
use codeorbit::error::AppError;
use codeorbit::layout::{Layout, LayoutPolicy};
use codeorbit::models::{Edge, EdgeType, Graph, Node, NodeType, ValidationError};
use codeorbit::store::{self, ChangeRecorder, DeliveryStatus, GraphStore, StoreChange};

const SCENARIO_GRAPH: &str = r#"{
    "nodes": [
        {"id": "n1", "type": "module", "name": "Main"},
        {"id": "n2", "type": "form", "name": "Login"}
    ],
    "edges": [
        {"id": "e1", "source": "n1", "target": "n2", "type": "uses"}
    ]
}"#;

fn scenario_store() -> GraphStore {
    let graph: Graph = serde_json::from_str(SCENARIO_GRAPH).unwrap();
    let mut store = GraphStore::new();
    store.set_graph(graph).unwrap();
    store
}

fn node_ids(store: &GraphStore) -> Vec<String> {
    store.filtered_nodes().iter().map(|n| n.id.clone()).collect()
}

fn edge_ids(store: &GraphStore) -> Vec<String> {
    store.filtered_edges().iter().map(|e| e.id.clone()).collect()
}

/// A denser graph with several types for filtering laws.
fn mixed_graph() -> Graph {
    let mut graph = Graph::new();
    graph.add_node(Node::new("c1", NodeType::Controller, "UserController"));
    graph.add_node(Node::new("c2", NodeType::Controller, "OrderController"));
    graph.add_node(Node::new("m1", NodeType::Model, "User"));
    graph.add_node(Node::new("m2", NodeType::Model, "Order"));
    graph.add_node(Node::new("r1", NodeType::Route, "/users"));
    graph.add_node(Node::new("t1", NodeType::Table, "users"));
    graph.add_node(Node::new("x1", NodeType::from("blade_slot"), "header"));
    graph.add_edge(Edge::new("r1", "c1", EdgeType::Routes));
    graph.add_edge(Edge::new("c1", "m1", EdgeType::Uses));
    graph.add_edge(Edge::new("c2", "m2", EdgeType::Uses));
    graph.add_edge(Edge::new("m1", "t1", EdgeType::QueriesTable));
    graph.add_edge(Edge::new("m2", "m1", EdgeType::HasRelation));
    graph.add_edge(Edge::new("x1", "c1", EdgeType::from("slot_of")));
    graph
}

fn assert_filtering_law(store: &GraphStore) {
    let nodes: HashSet<&str> = store.filtered_nodes().iter().map(|n| n.id.as_str()).collect();
    for edge in store.filtered_edges() {
        assert!(nodes.contains(edge.source.as_str()));
        assert!(nodes.contains(edge.target.as_str()));
        assert!(store.is_edge_type_visible(&edge.edge_type));
    }
}

#[test]
fn test_scenario_a_toggle_form() {
    let mut store = scenario_store();
    store.toggle_node_type(&NodeType::Form);
    assert_eq!(node_ids(&store), vec!["n1"]);
    assert!(edge_ids(&store).is_empty());
}

#[test]
fn test_scenario_b_selection_without_graph() {
    let mut store = GraphStore::new();
    assert!(store.filtered_nodes().is_empty());
    assert!(store.filtered_edges().is_empty());

    let node = Node::new("free", NodeType::Class, "Floating");
    store.select_node(Some(node.clone()));
    assert_eq!(store.selected_node(), Some(&node));
}

#[test]
fn test_scenario_c_search_is_case_insensitive() {
    let mut store = scenario_store();
    store.set_search_query("login");
    assert_eq!(node_ids(&store), vec!["n2"]);
    store.set_search_query("LOGIN");
    assert_eq!(node_ids(&store), vec!["n2"]);
}

#[test]
fn test_scenario_d_reset_colors() {
    let mut appearance = AppearanceStore::open(MemoryStorage::new());
    appearance.set_node_color("module", "#123456").unwrap();
    assert_eq!(appearance.color_for(&NodeType::Module).to_string(), "#123456");
    appearance.reset_colors();
    assert_eq!(
        appearance.color_for(&NodeType::Module),
        DEFAULT_NODE_COLORS["module"]
    );
}

#[test]
fn test_toggle_twice_is_identity() {
    let mut store = GraphStore::new();
    store.set_graph(mixed_graph()).unwrap();
    let before = store.visible_node_types().clone();
    let before_edges = store.visible_edge_types().clone();

    for t in [NodeType::Model, NodeType::Route, NodeType::from("blade_slot"), NodeType::Page] {
        store.toggle_node_type(&t);
        store.toggle_node_type(&t);
    }
    store.toggle_edge_type(&EdgeType::Uses);
    store.toggle_edge_type(&EdgeType::Uses);

    assert_eq!(store.visible_node_types(), &before);
    assert_eq!(store.visible_edge_types(), &before_edges);
}

#[test]
fn test_filtering_law_under_combinations() {
    let mut store = GraphStore::new();
    store.set_graph(mixed_graph()).unwrap();
    assert_filtering_law(&store);

    store.toggle_node_type(&NodeType::Model);
    assert_filtering_law(&store);
    // Only the route and slot edges avoid hidden models
    assert_eq!(edge_ids(&store).len(), 2);

    store.toggle_node_type(&NodeType::Model);
    store.toggle_edge_type(&EdgeType::Uses);
    assert_filtering_law(&store);

    store.set_search_query("user");
    assert_filtering_law(&store);
    let nodes = node_ids(&store);
    assert!(nodes.contains(&"c1".to_string()));
    assert!(!nodes.contains(&"c2".to_string()));
}

#[test]
fn test_validation_rejects_without_partial_install() {
    let mut store = scenario_store();
    let payload = r#"{
        "nodes": [{"id": "a", "type": "class", "name": "A"}],
        "edges": [{"id": "dangling", "source": "a", "target": "ghost", "type": "calls"}]
    }"#;
    let bad: Graph = serde_json::from_str(payload).unwrap();

    match store.set_graph(bad) {
        Err(AppError::Integrity(ValidationError::DanglingEdge { edge_id, missing_node })) => {
            assert_eq!(edge_id, "dangling");
            assert_eq!(missing_node, "ghost");
        }
        other => panic!("expected dangling edge error, got {other:?}"),
    }
    assert_eq!(node_ids(&store), vec!["n1", "n2"]);
}

#[test]
fn test_unknown_types_round_trip_as_custom() {
    let payload = r#"{
        "nodes": [{"id": "s", "type": "blade_slot", "name": "header"}],
        "edges": []
    }"#;
    let graph: Graph = serde_json::from_str(payload).unwrap();
    assert_eq!(graph.nodes[0].node_type, NodeType::Custom("blade_slot".to_string()));

    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["nodes"][0]["type"], "blade_slot");
}

#[test]
fn test_observer_sees_store_changes() {
    let recorder = ChangeRecorder::new();
    let mut store = GraphStore::new();
    store.subscribe(recorder.clone());

    store.set_graph(mixed_graph()).unwrap();
    store.select_node_by_id(Some("m1"));
    store.select_node_by_id(Some("m1"));
    store.set_search_query("order");

    assert_eq!(
        recorder.drain(),
        vec![
            StoreChange::GraphReplaced,
            StoreChange::SelectionChanged,
            StoreChange::SearchChanged,
        ]
    );
}

#[test]
fn test_delivery_from_loader_thread() {
    let (producer, delivery) = store::channel();
    let mut store = GraphStore::new();

    producer
        .spawn(|| {
            let mut graph: Graph = serde_json::from_str(SCENARIO_GRAPH)?;
            LayoutConfig::default().build().arrange(&mut graph);
            Ok(graph)
        })
        .join()
        .unwrap();

    assert!(matches!(
        delivery.poll_into(&mut store),
        DeliveryStatus::Installed { nodes: 2, edges: 1 }
    ));
    let graph = store.graph().unwrap();
    assert!(graph.is_positioned());
}

#[test]
fn test_every_policy_is_deterministic_and_positions_mixed_graph() {
    for policy in [LayoutPolicy::Spherical, LayoutPolicy::Grid, LayoutPolicy::Force] {
        let config = LayoutConfig {
            policy,
            iterations: 50,
            ..LayoutConfig::default()
        };
        let layout = config.build();
        let mut graph = mixed_graph();
        assert_eq!(layout.place(&graph), layout.place(&graph), "{policy:?} not deterministic");
        layout.relayout(&mut graph);
        assert!(graph.is_positioned(), "{policy:?} left nodes unplaced");
    }
}
