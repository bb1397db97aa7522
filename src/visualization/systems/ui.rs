//! UI systems for labels, info panel, legend and status line.

use bevy::prelude::*;
use bevy::ui::Node as UiNode;

use crate::models::Node;
use crate::store::{Direction, GraphStore, StoreChange};
use crate::visualization::components::{
    FloatingLabel, GraphNode, InfoPanelText, LabelRole, LegendButton, LegendEntry, LegendPanel,
    StatusText,
};
use crate::visualization::constants::{edge_color, COLOR_TEXT, COLOR_TEXT_DIM};
use crate::visualization::resources::{AppearanceRes, SearchMode, StoreChanged, StoreRes};

/// Project the selected and hovered nodes to screen space and place their labels.
pub fn update_labels_system(
    store: Res<StoreRes>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    node_query: Query<(&GraphNode, &GlobalTransform, &Visibility)>,
    mut label_query: Query<
        (&mut UiNode, &mut Visibility, &mut Text, &FloatingLabel),
        Without<GraphNode>,
    >,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    let selected = store.0.selected_node();
    // The hovered label is redundant over the selected node
    let hovered = store
        .0
        .hovered_node()
        .filter(|h| selected.map(|s| s.id != h.id).unwrap_or(true));

    for (mut node_ui, mut visibility, mut text, label) in label_query.iter_mut() {
        let target = match label.role {
            LabelRole::Selected => selected,
            LabelRole::Hovered => hovered,
        };
        let placed = target.and_then(|node| {
            let (_, transform, _) = node_query
                .iter()
                .find(|(g, _, v)| g.id == node.id && **v != Visibility::Hidden)?;
            let (scale, _, center) = transform.to_scale_rotation_translation();
            let world_pos = center + Vec3::Y * (scale.x * 1.2 + 0.3);

            let in_front = (world_pos - camera_transform.translation())
                .dot(*camera_transform.forward())
                > 0.0;
            if !in_front {
                return None;
            }
            let viewport_pos = camera.world_to_viewport(camera_transform, world_pos).ok()?;
            Some((node, viewport_pos))
        });

        match placed {
            Some((node, viewport_pos)) => {
                if text.0 != node.name {
                    text.0 = node.name.clone();
                }
                node_ui.left = Val::Px(viewport_pos.x - 40.0);
                node_ui.top = Val::Px(viewport_pos.y - 10.0);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Detail text for the selected node.
pub fn describe_selection(store: &GraphStore) -> String {
    if !store.has_graph() {
        return "No graph loaded".to_string();
    }
    let Some(node) = store.selected_node() else {
        return "Click a node to see details".to_string();
    };

    let mut out = describe_node(node);
    if let Some(annotation) = store.annotation(&node.id) {
        if let Some(status) = annotation.status {
            out.push_str(&format!("Marked: {status:?}\n"));
        }
        if let Some(notes) = &annotation.notes {
            out.push_str(&format!("Notes: {notes}\n"));
        }
        if !annotation.tags.is_empty() {
            out.push_str(&format!("Tags: {}\n", annotation.tags.join(", ")));
        }
    }

    let connections = store.connections_of(&node.id);
    if connections.is_empty() {
        out.push_str("\nNo connections");
        return out;
    }
    out.push_str(&format!("\nConnections ({}):\n", connections.len()));
    for c in connections {
        let arrow = match c.direction {
            Direction::Outgoing => "->",
            Direction::Incoming => "<-",
        };
        out.push_str(&format!("{arrow} {} [{}]\n", c.other.name, c.edge.type_label()));
    }
    out
}

fn describe_node(node: &Node) -> String {
    let mut out = format!("{}\nType: {}\n", node.name, node.type_label());
    if node.qualified_name != node.name {
        out.push_str(&format!("Qualified: {}\n", node.qualified_name));
    }
    if let Some(file) = &node.file_path {
        match (node.line_start, node.line_end) {
            (Some(start), Some(end)) => out.push_str(&format!("File: {file}:{start}-{end}\n")),
            (Some(start), None) => out.push_str(&format!("File: {file}:{start}\n")),
            _ => out.push_str(&format!("File: {file}\n")),
        }
    }
    if !node.language.is_empty() {
        out.push_str(&format!("Language: {}\n", node.language));
    }
    if let Some(status) = node.status() {
        out.push_str(&format!("Status: {status:?}\n"));
    }
    out
}

/// Refresh the info panel when the store changes.
pub fn update_info_panel_system(
    mut events: EventReader<StoreChanged>,
    store: Res<StoreRes>,
    mut text_query: Query<&mut Text, With<InfoPanelText>>,
    mut initialized: Local<bool>,
) {
    let changed = events.read().count() > 0;
    if !changed && *initialized {
        return;
    }
    *initialized = true;

    if let Ok(mut text) = text_query.get_single_mut() {
        **text = describe_selection(&store.0);
    }
}

/// Status line content.
pub fn status_line(store: &GraphStore, search: &SearchMode) -> String {
    let mut line = if !store.has_graph() {
        "No graph loaded".to_string()
    } else {
        let shown = store.filtered_nodes().len();
        if shown == 0 {
            "No results".to_string()
        } else {
            let total = store.graph().map(|g| g.node_count()).unwrap_or(0);
            format!("{shown} of {total} nodes")
        }
    };

    if search.active {
        line.push_str(&format!("  |  Search: {}_", store.search_query()));
    } else if !store.search_query().is_empty() {
        line.push_str(&format!("  |  Search: {}", store.search_query()));
    }
    line
}

pub fn update_status_system(
    mut events: EventReader<StoreChanged>,
    store: Res<StoreRes>,
    search: Res<SearchMode>,
    mut text_query: Query<&mut Text, With<StatusText>>,
    mut initialized: Local<bool>,
) {
    let changed = events.read().count() > 0;
    if !changed && !search.is_changed() && *initialized {
        return;
    }
    *initialized = true;

    if let Ok(mut text) = text_query.get_single_mut() {
        **text = status_line(&store.0, &search);
    }
}

/// Respawn legend entries when the graph or colors change.
pub fn rebuild_legend_system(
    mut commands: Commands,
    mut events: EventReader<StoreChanged>,
    store: Res<StoreRes>,
    appearance: Res<AppearanceRes>,
    mut panel_query: Query<(Entity, &mut Visibility), With<LegendPanel>>,
) {
    let graph_changed = events
        .read()
        .any(|ev| matches!(ev.0, StoreChange::GraphReplaced | StoreChange::GraphCleared));
    let Ok((panel, mut visibility)) = panel_query.get_single_mut() else {
        return;
    };

    if appearance.is_changed() {
        *visibility = if appearance.0.show_legend() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if !graph_changed && !appearance.is_changed() {
        return;
    }

    let nodes = store.0.type_counts();
    let edges = store.0.edge_type_counts();

    commands.entity(panel).despawn_descendants();
    commands.entity(panel).with_children(|parent| {
        for (node_type, count) in nodes {
            let color = Color::srgb_from_array(appearance.0.color_for(&node_type).to_f32_array());
            let label = format!("{} ({count})", node_type.label());
            spawn_legend_entry(parent, LegendEntry::Node(node_type), label, color, &store.0);
        }

        if edges.is_empty() {
            return;
        }
        parent.spawn((
            Text::new("Edges"),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(COLOR_TEXT_DIM),
            UiNode {
                margin: UiRect::top(Val::Px(6.0)),
                ..default()
            },
        ));
        for (edge_type, count) in edges {
            let color = edge_color(&edge_type);
            let label = format!("{} ({count})", edge_type.label());
            spawn_legend_entry(parent, LegendEntry::Edge(edge_type), label, color, &store.0);
        }
    });
}

fn spawn_legend_entry(
    parent: &mut ChildBuilder,
    entry: LegendEntry,
    label: String,
    color: Color,
    store: &GraphStore,
) {
    let visible = entry.is_visible(store);
    // Round swatches for node types, square ones for edge types
    let corner = match entry {
        LegendEntry::Node(_) => 6.0,
        LegendEntry::Edge(_) => 2.0,
    };
    parent
        .spawn((
            Button,
            UiNode {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(6.0),
                padding: UiRect::axes(Val::Px(4.0), Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::NONE),
            LegendButton { entry },
        ))
        .with_children(|item| {
            item.spawn((
                UiNode {
                    width: Val::Px(12.0),
                    height: Val::Px(12.0),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(color),
                BorderColor(Color::srgba(1.0, 1.0, 1.0, 0.3)),
                BorderRadius::all(Val::Px(corner)),
            ));
            item.spawn((
                Text::new(label),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(if visible { COLOR_TEXT } else { COLOR_TEXT_DIM }),
            ));
        });
}

/// Toggle a node or edge type when its legend entry is clicked.
pub fn legend_click_system(
    mut store: ResMut<StoreRes>,
    button_query: Query<(&Interaction, &LegendButton), Changed<Interaction>>,
) {
    for (interaction, button) in button_query.iter() {
        if *interaction == Interaction::Pressed {
            button.entry.toggle(&mut store.0);
        }
    }
}

/// Dim legend entries whose type is hidden.
pub fn legend_style_system(
    mut events: EventReader<StoreChanged>,
    store: Res<StoreRes>,
    button_query: Query<(&LegendButton, &Children)>,
    mut text_query: Query<&mut TextColor>,
) {
    let toggled = events.read().any(|ev| {
        matches!(
            ev.0,
            StoreChange::NodeTypesChanged | StoreChange::EdgeTypesChanged
        )
    });
    if !toggled {
        return;
    }

    for (button, children) in button_query.iter() {
        let color = if button.entry.is_visible(&store.0) {
            COLOR_TEXT
        } else {
            COLOR_TEXT_DIM
        };
        for child in children.iter() {
            if let Ok(mut text_color) = text_query.get_mut(*child) {
                text_color.0 = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, EdgeType, Graph, NodeType};
    use crate::store::Annotation;

    fn store() -> GraphStore {
        let mut graph = Graph::new();
        graph.add_node(
            Node::new("a", NodeType::Class, "UserController")
                .with_file("app/Http/UserController.php")
                .with_lines(10, 80),
        );
        graph.add_node(Node::new("b", NodeType::Model, "User"));
        graph.add_node(Node::new("c", NodeType::Route, "/users"));
        graph.add_edge(Edge::new("a", "b", EdgeType::Uses));
        let mut store = GraphStore::new();
        store.set_graph(graph).unwrap();
        store
    }

    #[test]
    fn test_placeholders() {
        let empty = GraphStore::new();
        assert_eq!(describe_selection(&empty), "No graph loaded");
        assert!(status_line(&empty, &SearchMode::default()).starts_with("No graph loaded"));

        let mut store = store();
        store.set_search_query("nothing-matches");
        assert!(status_line(&store, &SearchMode::default()).starts_with("No results"));
    }

    #[test]
    fn test_selection_details() {
        let mut store = store();
        store.select_node_by_id(Some("a"));
        store.annotate("a", Annotation::default().with_notes("split me"));
        let text = describe_selection(&store);
        assert!(text.contains("File: app/Http/UserController.php:10-80"));
        assert!(text.contains("Notes: split me"));
        assert!(text.contains("-> User [uses]"));
    }

    #[test]
    fn test_no_connections() {
        let mut store = store();
        store.select_node_by_id(Some("c"));
        assert!(describe_selection(&store).ends_with("No connections"));
    }

    #[test]
    fn test_status_counts_and_search() {
        let mut store = store();
        store.toggle_node_type(&NodeType::Route);
        let search = SearchMode { active: true };
        store.set_search_query("us");
        assert_eq!(status_line(&store, &search), "2 of 3 nodes  |  Search: us_");
    }
}
