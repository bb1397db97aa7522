//! Graph delivery, scene rebuilds and per-node styling.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::layout::bounding_sphere;
use crate::models::Position;
use crate::store::{DeliveryStatus, StoreChange};
use crate::visualization::components::{GraphNode, GraphRoot, SelectionRing};
use crate::visualization::constants::{edge_color, node_radius};
use crate::visualization::resources::{
    AppearanceRes, CameraOrbit, DeliveryRes, NeedsRestyle, NodeMaterials, PendingChanges,
    PendingSelection, RenderSettings, SceneMeshes, SelectionNeighborhood, StoreChanged, StoreRes,
    VisibleEdges,
};
use crate::visualization::visual_state::{connected_ids, render_edges, NodeVisualState};

fn to_vec3(p: Position) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Install the loader's graph once it arrives.
pub fn poll_delivery_system(
    mut delivery: ResMut<DeliveryRes>,
    mut store: ResMut<StoreRes>,
    mut pending_selection: ResMut<PendingSelection>,
) {
    let Some(rx) = delivery.0.as_ref() else {
        return;
    };

    match rx.poll_into(&mut store.0) {
        DeliveryStatus::Pending => return,
        DeliveryStatus::Installed { nodes, edges } => {
            tracing::info!(nodes, edges, "Graph loaded");
            if let Some(id) = pending_selection.0.take() {
                store.0.select_node_by_id(Some(&id));
                if store.0.selected_node().is_none() {
                    tracing::warn!(node = %id, "Requested node not found in graph");
                }
            }
        }
        DeliveryStatus::Failed(e) => {
            tracing::error!(error = %e, "Graph was not loaded");
        }
    }
    delivery.0 = None;
}

/// Write the appearance record one last time before the app exits.
pub fn flush_settings_on_exit_system(
    mut exits: EventReader<AppExit>,
    appearance: Res<AppearanceRes>,
) {
    if exits.read().next().is_none() {
        return;
    }
    if let Err(e) = appearance.0.flush() {
        tracing::warn!(error = %e, "Failed to flush appearance settings");
    }
}

/// Forward queued store changes as Bevy events.
pub fn drain_store_changes_system(
    pending: Res<PendingChanges>,
    mut events: EventWriter<StoreChanged>,
    mut restyle: ResMut<NeedsRestyle>,
) {
    let changes = pending.0.drain();
    if changes.is_empty() {
        return;
    }
    restyle.0 = true;
    events.send_batch(changes.into_iter().map(StoreChanged));
}

/// Respawn node entities when the graph is replaced or cleared.
#[allow(clippy::too_many_arguments)]
pub fn rebuild_scene_system(
    mut commands: Commands,
    mut events: EventReader<StoreChanged>,
    store: Res<StoreRes>,
    meshes: Res<SceneMeshes>,
    mut orbit: ResMut<CameraOrbit>,
    mut root_query: Query<(Entity, &mut Transform), With<GraphRoot>>,
    node_query: Query<Entity, With<GraphNode>>,
) {
    let rebuild = events
        .read()
        .any(|ev| matches!(ev.0, StoreChange::GraphReplaced | StoreChange::GraphCleared));
    if !rebuild {
        return;
    }

    for entity in node_query.iter() {
        commands.entity(entity).despawn_recursive();
    }

    let Some(graph) = store.0.graph() else {
        return;
    };
    let Ok((root, mut root_transform)) = root_query.get_single_mut() else {
        return;
    };

    let positions: Vec<Position> = graph
        .nodes
        .iter()
        .map(|n| n.position.unwrap_or(Position::ORIGIN))
        .collect();
    let (center, radius) = bounding_sphere(&positions);
    let center = to_vec3(center);

    // Nodes are placed relative to the root so rotation spins around the center
    root_transform.translation = center;
    orbit.frame(center, (radius as f32 * 2.5).max(10.0));

    commands.entity(root).with_children(|parent| {
        for (node, position) in graph.nodes.iter().zip(&positions) {
            let radius = node_radius(node.size);
            parent.spawn((
                Mesh3d(meshes.node.clone()),
                Transform::from_translation(to_vec3(*position) - center)
                    .with_scale(Vec3::splat(radius)),
                Visibility::Inherited,
                GraphNode {
                    id: node.id.clone(),
                    node_type: node.node_type.clone(),
                    radius,
                },
            ));
        }
    });

    tracing::debug!(nodes = graph.node_count(), "Scene rebuilt");
}

/// Recompute visibility, visual state, ring placement and the edge list.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn restyle_nodes_system(
    mut restyle: ResMut<NeedsRestyle>,
    store: Res<StoreRes>,
    appearance: Res<AppearanceRes>,
    settings: Res<RenderSettings>,
    mut neighborhood: ResMut<SelectionNeighborhood>,
    mut visible_edges: ResMut<VisibleEdges>,
    mut node_materials: ResMut<NodeMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
    mut node_query: Query<
        (
            Entity,
            &GraphNode,
            &mut Transform,
            &mut Visibility,
            Option<&MeshMaterial3d<StandardMaterial>>,
        ),
        Without<SelectionRing>,
    >,
    mut ring_query: Query<(&mut Transform, &mut Visibility), With<SelectionRing>>,
) {
    if appearance.is_changed() {
        node_materials.cache.clear();
        restyle.0 = true;
    }
    if !restyle.0 {
        return;
    }
    restyle.0 = false;

    let store = &store.0;
    let filtered_nodes = store.filtered_nodes();
    let filtered_ids: HashSet<&str> = filtered_nodes.iter().map(|n| n.id.as_str()).collect();
    let filtered_edges = store.filtered_edges();
    let selected = store.selected_node().map(|n| n.id.as_str());
    let hovered = store.hovered_node().map(|n| n.id.as_str());

    neighborhood.connected = match selected {
        Some(id) => connected_ids(&filtered_edges, id),
        None => HashSet::new(),
    };
    visible_edges.0 = render_edges(filtered_edges, selected, settings.edge_mode)
        .into_iter()
        .map(|e| (e.source.clone(), e.target.clone(), e.edge_type.clone()))
        .collect();

    let multiplier = appearance.0.node_size_multiplier();
    let mut ring_at: Option<(Vec3, f32)> = None;

    for (entity, node, mut transform, mut visibility, material) in node_query.iter_mut() {
        if !filtered_ids.contains(node.id.as_str()) {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Inherited;

        let state = NodeVisualState::resolve(
            selected == Some(node.id.as_str()),
            hovered == Some(node.id.as_str()),
            neighborhood.connected.contains(&node.id),
        );
        let scale = node.radius * state.scale() * multiplier;
        transform.scale = Vec3::splat(scale);
        if state.shows_ring() {
            ring_at = Some((transform.translation, scale));
        }

        let base = Color::srgb_from_array(appearance.0.color_for(&node.node_type).to_f32_array());
        let handle =
            node_materials.get_or_create(node.node_type.label(), state, base, &mut materials);
        if material.map(|m| m.0 != handle).unwrap_or(true) {
            commands.entity(entity).insert(MeshMaterial3d(handle));
        }
    }

    if let Ok((mut ring_transform, mut ring_visibility)) = ring_query.get_single_mut() {
        match ring_at {
            Some((translation, scale)) => {
                ring_transform.translation = translation;
                ring_transform.scale = Vec3::splat(scale * 1.4);
                *ring_visibility = Visibility::Inherited;
            }
            None => *ring_visibility = Visibility::Hidden,
        }
    }
}

/// Keep the ring facing the camera.
pub fn orient_ring_system(
    camera_query: Query<&GlobalTransform, With<Camera3d>>,
    mut ring_query: Query<(&mut Transform, &GlobalTransform), With<SelectionRing>>,
    root_query: Query<&GlobalTransform, (With<GraphRoot>, Without<SelectionRing>)>,
) {
    let Ok(camera) = camera_query.get_single() else {
        return;
    };
    let Ok(root) = root_query.get_single() else {
        return;
    };
    let Ok((mut transform, global)) = ring_query.get_single_mut() else {
        return;
    };
    let to_camera = (camera.translation() - global.translation()).normalize_or_zero();
    if to_camera == Vec3::ZERO {
        return;
    }
    // Torus axis is local Y; express the camera direction in root space
    let (_, root_rotation, _) = root.to_scale_rotation_translation();
    let local_dir = root_rotation.inverse() * to_camera;
    transform.rotation = Quat::from_rotation_arc(Vec3::Y, local_dir);
}

/// Draw the current edge list as gizmo lines.
pub fn draw_edges_system(
    mut gizmos: Gizmos,
    visible_edges: Res<VisibleEdges>,
    node_query: Query<(&GraphNode, &GlobalTransform, &Visibility)>,
) {
    if visible_edges.0.is_empty() {
        return;
    }

    let positions: HashMap<&str, Vec3> = node_query
        .iter()
        .filter(|(_, _, visibility)| **visibility != Visibility::Hidden)
        .map(|(node, transform, _)| (node.id.as_str(), transform.translation()))
        .collect();

    for (source, target, edge_type) in &visible_edges.0 {
        if let (Some(from), Some(to)) = (
            positions.get(source.as_str()),
            positions.get(target.as_str()),
        ) {
            gizmos.line(*from, *to, edge_color(edge_type));
        }
    }
}
