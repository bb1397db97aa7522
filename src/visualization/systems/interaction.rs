//! Hover and click dispatch to the store.

use bevy::prelude::*;

use crate::visualization::components::GraphNode;
use crate::visualization::constants::HIT_RADIUS_FACTOR;
use crate::visualization::picking::closest_hit;
use crate::visualization::resources::StoreRes;

/// Hit-test the cursor against visible nodes, then dispatch hover and click.
///
/// A node hit returns before the empty-space branch, so one click never
/// selects a node and clears the selection at once. Clicks over UI widgets
/// are left to the UI.
pub fn pointer_system(
    mut store: ResMut<StoreRes>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    node_query: Query<(&GraphNode, &GlobalTransform, &Visibility)>,
    ui_query: Query<&Interaction>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    let over_ui = ui_query.iter().any(|i| *i != Interaction::None);
    let hit = window
        .cursor_position()
        .filter(|_| !over_ui)
        .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor).ok())
        .and_then(|ray| {
            let targets = node_query
                .iter()
                .filter(|(_, _, visibility)| **visibility != Visibility::Hidden)
                .map(|(node, transform, _)| {
                    let (scale, _, center) = transform.to_scale_rotation_translation();
                    (node.id.as_str(), center, scale.x * HIT_RADIUS_FACTOR)
                });
            closest_hit(ray.origin, *ray.direction, targets)
        });

    // Avoid touching the store when nothing changed
    let hovered = store.0.hovered_node().map(|n| n.id.as_str());
    if hovered != hit {
        store.0.hover_node_by_id(hit);
    }

    if !mouse_button.just_pressed(MouseButton::Left) || over_ui {
        return;
    }

    if let Some(id) = hit {
        store.0.select_node_by_id(Some(id));
        return;
    }
    store.0.select_node(None);
}
