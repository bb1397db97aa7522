//! ECS resources for viewer state.
//!
//! Resources are global singleton data - there's only one instance
//! of each resource in the entire app.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::visual_state::NodeVisualState;
use crate::appearance::AppearanceStore;
use crate::config::EdgeMode;
use crate::models::EdgeType;
use crate::store::{ChangeRecorder, GraphDelivery, GraphStore, StoreChange};

// =============================================================================
// Store Bridge
// =============================================================================

/// The graph store, owned by the render thread.
#[derive(Resource, Default)]
pub struct StoreRes(pub GraphStore);

/// Appearance settings. Bevy change detection drives restyling.
#[derive(Resource)]
pub struct AppearanceRes(pub AppearanceStore);

/// Queue filled by the store observer, drained once per frame.
#[derive(Resource)]
pub struct PendingChanges(pub ChangeRecorder);

/// One store change, re-broadcast to every interested system.
#[derive(Event, Debug, Clone)]
pub struct StoreChanged(pub StoreChange);

/// Graph handoff from the loader thread. Emptied once it resolves.
#[derive(Resource, Default)]
pub struct DeliveryRes(pub Option<GraphDelivery>);

/// Node id to select once the first graph is installed.
#[derive(Resource, Default)]
pub struct PendingSelection(pub Option<String>);

// =============================================================================
// Camera State
// =============================================================================

/// Orbit camera with damped motion toward goal values.
#[derive(Resource, Debug, Clone)]
pub struct CameraOrbit {
    /// Horizontal rotation angle (radians).
    pub yaw: f32,
    /// Vertical rotation angle (radians).
    pub pitch: f32,
    /// Distance from target.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    pub goal_yaw: f32,
    pub goal_pitch: f32,
    pub goal_distance: f32,
    pub goal_target: Vec3,
    /// Where `R` returns to.
    pub home_target: Vec3,
    pub home_distance: f32,
    /// Easing rate per second.
    pub damping: f32,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.3,
            distance: 25.0,
            target: Vec3::ZERO,
            goal_yaw: 0.0,
            goal_pitch: 0.3,
            goal_distance: 25.0,
            goal_target: Vec3::ZERO,
            home_target: Vec3::ZERO,
            home_distance: 25.0,
            damping: 8.0,
        }
    }
}

impl CameraOrbit {
    /// Set a new home and ease toward it.
    pub fn frame(&mut self, target: Vec3, distance: f32) {
        self.home_target = target;
        self.home_distance = distance;
        self.reset();
    }

    /// Ease back to the home view.
    pub fn reset(&mut self) {
        self.goal_yaw = 0.0;
        self.goal_pitch = 0.3;
        self.goal_distance = self.home_distance;
        self.goal_target = self.home_target;
    }
}

// =============================================================================
// Derived Render Data
// =============================================================================

/// Ids connected to the selected node through filtered edges.
#[derive(Resource, Default)]
pub struct SelectionNeighborhood {
    pub connected: HashSet<String>,
}

/// Edges to draw this frame: (source id, target id, type).
#[derive(Resource, Default)]
pub struct VisibleEdges(pub Vec<(String, String, EdgeType)>);

/// Set when node styling must be recomputed.
#[derive(Resource)]
pub struct NeedsRestyle(pub bool);

impl Default for NeedsRestyle {
    fn default() -> Self {
        Self(true)
    }
}

// =============================================================================
// Input State
// =============================================================================

/// Whether typed characters go to the search query.
#[derive(Resource, Default)]
pub struct SearchMode {
    pub active: bool,
}

// =============================================================================
// Settings
// =============================================================================

/// Render parameters from configuration.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RenderSettings {
    pub edge_mode: EdgeMode,
}

// =============================================================================
// Assets
// =============================================================================

/// Shared meshes.
#[derive(Resource)]
pub struct SceneMeshes {
    /// Unit sphere, scaled per node.
    pub node: Handle<Mesh>,
}

/// Node materials cached by (type label, visual state).
///
/// Cleared when appearance colors change.
#[derive(Resource, Default)]
pub struct NodeMaterials {
    pub cache: HashMap<(String, NodeVisualState), Handle<StandardMaterial>>,
}

impl NodeMaterials {
    pub fn get_or_create(
        &mut self,
        label: &str,
        state: NodeVisualState,
        base: Color,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.cache
            .entry((label.to_string(), state))
            .or_insert_with(|| {
                let [r, g, b] = base.to_srgba().to_f32_array_no_alpha();
                let glow = state.emissive();
                materials.add(StandardMaterial {
                    base_color: base,
                    metallic: 0.3,
                    perceptual_roughness: 0.5,
                    reflectance: 0.3,
                    emissive: LinearRgba::new(r * glow, g * glow, b * glow, 1.0),
                    ..default()
                })
            })
            .clone()
    }
}
