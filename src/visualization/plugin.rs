//! Viewer plugin for Bevy.

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use std::sync::Mutex;

use super::resources::{
    AppearanceRes, CameraOrbit, DeliveryRes, NeedsRestyle, NodeMaterials, PendingChanges,
    PendingSelection, RenderSettings, SearchMode, SelectionNeighborhood, StoreChanged, StoreRes,
    VisibleEdges,
};
use super::setup::setup_scene;
use super::systems;
use crate::appearance::AppearanceStore;
use crate::config::RenderConfig;
use crate::store::{ChangeRecorder, GraphDelivery, GraphStore};

/// Plugin that wires the store, appearance settings and scene systems.
///
/// Owned values sit behind `Mutex<Option<...>>` so `build()` (which takes
/// `&self`) can move them into resources.
pub struct VisualizationPlugin {
    pub render: RenderConfig,
    pub appearance: Mutex<Option<AppearanceStore>>,
    pub delivery: Mutex<Option<GraphDelivery>>,
    /// Node to select once the graph arrives.
    pub initial_selection: Option<String>,
}

impl VisualizationPlugin {
    pub fn new(
        render: RenderConfig,
        appearance: AppearanceStore,
        delivery: GraphDelivery,
        initial_selection: Option<String>,
    ) -> Self {
        Self {
            render,
            appearance: Mutex::new(Some(appearance)),
            delivery: Mutex::new(Some(delivery)),
            initial_selection,
        }
    }
}

fn take<T>(slot: &Mutex<Option<T>>) -> Option<T> {
    match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        let recorder = ChangeRecorder::new();
        let mut store = GraphStore::new();
        store.subscribe(recorder.clone());

        if let Some(appearance) = take(&self.appearance) {
            app.insert_resource(AppearanceRes(appearance));
        }

        // Only insert CameraOrbit if not already set (allows pre-configuration)
        app.init_resource::<CameraOrbit>()
            .insert_resource(StoreRes(store))
            .insert_resource(PendingChanges(recorder))
            .insert_resource(DeliveryRes(take(&self.delivery)))
            .insert_resource(PendingSelection(self.initial_selection.clone()))
            .insert_resource(RenderSettings {
                edge_mode: self.render.edge_mode,
            })
            .init_resource::<SearchMode>()
            .init_resource::<SelectionNeighborhood>()
            .init_resource::<VisibleEdges>()
            .init_resource::<NeedsRestyle>()
            .init_resource::<NodeMaterials>()
            .add_event::<StoreChanged>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    // Input mutates the store
                    (
                        systems::legend_click_system,
                        systems::keyboard_system,
                        systems::pointer_system,
                        systems::poll_delivery_system,
                    )
                        .chain(),
                    // Store changes flow to the scene
                    (
                        systems::drain_store_changes_system,
                        systems::rebuild_scene_system,
                        systems::restyle_nodes_system,
                    )
                        .chain(),
                    (
                        systems::rebuild_legend_system,
                        systems::legend_style_system,
                        systems::update_info_panel_system,
                        systems::update_status_system,
                    ),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::camera_input_system,
                    systems::camera_damping_system,
                    systems::auto_rotate_system,
                )
                    .chain(),
            )
            .add_systems(
                PostUpdate,
                (
                    systems::orient_ring_system,
                    systems::update_labels_system,
                    systems::draw_edges_system,
                )
                    .after(TransformSystem::TransformPropagate),
            )
            .add_systems(Last, systems::flush_settings_on_exit_system);
    }
}
