//! 3D Graph Viewer
//!
//! Renders the filtered graph with Bevy and forwards picking and keyboard
//! input to the store.
//!
//! ## Module Structure
//!
//! - `components` - ECS components for nodes, ring, labels and panels
//! - `resources` - ECS resources (store bridge, camera, caches)
//! - `visual_state` - Per-node visual state and edge selection (pure)
//! - `picking` - Ray hit testing (pure)
//! - `systems` - ECS systems (camera, input, interaction, scene, UI)
//! - `setup` - Scene initialization
//! - `plugin` - Bevy plugin definition
//! - `constants` - Colors, sizes, and other constants

mod components;
mod constants;
mod picking;
mod plugin;
mod resources;
mod setup;
mod systems;
pub mod visual_state;

pub use picking::closest_hit;
pub use plugin::VisualizationPlugin;

use bevy::prelude::*;

use crate::appearance::AppearanceStore;
use crate::config::Config;
use crate::store::GraphDelivery;
use constants::COLOR_BACKGROUND;
use resources::CameraOrbit;

/// Open the viewer and install the graph from `delivery` when it arrives.
///
/// Blocks until the window is closed.
pub fn run_visualizer(
    config: &Config,
    appearance: AppearanceStore,
    delivery: GraphDelivery,
    initial_selection: Option<String>,
) {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window.title.clone(),
                        resolution: (config.window.width, config.window.height).into(),
                        ..default()
                    }),
                    ..default()
                })
                // The binary already installed a tracing subscriber
                .disable::<bevy::log::LogPlugin>(),
        )
        .insert_resource(ClearColor(COLOR_BACKGROUND))
        .insert_resource(CameraOrbit {
            damping: config.render.damping,
            ..default()
        })
        .add_plugins(VisualizationPlugin::new(
            config.render.clone(),
            appearance,
            delivery,
            initial_selection,
        ))
        .run();
}
