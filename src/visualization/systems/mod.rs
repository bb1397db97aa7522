//! ECS systems for the viewer.
//!
//! Systems are functions that operate on components and resources each frame.

pub mod camera;
pub mod input;
pub mod interaction;
pub mod scene;
pub mod ui;

pub use camera::{auto_rotate_system, camera_damping_system, camera_input_system};
pub use input::keyboard_system;
pub use interaction::pointer_system;
pub use scene::{
    draw_edges_system, drain_store_changes_system, flush_settings_on_exit_system,
    orient_ring_system, poll_delivery_system, rebuild_scene_system, restyle_nodes_system,
};
pub use ui::{
    legend_click_system, legend_style_system, rebuild_legend_system, update_info_panel_system,
    update_labels_system, update_status_system,
};
