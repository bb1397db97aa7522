//! Visual constants for the scene.

use bevy::prelude::*;

use crate::models::EdgeType;

// =============================================================================
// Edge Colors by Type
// =============================================================================

/// Structural edges (contains, belongs_to, defines).
pub const COLOR_STRUCTURAL: Color = Color::srgb(0.6, 0.4, 0.8);
/// Calls.
pub const COLOR_CALLS: Color = Color::srgb(1.0, 0.5, 0.3);
/// Includes, file pairs and references.
pub const COLOR_IMPORTS: Color = Color::srgb(0.9, 0.7, 0.2);
/// Extends and implements.
pub const COLOR_INHERITANCE: Color = Color::srgb(0.8, 0.3, 0.5);
/// Instantiates and uses.
pub const COLOR_USES: Color = Color::srgb(0.5, 0.8, 0.4);
/// Web and data relations.
pub const COLOR_FLOW: Color = Color::srgb(0.3, 0.7, 0.9);
/// Default edge color.
pub const COLOR_EDGE_DEFAULT: Color = Color::srgb(0.6, 0.6, 0.6);

// =============================================================================
// UI Colors
// =============================================================================

pub const COLOR_BACKGROUND: Color = Color::srgb(0.1, 0.1, 0.12);
pub const COLOR_PANEL: Color = Color::srgba(0.1, 0.1, 0.15, 0.9);
pub const COLOR_TEXT: Color = Color::srgb(0.85, 0.85, 0.85);
pub const COLOR_TEXT_DIM: Color = Color::srgb(0.5, 0.5, 0.5);
pub const COLOR_RING: Color = Color::srgb(1.0, 1.0, 1.0);

// =============================================================================
// Node Sizing
// =============================================================================

/// Scene radius per unit of node size.
pub const RADIUS_PER_SIZE: f32 = 0.1;
/// Minimum node radius regardless of size.
pub const MIN_NODE_RADIUS: f32 = 0.15;
/// Maximum node radius regardless of size.
pub const MAX_NODE_RADIUS: f32 = 1.2;
/// Hit radius relative to the drawn radius.
pub const HIT_RADIUS_FACTOR: f32 = 1.8;

// =============================================================================
// Keyboard Steps
// =============================================================================

pub const ROTATION_SPEED_STEP: f32 = 0.05;
pub const MAX_ROTATION_SPEED: f32 = 2.0;
pub const SIZE_MULTIPLIER_STEP: f32 = 0.25;
pub const MIN_SIZE_MULTIPLIER: f32 = 0.25;
pub const MAX_SIZE_MULTIPLIER: f32 = 4.0;

// =============================================================================
// Helpers
// =============================================================================

/// Get color for an edge type.
pub fn edge_color(edge_type: &EdgeType) -> Color {
    match edge_type {
        EdgeType::Contains | EdgeType::BelongsTo | EdgeType::Defines => COLOR_STRUCTURAL,
        EdgeType::Calls => COLOR_CALLS,
        EdgeType::Includes | EdgeType::FilePair | EdgeType::References => COLOR_IMPORTS,
        EdgeType::Extends | EdgeType::Implements => COLOR_INHERITANCE,
        EdgeType::Instantiates | EdgeType::Uses => COLOR_USES,
        EdgeType::Routes
        | EdgeType::Renders
        | EdgeType::QueriesTable
        | EdgeType::HasRelation => COLOR_FLOW,
        EdgeType::Custom(_) => COLOR_EDGE_DEFAULT,
    }
}

/// Drawn radius for a node of the given size.
pub fn node_radius(size: u8) -> f32 {
    (RADIUS_PER_SIZE * size as f32).clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS)
}

/// Rotation speed after one `+`/`-` step, clamped by the viewer.
pub fn step_rotation_speed(current: f32, steps: f32) -> f32 {
    (current + steps * ROTATION_SPEED_STEP).clamp(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED)
}

/// Size multiplier after one `[`/`]` step, clamped by the viewer.
pub fn step_size_multiplier(current: f32, steps: f32) -> f32 {
    (current + steps * SIZE_MULTIPLIER_STEP).clamp(MIN_SIZE_MULTIPLIER, MAX_SIZE_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_radius_clamped() {
        assert_eq!(node_radius(0), MIN_NODE_RADIUS);
        assert!((node_radius(4) - 0.4).abs() < 1e-6);
        assert_eq!(node_radius(200), MAX_NODE_RADIUS);
    }

    #[test]
    fn test_steps_clamp() {
        assert_eq!(step_size_multiplier(MAX_SIZE_MULTIPLIER, 1.0), MAX_SIZE_MULTIPLIER);
        assert_eq!(step_size_multiplier(1.0, -1.0), 0.75);
        assert_eq!(step_rotation_speed(-MAX_ROTATION_SPEED, -1.0), -MAX_ROTATION_SPEED);
    }

    #[test]
    fn test_custom_edge_color() {
        assert_eq!(edge_color(&EdgeType::from("wires")), COLOR_EDGE_DEFAULT);
    }
}
