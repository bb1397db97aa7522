//! Camera orbit, pan, zoom and scene auto-rotation.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::visualization::components::GraphRoot;
use crate::visualization::resources::{AppearanceRes, CameraOrbit, SearchMode};

/// Calculate camera position from orbit parameters.
pub fn calculate_camera_position(orbit: &CameraOrbit) -> Vec3 {
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    orbit.target + Vec3::new(x, y, z)
}

/// Fraction of the remaining distance to cover this frame.
pub fn damping_factor(damping: f32, dt: f32) -> f32 {
    1.0 - (-damping * dt).exp()
}

/// Rotation added this frame for a speed in radians per second.
pub fn rotation_step(speed: f32, dt: f32) -> f32 {
    speed * dt
}

/// Camera input: updates goal values only.
///
/// Controls:
/// - Right-click drag: Orbit around target
/// - Middle-click drag (or Alt+right-click): Pan
/// - Scroll wheel: Zoom
/// - WASD: Pan horizontally
/// - Q/E: Pan vertically
/// - R: Reset view
pub fn camera_input_system(
    mut orbit: ResMut<CameraOrbit>,
    search: Res<SearchMode>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
) {
    let alt_held = keyboard.pressed(KeyCode::AltLeft) || keyboard.pressed(KeyCode::AltRight);
    let orbiting = mouse_button.pressed(MouseButton::Right) && !alt_held;
    let panning = mouse_button.pressed(MouseButton::Middle)
        || (mouse_button.pressed(MouseButton::Right) && alt_held);

    for ev in mouse_motion.read() {
        if orbiting {
            orbit.goal_yaw -= ev.delta.x * 0.01;
            orbit.goal_pitch = (orbit.goal_pitch + ev.delta.y * 0.01).clamp(-1.5, 1.5);
        } else if panning {
            let right = Vec3::new(orbit.yaw.cos(), 0.0, -orbit.yaw.sin());
            let scale = orbit.distance * 0.002;
            orbit.goal_target += right * ev.delta.x * scale;
            orbit.goal_target.y -= ev.delta.y * scale;
        }
    }

    for ev in scroll.read() {
        orbit.goal_distance = (orbit.goal_distance - ev.y).clamp(2.0, 200.0);
    }

    // Typed characters belong to the search field
    if search.active {
        return;
    }

    let pan_speed = 0.2;
    let forward = Vec3::new(orbit.yaw.sin(), 0.0, orbit.yaw.cos());
    let right = Vec3::new(orbit.yaw.cos(), 0.0, -orbit.yaw.sin());

    if keyboard.pressed(KeyCode::KeyW) {
        orbit.goal_target -= forward * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        orbit.goal_target += forward * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        orbit.goal_target -= right * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        orbit.goal_target += right * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        orbit.goal_target.y -= pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        orbit.goal_target.y += pan_speed;
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        orbit.reset();
    }
}

/// Ease the rig toward its goals and update the camera transform.
pub fn camera_damping_system(
    time: Res<Time>,
    mut orbit: ResMut<CameraOrbit>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    let k = damping_factor(orbit.damping, time.delta_secs());
    orbit.yaw += (orbit.goal_yaw - orbit.yaw) * k;
    orbit.pitch += (orbit.goal_pitch - orbit.pitch) * k;
    orbit.distance += (orbit.goal_distance - orbit.distance) * k;
    let target = orbit.target.lerp(orbit.goal_target, k);
    orbit.target = target;

    if let Ok(mut transform) = camera_query.get_single_mut() {
        let pos = calculate_camera_position(&orbit);
        *transform = Transform::from_translation(pos).looking_at(orbit.target, Vec3::Y);
    }
}

/// Spin the graph group by the configured rotation speed.
pub fn auto_rotate_system(
    time: Res<Time>,
    appearance: Res<AppearanceRes>,
    mut root_query: Query<(&mut GraphRoot, &mut Transform)>,
) {
    let step = rotation_step(appearance.0.rotation_speed(), time.delta_secs());
    if step == 0.0 {
        return;
    }
    for (mut root, mut transform) in root_query.iter_mut() {
        root.angle = (root.angle + step).rem_euclid(std::f32::consts::TAU);
        transform.rotation = Quat::from_rotation_y(root.angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damping_factor_bounds() {
        assert_eq!(damping_factor(8.0, 0.0), 0.0);
        let k = damping_factor(8.0, 1.0 / 60.0);
        assert!(k > 0.0 && k < 1.0);
        assert!(damping_factor(8.0, 10.0) > 0.999);
    }

    #[test]
    fn test_damping_is_frame_rate_independent() {
        // Two half steps cover the same ground as one full step.
        let full = damping_factor(5.0, 0.1);
        let half = damping_factor(5.0, 0.05);
        let two_halves = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((full - two_halves).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_step_additive() {
        let one = rotation_step(0.5, 1.0);
        let many: f32 = (0..60).map(|_| rotation_step(0.5, 1.0 / 60.0)).sum();
        assert!((one - many).abs() < 1e-4);
    }

    #[test]
    fn test_camera_position_distance() {
        let orbit = CameraOrbit {
            yaw: 0.7,
            pitch: 0.2,
            distance: 12.0,
            target: Vec3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let pos = calculate_camera_position(&orbit);
        assert!((pos.distance(orbit.target) - 12.0).abs() < 1e-4);
    }
}
