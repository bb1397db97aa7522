//! Scene setup: camera, lights, the graph root and the UI skeleton.

use bevy::prelude::*;
use bevy::ui::PositionType;

use crate::visualization::components::{
    FloatingLabel, GraphRoot, InfoPanelText, LabelRole, LegendPanel, SelectionRing, StatusText,
};
use crate::visualization::constants::{COLOR_PANEL, COLOR_RING, COLOR_TEXT};
use crate::visualization::resources::{CameraOrbit, SceneMeshes};
use crate::visualization::systems::camera::calculate_camera_position;

/// Setup the scene with camera, lighting and UI panels.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orbit: Res<CameraOrbit>,
) {
    // Camera
    let camera_pos = calculate_camera_position(&orbit);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera_pos).looking_at(orbit.target, Vec3::Y),
    ));

    // Main directional light (sun-like)
    commands.spawn((
        DirectionalLight {
            illuminance: 20000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Secondary fill light from opposite side
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-8.0, 10.0, -8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    commands.insert_resource(SceneMeshes {
        node: meshes.add(Sphere::new(1.0).mesh().uv(32, 18)),
    });

    // Graph group with the selection ring inside it, so both rotate together
    let ring_material = materials.add(StandardMaterial {
        base_color: COLOR_RING,
        emissive: LinearRgba::new(1.5, 1.5, 1.5, 1.0),
        unlit: true,
        ..default()
    });
    commands
        .spawn((GraphRoot::default(), Transform::default(), Visibility::default()))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Torus::new(0.9, 1.0))),
                MeshMaterial3d(ring_material),
                Transform::default(),
                Visibility::Hidden,
                SelectionRing,
            ));
        });

    // Floating labels for the selected and hovered nodes
    for role in [LabelRole::Selected, LabelRole::Hovered] {
        commands.spawn((
            Text::new(""),
            TextFont {
                font_size: if role == LabelRole::Selected { 14.0 } else { 12.0 },
                ..default()
            },
            TextColor(COLOR_TEXT),
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            FloatingLabel { role },
        ));
    }

    // Info panel on the left
    commands
        .spawn((
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                width: Val::Px(300.0),
                min_height: Val::Px(100.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(COLOR_PANEL),
            BorderRadius::all(Val::Px(8.0)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Node Info"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));
            parent.spawn((
                Text::new("No graph loaded"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
                InfoPanelText,
            ));
        });

    // Legend on the right, filled once a graph arrives
    commands.spawn((
        bevy::ui::Node {
            position_type: PositionType::Absolute,
            right: Val::Px(10.0),
            top: Val::Px(10.0),
            padding: UiRect::all(Val::Px(10.0)),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        },
        BackgroundColor(COLOR_PANEL),
        BorderRadius::all(Val::Px(6.0)),
        LegendPanel,
    ));

    // Status line at the bottom
    commands.spawn((
        Text::new("No graph loaded"),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(COLOR_TEXT),
        bevy::ui::Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        StatusText,
    ));
}
