//! Keyboard shortcuts and the search field.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::visualization::constants::{step_rotation_speed, step_size_multiplier};
use crate::visualization::resources::{AppearanceRes, SearchMode, StoreRes};

/// What one key press does.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    EnterSearch,
    LeaveSearch,
    /// Leave search mode and clear the query.
    CancelSearch,
    Type(String),
    Backspace,
    ToggleLegend,
    RotationSpeed(f32),
    SizeMultiplier(f32),
    ClearSelection,
}

/// Map a logical key to an action given the current search mode.
pub fn key_action(key: &Key, searching: bool) -> Option<KeyAction> {
    if searching {
        return match key {
            Key::Enter => Some(KeyAction::LeaveSearch),
            Key::Escape => Some(KeyAction::CancelSearch),
            Key::Backspace => Some(KeyAction::Backspace),
            Key::Space => Some(KeyAction::Type(" ".to_string())),
            Key::Character(c) => Some(KeyAction::Type(c.to_string())),
            _ => None,
        };
    }

    match key {
        Key::Escape => Some(KeyAction::ClearSelection),
        Key::Character(c) => match c.as_str() {
            "/" => Some(KeyAction::EnterSearch),
            "l" | "L" => Some(KeyAction::ToggleLegend),
            "+" | "=" => Some(KeyAction::RotationSpeed(1.0)),
            "-" | "_" => Some(KeyAction::RotationSpeed(-1.0)),
            "]" => Some(KeyAction::SizeMultiplier(1.0)),
            "[" => Some(KeyAction::SizeMultiplier(-1.0)),
            _ => None,
        },
        _ => None,
    }
}

pub fn keyboard_system(
    mut key_events: EventReader<KeyboardInput>,
    mut search: ResMut<SearchMode>,
    mut store: ResMut<StoreRes>,
    mut appearance: ResMut<AppearanceRes>,
) {
    for ev in key_events.read() {
        if ev.state != ButtonState::Pressed {
            continue;
        }
        let Some(action) = key_action(&ev.logical_key, search.active) else {
            continue;
        };

        match action {
            KeyAction::EnterSearch => search.active = true,
            KeyAction::LeaveSearch => search.active = false,
            KeyAction::CancelSearch => {
                search.active = false;
                store.0.set_search_query("");
            }
            KeyAction::Type(text) => {
                let query = format!("{}{}", store.0.search_query(), text);
                store.0.set_search_query(query);
            }
            KeyAction::Backspace => {
                let mut query = store.0.search_query().to_string();
                if query.pop().is_some() {
                    store.0.set_search_query(query);
                }
            }
            KeyAction::ToggleLegend => {
                appearance.0.toggle_legend();
            }
            KeyAction::RotationSpeed(steps) => {
                let speed = step_rotation_speed(appearance.0.rotation_speed(), steps);
                appearance.0.set_rotation_speed(speed);
            }
            KeyAction::SizeMultiplier(steps) => {
                let multiplier = step_size_multiplier(appearance.0.node_size_multiplier(), steps);
                appearance.0.set_node_size_multiplier(multiplier);
            }
            KeyAction::ClearSelection => store.0.select_node(None),
        }
    }
}
