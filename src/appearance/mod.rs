//! Persisted visual configuration: per-type colors, legend visibility,
//! scene rotation speed and node size multiplier.
//!
//! The store is independent of any loaded graph. Every mutation writes the
//! whole record through a [`SettingsStorage`]; write failures are logged and
//! never fatal. A missing or unreadable record yields the built-in defaults.

pub mod palette;
pub mod storage;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::NodeType;

pub use palette::{HexColor, DEFAULT_NODE_COLORS, FALLBACK_COLOR};
pub use storage::{FileStorage, MemoryStorage, SettingsStorage};

/// Storage key of the appearance record.
pub const SETTINGS_KEY: &str = "appearance-settings";

/// Current record layout version.
pub const SETTINGS_VERSION: u32 = 1;

pub const DEFAULT_ROTATION_SPEED: f32 = 0.05;
pub const DEFAULT_NODE_SIZE_MULTIPLIER: f32 = 1.0;

/// The persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    pub version: u32,
    pub node_colors: BTreeMap<String, HexColor>,
    pub show_legend: bool,
    pub rotation_speed: f32,
    pub node_size_multiplier: f32,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            node_colors: DEFAULT_NODE_COLORS.clone(),
            show_legend: true,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            node_size_multiplier: DEFAULT_NODE_SIZE_MULTIPLIER,
        }
    }
}

impl AppearanceSettings {
    /// Decode a stored payload. Unknown versions are rejected.
    pub fn decode(payload: &str) -> Result<Self, AppError> {
        let settings: Self = serde_json::from_str(payload)?;
        if settings.version != SETTINGS_VERSION {
            return Err(AppError::Settings(format!(
                "unsupported appearance record version {}",
                settings.version
            )));
        }
        Ok(settings)
    }

    pub fn encode(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Appearance state bound to a storage backend.
pub struct AppearanceStore {
    settings: AppearanceSettings,
    storage: Box<dyn SettingsStorage>,
}

impl std::fmt::Debug for AppearanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppearanceStore")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl AppearanceStore {
    /// Load the last persisted record, or defaults if there is none or it
    /// cannot be read.
    pub fn open(storage: impl SettingsStorage + 'static) -> Self {
        let settings = match storage.load(SETTINGS_KEY) {
            Ok(Some(payload)) => match AppearanceSettings::decode(&payload) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable appearance settings");
                    AppearanceSettings::default()
                }
            },
            Ok(None) => AppearanceSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read appearance settings");
                AppearanceSettings::default()
            }
        };

        Self {
            settings,
            storage: Box::new(storage),
        }
    }

    pub fn settings(&self) -> &AppearanceSettings {
        &self.settings
    }

    // ---- Colors ----

    /// Display color for a node type.
    pub fn color_for(&self, node_type: &NodeType) -> HexColor {
        self.color_for_label(node_type.label())
    }

    pub fn color_for_label(&self, label: &str) -> HexColor {
        self.settings
            .node_colors
            .get(label)
            .copied()
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn node_colors(&self) -> &BTreeMap<String, HexColor> {
        &self.settings.node_colors
    }

    pub fn set_color(&mut self, node_type: &NodeType, color: HexColor) {
        let label = node_type.label().to_string();
        if self.settings.node_colors.get(&label) == Some(&color) {
            return;
        }
        tracing::debug!(node_type = %label, %color, "Node color changed");
        self.settings.node_colors.insert(label, color);
        self.persist();
    }

    /// Parse `color` and apply it to the type named `label`.
    pub fn set_node_color(&mut self, label: &str, color: &str) -> Result<(), AppError> {
        let color = HexColor::parse(color)?;
        self.set_color(&NodeType::from(label), color);
        Ok(())
    }

    pub fn reset_colors(&mut self) {
        self.settings.node_colors = DEFAULT_NODE_COLORS.clone();
        self.persist();
    }

    /// Restore every setting to its default.
    pub fn reset(&mut self) {
        self.settings = AppearanceSettings::default();
        self.persist();
    }

    // ---- Display ----

    pub fn show_legend(&self) -> bool {
        self.settings.show_legend
    }

    pub fn set_show_legend(&mut self, show: bool) {
        if self.settings.show_legend != show {
            self.settings.show_legend = show;
            self.persist();
        }
    }

    pub fn toggle_legend(&mut self) -> bool {
        let show = !self.settings.show_legend;
        self.set_show_legend(show);
        show
    }

    pub fn rotation_speed(&self) -> f32 {
        self.settings.rotation_speed
    }

    /// No range limit is applied here; callers clamp.
    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.settings.rotation_speed = speed;
        self.persist();
    }

    pub fn node_size_multiplier(&self) -> f32 {
        self.settings.node_size_multiplier
    }

    /// No range limit is applied here; callers clamp.
    pub fn set_node_size_multiplier(&mut self, multiplier: f32) {
        self.settings.node_size_multiplier = multiplier;
        self.persist();
    }

    /// Write the current record, reporting failures.
    pub fn flush(&self) -> Result<(), AppError> {
        self.storage.save(SETTINGS_KEY, &self.settings.encode()?)
    }

    /// Flush the final record.
    pub fn close(self) -> Result<(), AppError> {
        self.flush()
    }

    fn persist(&self) {
        let result = self
            .settings
            .encode()
            .and_then(|payload| self.storage.save(SETTINGS_KEY, &payload));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist appearance settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let store = AppearanceStore::open(MemoryStorage::new());
        assert_eq!(store.settings(), &AppearanceSettings::default());
        assert!(store.show_legend());
    }

    #[test]
    fn test_corrupt_payload_falls_back() {
        let storage = MemoryStorage::new();
        storage.save(SETTINGS_KEY, "{not json").unwrap();
        let store = AppearanceStore::open(storage);
        assert_eq!(store.settings(), &AppearanceSettings::default());
    }

    #[test]
    fn test_unknown_version_falls_back() {
        let storage = MemoryStorage::new();
        let mut record = AppearanceSettings::default();
        record.version = 99;
        record.show_legend = false;
        storage.save(SETTINGS_KEY, &record.encode().unwrap()).unwrap();
        let store = AppearanceStore::open(storage);
        assert!(store.show_legend());
    }

    #[test]
    fn test_mutation_persists_immediately() {
        let storage = MemoryStorage::new();
        let mut store = AppearanceStore::open(storage.clone());
        store.set_rotation_speed(0.7);
        store.set_node_color("class", "#ABCDEF").unwrap();

        let reopened = AppearanceStore::open(storage);
        assert_eq!(reopened.rotation_speed(), 0.7);
        assert_eq!(
            reopened.color_for(&NodeType::Class),
            HexColor::rgb(0xab, 0xcd, 0xef)
        );
    }

    #[test]
    fn test_invalid_color_rejected_without_change() {
        let mut store = AppearanceStore::open(MemoryStorage::new());
        let before = store.color_for(&NodeType::Class);
        assert!(store.set_node_color("class", "blue").is_err());
        assert_eq!(store.color_for(&NodeType::Class), before);
    }

    #[test]
    fn test_reset_colors() {
        let mut store = AppearanceStore::open(MemoryStorage::new());
        store.set_color(&NodeType::Route, HexColor::rgb(0, 0, 0));
        store.reset_colors();
        assert_eq!(store.node_colors(), &*DEFAULT_NODE_COLORS);
    }

    #[test]
    fn test_custom_type_color() {
        let mut store = AppearanceStore::open(MemoryStorage::new());
        let custom = NodeType::from("widget");
        assert_eq!(store.color_for(&custom), FALLBACK_COLOR);
        store.set_color(&custom, HexColor::rgb(1, 2, 3));
        assert_eq!(store.color_for(&custom), HexColor::rgb(1, 2, 3));
    }

    #[test]
    fn test_no_range_limit() {
        let mut store = AppearanceStore::open(MemoryStorage::new());
        store.set_node_size_multiplier(-3.0);
        assert_eq!(store.node_size_multiplier(), -3.0);
    }

    #[test]
    fn test_toggle_legend() {
        let mut store = AppearanceStore::open(MemoryStorage::new());
        assert!(!store.toggle_legend());
        assert!(store.toggle_legend());
    }
}
