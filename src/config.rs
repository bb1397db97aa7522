//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `~/.config/codeorbit/config.toml` (XDG) or platform config dir
//! 3. Project config: `.codeorbit.toml`
//! 4. Environment variables: `CODEORBIT_*` (nested keys split on `__`)
//!
//! # Example
//!
//! ```toml
//! [layout]
//! policy = "grid"
//! spacing = 3.0
//!
//! [render]
//! edge_mode = "selected"
//! damping = 8.0
//!
//! [settings]
//! dir = "/home/me/.local/share/codeorbit"
//! ```

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::layout::LayoutPolicy;

/// Directory name used under the user config dir.
pub const APP_DIR: &str = "codeorbit";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub settings: SettingsConfig,
}

/// Node placement parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub policy: LayoutPolicy,
    /// Minimum sphere radius for the spherical policy.
    pub radius: f64,
    /// Distance between neighbouring nodes.
    pub spacing: f64,
    /// Width of the index-seeded jitter band.
    pub jitter: f64,
    /// Relaxation steps for the force policy.
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            policy: LayoutPolicy::Spherical,
            radius: 8.0,
            spacing: 2.5,
            jitter: 1.5,
            iterations: 500,
        }
    }
}

/// Viewer window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "CodeOrbit".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Which edges the scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Only filtered edges touching the selected node.
    #[default]
    Selected,
    /// Every filtered edge.
    AllFiltered,
}

/// Scene rendering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub edge_mode: EdgeMode,
    /// Orbit camera damping rate (per second). Higher settles faster.
    pub damping: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            edge_mode: EdgeMode::Selected,
            damping: 8.0,
        }
    }
}

/// Where the appearance record is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Overrides the platform config directory.
    pub dir: Option<PathBuf>,
}

impl SettingsConfig {
    /// Directory holding persisted settings records.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            // User config
            .merge(Toml::file(Self::user_config_path()))
            // Project config
            .merge(Toml::file(".codeorbit.toml"))
            // Environment variables (highest priority)
            .merge(Env::prefixed("CODEORBIT_").split("__"))
    }

    /// User config path: ~/.config/codeorbit/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join(APP_DIR).join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join(APP_DIR).join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_extract() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(config.layout.policy, LayoutPolicy::Spherical);
        assert_eq!(config.render.edge_mode, EdgeMode::Selected);
        assert!(config.settings.dir.is_none());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                "[layout]\npolicy = \"grid\"\n[render]\nedge_mode = \"all_filtered\"\n",
            ))
            .extract()
            .unwrap();
        assert_eq!(config.layout.policy, LayoutPolicy::Grid);
        assert_eq!(config.layout.spacing, 2.5);
        assert_eq!(config.render.edge_mode, EdgeMode::AllFiltered);
        assert_eq!(config.window.width, 1280.0);
    }

    #[test]
    fn test_settings_dir_override() {
        let settings = SettingsConfig {
            dir: Some(PathBuf::from("/tmp/orbit")),
        };
        assert_eq!(settings.resolved_dir(), PathBuf::from("/tmp/orbit"));
    }
}
