//! Colors and the built-in node type palette.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::NodeType;

/// An sRGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, AppError> {
        let invalid = || AppError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels as floats in `0.0..=1.0`.
    pub fn to_f32_array(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Color for node types without a palette entry.
pub const FALLBACK_COLOR: HexColor = HexColor::rgb(0x9e, 0x9e, 0x9e);

/// Built-in color per node type label.
pub static DEFAULT_NODE_COLORS: Lazy<BTreeMap<String, HexColor>> = Lazy::new(|| {
    NodeType::NAMED
        .iter()
        .map(|t| (t.label().to_string(), default_color(t)))
        .collect()
});

fn default_color(node_type: &NodeType) -> HexColor {
    match node_type {
        // Files
        NodeType::SourceFile => HexColor::rgb(0x60, 0x7d, 0x8b),
        NodeType::ConfigFile => HexColor::rgb(0x79, 0x55, 0x48),
        NodeType::FormFile => HexColor::rgb(0xff, 0x98, 0x00),
        // Code structures
        NodeType::Module => HexColor::rgb(0x4a, 0x90, 0xd9),
        NodeType::Class => HexColor::rgb(0x5c, 0xb8, 0x5c),
        NodeType::Interface => HexColor::rgb(0x9c, 0x27, 0xb0),
        NodeType::Trait => HexColor::rgb(0xab, 0x47, 0xbc),
        NodeType::Enum => HexColor::rgb(0xcd, 0xdc, 0x39),
        NodeType::Struct => HexColor::rgb(0x00, 0x96, 0x88),
        // Functions
        NodeType::Function => HexColor::rgb(0xff, 0xc1, 0x07),
        NodeType::Method => HexColor::rgb(0xff, 0xd5, 0x4f),
        NodeType::Constructor => HexColor::rgb(0xff, 0xb3, 0x00),
        NodeType::Destructor => HexColor::rgb(0xe6, 0x51, 0x00),
        // UI components
        NodeType::Component => HexColor::rgb(0x00, 0xbc, 0xd4),
        NodeType::Form => HexColor::rgb(0xff, 0x57, 0x22),
        NodeType::Page => HexColor::rgb(0x26, 0xc6, 0xda),
        NodeType::View => HexColor::rgb(0x4d, 0xd0, 0xe1),
        // Web/API
        NodeType::Route => HexColor::rgb(0xe9, 0x1e, 0x63),
        NodeType::Controller => HexColor::rgb(0xf4, 0x43, 0x36),
        NodeType::Middleware => HexColor::rgb(0xef, 0x53, 0x50),
        // Data
        NodeType::Model => HexColor::rgb(0x3f, 0x51, 0xb5),
        NodeType::Migration => HexColor::rgb(0x8d, 0x6e, 0x63),
        NodeType::Table => HexColor::rgb(0x8b, 0xc3, 0x4a),
        NodeType::Query => HexColor::rgb(0x66, 0xbb, 0x6a),
        // Other
        NodeType::Package => HexColor::rgb(0x78, 0x90, 0x9c),
        NodeType::Variable => HexColor::rgb(0xb0, 0xbe, 0xc5),
        NodeType::Constant => HexColor::rgb(0x90, 0xa4, 0xae),
        NodeType::Custom(_) => FALLBACK_COLOR,
    }
}
