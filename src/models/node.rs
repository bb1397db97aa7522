//! Node model representing a source-code entity in the graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of source-code entity a node stands for.
///
/// Serialized as its plain snake_case label. Labels the enumeration does not
/// know are kept verbatim in [`NodeType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    // Files
    SourceFile,
    ConfigFile,
    FormFile,

    // Code structures
    Module,
    Class,
    Interface,
    Trait,
    Enum,
    Struct,

    // Functions
    Function,
    Method,
    Constructor,
    Destructor,

    // UI components
    Component,
    Form,
    Page,
    View,

    // Web/API
    Route,
    Controller,
    Middleware,

    // Data
    Model,
    Migration,
    Table,
    Query,

    // Other
    Package,
    Variable,
    Constant,
    Custom(String),
}

impl NodeType {
    /// Every named variant, in declaration order.
    pub const NAMED: [NodeType; 27] = [
        NodeType::SourceFile,
        NodeType::ConfigFile,
        NodeType::FormFile,
        NodeType::Module,
        NodeType::Class,
        NodeType::Interface,
        NodeType::Trait,
        NodeType::Enum,
        NodeType::Struct,
        NodeType::Function,
        NodeType::Method,
        NodeType::Constructor,
        NodeType::Destructor,
        NodeType::Component,
        NodeType::Form,
        NodeType::Page,
        NodeType::View,
        NodeType::Route,
        NodeType::Controller,
        NodeType::Middleware,
        NodeType::Model,
        NodeType::Migration,
        NodeType::Table,
        NodeType::Query,
        NodeType::Package,
        NodeType::Variable,
        NodeType::Constant,
    ];

    /// The type label used for filtering, colors and serialization.
    pub fn label(&self) -> &str {
        match self {
            NodeType::SourceFile => "source_file",
            NodeType::ConfigFile => "config_file",
            NodeType::FormFile => "form_file",
            NodeType::Module => "module",
            NodeType::Class => "class",
            NodeType::Interface => "interface",
            NodeType::Trait => "trait",
            NodeType::Enum => "enum",
            NodeType::Struct => "struct",
            NodeType::Function => "function",
            NodeType::Method => "method",
            NodeType::Constructor => "constructor",
            NodeType::Destructor => "destructor",
            NodeType::Component => "component",
            NodeType::Form => "form",
            NodeType::Page => "page",
            NodeType::View => "view",
            NodeType::Route => "route",
            NodeType::Controller => "controller",
            NodeType::Middleware => "middleware",
            NodeType::Model => "model",
            NodeType::Migration => "migration",
            NodeType::Table => "table",
            NodeType::Query => "query",
            NodeType::Package => "package",
            NodeType::Variable => "variable",
            NodeType::Constant => "constant",
            NodeType::Custom(label) => label,
        }
    }

    /// Whether this is the free-text escape variant.
    pub fn is_custom(&self) -> bool {
        matches!(self, NodeType::Custom(_))
    }
}

impl Default for NodeType {
    fn default() -> Self {
        NodeType::SourceFile
    }
}

impl From<&str> for NodeType {
    fn from(label: &str) -> Self {
        NodeType::NAMED
            .iter()
            .find(|t| t.label() == label)
            .cloned()
            .unwrap_or_else(|| NodeType::Custom(label.to_string()))
    }
}

impl From<String> for NodeType {
    fn from(label: String) -> Self {
        NodeType::from(label.as_str())
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Custom(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Review status a parser or user can attach to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Ok,
    Review,
    Deprecated,
    Critical,
    Todo,
}

/// 3D position in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Smallest visual size a node can carry.
pub const MIN_NODE_SIZE: u8 = 1;
/// Largest visual size a node can carry.
pub const MAX_NODE_SIZE: u8 = 12;
/// Size given to nodes built without an explicit one.
pub const DEFAULT_NODE_SIZE: u8 = 4;

fn default_size() -> u8 {
    DEFAULT_NODE_SIZE
}

/// A graph vertex: a file, module, class, form, table, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, stable across reloads. Opaque to the core.
    pub id: String,
    /// Entity kind.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Short display name.
    pub name: String,
    /// Fully addressable name (path or namespaced name). Not unique.
    #[serde(default)]
    pub qualified_name: String,
    /// Visual size, roughly 1..=12.
    #[serde(default = "default_size")]
    pub size: u8,
    /// Source language or framework tag.
    #[serde(default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<u32>,
    /// Assigned by the layout engine when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Parser-specific extras.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            node_type,
            qualified_name: name.clone(),
            name,
            size: DEFAULT_NODE_SIZE,
            language: String::new(),
            file_path: None,
            line_start: None,
            line_end: None,
            position: None,
            metadata: Map::new(),
        }
    }

    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }

    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_language(mut self, lang: &str) -> Self {
        self.language = lang.to_string();
        self
    }

    /// Sets the visual size, clamped to `1..=12`.
    pub fn with_size(mut self, size: u8) -> Self {
        self.size = size.clamp(MIN_NODE_SIZE, MAX_NODE_SIZE);
        self
    }

    pub fn with_lines(mut self, start: u32, end: u32) -> Self {
        self.line_start = Some(start);
        self.line_end = Some(end);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Type label, shorthand for `node_type.label()`.
    pub fn type_label(&self) -> &str {
        self.node_type.label()
    }

    /// Case-insensitive substring match on name, qualified name or file path.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self.qualified_name.to_lowercase().contains(needle)
            || self
                .file_path
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(needle))
    }

    pub fn status(&self) -> Option<NodeStatus> {
        self.metadata
            .get("status")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn visibility(&self) -> Option<&str> {
        self.metadata.get("visibility").and_then(Value::as_str)
    }

    pub fn documentation(&self) -> Option<&str> {
        self.metadata.get("documentation").and_then(Value::as_str)
    }

    pub fn tags(&self) -> Vec<&str> {
        self.metadata
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_label_roundtrip() {
        for t in NodeType::NAMED.iter() {
            assert_eq!(&NodeType::from(t.label()), t);
        }
        assert_eq!(
            NodeType::from("blade_directive"),
            NodeType::Custom("blade_directive".to_string())
        );
    }

    #[test]
    fn test_custom_with_known_label_normalizes() {
        let t: NodeType = serde_json::from_str("\"module\"").unwrap();
        assert_eq!(t, NodeType::Module);
        let json = serde_json::to_string(&NodeType::Custom("livewire".into())).unwrap();
        assert_eq!(json, "\"livewire\"");
    }

    #[test]
    fn test_node_deserialize_minimal() {
        let node: Node =
            serde_json::from_str(r#"{"id":"n1","type":"module","name":"Main"}"#).unwrap();
        assert_eq!(node.node_type, NodeType::Module);
        assert_eq!(node.size, DEFAULT_NODE_SIZE);
        assert!(node.position.is_none());
    }

    #[test]
    fn test_with_size_clamps() {
        let node = Node::new("a", NodeType::Class, "A").with_size(40);
        assert_eq!(node.size, MAX_NODE_SIZE);
        let node = Node::new("a", NodeType::Class, "A").with_size(0);
        assert_eq!(node.size, MIN_NODE_SIZE);
    }

    #[test]
    fn test_matches_lowercase() {
        let node = Node::new("n2", NodeType::Form, "Login")
            .with_qualified_name("App\\Forms\\LoginForm")
            .with_file("forms/ULogin.pas");
        assert!(node.matches_lowercase("login"));
        assert!(node.matches_lowercase("app\\forms"));
        assert!(node.matches_lowercase("ulogin.pas"));
        assert!(!node.matches_lowercase("register"));
        assert!(node.matches_lowercase(""));
    }

    #[test]
    fn test_metadata_accessors() {
        let node = Node::new("n", NodeType::Class, "User")
            .with_metadata("status", "deprecated")
            .with_metadata("visibility", "public")
            .with_metadata("tags", serde_json::json!(["auth", "legacy"]));
        assert_eq!(node.status(), Some(NodeStatus::Deprecated));
        assert_eq!(node.visibility(), Some("public"));
        assert_eq!(node.tags(), vec!["auth", "legacy"]);
        assert_eq!(node.documentation(), None);
    }
}
