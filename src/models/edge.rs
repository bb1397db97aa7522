//! Edge model representing a relation between two nodes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Relation kind. Serialized as its snake_case label; unknown labels become
/// [`EdgeType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeType {
    // Code dependencies
    Uses,
    Extends,
    Implements,
    Includes,

    // Structural relations
    Contains,
    Defines,
    BelongsTo,

    // Calls
    Calls,
    Instantiates,

    // Files
    FilePair,

    // Web
    Routes,
    Renders,

    // Data
    QueriesTable,
    HasRelation,

    // Other
    References,
    Custom(String),
}

impl EdgeType {
    /// Every named variant, in declaration order.
    pub const NAMED: [EdgeType; 15] = [
        EdgeType::Uses,
        EdgeType::Extends,
        EdgeType::Implements,
        EdgeType::Includes,
        EdgeType::Contains,
        EdgeType::Defines,
        EdgeType::BelongsTo,
        EdgeType::Calls,
        EdgeType::Instantiates,
        EdgeType::FilePair,
        EdgeType::Routes,
        EdgeType::Renders,
        EdgeType::QueriesTable,
        EdgeType::HasRelation,
        EdgeType::References,
    ];

    pub fn label(&self) -> &str {
        match self {
            EdgeType::Uses => "uses",
            EdgeType::Extends => "extends",
            EdgeType::Implements => "implements",
            EdgeType::Includes => "includes",
            EdgeType::Contains => "contains",
            EdgeType::Defines => "defines",
            EdgeType::BelongsTo => "belongs_to",
            EdgeType::Calls => "calls",
            EdgeType::Instantiates => "instantiates",
            EdgeType::FilePair => "file_pair",
            EdgeType::Routes => "routes",
            EdgeType::Renders => "renders",
            EdgeType::QueriesTable => "queries_table",
            EdgeType::HasRelation => "has_relation",
            EdgeType::References => "references",
            EdgeType::Custom(label) => label,
        }
    }
}

impl Default for EdgeType {
    fn default() -> Self {
        EdgeType::Uses
    }
}

impl From<&str> for EdgeType {
    fn from(label: &str) -> Self {
        EdgeType::NAMED
            .iter()
            .find(|t| t.label() == label)
            .cloned()
            .unwrap_or_else(|| EdgeType::Custom(label.to_string()))
    }
}

impl From<String> for EdgeType {
    fn from(label: String) -> Self {
        EdgeType::from(label.as_str())
    }
}

impl From<EdgeType> for String {
    fn from(edge_type: EdgeType) -> Self {
        match edge_type {
            EdgeType::Custom(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn default_weight() -> f32 {
    1.0
}

/// A directed (or bidirectional) relation between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge ID.
    pub id: String,
    /// Source node ID.
    pub source: String,
    /// Target node ID.
    pub target: String,
    /// Relation type.
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Visual emphasis, not normalized.
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub bidirectional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Edge {
    /// Creates an edge with id `source->target:type`.
    pub fn new(source: impl Into<String>, target: impl Into<String>, edge_type: EdgeType) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{}->{}:{}", source, target, edge_type.label()),
            source,
            target,
            edge_type,
            weight: 1.0,
            bidirectional: false,
            label: None,
            detail: None,
            metadata: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn bidirectional(mut self) -> Self {
        self.bidirectional = true;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn type_label(&self) -> &str {
        self.edge_type.label()
    }

    /// Whether `node_id` is either endpoint.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// The endpoint opposite to `node_id`, if the edge touches it.
    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if self.source == node_id {
            Some(&self.target)
        } else if self.target == node_id {
            Some(&self.source)
        } else {
            None
        }
    }

    pub fn line_number(&self) -> Option<u32> {
        self.metadata
            .get("line_number")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn is_conditional(&self) -> bool {
        self.metadata
            .get("is_conditional")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn is_dev_dependency(&self) -> bool {
        self.metadata
            .get("is_dev_dependency")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn version_constraint(&self) -> Option<&str> {
        self.metadata.get("version_constraint").and_then(Value::as_str)
    }
}
