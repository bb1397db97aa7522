//! Graph data model shared by every other component.

mod edge;
mod graph;
mod node;
mod validation;

pub use edge::{Edge, EdgeType};
pub use graph::{Graph, GraphMetadata};
pub use node::{
    Node, NodeStatus, NodeType, Position, DEFAULT_NODE_SIZE, MAX_NODE_SIZE, MIN_NODE_SIZE,
};
pub use validation::{integrity_issues, validate, ValidationError};
