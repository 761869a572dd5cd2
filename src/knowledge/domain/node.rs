//! Knowledge node value types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a knowledge node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a new random node identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A business object such as a customer segment or metric.
    Entity,
    /// A policy or definition the agent must follow.
    Rule,
    /// Something observed, such as a completed analysis.
    Fact,
}

/// Canvas coordinates used when rendering the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePosition {
    /// Horizontal offset.
    pub x: u32,
    /// Vertical offset.
    pub y: u32,
}

/// A single piece of learned knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeNode {
    id: NodeId,
    label: String,
    kind: NodeKind,
    position: NodePosition,
    connections: Vec<NodeId>,
}

impl KnowledgeNode {
    pub(super) fn new(
        label: String,
        kind: NodeKind,
        position: NodePosition,
        connections: Vec<NodeId>,
    ) -> Self {
        Self {
            id: NodeId::new(),
            label,
            kind,
            position,
            connections,
        }
    }

    /// Returns the node identifier.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the node kind.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the canvas position.
    #[must_use]
    pub const fn position(&self) -> NodePosition {
        self.position
    }

    /// Returns the ids of the nodes this one links to.
    #[must_use]
    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }
}
