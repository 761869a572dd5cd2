//! Domain model for the knowledge graph.

mod error;
mod graph;
mod node;

pub use error::KnowledgeError;
pub use graph::KnowledgeGraph;
pub use node::{KnowledgeNode, NodeId, NodeKind, NodePosition};
