//! Services that feed the knowledge graph.

mod recorder;

pub use recorder::{SharedKnowledgeGraph, spawn_completion_recorder, spawn_learning_recorder};
