//! Error types for knowledge graph input.

use thiserror::Error;

/// Errors returned while adding knowledge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KnowledgeError {
    /// The node label is empty after trimming.
    #[error("knowledge label must not be empty")]
    EmptyLabel,
}
