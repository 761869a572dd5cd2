//! Append-only knowledge graph.

use super::{KnowledgeError, KnowledgeNode, NodeId, NodeKind, NodePosition};
use crate::task::{domain::Task, ports::RandomSource};
use serde::{Deserialize, Serialize};

/// Width and height of the canvas nodes are scattered over.
const CANVAS_SIZE: u64 = 1_000;

/// Collection of learned knowledge.
///
/// Every new node links to the node appended before it, so the graph grows
/// as a connected chain with no isolated nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    nodes: Vec<KnowledgeNode>,
}

impl KnowledgeGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every node in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[KnowledgeNode] {
        &self.nodes
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when nothing has been learned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&KnowledgeNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Adds operator-supplied domain knowledge.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::EmptyLabel`] when `label` is blank.
    pub fn ingest_context<R>(
        &mut self,
        label: &str,
        kind: NodeKind,
        random: &mut R,
    ) -> Result<NodeId, KnowledgeError>
    where
        R: RandomSource + ?Sized,
    {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(KnowledgeError::EmptyLabel);
        }
        Ok(self.append(trimmed.to_owned(), kind, random))
    }

    /// Adds the fact learned from a completed task.
    pub fn record_completion<R>(&mut self, task: &Task, random: &mut R) -> NodeId
    where
        R: RandomSource + ?Sized,
    {
        self.append(task.title().to_owned(), NodeKind::Fact, random)
    }

    fn append<R>(&mut self, label: String, kind: NodeKind, random: &mut R) -> NodeId
    where
        R: RandomSource + ?Sized,
    {
        let position = NodePosition {
            x: canvas_coordinate(random),
            y: canvas_coordinate(random),
        };
        let connections = self.nodes.last().map(KnowledgeNode::id).into_iter().collect();
        let node = KnowledgeNode::new(label, kind, position, connections);
        let id = node.id();
        self.nodes.push(node);
        id
    }
}

fn canvas_coordinate<R>(random: &mut R) -> u32
where
    R: RandomSource + ?Sized,
{
    u32::try_from(random.below(CANVAS_SIZE)).unwrap_or_default()
}
