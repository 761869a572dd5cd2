//! Simulated knowledge graph fed by completed tasks and the context hub.
//!
//! Nodes are only ever appended. Each completed task contributes one `fact`
//! node; operators add entities, rules, and facts through
//! [`domain::KnowledgeGraph::ingest_context`].

pub mod domain;
pub mod services;
