//! Reviewdesk: an expert-in-the-loop review desk simulation.
//!
//! Synthetic analytics requests flow through a multi-stage pipeline, land in
//! an expert review queue when confidence is low, and are otherwise sent to
//! their requestor, whose simulated response eventually approves or rejects
//! them. Completed work feeds a simulated knowledge graph.
//!
//! # Architecture
//!
//! Reviewdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure lifecycle rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for randomness and notifications
//! - **Adapters**: Concrete implementations of ports (seeded RNG, channels)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle engine, its tokio driver, and dashboard views
//! - [`knowledge`]: Append-only knowledge graph fed by completed tasks

pub mod knowledge;
pub mod task;
