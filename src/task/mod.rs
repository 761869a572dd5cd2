//! Task lifecycle for the expert review desk.
//!
//! Synthetic analytics requests flow through a six-stage pipeline, land in
//! expert review when confidence is low or are delivered to their requestor
//! otherwise, and finish as approved once the simulated requestor responds.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The engine, its driver, and views in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
