//! Port contracts for the task lifecycle engine.
//!
//! Ports keep randomness and completion side effects outside the engine so
//! hosts can swap them for deterministic test doubles.

pub mod notifier;
pub mod random;

pub use notifier::CompletionNotifier;
pub use random::RandomSource;
