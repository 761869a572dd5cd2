//! Application services for the task lifecycle.

mod board;
mod config;
mod driver;
mod engine;
mod rotation;
mod selection;

pub use board::{TaskBoard, status_counts};
pub use config::{EngineConfig, EngineConfigError};
pub use driver::{DriverError, EngineDriver, SharedEngine};
pub use engine::LifecycleEngine;
pub use selection::reconcile_selection;
