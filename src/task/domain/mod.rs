//! Domain model for the task lifecycle.
//!
//! Tasks move through six pipeline stages, are routed to expert review or
//! delivered to their requestor depending on confidence, and finish as
//! approved. Every mutation is crate-private so callers go through the
//! lifecycle engine.

mod confidence;
mod error;
mod ids;
mod status;
mod task;
mod template;

pub use confidence::Confidence;
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::{Priority, RequestorFeedback, SentStatus, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskFlags};
pub use template::TaskTemplate;
