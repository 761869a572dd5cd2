//! Adapter implementations of the task ports.

pub mod notifier;
pub mod random;
pub mod templates;

pub use notifier::{ChannelCompletionNotifier, NoopCompletionNotifier};
pub use random::{SeededRandom, SequenceRandom};
pub use templates::{TemplatePoolError, default_templates, parse_template_pool};
