//! Built-in and JSON-backed template pools.

use crate::task::domain::{Priority, TaskFlags, TaskTemplate};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Errors returned while reading a template pool.
#[derive(Debug, Error)]
pub enum TemplatePoolError {
    /// The pool is not a JSON array of templates.
    #[error("invalid template pool: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a JSON array of templates.
///
/// Missing titles or requestors load as blank and are skipped by the engine
/// at injection time. Entries whose fields have the wrong type are dropped
/// here with a warning.
///
/// # Errors
///
/// Returns [`TemplatePoolError::Json`] when the document is not a JSON array.
pub fn parse_template_pool(json: &str) -> Result<Vec<TaskTemplate>, TemplatePoolError> {
    let entries: Vec<Value> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(template) => Some(template),
            Err(err) => {
                warn!(index, error = %err, "dropping unreadable template entry");
                None
            }
        })
        .collect())
}

/// Analytics requests used when the host supplies no pool.
#[must_use]
pub fn default_templates() -> Vec<TaskTemplate> {
    vec![
        TaskTemplate::new("Weekly churn breakdown by region", "Customer Success"),
        TaskTemplate::new("Q3 revenue variance against forecast", "Finance")
            .with_priority(Priority::High)
            .with_flags(TaskFlags {
                vip: true,
                ..TaskFlags::default()
            }),
        TaskTemplate::new("Marketing attribution for spring campaign", "Growth")
            .with_priority(Priority::Low),
        TaskTemplate::new("Inventory turnover for top SKUs", "Operations"),
        TaskTemplate::new("Support ticket backlog trend", "Support").with_flags(TaskFlags {
            urgency: true,
            ..TaskFlags::default()
        }),
        TaskTemplate::new("Cohort retention after pricing change", "Product")
            .with_priority(Priority::High)
            .with_flags(TaskFlags {
                human_requested: true,
                ..TaskFlags::default()
            }),
        TaskTemplate::new("Headcount cost projection", "People Ops").with_confidence(62),
        TaskTemplate::new("Daily active users by platform", "Executive Team")
            .with_confidence(94),
    ]
}
