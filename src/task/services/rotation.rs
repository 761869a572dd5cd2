//! Template rotation for synthetic task injection.

use crate::task::{domain::TaskTemplate, ports::RandomSource};
use std::collections::HashSet;

/// Tracks which templates were injected recently.
///
/// Every template is used once before any repeats. When the rotation runs
/// dry it starts over, skipping the template injected last whenever another
/// one is available.
#[derive(Debug, Clone, Default)]
pub(crate) struct TemplateRotation {
    used: HashSet<String>,
    last: Option<String>,
}

impl TemplateRotation {
    /// Picks the next template, ignoring any whose title is in `active`.
    ///
    /// Returns `None` when every template is represented by an active task.
    pub(crate) fn choose<'a, R>(
        &mut self,
        templates: &[&'a TaskTemplate],
        active: &HashSet<String>,
        random: &mut R,
    ) -> Option<&'a TaskTemplate>
    where
        R: RandomSource + ?Sized,
    {
        let available: Vec<&'a TaskTemplate> = templates
            .iter()
            .copied()
            .filter(|template| !active.contains(template.key()))
            .collect();
        if available.is_empty() {
            return None;
        }

        let mut fresh: Vec<&'a TaskTemplate> = available
            .iter()
            .copied()
            .filter(|template| !self.used.contains(template.key()))
            .collect();
        if fresh.is_empty() {
            self.used.clear();
            fresh = available
                .iter()
                .copied()
                .filter(|template| self.last.as_deref() != Some(template.key()))
                .collect();
            if fresh.is_empty() {
                fresh = available;
            }
        }

        let upper = u64::try_from(fresh.len()).unwrap_or(u64::MAX);
        let index = usize::try_from(random.below(upper)).unwrap_or_default();
        let chosen = fresh.get(index).or_else(|| fresh.first()).copied()?;

        self.used.insert(chosen.key().to_owned());
        self.last = Some(chosen.key().to_owned());
        Some(chosen)
    }
}
