//! Orphan detection: content nothing links to.

use std::collections::BTreeSet;

use content_model::{ContentRegistry, GraphConfig};

use super::{Issue, IssueCategory, ValidationPass};

/// Flags nodes that no choice targets.
///
/// Entry points and special pages are never orphans.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrphanDetector;

impl ValidationPass for OrphanDetector {
    fn category(&self) -> IssueCategory {
        IssueCategory::Orphan
    }

    fn run(&self, registry: &ContentRegistry, config: &GraphConfig) -> Vec<Issue> {
        let mut referenced: BTreeSet<&str> =
            config.entry_points.iter().map(|id| id.as_str()).collect();

        for (_, content) in registry.iter() {
            referenced.extend(
                content
                    .actions()
                    .map(|a| a.as_str())
                    .filter(|a| !config.is_special_action(a)),
            );
        }

        registry
            .ids()
            .filter(|id| !referenced.contains(id.as_str()) && !config.is_special_page(id.as_str()))
            .map(|id| {
                Issue::warning(
                    format!("Orphaned content '{}' - nothing links to this node", id),
                    id.clone(),
                )
            })
            .collect()
    }
}
