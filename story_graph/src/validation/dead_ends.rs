//! Dead-end detection: nodes that strand the reader without looking like an ending.

use content_model::{ContentRegistry, GraphConfig, NodeKind};

use super::{Issue, IssueCategory, ValidationPass};

/// Flags choiceless nodes that are neither ending-like by name, authored
/// endings, nor special pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadEndDetector;

impl ValidationPass for DeadEndDetector {
    fn category(&self) -> IssueCategory {
        IssueCategory::DeadEnd
    }

    fn run(&self, registry: &ContentRegistry, config: &GraphConfig) -> Vec<Issue> {
        registry
            .iter()
            .filter(|(_, content)| content.has_no_choices())
            .filter(|(id, content)| {
                content.kind != Some(NodeKind::Ending)
                    && !config.looks_like_ending(id.as_str())
                    && !config.is_special_page(id.as_str())
            })
            .map(|(id, _)| {
                Issue::warning(
                    format!(
                        "Potential dead end '{}' - no choices and doesn't look like an ending",
                        id
                    ),
                    id.clone(),
                )
            })
            .collect()
    }
}
