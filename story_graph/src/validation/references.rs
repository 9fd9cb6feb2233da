//! Reference validation: every choice must lead somewhere real.

use content_model::{ContentRegistry, GraphConfig};

use super::{Issue, IssueCategory, ValidationPass};

/// Flags choice actions that name no content node.
///
/// Special actions are valid by definition. Missing targets that are declared
/// placeholders are informational; any other missing target is an error
/// attributed to the node holding the choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceValidator;

impl ValidationPass for ReferenceValidator {
    fn category(&self) -> IssueCategory {
        IssueCategory::Reference
    }

    fn run(&self, registry: &ContentRegistry, config: &GraphConfig) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (id, content) in registry.iter() {
            for action in content.actions() {
                let action = action.as_str();
                if config.is_special_action(action) || registry.contains(action) {
                    continue;
                }

                if config.is_placeholder(action) {
                    issues.push(Issue::info(
                        format!("Placeholder reference '{}' (planned content)", action),
                        id.clone(),
                    ));
                } else {
                    issues.push(Issue::error(
                        format!("Invalid reference '{}' - no matching content node", action),
                        id.clone(),
                    ));
                }
            }
        }

        issues
    }
}
