//! Reachability analysis: breadth-first traversal from the entry points.

use std::collections::{BTreeSet, HashSet, VecDeque};

use content_model::{ContentRegistry, GraphConfig, NodeId};

use super::{Issue, IssueCategory, ValidationPass};

/// Collect every id reachable from the entry points.
///
/// Ids are marked visited when dequeued and deduplicated when enqueued, so each
/// id is expanded at most once. Entry points are visited even when they name no
/// registry node; dangling targets are visited but have no choices to follow.
pub fn reachable_ids(registry: &ContentRegistry, config: &GraphConfig) -> BTreeSet<NodeId> {
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    let mut queued: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&NodeId> = VecDeque::new();

    for entry in &config.entry_points {
        if queued.insert(entry.as_str()) {
            queue.push_back(entry);
        }
    }

    while let Some(current) = queue.pop_front() {
        visited.insert(current.clone());

        let Some(content) = registry.get(current.as_str()) else {
            continue;
        };

        for action in content.actions() {
            if config.is_special_action(action.as_str()) {
                continue;
            }
            if queued.insert(action.as_str()) {
                queue.push_back(action);
            }
        }
    }

    visited
}

/// Flags registry nodes with no path from any entry point.
///
/// Placeholders and special pages are excluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReachabilityAnalyzer;

impl ValidationPass for ReachabilityAnalyzer {
    fn category(&self) -> IssueCategory {
        IssueCategory::Reachability
    }

    fn run(&self, registry: &ContentRegistry, config: &GraphConfig) -> Vec<Issue> {
        let reachable = reachable_ids(registry, config);
        tracing::trace!(
            reachable = reachable.len(),
            total = registry.len(),
            "reachability traversal done"
        );

        registry
            .ids()
            .filter(|id| {
                !reachable.contains(*id)
                    && !config.is_placeholder(id.as_str())
                    && !config.is_special_page(id.as_str())
            })
            .map(|id| {
                Issue::warning(
                    format!("Unreachable content '{}' - no path from entry points", id),
                    id.clone(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_model::StoryContent;

    fn cyclic_registry() -> ContentRegistry {
        ContentRegistry::new()
            .with_node(
                "welcome",
                StoryContent::new("W", "")
                    .with_choice("a", "a")
                    .with_choice("b", "b")
                    .with_choice("settings", "settings"),
            )
            .unwrap()
            .with_node(
                "a",
                StoryContent::new("A", "").with_choice("b", "b").with_choice("home", "welcome"),
            )
            .unwrap()
            .with_node("b", StoryContent::new("B", "").with_choice("self", "b"))
            .unwrap()
            .with_node("island", StoryContent::new("I", "").with_choice("c", "island_two"))
            .unwrap()
            .with_node("island_two", StoryContent::new("I2", "").with_choice("back", "island"))
            .unwrap()
            .with_node("debug", StoryContent::new("D", ""))
            .unwrap()
    }

    #[test]
    fn test_cycles_terminate() {
        let reachable = reachable_ids(&cyclic_registry(), &GraphConfig::default());
        let ids: Vec<_> = reachable.iter().map(NodeId::as_str).collect();
        assert_eq!(ids, vec!["a", "b", "welcome"]);
    }

    #[test]
    fn test_unreachable_islands_reported() {
        let issues = ReachabilityAnalyzer.run(&cyclic_registry(), &GraphConfig::default());
        let ids: Vec<_> = issues.iter().map(|i| i.node_id.as_str()).collect();
        assert_eq!(ids, vec!["island", "island_two"]);
    }

    #[test]
    fn test_visited_never_reported() {
        let registry = cyclic_registry();
        let config = GraphConfig::default().with_entry_points(["welcome", "island"]);

        let reachable = reachable_ids(&registry, &config);
        let issues = ReachabilityAnalyzer.run(&registry, &config);

        assert!(issues.is_empty());
        assert!(issues.iter().all(|i| !reachable.contains(&i.node_id)));
    }

    #[test]
    fn test_placeholder_nodes_excluded() {
        let registry = ContentRegistry::new()
            .with_node("welcome", StoryContent::new("W", ""))
            .unwrap()
            .with_node("quiz_nano", StoryContent::new("Quiz", ""))
            .unwrap();

        assert!(ReachabilityAnalyzer.run(&registry, &GraphConfig::default()).is_empty());
    }

    #[test]
    fn test_entry_order_does_not_change_visited_set() {
        let registry = cyclic_registry();
        let forward = GraphConfig::default().with_entry_points(["welcome", "island"]);
        let backward = GraphConfig::default().with_entry_points(["island", "welcome"]);

        assert_eq!(reachable_ids(&registry, &forward), reachable_ids(&registry, &backward));
    }
}
