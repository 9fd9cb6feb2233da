//! Graph configuration: the externally declared sets every analysis pass consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::content::NodeId;

/// Declared navigation sets and naming heuristics for one content registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Graph roots, in reporting order.
    pub entry_points: Vec<NodeId>,

    /// Control actions that never name a content node.
    pub special_actions: BTreeSet<NodeId>,

    /// Pages reached only through out-of-band navigation.
    pub special_pages: BTreeSet<NodeId>,

    /// Ids planned but not yet authored.
    pub placeholders: BTreeSet<NodeId>,

    /// Id substrings marking lesson content.
    pub lesson_patterns: Vec<String>,

    /// Id substrings marking puzzle content.
    pub puzzle_patterns: Vec<String>,

    /// Id substrings marking an intentional ending.
    pub ending_patterns: Vec<String>,
}

fn ids(values: &[&str]) -> BTreeSet<NodeId> {
    values.iter().map(|v| NodeId::new(*v)).collect()
}

fn patterns(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            entry_points: vec![NodeId::new("welcome")],
            special_actions: ids(&["change-name", "settings"]),
            special_pages: ids(&["debug"]),
            placeholders: ids(&[
                "reflection",
                "logic_lesson",
                "narrative_lesson",
                "social_lesson",
                "nano_deep",
                "quiz_nano",
            ]),
            lesson_patterns: patterns(&["lesson", "nano_", "molecular"]),
            puzzle_patterns: patterns(&["puzzle", "lock", "chamber"]),
            ending_patterns: patterns(&["ending", "conclusion", "complete"]),
        }
    }
}

impl GraphConfig {
    /// Create a configuration with no declared sets and no naming heuristics.
    pub fn empty() -> Self {
        Self {
            entry_points: Vec::new(),
            special_actions: BTreeSet::new(),
            special_pages: BTreeSet::new(),
            placeholders: BTreeSet::new(),
            lesson_patterns: Vec::new(),
            puzzle_patterns: Vec::new(),
            ending_patterns: Vec::new(),
        }
    }

    /// Replace the entry points.
    pub fn with_entry_points<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.entry_points = entries.into_iter().map(Into::into).collect();
        self
    }

    /// Declare a special action.
    pub fn with_special_action(mut self, action: impl Into<NodeId>) -> Self {
        self.special_actions.insert(action.into());
        self
    }

    /// Declare a special page.
    pub fn with_special_page(mut self, page: impl Into<NodeId>) -> Self {
        self.special_pages.insert(page.into());
        self
    }

    /// Declare a placeholder.
    pub fn with_placeholder(mut self, id: impl Into<NodeId>) -> Self {
        self.placeholders.insert(id.into());
        self
    }

    pub fn is_entry_point(&self, id: &str) -> bool {
        self.entry_points.iter().any(|e| e.as_str() == id)
    }

    pub fn is_special_action(&self, action: &str) -> bool {
        self.special_actions.contains(action)
    }

    pub fn is_special_page(&self, id: &str) -> bool {
        self.special_pages.contains(id)
    }

    pub fn is_placeholder(&self, id: &str) -> bool {
        self.placeholders.contains(id)
    }

    /// Check if an id looks like lesson content.
    pub fn looks_like_lesson(&self, id: &str) -> bool {
        matches_any(id, &self.lesson_patterns)
    }

    /// Check if an id looks like puzzle content.
    pub fn looks_like_puzzle(&self, id: &str) -> bool {
        matches_any(id, &self.puzzle_patterns)
    }

    /// Check if an id looks like an intentional ending.
    pub fn looks_like_ending(&self, id: &str) -> bool {
        matches_any(id, &self.ending_patterns)
    }
}

fn matches_any(id: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| id.contains(p.as_str()))
}
