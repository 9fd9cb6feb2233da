//! Content definitions for the story registry.

mod body;
mod story;

pub use body::*;
pub use story::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Unique identifier for every content node in the registry.
///
/// Ids are authored strings (e.g. `"welcome"`, `"story_princess"`), and double
/// as choice actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authored node categories.
///
/// When a node declares one, it replaces the id-naming heuristics for that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Entry,
    Lesson,
    Puzzle,
    Ending,
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_node_id_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(NodeId::new("welcome"), 1);

        assert_eq!(map.get("welcome"), Some(&1));
        assert_eq!(NodeId::from("welcome").to_string(), "welcome");
    }

    #[test]
    fn test_node_kind_serde_names() {
        let kind: NodeKind = serde_json::from_str("\"ending\"").unwrap();
        assert_eq!(kind, NodeKind::Ending);
        assert_eq!(serde_json::to_string(&NodeKind::Lesson).unwrap(), "\"lesson\"");
    }
}
