//! Node types - the structural category of each node in the flow graph.

use serde::{Deserialize, Serialize};

use content_model::{GraphConfig, NodeKind, StoryContent};

/// Minimum incoming edges for a node to count as a convergence point.
pub const CONVERGENCE_THRESHOLD: usize = 3;

/// Structural categories assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A declared graph root.
    Entry,
    /// A node with at least [`CONVERGENCE_THRESHOLD`] incoming edges.
    Convergence,
    Lesson,
    Puzzle,
    /// A node offering no choices.
    Ending,
    Default,
}

impl NodeType {
    /// All node types in display order.
    pub const ALL: [NodeType; 6] = [
        NodeType::Entry,
        NodeType::Convergence,
        NodeType::Lesson,
        NodeType::Puzzle,
        NodeType::Ending,
        NodeType::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Entry => "entry",
            NodeType::Convergence => "convergence",
            NodeType::Lesson => "lesson",
            NodeType::Puzzle => "puzzle",
            NodeType::Ending => "ending",
            NodeType::Default => "default",
        }
    }

    /// Fill color used by the flow visualizer.
    pub fn color(&self) -> &'static str {
        match self {
            NodeType::Entry => "#FFD700",
            NodeType::Convergence => "#4ECDC4",
            NodeType::Lesson => "#95E1D3",
            NodeType::Puzzle => "#F38181",
            NodeType::Ending => "#AA96DA",
            NodeType::Default => "#E0E0E0",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a node. The first matching rule wins:
///
/// 1. declared entry point → `Entry`
/// 2. authored kind, if any (an authored `default` still falls through to rule 6)
/// 3. no choices → `Ending`
/// 4. lesson-like id → `Lesson`
/// 5. puzzle-like id → `Puzzle`
/// 6. `incoming_edges >= CONVERGENCE_THRESHOLD` → `Convergence`
/// 7. otherwise → `Default`
pub fn classify(
    id: &str,
    content: &StoryContent,
    incoming_edges: usize,
    config: &GraphConfig,
) -> NodeType {
    if config.is_entry_point(id) {
        return NodeType::Entry;
    }

    match content.kind {
        Some(NodeKind::Entry) => return NodeType::Entry,
        Some(NodeKind::Lesson) => return NodeType::Lesson,
        Some(NodeKind::Puzzle) => return NodeType::Puzzle,
        Some(NodeKind::Ending) => return NodeType::Ending,
        Some(NodeKind::Default) => return convergence_or_default(incoming_edges),
        None => {}
    }

    if content.has_no_choices() {
        return NodeType::Ending;
    }

    if config.looks_like_lesson(id) {
        return NodeType::Lesson;
    }

    if config.looks_like_puzzle(id) {
        return NodeType::Puzzle;
    }

    convergence_or_default(incoming_edges)
}

fn convergence_or_default(incoming_edges: usize) -> NodeType {
    if incoming_edges >= CONVERGENCE_THRESHOLD {
        NodeType::Convergence
    } else {
        NodeType::Default
    }
}
