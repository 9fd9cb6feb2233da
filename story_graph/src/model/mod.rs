//! Graph Model - the canonical node/edge view of a content registry.
//!
//! Building is a two-pass process:
//! 1. **Counting**: every choice in the registry contributes one incoming edge to its target
//! 2. **Construction**: nodes are emitted with their computed type and counts, and edges
//!    are emitted for every choice whose target resolves to a node in the (filtered) registry
//!
//! Dangling references are silently skipped here; reporting them is the job of
//! the reference validator.

mod node_type;

pub use node_type::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use content_model::{ContentBody, ContentRegistry, GraphConfig, NodeId, StoryContent};

/// Maximum characters of body text shown in a node preview.
pub const PREVIEW_CHARS: usize = 100;

/// Maximum characters of choice text shown on an edge label.
pub const EDGE_LABEL_CHARS: usize = 30;

/// Preview shown for bodies that depend on the reader.
pub const DYNAMIC_PREVIEW: &str = "[Dynamic content]";

/// A point in diagram space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Display data attached to each flow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNodeData {
    pub label: String,
    pub content_preview: String,
    pub node_type: NodeType,
    pub choice_count: usize,
    pub incoming_edges: usize,
}

/// A node in the flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: NodeId,
    pub position: Position,
    pub data: FlowNodeData,
}

/// A directed edge derived from a single choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
}

/// The complete node/edge representation handed to visualization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Get a node by id.
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Get all edges leaving a node, in choice order.
    pub fn outgoing(&self, id: &str) -> impl Iterator<Item = &FlowEdge> {
        let id = id.to_string();
        self.edges.iter().filter(move |e| e.source.as_str() == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Replace node positions, leaving nodes without a position untouched.
    pub fn with_positions(mut self, positions: &BTreeMap<NodeId, Position>) -> Self {
        for node in &mut self.nodes {
            if let Some(position) = positions.get(&node.id) {
                node.position = *position;
            }
        }
        self
    }
}

/// Count incoming edges per target id.
///
/// Every choice counts, including repeated choices from the same source and
/// choices whose target does not exist. Special actions never count.
pub fn count_incoming_edges(
    registry: &ContentRegistry,
    config: &GraphConfig,
) -> BTreeMap<NodeId, usize> {
    let mut counts: BTreeMap<NodeId, usize> = BTreeMap::new();

    for (_, content) in registry.iter() {
        for action in content.actions() {
            if config.is_special_action(action.as_str()) {
                continue;
            }
            *counts.entry(action.clone()).or_default() += 1;
        }
    }

    counts
}

/// Builds flow graphs from a registry.
pub struct FlowGraphBuilder<'a> {
    config: &'a GraphConfig,
    filter_special_pages: bool,
}

impl<'a> FlowGraphBuilder<'a> {
    /// Create a builder that excludes special pages.
    pub fn new(config: &'a GraphConfig) -> Self {
        Self {
            config,
            filter_special_pages: true,
        }
    }

    /// Choose whether special pages are excluded from the graph.
    pub fn filter_special_pages(mut self, filter: bool) -> Self {
        self.filter_special_pages = filter;
        self
    }

    /// Build the flow graph. Identical input always yields identical output.
    pub fn build(&self, registry: &ContentRegistry) -> FlowGraph {
        let filtered;
        let registry = if self.filter_special_pages {
            filtered = registry.without_special_pages(self.config);
            &filtered
        } else {
            registry
        };

        // Pass 1: in-degree, needed before any node can be classified.
        let incoming = count_incoming_edges(registry, self.config);

        // Pass 2: nodes, then edges.
        let nodes = registry
            .iter()
            .map(|(id, content)| {
                let incoming_edges = incoming.get(id).copied().unwrap_or(0);
                self.build_node(id, content, incoming_edges)
            })
            .collect();

        let mut edges = Vec::new();
        for (source, content) in registry.iter() {
            for (index, choice) in content.choices.iter().enumerate() {
                let target = &choice.action;
                if self.config.is_special_action(target.as_str()) {
                    continue;
                }
                if !registry.contains(target.as_str()) {
                    continue;
                }
                edges.push(FlowEdge {
                    id: format!("{}-{}-{}", source, target, index),
                    source: source.clone(),
                    target: target.clone(),
                    label: truncate(&choice.text, EDGE_LABEL_CHARS),
                });
            }
        }

        let graph = FlowGraph { nodes, edges };
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            filtered = self.filter_special_pages,
            "built flow graph"
        );
        graph
    }

    fn build_node(&self, id: &NodeId, content: &StoryContent, incoming_edges: usize) -> FlowNode {
        FlowNode {
            id: id.clone(),
            position: Position::default(),
            data: FlowNodeData {
                label: content.title.clone(),
                content_preview: content_preview(&content.body),
                node_type: classify(id.as_str(), content, incoming_edges, self.config),
                choice_count: content.choice_count(),
                incoming_edges,
            },
        }
    }
}

/// Plain-text preview of a body: markdown emphasis stripped, newlines flattened.
pub fn content_preview(body: &ContentBody) -> String {
    let Some(text) = body.as_static() else {
        return DYNAMIC_PREVIEW.to_string();
    };

    let clean = text.replace("**", "").replace('*', "").replace('\n', " ");
    truncate(clean.trim(), PREVIEW_CHARS)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_model::{ContentRegistry, StoryContent};

    fn registry() -> ContentRegistry {
        ContentRegistry::new()
            .with_node(
                "welcome",
                StoryContent::new("Welcome", "**Hello** reader")
                    .with_choice("Begin the story", "story")
                    .with_choice("Settings", "settings")
                    .with_choice("Somewhere else", "ghost"),
            )
            .unwrap()
            .with_node(
                "story",
                StoryContent::new("Story", "Once").with_choice("Again", "welcome"),
            )
            .unwrap()
            .with_node(
                "debug",
                StoryContent::new("Dev Tools", "tools").with_choice("Home", "welcome"),
            )
            .unwrap()
    }

    #[test]
    fn test_build_skips_special_and_dangling_targets() {
        let config = GraphConfig::default();
        let graph = FlowGraphBuilder::new(&config).build(&registry());

        assert_eq!(graph.node_count(), 2);
        assert!(graph.node("debug").is_none());

        let ids: Vec<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["story-welcome-0", "welcome-story-0"]);
    }

    #[test]
    fn test_unfiltered_build_keeps_special_pages() {
        let config = GraphConfig::default();
        let graph = FlowGraphBuilder::new(&config)
            .filter_special_pages(false)
            .build(&registry());

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.node("welcome").unwrap().data.incoming_edges, 2);
        assert_eq!(graph.outgoing("debug").count(), 1);
    }

    #[test]
    fn test_node_data() {
        let config = GraphConfig::default();
        let graph = FlowGraphBuilder::new(&config).build(&registry());
        let welcome = graph.node("welcome").unwrap();

        assert_eq!(welcome.data.label, "Welcome");
        assert_eq!(welcome.data.content_preview, "Hello reader");
        assert_eq!(welcome.data.node_type, NodeType::Entry);
        assert_eq!(welcome.data.choice_count, 3);
        assert_eq!(welcome.data.incoming_edges, 1);
        assert_eq!(welcome.position, Position::default());
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = GraphConfig::default();
        let builder = FlowGraphBuilder::new(&config);
        assert_eq!(builder.build(&registry()), builder.build(&registry()));
    }

    #[test]
    fn test_incoming_counts_include_duplicates() {
        let registry = ContentRegistry::new()
            .with_node(
                "a",
                StoryContent::new("A", "")
                    .with_choice("one", "hub")
                    .with_choice("two", "hub")
                    .with_choice("settings", "settings"),
            )
            .unwrap();

        let counts = count_incoming_edges(&registry, &GraphConfig::default());
        assert_eq!(counts.get("hub"), Some(&2));
        assert!(counts.get("settings").is_none());
    }

    #[test]
    fn test_preview_truncation() {
        let long = "word ".repeat(40);
        let preview = content_preview(&ContentBody::text(long));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);

        let dynamic = ContentBody::templated(|ctx| ctx.reader_name.clone());
        assert_eq!(content_preview(&dynamic), DYNAMIC_PREVIEW);
    }

    #[test]
    fn test_edge_label_truncation() {
        let registry = ContentRegistry::new()
            .with_node(
                "a",
                StoryContent::new("A", "")
                    .with_choice("Follow the long and winding road to the castle", "b"),
            )
            .unwrap()
            .with_node("b", StoryContent::new("B", ""))
            .unwrap();

        let graph = FlowGraphBuilder::new(&GraphConfig::empty()).build(&registry);
        assert_eq!(graph.edges[0].label, "Follow the long and winding ro...");
    }

    #[test]
    fn test_serialized_shape() {
        let config = GraphConfig::default();
        let graph = FlowGraphBuilder::new(&config).build(&registry());
        let json = serde_json::to_value(&graph).unwrap();

        let node = &json["nodes"][0];
        assert_eq!(node["id"], "story");
        assert_eq!(node["position"]["x"], 0.0);
        assert_eq!(node["data"]["nodeType"], "default");
        assert_eq!(node["data"]["contentPreview"], "Once");
        assert_eq!(node["data"]["incomingEdges"], 1);
        assert_eq!(json["edges"][0]["source"], "story");
    }
}
