//! Layout Engine - positions for a top-to-bottom diagram of the flow graph.
//!
//! The layout runs in three phases:
//! 1. **Ranking**: back-edges found by depth-first search from the entry nodes are set
//!    aside, then every node gets a longest-path rank over the remaining edges
//! 2. **Ordering**: nodes within each rank are reordered with barycenter sweeps to
//!    reduce edge crossings
//! 3. **Coordinates**: (rank, order) maps to the top-left corner of a fixed-size box,
//!    with every rank centered on the widest one
//!
//! Back-edges stay in the flow graph; they only take no part in ranking.

mod ordering;
mod ranking;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use content_model::NodeId;

use crate::model::{FlowGraph, Position};
use ordering::{build_rank_buckets, minimize_crossings};
use ranking::{assign_ranks, LayoutGraph};

/// Box and spacing configuration for the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of every node box.
    pub node_width: f64,

    /// Height of every node box.
    pub node_height: f64,

    /// Horizontal gap between boxes in the same rank.
    pub node_gap: f64,

    /// Vertical gap between ranks.
    pub rank_gap: f64,

    /// Maximum crossing-reduction passes.
    pub ordering_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 280.0,
            node_height: 120.0,
            node_gap: 80.0,
            rank_gap: 120.0,
            ordering_passes: 8,
        }
    }
}

/// Where a single node landed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePlacement {
    pub rank: usize,
    /// Index within the rank, left to right.
    pub order: usize,
    pub position: Position,
}

/// The computed layout of a flow graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLayout {
    pub placements: BTreeMap<NodeId, NodePlacement>,
    pub rank_count: usize,
    /// Edge crossings between adjacent ranks after ordering.
    pub crossings: usize,
    /// Edges set aside during ranking, as (source, target).
    pub back_edges: Vec<(NodeId, NodeId)>,
    pub width: f64,
    pub height: f64,
}

impl GraphLayout {
    pub fn placement(&self, id: &str) -> Option<&NodePlacement> {
        self.placements.get(id)
    }

    /// Node positions keyed by id.
    pub fn positions(&self) -> BTreeMap<NodeId, Position> {
        self.placements
            .iter()
            .map(|(id, placement)| (id.clone(), placement.position))
            .collect()
    }
}

/// Computes layouts. Output depends only on graph topology and configuration.
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create a layout engine with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Create a layout engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(LayoutConfig::default())
    }

    /// Compute a layout for the graph.
    pub fn layout(&self, graph: &FlowGraph) -> GraphLayout {
        let layout_graph = LayoutGraph::from_flow_graph(graph);
        if layout_graph.n == 0 {
            return GraphLayout::default();
        }

        let ranks = assign_ranks(&layout_graph);
        let mut rank_order = build_rank_buckets(&ranks);
        let crossings =
            minimize_crossings(&mut rank_order, &layout_graph, self.config.ordering_passes);

        let placements = self.assign_coordinates(&rank_order, &layout_graph);
        let (width, height) = self.extent(&rank_order);

        let back_edges = layout_graph
            .back_edges
            .iter()
            .map(|&(u, v)| (layout_graph.node_ids[u].clone(), layout_graph.node_ids[v].clone()))
            .collect::<Vec<_>>();

        tracing::debug!(
            nodes = layout_graph.n,
            ranks = rank_order.len(),
            crossings,
            back_edges = back_edges.len(),
            "computed layout"
        );

        GraphLayout {
            placements,
            rank_count: rank_order.len(),
            crossings,
            back_edges,
            width,
            height,
        }
    }

    /// Lay out a graph and return it with positions filled in.
    pub fn apply(&self, graph: FlowGraph) -> FlowGraph {
        let layout = self.layout(&graph);
        graph.with_positions(&layout.positions())
    }

    fn rank_width(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let count = count as f64;
        count * self.config.node_width + (count - 1.0) * self.config.node_gap
    }

    fn extent(&self, rank_order: &[Vec<usize>]) -> (f64, f64) {
        let width = rank_order
            .iter()
            .map(|nodes| self.rank_width(nodes.len()))
            .fold(0.0_f64, f64::max);

        let ranks = rank_order.len() as f64;
        let height = if ranks > 0.0 {
            ranks * self.config.node_height + (ranks - 1.0) * self.config.rank_gap
        } else {
            0.0
        };

        (width, height)
    }

    fn assign_coordinates(
        &self,
        rank_order: &[Vec<usize>],
        graph: &LayoutGraph,
    ) -> BTreeMap<NodeId, NodePlacement> {
        let rank_step = self.config.node_height + self.config.rank_gap;
        let order_step = self.config.node_width + self.config.node_gap;
        let (max_width, _) = self.extent(rank_order);

        let mut placements = BTreeMap::new();
        for (rank, nodes) in rank_order.iter().enumerate() {
            let shift = (max_width - self.rank_width(nodes.len())) / 2.0;
            for (order, &v) in nodes.iter().enumerate() {
                let position = Position {
                    x: shift + order as f64 * order_step,
                    y: rank as f64 * rank_step,
                };
                placements.insert(
                    graph.node_ids[v].clone(),
                    NodePlacement {
                        rank,
                        order,
                        position,
                    },
                );
            }
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlowGraphBuilder;
    use content_model::{ContentRegistry, GraphConfig, StoryContent};

    /// welcome branches to left/right, both rejoin at hub, hub returns to welcome.
    fn diamond() -> FlowGraph {
        let registry = ContentRegistry::new()
            .with_node(
                "welcome",
                StoryContent::new("W", "").with_choice("l", "left").with_choice("r", "right"),
            )
            .unwrap()
            .with_node("left", StoryContent::new("L", "").with_choice("hub", "hub"))
            .unwrap()
            .with_node("right", StoryContent::new("R", "").with_choice("hub", "hub"))
            .unwrap()
            .with_node("hub", StoryContent::new("H", "").with_choice("home", "welcome"))
            .unwrap();
        FlowGraphBuilder::new(&GraphConfig::default()).build(&registry)
    }

    #[test]
    fn test_diamond_layout() {
        let layout = LayoutEngine::with_defaults().layout(&diamond());

        assert_eq!(layout.rank_count, 3);
        assert_eq!(layout.crossings, 0);
        assert_eq!(
            layout.back_edges,
            vec![(NodeId::new("hub"), NodeId::new("welcome"))]
        );

        let welcome = layout.placement("welcome").unwrap();
        let hub = layout.placement("hub").unwrap();
        assert_eq!(welcome.rank, 0);
        assert_eq!(hub.rank, 2);

        // Single-node ranks are centered over the two-node rank.
        assert_eq!(welcome.position.x, 180.0);
        assert_eq!(hub.position.y, 480.0);

        let left = layout.placement("left").unwrap();
        let right = layout.placement("right").unwrap();
        assert_eq!(left.position, Position { x: 0.0, y: 240.0 });
        assert_eq!(right.position, Position { x: 360.0, y: 240.0 });

        assert_eq!(layout.width, 640.0);
        assert_eq!(layout.height, 600.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let engine = LayoutEngine::with_defaults();
        assert_eq!(engine.layout(&diamond()), engine.layout(&diamond()));
    }

    #[test]
    fn test_spacing_is_configurable() {
        let engine = LayoutEngine::new(LayoutConfig {
            node_gap: 20.0,
            rank_gap: 30.0,
            ..LayoutConfig::default()
        });
        let layout = engine.layout(&diamond());

        assert_eq!(layout.placement("right").unwrap().position.x, 300.0);
        assert_eq!(layout.placement("left").unwrap().position.y, 150.0);
    }

    #[test]
    fn test_apply_keeps_back_edges_in_graph() {
        let graph = LayoutEngine::with_defaults().apply(diamond());

        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.node("hub").unwrap().position.y, 480.0);
    }

    #[test]
    fn test_empty_graph() {
        let layout = LayoutEngine::with_defaults().layout(&FlowGraph::default());
        assert!(layout.placements.is_empty());
        assert_eq!(layout.rank_count, 0);
    }

    #[test]
    fn test_sample_manifest_layout() {
        let manifest =
            content_model::StoryManifest::from_toml_str(include_str!("../../../content/primer.toml"))
                .unwrap();
        let graph = FlowGraphBuilder::new(&manifest.config).build(&manifest.registry);
        let layout = LayoutEngine::with_defaults().layout(&graph);

        assert_eq!(layout.placements.len(), graph.node_count());
        assert_eq!(layout.placement("welcome").unwrap().rank, 0);

        // Every edge kept for ranking points strictly downward.
        for edge in &graph.edges {
            let is_back = layout
                .back_edges
                .iter()
                .any(|(s, t)| *s == edge.source && *t == edge.target);
            if !is_back {
                let source = layout.placement(edge.source.as_str()).unwrap();
                let target = layout.placement(edge.target.as_str()).unwrap();
                assert!(source.rank < target.rank, "{} -> {}", edge.source, edge.target);
            }
        }

        let mut positions: Vec<_> = layout
            .placements
            .values()
            .map(|p| (p.position.x as i64, p.position.y as i64))
            .collect();
        positions.sort();
        positions.dedup();
        assert_eq!(positions.len(), graph.node_count());
    }
}
