//! Analytics - convergence points and aggregate metrics.
//!
//! Both operate on the unfiltered registry so special pages count toward totals.

use serde::{Deserialize, Serialize};

use content_model::{ContentRegistry, GraphConfig, NodeId};

use crate::model::{count_incoming_edges, FlowGraph, NodeType, CONVERGENCE_THRESHOLD};

/// Ids with at least [`CONVERGENCE_THRESHOLD`] incoming edges, in id order.
///
/// Only ids present in the registry are returned.
pub fn find_convergence_points(registry: &ContentRegistry, config: &GraphConfig) -> Vec<NodeId> {
    count_incoming_edges(registry, config)
        .into_iter()
        .filter(|(id, count)| *count >= CONVERGENCE_THRESHOLD && registry.contains(id.as_str()))
        .map(|(id, _)| id)
        .collect()
}

/// Aggregate statistics over a registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetrics {
    pub total_nodes: usize,
    pub total_choices: usize,
    /// Rounded to two decimal places.
    pub avg_choices_per_node: f64,
    pub ending_nodes: usize,
    pub entry_nodes: usize,
    pub convergence_point_count: usize,
    pub convergence_points: Vec<NodeId>,
}

/// Calculate metrics for a registry.
pub fn calculate_metrics(registry: &ContentRegistry, config: &GraphConfig) -> GraphMetrics {
    let total_nodes = registry.len();
    let total_choices = registry.total_choices();

    let ending_nodes = registry
        .iter()
        .filter(|(_, content)| content.has_no_choices())
        .count();
    let entry_nodes = registry
        .ids()
        .filter(|id| config.is_entry_point(id.as_str()))
        .count();

    let avg_choices_per_node = if total_nodes > 0 {
        round2(total_choices as f64 / total_nodes as f64)
    } else {
        0.0
    };

    let convergence_points = find_convergence_points(registry, config);

    GraphMetrics {
        total_nodes,
        total_choices,
        avg_choices_per_node,
        ending_nodes,
        entry_nodes,
        convergence_point_count: convergence_points.len(),
        convergence_points,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count nodes per type, most common first (ties by type order).
pub fn type_distribution(graph: &FlowGraph) -> Vec<(NodeType, usize)> {
    let mut counts: Vec<(NodeType, usize)> = NodeType::ALL
        .iter()
        .map(|t| {
            let count = graph.nodes.iter().filter(|n| n.data.node_type == *t).count();
            (*t, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
