//! Rank assignment with back-edge suppression.

use std::collections::{BTreeSet, HashMap};

use content_model::NodeId;

use crate::model::{FlowGraph, FlowNode, NodeType};

/// Index-based view of a flow graph used by the layout phases.
///
/// `adj`/`rev` hold only the edges that take part in ranking: back-edges and
/// self-loops are split out into `back_edges`, and parallel edges collapse.
#[derive(Debug, Clone)]
pub(crate) struct LayoutGraph {
    pub n: usize,
    pub node_ids: Vec<NodeId>,
    pub adj: Vec<Vec<usize>>,
    pub rev: Vec<Vec<usize>>,
    pub back_edges: BTreeSet<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnStack,
    Done,
}

impl LayoutGraph {
    /// Nodes are indexed in id order whatever order the flow graph lists them in.
    pub fn from_flow_graph(graph: &FlowGraph) -> Self {
        let mut nodes: Vec<&FlowNode> = graph.nodes.iter().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let node_ids: Vec<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();
        let index: HashMap<&NodeId, usize> =
            node_ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        let n = node_ids.len();

        // Edges in choice order; edges naming unknown nodes cannot be placed.
        let mut all_adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        for edge in &graph.edges {
            if let (Some(&u), Some(&v)) = (index.get(&edge.source), index.get(&edge.target)) {
                if !all_adj[u].contains(&v) {
                    all_adj[u].push(v);
                }
            }
        }

        // Entry nodes seed the traversal so "return to start" choices become back-edges.
        let mut roots: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.data.node_type == NodeType::Entry)
            .map(|(i, _)| i)
            .collect();
        roots.extend(0..n);

        let back_edges = find_back_edges(&all_adj, &roots);

        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut rev: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (u, targets) in all_adj.iter().enumerate() {
            for &v in targets {
                if !back_edges.contains(&(u, v)) {
                    adj[u].push(v);
                    rev[v].push(u);
                }
            }
        }

        Self {
            n,
            node_ids,
            adj,
            rev,
            back_edges,
        }
    }
}

/// Depth-first search from each root in order; an edge into a node still on
/// the stack closes a cycle and is a back-edge.
fn find_back_edges(adj: &[Vec<usize>], roots: &[usize]) -> BTreeSet<(usize, usize)> {
    let mut state = vec![Visit::Unvisited; adj.len()];
    let mut back_edges = BTreeSet::new();

    for &root in roots {
        if state[root] != Visit::Unvisited {
            continue;
        }

        state[root] = Visit::OnStack;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (u, next) = *frame;
            if next < adj[u].len() {
                frame.1 += 1;
                let v = adj[u][next];
                match state[v] {
                    Visit::OnStack => {
                        back_edges.insert((u, v));
                    }
                    Visit::Unvisited => {
                        state[v] = Visit::OnStack;
                        stack.push((v, 0));
                    }
                    Visit::Done => {}
                }
            } else {
                state[u] = Visit::Done;
                stack.pop();
            }
        }
    }

    back_edges
}

/// Longest-path layering over the acyclic edges.
///
/// Nodes without ranked predecessors get rank 0; every other node sits one rank
/// below its deepest predecessor. Kahn order with ties broken by node id keeps
/// the result deterministic.
pub(crate) fn assign_ranks(graph: &LayoutGraph) -> Vec<usize> {
    let n = graph.n;
    let mut in_degree: Vec<usize> = graph.rev.iter().map(Vec::len).collect();
    let mut ranks = vec![0usize; n];

    // Node indices follow id order, so ascending sources are already sorted.
    let mut queue: Vec<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut head = 0;

    while head < queue.len() {
        let u = queue[head];
        head += 1;

        let mut successors = graph.adj[u].clone();
        successors.sort_unstable();

        for v in successors {
            ranks[v] = ranks[v].max(ranks[u] + 1);
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push(v);
            }
        }
    }

    // Back-edge removal leaves a DAG, so every node was dequeued.
    debug_assert_eq!(queue.len(), n);
    ranks
}
