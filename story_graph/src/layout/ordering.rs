//! Ordering within ranks to reduce edge crossings.

use super::ranking::LayoutGraph;

/// Build rank buckets: `rank_order[r]` lists node indices at rank `r` in id order.
pub(crate) fn build_rank_buckets(ranks: &[usize]) -> Vec<Vec<usize>> {
    let Some(&max_rank) = ranks.iter().max() else {
        return Vec::new();
    };

    let mut buckets = vec![Vec::new(); max_rank + 1];
    for (v, &r) in ranks.iter().enumerate() {
        buckets[r].push(v);
    }
    buckets
}

/// Mean position of a node's neighbors within an adjacent rank.
///
/// Nodes with no neighbors there sort last.
fn barycenter(neighbors: &[usize], positions: &[Option<usize>]) -> f64 {
    let placed: Vec<usize> = neighbors.iter().filter_map(|&nb| positions[nb]).collect();
    if placed.is_empty() {
        f64::MAX
    } else {
        placed.iter().sum::<usize>() as f64 / placed.len() as f64
    }
}

fn positions_of(rank: &[usize], n: usize) -> Vec<Option<usize>> {
    let mut positions = vec![None; n];
    for (i, &v) in rank.iter().enumerate() {
        positions[v] = Some(i);
    }
    positions
}

/// Reorder rank `r` by the barycenter of its neighbors in rank `fixed`.
fn sweep(rank_order: &mut [Vec<usize>], graph: &LayoutGraph, r: usize, fixed: usize, upward: bool) {
    let positions = positions_of(&rank_order[fixed], graph.n);
    let mut scored: Vec<(usize, f64)> = rank_order[r]
        .iter()
        .map(|&v| {
            let neighbors = if upward { &graph.rev[v] } else { &graph.adj[v] };
            (v, barycenter(neighbors, &positions))
        })
        .collect();

    // Ties keep id order.
    scored.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| graph.node_ids[a.0].cmp(&graph.node_ids[b.0]))
    });

    rank_order[r] = scored.into_iter().map(|(v, _)| v).collect();
}

/// Count edge crossings between two adjacent ranks.
fn count_crossings(upper: &[usize], lower: &[usize], graph: &LayoutGraph) -> usize {
    let lower_pos = positions_of(lower, graph.n);

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for (i, &u) in upper.iter().enumerate() {
        for &v in &graph.adj[u] {
            if let Some(j) = lower_pos[v] {
                edges.push((i, j));
            }
        }
    }

    let mut crossings = 0;
    for a in 0..edges.len() {
        for b in (a + 1)..edges.len() {
            let (a1, b1) = edges[a];
            let (a2, b2) = edges[b];
            if (a1 < a2 && b1 > b2) || (a1 > a2 && b1 < b2) {
                crossings += 1;
            }
        }
    }
    crossings
}

/// Total crossings across all adjacent rank pairs.
pub(crate) fn total_crossings(rank_order: &[Vec<usize>], graph: &LayoutGraph) -> usize {
    rank_order
        .windows(2)
        .map(|pair| count_crossings(&pair[0], &pair[1], graph))
        .sum()
}

/// Iterated barycenter heuristic.
///
/// Alternates downward and upward sweeps, keeping the best ordering seen, and
/// stops after `max_passes` or the first pass without improvement. Returns the
/// crossing count of the kept ordering.
pub(crate) fn minimize_crossings(
    rank_order: &mut Vec<Vec<usize>>,
    graph: &LayoutGraph,
    max_passes: usize,
) -> usize {
    let mut best_crossings = total_crossings(rank_order, graph);
    if rank_order.len() <= 1 || best_crossings == 0 {
        return best_crossings;
    }

    let mut best_order = rank_order.clone();

    for _ in 0..max_passes {
        for r in 1..rank_order.len() {
            sweep(rank_order, graph, r, r - 1, true);
        }
        for r in (0..rank_order.len() - 1).rev() {
            sweep(rank_order, graph, r, r + 1, false);
        }

        let crossings = total_crossings(rank_order, graph);
        if crossings < best_crossings {
            best_crossings = crossings;
            best_order = rank_order.clone();
            if crossings == 0 {
                break;
            }
        } else {
            break;
        }
    }

    *rank_order = best_order;
    best_crossings
}
