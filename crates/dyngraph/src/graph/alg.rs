//! Unweighted shortest paths and connected components.
//!
//! Traversal always uses the undirected notion of adjacency: in a directed graph both input and
//! output neighbors are followed.

use super::Graph;
use super::direction::{Adjacency, Direction};
use super::ids::NodeId;
use crate::error::{GraphError, Result};
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

/// Hop count from one source to each node it reaches.
pub type Distances = IndexMap<NodeId, usize>;
/// [`Distances`] for every source node.
pub type DistanceTable = IndexMap<NodeId, Distances>;

/// Hop distances from `source` to every node reachable from it, in discovery order.
///
/// Unreachable nodes are absent from the map. `source` maps to 0.
pub fn distances_from<D: Direction>(g: &Graph<D>, source: NodeId) -> Result<Distances> {
    if !g.contains_node(source) {
        return Err(GraphError::NodeMembership {
            graph: g.id(),
            node: source,
        });
    }
    Ok(bfs(g, source))
}

/// [`distances_from`] for every node of `g`, keyed in node insertion order.
pub fn all_distances<D: Direction>(g: &Graph<D>) -> DistanceTable {
    g.nodes().map(|v| (v, bfs(g, v))).collect()
}

/// Maximal sets of mutually reachable nodes.
///
/// Each traversal starts from the first unvisited node in insertion order, and every component
/// lists its nodes in insertion order.
pub fn connected_components<D: Direction>(g: &Graph<D>) -> Vec<Vec<NodeId>> {
    let mut seen: HashSet<NodeId> = HashSet::default();
    let mut out: Vec<Vec<NodeId>> = Vec::new();

    for start in g.nodes() {
        if seen.contains(&start) {
            continue;
        }
        let reached = bfs(g, start);
        let comp: Vec<NodeId> = g.nodes().filter(|v| reached.contains_key(v)).collect();
        seen.extend(comp.iter().copied());
        out.push(comp);
    }

    out
}

fn bfs<D: Direction>(g: &Graph<D>, source: NodeId) -> Distances {
    let mut dist = Distances::default();
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    dist.insert(source, 0);
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        let (Some(&du), Some(adj)) = (dist.get(&u), g.adjacency(u)) else {
            continue;
        };
        for w in adj.neighbors() {
            if !dist.contains_key(&w) {
                dist.insert(w, du + 1);
                queue.push_back(w);
            }
        }
    }

    dist
}
