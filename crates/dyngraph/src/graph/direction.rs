//! Direction policies and the per-node adjacency index each of them stores.
//!
//! An undirected node keeps a single `neighbor -> edge` map. A directed node keeps an input map
//! (`predecessor -> arc`), an output map (`successor -> arc`) and the deduplicated union of
//! both key sets, so a node linked both ways counts as one neighbor but two incident arcs.

use super::ids::{Link, NodeId};
use rustc_hash::FxBuildHasher;
use std::fmt::Debug;

type IndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;
type IndexSet<T> = indexmap::IndexSet<T, FxBuildHasher>;

/// Adjacency storage and neighbor rules for one direction policy.
pub trait Adjacency: Default + Debug + Clone + 'static {
    /// Registers `link` at the node `this`, which must be one of its extremities.
    fn attach(&mut self, this: NodeId, link: Link);

    /// Unregisters `link` from the node `this`.
    fn detach(&mut self, this: NodeId, link: Link);

    /// The link that makes adding `this -> v` a duplicate, if any.
    fn duplicate_of(&self, v: NodeId) -> Option<Link>;

    /// The link between this node and `v`. Directed nodes prefer the input arc.
    fn incident_link(&self, v: NodeId) -> Option<Link>;

    fn is_neighbor_of(&self, v: NodeId) -> bool;

    fn nb_neighbors(&self) -> usize;

    fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_;

    /// Every incident link. Not deduplicated: arcs `u->v` and `v->u` are both reported.
    fn incident_links(&self) -> impl Iterator<Item = Link> + '_;

    fn nb_incident_links(&self) -> usize;
}

/// Direction policy of a [`Graph`](super::Graph).
pub trait Direction: Debug + Default + Clone + Copy + 'static {
    const DIRECTED: bool;

    type Adjacency: Adjacency;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Undirected;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Directed;

impl Direction for Undirected {
    const DIRECTED: bool = false;

    type Adjacency = UndirectedAdjacency;
}

impl Direction for Directed {
    const DIRECTED: bool = true;

    type Adjacency = DirectedAdjacency;
}

#[derive(Debug, Default, Clone)]
pub struct UndirectedAdjacency {
    edges: IndexMap<NodeId, Link>,
}

impl Adjacency for UndirectedAdjacency {
    fn attach(&mut self, this: NodeId, link: Link) {
        if let Some(v) = link.neighbor(this) {
            self.edges.insert(v, link);
        } else {
            debug_assert!(false, "attached an edge that is not incident to the node");
        }
    }

    fn detach(&mut self, this: NodeId, link: Link) {
        if let Some(v) = link.neighbor(this) {
            self.edges.shift_remove(&v);
        }
    }

    fn duplicate_of(&self, v: NodeId) -> Option<Link> {
        self.edges.get(&v).copied()
    }

    fn incident_link(&self, v: NodeId) -> Option<Link> {
        self.edges.get(&v).copied()
    }

    fn is_neighbor_of(&self, v: NodeId) -> bool {
        self.edges.contains_key(&v)
    }

    fn nb_neighbors(&self) -> usize {
        self.edges.len()
    }

    fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.keys().copied()
    }

    fn incident_links(&self) -> impl Iterator<Item = Link> + '_ {
        self.edges.values().copied()
    }

    fn nb_incident_links(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Debug, Default, Clone)]
pub struct DirectedAdjacency {
    input: IndexMap<NodeId, Link>,
    output: IndexMap<NodeId, Link>,
    neighbors: IndexSet<NodeId>,
}

impl DirectedAdjacency {
    pub fn input_neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.input.keys().copied()
    }

    pub fn output_neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.output.keys().copied()
    }

    pub fn nb_input_neighbors(&self) -> usize {
        self.input.len()
    }

    pub fn nb_output_neighbors(&self) -> usize {
        self.output.len()
    }

    /// Arc `v -> self`.
    pub fn input_arc(&self, v: NodeId) -> Option<Link> {
        self.input.get(&v).copied()
    }

    /// Arc `self -> v`.
    pub fn output_arc(&self, v: NodeId) -> Option<Link> {
        self.output.get(&v).copied()
    }

    pub fn input_arcs(&self) -> impl Iterator<Item = Link> + '_ {
        self.input.values().copied()
    }

    pub fn output_arcs(&self) -> impl Iterator<Item = Link> + '_ {
        self.output.values().copied()
    }

    fn remove_input_neighbor(&mut self, v: NodeId) {
        if self.input.shift_remove(&v).is_some() && !self.output.contains_key(&v) {
            self.neighbors.shift_remove(&v);
        }
    }

    fn remove_output_neighbor(&mut self, v: NodeId) {
        if self.output.shift_remove(&v).is_some() && !self.input.contains_key(&v) {
            self.neighbors.shift_remove(&v);
        }
    }
}

impl Adjacency for DirectedAdjacency {
    fn attach(&mut self, this: NodeId, link: Link) {
        let (u, v) = link.extremities();
        if u == this {
            self.output.insert(v, link);
            self.neighbors.insert(v);
        } else if v == this {
            self.input.insert(u, link);
            self.neighbors.insert(u);
        } else {
            debug_assert!(false, "attached an arc that is not incident to the node");
        }
    }

    fn detach(&mut self, this: NodeId, link: Link) {
        let (u, v) = link.extremities();
        if u == this {
            self.remove_output_neighbor(v);
        } else if v == this {
            self.remove_input_neighbor(u);
        }
    }

    fn duplicate_of(&self, v: NodeId) -> Option<Link> {
        self.output_arc(v)
    }

    fn incident_link(&self, v: NodeId) -> Option<Link> {
        self.input_arc(v).or_else(|| self.output_arc(v))
    }

    fn is_neighbor_of(&self, v: NodeId) -> bool {
        self.neighbors.contains(&v)
    }

    fn nb_neighbors(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors.iter().copied()
    }

    fn incident_links(&self) -> impl Iterator<Item = Link> + '_ {
        self.output.values().chain(self.input.values()).copied()
    }

    fn nb_incident_links(&self) -> usize {
        self.input.len() + self.output.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ids::{GraphId, LinkId};

    fn ids() -> (GraphId, NodeId, NodeId) {
        let g = GraphId::fresh();
        (g, NodeId::new(g, 1), NodeId::new(g, 2))
    }

    #[test]
    fn directed_neighbor_survives_until_both_arcs_are_gone() {
        let (g, a, b) = ids();
        let ab = Link::new(LinkId::new(g, 1), a, b, true);
        let ba = Link::new(LinkId::new(g, 2), b, a, true);

        let mut adj = DirectedAdjacency::default();
        adj.attach(a, ab);
        adj.attach(a, ba);
        assert_eq!(adj.nb_neighbors(), 1);
        assert_eq!(adj.nb_incident_links(), 2);

        adj.detach(a, ab);
        assert!(adj.is_neighbor_of(b));
        assert_eq!(adj.output_arc(b), None);
        assert_eq!(adj.input_arc(b), Some(ba));

        adj.detach(a, ba);
        assert!(!adj.is_neighbor_of(b));
        assert_eq!(adj.nb_incident_links(), 0);
    }

    #[test]
    fn directed_incident_link_prefers_the_input_arc() {
        let (g, a, b) = ids();
        let ab = Link::new(LinkId::new(g, 1), a, b, true);
        let ba = Link::new(LinkId::new(g, 2), b, a, true);

        let mut adj = DirectedAdjacency::default();
        adj.attach(a, ab);
        assert_eq!(adj.incident_link(b), Some(ab));
        adj.attach(a, ba);
        assert_eq!(adj.incident_link(b), Some(ba));
    }

    #[test]
    fn directed_incident_links_lists_outputs_before_inputs() {
        let (g, a, b) = ids();
        let ba = Link::new(LinkId::new(g, 1), b, a, true);
        let ab = Link::new(LinkId::new(g, 2), a, b, true);

        let mut adj = DirectedAdjacency::default();
        adj.attach(a, ba);
        adj.attach(a, ab);
        let links: Vec<Link> = adj.incident_links().collect();
        assert_eq!(links, vec![ab, ba]);
    }

    #[test]
    fn undirected_detach_forgets_the_neighbor() {
        let (g, a, b) = ids();
        let ab = Link::new(LinkId::new(g, 1), a, b, false);

        let mut left = UndirectedAdjacency::default();
        let mut right = UndirectedAdjacency::default();
        left.attach(a, ab);
        right.attach(b, ab);
        assert_eq!(left.duplicate_of(b), Some(ab));
        assert_eq!(right.duplicate_of(a), Some(ab));

        left.detach(a, ab);
        right.detach(b, ab);
        assert!(!left.is_neighbor_of(b));
        assert!(!right.is_neighbor_of(a));
    }
}
