//! Borrowed node views.

use super::Graph;
use super::direction::{Adjacency, Directed, Direction};
use super::ids::{Link, NodeId};
use crate::error::{GraphError, Result};

/// A node together with the graph it belongs to.
///
/// Obtained from [`Graph::node`]. Directed graphs additionally expose the input/output
/// qualified queries.
pub struct NodeRef<'g, D: Direction> {
    graph: &'g Graph<D>,
    id: NodeId,
    adjacency: &'g D::Adjacency,
}

impl<D: Direction> Clone for NodeRef<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Direction> Copy for NodeRef<'_, D> {}

impl<'g, D: Direction> NodeRef<'g, D> {
    pub(super) fn new(graph: &'g Graph<D>, id: NodeId, adjacency: &'g D::Adjacency) -> Self {
        Self {
            graph,
            id,
            adjacency,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn index(&self) -> u64 {
        self.id.index()
    }

    /// Neighbors, each reported once even when linked in both directions.
    pub fn neighbors(self) -> impl Iterator<Item = NodeId> + 'g {
        self.adjacency.neighbors()
    }

    pub fn nb_neighbors(&self) -> usize {
        self.adjacency.nb_neighbors()
    }

    pub fn is_neighbor_of(&self, v: NodeId) -> bool {
        self.adjacency.is_neighbor_of(v)
    }

    pub fn incident_links(self) -> impl Iterator<Item = Link> + 'g {
        self.adjacency.incident_links()
    }

    pub fn nb_incident_links(&self) -> usize {
        self.adjacency.nb_incident_links()
    }

    /// The link between this node and `v`; for directed graphs the arc `v -> self` wins over
    /// `self -> v` when both exist.
    pub fn get_incident_link(&self, v: NodeId) -> Result<Link> {
        self.adjacency
            .incident_link(v)
            .ok_or_else(|| self.not_neighbor(v))
    }

    pub fn is_incident_to(&self, link: Link) -> bool {
        let (u, v) = link.extremities();
        (u == self.id || v == self.id) && self.graph.contains_link(link)
    }

    fn not_neighbor(&self, other: NodeId) -> GraphError {
        GraphError::NotNeighbor {
            graph: self.graph.id(),
            node: self.id,
            other,
        }
    }
}

impl<'g> NodeRef<'g, Directed> {
    pub fn input_neighbors(self) -> impl Iterator<Item = NodeId> + 'g {
        self.adjacency.input_neighbors()
    }

    pub fn output_neighbors(self) -> impl Iterator<Item = NodeId> + 'g {
        self.adjacency.output_neighbors()
    }

    pub fn nb_input_neighbors(&self) -> usize {
        self.adjacency.nb_input_neighbors()
    }

    pub fn nb_output_neighbors(&self) -> usize {
        self.adjacency.nb_output_neighbors()
    }

    /// `true` iff the arc `self -> v` exists, i.e. this node is an input neighbor of `v`.
    pub fn is_input_neighbor_of(&self, v: NodeId) -> bool {
        self.adjacency.output_arc(v).is_some()
    }

    /// `true` iff the arc `v -> self` exists, i.e. this node is an output neighbor of `v`.
    pub fn is_output_neighbor_of(&self, v: NodeId) -> bool {
        self.adjacency.input_arc(v).is_some()
    }

    pub fn input_arcs(self) -> impl Iterator<Item = Link> + 'g {
        self.adjacency.input_arcs()
    }

    pub fn output_arcs(self) -> impl Iterator<Item = Link> + 'g {
        self.adjacency.output_arcs()
    }

    /// Output arcs followed by input arcs.
    pub fn incident_arcs(self) -> impl Iterator<Item = Link> + 'g {
        self.incident_links()
    }

    /// The arc `v -> self`.
    pub fn get_input_arc(&self, v: NodeId) -> Result<Link> {
        self.adjacency
            .input_arc(v)
            .ok_or_else(|| self.not_neighbor(v))
    }

    /// The arc `self -> v`.
    pub fn get_output_arc(&self, v: NodeId) -> Result<Link> {
        self.adjacency
            .output_arc(v)
            .ok_or_else(|| self.not_neighbor(v))
    }

    pub fn get_incident_arc(&self, v: NodeId) -> Result<Link> {
        self.get_incident_link(v)
    }

    pub fn is_input_arc(&self, a: Link) -> bool {
        a.output_node() == self.id && self.adjacency.input_arc(a.input_node()) == Some(a)
    }

    pub fn is_output_arc(&self, a: Link) -> bool {
        a.input_node() == self.id && self.adjacency.output_arc(a.output_node()) == Some(a)
    }
}
