//! The graph container.
//!
//! [`Graph`] owns nodes and links in insertion order and keeps every node's adjacency index in
//! sync with the link collection. Each mutation publishes its events through the graph's
//! [`ChangeNotifier`] before returning.
//!
//! Helper algorithms (breadth-first distances, connected components) live in [`alg`].

pub mod alg;
mod direction;
mod ids;
mod node_ref;

pub use direction::{
    Adjacency, Directed, DirectedAdjacency, Direction, Undirected, UndirectedAdjacency,
};
pub use ids::{Element, ElementKind, GraphId, Link, LinkId, NodeId};
pub use node_ref::NodeRef;

use crate::error::{GraphError, Result};
use crate::notify::{ChangeNotifier, EventKind, GraphEvent, GraphObserver, SubscriptionId};
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::marker::PhantomData;

type IndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

pub type UndirectedGraph = Graph<Undirected>;
pub type DirectedGraph = Graph<Directed>;

pub struct Graph<D: Direction> {
    id: GraphId,
    next_node_index: u64,
    next_link_index: u64,
    nodes: IndexMap<NodeId, D::Adjacency>,
    links: IndexMap<LinkId, Link>,
    notifier: ChangeNotifier,
    _direction: PhantomData<D>,
}

impl<D: Direction> Default for Graph<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Direction> Graph<D> {
    pub fn new() -> Self {
        let id = GraphId::fresh();
        Self {
            id,
            next_node_index: 1,
            next_link_index: 1,
            nodes: IndexMap::default(),
            links: IndexMap::default(),
            notifier: ChangeNotifier::new(id),
            _direction: PhantomData,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nb_links(&self) -> usize {
        self.links.len()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.links.values().copied()
    }

    pub fn contains(&self, element: impl Into<Element>) -> bool {
        match element.into() {
            Element::Node(v) => self.contains_node(v),
            Element::Link(l) => self.contains_link(l),
        }
    }

    pub fn contains_node(&self, v: NodeId) -> bool {
        self.nodes.contains_key(&v)
    }

    pub fn contains_link(&self, l: impl Into<LinkId>) -> bool {
        self.links.contains_key(&l.into())
    }

    pub fn link(&self, l: impl Into<LinkId>) -> Option<Link> {
        self.links.get(&l.into()).copied()
    }

    /// Node-level view (neighbors, incident links, ...) of `v`.
    pub fn node(&self, v: NodeId) -> Result<NodeRef<'_, D>> {
        let adjacency = self.nodes.get(&v).ok_or(GraphError::NodeMembership {
            graph: self.id,
            node: v,
        })?;
        Ok(NodeRef::new(self, v, adjacency))
    }

    pub(crate) fn adjacency(&self, v: NodeId) -> Option<&D::Adjacency> {
        self.nodes.get(&v)
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut ChangeNotifier {
        &mut self.notifier
    }

    pub fn subscribe<O>(&mut self, kind: EventKind, observer: O) -> SubscriptionId
    where
        O: GraphObserver + 'static,
    {
        self.notifier.subscribe(kind, observer)
    }

    pub fn subscribe_all<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: GraphObserver + 'static,
    {
        self.notifier.subscribe_all(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Adds a fresh node and returns it. Never fails.
    pub fn add_node(&mut self) -> NodeId {
        let v = NodeId::new(self.id, self.next_node_index);
        self.next_node_index += 1;
        self.nodes.insert(v, D::Adjacency::default());
        tracing::trace!(graph = %self.id, node = %v, "add node");
        self.notifier.publish(GraphEvent::NodeAdded {
            node: v,
            refresh: true,
        });
        v
    }

    /// Removes `v` and, before it, every link incident to it.
    ///
    /// Each incident link is announced with `refresh = false`; the node removal itself is
    /// announced last with `refresh = true`.
    pub fn remove_node(&mut self, v: impl Into<Element>) -> Result<()> {
        let v = self.expect_node(v.into())?;
        let incident: Vec<Link> = match self.nodes.get(&v) {
            Some(adjacency) => adjacency.incident_links().collect(),
            None => Vec::new(),
        };
        self.nodes.shift_remove(&v);
        for link in incident {
            self.detach_link(link, false);
        }
        tracing::trace!(graph = %self.id, node = %v, "remove node");
        self.notifier.publish(GraphEvent::NodeRemoved {
            node: v,
            refresh: true,
        });
        Ok(())
    }

    /// Links `u` and `v`: an edge in undirected graphs, the arc `u -> v` in directed ones.
    pub fn add_link(&mut self, u: impl Into<Element>, v: impl Into<Element>) -> Result<Link> {
        let u = self.expect_node(u.into())?;
        let v = self.expect_node(v.into())?;
        if u == v {
            return Err(GraphError::GraphInvariant {
                graph: self.id,
                node: u,
            });
        }
        if let Some(existing) = self.nodes.get(&u).and_then(|adj| adj.duplicate_of(v)) {
            return Err(GraphError::LinkExists {
                graph: self.id,
                link: existing,
            });
        }

        let link = Link::new(
            LinkId::new(self.id, self.next_link_index),
            u,
            v,
            D::DIRECTED,
        );
        self.next_link_index += 1;
        if let Some(adj) = self.nodes.get_mut(&u) {
            adj.attach(u, link);
        }
        if let Some(adj) = self.nodes.get_mut(&v) {
            adj.attach(v, link);
        }
        self.links.insert(link.id(), link);
        tracing::trace!(graph = %self.id, %link, "add link");
        self.notifier.publish(GraphEvent::LinkAdded {
            link,
            refresh: true,
        });
        Ok(link)
    }

    pub fn remove_link(&mut self, l: impl Into<Element>) -> Result<()> {
        let id = match l.into() {
            Element::Link(id) => id,
            other => {
                return Err(GraphError::TypeMismatch {
                    graph: self.id,
                    expected: ElementKind::Link,
                    found: other.kind(),
                });
            }
        };
        let Some(link) = self.links.get(&id).copied() else {
            return Err(GraphError::LinkMembership {
                graph: self.id,
                link: id,
            });
        };
        self.detach_link(link, true);
        Ok(())
    }

    fn detach_link(&mut self, link: Link, refresh: bool) {
        self.links.shift_remove(&link.id());
        let (u, v) = link.extremities();
        if let Some(adj) = self.nodes.get_mut(&u) {
            adj.detach(u, link);
        }
        if let Some(adj) = self.nodes.get_mut(&v) {
            adj.detach(v, link);
        }
        tracing::trace!(graph = %self.id, %link, refresh, "remove link");
        self.notifier.publish(GraphEvent::LinkRemoved { link, refresh });
    }

    fn expect_node(&self, element: Element) -> Result<NodeId> {
        match element {
            Element::Node(v) if self.nodes.contains_key(&v) => Ok(v),
            Element::Node(v) => Err(GraphError::NodeMembership {
                graph: self.id,
                node: v,
            }),
            other => Err(GraphError::TypeMismatch {
                graph: self.id,
                expected: ElementKind::Node,
                found: other.kind(),
            }),
        }
    }
}

impl Graph<Undirected> {
    pub fn add_edge(&mut self, u: impl Into<Element>, v: impl Into<Element>) -> Result<Link> {
        self.add_link(u, v)
    }

    pub fn remove_edge(&mut self, e: impl Into<Element>) -> Result<()> {
        self.remove_link(e)
    }

    pub fn edges(&self) -> impl Iterator<Item = Link> + '_ {
        self.links()
    }

    pub fn nb_edges(&self) -> usize {
        self.nb_links()
    }
}

impl Graph<Directed> {
    /// Adds the arc `u -> v`. The reverse arc `v -> u` may coexist with it.
    pub fn add_arc(&mut self, u: impl Into<Element>, v: impl Into<Element>) -> Result<Link> {
        self.add_link(u, v)
    }

    pub fn remove_arc(&mut self, a: impl Into<Element>) -> Result<()> {
        self.remove_link(a)
    }

    pub fn arcs(&self) -> impl Iterator<Item = Link> + '_ {
        self.links()
    }

    pub fn nb_arcs(&self) -> usize {
        self.nb_links()
    }
}

/// Adjacency matrix, one row per node in insertion order.
///
/// For directed graphs, row `u` column `v` is `1` iff the arc `u -> v` exists.
impl<D: Direction> fmt::Display for Graph<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, adj) in self.nodes.values().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, &v) in self.nodes.keys().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                let linked = adj.duplicate_of(v).is_some();
                f.write_str(if linked { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}

impl<D: Direction> fmt::Debug for Graph<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("directed", &D::DIRECTED)
            .field("nodes", &self.nodes.len())
            .field("links", &self.links.len())
            .field("notifier", &self.notifier)
            .finish()
    }
}
