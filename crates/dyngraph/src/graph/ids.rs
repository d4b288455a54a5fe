//! Handle types for graphs, nodes and links.
//!
//! Handles are small `Copy` values. A node or link handle remembers the graph that created it,
//! so handing it to another graph is reported as a membership error instead of silently
//! aliasing an unrelated entity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of one graph instance, used to tell observers which graph changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphId(u64);

impl GraphId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of a [`Graph`](super::Graph).
///
/// `index` is assigned from a per-graph counter starting at 1 and is never reused, even after
/// the node is removed. It is what `Display` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    graph: GraphId,
    index: u64,
}

impl NodeId {
    pub(crate) fn new(graph: GraphId, index: u64) -> Self {
        Self { graph, index }
    }

    pub fn graph(self) -> GraphId {
        self.graph
    }

    pub fn index(self) -> u64 {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId {
    graph: GraphId,
    index: u64,
}

impl LinkId {
    pub(crate) fn new(graph: GraphId, index: u64) -> Self {
        Self { graph, index }
    }

    pub fn graph(self) -> GraphId {
        self.graph
    }

    pub fn index(self) -> u64 {
        self.index
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.index)
    }
}

/// An edge (undirected graph) or an arc (directed graph).
///
/// The endpoints are stored in insertion order. For arcs, `input` is the tail and `output` the
/// head; for edges the order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    id: LinkId,
    input: NodeId,
    output: NodeId,
    directed: bool,
}

impl Link {
    pub(crate) fn new(id: LinkId, input: NodeId, output: NodeId, directed: bool) -> Self {
        Self {
            id,
            input,
            output,
            directed,
        }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn extremities(&self) -> (NodeId, NodeId) {
        (self.input, self.output)
    }

    /// Tail of the arc (first endpoint of an edge).
    pub fn input_node(&self) -> NodeId {
        self.input
    }

    /// Head of the arc (second endpoint of an edge).
    pub fn output_node(&self) -> NodeId {
        self.output
    }

    /// The extremity that is not `v`, or `None` if `v` is not an extremity.
    pub fn neighbor(&self, v: NodeId) -> Option<NodeId> {
        if v == self.input {
            Some(self.output)
        } else if v == self.output {
            Some(self.input)
        } else {
            None
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        if self.directed { "arc" } else { "edge" }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.directed { "->" } else { "--" };
        write!(f, "{}{}{}", self.input, sep, self.output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Link,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Node => "node",
            ElementKind::Link => "link",
        })
    }
}

/// Either kind of graph entity.
///
/// Mutations accept `impl Into<Element>`, so a node handle passed where a link is expected
/// fails with [`GraphError::TypeMismatch`](crate::GraphError::TypeMismatch) rather than being
/// reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Node(NodeId),
    Link(LinkId),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Node(_) => ElementKind::Node,
            Element::Link(_) => ElementKind::Link,
        }
    }
}

impl From<NodeId> for Element {
    fn from(v: NodeId) -> Self {
        Element::Node(v)
    }
}

impl From<LinkId> for Element {
    fn from(l: LinkId) -> Self {
        Element::Link(l)
    }
}

impl From<Link> for Element {
    fn from(l: Link) -> Self {
        Element::Link(l.id)
    }
}

impl From<&Link> for Element {
    fn from(l: &Link) -> Self {
        Element::Link(l.id)
    }
}

impl From<Link> for LinkId {
    fn from(l: Link) -> Self {
        l.id
    }
}
