use crate::graph::{ElementKind, GraphId, Link, LinkId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("graph {graph}: expected a {expected}, got a {found}")]
    TypeMismatch {
        graph: GraphId,
        expected: ElementKind,
        found: ElementKind,
    },

    #[error("node {node} in graph {graph}: the node does not belong to the graph")]
    NodeMembership { graph: GraphId, node: NodeId },

    #[error("link {link} in graph {graph}: the link does not belong to the graph")]
    LinkMembership { graph: GraphId, link: LinkId },

    #[error("node {node} in graph {graph}: a node cannot be linked to itself")]
    GraphInvariant { graph: GraphId, node: NodeId },

    #[error("{kind} {link} in graph {graph}: the {kind} already exists", kind = .link.kind_name())]
    LinkExists { graph: GraphId, link: Link },

    #[error("node {node} in graph {graph}: {other} is not a neighbor of the node")]
    NotNeighbor {
        graph: GraphId,
        node: NodeId,
        other: NodeId,
    },
}

impl GraphError {
    /// The link that already connected the endpoints, for [`GraphError::LinkExists`].
    pub fn existing_link(&self) -> Option<Link> {
        match self {
            GraphError::LinkExists { link, .. } => Some(*link),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
