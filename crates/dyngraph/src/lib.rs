#![forbid(unsafe_code)]

//! Mutable simple graphs with observable structure.
//!
//! A [`Graph`] owns its nodes and links, keeps a per-node adjacency index consistent under
//! insertion and removal, and publishes every structural change through its
//! [`ChangeNotifier`]. Directed and undirected graphs share one implementation, parameterized
//! by a [`Direction`] policy ([`Directed`] / [`Undirected`]).
//!
//! Graphs are simple: self-loops are rejected, an undirected graph holds at most one edge per
//! unordered pair and a directed graph at most one arc per ordered pair.

pub mod error;
pub mod graph;
pub mod notify;

pub use error::{GraphError, Result};
pub use graph::alg;
pub use graph::{
    Adjacency, Directed, DirectedAdjacency, DirectedGraph, Direction, Element, ElementKind, Graph,
    GraphId, Link, LinkId, NodeId, NodeRef, Undirected, UndirectedAdjacency, UndirectedGraph,
};
pub use notify::{ChangeNotifier, EventKind, GraphEvent, GraphObserver, SubscriptionId};
