//! Observer registration for structural changes of one graph.
//!
//! Every mutation of a [`Graph`](crate::Graph) publishes its events synchronously, on the
//! caller's thread, before the mutating call returns. Observers receive the id of the graph and
//! the event; they never get access to the graph itself, so they cannot re-enter it.

use crate::graph::{GraphId, Link, NodeId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NodeAdded,
    NodeRemoved,
    LinkAdded,
    LinkRemoved,
}

/// A structural change.
///
/// `refresh` tells a presenting observer whether it should redraw immediately. Removing a node
/// first publishes one `LinkRemoved { refresh: false }` per incident link and then a single
/// `NodeRemoved { refresh: true }`, so the presentation is updated once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    NodeAdded { node: NodeId, refresh: bool },
    NodeRemoved { node: NodeId, refresh: bool },
    LinkAdded { link: Link, refresh: bool },
    LinkRemoved { link: Link, refresh: bool },
}

impl GraphEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GraphEvent::NodeAdded { .. } => EventKind::NodeAdded,
            GraphEvent::NodeRemoved { .. } => EventKind::NodeRemoved,
            GraphEvent::LinkAdded { .. } => EventKind::LinkAdded,
            GraphEvent::LinkRemoved { .. } => EventKind::LinkRemoved,
        }
    }

    pub fn refresh_hint(&self) -> bool {
        match *self {
            GraphEvent::NodeAdded { refresh, .. }
            | GraphEvent::NodeRemoved { refresh, .. }
            | GraphEvent::LinkAdded { refresh, .. }
            | GraphEvent::LinkRemoved { refresh, .. } => refresh,
        }
    }
}

pub trait GraphObserver {
    fn notify(&mut self, graph: GraphId, event: &GraphEvent);
}

impl<F> GraphObserver for F
where
    F: FnMut(GraphId, &GraphEvent),
{
    fn notify(&mut self, graph: GraphId, event: &GraphEvent) {
        self(graph, event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    // `None` receives every kind.
    kind: Option<EventKind>,
    observer: Box<dyn GraphObserver>,
}

pub struct ChangeNotifier {
    graph: GraphId,
    next_subscription: u64,
    subscribers: Vec<Subscriber>,
}

impl ChangeNotifier {
    pub(crate) fn new(graph: GraphId) -> Self {
        Self {
            graph,
            next_subscription: 1,
            subscribers: Vec::new(),
        }
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Registers `observer` for events of a single kind.
    pub fn subscribe<O>(&mut self, kind: EventKind, observer: O) -> SubscriptionId
    where
        O: GraphObserver + 'static,
    {
        self.register(Some(kind), Box::new(observer))
    }

    /// Registers `observer` for every event kind.
    pub fn subscribe_all<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: GraphObserver + 'static,
    {
        self.register(None, Box::new(observer))
    }

    /// Returns `false` if `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.subscribers.len()
    }

    fn register(
        &mut self,
        kind: Option<EventKind>,
        observer: Box<dyn GraphObserver>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber { id, kind, observer });
        id
    }

    /// Delivers `event` to matching observers in registration order.
    pub(crate) fn publish(&mut self, event: GraphEvent) {
        let kind = event.kind();
        tracing::trace!(graph = %self.graph, ?event, "publish");
        for s in &mut self.subscribers {
            if s.kind.is_none_or(|k| k == kind) {
                s.observer.notify(self.graph, &event);
            }
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("graph", &self.graph)
            .field("observers", &self.subscribers.len())
            .finish()
    }
}
