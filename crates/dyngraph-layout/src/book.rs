use crate::geom::{Canvas, Point};
use crate::seed::SpiralSeeder;
use crate::{Algorithm, Positions};
use dyngraph::{Direction, Graph, GraphError, GraphEvent, GraphId, NodeId, SubscriptionId};
use std::cell::RefCell;
use std::rc::Rc;

/// Positions of a live graph, kept current through the graph's change notifications.
///
/// Added nodes are placed by a [`SpiralSeeder`], removed nodes are forgotten, and every event
/// carrying a refresh hint is counted as a pending redraw for whoever presents the positions.
#[derive(Debug)]
pub struct PositionBook {
    graph: GraphId,
    subscription: SubscriptionId,
    state: Rc<RefCell<BookState>>,
}

#[derive(Debug)]
struct BookState {
    seeder: SpiralSeeder,
    positions: Positions,
    pending_refreshes: usize,
}

impl BookState {
    fn apply(&mut self, event: &GraphEvent) {
        match *event {
            GraphEvent::NodeAdded { node, .. } => {
                if !self.positions.contains_key(&node) {
                    let p = self.seeder.next_point();
                    self.positions.insert(node, p);
                }
            }
            GraphEvent::NodeRemoved { node, .. } => {
                self.positions.remove(&node);
            }
            GraphEvent::LinkAdded { .. } | GraphEvent::LinkRemoved { .. } => {}
        }
        if event.refresh_hint() {
            self.pending_refreshes += 1;
        }
    }
}

impl PositionBook {
    /// Seeds every node already in `graph`, in insertion order, and starts following it.
    pub fn attach<D: Direction>(graph: &mut Graph<D>, canvas: Canvas, node_radius: f64) -> Self {
        let mut seeder = SpiralSeeder::new(canvas, node_radius);
        let positions: Positions = graph.nodes().map(|v| (v, seeder.next_point())).collect();
        let state = Rc::new(RefCell::new(BookState {
            seeder,
            positions,
            pending_refreshes: 0,
        }));

        let shared = Rc::clone(&state);
        let subscription = graph.subscribe_all(move |_: GraphId, event: &GraphEvent| {
            shared.borrow_mut().apply(event);
        });
        tracing::debug!(graph = %graph.id(), nodes = graph.len(), "position book attached");

        Self {
            graph: graph.id(),
            subscription,
            state,
        }
    }

    /// Stops following `graph`. Returns `false` if this book was not subscribed to it.
    pub fn detach<D: Direction>(self, graph: &mut Graph<D>) -> bool {
        graph.id() == self.graph && graph.unsubscribe(self.subscription)
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn canvas(&self) -> Canvas {
        self.state.borrow().seeder.canvas()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self, v: NodeId) -> Option<Point> {
        self.state.borrow().positions.get(&v).copied()
    }

    pub fn positions(&self) -> Positions {
        self.state.borrow().positions.clone()
    }

    pub fn move_node(&mut self, v: NodeId, to: Point) -> dyngraph::Result<()> {
        let mut state = self.state.borrow_mut();
        let Some(p) = state.positions.get_mut(&v) else {
            return Err(GraphError::NodeMembership {
                graph: self.graph,
                node: v,
            });
        };
        *p = to;
        Ok(())
    }

    pub fn pending_refreshes(&self) -> usize {
        self.state.borrow().pending_refreshes
    }

    /// Returns the number of pending redraws and clears it.
    pub fn take_refreshes(&mut self) -> usize {
        std::mem::take(&mut self.state.borrow_mut().pending_refreshes)
    }

    /// Lays `graph` out from the current positions and moves every known node to its result.
    ///
    /// Returns the number of nodes moved; a non-empty move requests one redraw.
    pub fn place_nodes<D: Direction>(&mut self, graph: &Graph<D>, algorithm: &Algorithm) -> usize {
        if graph.is_empty() || graph.id() != self.graph {
            return 0;
        }
        let canvas = self.canvas();
        let placed = crate::layout(graph, &self.positions(), canvas, algorithm);

        let mut state = self.state.borrow_mut();
        let mut moved = 0;
        for (v, p) in placed {
            if let Some(slot) = state.positions.get_mut(&v) {
                *slot = p;
                moved += 1;
            }
        }
        if moved > 0 {
            state.pending_refreshes += 1;
        }
        tracing::debug!(graph = %self.graph, moved, "placed nodes");
        moved
    }
}
