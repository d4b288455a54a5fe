#![forbid(unsafe_code)]

//! Headless force-directed layout for `dyngraph` graphs.
//!
//! Layout never fails: degenerate inputs and non-converging components degrade to a
//! best-effort placement. Nodes without a usable start position are seeded on a
//! [`SpiralSeeder`] walk around the canvas centre.

pub mod algo;
mod book;
pub mod geom;
mod pack;
mod seed;

pub use algo::{Algorithm, FruchtermanReingoldOptions, KamadaKawaiOptions};
pub use book::PositionBook;
pub use geom::{Canvas, Point, Rect};
pub use seed::SpiralSeeder;

use dyngraph::{Direction, Graph, NodeId};
use std::collections::BTreeMap;

pub type Positions = BTreeMap<NodeId, Point>;

/// Kamada-Kawai layout with default options on a `canvas_width` x `canvas_height` canvas.
///
/// The result holds exactly the nodes of `graph`; entries of `current_positions` for other nodes
/// are ignored.
pub fn compute_layout<D: Direction>(
    graph: &Graph<D>,
    current_positions: &Positions,
    canvas_width: f64,
    canvas_height: f64,
) -> Positions {
    layout(
        graph,
        current_positions,
        Canvas::new(canvas_width, canvas_height),
        &Algorithm::default(),
    )
}

/// Headless layout entry point.
pub fn layout<D: Direction>(
    graph: &Graph<D>,
    current_positions: &Positions,
    canvas: Canvas,
    algorithm: &Algorithm,
) -> Positions {
    let mut positions = Positions::new();
    if graph.is_empty() {
        return positions;
    }
    let canvas = Canvas::new(canvas.width, canvas.height);

    let mut seeder = SpiralSeeder::new(canvas, algorithm.node_radius());
    let mut seeded = 0usize;
    for v in graph.nodes() {
        let p = match current_positions.get(&v) {
            Some(p) if p.is_finite() => *p,
            _ => {
                seeded += 1;
                seeder.next_point()
            }
        };
        positions.insert(v, p);
    }
    tracing::debug!(graph = %graph.id(), nodes = graph.len(), seeded, "layout");

    match algorithm {
        Algorithm::KamadaKawai(opts) => {
            algo::kamada_kawai::layout(graph, &mut positions, canvas, opts)
        }
        Algorithm::FruchtermanReingold(opts) => {
            algo::fruchterman_reingold::layout(graph, &mut positions, canvas, opts)
        }
    }
    positions
}
