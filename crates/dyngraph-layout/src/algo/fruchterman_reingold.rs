//! Fruchterman-Reingold spring-electrical layout.
//!
//! All node pairs repel with `k^2 / d`, linked nodes attract with `d^2 / k`, and each node is
//! also pushed away from the four canvas borders. Displacements are capped by a temperature
//! that cools geometrically after every sweep. Unlike Kamada-Kawai the whole graph is simulated
//! at once and no packing follows.

use crate::Positions;
use crate::algo::FruchtermanReingoldOptions;
use crate::geom::Canvas;
use dyngraph::{Direction, Graph, NodeId};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::f64::consts::TAU;

/// Moves every node of `graph` in place. `positions` must hold a start position for each node.
pub fn layout<D: Direction>(
    graph: &Graph<D>,
    positions: &mut Positions,
    canvas: Canvas,
    opts: &FruchtermanReingoldOptions,
) {
    let nodes: Vec<NodeId> = graph.nodes().collect();
    let n = nodes.len();
    if n == 0 {
        return;
    }

    let k = (canvas.width * canvas.height / n as f64).sqrt();
    if !(k > 0.0 && k.is_finite()) {
        tracing::warn!(
            width = canvas.width,
            height = canvas.height,
            "canvas has no area, positions left untouched"
        );
        return;
    }

    let index: FxHashMap<NodeId, usize> = nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let links: Vec<(usize, usize)> = graph
        .links()
        .filter_map(|l| {
            let (u, v) = l.extremities();
            Some((*index.get(&u)?, *index.get(&v)?))
        })
        .collect();
    let mut pos: Vec<Vector2<f64>> = nodes
        .iter()
        .map(|v| positions.get(v).copied().unwrap_or(canvas.center()).into())
        .collect();

    let mut rng = StdRng::seed_from_u64(opts.random_seed);
    let mut forces: Vec<Vector2<f64>> = vec![Vector2::zeros(); n];
    let mut temp = opts.initial_temperature;
    let sweeps = opts.iterations_per_node.saturating_mul(n);
    let max_x = (canvas.width - 2.0 * opts.node_radius).max(0.0);
    let max_y = (canvas.height - 2.0 * opts.node_radius).max(0.0);
    tracing::debug!(nodes = n, links = links.len(), sweeps, k, "fruchterman-reingold");

    for _ in 0..sweeps {
        for u in 0..n {
            let p = pos[u];
            let mut f = Vector2::zeros();
            for v in (0..n).filter(|&v| v != u) {
                f += repulsion(p - pos[v], k).unwrap_or_else(|| {
                    let a = rng.gen_range(0.0..TAU);
                    Vector2::new(a.cos(), a.sin()) * k
                });
            }
            let borders = [
                Vector2::new(p.x, 0.0),
                Vector2::new(p.x, canvas.height),
                Vector2::new(0.0, p.y),
                Vector2::new(canvas.width, p.y),
            ];
            for b in borders {
                f += repulsion(p - b, k).unwrap_or_else(Vector2::zeros);
            }
            forces[u] = f;
        }

        for &(u, v) in &links {
            let uv = pos[v] - pos[u];
            // Unit vector times d^2 / k.
            let pull = uv * (uv.norm() / k);
            forces[u] += pull;
            forces[v] -= pull;
        }

        for (p, f) in pos.iter_mut().zip(&forces) {
            let mag = f.norm();
            if mag > 0.0 && mag.is_finite() {
                *p += f * (mag.min(temp) / mag);
            }
            p.x = p.x.clamp(0.0, max_x);
            p.y = p.y.clamp(0.0, max_y);
        }

        temp *= opts.cooling_factor;
    }

    for (v, p) in nodes.into_iter().zip(pos) {
        positions.insert(v, p.into());
    }
}

/// Push of magnitude `k^2 / d` along `diff`, or `None` when the points coincide.
fn repulsion(diff: Vector2<f64>, k: f64) -> Option<Vector2<f64>> {
    let d2 = diff.norm_squared();
    (d2 > 0.0).then(|| diff * (k * k / d2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repulsion_decays_with_distance() {
        let near = repulsion(Vector2::new(1.0, 0.0), 10.0).unwrap();
        let far = repulsion(Vector2::new(4.0, 0.0), 10.0).unwrap();
        assert_eq!(near, Vector2::new(100.0, 0.0));
        assert_eq!(far, Vector2::new(25.0, 0.0));
        assert!(repulsion(Vector2::zeros(), 10.0).is_none());
    }
}
