//! Kamada-Kawai spring layout.
//!
//! Every pair of nodes in a component is joined by a spring whose rest length is proportional to
//! their hop distance and whose stiffness is `1 / hops^2`. The node with the steepest energy
//! gradient is moved by Newton steps on its 2x2 Hessian block until its own gradient vanishes,
//! then the next steepest node is picked. Components are laid out independently and then packed
//! side by side into the canvas.

use crate::Positions;
use crate::algo::KamadaKawaiOptions;
use crate::geom::{Canvas, Point};
use crate::pack;
use dyngraph::alg::{DistanceTable, all_distances, connected_components};
use dyngraph::{Direction, Graph, NodeId};
use nalgebra::{Matrix2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Moves every node of `graph` in place. `positions` must hold a start position for each node.
pub fn layout<D: Direction>(
    graph: &Graph<D>,
    positions: &mut Positions,
    canvas: Canvas,
    opts: &KamadaKawaiOptions,
) {
    if graph.is_empty() {
        return;
    }

    let dists = all_distances(graph);
    // Normalised over the whole graph so that every component shares one unit length.
    let longest = dists
        .values()
        .flat_map(|from| from.values().copied())
        .max()
        .unwrap_or(0)
        .max(1);
    let unit = opts.node_radius * opts.base_length_factor / longest as f64;
    let cap = opts.max_iterations_per_node.saturating_mul(graph.len());
    let mut rng = StdRng::seed_from_u64(opts.random_seed);

    let components = connected_components(graph);
    tracing::debug!(
        nodes = graph.len(),
        components = components.len(),
        longest,
        unit,
        "kamada-kawai"
    );

    for (index, comp) in components.iter().enumerate() {
        if comp.len() < 2 {
            continue;
        }
        let mut springs = Springs::new(comp, &dists, positions, canvas.center(), unit);
        springs.jitter = opts.node_radius.max(1.0);
        match springs.minimize(cap, opts, canvas, &mut rng) {
            Outcome::Converged { restarts } => {
                tracing::debug!(component = index, size = comp.len(), restarts, "converged");
            }
            Outcome::GaveUp { restarts } => {
                tracing::warn!(
                    component = index,
                    size = comp.len(),
                    restarts,
                    "no convergence, keeping the lowest-energy placement"
                );
            }
        }
        for (local, &v) in comp.iter().enumerate() {
            positions.insert(v, springs.point(local));
        }
    }

    pack::pack_components(&components, positions, canvas, opts.node_radius);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Converged { restarts: usize },
    GaveUp { restarts: usize },
}

/// Spring system of one connected component, indexed locally `0..n`.
struct Springs {
    n: usize,
    /// Row-major hop distances.
    hops: Vec<f64>,
    unit: f64,
    pos: Vec<Vector2<f64>>,
    jitter: f64,
}

impl Springs {
    fn new(
        comp: &[NodeId],
        dists: &DistanceTable,
        positions: &Positions,
        fallback: Point,
        unit: f64,
    ) -> Self {
        let n = comp.len();
        let mut hops = vec![0.0; n * n];
        for (i, u) in comp.iter().enumerate() {
            let Some(from_u) = dists.get(u) else {
                continue;
            };
            for (j, v) in comp.iter().enumerate() {
                if let Some(&d) = from_u.get(v) {
                    hops[i * n + j] = d as f64;
                }
            }
        }
        let pos: Vec<Vector2<f64>> = comp
            .iter()
            .map(|v| positions.get(v).copied().unwrap_or(fallback).into())
            .collect();
        Self {
            n,
            hops,
            unit,
            pos,
            jitter: 1.0,
        }
    }

    fn point(&self, i: usize) -> Point {
        self.pos[i].into()
    }

    /// Rest length and stiffness of the spring between `i` and `j`.
    fn spring(&self, i: usize, j: usize) -> (f64, f64) {
        let d = self.hops[i * self.n + j];
        (self.unit * d, 1.0 / (d * d))
    }

    fn gradient(&self, i: usize) -> Vector2<f64> {
        let mut g = Vector2::zeros();
        for j in (0..self.n).filter(|&j| j != i) {
            let (l, k) = self.spring(i, j);
            let diff = self.pos[i] - self.pos[j];
            let len = diff.norm();
            g += (diff - diff * (l / len)) * k;
        }
        g
    }

    fn hessian(&self, i: usize) -> Matrix2<f64> {
        let (mut xx, mut xy, mut yy) = (0.0, 0.0, 0.0);
        for j in (0..self.n).filter(|&j| j != i) {
            let (l, k) = self.spring(i, j);
            let diff = self.pos[i] - self.pos[j];
            let len = diff.norm();
            let cube = len * len * len;
            xx += k * (1.0 - l * (1.0 / len - diff.x * diff.x / cube));
            xy += k * l * diff.x * diff.y / cube;
            yy += k * (1.0 - l * (1.0 / len - diff.y * diff.y / cube));
        }
        Matrix2::new(xx, xy, xy, yy)
    }

    /// Gradient norm of `i`; non-finite values count as infinitely far from converged.
    fn delta(&self, i: usize) -> f64 {
        let norm = self.gradient(i).norm();
        if norm.is_finite() { norm } else { f64::INFINITY }
    }

    /// First node with the largest gradient norm.
    fn worst(&self) -> (usize, f64) {
        let mut best = (0, f64::NEG_INFINITY);
        for i in 0..self.n {
            let d = self.delta(i);
            if d > best.1 {
                best = (i, d);
            }
        }
        best
    }

    fn newton_step(&self, i: usize) -> Option<Vector2<f64>> {
        let inverse = self.hessian(i).try_inverse()?;
        let step = inverse * -self.gradient(i);
        step.iter().all(|c| c.is_finite()).then_some(step)
    }

    fn energy(&self) -> f64 {
        let mut e = 0.0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let (l, k) = self.spring(i, j);
                let stretch = (self.pos[i] - self.pos[j]).norm() - l;
                e += k * stretch * stretch;
            }
        }
        e
    }

    /// Nudges `i` off any node sitting on exactly the same coordinates.
    fn separate(&mut self, i: usize, rng: &mut StdRng) {
        for _ in 0..16 {
            let p = self.pos[i];
            let clash = (0..self.n).any(|j| j != i && self.pos[j] == p);
            if !clash {
                return;
            }
            let r = self.jitter;
            self.pos[i] += Vector2::new(rng.gen_range(-r..=r), rng.gen_range(-r..=r));
        }
    }

    fn scatter(&mut self, canvas: Canvas, rng: &mut StdRng) {
        for p in &mut self.pos {
            *p = Vector2::new(
                rng.gen_range(0.0..=canvas.width),
                rng.gen_range(0.0..=canvas.height),
            );
        }
        for i in 0..self.n {
            self.separate(i, rng);
        }
    }

    fn remember(&self, best: &mut Option<(f64, Vec<Vector2<f64>>)>) {
        let e = self.energy();
        if e.is_finite() && best.as_ref().is_none_or(|(b, _)| e < *b) {
            *best = Some((e, self.pos.clone()));
        }
    }

    fn minimize(
        &mut self,
        cap: usize,
        opts: &KamadaKawaiOptions,
        canvas: Canvas,
        rng: &mut StdRng,
    ) -> Outcome {
        for i in 0..self.n {
            self.separate(i, rng);
        }

        let mut best = None;
        let mut restarts = 0;
        let mut outer = 0;
        let (mut u, mut delta) = self.worst();
        while delta > opts.epsilon {
            outer += 1;
            let mut inner = 0;
            while delta > opts.epsilon {
                inner += 1;
                let step = if outer > cap || inner > cap {
                    None
                } else {
                    self.newton_step(u)
                };
                let Some(step) = step else {
                    self.remember(&mut best);
                    if restarts > opts.max_restarts {
                        if let Some((_, snapshot)) = best {
                            self.pos = snapshot;
                        }
                        return Outcome::GaveUp { restarts };
                    }
                    self.scatter(canvas, rng);
                    restarts += 1;
                    outer = 0;
                    break;
                };
                self.pos[u] += step;
                self.separate(u, rng);
                delta = self.delta(u);
            }
            (u, delta) = self.worst();
        }
        Outcome::Converged { restarts }
    }
}
