use crate::geom::{Canvas, Point};
use std::f64::consts::TAU;

/// Default placement for nodes that have no position yet.
///
/// The first point is the canvas centre. Following points walk concentric rings around it,
/// `4 * node_radius` apart both between rings and along a ring. Points outside the canvas are
/// skipped, and once a ring starts beyond the right edge the walk starts over at the centre.
#[derive(Debug, Clone)]
pub struct SpiralSeeder {
    canvas: Canvas,
    spacing: f64,
    current: Point,
    radius: f64,
    angle: f64,
    step: f64,
}

// Bounds the search for the next in-canvas point on degenerate canvases.
const MAX_PROBES: usize = 1 << 20;

impl SpiralSeeder {
    pub fn new(canvas: Canvas, node_radius: f64) -> Self {
        let mut seeder = Self {
            canvas,
            spacing: (4.0 * node_radius).max(1.0),
            current: Point::default(),
            radius: 0.0,
            angle: 0.0,
            step: 0.0,
        };
        seeder.restart();
        seeder
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Returns the current point and moves on to the next one.
    pub fn next_point(&mut self) -> Point {
        let p = self.current;
        self.advance();
        p
    }

    fn restart(&mut self) {
        self.current = self.canvas.center();
        self.radius = 0.0;
        self.angle = TAU;
        self.step = 0.0;
    }

    fn advance(&mut self) {
        let center = self.canvas.center();
        for _ in 0..MAX_PROBES {
            self.angle += self.step;
            if self.angle >= TAU {
                self.angle = 0.0;
                self.radius += self.spacing;
                self.step = self.spacing / self.radius;
            }
            let p = Point::new(
                center.x + self.radius * self.angle.cos(),
                center.y + self.radius * self.angle.sin(),
            );
            if p.y == center.y && p.x > self.canvas.width {
                self.restart();
                return;
            }
            if self.canvas.contains(p) {
                self.current = p;
                return;
            }
        }
        self.restart();
    }
}
