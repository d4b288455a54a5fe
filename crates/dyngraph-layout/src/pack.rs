//! Greedy packing of connected components into one canvas.
//!
//! Every component gets a rectangle with the aspect ratio of its point cloud. The largest
//! component is anchored at the origin; the others follow from largest to smallest, each one
//! on the free corner of an already placed rectangle with the lowest score, the larger of the
//! candidate's far edges and the largest rectangle's extent.
//! The union is finally stretched onto the canvas and every component is remapped into its
//! rectangle.

use crate::Positions;
use crate::geom::{Bounds, Canvas, Point, Rect};
use dyngraph::NodeId;

/// Packs `components` and rewrites `positions` in place. Returns each component's rectangle in
/// canvas coordinates, in the order of `components`.
///
/// Nodes missing from `positions` are ignored.
pub(crate) fn pack_components(
    components: &[Vec<NodeId>],
    positions: &mut Positions,
    canvas: Canvas,
    node_radius: f64,
) -> Vec<Rect> {
    let bounds: Vec<Option<Bounds>> = components
        .iter()
        .map(|comp| Bounds::of(comp.iter().filter_map(|v| positions.get(v).copied())))
        .collect();
    let mut order: Vec<usize> = (0..components.len())
        .filter(|&c| bounds[c].is_some())
        .collect();
    if order.is_empty() {
        return Vec::new();
    }
    order.sort_by_key(|&c| components[c].len());

    let min_extent = 4.0 * node_radius;
    let ratio = |c: usize| -> f64 {
        bounds[c].map_or(1.0, |b| {
            b.height().max(min_extent) / b.width().max(min_extent)
        })
    };

    let mut rects: Vec<Option<Rect>> = vec![None; components.len()];
    let mut placed: Vec<Rect> = Vec::with_capacity(order.len());

    let Some((&largest, rest)) = order.split_last() else {
        return Vec::new();
    };
    let r = ratio(largest);
    let first = if r <= 1.0 {
        Rect::new(0.0, 0.0, canvas.width, canvas.width * r)
    } else {
        Rect::new(0.0, 0.0, canvas.height / r, canvas.height)
    };
    let area_per_node = first.width * first.height / components[largest].len() as f64;
    rects[largest] = Some(first);
    placed.push(first);

    // Scores are measured against the largest rectangle only.
    let (wmax, hmax) = (first.width, first.height);
    for &c in rest.iter().rev() {
        let r = ratio(c);
        let width = (area_per_node * components[c].len() as f64 / r).sqrt();
        let height = width * r;

        // Most recently placed rectangles are tried first; ties keep the earliest anchor.
        let mut choice: Option<(f64, Rect)> = None;
        for anchor in placed.iter().rev().flat_map(corners) {
            let candidate = Rect::new(anchor.x, anchor.y, width, height);
            if placed.iter().any(|p| p.intersects(&candidate)) {
                continue;
            }
            let score = wmax
                .max(candidate.right())
                .max(hmax)
                .max(candidate.bottom());
            if choice.is_none_or(|(best, _)| score < best) {
                choice = Some((score, candidate));
            }
        }
        let rect = choice.map_or_else(
            || {
                let right = placed.iter().map(Rect::right).fold(wmax, f64::max);
                Rect::new(right, 0.0, width, height)
            },
            |(_, rect)| rect,
        );
        rects[c] = Some(rect);
        placed.push(rect);
    }

    let Some(union) = Bounds::of(
        placed
            .iter()
            .flat_map(|r| [Point::new(r.x, r.y), Point::new(r.right(), r.bottom())]),
    ) else {
        return Vec::new();
    };
    let sx = scale(canvas.width, union.width());
    let sy = scale(canvas.height, union.height());
    tracing::debug!(components = placed.len(), sx, sy, "packed components");

    let mut out = Vec::with_capacity(components.len());
    for (c, comp) in components.iter().enumerate() {
        let (Some(rect), Some(local)) = (rects[c], bounds[c]) else {
            continue;
        };
        let rect = Rect::new(
            (rect.x - union.min_x) * sx,
            (rect.y - union.min_y) * sy,
            rect.width * sx,
            rect.height * sy,
        );
        for v in comp {
            if let Some(p) = positions.get_mut(v) {
                *p = Point::new(
                    remap(p.x, local.min_x, local.max_x, rect.x, rect.width, node_radius),
                    remap(p.y, local.min_y, local.max_y, rect.y, rect.height, node_radius),
                );
            }
        }
        out.push(rect);
    }
    out
}

/// Corners of `r` other than its top-left one.
fn corners(r: &Rect) -> [Point; 3] {
    [
        Point::new(r.right(), r.y),
        Point::new(r.x, r.bottom()),
        Point::new(r.right(), r.bottom()),
    ]
}

fn scale(target: f64, span: f64) -> f64 {
    if span > 0.0 { target / span } else { 1.0 }
}

/// Maps `value` from `[min, max]` into `[start + margin, start + extent - margin]`, where the
/// margin is twice the node radius. A flat range lands in the middle.
fn remap(value: f64, min: f64, max: f64, start: f64, extent: f64, node_radius: f64) -> f64 {
    if max > min {
        start + 2.0 * node_radius + (extent - 4.0 * node_radius) * (value - min) / (max - min)
    } else {
        start + extent / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyngraph::UndirectedGraph;

    fn cloud(
        g: &mut UndirectedGraph,
        pts: &[(f64, f64)],
        positions: &mut Positions,
    ) -> Vec<NodeId> {
        pts.iter()
            .map(|&(x, y)| {
                let v = g.add_node();
                positions.insert(v, Point::new(x, y));
                v
            })
            .collect()
    }

    #[test]
    fn single_component_fills_the_canvas_width() {
        let mut g = UndirectedGraph::new();
        let mut positions = Positions::new();
        let comp = cloud(&mut g, &[(0.0, 0.0), (200.0, 100.0)], &mut positions);
        let canvas = Canvas::new(1000.0, 1000.0);

        let rects = pack_components(&[comp.clone()], &mut positions, canvas, 10.0);
        assert_eq!(rects, vec![Rect::new(0.0, 0.0, 1000.0, 1000.0)]);
        assert_eq!(positions[&comp[0]], Point::new(20.0, 20.0));
        assert_eq!(positions[&comp[1]], Point::new(980.0, 980.0));
    }

    #[test]
    fn smaller_components_pack_around_a_wide_one() {
        let mut g = UndirectedGraph::new();
        let mut positions = Positions::new();
        let big = cloud(
            &mut g,
            &[(0.0, 0.0), (400.0, 0.0), (400.0, 100.0), (0.0, 100.0)],
            &mut positions,
        );
        let small = cloud(&mut g, &[(0.0, 0.0), (100.0, 100.0)], &mut positions);
        let canvas = Canvas::new(1400.0, 800.0);

        let rects = pack_components(&[small, big], &mut positions, canvas, 5.0);
        assert_eq!(rects.len(), 2);
        assert!(!rects[0].intersects(&rects[1]));
        assert_eq!(rects[1].x, 0.0);
        assert!(rects[0].x >= rects[1].right() - 1e-9 || rects[0].y >= rects[1].bottom() - 1e-9);
        let union = Bounds::of(rects.iter().flat_map(|r| {
            [Point::new(r.x, r.y), Point::new(r.right(), r.bottom())]
        }))
        .unwrap();
        assert!((union.width() - 1400.0).abs() < 1e-6);
        assert!((union.height() - 800.0).abs() < 1e-6);
    }

    #[test]
    fn ties_go_to_the_most_recently_placed_rectangle() {
        let mut g = UndirectedGraph::new();
        let mut positions = Positions::new();
        let large = cloud(
            &mut g,
            &[
                (0.0, 0.0),
                (100.0, 0.0),
                (200.0, 0.0),
                (0.0, 100.0),
                (100.0, 100.0),
                (200.0, 100.0),
            ],
            &mut positions,
        );
        let medium = cloud(
            &mut g,
            &[(0.0, 0.0), (300.0, 0.0), (300.0, 100.0), (0.0, 100.0)],
            &mut positions,
        );
        let small = cloud(&mut g, &[(0.0, 0.0), (50.0, 100.0)], &mut positions);

        let rects = pack_components(
            &[large, medium, small],
            &mut positions,
            Canvas::new(1400.0, 800.0),
            1.0,
        );
        let [large, medium, small] = [rects[0], rects[1], rects[2]];
        // The medium rectangle sits under the large one.
        assert_eq!((large.x, large.y), (0.0, 0.0));
        assert_eq!(medium.x, 0.0);
        assert!((medium.y - large.bottom()).abs() < 1e-9);
        // Its top-right corner ties with the large one's and wins.
        assert!((small.x - medium.right()).abs() < 1e-9);
        assert!((small.y - medium.y).abs() < 1e-9);
        let small_height = 2.0 * (1400.0f64 * 700.0 / 6.0).sqrt();
        assert!((small.y - 700.0 * 800.0 / (700.0 + small_height)).abs() < 1e-9);
    }

    #[test]
    fn flat_components_are_centred_on_the_flat_axis() {
        let mut g = UndirectedGraph::new();
        let mut positions = Positions::new();
        let comp = cloud(&mut g, &[(0.0, 50.0), (100.0, 50.0)], &mut positions);

        let rects = pack_components(&[comp.clone()], &mut positions, Canvas::default(), 20.0);
        let rect = rects[0];
        assert_eq!(positions[&comp[0]].y, rect.y + rect.height / 2.0);
        assert_eq!(positions[&comp[1]].y, rect.y + rect.height / 2.0);
    }

    #[test]
    fn empty_input_packs_nothing() {
        let mut positions = Positions::new();
        assert!(pack_components(&[], &mut positions, Canvas::default(), 20.0).is_empty());
    }
}
