use dyngraph::alg::connected_components;
use dyngraph::{DirectedGraph, NodeId, UndirectedGraph};
use dyngraph_layout::{
    Algorithm, Canvas, FruchtermanReingoldOptions, KamadaKawaiOptions, Point, Positions, Rect,
    compute_layout, layout,
};

fn add_triangle(g: &mut UndirectedGraph) -> Vec<NodeId> {
    let v: Vec<NodeId> = (0..3).map(|_| g.add_node()).collect();
    g.add_edge(v[0], v[1]).unwrap();
    g.add_edge(v[1], v[2]).unwrap();
    g.add_edge(v[2], v[0]).unwrap();
    v
}

fn bounding_rect(positions: &Positions, nodes: &[NodeId]) -> Rect {
    let xs: Vec<f64> = nodes.iter().map(|v| positions[v].x).collect();
    let ys: Vec<f64> = nodes.iter().map(|v| positions[v].y).collect();
    let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

fn assert_inside(p: Point, canvas: Canvas) {
    let tol = 1e-6;
    assert!(
        p.x >= -tol && p.x <= canvas.width + tol && p.y >= -tol && p.y <= canvas.height + tol,
        "{p:?} outside {canvas:?}"
    );
}

#[test]
fn compute_layout_of_empty_graph_is_empty() {
    let g = UndirectedGraph::new();
    assert!(compute_layout(&g, &Positions::new(), 1400.0, 800.0).is_empty());
}

#[test]
fn compute_layout_centres_a_single_node() {
    let mut g = UndirectedGraph::new();
    let v = g.add_node();
    let mut current = Positions::new();
    current.insert(v, Point::new(3.0, 7.0));

    let out = compute_layout(&g, &current, 1400.0, 800.0);
    assert_eq!(out.len(), 1);
    assert!(out[&v].distance(Point::new(700.0, 400.0)) < 1e-9);
}

#[test]
fn disjoint_triangles_land_in_non_overlapping_boxes() {
    let mut g = UndirectedGraph::new();
    let first = add_triangle(&mut g);
    let second = add_triangle(&mut g);
    let canvas = Canvas::default();

    let out = compute_layout(&g, &Positions::new(), canvas.width, canvas.height);
    assert_eq!(out.len(), 6);
    for p in out.values() {
        assert_inside(*p, canvas);
    }
    let a = bounding_rect(&out, &first);
    let b = bounding_rect(&out, &second);
    assert!(!a.intersects(&b), "{a:?} overlaps {b:?}");
    assert!(a.width > 0.0 && a.height > 0.0);
}

#[test]
fn compute_layout_ignores_positions_of_unknown_nodes() {
    let mut g = UndirectedGraph::new();
    let v = g.add_node();
    let mut other = UndirectedGraph::new();
    let foreign = other.add_node();
    let mut current = Positions::new();
    current.insert(foreign, Point::new(1.0, 1.0));

    let out = compute_layout(&g, &current, 800.0, 600.0);
    assert_eq!(out.keys().copied().collect::<Vec<_>>(), vec![v]);
}

#[test]
fn compute_layout_is_deterministic() {
    let mut g = UndirectedGraph::new();
    let v: Vec<NodeId> = (0..6).map(|_| g.add_node()).collect();
    for pair in v.windows(2) {
        g.add_edge(pair[0], pair[1]).unwrap();
    }
    g.add_edge(v[5], v[0]).unwrap();
    g.add_edge(v[0], v[3]).unwrap();

    let first = compute_layout(&g, &Positions::new(), 1400.0, 800.0);
    let second = compute_layout(&g, &Positions::new(), 1400.0, 800.0);
    assert_eq!(first, second);
}

#[test]
fn kamada_kawai_spreads_a_path_within_the_canvas() {
    let mut g = UndirectedGraph::new();
    let v: Vec<NodeId> = (0..5).map(|_| g.add_node()).collect();
    for pair in v.windows(2) {
        g.add_edge(pair[0], pair[1]).unwrap();
    }
    let canvas = Canvas::new(1000.0, 1000.0);
    let algorithm = Algorithm::KamadaKawai(KamadaKawaiOptions {
        random_seed: 42,
        ..Default::default()
    });

    let out = layout(&g, &Positions::new(), canvas, &algorithm);
    assert_eq!(out.len(), 5);
    for p in out.values() {
        assert!(p.is_finite());
        assert_inside(*p, canvas);
    }
    let ends = out[&v[0]].distance(out[&v[4]]);
    let step = out[&v[0]].distance(out[&v[1]]);
    assert!(ends > step);
}

#[test]
fn isolated_nodes_each_get_their_own_slot() {
    let mut g = UndirectedGraph::new();
    let v: Vec<NodeId> = (0..3).map(|_| g.add_node()).collect();
    let canvas = Canvas::default();

    let out = compute_layout(&g, &Positions::new(), canvas.width, canvas.height);
    assert_eq!(connected_components(&g).len(), 3);
    for p in out.values() {
        assert_inside(*p, canvas);
    }
    assert_ne!(out[&v[0]], out[&v[1]]);
    assert_ne!(out[&v[1]], out[&v[2]]);
    assert_ne!(out[&v[0]], out[&v[2]]);
}

#[test]
fn directed_graphs_are_laid_out_as_undirected() {
    let mut g = DirectedGraph::new();
    let v: Vec<NodeId> = (0..4).map(|_| g.add_node()).collect();
    for i in 0..4 {
        g.add_arc(v[i], v[(i + 1) % 4]).unwrap();
    }

    let out = compute_layout(&g, &Positions::new(), 1400.0, 800.0);
    assert_eq!(out.len(), 4);
    assert!(out.values().all(|p| p.is_finite()));
}

#[test]
fn fruchterman_reingold_keeps_nodes_inside_the_margins() {
    let mut g = UndirectedGraph::new();
    let v: Vec<NodeId> = (0..5).map(|_| g.add_node()).collect();
    for pair in v.windows(2) {
        g.add_edge(pair[0], pair[1]).unwrap();
    }
    let opts = FruchtermanReingoldOptions {
        iterations_per_node: 20,
        ..Default::default()
    };
    let radius = opts.node_radius;
    let canvas = Canvas::default();

    let out = layout(
        &g,
        &Positions::new(),
        canvas,
        &Algorithm::FruchtermanReingold(opts),
    );
    assert_eq!(out.len(), 5);
    for p in out.values() {
        assert!(p.x >= 0.0 && p.x <= canvas.width - 2.0 * radius);
        assert!(p.y >= 0.0 && p.y <= canvas.height - 2.0 * radius);
    }
    assert_ne!(out[&v[0]], out[&v[1]]);
}

#[test]
fn infinite_canvas_extents_are_treated_as_empty() {
    let mut g = UndirectedGraph::new();
    add_triangle(&mut g);
    let canvas = Canvas {
        width: f64::INFINITY,
        height: 800.0,
    };

    let out = layout(&g, &Positions::new(), canvas, &Algorithm::default());
    assert_eq!(out.len(), 3);
    assert!(out.values().all(|p| p.is_finite()));
}
