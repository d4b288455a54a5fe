use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dyngraph::{NodeId, UndirectedGraph};
use dyngraph_layout::{Algorithm, Canvas, FruchtermanReingoldOptions, Positions, layout};
use std::hint::black_box;
use std::time::Duration;

/// A ring with chords every `stride` nodes, plus `islands` detached pairs to exercise packing.
fn build_ring(nodes: usize, stride: usize, islands: usize) -> UndirectedGraph {
    let mut g = UndirectedGraph::new();
    let ring: Vec<NodeId> = (0..nodes).map(|_| g.add_node()).collect();
    for i in 0..nodes {
        let _ = g.add_edge(ring[i], ring[(i + 1) % nodes]);
        if stride > 1 && i % stride == 0 {
            let _ = g.add_edge(ring[i], ring[(i + nodes / 2) % nodes]);
        }
    }
    for _ in 0..islands {
        let a = g.add_node();
        let b = g.add_node();
        let _ = g.add_edge(a, b);
    }
    g
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let cases = [
        ("ring_12", 12usize, 0usize, 0usize),
        ("ring_30_chords", 30, 5, 0),
        ("ring_30_islands", 30, 5, 4),
    ];

    for (name, nodes, stride, islands) in cases {
        let g = build_ring(nodes, stride, islands);
        group.bench_with_input(BenchmarkId::new("kamada_kawai", name), &g, |b, g| {
            b.iter(|| {
                let out = layout(
                    black_box(g),
                    &Positions::new(),
                    Canvas::default(),
                    &Algorithm::default(),
                );
                black_box(out.len());
            })
        });
    }

    let g = build_ring(12, 0, 0);
    let fr = Algorithm::FruchtermanReingold(FruchtermanReingoldOptions {
        iterations_per_node: 50,
        ..Default::default()
    });
    group.bench_function(BenchmarkId::new("fruchterman_reingold", "ring_12"), |b| {
        b.iter(|| {
            let out = layout(black_box(&g), &Positions::new(), Canvas::default(), &fr);
            black_box(out.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
