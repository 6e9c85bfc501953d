use chronograph::{
    EdgeOptions, TemporalGraph, TypedCriteria, WindowCriteria, filter, find_all_subgraphs,
    find_ordered_subgraphs,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// A deterministic data graph: `n` nodes, edges hopping a few nodes ahead
/// with interleaved timestamps and two edge types.
fn build_data_graph(n: usize, edges_per_node: usize) -> TemporalGraph {
    let mut g = TemporalGraph::new();
    let mut t = 0i64;
    for u in 0..n {
        for k in 1..=edges_per_node {
            let v = (u + k * 7 + 1) % n;
            let edge_type = if (u + k) % 3 == 0 { "email" } else { "login" };
            g.add_edge(u, v, t, Some(EdgeOptions::with_type(edge_type)))
                .unwrap();
            t += 3;
        }
    }
    g.rebuild();
    g
}

fn two_edge_chain() -> TemporalGraph {
    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();
    h.add_edge(1, 2, 1, None).unwrap();
    h.rebuild();
    h
}

fn three_edge_chain() -> TemporalGraph {
    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();
    h.add_edge(1, 2, 1, None).unwrap();
    h.add_edge(2, 3, 2, None).unwrap();
    h.rebuild();
    h
}

fn bench_ordered_search(c: &mut Criterion) {
    let g = build_data_graph(500, 4);
    let h2 = two_edge_chain();
    let h3 = three_edge_chain();

    c.bench_function("ordered_search_2_edge_chain", |b| {
        b.iter(|| {
            let count =
                find_ordered_subgraphs(black_box(&g), &h2, &WindowCriteria, usize::MAX, 60)
                    .unwrap();
            black_box(count)
        })
    });

    c.bench_function("ordered_search_3_edge_chain", |b| {
        b.iter(|| {
            let count =
                find_ordered_subgraphs(black_box(&g), &h3, &WindowCriteria, usize::MAX, 120)
                    .unwrap();
            black_box(count)
        })
    });
}

fn bench_unordered_search(c: &mut Criterion) {
    let g = build_data_graph(120, 3);
    let h2 = two_edge_chain();

    c.bench_function("unordered_search_2_edge_chain", |b| {
        b.iter(|| {
            let matches =
                find_all_subgraphs(black_box(&g), &h2, &WindowCriteria, 1000).unwrap();
            black_box(matches.len())
        })
    });
}

fn bench_filter(c: &mut Criterion) {
    let g = build_data_graph(1000, 4);

    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, Some(EdgeOptions::with_type("email"))).unwrap();
    h.add_edge(1, 2, 1, Some(EdgeOptions::with_type("email"))).unwrap();
    h.rebuild();

    c.bench_function("filter_by_criteria_typed", |b| {
        b.iter(|| {
            let reduced = filter::by_criteria(black_box(&g), &h, &TypedCriteria).unwrap();
            black_box(reduced.edge_count())
        })
    });
}

fn bench_rebuild(c: &mut Criterion) {
    c.bench_function("rebuild_20k_edges", |b| {
        b.iter(|| {
            let mut g = build_data_graph(5000, 4);
            g.add_edge(0, 1, -1, None).unwrap();
            g.rebuild();
            black_box(g.edge_count())
        })
    });
}

criterion_group!(
    benches,
    bench_ordered_search,
    bench_unordered_search,
    bench_filter,
    bench_rebuild
);
criterion_main!(benches);
