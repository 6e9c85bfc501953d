use chronograph::{
    ChronographError, TemporalGraph, WindowCriteria, find_all_subgraphs, find_ordered_matches,
    find_ordered_subgraphs,
};

#[test]
fn test_empty_query_trivially_matches() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 0, None).unwrap();

    let h = TemporalGraph::new();

    let matches = find_all_subgraphs(&g, &h, &WindowCriteria, usize::MAX).unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].is_empty());
}

#[test]
fn test_empty_data_graph() {
    let g = TemporalGraph::new();

    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();

    let matches = find_all_subgraphs(&g, &h, &WindowCriteria, usize::MAX).unwrap();
    assert!(matches.is_empty());

    let count = find_ordered_subgraphs(&g, &h, &WindowCriteria, usize::MAX, 10).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_edgeless_query_in_ordered_search() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 0, None).unwrap();

    let h = TemporalGraph::new();

    // An edge-ordered search over a query with no edges has nothing to
    // order; it reports zero occurrences.
    let count = find_ordered_subgraphs(&g, &h, &WindowCriteria, usize::MAX, 10).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_self_loop_discipline_ordered() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 0, 0, None).unwrap(); // self-loop
    g.add_edge(0, 1, 5, None).unwrap(); // plain edge

    // A query self-loop must not match the plain edge.
    let mut loop_query = TemporalGraph::new();
    loop_query.add_edge(0, 0, 0, None).unwrap();

    let matches = find_ordered_matches(&g, &loop_query, &WindowCriteria, usize::MAX, 10).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].edges(), &[0]);

    // And a plain query edge must not match the self-loop.
    let mut plain_query = TemporalGraph::new();
    plain_query.add_edge(0, 1, 0, None).unwrap();

    let matches = find_ordered_matches(&g, &plain_query, &WindowCriteria, usize::MAX, 10).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].edges(), &[1]);
}

#[test]
fn test_self_loop_discipline_unordered() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 0, 0, None).unwrap();
    g.add_edge(0, 1, 5, None).unwrap();

    let mut loop_query = TemporalGraph::new();
    loop_query.add_edge(0, 0, 0, None).unwrap();

    // The unordered search maps query vertex 0 to a data vertex and
    // demands an edge from it to itself.
    let matches = find_all_subgraphs(&g, &loop_query, &WindowCriteria, usize::MAX).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].edges(), &[0]);
    assert_eq!(matches[0].nodes(), &[0]);
}

#[test]
fn test_negative_delta_rejected() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 0, None).unwrap();
    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();

    assert!(matches!(
        find_ordered_subgraphs(&g, &h, &WindowCriteria, usize::MAX, -1),
        Err(ChronographError::InvalidArgument(_))
    ));
    assert!(matches!(
        find_ordered_matches(&g, &h, &WindowCriteria, usize::MAX, -1),
        Err(ChronographError::InvalidArgument(_))
    ));
}

#[test]
fn test_zero_limit_returns_nothing() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 0, None).unwrap();
    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();

    assert!(find_all_subgraphs(&g, &h, &WindowCriteria, 0).unwrap().is_empty());
    assert_eq!(
        find_ordered_subgraphs(&g, &h, &WindowCriteria, 0, 10).unwrap(),
        0
    );
}

#[test]
fn test_delta_zero_requires_tied_occurrence() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 7, None).unwrap();
    g.add_edge(1, 2, 7, None).unwrap();
    g.add_edge(2, 3, 9, None).unwrap();

    // Query edges tie in time, so data edges must tie too; with delta 0
    // the whole occurrence must sit at one instant.
    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();
    h.add_edge(1, 2, 0, None).unwrap();

    let count = find_ordered_subgraphs(&g, &h, &WindowCriteria, usize::MAX, 0).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_query_larger_than_data_cannot_match() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 0, None).unwrap();

    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();
    h.add_edge(1, 2, 1, None).unwrap();
    h.add_edge(2, 3, 2, None).unwrap();

    assert!(find_all_subgraphs(&g, &h, &WindowCriteria, usize::MAX)
        .unwrap()
        .is_empty());
    assert_eq!(
        find_ordered_subgraphs(&g, &h, &WindowCriteria, usize::MAX, 100).unwrap(),
        0
    );
}

#[test]
fn test_vertex_reuse_across_backtracking() {
    // A hub vertex participates in many prefixes; backtracking must
    // release and re-establish its mapping without corruption.
    let mut g = TemporalGraph::new();
    g.add_edge(0, 9, 0, None).unwrap();
    g.add_edge(9, 1, 1, None).unwrap();
    g.add_edge(2, 9, 2, None).unwrap();
    g.add_edge(9, 3, 3, None).unwrap();

    // x -> hub, hub -> y
    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();
    h.add_edge(1, 2, 1, None).unwrap();

    // Order-preserving pairs through the hub: (0->9, 9->1), (0->9, 9->3),
    // (2->9, 9->3).
    let count = find_ordered_subgraphs(&g, &h, &WindowCriteria, usize::MAX, 100).unwrap();
    assert_eq!(count, 3);
}

#[test]
fn test_parallel_edges_aggregate_in_unordered_match() {
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 0, None).unwrap();
    g.add_edge(0, 1, 5, None).unwrap();

    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();

    // One vertex assignment, both parallel edges recorded in the single
    // match object.
    let matches = find_all_subgraphs(&g, &h, &WindowCriteria, usize::MAX).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].edges().len(), 2);
}

#[test]
fn test_ordered_search_does_not_cross_map_vertices() {
    // Two disjoint chains; the search must not splice them together.
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 0, None).unwrap();
    g.add_edge(2, 3, 5, None).unwrap();

    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();
    h.add_edge(1, 2, 1, None).unwrap();

    let count = find_ordered_subgraphs(&g, &h, &WindowCriteria, usize::MAX, 100).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_duplicate_query_vertices_remain_injective() {
    // Triangle data, two-edge path query: y is shared, x and z must map
    // to different data vertices.
    let mut g = TemporalGraph::new();
    g.add_edge(0, 1, 0, None).unwrap();
    g.add_edge(1, 0, 5, None).unwrap();

    let mut h = TemporalGraph::new();
    h.add_edge(0, 1, 0, None).unwrap();
    h.add_edge(1, 2, 1, None).unwrap();

    // x=0, y=1 forces z != 0, but the only edge out of 1 returns to 0.
    let matches = find_all_subgraphs(&g, &h, &WindowCriteria, usize::MAX).unwrap();
    assert!(matches.is_empty());
}
