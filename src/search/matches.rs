//! Match-result representation.

use crate::error::{ChronographError, Result};
use crate::graph::{Edge, TemporalGraph};
use rustc_hash::{FxHashMap, FxHashSet};

/// One occurrence of a query graph inside a data graph.
///
/// Records which data edges and nodes participate and how they correspond
/// to query edges and nodes. Built incrementally by the search algorithms,
/// one [`SubgraphMatch::add_edge`] call per matched pair, and never mutated
/// after the occurrence completes.
#[derive(Debug, Clone, Default)]
pub struct SubgraphMatch {
    edges: Vec<usize>,
    nodes: Vec<usize>,
    node_set: FxHashSet<usize>,
    edge_to_query: FxHashMap<usize, usize>,
    node_to_query: FxHashMap<usize, usize>,
}

impl SubgraphMatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `data_edge` was matched to `query_edge`, mapping both
    /// endpoints along with it.
    pub fn add_edge(&mut self, data_edge: &Edge, query_edge: &Edge) {
        self.edges.push(data_edge.index());
        self.edge_to_query.insert(data_edge.index(), query_edge.index());

        self.node_to_query.insert(data_edge.source(), query_edge.source());
        self.node_to_query.insert(data_edge.dest(), query_edge.dest());
        for v in [data_edge.source(), data_edge.dest()] {
            if self.node_set.insert(v) {
                self.nodes.push(v);
            }
        }
    }

    /// Chronological indices of the matched data edges, in the order they
    /// were recorded.
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    /// Indices of the data nodes touched by this occurrence, in first-touch
    /// order, without duplicates.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// True if the given data node participates in this occurrence.
    pub fn has_node(&self, v: usize) -> bool {
        self.node_set.contains(&v)
    }

    /// The query edge matched by the given data edge. Fails with `NotFound`
    /// if the data edge is not part of this occurrence.
    pub fn query_edge(&self, data_edge: usize) -> Result<usize> {
        self.edge_to_query.get(&data_edge).copied().ok_or_else(|| {
            ChronographError::NotFound(format!("data edge {} was not matched", data_edge))
        })
    }

    /// The query node matched by the given data node. Fails with `NotFound`
    /// if the data node is not part of this occurrence.
    pub fn query_node(&self, data_node: usize) -> Result<usize> {
        self.node_to_query.get(&data_node).copied().ok_or_else(|| {
            ChronographError::NotFound(format!("data node {} was not matched", data_node))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Build a new graph from the union of all matched edges across the given
/// occurrences (deduplicated), copying node and edge metadata.
pub fn subgraph_from_matches(
    g: &TemporalGraph,
    matches: &[SubgraphMatch],
) -> Result<TemporalGraph> {
    g.subgraph_from_edges(matches.iter().flat_map(|m| m.edges().iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_records_correspondence() {
        let mut g = TemporalGraph::new();
        g.add_edge(4, 7, 10, None).unwrap();
        g.add_edge(7, 9, 20, None).unwrap();

        let mut h = TemporalGraph::new();
        h.add_edge(0, 1, 0, None).unwrap();
        h.add_edge(1, 2, 1, None).unwrap();

        let mut m = SubgraphMatch::new();
        m.add_edge(&g.edges()[0], &h.edges()[0]);
        m.add_edge(&g.edges()[1], &h.edges()[1]);

        assert_eq!(m.edges(), &[0, 1]);
        assert_eq!(m.nodes(), &[4, 7, 9]);
        assert!(m.has_node(7));
        assert!(!m.has_node(5));
        assert_eq!(m.query_edge(0).unwrap(), 0);
        assert_eq!(m.query_edge(1).unwrap(), 1);
        assert_eq!(m.query_node(4).unwrap(), 0);
        assert_eq!(m.query_node(7).unwrap(), 1);
        assert_eq!(m.query_node(9).unwrap(), 2);
    }

    #[test]
    fn test_unmatched_lookups_fail() {
        let m = SubgraphMatch::new();
        assert!(m.is_empty());
        assert!(matches!(
            m.query_edge(0),
            Err(ChronographError::NotFound(_))
        ));
        assert!(matches!(
            m.query_node(0),
            Err(ChronographError::NotFound(_))
        ));
    }

    #[test]
    fn test_shared_node_recorded_once() {
        let mut g = TemporalGraph::new();
        g.add_edge(1, 2, 10, None).unwrap();
        g.add_edge(2, 1, 20, None).unwrap();

        let mut h = TemporalGraph::new();
        h.add_edge(0, 1, 0, None).unwrap();
        h.add_edge(1, 0, 1, None).unwrap();

        let mut m = SubgraphMatch::new();
        m.add_edge(&g.edges()[0], &h.edges()[0]);
        m.add_edge(&g.edges()[1], &h.edges()[1]);

        assert_eq!(m.nodes(), &[1, 2]);
    }

    #[test]
    fn test_subgraph_from_matches() {
        let mut g = TemporalGraph::new();
        g.add_edge(0, 1, 1, None).unwrap();
        g.add_edge(1, 2, 2, None).unwrap();
        g.add_edge(3, 4, 3, None).unwrap();

        let mut h = TemporalGraph::new();
        h.add_edge(0, 1, 0, None).unwrap();

        let mut m1 = SubgraphMatch::new();
        m1.add_edge(&g.edges()[0], &h.edges()[0]);
        let mut m2 = SubgraphMatch::new();
        m2.add_edge(&g.edges()[1], &h.edges()[0]);

        let sub = subgraph_from_matches(&g, &[m1, m2]).unwrap();
        assert_eq!(sub.edge_count(), 2);
        assert!(sub.has_edge(0, 1));
        assert!(sub.has_edge(1, 2));
        assert!(!sub.has_edge(3, 4));
    }
}
