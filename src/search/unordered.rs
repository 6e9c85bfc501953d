//! Unordered subgraph search.
//!
//! Recursive backtracking over query vertices in index order, maintaining
//! a bidirectional partial vertex mapping. Edge order and timestamps play
//! no role beyond whatever the criteria enforce.

use crate::error::Result;
use crate::graph::TemporalGraph;
use crate::search::criteria::MatchCriteria;
use crate::search::matches::SubgraphMatch;

pub(crate) fn find_all(
    g: &TemporalGraph,
    h: &TemporalGraph,
    criteria: &dyn MatchCriteria,
    limit: usize,
) -> Result<Vec<SubgraphMatch>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut search = UnorderedSearch {
        g,
        h,
        criteria,
        limit,
        h2g: vec![None; h.node_count()],
        g2h: vec![None; g.node_count()],
        results: Vec::new(),
    };

    let possible = search.possible_nodes()?;
    log::debug!(
        "unordered search: candidate counts per query vertex: {:?}",
        possible.iter().map(Vec::len).collect::<Vec<_>>()
    );

    search.descend(0, &possible)?;
    Ok(search.results)
}

struct UnorderedSearch<'a> {
    g: &'a TemporalGraph,
    h: &'a TemporalGraph,
    criteria: &'a dyn MatchCriteria,
    limit: usize,
    h2g: Vec<Option<usize>>,
    g2h: Vec<Option<usize>>,
    results: Vec<SubgraphMatch>,
}

impl UnorderedSearch<'_> {
    /// For each query vertex, the data vertices that pass the node
    /// criteria, in ascending index order so the search is deterministic.
    fn possible_nodes(&self) -> Result<Vec<Vec<usize>>> {
        let mut possible = Vec::with_capacity(self.h.node_count());
        for h_v in 0..self.h.node_count() {
            let mut candidates = Vec::new();
            for g_v in 0..self.g.node_count() {
                if self.criteria.is_node_match(self.g, g_v, self.h, h_v)? {
                    candidates.push(g_v);
                }
            }
            possible.push(candidates);
        }
        Ok(possible)
    }

    /// Try to extend the partial assignment to query vertex `assigned`.
    fn descend(&mut self, assigned: usize, possible: &[Vec<usize>]) -> Result<()> {
        if !self.consistent_so_far(assigned)? {
            return Ok(());
        }
        if assigned == self.h.node_count() {
            self.record_occurrence()?;
            return Ok(());
        }

        let h_v = assigned;
        for &g_v in &possible[h_v] {
            if self.g2h[g_v].is_some() {
                continue; // injectivity
            }
            self.h2g[h_v] = Some(g_v);
            self.g2h[g_v] = Some(h_v);
            self.descend(assigned + 1, possible)?;
            self.g2h[g_v] = None;
            self.h2g[h_v] = None;

            if self.results.len() >= self.limit {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Every query edge whose endpoints are both assigned must have at
    /// least one compatible data edge between the mapped vertices.
    fn consistent_so_far(&self, assigned: usize) -> Result<bool> {
        for h_edge in self.h.edges() {
            let h_u = h_edge.source();
            let h_v = h_edge.dest();
            if h_u >= assigned || h_v >= assigned {
                continue;
            }
            let (Some(g_u), Some(g_v)) = (self.h2g[h_u], self.h2g[h_v]) else {
                continue;
            };
            if !self.g.has_edge(g_u, g_v) {
                return Ok(false);
            }
            let mut found = false;
            for &e in self.g.edge_indexes(g_u, g_v)? {
                if self.criteria.is_edge_match(self.g, e, self.h, h_edge.index())? {
                    found = true;
                    break;
                }
            }
            if !found {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The assignment is complete and consistent: collect every compatible
    /// data edge per query edge into one match object.
    fn record_occurrence(&mut self) -> Result<()> {
        let mut occurrence = SubgraphMatch::new();
        for h_edge in self.h.edges() {
            let (Some(g_u), Some(g_v)) = (self.h2g[h_edge.source()], self.h2g[h_edge.dest()])
            else {
                continue;
            };
            for &e in self.g.edge_indexes(g_u, g_v)? {
                if self.criteria.is_edge_match(self.g, e, self.h, h_edge.index())? {
                    occurrence.add_edge(&self.g.edges()[e], h_edge);
                }
            }
        }
        self.results.push(occurrence);
        Ok(())
    }
}
