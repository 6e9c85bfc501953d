//! Chronologically ordered subgraph search.
//!
//! Finds occurrences whose matched data edges appear in the same
//! chronological order as the query's edges, with the whole occurrence
//! spanning at most `delta` seconds. The machine is an explicit stack
//! rather than recursion: each frame binds one query edge to one data
//! edge and remembers where to resume scanning after backtracking.
//! Vertex mappings are reference-counted per data vertex and torn down
//! only when no stacked edge still touches them, so a vertex's role
//! survives across overlapping bindings.

use crate::error::Result;
use crate::graph::TemporalGraph;
use crate::search::criteria::MatchCriteria;
use crate::search::matches::SubgraphMatch;
use crate::types::Timestamp;

/// One bound query edge: the matched data edge and the scan position the
/// binding started from (start of its timestamp group).
#[derive(Debug, Clone, Copy)]
struct Frame {
    matched: usize,
    resume: usize,
}

/// Count all ordered occurrences, stopping once `limit` is reached.
pub(crate) fn count(
    g: &TemporalGraph,
    h: &TemporalGraph,
    criteria: &dyn MatchCriteria,
    limit: usize,
    delta: Timestamp,
) -> Result<u64> {
    if limit == 0 {
        return Ok(0);
    }
    let mut search = OrderedSearch::new(g, h, criteria, delta);
    let mut remaining = limit;
    search.run(|_, _| {
        remaining -= 1;
        remaining > 0
    })
}

/// Enumerate ordered occurrences as match objects, stopping once `limit`
/// is reached. Same pruning as [`count`].
pub(crate) fn collect(
    g: &TemporalGraph,
    h: &TemporalGraph,
    criteria: &dyn MatchCriteria,
    limit: usize,
    delta: Timestamp,
) -> Result<Vec<SubgraphMatch>> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    let mut results = Vec::new();
    let mut search = OrderedSearch::new(g, h, criteria, delta);
    search.run(|stack, last_edge| {
        let mut occurrence = SubgraphMatch::new();
        for (h_i, frame) in stack.iter().enumerate() {
            occurrence.add_edge(&g.edges()[frame.matched], &h.edges()[h_i]);
        }
        occurrence.add_edge(&g.edges()[last_edge], &h.edges()[stack.len()]);
        results.push(occurrence);
        results.len() < limit
    })?;
    Ok(results)
}

struct OrderedSearch<'a> {
    g: &'a TemporalGraph,
    h: &'a TemporalGraph,
    criteria: &'a dyn MatchCriteria,
    delta: Timestamp,
    h2g: Vec<Option<usize>>,
    g2h: Vec<Option<usize>>,
    /// How many stacked matched edges touch each data vertex; the vertex
    /// mapping is released when this reaches zero.
    edge_refs: Vec<usize>,
    stack: Vec<Frame>,
    all_edges: Vec<usize>,
    first_edge_time: Timestamp,
}

impl<'a> OrderedSearch<'a> {
    fn new(
        g: &'a TemporalGraph,
        h: &'a TemporalGraph,
        criteria: &'a dyn MatchCriteria,
        delta: Timestamp,
    ) -> Self {
        Self {
            g,
            h,
            criteria,
            delta,
            h2g: vec![None; h.node_count()],
            g2h: vec![None; g.node_count()],
            edge_refs: vec![0; g.node_count()],
            stack: Vec::with_capacity(h.edge_count()),
            all_edges: (0..g.edge_count()).collect(),
            first_edge_time: 0,
        }
    }

    /// Drive the machine to exhaustion. `on_match` sees every completed
    /// occurrence (the stacked prefix plus the final matched edge) and
    /// returns whether to keep searching.
    fn run(&mut self, mut on_match: impl FnMut(&[Frame], usize) -> bool) -> Result<u64> {
        let m = self.g.edge_count();
        let h_m = self.h.edge_count();
        if m == 0 || h_m == 0 {
            return Ok(0);
        }

        let g_edges = self.g.edges();
        let h_edges = self.h.edges();

        // h_i: the query edge currently being matched (== stack depth).
        // g_i: scan cursor (chronological edge index).
        // g_i_start: start of the timestamp group the scan entered at.
        let mut h_i = 0usize;
        let mut g_i = 0usize;
        let mut g_i_start = 0usize;
        let mut prev_time_query: Timestamp = 0;
        let mut prev_time_target: Timestamp = 0;
        let mut occurrences: u64 = 0;

        loop {
            // Backtrack while the cursor is exhausted, or everything at or
            // beyond it lies outside the delta window (the edge list is
            // time-ordered, so nothing further can match).
            while g_i >= m
                || (!self.stack.is_empty()
                    && g_edges[g_i].time().saturating_sub(self.first_edge_time) > self.delta)
            {
                let Some(frame) = self.stack.pop() else {
                    return Ok(occurrences);
                };

                prev_time_target = match self.stack.last() {
                    Some(prev) => g_edges[prev.matched].time(),
                    None => 0,
                };

                let popped = g_edges[frame.matched];
                self.release(popped.source());
                self.release(popped.dest());

                h_i -= 1;
                prev_time_query = if h_i == 0 {
                    0
                } else {
                    h_edges[h_i - 1].time()
                };

                // Resume immediately after the failed edge; if that lands in
                // a new timestamp group, the group starts there too.
                g_i = frame.matched + 1;
                if g_i < m {
                    g_i_start = if g_edges[g_i].time() != popped.time() {
                        g_i
                    } else {
                        frame.resume
                    };
                }
            }

            g_i = self.find_next_match(h_i, g_i, prev_time_query, prev_time_target)?;
            if g_i >= m {
                continue;
            }

            if h_i + 1 == h_m {
                // Whole query matched. Keep h_i where it is and scan on, so
                // alternative completions of the same prefix are also found.
                occurrences += 1;
                if !on_match(&self.stack, g_i) {
                    return Ok(occurrences);
                }
                g_i += 1;
                if g_i < m && g_edges[g_i].time() != g_edges[g_i - 1].time() {
                    g_i_start = g_i;
                }
            } else {
                let g_edge = g_edges[g_i];
                let h_edge = h_edges[h_i];

                if self.stack.is_empty() {
                    self.first_edge_time = g_edge.time();
                }

                self.h2g[h_edge.source()] = Some(g_edge.source());
                self.h2g[h_edge.dest()] = Some(g_edge.dest());
                self.g2h[g_edge.source()] = Some(h_edge.source());
                self.g2h[g_edge.dest()] = Some(h_edge.dest());
                self.edge_refs[g_edge.source()] += 1;
                self.edge_refs[g_edge.dest()] += 1;

                self.stack.push(Frame {
                    matched: g_i,
                    resume: g_i_start,
                });
                prev_time_target = g_edge.time();

                h_i += 1;
                prev_time_query = h_edges[h_i - 1].time();

                if h_edges[h_i].time() == prev_time_query {
                    // The next query edge ties in time: rescan the current
                    // timestamp group so tied data edges can pair up.
                    g_i = g_i_start;
                } else {
                    // Strictly later query time: skip the rest of the
                    // matched edge's timestamp group.
                    let group_time = g_edge.time();
                    g_i += 1;
                    while g_i < m && g_edges[g_i].time() == group_time {
                        g_i += 1;
                    }
                    g_i_start = g_i;
                }
            }
        }
    }

    /// Drop one reference to a data vertex, releasing its mapping when no
    /// stacked edge uses it anymore.
    fn release(&mut self, g_v: usize) {
        self.edge_refs[g_v] -= 1;
        if self.edge_refs[g_v] == 0
            && let Some(h_v) = self.g2h[g_v].take()
        {
            self.h2g[h_v] = None;
        }
    }

    /// Scan for the next data edge (index >= `from`) that can stand in for
    /// query edge `h_i`. Returns the edge count when no candidate exists.
    fn find_next_match(
        &self,
        h_i: usize,
        from: usize,
        prev_time_query: Timestamp,
        prev_time_target: Timestamp,
    ) -> Result<usize> {
        let m = self.g.edge_count();
        let g_edges = self.g.edges();
        let h_edge = self.h.edges()[h_i];
        let h_u = h_edge.source();
        let h_v = h_edge.dest();

        // Prefer the adjacency list of an already-mapped endpoint; the
        // shorter of the two when both are mapped. All lists are sorted by
        // chronological edge index.
        let nodes = self.g.nodes();
        let search_edges: &[usize] = match (self.h2g[h_u], self.h2g[h_v]) {
            (Some(g_u), Some(g_v)) => {
                let out = nodes[g_u].out_edges();
                let inn = nodes[g_v].in_edges();
                if out.len() < inn.len() { out } else { inn }
            }
            (Some(g_u), None) => nodes[g_u].out_edges(),
            (None, Some(g_v)) => nodes[g_v].in_edges(),
            (None, None) => &self.all_edges,
        };

        let start = search_edges.partition_point(|&e| e < from);
        let query_time = h_edge.time();
        // The first query edge has no previous matched pair: neither the
        // delta window nor the ordering constraint applies to it.
        let has_prev = !self.stack.is_empty();

        for &g_i in &search_edges[start..] {
            let g_edge = g_edges[g_i];
            let target_time = g_edge.time();

            // Past the delta window: the list is time-ordered, so stop.
            if has_prev && target_time.saturating_sub(self.first_edge_time) > self.delta {
                return Ok(m);
            }

            // A query self-loop matches only a data self-loop, and vice versa.
            if (h_u == h_v) != g_edge.is_self_loop() {
                continue;
            }

            // Endpoints must agree with the existing mappings, or both
            // sides must be free.
            let source_ok = self.h2g[h_u] == Some(g_edge.source())
                || (self.h2g[h_u].is_none() && self.g2h[g_edge.source()].is_none());
            if !source_ok {
                continue;
            }
            let dest_ok = self.h2g[h_v] == Some(g_edge.dest())
                || (self.h2g[h_v].is_none() && self.g2h[g_edge.dest()].is_none());
            if !dest_ok {
                continue;
            }

            if !self.criteria.is_edge_match(self.g, g_i, self.h, h_i)? {
                continue;
            }

            // Chronological order: strictly later than the previous match,
            // unless the query times tie, in which case the data times
            // must tie as well.
            if has_prev {
                let later = query_time > prev_time_query && target_time > prev_time_target;
                let tied = query_time == prev_time_query && target_time == prev_time_target;
                if !later && !tied {
                    continue;
                }
            }
            return Ok(g_i);
        }
        Ok(m)
    }
}
