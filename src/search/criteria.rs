//! Pluggable node/edge compatibility predicates.
//!
//! A criteria object decides whether a data element can stand in for a
//! query element. The trait's default methods implement the base variant
//! (data edge inside the graph's analysis window, any node acceptable);
//! specialized variants delegate to the base check first and AND their own
//! test on top. Predicates return `Err` only for schema violations, never
//! for plain non-matches.

use crate::error::Result;
use crate::graph::TemporalGraph;
use crate::graph::restrictions::DegDirection;
use rustc_hash::FxHashMap;

/// Returns true if the data edge falls inside the data graph's current
/// analysis window. This is the base test every criteria variant applies.
pub fn edge_in_window(g: &TemporalGraph, edge_index: usize) -> bool {
    let t = g.edges()[edge_index].time();
    t >= g.window_start() && t <= g.window_end()
}

/// Decides whether a data node/edge is compatible with a query node/edge.
///
/// The default method bodies are the base variant: edges must lie in the
/// data graph's analysis window, nodes always match.
pub trait MatchCriteria {
    /// True if data edge `g_edge` can stand in for query edge `h_edge`.
    fn is_edge_match(
        &self,
        g: &TemporalGraph,
        g_edge: usize,
        h: &TemporalGraph,
        h_edge: usize,
    ) -> Result<bool> {
        let _ = (h, h_edge);
        Ok(edge_in_window(g, g_edge))
    }

    /// True if data node `g_node` can stand in for query node `h_node`.
    fn is_node_match(
        &self,
        g: &TemporalGraph,
        g_node: usize,
        h: &TemporalGraph,
        h_node: usize,
    ) -> Result<bool> {
        let _ = (g, g_node, h, h_node);
        Ok(true)
    }
}

/// The base variant: only the time-window check on data edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowCriteria;

impl MatchCriteria for WindowCriteria {}

/// Matches attribute slots: every data value must satisfy the query's
/// per-slot restriction (exact, wildcard, or range), on edges and on both
/// edge endpoints. Slot count or kind disagreements are schema errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeCriteria;

impl MatchCriteria for AttributeCriteria {
    fn is_edge_match(
        &self,
        g: &TemporalGraph,
        g_edge: usize,
        h: &TemporalGraph,
        h_edge: usize,
    ) -> Result<bool> {
        if !edge_in_window(g, g_edge) {
            return Ok(false);
        }
        if !g
            .edge_attributes(g_edge)
            .satisfies(h.edge_attributes(h_edge))?
        {
            return Ok(false);
        }

        let g_e = g.edges()[g_edge];
        let h_e = h.edges()[h_edge];
        Ok(self.is_node_match(g, g_e.source(), h, h_e.source())?
            && self.is_node_match(g, g_e.dest(), h, h_e.dest())?)
    }

    fn is_node_match(
        &self,
        g: &TemporalGraph,
        g_node: usize,
        h: &TemporalGraph,
        h_node: usize,
    ) -> Result<bool> {
        g.node_attributes(g_node).satisfies(h.node_attributes(h_node))
    }
}

/// Requires the data edge's weight to reach a per-query-edge minimum.
/// Query edges without a configured minimum accept any weight.
#[derive(Debug, Clone, Default)]
pub struct WeightedCriteria {
    min_weights: FxHashMap<usize, f64>,
}

impl WeightedCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum weight a data edge must carry to match query edge
    /// `h_edge`.
    pub fn add_min_weight(&mut self, h_edge: usize, min_weight: f64) -> &mut Self {
        self.min_weights.insert(h_edge, min_weight);
        self
    }
}

impl MatchCriteria for WeightedCriteria {
    fn is_edge_match(
        &self,
        g: &TemporalGraph,
        g_edge: usize,
        h: &TemporalGraph,
        h_edge: usize,
    ) -> Result<bool> {
        if !edge_in_window(g, g_edge) {
            return Ok(false);
        }
        let _ = h;
        match self.min_weights.get(&h_edge) {
            Some(&min) => Ok(g.edge_weight(g_edge) >= min),
            None => Ok(true),
        }
    }
}

/// Matches the typed/labeled layer of the graphs: edge and node type tags
/// (an empty query tag is a wildcard), per-query-edge weight restrictions,
/// per-query-vertex degree restrictions, and label / regex requirements on
/// query vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedCriteria;

impl MatchCriteria for TypedCriteria {
    fn is_edge_match(
        &self,
        g: &TemporalGraph,
        g_edge: usize,
        h: &TemporalGraph,
        h_edge: usize,
    ) -> Result<bool> {
        if !edge_in_window(g, g_edge) {
            return Ok(false);
        }

        let want = h.edge_type(h_edge);
        if !want.is_empty() && want != g.edge_type(g_edge) {
            return Ok(false);
        }

        let weight = g.edge_weight(g_edge);
        if !h
            .weight_restrictions(h_edge)
            .iter()
            .all(|r| r.admits(weight))
        {
            return Ok(false);
        }

        let g_e = g.edges()[g_edge];
        let h_e = h.edges()[h_edge];
        Ok(self.is_node_match(g, g_e.source(), h, h_e.source())?
            && self.is_node_match(g, g_e.dest(), h, h_e.dest())?)
    }

    fn is_node_match(
        &self,
        g: &TemporalGraph,
        g_node: usize,
        h: &TemporalGraph,
        h_node: usize,
    ) -> Result<bool> {
        let want = h.node_type(h_node);
        if !want.is_empty() && want != g.node_type(g_node) {
            return Ok(false);
        }

        for r in h.deg_restrictions(h_node) {
            let degree = match r.direction() {
                DegDirection::Out => g.out_deg(g_node, r.edge_type()),
                DegDirection::In => g.in_deg(g_node, r.edge_type()),
            };
            if !r.admits(degree) {
                return Ok(false);
            }
        }

        if h.needs_label_match(h_node) && g.node_label(g_node) != h.node_label(h_node) {
            return Ok(false);
        }
        if let Some(regex) = h.regex(h_node)
            && !regex.is_match(g.node_label(g_node))
        {
            return Ok(false);
        }

        Ok(true)
    }
}

/// Conjunction over a list of criteria: an element matches only if every
/// part agrees.
#[derive(Default)]
pub struct CompositeCriteria {
    parts: Vec<Box<dyn MatchCriteria>>,
}

impl CompositeCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, criteria: Box<dyn MatchCriteria>) -> &mut Self {
        self.parts.push(criteria);
        self
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl MatchCriteria for CompositeCriteria {
    fn is_edge_match(
        &self,
        g: &TemporalGraph,
        g_edge: usize,
        h: &TemporalGraph,
        h_edge: usize,
    ) -> Result<bool> {
        if !edge_in_window(g, g_edge) {
            return Ok(false);
        }
        for part in &self.parts {
            if !part.is_edge_match(g, g_edge, h, h_edge)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn is_node_match(
        &self,
        g: &TemporalGraph,
        g_node: usize,
        h: &TemporalGraph,
        h_node: usize,
    ) -> Result<bool> {
        for part in &self.parts {
            if !part.is_node_match(g, g_node, h, h_node)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
