//! Pre-search graph reduction.
//!
//! Shrinks a data graph before the expensive backtracking search by
//! copying only edges that could possibly participate in a match. Every
//! strategy over-approximates: an edge that belongs to some occurrence is
//! never dropped. The input graph is never mutated.

use crate::error::Result;
use crate::graph::TemporalGraph;
use crate::search::criteria::MatchCriteria;
use crate::types::Timestamp;
use rustc_hash::FxHashSet;

/// Copy of `g` keeping only edges that satisfy `criteria` against at
/// least one query edge.
///
/// If any query vertex carries degree restrictions, the criteria check is
/// replaced by a type-set fast path: keep every data edge whose type is
/// used by a query edge or referenced by a degree restriction, since
/// degree bounds are counted over incident data edges. A query edge with
/// an empty (wildcard) type forces all edges to be kept.
pub fn by_criteria(
    g: &TemporalGraph,
    h: &TemporalGraph,
    criteria: &dyn MatchCriteria,
) -> Result<TemporalGraph> {
    let mut out = empty_like(g);

    let g_m = g.edge_count();
    let h_m = h.edge_count();

    let has_deg_restrictions = (0..h.node_count()).any(|v| h.has_deg_restrictions(v));
    if has_deg_restrictions {
        let mut keep_all = false;
        let mut edge_types: FxHashSet<&str> = FxHashSet::default();
        for v in 0..h.node_count() {
            for r in h.deg_restrictions(v) {
                edge_types.insert(r.edge_type());
            }
        }
        for h_i in 0..h_m {
            let edge_type = h.edge_type(h_i);
            if edge_type.is_empty() {
                keep_all = true;
            } else {
                edge_types.insert(edge_type);
            }
        }

        for g_i in 0..g_m {
            if keep_all || edge_types.contains(g.edge_type(g_i)) {
                out.copy_edge(g_i, g)?;
            }
        }
    } else {
        for g_i in 0..g_m {
            for h_i in 0..h_m {
                if criteria.is_edge_match(g, g_i, h, h_i)? {
                    out.copy_edge(g_i, g)?;
                    break;
                }
            }
        }
    }

    log::debug!(
        "criteria filter kept {} of {} edges",
        out.edge_count(),
        g_m
    );
    Ok(out)
}

/// Copy of `g` keeping only edges whose timestamp falls in
/// `[start, end]` (inclusive).
pub fn by_time_range(
    g: &TemporalGraph,
    start: Timestamp,
    end: Timestamp,
) -> Result<TemporalGraph> {
    let mut out = empty_like(g);

    for edge in g.edges() {
        if edge.time() >= start && edge.time() <= end {
            out.copy_edge(edge.index(), g)?;
        }
    }

    log::debug!(
        "time filter [{}, {}] kept {} of {} edges",
        start,
        end,
        out.edge_count(),
        g.edge_count()
    );
    Ok(out)
}

/// A fresh graph carrying over `g`'s window and schemas but none of its
/// elements.
fn empty_like(g: &TemporalGraph) -> TemporalGraph {
    let mut out = TemporalGraph::with_window(g.window_duration());
    if let Some(schema) = g.node_schema() {
        out.set_node_schema(schema.clone());
    }
    if let Some(schema) = g.edge_schema() {
        out.set_edge_schema(schema.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::restrictions::{Bound, DegDirection, DegRestriction};
    use crate::search::criteria::{TypedCriteria, WindowCriteria};
    use crate::types::EdgeOptions;

    fn typed(edge_type: &str) -> Option<EdgeOptions> {
        Some(EdgeOptions::with_type(edge_type))
    }

    #[test]
    fn test_criteria_filter_drops_unmatchable_edges() {
        let mut g = TemporalGraph::new();
        g.add_edge(0, 1, 1, typed("email")).unwrap();
        g.add_edge(1, 2, 2, typed("ssh")).unwrap();
        g.add_edge(2, 3, 3, typed("email")).unwrap();

        let mut h = TemporalGraph::new();
        h.add_edge(0, 1, 0, typed("email")).unwrap();

        let filtered = by_criteria(&g, &h, &TypedCriteria).unwrap();
        assert_eq!(filtered.edge_count(), 2);
        assert!(filtered.has_edge(0, 1));
        assert!(filtered.has_edge(2, 3));
        assert!(!filtered.has_edge(1, 2));

        // Input untouched.
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_criteria_filter_is_over_approximating() {
        // The base criteria accepts every in-window edge, so nothing is
        // dropped even though no two-edge chain exists.
        let mut g = TemporalGraph::new();
        g.add_edge(0, 1, 1, None).unwrap();
        g.add_edge(2, 3, 2, None).unwrap();

        let mut h = TemporalGraph::new();
        h.add_edge(0, 1, 0, None).unwrap();
        h.add_edge(1, 2, 1, None).unwrap();

        let filtered = by_criteria(&g, &h, &WindowCriteria).unwrap();
        assert_eq!(filtered.edge_count(), 2);
    }

    #[test]
    fn test_deg_restriction_fast_path_keeps_restriction_types() {
        let mut g = TemporalGraph::new();
        g.add_edge(0, 1, 1, typed("email")).unwrap();
        g.add_edge(0, 2, 2, typed("login")).unwrap();
        g.add_edge(0, 3, 3, typed("ssh")).unwrap();

        // The query edge wants "email", and a degree restriction counts
        // "login" edges; both types must survive the filter.
        let mut h = TemporalGraph::new();
        h.add_edge(0, 1, 0, typed("email")).unwrap();
        h.add_deg_restriction(
            0,
            DegRestriction::new("login", DegDirection::Out, Bound::GreaterThan, 0),
        );

        let filtered = by_criteria(&g, &h, &TypedCriteria).unwrap();
        assert_eq!(filtered.edge_count(), 2);
        assert!(filtered.has_edge(0, 1));
        assert!(filtered.has_edge(0, 2));
        assert!(!filtered.has_edge(0, 3));
    }

    #[test]
    fn test_deg_restriction_fast_path_wildcard_keeps_all() {
        let mut g = TemporalGraph::new();
        g.add_edge(0, 1, 1, typed("email")).unwrap();
        g.add_edge(1, 2, 2, typed("ssh")).unwrap();

        let mut h = TemporalGraph::new();
        h.add_edge(0, 1, 0, None).unwrap(); // wildcard type
        h.add_deg_restriction(
            0,
            DegRestriction::new("email", DegDirection::Out, Bound::GreaterThan, 0),
        );

        let filtered = by_criteria(&g, &h, &TypedCriteria).unwrap();
        assert_eq!(filtered.edge_count(), 2);
    }

    #[test]
    fn test_time_range_filter() {
        let mut g = TemporalGraph::new();
        g.add_labeled_node(0, "a");
        g.add_edge(0, 1, 10, None).unwrap();
        g.add_edge(1, 2, 20, None).unwrap();
        g.add_edge(2, 3, 30, None).unwrap();

        let filtered = by_time_range(&g, 15, 25).unwrap();
        assert_eq!(filtered.edge_count(), 1);
        assert!(filtered.has_edge(1, 2));

        // Bounds are inclusive.
        let filtered = by_time_range(&g, 10, 30).unwrap();
        assert_eq!(filtered.edge_count(), 3);
        assert_eq!(filtered.node_label(0), "a");
    }

    #[test]
    fn test_time_range_filter_empty_result() {
        let mut g = TemporalGraph::new();
        g.add_edge(0, 1, 10, None).unwrap();

        let filtered = by_time_range(&g, 100, 200).unwrap();
        assert_eq!(filtered.edge_count(), 0);
        assert!(filtered.edges().is_empty());
    }
}
