//! Subgraph search over temporal graphs.
//!
//! Two algorithms: [`find_all_subgraphs`] enumerates occurrences ignoring
//! edge order, and [`find_ordered_subgraphs`] counts occurrences whose
//! data edges preserve the query's chronological edge order inside a
//! bounded time span. Both take a [`criteria::MatchCriteria`] deciding
//! element compatibility, and both can be preceded by a [`filter`] pass
//! that shrinks the data graph.

pub mod criteria;
pub mod filter;
pub mod matches;

mod ordered;
mod unordered;

pub use matches::{SubgraphMatch, subgraph_from_matches};

use crate::error::{ChronographError, Result};
use crate::graph::TemporalGraph;
use crate::types::Timestamp;
use criteria::MatchCriteria;

/// Find every occurrence of `h` in `g`, ignoring edge order.
///
/// Returns at most `limit` matches. Each match corresponds to one full
/// injective vertex assignment and aggregates all compatible data edges
/// per query edge. Candidates are tried in ascending vertex order, so
/// results are deterministic for a given graph.
///
/// # Example
///
/// ```rust
/// use chronograph::{TemporalGraph, WindowCriteria, find_all_subgraphs};
///
/// let mut g = TemporalGraph::new();
/// g.add_edge(0, 1, 10, None)?;
/// g.add_edge(1, 2, 20, None)?;
///
/// // A single wildcard edge matches once per data edge.
/// let mut h = TemporalGraph::new();
/// h.add_edge(0, 1, 0, None)?;
///
/// let matches = find_all_subgraphs(&g, &h, &WindowCriteria, usize::MAX)?;
/// assert_eq!(matches.len(), 2);
/// # Ok::<(), chronograph::ChronographError>(())
/// ```
pub fn find_all_subgraphs(
    g: &TemporalGraph,
    h: &TemporalGraph,
    criteria: &dyn MatchCriteria,
    limit: usize,
) -> Result<Vec<SubgraphMatch>> {
    let results = unordered::find_all(g, h, criteria, limit)?;
    log::debug!(
        "unordered search found {} occurrence(s) of a {}-vertex query",
        results.len(),
        h.node_count()
    );
    Ok(results)
}

/// Count occurrences of `h` in `g` whose matched data edges preserve the
/// query's chronological edge order, with the whole occurrence spanning
/// at most `delta` seconds. Stops early once `limit` occurrences are
/// counted.
///
/// Fails with `InvalidArgument` if `delta` is negative.
pub fn find_ordered_subgraphs(
    g: &TemporalGraph,
    h: &TemporalGraph,
    criteria: &dyn MatchCriteria,
    limit: usize,
    delta: Timestamp,
) -> Result<u64> {
    check_delta(delta)?;
    let count = ordered::count(g, h, criteria, limit, delta)?;
    log::debug!(
        "ordered search counted {} occurrence(s) within delta {}",
        count,
        delta
    );
    Ok(count)
}

/// Enumerate ordered occurrences as [`SubgraphMatch`] objects instead of
/// counting them. Same pruning and ordering rules as
/// [`find_ordered_subgraphs`]; returns at most `limit` matches.
///
/// Fails with `InvalidArgument` if `delta` is negative.
pub fn find_ordered_matches(
    g: &TemporalGraph,
    h: &TemporalGraph,
    criteria: &dyn MatchCriteria,
    limit: usize,
    delta: Timestamp,
) -> Result<Vec<SubgraphMatch>> {
    check_delta(delta)?;
    ordered::collect(g, h, criteria, limit, delta)
}

fn check_delta(delta: Timestamp) -> Result<()> {
    if delta < 0 {
        return Err(ChronographError::InvalidArgument(format!(
            "delta must be >= 0, got {}",
            delta
        )));
    }
    Ok(())
}
