//! Embedded temporal-graph pattern matching: ordered and unordered
//! subgraph search over timestamped directed multigraphs.
//!
//! ```rust
//! use chronograph::{TemporalGraph, WindowCriteria};
//! use chronograph::{find_all_subgraphs, find_ordered_subgraphs};
//!
//! let mut data = TemporalGraph::new();
//! data.add_edge(0, 1, 0, None)?;   // A -> B
//! data.add_edge(1, 2, 5, None)?;   // B -> C, five seconds later
//!
//! // Two-edge chain pattern: x -> y, then y -> z.
//! let mut query = TemporalGraph::new();
//! query.add_edge(0, 1, 0, None)?;
//! query.add_edge(1, 2, 1, None)?;
//!
//! let matches = find_all_subgraphs(&data, &query, &WindowCriteria, usize::MAX)?;
//! assert_eq!(matches.len(), 1);
//!
//! // Ordered search additionally bounds the occurrence's time span.
//! let count = find_ordered_subgraphs(&data, &query, &WindowCriteria, usize::MAX, 10)?;
//! assert_eq!(count, 1);
//! # Ok::<(), chronograph::ChronographError>(())
//! ```

pub mod error;
pub mod graph;
pub mod search;
pub mod types;

pub use error::{ChronographError, Result};

pub use graph::{Edge, Node, TemporalGraph};

pub use graph::attributes::{AttrKind, AttrSchema, AttrSpec, AttrValue, Attributes};

pub use graph::restrictions::{Bound, DegDirection, DegRestriction, WeightRestriction};

pub use search::criteria::{
    AttributeCriteria, CompositeCriteria, MatchCriteria, TypedCriteria, WeightedCriteria,
    WindowCriteria,
};

pub use search::filter;

pub use search::{
    SubgraphMatch, find_all_subgraphs, find_ordered_matches, find_ordered_subgraphs,
    subgraph_from_matches,
};

pub use types::{EdgeOptions, NodeOptions, SearchConfig, Timestamp};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{ChronographError, Result, TemporalGraph};

    pub use crate::{find_all_subgraphs, find_ordered_matches, find_ordered_subgraphs};

    pub use crate::{
        AttributeCriteria, CompositeCriteria, MatchCriteria, TypedCriteria, WeightedCriteria,
        WindowCriteria,
    };

    pub use crate::{EdgeOptions, NodeOptions, SearchConfig, Timestamp};

    pub use crate::filter;

    pub use crate::SubgraphMatch;
}
