//! Directed temporal multigraph with chronological edge indexing.
//!
//! Edges are inserted in any order under a timestamp and the graph lazily
//! builds a chronological view: an edge list sorted by (timestamp,
//! insertion order), per-node adjacency lists in the same order, a
//! vertex-pair index, and per-edge-type degree tables. Any mutation
//! empties the cached view; the next read (or an explicit [`TemporalGraph::rebuild`])
//! builds it again. One graph type serves both data and query graphs:
//! metadata (labels, types, weights, attributes) and query-side
//! restrictions live in optional side tables rather than subclasses.

pub mod attributes;
pub mod restrictions;

use crate::error::{ChronographError, Result};
use crate::types::{EdgeOptions, NodeOptions, Timestamp};
use attributes::{AttrSchema, Attributes};
use once_cell::unsync::OnceCell;
use regex::Regex;
use restrictions::{DegRestriction, WeightRestriction};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A directed edge in the chronological view.
///
/// `index` is the edge's position in the time-sorted edge sequence, not
/// its insertion order; it changes only when the graph is mutated and
/// rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    index: usize,
    source: usize,
    dest: usize,
    time: Timestamp,
}

impl Edge {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn dest(&self) -> usize {
        self.dest
    }

    pub fn time(&self) -> Timestamp {
        self.time
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.dest
    }
}

/// Per-node incident edge lists, all in chronological order.
#[derive(Debug, Clone, Default)]
pub struct Node {
    edges: Vec<usize>,
    out_edges: Vec<usize>,
    in_edges: Vec<usize>,
}

impl Node {
    /// All edges touching this node, in chronological order.
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    /// Outgoing edges, in chronological order.
    pub fn out_edges(&self) -> &[usize] {
        &self.out_edges
    }

    /// Incoming edges, in chronological order.
    pub fn in_edges(&self) -> &[usize] {
        &self.in_edges
    }
}

/// Raw insertion-order record, kept under its timestamp until the
/// chronological view is built.
#[derive(Debug, Clone)]
struct EdgeRecord {
    source: usize,
    dest: usize,
    weight: f64,
    edge_type: String,
    attributes: Attributes,
}

/// The chronological view: everything derived from the time-keyed edge
/// records. Built as one unit so the parallel columns can never drift
/// out of step with the edge list.
#[derive(Debug)]
struct GraphIndex {
    edges: Vec<Edge>,
    nodes: Vec<Node>,
    pair_edges: FxHashMap<(usize, usize), SmallVec<[usize; 2]>>,
    weights: Vec<f64>,
    edge_types: Vec<String>,
    edge_attributes: Vec<Attributes>,
    typed_out_degs: FxHashMap<String, Vec<usize>>,
    typed_in_degs: FxHashMap<String, Vec<usize>>,
}

/// Directed multigraph with per-edge timestamps and optional metadata
/// side tables.
///
/// # Example
///
/// ```rust
/// use chronograph::TemporalGraph;
///
/// let mut g = TemporalGraph::new();
/// g.add_edge(0, 1, 100, None)?;
/// g.add_edge(1, 2, 105, None)?;
/// g.add_edge(0, 1, 95, None)?;
///
/// // The chronological view orders edges by time, not insertion.
/// assert_eq!(g.edges()[0].time(), 95);
/// assert!(g.has_edge(0, 1));
/// assert_eq!(g.edge_indexes(0, 1)?.len(), 2);
/// # Ok::<(), chronograph::ChronographError>(())
/// ```
#[derive(Debug)]
pub struct TemporalGraph {
    node_count: usize,
    edge_count: usize,
    window_duration: Timestamp,
    window_start: Timestamp,
    window_end: Timestamp,
    time_edges: BTreeMap<Timestamp, Vec<EdgeRecord>>,

    node_labels: Vec<String>,
    label_index: FxHashMap<String, usize>,
    node_types: Vec<String>,
    node_attributes: Vec<Attributes>,
    node_schema: Option<AttrSchema>,
    edge_schema: Option<AttrSchema>,

    // Query-side restrictions; keyed by node index (stable) or by
    // chronological edge index (query graphs are built once, then frozen).
    deg_restrictions: FxHashMap<usize, Vec<DegRestriction>>,
    weight_restrictions: FxHashMap<usize, Vec<WeightRestriction>>,
    label_match: FxHashSet<usize>,
    regex_match: FxHashMap<usize, Regex>,

    cache: OnceCell<GraphIndex>,
}

impl Default for TemporalGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TemporalGraph {
    /// An unwindowed graph: every edge stays in the analysis window.
    pub fn new() -> Self {
        Self::with_window(0)
    }

    /// A graph whose analysis window keeps only the most recent
    /// `window_duration` seconds of edges. 0 means unbounded.
    pub fn with_window(window_duration: Timestamp) -> Self {
        let (window_start, window_end) = if window_duration == 0 {
            (Timestamp::MIN, Timestamp::MAX)
        } else {
            (0, 0)
        };
        Self {
            node_count: 0,
            edge_count: 0,
            window_duration,
            window_start,
            window_end,
            time_edges: BTreeMap::new(),
            node_labels: Vec::new(),
            label_index: FxHashMap::default(),
            node_types: Vec::new(),
            node_attributes: Vec::new(),
            node_schema: None,
            edge_schema: None,
            deg_restrictions: FxHashMap::default(),
            weight_restrictions: FxHashMap::default(),
            label_match: FxHashSet::default(),
            regex_match: FxHashMap::default(),
            cache: OnceCell::new(),
        }
    }

    /// Declare the attribute slots carried by this graph's nodes.
    pub fn set_node_schema(&mut self, schema: AttrSchema) {
        self.node_schema = Some(schema);
    }

    /// Declare the attribute slots carried by this graph's edges.
    pub fn set_edge_schema(&mut self, schema: AttrSchema) {
        self.edge_schema = Some(schema);
    }

    pub fn node_schema(&self) -> Option<&AttrSchema> {
        self.node_schema.as_ref()
    }

    pub fn edge_schema(&self) -> Option<&AttrSchema> {
        self.edge_schema.as_ref()
    }

    /// Make sure at least `v + 1` nodes are accounted for.
    pub fn add_node(&mut self, v: usize) {
        self.ensure_nodes(v + 1);
    }

    /// Ensure node `v` exists and register `label` for it.
    ///
    /// Re-registering a label moves it to the new node (last write wins).
    pub fn add_labeled_node(&mut self, v: usize, label: impl Into<String>) {
        self.ensure_nodes(v + 1);
        let label = label.into();
        self.node_labels[v] = label.clone();
        self.label_index.insert(label, v);
    }

    /// Append a node at the next free index with a label and optional
    /// type/attributes. Fails if the label is already registered or the
    /// attributes violate the node schema.
    pub fn add_named_node(
        &mut self,
        label: impl Into<String>,
        opts: Option<NodeOptions>,
    ) -> Result<usize> {
        let label = label.into();
        if self.label_index.contains_key(&label) {
            return Err(ChronographError::InvalidArgument(format!(
                "node label already registered: {}",
                label
            )));
        }
        let opts = opts.unwrap_or_default();
        if let (Some(schema), Some(attrs)) = (&self.node_schema, &opts.attributes) {
            schema.check(attrs)?;
        }

        let v = self.node_count;
        self.ensure_nodes(v + 1);
        self.node_labels[v] = label.clone();
        self.label_index.insert(label, v);
        if let Some(node_type) = opts.node_type {
            self.node_types[v] = node_type;
        }
        if let Some(attrs) = opts.attributes {
            self.node_attributes[v] = attrs;
        }
        Ok(v)
    }

    /// Add a directed edge at the given timestamp, with optional
    /// weight/type/attributes.
    ///
    /// Fails with `InvalidArgument` on a non-finite weight and with
    /// `SchemaMismatch` if attributes are supplied that violate the
    /// declared edge schema.
    pub fn add_edge(
        &mut self,
        u: usize,
        v: usize,
        time: Timestamp,
        opts: Option<EdgeOptions>,
    ) -> Result<()> {
        let opts = opts.unwrap_or_default();
        if !opts.weight.is_finite() {
            return Err(ChronographError::InvalidArgument(format!(
                "edge weight must be finite, got: {}",
                opts.weight
            )));
        }
        let attributes = match opts.attributes {
            Some(attrs) => {
                if let Some(schema) = &self.edge_schema {
                    schema.check(&attrs)?;
                }
                attrs
            }
            None => Attributes::new(),
        };

        self.ensure_nodes(u.max(v) + 1);
        self.time_edges.entry(time).or_default().push(EdgeRecord {
            source: u,
            dest: v,
            weight: opts.weight,
            edge_type: opts.edge_type.unwrap_or_default(),
            attributes,
        });
        self.edge_count += 1;
        self.cache = OnceCell::new();

        // Slide the window forward when a later edge arrives.
        if time > self.window_end {
            self.window_end = time;
            self.window_start = self.window_end - self.window_duration;
        }
        Ok(())
    }

    /// Add an edge whose timestamp is the current edge count, giving a
    /// purely sequential ordering when real times are not available.
    pub fn add_edge_seq(&mut self, u: usize, v: usize, opts: Option<EdgeOptions>) -> Result<()> {
        let time = self.edge_count as Timestamp;
        self.add_edge(u, v, time, opts)
    }

    /// Add an edge between two labeled nodes. Fails with `NotFound` if
    /// either label is unregistered.
    pub fn add_named_edge(
        &mut self,
        source: &str,
        dest: &str,
        time: Timestamp,
        opts: Option<EdgeOptions>,
    ) -> Result<()> {
        let u = self.node_index(source)?;
        let v = self.node_index(dest)?;
        self.add_edge(u, v, time, opts)
    }

    /// Copy edge `edge_index` (chronological index) from another graph,
    /// including its metadata and the metadata of its endpoints. Node
    /// indices are preserved.
    pub fn copy_edge(&mut self, edge_index: usize, other: &TemporalGraph) -> Result<()> {
        let m = other.edge_count();
        if edge_index >= m {
            return Err(ChronographError::NotFound(format!(
                "edge index {} out of range ({} edges)",
                edge_index, m
            )));
        }
        let edge = other.edges()[edge_index];
        let opts = EdgeOptions {
            weight: other.edge_weight(edge_index),
            edge_type: Some(other.edge_type(edge_index).to_string()),
            attributes: Some(other.edge_attributes(edge_index).clone()),
        };
        self.add_edge(edge.source(), edge.dest(), edge.time(), Some(opts))?;

        for v in [edge.source(), edge.dest()] {
            let label = other.node_label(v);
            if !label.is_empty() && self.node_label(v).is_empty() {
                self.add_labeled_node(v, label);
            }
            if !other.node_type(v).is_empty() {
                self.node_types[v] = other.node_type(v).to_string();
            }
            if !other.node_attributes(v).is_empty() {
                self.node_attributes[v] = other.node_attributes(v).clone();
            }
        }
        Ok(())
    }

    /// Build a new graph containing the given edges (deduplicated),
    /// copying node and edge metadata. Node indices are preserved.
    pub fn subgraph_from_edges(
        &self,
        edge_indexes: impl IntoIterator<Item = usize>,
    ) -> Result<TemporalGraph> {
        let mut out = TemporalGraph::with_window(self.window_duration);
        out.node_schema = self.node_schema.clone();
        out.edge_schema = self.edge_schema.clone();

        let mut seen = FxHashSet::default();
        for e in edge_indexes {
            if seen.insert(e) {
                out.copy_edge(e, self)?;
            }
        }
        Ok(out)
    }

    /// Number of nodes (without building the chronological view).
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges (without building the chronological view).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Chronologically ordered edge list. Builds the view if needed.
    pub fn edges(&self) -> &[Edge] {
        &self.index().edges
    }

    /// Per-node adjacency lists, in chronological order. Builds the view
    /// if needed.
    pub fn nodes(&self) -> &[Node] {
        &self.index().nodes
    }

    /// True if at least one edge runs from `u` to `v`.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.index().pair_edges.contains_key(&(u, v))
    }

    /// Chronological indices of all edges from `u` to `v`. Fails with
    /// `NotFound` if the ordered pair has no edge.
    pub fn edge_indexes(&self, u: usize, v: usize) -> Result<&[usize]> {
        self.index()
            .pair_edges
            .get(&(u, v))
            .map(|list| list.as_slice())
            .ok_or_else(|| {
                ChronographError::NotFound(format!("no edges between vertices {} and {}", u, v))
            })
    }

    /// Weight of the edge at the given chronological index.
    pub fn edge_weight(&self, edge_index: usize) -> f64 {
        self.index().weights[edge_index]
    }

    /// Type tag of the edge at the given chronological index; empty if
    /// untyped.
    pub fn edge_type(&self, edge_index: usize) -> &str {
        &self.index().edge_types[edge_index]
    }

    /// Attribute slots of the edge at the given chronological index.
    pub fn edge_attributes(&self, edge_index: usize) -> &Attributes {
        &self.index().edge_attributes[edge_index]
    }

    /// Label of the given node; empty if unlabeled.
    pub fn node_label(&self, v: usize) -> &str {
        self.node_labels.get(v).map(String::as_str).unwrap_or("")
    }

    /// Index of the node registered under `label`.
    pub fn node_index(&self, label: &str) -> Result<usize> {
        self.label_index.get(label).copied().ok_or_else(|| {
            ChronographError::NotFound(format!("no node registered under label: {}", label))
        })
    }

    pub fn has_labeled_node(&self, label: &str) -> bool {
        self.label_index.contains_key(label)
    }

    /// Type tag of the given node; empty if untyped.
    pub fn node_type(&self, v: usize) -> &str {
        self.node_types.get(v).map(String::as_str).unwrap_or("")
    }

    /// Attribute slots of the given node.
    pub fn node_attributes(&self, v: usize) -> &Attributes {
        static EMPTY: Attributes = Attributes::new();
        self.node_attributes.get(v).unwrap_or(&EMPTY)
    }

    /// Number of outgoing edges of `v` carrying the given type.
    pub fn out_deg(&self, v: usize, edge_type: &str) -> usize {
        self.index()
            .typed_out_degs
            .get(edge_type)
            .and_then(|degs| degs.get(v))
            .copied()
            .unwrap_or(0)
    }

    /// Number of incoming edges of `v` carrying the given type.
    pub fn in_deg(&self, v: usize, edge_type: &str) -> usize {
        self.index()
            .typed_in_degs
            .get(edge_type)
            .and_then(|degs| degs.get(v))
            .copied()
            .unwrap_or(0)
    }

    /// Attach a degree restriction to a query vertex.
    pub fn add_deg_restriction(&mut self, v: usize, restriction: DegRestriction) {
        self.ensure_nodes(v + 1);
        self.deg_restrictions.entry(v).or_default().push(restriction);
    }

    pub fn has_deg_restrictions(&self, v: usize) -> bool {
        self.deg_restrictions.contains_key(&v)
    }

    /// Degree restrictions attached to a query vertex; empty if none.
    pub fn deg_restrictions(&self, v: usize) -> &[DegRestriction] {
        self.deg_restrictions
            .get(&v)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Attach a weight restriction to a query edge (by chronological
    /// index; attach after the query graph is fully built).
    pub fn add_weight_restriction(&mut self, edge_index: usize, restriction: WeightRestriction) {
        self.weight_restrictions
            .entry(edge_index)
            .or_default()
            .push(restriction);
    }

    pub fn has_weight_restrictions(&self, edge_index: usize) -> bool {
        self.weight_restrictions.contains_key(&edge_index)
    }

    /// Weight restrictions attached to a query edge; empty if none.
    pub fn weight_restrictions(&self, edge_index: usize) -> &[WeightRestriction] {
        self.weight_restrictions
            .get(&edge_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Require a matched data vertex to carry the same label as this
    /// query vertex.
    pub fn set_label_match(&mut self, v: usize) {
        self.ensure_nodes(v + 1);
        self.label_match.insert(v);
    }

    pub fn needs_label_match(&self, v: usize) -> bool {
        self.label_match.contains(&v)
    }

    /// Require a matched data vertex's label to match this regular
    /// expression.
    pub fn set_regex_match(&mut self, v: usize, regex: Regex) {
        self.ensure_nodes(v + 1);
        self.regex_match.insert(v, regex);
    }

    /// The regex attached to a query vertex, if any.
    pub fn regex(&self, v: usize) -> Option<&Regex> {
        self.regex_match.get(&v)
    }

    /// Maximum age (seconds) of edges kept in the analysis window;
    /// 0 means unbounded.
    pub fn window_duration(&self) -> Timestamp {
        self.window_duration
    }

    /// Adjust the window duration. Shortening truncates the window from
    /// the end; lengthening expands it from the start.
    pub fn set_window_duration(&mut self, duration: Timestamp) -> Result<()> {
        if duration < 0 {
            return Err(ChronographError::InvalidArgument(format!(
                "window duration must be >= 0, got {}",
                duration
            )));
        }
        if duration == self.window_duration {
            return Ok(());
        }
        if duration == 0 {
            self.window_start = Timestamp::MIN;
            self.window_end = Timestamp::MAX;
        } else if self.window_duration == 0 {
            // Becoming bounded: anchor the window at the newest edge.
            self.window_end = self.time_edges.keys().next_back().copied().unwrap_or(0);
            self.window_start = self.window_end - duration;
        } else if duration < self.window_duration {
            self.window_start = self.window_end - duration;
        } else {
            self.window_end = self.window_start.saturating_add(duration);
        }
        self.window_duration = duration;
        Ok(())
    }

    /// Start of the current analysis window, clamped to the data's
    /// earliest edge time.
    pub fn window_start(&self) -> Timestamp {
        match self.index().edges.first() {
            Some(first) => first.time().max(self.window_start),
            None => self.window_start,
        }
    }

    /// End of the current analysis window, clamped to the data's latest
    /// edge time.
    pub fn window_end(&self) -> Timestamp {
        match self.index().edges.last() {
            Some(last) => last.time().min(self.window_end),
            None => self.window_end,
        }
    }

    /// Build the chronological view now if it is stale. Reads do this on
    /// demand; calling it explicitly just moves the cost to a known point.
    /// Idempotent: a fresh view is left untouched.
    pub fn rebuild(&mut self) {
        let _ = self.index();
    }

    fn ensure_nodes(&mut self, min: usize) {
        if self.node_count < min {
            self.node_count = min;
            self.node_labels.resize(min, String::new());
            self.node_types.resize(min, String::new());
            self.node_attributes.resize(min, Attributes::new());
            self.cache = OnceCell::new();
        }
    }

    fn index(&self) -> &GraphIndex {
        self.cache.get_or_init(|| self.build_index())
    }

    fn build_index(&self) -> GraphIndex {
        let n = self.node_count;
        let m = self.edge_count;

        let mut edges = Vec::with_capacity(m);
        let mut nodes = vec![Node::default(); n];
        let mut pair_edges: FxHashMap<(usize, usize), SmallVec<[usize; 2]>> = FxHashMap::default();
        let mut weights = Vec::with_capacity(m);
        let mut edge_types = Vec::with_capacity(m);
        let mut edge_attributes = Vec::with_capacity(m);
        let mut typed_out_degs: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut typed_in_degs: FxHashMap<String, Vec<usize>> = FxHashMap::default();

        // BTreeMap iteration gives timestamps in order; records under one
        // timestamp keep their insertion order.
        let mut index = 0;
        for (&time, records) in &self.time_edges {
            for record in records {
                let (u, v) = (record.source, record.dest);
                edges.push(Edge {
                    index,
                    source: u,
                    dest: v,
                    time,
                });
                weights.push(record.weight);
                edge_types.push(record.edge_type.clone());
                edge_attributes.push(record.attributes.clone());

                nodes[u].edges.push(index);
                nodes[v].edges.push(index);
                nodes[u].out_edges.push(index);
                nodes[v].in_edges.push(index);
                pair_edges.entry((u, v)).or_default().push(index);

                typed_out_degs
                    .entry(record.edge_type.clone())
                    .or_insert_with(|| vec![0; n])[u] += 1;
                typed_in_degs
                    .entry(record.edge_type.clone())
                    .or_insert_with(|| vec![0; n])[v] += 1;

                index += 1;
            }
        }

        log::debug!("rebuilt chronological index: {} nodes, {} edges", n, m);

        GraphIndex {
            edges,
            nodes,
            pair_edges,
            weights,
            edge_types,
            edge_attributes,
            typed_out_degs,
            typed_in_degs,
        }
    }
}
