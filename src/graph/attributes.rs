//! Typed attribute slots for nodes and edges.
//!
//! A data graph carries concrete values in each slot; a query graph carries
//! a restriction per slot: an exact value, a wildcard, or a numeric range.
//! Slot counts and kinds must agree between compared attribute sets, and a
//! disagreement is a schema error rather than a non-match.

use crate::error::{ChronographError, Result};

/// The data kind held by one attribute slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Str,
    Int,
    Float,
}

impl AttrKind {
    fn name(self) -> &'static str {
        match self {
            AttrKind::Str => "string",
            AttrKind::Int => "int",
            AttrKind::Float => "float",
        }
    }
}

/// A concrete attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl AttrValue {
    pub fn kind(&self) -> AttrKind {
        match self {
            AttrValue::Str(_) => AttrKind::Str,
            AttrValue::Int(_) => AttrKind::Int,
            AttrValue::Float(_) => AttrKind::Float,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

/// One attribute slot: a concrete value on data graphs, or a restriction
/// on query graphs.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrSpec {
    /// A concrete value; on the query side this demands an exact match.
    Value(AttrValue),
    /// Wildcard: any data value of the given kind passes.
    Any(AttrKind),
    /// Integer range with independent optional bounds (inclusive).
    IntRange { min: Option<i64>, max: Option<i64> },
    /// Float range with independent optional bounds (inclusive).
    FloatRange { min: Option<f64>, max: Option<f64> },
}

impl AttrSpec {
    pub fn kind(&self) -> AttrKind {
        match self {
            AttrSpec::Value(v) => v.kind(),
            AttrSpec::Any(kind) => *kind,
            AttrSpec::IntRange { .. } => AttrKind::Int,
            AttrSpec::FloatRange { .. } => AttrKind::Float,
        }
    }
}

/// Ordered list of attribute slots attached to one node or edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    slots: Vec<AttrSpec>,
}

impl Attributes {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a concrete value slot.
    pub fn add_value(&mut self, value: impl Into<AttrValue>) -> &mut Self {
        self.slots.push(AttrSpec::Value(value.into()));
        self
    }

    /// Append a wildcard slot of the given kind.
    pub fn add_any(&mut self, kind: AttrKind) -> &mut Self {
        self.slots.push(AttrSpec::Any(kind));
        self
    }

    /// Append an integer range slot. Fails if the bounds are inverted.
    pub fn add_int_range(&mut self, min: Option<i64>, max: Option<i64>) -> Result<&mut Self> {
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(ChronographError::InvalidArgument(format!(
                "inverted int range: min {} > max {}",
                lo, hi
            )));
        }
        self.slots.push(AttrSpec::IntRange { min, max });
        Ok(self)
    }

    /// Append a float range slot. Fails if a bound is non-finite or the
    /// bounds are inverted.
    pub fn add_float_range(&mut self, min: Option<f64>, max: Option<f64>) -> Result<&mut Self> {
        for bound in [min, max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ChronographError::InvalidArgument(format!(
                    "non-finite float range bound: {}",
                    bound
                )));
            }
        }
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(ChronographError::InvalidArgument(format!(
                "inverted float range: min {} > max {}",
                lo, hi
            )));
        }
        self.slots.push(AttrSpec::FloatRange { min, max });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[AttrSpec] {
        &self.slots
    }

    /// Test this (data-side) attribute set against a query-side attribute
    /// set, slot by slot. Returns `Ok(false)` on a plain non-match and
    /// `Err(SchemaMismatch)` when the two sets were built against
    /// incompatible definitions.
    pub fn satisfies(&self, query: &Attributes) -> Result<bool> {
        if self.len() != query.len() {
            return Err(ChronographError::SchemaMismatch(format!(
                "attribute sets differ in slot count: data has {}, query has {}",
                self.len(),
                query.len()
            )));
        }
        for (i, (data, restriction)) in self.slots.iter().zip(&query.slots).enumerate() {
            if data.kind() != restriction.kind() {
                return Err(ChronographError::SchemaMismatch(format!(
                    "slot {} kind differs: data is {}, query is {}",
                    i,
                    data.kind().name(),
                    restriction.kind().name()
                )));
            }
            let AttrSpec::Value(value) = data else {
                return Err(ChronographError::SchemaMismatch(format!(
                    "data slot {} is a restriction; restrictions belong to query graphs",
                    i
                )));
            };
            match restriction {
                AttrSpec::Any(_) => continue,
                AttrSpec::Value(expected) => {
                    if value != expected {
                        return Ok(false);
                    }
                }
                AttrSpec::IntRange { min, max } => {
                    let AttrValue::Int(x) = value else {
                        unreachable!("kind checked above")
                    };
                    if min.is_some_and(|lo| *x < lo) || max.is_some_and(|hi| *x > hi) {
                        return Ok(false);
                    }
                }
                AttrSpec::FloatRange { min, max } => {
                    let AttrValue::Float(x) = value else {
                        unreachable!("kind checked above")
                    };
                    if min.is_some_and(|lo| *x < lo) || max.is_some_and(|hi| *x > hi) {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }
}

/// Declares the attribute slots a graph's nodes or edges carry.
///
/// A graph with a declared schema rejects attribute sets of the wrong
/// shape at insertion time instead of at compare time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrSchema {
    names: Vec<String>,
    kinds: Vec<AttrKind>,
}

impl AttrSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_slot(&mut self, name: impl Into<String>, kind: AttrKind) -> &mut Self {
        self.names.push(name.into());
        self.kinds.push(kind);
        self
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn kinds(&self) -> &[AttrKind] {
        &self.kinds
    }

    /// Verify an attribute set has the declared slot count and kinds.
    pub fn check(&self, attributes: &Attributes) -> Result<()> {
        if attributes.len() != self.len() {
            return Err(ChronographError::SchemaMismatch(format!(
                "attribute set has {} slots, schema declares {}",
                attributes.len(),
                self.len()
            )));
        }
        for (i, (slot, expected)) in attributes.slots().iter().zip(&self.kinds).enumerate() {
            if slot.kind() != *expected {
                return Err(ChronographError::SchemaMismatch(format!(
                    "slot {} ({}) is {}, schema declares {}",
                    i,
                    self.names[i],
                    slot.kind().name(),
                    expected.name()
                )));
            }
        }
        Ok(())
    }
}
