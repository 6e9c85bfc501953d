//! Query-side structural restrictions.
//!
//! These attach to specific query vertices or edges and constrain what a
//! data vertex/edge may look like beyond plain topology: vertex degree per
//! edge type, or edge weight relative to a threshold.

use crate::error::{ChronographError, Result};

/// Which side of a threshold a restricted quantity must fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    LessThan,
    GreaterThan,
}

/// Direction of the incident edges a degree restriction counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegDirection {
    Out,
    In,
}

/// Requires a matched data vertex's in- or out-degree, counted for one
/// edge type, to fall strictly on one side of a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DegRestriction {
    edge_type: String,
    direction: DegDirection,
    bound: Bound,
    value: usize,
}

impl DegRestriction {
    pub fn new(
        edge_type: impl Into<String>,
        direction: DegDirection,
        bound: Bound,
        value: usize,
    ) -> Self {
        Self {
            edge_type: edge_type.into(),
            direction,
            bound,
            value,
        }
    }

    pub fn edge_type(&self) -> &str {
        &self.edge_type
    }

    pub fn direction(&self) -> DegDirection {
        self.direction
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn value(&self) -> usize {
        self.value
    }

    /// Test a data vertex's degree against this restriction.
    pub fn admits(&self, degree: usize) -> bool {
        match self.bound {
            Bound::LessThan => degree < self.value,
            Bound::GreaterThan => degree > self.value,
        }
    }
}

/// Requires a matched data edge's weight to fall strictly on one side of
/// a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightRestriction {
    bound: Bound,
    value: f64,
}

impl WeightRestriction {
    /// Fails with `InvalidArgument` if the threshold is not finite.
    pub fn new(bound: Bound, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(ChronographError::InvalidArgument(format!(
                "weight restriction threshold must be finite, got: {}",
                value
            )));
        }
        Ok(Self { bound, value })
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Test a data edge's weight against this restriction.
    pub fn admits(&self, weight: f64) -> bool {
        match self.bound {
            Bound::LessThan => weight < self.value,
            Bound::GreaterThan => weight > self.value,
        }
    }
}
