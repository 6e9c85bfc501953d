//! Common types and configuration.
//!
//! This module provides the timestamp alias used throughout the crate,
//! the option bundles accepted by graph insertion, and a serializable
//! search configuration loadable from JSON or TOML.

use crate::error::{ChronographError, Result};
use crate::graph::attributes::Attributes;
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Edge timestamp in seconds. A plain integer rather than a calendar
/// type: loaders decide the epoch, the core only compares and subtracts.
pub type Timestamp = i64;

/// Optional metadata accepted when inserting an edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeOptions {
    /// Edge weight; 0.0 when not supplied.
    pub weight: f64,
    /// Edge type tag; empty means untyped (and acts as a wildcard on
    /// query graphs).
    pub edge_type: Option<String>,
    /// Attribute slots; checked against the graph's edge schema if one
    /// is declared.
    pub attributes: Option<Attributes>,
}

impl EdgeOptions {
    pub fn with_weight(weight: f64) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }

    pub fn with_type(edge_type: impl Into<String>) -> Self {
        Self {
            edge_type: Some(edge_type.into()),
            ..Self::default()
        }
    }

    pub fn with_attributes(attributes: Attributes) -> Self {
        Self {
            attributes: Some(attributes),
            ..Self::default()
        }
    }

    /// Add a weight to an existing option bundle.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Add a type tag to an existing option bundle.
    pub fn edge_type(mut self, edge_type: impl Into<String>) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }

    /// Add attributes to an existing option bundle.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Optional metadata accepted when inserting a named node.
#[derive(Debug, Clone, Default)]
pub struct NodeOptions {
    /// Node type tag; empty means untyped.
    pub node_type: Option<String>,
    /// Attribute slots; checked against the graph's node schema if one
    /// is declared.
    pub attributes: Option<Attributes>,
}

impl NodeOptions {
    pub fn with_type(node_type: impl Into<String>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            ..Self::default()
        }
    }

    pub fn with_attributes(attributes: Attributes) -> Self {
        Self {
            attributes: Some(attributes),
            ..Self::default()
        }
    }

    pub fn node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Search configuration.
///
/// Designed to be easily serializable and loadable from JSON or TOML
/// by whatever driver (CLI, streaming loop) sits in front of the core.
///
/// # Example
///
/// ```rust
/// use chronograph::SearchConfig;
///
/// let json = r#"{
///     "window_duration": 86400,
///     "delta": 3600,
///     "limit": 1000
/// }"#;
/// let config: SearchConfig = SearchConfig::from_json(json).unwrap();
/// assert_eq!(config.delta, 3600);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum age (seconds) of edges kept in the analysis window.
    /// 0 means unbounded.
    #[serde(default)]
    pub window_duration: Timestamp,

    /// Maximum time span (seconds) allowed between the first and last
    /// matched edge of one ordered occurrence.
    #[serde(default = "SearchConfig::default_delta")]
    pub delta: Timestamp,

    /// Maximum number of results to collect.
    #[serde(default = "SearchConfig::default_limit")]
    pub limit: usize,

    /// Optional fixed date range for the pre-search time filter.
    #[serde(default)]
    pub start_date: Option<Timestamp>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
}

impl SearchConfig {
    const fn default_delta() -> Timestamp {
        Timestamp::MAX
    }

    const fn default_limit() -> usize {
        usize::MAX
    }

    pub fn with_window_duration(mut self, duration: Timestamp) -> Self {
        self.window_duration = duration;
        self
    }

    pub fn with_delta(mut self, delta: Timestamp) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_date_range(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.window_duration < 0 {
            return Err(ChronographError::InvalidArgument(format!(
                "window duration must be >= 0, got {}",
                self.window_duration
            )));
        }
        if self.delta < 0 {
            return Err(ChronographError::InvalidArgument(format!(
                "delta must be >= 0, got {}",
                self.delta
            )));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(ChronographError::InvalidArgument(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(())
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: SearchConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a TOML string (requires the `toml` feature).
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: SearchConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as a TOML string (requires the `toml` feature).
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            window_duration: 0,
            delta: Self::default_delta(),
            limit: Self::default_limit(),
            start_date: None,
            end_date: None,
        }
    }
}
