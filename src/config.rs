//! Configuration for rolling windows and series operators.
//!
//! Both structs deserialize with serde and fall back to defaults for any
//! missing field, so partial JSON documents are accepted:
//!
//! ```rust
//! use timeseries::config::{OperatorConfig, RollingConfig};
//! use timeseries::operator::SetOperation;
//!
//! let rolling = RollingConfig::from_json(r#"{"window_size": 3, "weights": "linear", "min_weight": 0.1}"#).unwrap();
//! assert_eq!(rolling.window_size, 3);
//!
//! let operator = OperatorConfig::from_json(r#"{"operation": "union"}"#).unwrap();
//! assert_eq!(operator.operation, SetOperation::Union);
//! assert!(operator.elementwise);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::operator::SetOperation;

/// Parameters of a rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingConfig {
    /// Window size, validated against the series length when applied
    pub window_size: usize,
    /// Weight policy key: `even`, `linear` or `none`
    pub weights: String,
    /// Smallest weight for the `linear` policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_weight: Option<f64>,
}

impl Default for RollingConfig {
    fn default() -> Self {
        RollingConfig {
            window_size: 1,
            weights: "even".to_string(),
            min_weight: None,
        }
    }
}

impl RollingConfig {
    pub fn new(window_size: usize) -> Self {
        RollingConfig {
            window_size,
            ..Default::default()
        }
    }

    pub fn with_weights(mut self, weights: &str) -> Self {
        self.weights = weights.to_string();
        self
    }

    pub fn with_min_weight(mut self, min_weight: f64) -> Self {
        self.min_weight = Some(min_weight);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// How two operands are aligned and how the function result is returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Set operation applied to the dates of both series
    pub operation: SetOperation,
    /// Return a series (true) or the raw function value (false)
    pub elementwise: bool,
    /// Value used for dates missing from one operand
    pub fill: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        OperatorConfig {
            operation: SetOperation::Intersection,
            elementwise: true,
            fill: 0.0,
        }
    }
}

impl OperatorConfig {
    /// Union of dates, missing values filled with `fill`.
    pub fn union(fill: f64) -> Self {
        OperatorConfig {
            operation: SetOperation::Union,
            fill,
            ..Default::default()
        }
    }

    /// Intersection of dates, missing values filled with `fill`.
    pub fn intersection(fill: f64) -> Self {
        OperatorConfig {
            operation: SetOperation::Intersection,
            fill,
            ..Default::default()
        }
    }

    pub fn with_operation(mut self, operation: SetOperation) -> Self {
        self.operation = operation;
        self
    }

    pub fn with_fill(mut self, fill: f64) -> Self {
        self.fill = fill;
        self
    }

    /// Pass the function's return value through instead of building a series.
    pub fn aggregate(mut self) -> Self {
        self.elementwise = false;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
