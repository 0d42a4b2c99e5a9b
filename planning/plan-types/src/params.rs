//! Feature parameters and feature set configuration.
//!
//! Cost features are configured from a loosely typed mapping, one per
//! feature, usually written by hand in a JSON file next to the planner
//! configuration:
//!
//! ```json
//! {
//!   "features": [
//!     { "class": "ObstacleAvoidance", "collision_clearance": 0.02 }
//!   ]
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use plan_types::FeatureSetConfig;
//!
//! let config = FeatureSetConfig::from_json_str(
//!     r#"{ "features": [ { "class": "ObstacleAvoidance", "collision_clearance": 0.02 } ] }"#,
//! ).unwrap();
//!
//! let spec = &config.features[0];
//! assert_eq!(spec.class, "ObstacleAvoidance");
//! assert_eq!(spec.params.get_f64("collision_clearance"), Some(0.02));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PlanningError;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Free-form text.
    Text(String),
}

impl ParamValue {
    /// Returns the value as a float, converting integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    /// Returns the value as text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// Named parameters for one cost feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureParams {
    values: BTreeMap<String, ParamValue>,
}

impl FeatureParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Returns the value for `key` as a float.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ParamValue::as_f64)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One entry of a feature set: the feature class and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Registered class name of the feature.
    pub class: String,
    /// Remaining keys of the entry.
    #[serde(flatten)]
    pub params: FeatureParams,
}

impl FeatureSpec {
    /// Creates a spec for `class` with the given parameters.
    #[must_use]
    pub fn new(class: impl Into<String>, params: FeatureParams) -> Self {
        Self {
            class: class.into(),
            params,
        }
    }
}

/// Ordered list of features making up a cost function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSetConfig {
    /// Features in evaluation order.
    pub features: Vec<FeatureSpec>,
}

impl FeatureSetConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Config`] if the text is not valid JSON or an
    /// entry lacks a `class` string.
    pub fn from_json_str(json: &str) -> Result<Self, PlanningError> {
        serde_json::from_str(json).map_err(|e| PlanningError::Config(e.to_string()))
    }

    /// Serializes the configuration to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Config`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, PlanningError> {
        serde_json::to_string_pretty(self).map_err(|e| PlanningError::Config(e.to_string()))
    }
}
