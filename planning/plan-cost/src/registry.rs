//! Code-owned registry of cost feature classes.
//!
//! Features are looked up by class name when a feature set is built from
//! configuration. The registry is an ordinary value: hosts start from
//! [`FeatureRegistry::with_builtin`] and register their own features on top.
//!
//! # Example
//!
//! ```
//! use plan_cost::{CostFeature, FeatureRegistry};
//!
//! let registry = FeatureRegistry::with_builtin();
//! let feature = registry.create("ObstacleAvoidance").unwrap();
//! assert_eq!(feature.name(), "ObstacleAvoidance");
//! assert!(registry.create("Smoothness").is_err());
//! ```

use hashbrown::HashMap;
use plan_types::{PlanningError, Result};

use crate::feature::CostFeature;
use crate::obstacle::{FEATURE_NAME as OBSTACLE_AVOIDANCE, ObstacleAvoidanceFeature};

/// Constructor of an uninitialized feature.
pub type FeatureConstructor = fn() -> Box<dyn CostFeature>;

fn obstacle_avoidance() -> Box<dyn CostFeature> {
    Box::new(ObstacleAvoidanceFeature::new())
}

/// Maps class names to feature constructors.
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    constructors: HashMap<String, FeatureConstructor>,
}

impl FeatureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every feature shipped with this crate.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(OBSTACLE_AVOIDANCE, obstacle_avoidance);
        registry
    }

    /// Registers `constructor` under `class`, returning any constructor it replaces.
    pub fn register(
        &mut self,
        class: impl Into<String>,
        constructor: FeatureConstructor,
    ) -> Option<FeatureConstructor> {
        self.constructors.insert(class.into(), constructor)
    }

    /// Returns `true` if `class` is registered.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.constructors.contains_key(class)
    }

    /// Creates a new, uninitialized feature of class `class`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::UnknownFeature`] if nothing is registered
    /// under that name.
    pub fn create(&self, class: &str) -> Result<Box<dyn CostFeature>> {
        self.constructors
            .get(class)
            .map(|constructor| constructor())
            .ok_or_else(|| PlanningError::UnknownFeature(class.to_owned()))
    }

    /// Returns the registered class names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
