//! Ordered collections of cost features.
//!
//! A [`FeatureSet`] is the full cost function handed to the optimizer: the
//! values of its features sit side by side in one matrix, and a step is valid
//! only if every feature considers it valid.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plan_collision::{ClosureChecker, StaticScene};
//! use plan_cost::{FeatureRegistry, FeatureSet};
//! use plan_types::{CollisionResult, FeatureSetConfig, RobotState, Trajectory};
//!
//! let config = FeatureSetConfig::from_json_str(
//!     r#"{ "features": [ { "class": "ObstacleAvoidance", "collision_clearance": 0.01 } ] }"#,
//! ).unwrap();
//! let scene = Arc::new(StaticScene::industrial(ClosureChecker::from_fns(
//!     |_| CollisionResult::separated(1.0),
//!     |_| CollisionResult::separated(1.0),
//! )));
//!
//! let set = FeatureSet::from_config(&FeatureRegistry::with_builtin(), &config, 4, "arm", scene).unwrap();
//! assert_eq!(set.names(), vec!["ObstacleAvoidance".to_owned()]);
//!
//! let rollouts = vec![Trajectory::new("arm", vec![RobotState::zeros(6); 5]); 4];
//! let evaluations = set.evaluate_rollouts(&rollouts, 0, 5);
//! assert!(evaluations.iter().all(|e| e.as_ref().is_ok_and(|e| e.all_valid())));
//! ```

use std::fmt;
use std::sync::Arc;

use plan_collision::PlanningScene;
use plan_types::{FeatureSetConfig, FeatureSpec, Result, Trajectory};
use rayon::prelude::*;
use tracing::debug;

use crate::feature::{CostFeature, FeatureEvaluation};
use crate::registry::FeatureRegistry;

/// Features evaluated together as one cost function.
#[derive(Default)]
pub struct FeatureSet {
    features: Vec<Box<dyn CostFeature>>,
}

impl FeatureSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and initializes every feature listed in `specs`.
    ///
    /// # Errors
    ///
    /// Returns the first unknown class or initialization error.
    pub fn from_specs(
        registry: &FeatureRegistry,
        specs: &[FeatureSpec],
        num_threads: usize,
        group_name: &str,
        scene: Arc<dyn PlanningScene>,
    ) -> Result<Self> {
        let mut set = Self::new();
        for spec in specs {
            let mut feature = registry.create(&spec.class)?;
            feature.initialize(&spec.params, num_threads, group_name, Arc::clone(&scene))?;
            set.add_feature(feature);
        }

        debug!(
            "Using {} feature classes with {} values",
            set.len(),
            set.num_values()
        );
        for (i, name) in set.names().iter().enumerate() {
            debug!("{:2}) {}", i, name);
        }

        Ok(set)
    }

    /// Creates and initializes the features of a parsed configuration.
    ///
    /// # Errors
    ///
    /// See [`from_specs`](Self::from_specs).
    pub fn from_config(
        registry: &FeatureRegistry,
        config: &FeatureSetConfig,
        num_threads: usize,
        group_name: &str,
        scene: Arc<dyn PlanningScene>,
    ) -> Result<Self> {
        Self::from_specs(registry, &config.features, num_threads, group_name, scene)
    }

    /// Appends an already initialized feature.
    pub fn add_feature(&mut self, feature: Box<dyn CostFeature>) {
        self.features.push(feature);
    }

    /// Returns the number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the set holds no feature.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Returns the total number of values per time step.
    #[must_use]
    pub fn num_values(&self) -> usize {
        self.features.iter().map(|f| f.num_values()).sum()
    }

    /// Returns the value names of every feature, in column order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.features.iter().flat_map(|f| f.names()).collect()
    }

    /// Rebinds every feature to `scene`.
    ///
    /// # Errors
    ///
    /// Returns the first binding error.
    pub fn bind_planning_scene(&mut self, scene: &Arc<dyn PlanningScene>) -> Result<()> {
        for feature in &mut self.features {
            feature.bind_planning_scene(Arc::clone(scene))?;
        }
        Ok(())
    }

    /// Evaluates every feature on the same step range.
    ///
    /// # Errors
    ///
    /// Returns the first feature error, or a range error even when the set
    /// is empty.
    pub fn evaluate(
        &self,
        trajectory: &Trajectory,
        thread_id: usize,
        start: usize,
        count: usize,
    ) -> Result<FeatureEvaluation> {
        trajectory.step_range(start, count)?;

        let num_time_steps = trajectory.num_time_steps();
        let mut combined = FeatureEvaluation::new(num_time_steps, self.num_values());
        let mut column = 0;

        for feature in &self.features {
            let evaluation = feature.evaluate(trajectory, thread_id, start, count)?;
            let width = evaluation.values.ncols();
            combined
                .values
                .columns_mut(column, width)
                .copy_from(&evaluation.values);
            column += width;

            for (flag, &valid) in combined.validity.iter_mut().zip(&evaluation.validity) {
                *flag = (*flag).min(valid);
            }
        }

        Ok(combined)
    }

    /// Evaluates independent rollouts in parallel.
    ///
    /// Each rollout is evaluated with its index as `thread_id`. Results are
    /// returned in rollout order.
    #[must_use]
    pub fn evaluate_rollouts(
        &self,
        trajectories: &[Trajectory],
        start: usize,
        count: usize,
    ) -> Vec<Result<FeatureEvaluation>> {
        trajectories
            .par_iter()
            .enumerate()
            .map(|(thread_id, trajectory)| self.evaluate(trajectory, thread_id, start, count))
            .collect()
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSet")
            .field("features", &self.names())
            .finish()
    }
}
