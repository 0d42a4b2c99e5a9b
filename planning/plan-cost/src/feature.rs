//! The cost feature capability.
//!
//! Every cost term the optimizer can use implements [`CostFeature`]. Features
//! are created through a [`FeatureRegistry`](crate::FeatureRegistry),
//! initialized once from their parameters, bound to a planning scene, and then
//! evaluated concurrently by optimizer worker threads.

use std::sync::Arc;

use nalgebra::DMatrix;
use plan_collision::PlanningScene;
use plan_types::{FeatureParams, Result, Trajectory};

/// Output of one feature evaluation.
///
/// Rows are indexed by the trajectory's absolute time step. Only rows inside
/// the evaluated range are written; the rest stay zero and valid.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEvaluation {
    /// `num_time_steps x num_values` feature values.
    pub values: DMatrix<f64>,
    /// One flag per time step: 1 if the configuration is collision-free.
    pub validity: Vec<u8>,
}

impl FeatureEvaluation {
    /// Creates zeroed values and all-valid flags.
    #[must_use]
    pub fn new(num_time_steps: usize, num_values: usize) -> Self {
        Self {
            values: DMatrix::zeros(num_time_steps, num_values),
            validity: vec![1; num_time_steps],
        }
    }

    /// Returns the number of time steps.
    #[must_use]
    pub fn num_time_steps(&self) -> usize {
        self.validity.len()
    }

    /// Returns `true` if step `t` is collision-free.
    #[must_use]
    pub fn is_valid(&self, t: usize) -> bool {
        self.validity.get(t).is_some_and(|&v| v == 1)
    }

    /// Returns `true` if every step is collision-free.
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.validity.iter().all(|&v| v == 1)
    }

    /// Marks step `t` as colliding.
    pub fn invalidate(&mut self, t: usize) {
        if let Some(v) = self.validity.get_mut(t) {
            *v = 0;
        }
    }
}

/// A named cost term evaluated per trajectory time step.
///
/// `evaluate` takes `&self` and may be called from several threads at once
/// for different trajectories or step ranges; implementations keep all
/// mutable scratch state local to the call.
pub trait CostFeature: Send + Sync {
    /// Returns the feature's class name.
    fn name(&self) -> &str;

    /// Returns one name per output value.
    fn names(&self) -> Vec<String> {
        vec![self.name().to_owned()]
    }

    /// Returns the number of values produced per time step.
    fn num_values(&self) -> usize;

    /// Loads parameters and binds the planning scene.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if required parameters are missing or
    /// invalid, or the scene binding error.
    fn initialize(
        &mut self,
        params: &FeatureParams,
        num_threads: usize,
        group_name: &str,
        scene: Arc<dyn PlanningScene>,
    ) -> Result<()>;

    /// Binds (or rebinds) the planning scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene does not satisfy the feature's
    /// requirements. The feature must not be used after such an error.
    fn bind_planning_scene(&mut self, scene: Arc<dyn PlanningScene>) -> Result<()>;

    /// Evaluates `count` steps of `trajectory` starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if no scene is bound, the range exceeds the
    /// trajectory, or a collision query fails.
    fn evaluate(
        &self,
        trajectory: &Trajectory,
        thread_id: usize,
        start: usize,
        count: usize,
    ) -> Result<FeatureEvaluation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_evaluation() {
        let evaluation = FeatureEvaluation::new(4, 2);
        assert_eq!(evaluation.values.shape(), (4, 2));
        assert_eq!(evaluation.num_time_steps(), 4);
        assert!(evaluation.all_valid());
    }

    #[test]
    fn test_invalidate() {
        let mut evaluation = FeatureEvaluation::new(3, 1);
        evaluation.invalidate(1);
        evaluation.invalidate(1);
        evaluation.invalidate(7);
        assert_eq!(evaluation.validity, vec![1, 0, 1]);
        assert!(!evaluation.is_valid(1));
        assert!(!evaluation.is_valid(7));
        assert!(!evaluation.all_valid());
    }
}
