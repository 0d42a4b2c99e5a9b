//! Obstacle avoidance cost feature.
//!
//! Penalizes trajectory steps that collide with the world or with the robot
//! itself, or that come closer than a clearance distance. See
//! [`potential`](crate::potential) for the cost formula.
//!
//! # Parameters
//!
//! | Key | Type | Required | Notes |
//! |-----|------|----------|-------|
//! | `collision_clearance` | float | yes | `0` falls back to [`DEFAULT_CLEARANCE`] |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plan_collision::{ClosureChecker, StaticScene};
//! use plan_cost::{CostFeature, ObstacleAvoidanceFeature};
//! use plan_types::{CollisionResult, FeatureParams, RobotState, Trajectory};
//!
//! let checker = ClosureChecker::from_fns(
//!     |_| CollisionResult::separated(0.005),
//!     |_| CollisionResult::separated(0.5),
//! );
//! let scene = Arc::new(StaticScene::industrial(checker));
//!
//! let mut feature = ObstacleAvoidanceFeature::new();
//! let params = FeatureParams::new().with("collision_clearance", 0.01);
//! feature.initialize(&params, 1, "arm", scene).unwrap();
//!
//! let trajectory = Trajectory::new("arm", vec![RobotState::zeros(6)]);
//! let evaluation = feature.evaluate(&trajectory, 0, 0, 1).unwrap();
//!
//! // 0.005 below clearance, expressed in clearance units
//! assert!((evaluation.values[(0, 0)] - 0.5).abs() < 1e-9);
//! assert!(evaluation.all_valid());
//! ```

use std::sync::Arc;

use plan_collision::{CollisionQueryAdapter, PlanningScene, StepResults};
use plan_types::{CollisionRequest, FeatureParams, PlanningError, Result, Trajectory};
use tracing::{debug, error, warn};

use crate::feature::{CostFeature, FeatureEvaluation};
use crate::potential::PotentialEvaluator;

/// Class name of the feature.
pub const FEATURE_NAME: &str = "ObstacleAvoidance";

/// Clearance used when the configured value is zero.
pub const DEFAULT_CLEARANCE: f64 = 0.01;

/// Parameter key holding the clearance.
pub const CLEARANCE_PARAM: &str = "collision_clearance";

const NUM_FEATURE_VALUES: usize = 1;

/// Cost feature penalizing collisions and proximity to obstacles.
#[derive(Debug, Clone)]
pub struct ObstacleAvoidanceFeature {
    clearance: f64,
    group_name: String,
    num_threads: usize,
    request: CollisionRequest,
    adapter: Option<CollisionQueryAdapter>,
}

impl Default for ObstacleAvoidanceFeature {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleAvoidanceFeature {
    /// Creates an uninitialized feature with the default clearance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clearance: DEFAULT_CLEARANCE,
            group_name: String::new(),
            num_threads: 1,
            request: CollisionRequest::distance_and_contacts(""),
            adapter: None,
        }
    }

    /// Returns the effective clearance.
    #[must_use]
    pub const fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Returns the planning group given at initialization.
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Returns the number of optimizer threads announced at initialization.
    #[must_use]
    pub const fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Returns `true` once a planning scene has been bound.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.adapter.is_some()
    }

    /// Returns the request template used for every query.
    #[must_use]
    pub const fn request_template(&self) -> &CollisionRequest {
        &self.request
    }

    fn load_parameters(&mut self, params: &FeatureParams) -> Result<()> {
        self.request = CollisionRequest::distance_and_contacts(self.group_name.as_str());

        let Some(value) = params.get(CLEARANCE_PARAM) else {
            error!(feature = FEATURE_NAME, "{} feature failed to load parameters", FEATURE_NAME);
            return Err(PlanningError::missing_parameter(FEATURE_NAME, CLEARANCE_PARAM));
        };
        let clearance = value
            .as_f64()
            .ok_or_else(|| PlanningError::invalid_parameter(CLEARANCE_PARAM, "expected a number"))?;

        if !clearance.is_finite() || clearance < 0.0 {
            return Err(PlanningError::invalid_parameter(
                CLEARANCE_PARAM,
                format!("{clearance} is not a positive distance"),
            ));
        }

        if clearance == 0.0 {
            warn!("Clearance can not be 0, using default {}", DEFAULT_CLEARANCE);
            self.clearance = DEFAULT_CLEARANCE;
        } else {
            self.clearance = clearance;
        }

        Ok(())
    }
}

impl CostFeature for ObstacleAvoidanceFeature {
    fn name(&self) -> &str {
        FEATURE_NAME
    }

    fn num_values(&self) -> usize {
        NUM_FEATURE_VALUES
    }

    fn initialize(
        &mut self,
        params: &FeatureParams,
        num_threads: usize,
        group_name: &str,
        scene: Arc<dyn PlanningScene>,
    ) -> Result<()> {
        self.group_name = group_name.to_owned();
        self.num_threads = num_threads;
        self.load_parameters(params)?;
        self.bind_planning_scene(scene)?;

        debug!(
            clearance = self.clearance,
            group = %self.group_name,
            num_threads,
            "Obstacle Avoidance feature initialized"
        );
        Ok(())
    }

    fn bind_planning_scene(&mut self, scene: Arc<dyn PlanningScene>) -> Result<()> {
        // A failed rebind leaves the feature unbound.
        self.adapter = None;
        self.adapter = Some(CollisionQueryAdapter::bind(scene)?);
        Ok(())
    }

    fn evaluate(
        &self,
        trajectory: &Trajectory,
        thread_id: usize,
        start: usize,
        count: usize,
    ) -> Result<FeatureEvaluation> {
        let adapter = self.adapter.as_ref().ok_or_else(|| PlanningError::SceneNotBound {
            feature: FEATURE_NAME.to_owned(),
        })?;
        let range = trajectory.step_range(start, count)?;

        let mut evaluation = FeatureEvaluation::new(trajectory.num_time_steps(), NUM_FEATURE_VALUES);
        let request = self.request.for_group(trajectory.group_name());
        let mut results = StepResults::default();
        let mut evaluator = PotentialEvaluator::new(self.clearance);

        let states = &trajectory.states()[range.clone()];
        for (t, state) in range.zip(states) {
            adapter.check_state(&request, state, &mut results)?;

            let step = evaluator.step_potential(&results);
            evaluation.values[(t, 0)] += step.value;
            if step.collision {
                evaluation.invalidate(t);
            }
        }

        evaluator.normalize(&mut evaluation.values);

        debug!(
            thread_id,
            start,
            count,
            max_depth = evaluator.max_depth(),
            colliding_steps = evaluation.validity.iter().filter(|&&v| v == 0).count(),
            "Evaluated obstacle avoidance"
        );

        Ok(evaluation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plan_collision::{ClosureChecker, StaticScene};
    use plan_types::{CollisionResult, Contact, RobotState};

    fn free_scene() -> Arc<dyn PlanningScene> {
        Arc::new(StaticScene::industrial(ClosureChecker::from_fns(
            |_| CollisionResult::separated(1.0),
            |_| CollisionResult::separated(1.0),
        )))
    }

    fn clearance(value: f64) -> FeatureParams {
        FeatureParams::new().with(CLEARANCE_PARAM, value)
    }

    #[test]
    fn test_name_and_values() {
        let feature = ObstacleAvoidanceFeature::new();
        assert_eq!(feature.name(), "ObstacleAvoidance");
        assert_eq!(feature.names(), vec!["ObstacleAvoidance".to_owned()]);
        assert_eq!(feature.num_values(), 1);
    }

    #[test]
    fn test_initialize_sets_request() {
        let mut feature = ObstacleAvoidanceFeature::new();
        feature.initialize(&clearance(0.02), 4, "arm", free_scene()).unwrap();

        assert_eq!(feature.clearance(), 0.02);
        assert_eq!(feature.group_name(), "arm");
        assert_eq!(feature.num_threads(), 4);
        assert!(feature.is_bound());

        let request = feature.request_template();
        assert_eq!(request.group_name, "arm");
        assert!(request.distance && request.contacts && !request.cost && !request.verbose);
        assert_eq!((request.max_contacts, request.max_contacts_per_pair), (1, 1));
    }

    #[test]
    fn test_zero_clearance_uses_default() {
        let mut feature = ObstacleAvoidanceFeature::new();
        feature.initialize(&clearance(0.0), 1, "arm", free_scene()).unwrap();
        assert_eq!(feature.clearance(), DEFAULT_CLEARANCE);
    }

    #[test]
    fn test_integer_zero_clearance_uses_default() {
        let mut feature = ObstacleAvoidanceFeature::new();
        let params = FeatureParams::new().with(CLEARANCE_PARAM, 0_i64);
        feature.initialize(&params, 1, "arm", free_scene()).unwrap();
        assert_eq!(feature.clearance(), DEFAULT_CLEARANCE);
    }

    #[test]
    fn test_missing_clearance_fails_without_binding() {
        let mut feature = ObstacleAvoidanceFeature::new();
        let err = feature
            .initialize(&FeatureParams::new(), 1, "arm", free_scene())
            .unwrap_err();
        assert_eq!(
            err,
            PlanningError::missing_parameter("ObstacleAvoidance", "collision_clearance")
        );
        assert!(!feature.is_bound());
    }

    #[test]
    fn test_invalid_clearance() {
        for params in [
            clearance(-0.1),
            clearance(f64::NAN),
            FeatureParams::new().with(CLEARANCE_PARAM, "wide"),
        ] {
            let mut feature = ObstacleAvoidanceFeature::new();
            let err = feature.initialize(&params, 1, "arm", free_scene()).unwrap_err();
            assert!(matches!(err, PlanningError::InvalidParameter { .. }));
            assert!(!feature.is_bound());
        }
    }

    #[test]
    fn test_wrong_detector_on_rebind() {
        let mut feature = ObstacleAvoidanceFeature::new();
        feature.initialize(&clearance(0.01), 1, "arm", free_scene()).unwrap();

        let err = feature
            .bind_planning_scene(Arc::new(StaticScene::other("Bullet")))
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("IndustrialFCL"));
        assert!(!feature.is_bound());
    }

    #[test]
    fn test_evaluate_unbound() {
        let feature = ObstacleAvoidanceFeature::new();
        let trajectory = Trajectory::new("arm", vec![RobotState::zeros(1)]);
        let err = feature.evaluate(&trajectory, 0, 0, 1).unwrap_err();
        assert!(matches!(err, PlanningError::SceneNotBound { .. }));
    }

    #[test]
    fn test_evaluate_range_out_of_bounds() {
        let mut feature = ObstacleAvoidanceFeature::new();
        feature.initialize(&clearance(0.01), 1, "arm", free_scene()).unwrap();
        let trajectory = Trajectory::new("arm", vec![RobotState::zeros(1); 3]);
        let err = feature.evaluate(&trajectory, 0, 2, 2).unwrap_err();
        assert!(matches!(err, PlanningError::StepRangeOutOfBounds { len: 3, .. }));
    }

    #[test]
    fn test_uses_trajectory_group() {
        let checker = ClosureChecker::new(
            |request, result, _, _| {
                result.distance = if request.group_name == "left_arm" { 0.002 } else { 1.0 };
                Ok(())
            },
            |_, _, _, _| Ok(()),
        );
        let mut feature = ObstacleAvoidanceFeature::new();
        feature
            .initialize(&clearance(0.01), 1, "right_arm", Arc::new(StaticScene::industrial(checker)))
            .unwrap();

        let trajectory = Trajectory::new("left_arm", vec![RobotState::zeros(1)]);
        let evaluation = feature.evaluate(&trajectory, 0, 0, 1).unwrap();
        assert_relative_eq!(evaluation.values[(0, 0)], 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_rows_outside_range_untouched() {
        let checker = ClosureChecker::from_fns(
            |_| CollisionResult::colliding([Contact::new("link_2", "wall", 0.04)]),
            |_| CollisionResult::default(),
        );
        let mut feature = ObstacleAvoidanceFeature::new();
        feature
            .initialize(&clearance(0.01), 1, "arm", Arc::new(StaticScene::industrial(checker)))
            .unwrap();

        let trajectory = Trajectory::new("arm", vec![RobotState::zeros(1); 4]);
        let evaluation = feature.evaluate(&trajectory, 0, 1, 2).unwrap();

        assert_eq!(evaluation.validity, vec![1, 0, 0, 1]);
        assert_eq!(evaluation.values[(0, 0)], 0.0);
        assert_relative_eq!(evaluation.values[(1, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(evaluation.values[(2, 0)], 1.0, epsilon = 1e-12);
        assert_eq!(evaluation.values[(3, 0)], 0.0);
    }
}
