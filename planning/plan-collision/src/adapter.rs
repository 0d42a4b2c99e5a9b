//! Paired world and self collision queries for one robot configuration.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plan_collision::{ClosureChecker, CollisionQueryAdapter, StaticScene, StepResults};
//! use plan_types::{CollisionRequest, CollisionResult, RobotState};
//!
//! let checker = ClosureChecker::from_fns(
//!     |_| CollisionResult::separated(0.3),
//!     |_| CollisionResult::separated(0.1),
//! );
//! let scene = Arc::new(StaticScene::industrial(checker));
//! let adapter = CollisionQueryAdapter::bind(scene).unwrap();
//!
//! let request = CollisionRequest::distance_and_contacts("arm");
//! let mut results = StepResults::default();
//! adapter.check_state(&request, &RobotState::zeros(2), &mut results).unwrap();
//!
//! assert_eq!(results.world.distance, 0.3);
//! assert_eq!(results.self_collision.distance, 0.1);
//! ```

use std::fmt;
use std::sync::Arc;

use plan_types::{CollisionRequest, CollisionResult, PlanningError, Result, RobotState};
use tracing::{debug, error};

use crate::scene::{ActiveDetector, CollisionChecker, PlanningScene, REQUIRED_COLLISION_DETECTOR};

/// Result buffers for the two checks made at one time step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResults {
    /// Robot against world geometry and attached objects.
    pub world: CollisionResult,
    /// Robot against itself.
    pub self_collision: CollisionResult,
}

impl StepResults {
    /// Returns both results, world first.
    #[must_use]
    pub const fn pair(&self) -> [&CollisionResult; 2] {
        [&self.world, &self.self_collision]
    }

    /// Returns `true` if either check found a collision.
    #[must_use]
    pub const fn any_collision(&self) -> bool {
        self.world.collision || self.self_collision.collision
    }
}

/// Issues robot-vs-world and robot-vs-self queries against a fixed scene.
///
/// Binding validates that the scene runs [`REQUIRED_COLLISION_DETECTOR`].
/// The adapter itself is immutable and can be shared between threads; every
/// caller supplies its own [`StepResults`] buffers.
#[derive(Clone)]
pub struct CollisionQueryAdapter {
    scene: Arc<dyn PlanningScene>,
    checker: Arc<dyn CollisionChecker>,
}

impl CollisionQueryAdapter {
    /// Binds to `scene`, extracting its collision checker.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::WrongCollisionDetector`] if the scene's active
    /// detector is not the required one.
    pub fn bind(scene: Arc<dyn PlanningScene>) -> Result<Self> {
        match scene.active_collision_detector() {
            ActiveDetector::IndustrialFcl(checker) => Ok(Self { scene, checker }),
            ActiveDetector::Other(active) => {
                error!(
                    required = REQUIRED_COLLISION_DETECTOR,
                    active = %active,
                    "Planning scene uses an unsupported collision detector"
                );
                Err(PlanningError::wrong_collision_detector(
                    REQUIRED_COLLISION_DETECTOR,
                    active,
                ))
            }
        }
    }

    /// Returns the bound scene.
    #[must_use]
    pub fn scene(&self) -> &Arc<dyn PlanningScene> {
        &self.scene
    }

    /// Runs both checks for `state`, overwriting `results`.
    ///
    /// The world distance is reset to [`CollisionResult::FAR`] first so an
    /// engine that reports nothing is read as "far away", not "touching".
    ///
    /// # Errors
    ///
    /// Propagates any collision engine failure.
    pub fn check_state(
        &self,
        request: &CollisionRequest,
        state: &RobotState,
        results: &mut StepResults,
    ) -> Result<()> {
        let acm = self.scene.allowed_collision_matrix();

        results.world.clear();
        results.world.distance = CollisionResult::FAR;
        self.checker
            .check_robot_collision(request, &mut results.world, state, acm)?;

        results.self_collision.clear();
        self.checker
            .check_self_collision(request, &mut results.self_collision, state, acm)?;

        if request.verbose {
            debug!(
                group = %request.group_name,
                world_collision = results.world.collision,
                world_distance = results.world.distance,
                self_collision = results.self_collision.collision,
                self_distance = results.self_collision.distance,
                "Collision check"
            );
        }

        Ok(())
    }
}

impl fmt::Debug for CollisionQueryAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionQueryAdapter")
            .field("detector", &REQUIRED_COLLISION_DETECTOR)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::acm::AllowedCollisionMatrix;
    use crate::closure::{ClosureChecker, StaticScene};
    use plan_types::Contact;

    #[test]
    fn test_bind_wrong_detector() {
        let scene: Arc<dyn PlanningScene> = Arc::new(StaticScene::other("FCL"));
        let err = CollisionQueryAdapter::bind(scene).unwrap_err();
        assert_eq!(
            err,
            PlanningError::wrong_collision_detector("IndustrialFCL", "FCL")
        );
    }

    #[test]
    fn test_world_distance_sentinel() {
        // Engine that never touches the result buffer.
        let checker = ClosureChecker::new(|_, _, _, _| Ok(()), |_, _, _, _| Ok(()));
        let adapter = CollisionQueryAdapter::bind(Arc::new(StaticScene::industrial(checker))).unwrap();

        let mut results = StepResults::default();
        results.world.distance = 0.0;
        results.self_collision.add_contact(Contact::new("a", "b", 0.1));

        adapter
            .check_state(&CollisionRequest::default(), &RobotState::zeros(1), &mut results)
            .unwrap();

        assert_eq!(results.world.distance, CollisionResult::FAR);
        assert!(!results.any_collision());
    }

    #[test]
    fn test_request_and_acm_forwarded() {
        let checker = ClosureChecker::new(
            |request, result, _, acm| {
                assert_eq!(request.group_name, "arm");
                assert!(acm.is_allowed("gripper", "part"));
                result.distance = 0.5;
                Ok(())
            },
            |_, result, _, _| {
                result.add_contact(Contact::new("link_1", "link_3", -0.01));
                Ok(())
            },
        );
        let scene = StaticScene::industrial(checker)
            .with_acm(AllowedCollisionMatrix::new().with_allowed("gripper", "part"));
        let adapter = CollisionQueryAdapter::bind(Arc::new(scene)).unwrap();

        let mut results = StepResults::default();
        adapter
            .check_state(
                &CollisionRequest::distance_and_contacts("arm"),
                &RobotState::zeros(3),
                &mut results,
            )
            .unwrap();

        assert_eq!(results.world.distance, 0.5);
        assert!(results.self_collision.collision);
        assert!(results.any_collision());
        assert_eq!(results.pair()[1].contact_count, 1);
    }

    #[test]
    fn test_engine_error_propagates() {
        let checker = ClosureChecker::new(
            |_, _, _, _| Err(PlanningError::collision_query("broad phase not built")),
            |_, _, _, _| Ok(()),
        );
        let adapter = CollisionQueryAdapter::bind(Arc::new(StaticScene::industrial(checker))).unwrap();

        let err = adapter
            .check_state(
                &CollisionRequest::default(),
                &RobotState::zeros(1),
                &mut StepResults::default(),
            )
            .unwrap_err();
        assert!(err.is_fatal());
    }
}
