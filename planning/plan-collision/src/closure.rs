//! Closure-backed collision checker and a static planning scene.
//!
//! Hosts that already own a collision engine wrap its two query entry points
//! in a [`ClosureChecker`] and hand cost features a [`StaticScene`]. The same
//! pair is what the tests use to script collision outcomes per state.

use std::fmt;
use std::sync::Arc;

use plan_types::{CollisionRequest, CollisionResult, Result, RobotState};

use crate::acm::AllowedCollisionMatrix;
use crate::scene::{ActiveDetector, CollisionChecker, PlanningScene};

/// Signature of one collision query.
pub type QueryFn = dyn Fn(&CollisionRequest, &mut CollisionResult, &RobotState, &AllowedCollisionMatrix) -> Result<()>
    + Send
    + Sync;

/// A [`CollisionChecker`] whose queries are plain closures.
#[derive(Clone)]
pub struct ClosureChecker {
    world: Arc<QueryFn>,
    self_check: Arc<QueryFn>,
}

impl ClosureChecker {
    /// Creates a checker from full query closures.
    #[must_use]
    pub fn new<W, S>(world: W, self_check: S) -> Self
    where
        W: Fn(&CollisionRequest, &mut CollisionResult, &RobotState, &AllowedCollisionMatrix) -> Result<()>
            + Send
            + Sync
            + 'static,
        S: Fn(&CollisionRequest, &mut CollisionResult, &RobotState, &AllowedCollisionMatrix) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            world: Arc::new(world),
            self_check: Arc::new(self_check),
        }
    }

    /// Creates a checker whose results depend only on the robot state.
    #[must_use]
    pub fn from_fns<W, S>(world: W, self_check: S) -> Self
    where
        W: Fn(&RobotState) -> CollisionResult + Send + Sync + 'static,
        S: Fn(&RobotState) -> CollisionResult + Send + Sync + 'static,
    {
        Self::new(
            move |_, result, state, _| {
                *result = world(state);
                Ok(())
            },
            move |_, result, state, _| {
                *result = self_check(state);
                Ok(())
            },
        )
    }
}

impl CollisionChecker for ClosureChecker {
    fn check_robot_collision(
        &self,
        request: &CollisionRequest,
        result: &mut CollisionResult,
        state: &RobotState,
        acm: &AllowedCollisionMatrix,
    ) -> Result<()> {
        (self.world)(request, result, state, acm)
    }

    fn check_self_collision(
        &self,
        request: &CollisionRequest,
        result: &mut CollisionResult,
        state: &RobotState,
        acm: &AllowedCollisionMatrix,
    ) -> Result<()> {
        (self.self_check)(request, result, state, acm)
    }
}

impl fmt::Debug for ClosureChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClosureChecker(<fn>, <fn>)")
    }
}

/// A planning scene that never changes after construction.
#[derive(Debug, Clone)]
pub struct StaticScene {
    detector: ActiveDetector,
    acm: AllowedCollisionMatrix,
}

impl StaticScene {
    /// Creates a scene backed by the required detector.
    #[must_use]
    pub fn industrial(checker: impl CollisionChecker + 'static) -> Self {
        Self {
            detector: ActiveDetector::IndustrialFcl(Arc::new(checker)),
            acm: AllowedCollisionMatrix::new(),
        }
    }

    /// Creates a scene reporting some other detector.
    #[must_use]
    pub fn other(detector_name: impl Into<String>) -> Self {
        Self {
            detector: ActiveDetector::Other(detector_name.into()),
            acm: AllowedCollisionMatrix::new(),
        }
    }

    /// Sets the allowed-collision matrix.
    #[must_use]
    pub fn with_acm(mut self, acm: AllowedCollisionMatrix) -> Self {
        self.acm = acm;
        self
    }
}

impl PlanningScene for StaticScene {
    fn active_collision_detector(&self) -> ActiveDetector {
        self.detector.clone()
    }

    fn allowed_collision_matrix(&self) -> &AllowedCollisionMatrix {
        &self.acm
    }
}
