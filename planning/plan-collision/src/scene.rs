//! Planning scene and collision engine contract.
//!
//! The planning scene is a read-only snapshot of robot and world geometry
//! shared by every evaluation call. Cost features never mutate it. The scene
//! reports which collision detector backs it through [`ActiveDetector`], a
//! tagged value that features match on when they bind to the scene.

use std::fmt;
use std::sync::Arc;

use plan_types::{CollisionRequest, CollisionResult, Result, RobotState};

use crate::acm::AllowedCollisionMatrix;

/// Name of the collision detector cost features require.
pub const REQUIRED_COLLISION_DETECTOR: &str = "IndustrialFCL";

/// Distance and contact queries against robot and world geometry.
///
/// Implementations are shared across optimizer worker threads, so every
/// query must be safe to run concurrently. Both methods write into a result
/// buffer owned by the caller; a query that finds nothing to report may leave
/// fields untouched.
pub trait CollisionChecker: Send + Sync {
    /// Checks the robot, including attached objects, against the world
    /// geometry known to the scene.
    ///
    /// # Errors
    ///
    /// Returns [`plan_types::PlanningError::CollisionQuery`] if the engine
    /// cannot answer.
    fn check_robot_collision(
        &self,
        request: &CollisionRequest,
        result: &mut CollisionResult,
        state: &RobotState,
        acm: &AllowedCollisionMatrix,
    ) -> Result<()>;

    /// Checks the robot against itself.
    ///
    /// # Errors
    ///
    /// Returns [`plan_types::PlanningError::CollisionQuery`] if the engine
    /// cannot answer.
    fn check_self_collision(
        &self,
        request: &CollisionRequest,
        result: &mut CollisionResult,
        state: &RobotState,
        acm: &AllowedCollisionMatrix,
    ) -> Result<()>;
}

/// The collision detector bound to a planning scene.
#[derive(Clone)]
pub enum ActiveDetector {
    /// The distance-capable detector cost features are written against.
    IndustrialFcl(Arc<dyn CollisionChecker>),
    /// Any other detector, identified by name only.
    Other(String),
}

impl ActiveDetector {
    /// Returns the detector name as reported to users.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::IndustrialFcl(_) => REQUIRED_COLLISION_DETECTOR,
            Self::Other(name) => name,
        }
    }
}

impl fmt::Debug for ActiveDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndustrialFcl(_) => f.write_str("IndustrialFcl(<checker>)"),
            Self::Other(name) => f.debug_tuple("Other").field(name).finish(),
        }
    }
}

/// Read-only geometric world model shared across evaluation calls.
pub trait PlanningScene: Send + Sync {
    /// Returns the collision detector currently active in the scene.
    fn active_collision_detector(&self) -> ActiveDetector;

    /// Returns the pairs whose contacts are ignored.
    fn allowed_collision_matrix(&self) -> &AllowedCollisionMatrix;
}
