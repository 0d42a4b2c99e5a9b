//! Shared helpers for scripting collision outcomes per time step.
//!
//! Trajectories built by [`indexed_trajectory`] store the step index in joint
//! 0, so a scripted checker can look up the result for that step.

#![allow(dead_code, clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use std::sync::Arc;

use plan_collision::{ClosureChecker, PlanningScene, StaticScene};
use plan_types::{CollisionResult, FeatureParams, RobotState, Trajectory};

/// Creates a trajectory whose step `t` has joint positions `[t, 0, 0]`.
pub fn indexed_trajectory(group: &str, steps: usize) -> Trajectory {
    Trajectory::new(
        group,
        (0..steps)
            .map(|t| RobotState::from_slice(&[t as f64, 0.0, 0.0]))
            .collect(),
    )
}

fn lookup(script: &[CollisionResult], state: &RobotState) -> CollisionResult {
    state
        .position(0)
        .and_then(|q| script.get(q as usize))
        .cloned()
        .unwrap_or_default()
}

/// Creates a scene replaying `world[t]` and `self_check[t]` at step `t`.
pub fn scripted_scene(world: Vec<CollisionResult>, self_check: Vec<CollisionResult>) -> Arc<dyn PlanningScene> {
    let checker = ClosureChecker::from_fns(
        move |state| lookup(&world, state),
        move |state| lookup(&self_check, state),
    );
    Arc::new(StaticScene::industrial(checker))
}

/// Parameters with only a clearance.
pub fn clearance(value: f64) -> FeatureParams {
    FeatureParams::new().with("collision_clearance", value)
}
