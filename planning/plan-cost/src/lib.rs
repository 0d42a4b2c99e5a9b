//! Cost features for sampling-based trajectory optimization.
//!
//! An optimizer samples noisy candidate trajectories, asks a set of cost
//! features to score every time step, and moves towards low-cost candidates.
//! This crate provides the feature side of that loop.
//!
//! # Overview
//!
//! - **Feature capability** ([`CostFeature`]): the operations every cost term
//!   implements, producing a [`FeatureEvaluation`]
//! - **Obstacle avoidance** ([`ObstacleAvoidanceFeature`]): penalizes
//!   collisions and clearance violations, using [`PotentialEvaluator`]
//! - **Registry** ([`FeatureRegistry`]): maps configured class names to
//!   feature constructors
//! - **Feature sets** ([`FeatureSet`]): several features evaluated as one cost
//!   function, optionally over many rollouts in parallel
//!
//! # Cost Scale
//!
//! Obstacle avoidance values are normalized per evaluated segment. The
//! deepest penetration in the segment scores exactly 1 and every other step
//! is relative to it. Without any collision the values are distances into the
//! clearance band divided by the clearance.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use plan_collision::{ClosureChecker, StaticScene};
//! use plan_cost::{CostFeature, FeatureRegistry};
//! use plan_types::{CollisionResult, Contact, FeatureParams, RobotState, Trajectory};
//!
//! // Step 1 hits the table, every other step is clear.
//! let checker = ClosureChecker::from_fns(
//!     |state| match state.position(0) {
//!         Some(q) if q > 0.5 => CollisionResult::colliding([Contact::new("wrist", "table", 0.02)]),
//!         _ => CollisionResult::separated(0.2),
//!     },
//!     |_| CollisionResult::separated(0.2),
//! );
//! let scene = Arc::new(StaticScene::industrial(checker));
//!
//! let mut feature = FeatureRegistry::with_builtin().create("ObstacleAvoidance").unwrap();
//! let params = FeatureParams::new().with("collision_clearance", 0.01);
//! feature.initialize(&params, 1, "arm", scene).unwrap();
//!
//! let trajectory = Trajectory::new("arm", vec![
//!     RobotState::from_slice(&[0.0]),
//!     RobotState::from_slice(&[1.0]),
//!     RobotState::from_slice(&[0.0]),
//! ]);
//! let evaluation = feature.evaluate(&trajectory, 0, 0, 3).unwrap();
//!
//! assert_eq!(evaluation.validity, vec![1, 0, 1]);
//! assert!((evaluation.values[(1, 0)] - 1.0).abs() < 1e-9);
//! ```

#![doc(html_root_url = "https://docs.rs/plan-cost/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

pub mod feature;
pub mod feature_set;
pub mod obstacle;
pub mod potential;
pub mod registry;

// Re-export main types for convenience
pub use feature::{CostFeature, FeatureEvaluation};
pub use feature_set::FeatureSet;
pub use obstacle::{CLEARANCE_PARAM, DEFAULT_CLEARANCE, FEATURE_NAME, ObstacleAvoidanceFeature};
pub use potential::{PotentialEvaluator, StepPotential, proximity_potential};
pub use registry::{FeatureConstructor, FeatureRegistry};
