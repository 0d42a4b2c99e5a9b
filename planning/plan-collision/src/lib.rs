//! Planning scene contract and collision queries for trajectory cost features.
//!
//! This crate sits between cost features and an external collision engine:
//!
//! - **Scene contract** ([`PlanningScene`], [`CollisionChecker`]): the
//!   read-only world model and the two queries cost features rely on
//! - **Detector identity** ([`ActiveDetector`]): a tagged value checked when a
//!   feature binds to a scene
//! - **Query adapter** ([`CollisionQueryAdapter`]): one robot-vs-world and one
//!   robot-vs-self result per robot configuration
//! - **Allowed collisions** ([`AllowedCollisionMatrix`])
//! - **Closure backend** ([`ClosureChecker`], [`StaticScene`]): wraps host
//!   queries as closures
//!
//! # Thread Safety
//!
//! Scenes and checkers are shared by every optimizer worker. Both traits
//! require `Send + Sync`, and the engine behind them must tolerate concurrent
//! queries. All mutable state (requests, result buffers) is owned per call.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use plan_collision::{CollisionQueryAdapter, PlanningScene, StaticScene};
//!
//! let scene: Arc<dyn PlanningScene> = Arc::new(StaticScene::other("Bullet"));
//! let err = CollisionQueryAdapter::bind(scene).unwrap_err();
//! assert!(err.is_fatal());
//! ```

#![doc(html_root_url = "https://docs.rs/plan-collision/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

mod acm;
mod adapter;
mod closure;
mod scene;

pub use acm::AllowedCollisionMatrix;
pub use adapter::{CollisionQueryAdapter, StepResults};
pub use closure::{ClosureChecker, QueryFn, StaticScene};
pub use scene::{ActiveDetector, CollisionChecker, PlanningScene, REQUIRED_COLLISION_DETECTOR};
