//! Core types for trajectory cost evaluation.
//!
//! This crate provides the data shared between a sampling-based trajectory
//! optimizer, its cost features, and the collision engine they query:
//!
//! - **States and trajectories**: [`RobotState`], [`Trajectory`]
//! - **Collision contract**: [`CollisionRequest`], [`CollisionResult`], [`Contact`]
//! - **Configuration**: [`FeatureParams`], [`FeatureSpec`], [`FeatureSetConfig`]
//! - **Errors**: [`PlanningError`]
//!
//! These types are pure data. Collision queries live in `plan-collision` and
//! cost features in `plan-cost`.
//!
//! # Example
//!
//! ```
//! use plan_types::{CollisionRequest, RobotState, Trajectory};
//!
//! let trajectory = Trajectory::new("manipulator", vec![RobotState::zeros(6); 10]);
//! let request = CollisionRequest::distance_and_contacts(trajectory.group_name());
//!
//! assert_eq!(trajectory.num_time_steps(), 10);
//! assert!(request.distance && request.contacts);
//! ```

#![doc(html_root_url = "https://docs.rs/plan-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn)]

mod collision;
mod error;
mod params;
mod state;
mod trajectory;

pub use collision::{CollisionRequest, CollisionResult, Contact, ContactMap};
pub use error::PlanningError;
pub use params::{FeatureParams, FeatureSetConfig, FeatureSpec, ParamValue};
pub use state::RobotState;
pub use trajectory::Trajectory;

// Re-export math types for convenience
pub use nalgebra::{DMatrix, DVector, Point3, Vector3};

/// Result type for cost feature operations.
pub type Result<T> = std::result::Result<T, PlanningError>;
