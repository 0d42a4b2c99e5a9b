//! Mapping from collision results to obstacle potentials.
//!
//! Each time step contributes the sum of two potentials, one for the
//! robot-vs-world check and one for the robot-vs-self check:
//!
//! ```text
//! colliding:                 p = |depth| + clearance
//! 0 < distance < clearance:  p = clearance - distance
//! otherwise:                 p = 0
//! ```
//!
//! `depth` is the last contact depth seen while scanning the result. The
//! largest depth over every contact of every result in the evaluated segment
//! is tracked, and once the segment is complete all values are divided by
//! `max_depth + clearance`. The deepest penetration of the segment therefore
//! maps to 1. A segment without any collision is divided by `clearance`
//! alone, which expresses its costs in clearance units.
//!
//! # Example
//!
//! ```
//! use plan_cost::PotentialEvaluator;
//! use plan_types::{CollisionResult, Contact};
//!
//! let mut evaluator = PotentialEvaluator::new(0.01);
//!
//! let near = evaluator.result_potential(&CollisionResult::separated(0.004));
//! assert!((near - 0.006).abs() < 1e-12);
//!
//! let hit = evaluator.result_potential(&CollisionResult::colliding([
//!     Contact::new("link_5", "shelf", -0.02),
//! ]));
//! assert!((hit - 0.03).abs() < 1e-12);
//! assert!((evaluator.max_depth() - 0.02).abs() < 1e-12);
//! ```

use nalgebra::DMatrix;
use plan_collision::StepResults;
use plan_types::CollisionResult;

/// Potential of a collision-free result at `distance` from contact.
///
/// Linear in the distance inside the clearance band, zero at and beyond the
/// band edge. Non-positive distances carry no proximity signal.
#[must_use]
pub fn proximity_potential(distance: f64, clearance: f64) -> f64 {
    if distance > 0.0 && distance < clearance {
        clearance - distance
    } else {
        0.0
    }
}

/// Potential of one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPotential {
    /// Sum of the world and self potentials.
    pub value: f64,
    /// Whether either check collided.
    pub collision: bool,
}

/// Folds collision results into potentials for one evaluated segment.
///
/// A fresh evaluator is created for every evaluation call; it carries the
/// segment-wide maximum penetration depth until [`normalize`](Self::normalize).
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialEvaluator {
    clearance: f64,
    max_depth: f64,
}

impl PotentialEvaluator {
    /// Creates an evaluator for the given clearance.
    #[must_use]
    pub const fn new(clearance: f64) -> Self {
        Self {
            clearance,
            max_depth: 0.0,
        }
    }

    /// Returns the clearance.
    #[must_use]
    pub const fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Returns the largest penetration depth seen so far.
    #[must_use]
    pub const fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Returns the potential of a single result, recording its contacts.
    pub fn result_potential(&mut self, result: &CollisionResult) -> f64 {
        if !result.collision {
            return proximity_potential(result.distance, self.clearance);
        }

        let mut depth = 0.0;
        for contact in result.iter_contacts() {
            depth = contact.penetration();
            self.max_depth = self.max_depth.max(depth);
        }
        depth + self.clearance
    }

    /// Returns the summed potential of the world and self results.
    pub fn step_potential(&mut self, results: &StepResults) -> StepPotential {
        let value = self.result_potential(&results.world) + self.result_potential(&results.self_collision);
        StepPotential {
            value,
            collision: results.any_collision(),
        }
    }

    /// Returns the divisor applied by [`normalize`](Self::normalize).
    #[must_use]
    pub fn normalization_divisor(&self) -> f64 {
        self.max_depth + self.clearance
    }

    /// Divides every value by `max_depth + clearance`.
    pub fn normalize(&self, values: &mut DMatrix<f64>) {
        *values /= self.normalization_divisor();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plan_types::Contact;

    const CLEARANCE: f64 = 0.01;

    #[test]
    fn test_far_distance_is_free() {
        assert_eq!(proximity_potential(0.05, CLEARANCE), 0.0);
        assert_eq!(proximity_potential(CLEARANCE, CLEARANCE), 0.0);
        assert_eq!(proximity_potential(CollisionResult::FAR, CLEARANCE), 0.0);
    }

    #[test]
    fn test_inside_clearance_band() {
        assert_relative_eq!(proximity_potential(0.005, CLEARANCE), 0.005, epsilon = 1e-12);
        assert_relative_eq!(proximity_potential(0.0001, CLEARANCE), 0.0099, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_distance_is_free() {
        assert_eq!(proximity_potential(0.0, CLEARANCE), 0.0);
        assert_eq!(proximity_potential(-0.002, CLEARANCE), 0.0);
    }

    #[test]
    fn test_last_contact_wins() {
        let mut evaluator = PotentialEvaluator::new(CLEARANCE);
        let result = CollisionResult::colliding([
            Contact::new("a", "b", 0.05),
            Contact::new("c", "d", -0.01),
        ]);

        // Pair ("c", "d") is scanned last.
        let potential = evaluator.result_potential(&result);
        assert_relative_eq!(potential, 0.02, epsilon = 1e-12);
        assert_relative_eq!(evaluator.max_depth(), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_collision_without_contacts() {
        let mut evaluator = PotentialEvaluator::new(CLEARANCE);
        let result = CollisionResult {
            collision: true,
            ..Default::default()
        };
        assert_relative_eq!(evaluator.result_potential(&result), CLEARANCE);
        assert_eq!(evaluator.max_depth(), 0.0);
    }

    #[test]
    fn test_step_sums_world_and_self() {
        let mut evaluator = PotentialEvaluator::new(CLEARANCE);
        let results = StepResults {
            world: CollisionResult::separated(0.004),
            self_collision: CollisionResult::separated(0.008),
        };
        let step = evaluator.step_potential(&results);
        assert_relative_eq!(step.value, 0.006 + 0.002, epsilon = 1e-12);
        assert!(!step.collision);
    }

    #[test]
    fn test_step_self_collision_flags_step() {
        let mut evaluator = PotentialEvaluator::new(CLEARANCE);
        let results = StepResults {
            world: CollisionResult::separated(0.2),
            self_collision: CollisionResult::colliding([Contact::new("l1", "l4", 0.003)]),
        };
        let step = evaluator.step_potential(&results);
        assert!(step.collision);
        assert_relative_eq!(step.value, 0.013, epsilon = 1e-12);
    }

    #[test]
    fn test_max_depth_spans_results() {
        let mut evaluator = PotentialEvaluator::new(CLEARANCE);
        evaluator.result_potential(&CollisionResult::colliding([Contact::new("a", "b", 0.03)]));
        evaluator.result_potential(&CollisionResult::colliding([Contact::new("a", "b", 0.01)]));
        assert_relative_eq!(evaluator.max_depth(), 0.03);
        assert_relative_eq!(evaluator.normalization_divisor(), 0.04);
    }

    #[test]
    fn test_normalize_without_collision_uses_clearance() {
        let evaluator = PotentialEvaluator::new(CLEARANCE);
        let mut values = DMatrix::from_column_slice(2, 1, &[0.005, 0.0]);
        evaluator.normalize(&mut values);
        assert_relative_eq!(values[(0, 0)], 0.5, epsilon = 1e-12);
        assert_eq!(values[(1, 0)], 0.0);
    }
}
