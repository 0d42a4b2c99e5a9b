//! Discretized candidate trajectories.
//!
//! A [`Trajectory`] is what the optimizer hands to cost features: one
//! [`RobotState`] per time step plus the planning group the states belong to.
//! Features only ever borrow it for the duration of one evaluation call.

use std::ops::Range;

use crate::error::PlanningError;
use crate::state::RobotState;

/// An ordered sequence of robot configurations for one planning group.
///
/// # Example
///
/// ```
/// use plan_types::{RobotState, Trajectory};
///
/// let trajectory = Trajectory::new(
///     "manipulator",
///     vec![RobotState::zeros(6), RobotState::zeros(6)],
/// );
///
/// assert_eq!(trajectory.num_time_steps(), 2);
/// assert_eq!(trajectory.step_range(1, 1).unwrap(), 1..2);
/// assert!(trajectory.step_range(1, 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trajectory {
    group_name: String,
    states: Vec<RobotState>,
}

impl Trajectory {
    /// Creates a trajectory for `group_name` from per-step states.
    #[must_use]
    pub fn new(group_name: impl Into<String>, states: Vec<RobotState>) -> Self {
        Self {
            group_name: group_name.into(),
            states,
        }
    }

    /// Returns the planning group name.
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Returns the number of time steps.
    #[must_use]
    pub fn num_time_steps(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if the trajectory has no time steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state at time step `t`.
    #[must_use]
    pub fn state(&self, t: usize) -> Option<&RobotState> {
        self.states.get(t)
    }

    /// Returns all states.
    #[must_use]
    pub fn states(&self) -> &[RobotState] {
        &self.states
    }

    /// Validates the subrange `start..start + count`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::StepRangeOutOfBounds`] if the range overflows
    /// or extends past the last time step.
    pub fn step_range(&self, start: usize, count: usize) -> Result<Range<usize>, PlanningError> {
        let len = self.states.len();
        match start.checked_add(count) {
            Some(end) if end <= len => Ok(start..end),
            _ => Err(PlanningError::StepRangeOutOfBounds { start, count, len }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn three_steps() -> Trajectory {
        Trajectory::new(
            "arm",
            vec![
                RobotState::from_slice(&[0.0]),
                RobotState::from_slice(&[1.0]),
                RobotState::from_slice(&[2.0]),
            ],
        )
    }

    #[test]
    fn test_accessors() {
        let trajectory = three_steps();
        assert_eq!(trajectory.group_name(), "arm");
        assert_eq!(trajectory.num_time_steps(), 3);
        assert!(!trajectory.is_empty());
        assert_eq!(trajectory.state(2).and_then(|s| s.position(0)), Some(2.0));
        assert!(trajectory.state(3).is_none());
    }

    #[test]
    fn test_full_range() {
        assert_eq!(three_steps().step_range(0, 3).unwrap(), 0..3);
    }

    #[test]
    fn test_empty_range_at_end() {
        assert_eq!(three_steps().step_range(3, 0).unwrap(), 3..3);
    }

    #[test]
    fn test_range_past_end() {
        let err = three_steps().step_range(2, 2).unwrap_err();
        assert_eq!(
            err,
            PlanningError::StepRangeOutOfBounds {
                start: 2,
                count: 2,
                len: 3
            }
        );
    }

    #[test]
    fn test_range_overflow() {
        assert!(three_steps().step_range(usize::MAX, 2).is_err());
    }
}
