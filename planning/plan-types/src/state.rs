//! Robot configuration at a single time step.

use nalgebra::DVector;

/// Joint positions of one posed robot configuration.
///
/// States are pure data. Forward kinematics and geometry placement belong to
/// the collision engine, which receives states by shared reference.
///
/// # Example
///
/// ```
/// use plan_types::RobotState;
///
/// let state = RobotState::from_slice(&[0.0, 0.5, -1.2]);
/// assert_eq!(state.dof(), 3);
/// assert_eq!(state.position(1), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RobotState {
    joint_positions: DVector<f64>,
}

impl RobotState {
    /// Creates a state from a joint position vector.
    #[must_use]
    pub const fn new(joint_positions: DVector<f64>) -> Self {
        Self { joint_positions }
    }

    /// Creates a state from a slice of joint positions.
    #[must_use]
    pub fn from_slice(positions: &[f64]) -> Self {
        Self::new(DVector::from_column_slice(positions))
    }

    /// Creates a state with `dof` joints all at zero.
    #[must_use]
    pub fn zeros(dof: usize) -> Self {
        Self::new(DVector::zeros(dof))
    }

    /// Returns the number of joints.
    #[must_use]
    pub fn dof(&self) -> usize {
        self.joint_positions.len()
    }

    /// Returns the joint position vector.
    #[must_use]
    pub const fn joint_positions(&self) -> &DVector<f64> {
        &self.joint_positions
    }

    /// Returns the position of joint `index`, if it exists.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<f64> {
        self.joint_positions.get(index).copied()
    }
}
