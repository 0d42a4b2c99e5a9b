//! Error types for cost feature evaluation.
//!
//! This module defines the [`PlanningError`] enum which represents all possible
//! errors that can occur while configuring cost features, binding them to a
//! planning scene, and evaluating trajectories.

/// Errors that can occur during cost feature setup and evaluation.
///
/// Two classes exist: configuration-time contract violations (a wrong
/// collision detector bound to the scene) that must abort feature use, and
/// recoverable initialization failures (missing or malformed parameters)
/// that let the host refuse to enable a feature without crashing.
///
/// # Example
///
/// ```
/// use plan_types::PlanningError;
///
/// let error = PlanningError::wrong_collision_detector("IndustrialFCL", "FCL");
/// assert!(error.to_string().contains("IndustrialFCL"));
/// assert!(error.is_fatal());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PlanningError {
    /// The planning scene has a different collision detector active than the
    /// one the feature requires.
    #[error(
        "cost evaluation requires the collision detector \"{required}\" but \"{active}\" is active; \
         set the parameter collision_detector = {required} where the planning node is launched"
    )]
    WrongCollisionDetector {
        /// Name of the detector the feature requires.
        required: String,
        /// Name of the detector the scene reports.
        active: String,
    },

    /// A required configuration parameter is absent.
    #[error("{feature} feature failed to load parameters: missing \"{key}\"")]
    MissingParameter {
        /// The feature being initialized.
        feature: String,
        /// The missing key.
        key: String,
    },

    /// A configuration parameter has an unusable value.
    #[error("invalid parameter \"{key}\": {reason}")]
    InvalidParameter {
        /// The offending key.
        key: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// Evaluation was requested before a planning scene was bound.
    #[error("{feature} feature has no planning scene bound")]
    SceneNotBound {
        /// The feature that was evaluated.
        feature: String,
    },

    /// The requested step range does not fit inside the trajectory.
    #[error("step range {start}..{start}+{count} exceeds trajectory of {len} steps")]
    StepRangeOutOfBounds {
        /// First requested step.
        start: usize,
        /// Number of requested steps.
        count: usize,
        /// Number of steps in the trajectory.
        len: usize,
    },

    /// The collision engine failed to answer a query.
    #[error("collision query failed: {0}")]
    CollisionQuery(String),

    /// No feature is registered under the requested class name.
    #[error("unknown cost feature \"{0}\"")]
    UnknownFeature(String),

    /// A feature set configuration could not be parsed.
    #[error("invalid feature configuration: {0}")]
    Config(String),
}

impl PlanningError {
    /// Creates a wrong collision detector error.
    #[must_use]
    pub fn wrong_collision_detector(required: impl Into<String>, active: impl Into<String>) -> Self {
        Self::WrongCollisionDetector {
            required: required.into(),
            active: active.into(),
        }
    }

    /// Creates a missing parameter error.
    #[must_use]
    pub fn missing_parameter(feature: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingParameter {
            feature: feature.into(),
            key: key.into(),
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a collision query error with the given message.
    #[must_use]
    pub fn collision_query(message: impl Into<String>) -> Self {
        Self::CollisionQuery(message.into())
    }

    /// Returns `true` if the error means the feature must not be used at all.
    ///
    /// A mismatched detector or a failing collision engine cannot produce
    /// meaningful costs, so hosts should abort rather than skip the feature.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::WrongCollisionDetector { .. } | Self::CollisionQuery(_)
        )
    }

    /// Returns `true` if this is an initialization-time configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::InvalidParameter { .. } | Self::Config(_)
        )
    }
}
