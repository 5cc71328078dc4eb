/// Convenience result type used across Marionette.
pub type MarionetteResult<T> = Result<T, MarionetteError>;

/// Top-level error taxonomy used by the animation core.
///
/// Everything here is a configuration error: it is reported once, at the
/// point of misuse (unknown bone name, malformed IK chain, mismatched tuple
/// lengths, unknown easing kind). Per-frame updates never fail; degenerate
/// numeric input resolves to a documented safe default instead.
#[derive(thiserror::Error, Debug)]
pub enum MarionetteError {
    /// Invalid user-provided parameters or construction data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or querying a skeleton (bones, IK chains).
    #[error("skeleton error: {0}")]
    Skeleton(String),

    /// Errors while building or sampling keyframe animation.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while configuring the virtual camera.
    #[error("camera error: {0}")]
    Camera(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MarionetteError {
    /// Build a [`MarionetteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MarionetteError::Skeleton`] value.
    pub fn skeleton(msg: impl Into<String>) -> Self {
        Self::Skeleton(msg.into())
    }

    /// Build a [`MarionetteError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MarionetteError::Camera`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera(msg.into())
    }

    /// Build a [`MarionetteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
