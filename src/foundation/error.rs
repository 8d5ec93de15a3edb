/// Convenience result type used across cinescroll.
pub type CineResult<T> = Result<T, CineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Nothing in the per-frame paths returns these: degenerate geometry and out-of-range inputs are
/// clamped locally. Errors only surface from construction and configuration.
#[derive(thiserror::Error, Debug)]
pub enum CineError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed channel curve (ordering, endpoints, non-finite values).
    #[error("curve error: {0}")]
    Curve(String),

    /// A raster surface could not be acquired.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl CineError {
    /// Build a [`CineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CineError::Curve`] value.
    pub fn curve(msg: impl Into<String>) -> Self {
        Self::Curve(msg.into())
    }

    /// Build a [`CineError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`CineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
