//! Error types for cuefold.

use thiserror::Error;

/// Result type for cuefold operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cuefold operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A frame-rate-dependent operation was attempted on a time that does
    /// not carry a frame rate, or a rated time was compared against a
    /// metric one.
    #[error("Unknown frame rate: {0}")]
    UnknownFrameRate(String),

    /// Input broke a contract the assembly algorithm relies on, such as a
    /// fragment whose start and end times use different representations.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A colour string could not be parsed as hex RGB/ARGB.
    #[error("Invalid colour: {0}")]
    InvalidColour(String),
}

impl Error {
    /// Create an unknown frame rate error.
    pub fn unknown_frame_rate(msg: impl Into<String>) -> Self {
        Self::UnknownFrameRate(msg.into())
    }

    /// Create an invariant violation error.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Create an invalid colour error.
    pub fn invalid_colour(msg: impl Into<String>) -> Self {
        Self::InvalidColour(msg.into())
    }
}
