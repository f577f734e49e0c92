//! Error types for the session engine.
//!
//! Expected input races (fire while reloading, operating on an id that was
//! reclaimed in the same frame) are not errors; they surface as rejection
//! outcomes in [`crate::enums`]. Errors here mean the caller passed something
//! the engine refuses to act on. None of them are fatal.

use thiserror::Error;

/// Coarse classification of [`RangeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad argument; the operation had no effect.
    InvalidInput,
    /// The operation is not allowed in the current state.
    IllegalStateTransition,
}

/// Errors returned by engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Damage amounts must be finite and non-negative.
    #[error("invalid damage amount: {amount}")]
    NegativeDamage { amount: f64 },

    /// Score increments must be non-negative.
    #[error("invalid score increment: {points}")]
    NegativePoints { points: i64 },

    /// Tick deltas must be finite and non-negative.
    #[error("invalid tick delta: {dt}")]
    InvalidDelta { dt: f64 },

    /// `Start` was called while a session is running.
    #[error("session already running; reset it first")]
    SessionAlreadyRunning,

    /// A configuration field is out of range.
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl RangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RangeError::NegativeDamage { .. }
            | RangeError::NegativePoints { .. }
            | RangeError::InvalidDelta { .. }
            | RangeError::InvalidConfig { .. } => ErrorKind::InvalidInput,
            RangeError::SessionAlreadyRunning => ErrorKind::IllegalStateTransition,
        }
    }
}
