//! Error types for the calculus.

use thiserror::Error;

/// Errors that can occur while building or ranking acts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculusError {
    /// A selection was requested but no acts were registered
    #[error("no acts registered: cannot select from an empty set")]
    EmptySelection,
    /// Self-interest scale outside of [0, 1]
    #[error("self-interest scale must be between 0 and 1, got {0}")]
    InvalidSelfInterestScale(f64),
    /// A factor that cannot take part in the calculation
    #[error("invalid {factor} factor: {value}")]
    InvalidFactor {
        /// Name of the offending factor
        factor: &'static str,
        /// The rejected value
        value: f64,
    },
}
