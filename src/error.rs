//! Error types for the simulator.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised by state construction, operator application, and
/// measurement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Construction parameters are unusable; the caller must not proceed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Operator and state dimensions disagree. Indicates an internal
    /// construction bug, not a caller mistake.
    #[error("dimension mismatch: operator is {operator}x{operator}, state is {state}x{state}")]
    DimensionMismatch { operator: usize, state: usize },

    /// Mode index outside `[0, num_modes)`. The call is rejected; the
    /// circuit is untouched.
    #[error("mode {mode} out of range for {num_modes} modes")]
    InvalidMode { mode: usize, num_modes: usize },

    /// Input too small or empty for the requested computation.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}
