//! Error kinds shared by all routines in the crate.
//!
//! Validation always happens before any arithmetic, so receiving one of these
//! means no partial result was computed.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type BosonResult<T> = Result<T, BosonError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BosonError {
    /// A matrix is not square, or a state vector's length disagrees with the
    /// matrix dimension or with another state.
    #[error("shape mismatch in {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A particle-basis state refers to a mode that doesn't exist.
    #[error("invalid state vector: mode index {index} out of range for {num_modes} modes")]
    InvalidStateVector { index: usize, num_modes: usize },

    /// The number of particles in a mode-occupation state disagrees with the
    /// particle count declared alongside it.
    #[error("inconsistent configuration: expected {expected} particles, found {found}")]
    ConfigurationInconsistency { expected: usize, found: usize },

    /// Attempted to sample from a distribution with no probability mass.
    #[error("cannot sample from a distribution with zero total weight")]
    EmptyDistribution,
}
