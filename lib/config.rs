//! Parameters of a (possibly lossy) boson-sampling experiment.

use nalgebra as na;
use num_complex::Complex64 as C64;
use crate::{
    error::{ BosonError, BosonResult },
    state::ModeState,
};

/// Read-only description of a boson-sampling experiment: an interferometer, an
/// initial state, and the number of particles that survive uniform losses.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentConfiguration {
    interferometer_matrix: na::DMatrix<C64>,
    initial_state: ModeState,
    number_of_particles_left: usize,
}

impl ExperimentConfiguration {
    /// Create a new configuration.
    ///
    /// Fails with [`BosonError::ShapeMismatch`] if the matrix isn't square or
    /// doesn't match the number of modes in `initial_state`, and with
    /// [`BosonError::ConfigurationInconsistency`] if more particles are left
    /// than were put in.
    pub fn new(
        interferometer_matrix: na::DMatrix<C64>,
        initial_state: ModeState,
        number_of_particles_left: usize,
    ) -> BosonResult<Self>
    {
        let m = interferometer_matrix.nrows();
        if interferometer_matrix.ncols() != m {
            return Err(BosonError::ShapeMismatch {
                what: "matrix columns",
                expected: m,
                found: interferometer_matrix.ncols(),
            });
        }
        if initial_state.num_modes() != m {
            return Err(BosonError::ShapeMismatch {
                what: "initial state",
                expected: m,
                found: initial_state.num_modes(),
            });
        }
        let n = initial_state.num_particles();
        if number_of_particles_left > n {
            return Err(BosonError::ConfigurationInconsistency {
                expected: n,
                found: number_of_particles_left,
            });
        }
        Ok(Self { interferometer_matrix, initial_state, number_of_particles_left })
    }

    /// Create a new configuration where no particles are lost.
    pub fn lossless(
        interferometer_matrix: na::DMatrix<C64>,
        initial_state: ModeState,
    ) -> BosonResult<Self>
    {
        let n = initial_state.num_particles();
        Self::new(interferometer_matrix, initial_state, n)
    }

    pub fn interferometer_matrix(&self) -> &na::DMatrix<C64> {
        &self.interferometer_matrix
    }

    pub fn initial_state(&self) -> &ModeState { &self.initial_state }

    pub fn number_of_modes(&self) -> usize { self.initial_state.num_modes() }

    pub fn initial_number_of_particles(&self) -> usize {
        self.initial_state.num_particles()
    }

    pub fn number_of_particles_left(&self) -> usize {
        self.number_of_particles_left
    }

    /// Return `true` if any particles are lost.
    pub fn is_lossy(&self) -> bool {
        self.number_of_particles_left < self.initial_number_of_particles()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn eye(m: usize) -> na::DMatrix<C64> { na::DMatrix::identity(m, m) }

    #[test]
    fn accessors() {
        let config
            = ExperimentConfiguration::new(eye(3), ModeState::from([1, 2, 0]), 2)
            .unwrap();
        assert_eq!(config.number_of_modes(), 3);
        assert_eq!(config.initial_number_of_particles(), 3);
        assert_eq!(config.number_of_particles_left(), 2);
        assert!(config.is_lossy());
        assert_eq!(config.interferometer_matrix(), &eye(3));

        let config
            = ExperimentConfiguration::lossless(eye(2), ModeState::from([1, 1]))
            .unwrap();
        assert_eq!(config.number_of_particles_left(), 2);
        assert!(!config.is_lossy());
    }

    #[test]
    fn invalid() {
        assert_eq!(
            ExperimentConfiguration::new(eye(2), ModeState::from([1, 0, 0]), 1),
            Err(BosonError::ShapeMismatch {
                what: "initial state", expected: 2, found: 3 }),
        );
        assert_eq!(
            ExperimentConfiguration::new(
                na::DMatrix::zeros(2, 3), ModeState::from([1, 0]), 1),
            Err(BosonError::ShapeMismatch {
                what: "matrix columns", expected: 2, found: 3 }),
        );
        assert_eq!(
            ExperimentConfiguration::new(eye(2), ModeState::from([1, 0]), 2),
            Err(BosonError::ConfigurationInconsistency { expected: 1, found: 2 }),
        );
    }
}
