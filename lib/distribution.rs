//! Exact output distributions of boson-sampling experiments.
//!
//! For a lossless transition *S* → *T* through interferometer *U*, the
//! probability is
//! ```text
//! P(T | S) = |perm(U_{S,T})|^2 / (Π_j S_j! Π_i T_i!)
//! ```
//! Uniform losses that leave *l* of the initial *n* particles are handled by
//! averaging over every lossy input *S'* reachable from *S*, weighted by the
//! fraction of the C(*n*, *l*) particle subsets that produce it,
//! Π<sub>*j*</sub> C(*S*<sub>*j*</sub>, *S'*<sub>*j*</sub>) / C(*n*, *l*).

use nalgebra as na;
use num_complex::Complex64 as C64;
use rayon::iter::{ IntoParallelRefIterator, ParallelIterator };
use crate::{
    config::ExperimentConfiguration,
    enumerate::{ binomial_f64, generate_lossy_inputs, generate_possible_outputs },
    error::BosonResult,
    permanent::calculate_effective_scattering_matrix_permanent,
    state::ModeState,
};

fn factorial(k: usize) -> f64 { (1..=k).map(|x| x as f64).product() }

/// Return the probability of observing `output_state` given `input_state`,
/// with no losses.
pub fn transition_probability(
    matrix: &na::DMatrix<C64>,
    input_state: &[usize],
    output_state: &[usize],
) -> BosonResult<f64>
{
    let perm
        = calculate_effective_scattering_matrix_permanent(
            matrix, input_state, output_state)?;
    let norm: f64
        = input_state.iter()
        .chain(output_state.iter())
        .map(|&k| factorial(k))
        .product();
    Ok(perm.norm_sqr() / norm)
}

/// Computes the exact distribution over output states for an experiment.
#[derive(Clone, Debug)]
pub struct ExactDistributionCalculator<'a> {
    configuration: &'a ExperimentConfiguration,
    outcomes: Vec<ModeState>,
}

impl<'a> ExactDistributionCalculator<'a> {
    /// Create a new calculator over all possible outputs for the number of
    /// particles left in `configuration`.
    pub fn new(configuration: &'a ExperimentConfiguration) -> Self {
        let outcomes
            = generate_possible_outputs(
                configuration.number_of_particles_left(),
                configuration.number_of_modes(),
            );
        Self { configuration, outcomes }
    }

    /// Create a new calculator over a specific list of outcomes.
    pub fn with_outcomes(
        configuration: &'a ExperimentConfiguration,
        outcomes: Vec<ModeState>,
    ) -> Self
    {
        Self { configuration, outcomes }
    }

    pub fn configuration(&self) -> &'a ExperimentConfiguration {
        self.configuration
    }

    /// Return the outcomes whose probabilities are computed, in the same order
    /// as the result of [`Self::calculate_distribution`].
    pub fn outcomes(&self) -> &[ModeState] { &self.outcomes }

    // each (weight, input) pair after losses; weights sum to 1
    fn weighted_inputs(&self) -> Vec<(f64, ModeState)> {
        let initial = self.configuration.initial_state();
        if !self.configuration.is_lossy() {
            return vec![(1.0, initial.clone())];
        }
        let n = self.configuration.initial_number_of_particles();
        let l = self.configuration.number_of_particles_left();
        let total = binomial_f64(n, l);
        generate_lossy_inputs(initial, l)
            .into_iter()
            .map(|lossy| {
                let count: f64
                    = initial.iter().zip(lossy.iter())
                    .map(|(&s, &sl)| binomial_f64(s, sl))
                    .product();
                (count / total, lossy)
            })
            .collect()
    }

    /// Compute the probability of each outcome.
    ///
    /// Outcomes are evaluated in parallel. Fails if any outcome doesn't fit
    /// the experiment's interferometer.
    pub fn calculate_distribution(&self) -> BosonResult<Vec<f64>> {
        let matrix = self.configuration.interferometer_matrix();
        let inputs = self.weighted_inputs();
        log::debug!(
            "computing exact distribution over {} outcomes from {} input(s)",
            self.outcomes.len(),
            inputs.len(),
        );
        self.outcomes.par_iter()
            .map(|output| {
                inputs.iter()
                    .map(|(weight, input)| {
                        transition_probability(matrix, input, output)
                            .map(|p| weight * p)
                    })
                    .sum::<BosonResult<f64>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::BosonError;

    const EPSILON: f64 = 1e-12;

    // 50:50 beam splitter
    fn beam_splitter() -> na::DMatrix<C64> {
        let h = C64::from(std::f64::consts::FRAC_1_SQRT_2);
        na::dmatrix![h, h; h, -h]
    }

    #[test]
    fn identity_transitions() {
        let eye: na::DMatrix<C64> = na::DMatrix::identity(3, 3);
        let p = transition_probability(&eye, &[2, 1, 0], &[2, 1, 0]).unwrap();
        assert!((p - 1.0).abs() < EPSILON);
        let p = transition_probability(&eye, &[2, 1, 0], &[1, 2, 0]).unwrap();
        assert!(p.abs() < EPSILON);
    }

    #[test]
    fn hong_ou_mandel() {
        let config
            = ExperimentConfiguration::lossless(beam_splitter(), ModeState::from([1, 1]))
            .unwrap();
        let calc = ExactDistributionCalculator::new(&config);
        assert_eq!(
            calc.outcomes(),
            &[ModeState::from([2, 0]), ModeState::from([1, 1]), ModeState::from([0, 2])],
        );
        let probs = calc.calculate_distribution().unwrap();
        assert!((probs[0] - 0.5).abs() < EPSILON);
        assert!(probs[1].abs() < EPSILON);
        assert!((probs[2] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn lossy_beam_splitter() {
        // either particle survives and exits each port with probability 1/2
        let config
            = ExperimentConfiguration::new(beam_splitter(), ModeState::from([1, 1]), 1)
            .unwrap();
        let probs
            = ExactDistributionCalculator::new(&config)
            .calculate_distribution()
            .unwrap();
        assert_eq!(probs.len(), 2);
        assert!((probs[0] - 0.5).abs() < EPSILON);
        assert!((probs[1] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn lossy_weights() {
        let eye: na::DMatrix<C64> = na::DMatrix::identity(2, 2);
        let config
            = ExperimentConfiguration::new(eye, ModeState::from([2, 1]), 1)
            .unwrap();
        let calc = ExactDistributionCalculator::new(&config);
        let probs = calc.calculate_distribution().unwrap();
        // two of the three particles start in mode 0
        assert!((probs[0] - 2.0 / 3.0).abs() < EPSILON);
        assert!((probs[1] - 1.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn bad_outcome() {
        let eye: na::DMatrix<C64> = na::DMatrix::identity(2, 2);
        let config
            = ExperimentConfiguration::lossless(eye, ModeState::from([1, 0]))
            .unwrap();
        let calc
            = ExactDistributionCalculator::with_outcomes(
                &config, vec![ModeState::from([1, 0, 0])]);
        assert!(matches!(
            calc.calculate_distribution(),
            Err(BosonError::ShapeMismatch { what: "output state", .. }),
        ));
    }
}
