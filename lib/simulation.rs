//! Sampling-based drivers built on top of the exact calculators.
//!
//! A [`SimulationStrategy`] turns an input state into a single sampled output
//! state. Strategies are interchangeable behind the trait, so
//! [`BosonSamplingSimulator`] and [`ApproximateDistributionCalculator`] don't
//! care whether samples come from the exact distribution
//! ([`ExactSamplingStrategy`]) or from something else entirely.

use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::{
    distributions::{ Distribution, WeightedIndex },
    rngs::StdRng,
    SeedableRng,
};
use rustc_hash::FxHashMap;
use crate::{
    config::ExperimentConfiguration,
    distribution::ExactDistributionCalculator,
    enumerate::generate_possible_outputs,
    error::{ BosonError, BosonResult },
    state::ModeState,
};

/// A method of producing one sample of an experiment's output.
pub trait SimulationStrategy {
    /// Sample an output state given `input_state`.
    fn simulate(&mut self, input_state: &ModeState) -> BosonResult<ModeState>;
}

impl<S> SimulationStrategy for &mut S
where S: SimulationStrategy + ?Sized
{
    fn simulate(&mut self, input_state: &ModeState) -> BosonResult<ModeState> {
        (**self).simulate(input_state)
    }
}

impl<S> SimulationStrategy for Box<S>
where S: SimulationStrategy + ?Sized
{
    fn simulate(&mut self, input_state: &ModeState) -> BosonResult<ModeState> {
        (**self).simulate(input_state)
    }
}

#[derive(Clone, Debug)]
struct Sampler {
    outcomes: Vec<ModeState>,
    index: WeightedIndex<f64>,
}

/// Draws samples directly from the exact output distribution.
///
/// The distribution for each distinct input state is computed on first use and
/// cached, so repeated sampling from the same input only pays for the
/// permanents once. The cache is unbounded: every distinct input keeps its full
/// outcome list until [`Self::clear_cache`] is called.
#[derive(Clone, Debug)]
pub struct ExactSamplingStrategy {
    interferometer_matrix: na::DMatrix<C64>,
    number_of_particles_left: Option<usize>,
    samplers: FxHashMap<ModeState, Sampler>,
    rng: StdRng,
}

impl ExactSamplingStrategy {
    /// Create a new lossless strategy, optionally seeding the internal random
    /// number generator.
    pub fn new(interferometer_matrix: na::DMatrix<C64>, seed: Option<u64>)
        -> Self
    {
        let rng
            = seed.map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_entropy);
        Self {
            interferometer_matrix,
            number_of_particles_left: None,
            samplers: FxHashMap::default(),
            rng,
        }
    }

    /// Create a new strategy in which only `number_of_particles_left`
    /// particles survive uniform losses.
    pub fn lossy(
        interferometer_matrix: na::DMatrix<C64>,
        number_of_particles_left: usize,
        seed: Option<u64>,
    ) -> Self
    {
        let mut strategy = Self::new(interferometer_matrix, seed);
        strategy.number_of_particles_left = Some(number_of_particles_left);
        strategy
    }

    /// Create a new strategy matching the interferometer and losses of
    /// `configuration`.
    pub fn from_configuration(
        configuration: &ExperimentConfiguration,
        seed: Option<u64>,
    ) -> Self
    {
        Self::lossy(
            configuration.interferometer_matrix().clone(),
            configuration.number_of_particles_left(),
            seed,
        )
    }

    /// Return the number of input states with a cached distribution.
    pub fn num_cached(&self) -> usize { self.samplers.len() }

    /// Drop all cached distributions.
    pub fn clear_cache(&mut self) { self.samplers.clear(); }

    fn make_sampler(&self, input_state: &ModeState) -> BosonResult<Sampler> {
        let left
            = self.number_of_particles_left
            .unwrap_or_else(|| input_state.num_particles());
        let config
            = ExperimentConfiguration::new(
                self.interferometer_matrix.clone(), input_state.clone(), left)?;
        let calc = ExactDistributionCalculator::new(&config);
        let probs = calc.calculate_distribution()?;
        let index
            = WeightedIndex::new(&probs)
            .map_err(|_| BosonError::EmptyDistribution)?;
        log::debug!(
            "cached exact sampler for {input_state} over {} outcomes",
            probs.len(),
        );
        Ok(Sampler { outcomes: calc.outcomes().to_vec(), index })
    }
}

impl SimulationStrategy for ExactSamplingStrategy {
    fn simulate(&mut self, input_state: &ModeState) -> BosonResult<ModeState> {
        if !self.samplers.contains_key(input_state) {
            let sampler = self.make_sampler(input_state)?;
            self.samplers.insert(input_state.clone(), sampler);
        }
        let sampler = &self.samplers[input_state];
        let k = sampler.index.sample(&mut self.rng);
        Ok(sampler.outcomes[k].clone())
    }
}

/// Thin driver around a [`SimulationStrategy`].
#[derive(Clone, Debug)]
pub struct BosonSamplingSimulator<S> {
    simulation_strategy: S,
}

impl<S> BosonSamplingSimulator<S>
where S: SimulationStrategy
{
    pub fn new(simulation_strategy: S) -> Self { Self { simulation_strategy } }

    /// Produce a single output sample for `input_state`.
    pub fn get_classical_simulation_results(
        &mut self,
        input_state: &ModeState,
    ) -> BosonResult<ModeState>
    {
        self.simulation_strategy.simulate(input_state)
    }

    pub fn strategy(&self) -> &S { &self.simulation_strategy }

    pub fn into_strategy(self) -> S { self.simulation_strategy }
}

/// Estimates an experiment's output distribution by repeated sampling.
#[derive(Clone, Debug)]
pub struct ApproximateDistributionCalculator<'a, S> {
    configuration: &'a ExperimentConfiguration,
    simulator: BosonSamplingSimulator<S>,
    outcomes: Vec<ModeState>,
}

impl<'a, S> ApproximateDistributionCalculator<'a, S>
where S: SimulationStrategy
{
    /// Create a new calculator binning over all possible outputs for the number
    /// of particles left in `configuration`.
    pub fn new(configuration: &'a ExperimentConfiguration, strategy: S) -> Self {
        let outcomes
            = generate_possible_outputs(
                configuration.number_of_particles_left(),
                configuration.number_of_modes(),
            );
        Self::with_outcomes(configuration, strategy, outcomes)
    }

    /// Create a new calculator binning over a specific list of outcomes.
    pub fn with_outcomes(
        configuration: &'a ExperimentConfiguration,
        strategy: S,
        outcomes: Vec<ModeState>,
    ) -> Self
    {
        let simulator = BosonSamplingSimulator::new(strategy);
        Self { configuration, simulator, outcomes }
    }

    /// Return the outcomes being binned, in the same order as the result of
    /// [`Self::calculate_approximate_distribution`].
    pub fn outcomes(&self) -> &[ModeState] { &self.outcomes }

    /// Draw `samples_number` samples from the experiment's initial state and
    /// return the fraction that landed on each outcome.
    ///
    /// Samples that don't match any outcome are counted toward the total but
    /// not toward any bin. With no samples, every frequency is zero.
    pub fn calculate_approximate_distribution(&mut self, samples_number: usize)
        -> BosonResult<Vec<f64>>
    {
        let bins: FxHashMap<&ModeState, usize>
            = self.outcomes.iter()
            .enumerate()
            .map(|(k, outcome)| (outcome, k))
            .collect();
        let mut counts: Vec<usize> = vec![0; self.outcomes.len()];
        let initial = self.configuration.initial_state();
        let mut missed: usize = 0;
        for _ in 0..samples_number {
            let result = self.simulator.get_classical_simulation_results(initial)?;
            match bins.get(&result) {
                Some(&k) => { counts[k] += 1; },
                None => { missed += 1; },
            }
        }
        if missed > 0 {
            log::debug!("{missed} of {samples_number} samples fell outside the outcome list");
        }
        if samples_number == 0 { return Ok(vec![0.0; counts.len()]); }
        Ok(
            counts.into_iter()
                .map(|c| c as f64 / samples_number as f64)
                .collect()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn beam_splitter() -> na::DMatrix<C64> {
        let h = C64::from(std::f64::consts::FRAC_1_SQRT_2);
        na::dmatrix![h, h; h, -h]
    }

    // always returns the same output
    struct Fixed(ModeState);

    impl SimulationStrategy for Fixed {
        fn simulate(&mut self, _input_state: &ModeState) -> BosonResult<ModeState> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn identity_is_deterministic() {
        let eye: na::DMatrix<C64> = na::DMatrix::identity(3, 3);
        let mut strategy = ExactSamplingStrategy::new(eye, Some(10546));
        let input = ModeState::from([0, 2, 1]);
        for _ in 0..20 {
            assert_eq!(strategy.simulate(&input).unwrap(), input);
        }
    }

    #[test]
    fn hong_ou_mandel_never_coincident() {
        let mut strategy = ExactSamplingStrategy::new(beam_splitter(), Some(1));
        let input = ModeState::from([1, 1]);
        for _ in 0..200 {
            let out = strategy.simulate(&input).unwrap();
            assert_ne!(out, ModeState::from([1, 1]));
            assert_eq!(out.num_particles(), 2);
        }
    }

    #[test]
    fn seeded_reproducible() {
        let input = ModeState::from([1, 1]);
        let mut a = ExactSamplingStrategy::new(beam_splitter(), Some(77));
        let mut b = ExactSamplingStrategy::new(beam_splitter(), Some(77));
        let xs: Vec<ModeState>
            = (0..50).map(|_| a.simulate(&input).unwrap()).collect();
        let ys: Vec<ModeState>
            = (0..50).map(|_| b.simulate(&input).unwrap()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn cache_per_input() {
        let mut strategy = ExactSamplingStrategy::new(beam_splitter(), Some(9));
        assert_eq!(strategy.num_cached(), 0);
        strategy.simulate(&ModeState::from([1, 1])).unwrap();
        strategy.simulate(&ModeState::from([1, 1])).unwrap();
        assert_eq!(strategy.num_cached(), 1);
        strategy.simulate(&ModeState::from([2, 0])).unwrap();
        assert_eq!(strategy.num_cached(), 2);
        strategy.clear_cache();
        assert_eq!(strategy.num_cached(), 0);
        let out = strategy.simulate(&ModeState::from([1, 0])).unwrap();
        assert_eq!(out.num_particles(), 1);
        assert_eq!(strategy.num_cached(), 1);
    }

    #[test]
    fn lossy_samples_have_fewer_particles() {
        let mut strategy = ExactSamplingStrategy::lossy(beam_splitter(), 1, Some(3));
        let out = strategy.simulate(&ModeState::from([1, 1])).unwrap();
        assert_eq!(out.num_particles(), 1);
    }

    #[test]
    fn strategy_rejects_bad_input() {
        let mut strategy = ExactSamplingStrategy::new(beam_splitter(), Some(0));
        assert!(matches!(
            strategy.simulate(&ModeState::from([1, 0, 0])),
            Err(BosonError::ShapeMismatch { .. }),
        ));
    }

    #[test]
    fn binning_with_fixed_strategy() {
        let config
            = ExperimentConfiguration::lossless(beam_splitter(), ModeState::from([1, 1]))
            .unwrap();
        let mut calc
            = ApproximateDistributionCalculator::new(
                &config, Fixed(ModeState::from([0, 2])));
        assert_eq!(calc.calculate_approximate_distribution(10).unwrap(), vec![0.0, 0.0, 1.0]);
        assert_eq!(calc.calculate_approximate_distribution(0).unwrap(), vec![0.0; 3]);

        let mut calc
            = ApproximateDistributionCalculator::with_outcomes(
                &config, Fixed(ModeState::from([0, 2])), vec![ModeState::from([2, 0])]);
        assert_eq!(calc.calculate_approximate_distribution(4).unwrap(), vec![0.0]);
    }

    #[test]
    fn boxed_strategy() {
        let strategy: Box<dyn SimulationStrategy>
            = Box::new(Fixed(ModeState::from([1, 0])));
        let mut simulator = BosonSamplingSimulator::new(strategy);
        assert_eq!(
            simulator.get_classical_simulation_results(&ModeState::from([0, 1])).unwrap(),
            ModeState::from([1, 0]),
        );
    }
}
