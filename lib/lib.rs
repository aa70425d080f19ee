//! Tools for computing the output statistics of boson-sampling experiments.
//!
//! Given an *m*-mode interferometer (an *m* × *m* unitary) and an input state
//! of *n* indistinguishable bosons, the probability of each output state is
//! governed by the permanent of an effective scattering matrix built from the
//! interferometer. The bulk of the crate is combinatorial: enumerating output
//! states ([`enumerate`]), converting between state representations
//! ([`state`]), and evaluating permanents ([`permanent`]). Exact and
//! sampled distributions are built on top of these in [`distribution`] and
//! [`simulation`].
//!
//! # Example
//! ```
//! use boson_sim::{
//!     config::ExperimentConfiguration,
//!     distribution::ExactDistributionCalculator,
//!     interferometer::random_unitary,
//!     state::ModeState,
//! };
//! use rand::{ rngs::StdRng, SeedableRng };
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let u = random_unitary(4, &mut rng);
//! let config
//!     = ExperimentConfiguration::lossless(u, ModeState::from([1, 1, 0, 0]))
//!     .unwrap();
//! let calc = ExactDistributionCalculator::new(&config);
//! let probs = calc.calculate_distribution().unwrap();
//! assert_eq!(probs.len(), calc.outcomes().len());
//! assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-10);
//! ```
//!
//! All of the core routines are pure functions of their (borrowed) inputs and
//! can be called from multiple threads at once.

pub mod error;
pub mod state;
pub mod enumerate;
pub mod permanent;
pub mod interferometer;
pub mod config;
pub mod distribution;
pub mod simulation;

pub use error::{ BosonError, BosonResult };
