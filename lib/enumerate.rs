//! Enumeration of the mode-basis configurations available to a fixed number of
//! bosons.
//!
//! The *n*-particle, *m*-mode bosonic Hilbert space has dimension
//! C(*n* + *m* − 1, *n*) by a stars-and-bars argument; [`PossibleOutputs`]
//! walks through a basis for it without ever holding more than one state, and
//! [`count_possible_outputs`] gives its size exactly.

use itertools::Itertools;
use num_bigint::BigUint;
use rustc_hash::FxHashSet;
use crate::state::{ ModeState, ParticleState, particle_state_to_mode_state };

/// Iterator over all mode-basis states of `n` particles in `m` modes.
///
/// States are produced in reverse-lexicographic order, beginning with all
/// particles in the first mode (`∣n,0,...,0⟩`) and ending with all particles
/// in the last (`∣0,...,0,n⟩`). Each successor is found by taking the rightmost
/// mode `k > 0` whose predecessor is occupied, moving one particle out of mode
/// `k - 1`, clearing modes `k..`, and placing the deficit in mode `k`.
///
/// Yields nothing if `m == 0`.
#[derive(Clone, Debug)]
pub struct PossibleOutputs {
    n: usize,
    next: Option<Vec<usize>>,
}

impl PossibleOutputs {
    pub fn new(n: usize, m: usize) -> Self {
        let next
            = (m > 0).then(|| {
                let mut first = vec![0; m];
                first[0] = n;
                first
            });
        Self { n, next }
    }

    fn successor(&self, cur: &[usize]) -> Option<Vec<usize>> {
        let m = cur.len();
        if cur[m - 1] == self.n { return None; }
        let mut k = m - 1;
        while cur[k - 1] == 0 { k -= 1; }
        let mut succ = cur.to_vec();
        succ[k - 1] -= 1;
        succ[k..].iter_mut().for_each(|occ| { *occ = 0; });
        succ[k] = self.n - succ.iter().sum::<usize>();
        Some(succ)
    }
}

impl Iterator for PossibleOutputs {
    type Item = ModeState;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next.take()?;
        self.next = self.successor(&cur);
        Some(ModeState(cur))
    }
}

/// Collect every configuration of `n` particles in `m` modes.
///
/// See [`PossibleOutputs`] for the ordering, which is the same from call to
/// call.
pub fn generate_possible_outputs(n: usize, m: usize) -> Vec<ModeState> {
    let outputs: Vec<ModeState> = PossibleOutputs::new(n, m).collect();
    log::trace!("enumerated {} outputs for n = {n}, m = {m}", outputs.len());
    outputs
}

/// Return every distinct state reachable from `initial_state` by keeping
/// exactly `particles_left` of its particles.
///
/// Particles are treated as distinguishable while selecting which ones
/// survive, then collapsed back to the mode basis; duplicates are dropped,
/// keeping first-seen order. If `particles_left` exceeds the number of
/// particles, the result is empty.
///
/// This visits all C(*n*, `particles_left`) subsets of the *n* initial
/// particles, so cost is exponential in *n*.
pub fn generate_lossy_inputs(initial_state: &ModeState, particles_left: usize)
    -> Vec<ModeState>
{
    let num_modes = initial_state.num_modes();
    let particles: ParticleState = initial_state.to_particle_state();
    let mut seen: FxHashSet<ModeState> = FxHashSet::default();
    let lossy_inputs: Vec<ModeState>
        = particles.iter().copied()
        .combinations(particles_left)
        .filter_map(|kept| {
            // every entry comes from `initial_state`, so is always in range
            particle_state_to_mode_state(&kept, num_modes).ok()
        })
        .filter(|state| seen.insert(state.clone()))
        .collect();
    log::trace!(
        "{} distinct lossy inputs from {initial_state} with {particles_left} left",
        lossy_inputs.len(),
    );
    lossy_inputs
}

/// Exact binomial coefficient C(`n`, `k`), zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> BigUint {
    if k > n { return BigUint::from(0_u8); }
    let k = k.min(n - k);
    // each partial product is itself a binomial coefficient, so the division
    // is always exact
    (0..k).fold(BigUint::from(1_u8), |acc, i| acc * (n - i) / (i + 1))
}

// floating-point version for weights; exact while the result fits in 53 bits
pub(crate) fn binomial_f64(n: usize, k: usize) -> f64 {
    if k > n { return 0.0; }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Return the dimension of the `n`-particle, `m`-mode bosonic Hilbert space,
/// C(`n` + `m` − 1, `n`).
///
/// There are no states when `m == 0`.
pub fn count_possible_outputs(n: usize, m: usize) -> BigUint {
    if m == 0 { return BigUint::from(0_u8); }
    binomial(n + m - 1, n)
}
