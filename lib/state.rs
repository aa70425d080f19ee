//! Representations of multi-boson states in a linear-optical network.
//!
//! A state of *n* bosons spread over *m* modes can be written in two ways:
//! - in the *mode basis* ([`ModeState`]), as a length-*m* vector of occupation
//!   numbers summing to *n*;
//! - in the *particle basis* ([`ParticleState`]), as a length-*n* list giving
//!   the mode occupied by each particle.
//!
//! The two are related by [`particle_state_to_mode_state`] and
//! [`mode_state_to_particle_state`]. Since bosons are indistinguishable, the
//! order of a particle-basis state carries no physical meaning; conversion to
//! the particle basis always lists modes in ascending order with each mode's
//! particles contiguous, which makes the round trip deterministic.

use std::{
    fmt,
    ops::{ Deref, Index },
    slice::SliceIndex,
};
use itertools::Itertools;
use crate::error::{ BosonError, BosonResult };

/* ModeState ******************************************************************/

/// Occupation numbers for each mode (Fock-basis state).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModeState(pub Vec<usize>);

impl ModeState {
    /// Create the vacuum state on `num_modes` modes.
    pub fn vacuum(num_modes: usize) -> Self { Self(vec![0; num_modes]) }

    /// Return the number of modes.
    pub fn num_modes(&self) -> usize { self.0.len() }

    /// Return the total number of particles.
    pub fn num_particles(&self) -> usize { self.0.iter().sum() }

    /// Convert to the particle basis.
    pub fn to_particle_state(&self) -> ParticleState {
        expand_modes(&self.0)
    }

    /// Unwrap into the underlying occupation vector.
    pub fn into_inner(self) -> Vec<usize> { self.0 }
}

/// Written in ket notation, e.g. `∣1,0,2⟩`.
impl fmt::Display for ModeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "∣{}⟩", self.0.iter().join(","))
    }
}

/* ParticleState **************************************************************/

/// The mode index of each particle.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleState(pub Vec<usize>);

impl ParticleState {
    /// Return the number of particles.
    pub fn num_particles(&self) -> usize { self.0.len() }

    /// Unwrap into the underlying list of mode indices.
    pub fn into_inner(self) -> Vec<usize> { self.0 }
}

impl fmt::Display for ParticleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/* shared impls ***************************************************************/

macro_rules! impl_state_vec {
    ( $name:ident ) => {
        impl Deref for $name {
            type Target = [usize];

            fn deref(&self) -> &Self::Target { &self.0 }
        }

        impl AsRef<[usize]> for $name {
            fn as_ref(&self) -> &[usize] { &self.0 }
        }

        impl<I> Index<I> for $name
        where I: SliceIndex<[usize]>
        {
            type Output = I::Output;

            fn index(&self, idx: I) -> &Self::Output { &self.0[idx] }
        }

        impl From<Vec<usize>> for $name {
            fn from(v: Vec<usize>) -> Self { Self(v) }
        }

        impl<const K: usize> From<[usize; K]> for $name {
            fn from(a: [usize; K]) -> Self { Self(a.into()) }
        }

        impl From<$name> for Vec<usize> {
            fn from(s: $name) -> Self { s.0 }
        }

        impl FromIterator<usize> for $name {
            fn from_iter<T>(iter: T) -> Self
            where T: IntoIterator<Item = usize>
            {
                Self(iter.into_iter().collect())
            }
        }

        impl IntoIterator for $name {
            type Item = usize;
            type IntoIter = std::vec::IntoIter<usize>;

            fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a usize;
            type IntoIter = std::slice::Iter<'a, usize>;

            fn into_iter(self) -> Self::IntoIter { self.0.iter() }
        }
    }
}
impl_state_vec!(ModeState);
impl_state_vec!(ParticleState);

/* conversions ****************************************************************/

/// Convert a particle-basis state to the mode basis over `num_modes` modes.
///
/// Fails with [`BosonError::InvalidStateVector`] if any particle sits in a mode
/// `>= num_modes`.
pub fn particle_state_to_mode_state(
    particle_state: &[usize],
    num_modes: usize,
) -> BosonResult<ModeState>
{
    let mut modes: Vec<usize> = vec![0; num_modes];
    for &p in particle_state.iter() {
        let count
            = modes.get_mut(p)
            .ok_or(BosonError::InvalidStateVector { index: p, num_modes })?;
        *count += 1;
    }
    Ok(ModeState(modes))
}

/// Convert a mode-basis state to the particle basis, given that it holds
/// `num_particles` particles.
///
/// Modes are visited in ascending order and each mode's particles are emitted
/// contiguously. Fails with [`BosonError::ConfigurationInconsistency`] if the
/// occupation numbers don't sum to `num_particles`.
pub fn mode_state_to_particle_state(
    mode_state: &[usize],
    num_particles: usize,
) -> BosonResult<ParticleState>
{
    let found: usize = mode_state.iter().sum();
    if found != num_particles {
        return Err(BosonError::ConfigurationInconsistency {
            expected: num_particles,
            found,
        });
    }
    Ok(expand_modes(mode_state))
}

fn expand_modes(mode_state: &[usize]) -> ParticleState {
    mode_state.iter()
        .enumerate()
        .flat_map(|(k, &occ)| std::iter::repeat(k).take(occ))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn particles_to_modes() {
        let modes = particle_state_to_mode_state(&[2, 0, 2, 3], 5).unwrap();
        assert_eq!(modes, ModeState::from([1, 0, 2, 1, 0]));
        assert_eq!(modes.num_modes(), 5);
        assert_eq!(modes.num_particles(), 4);
    }

    #[test]
    fn particles_to_modes_out_of_range() {
        assert_eq!(
            particle_state_to_mode_state(&[0, 3], 3),
            Err(BosonError::InvalidStateVector { index: 3, num_modes: 3 }),
        );
    }

    #[test]
    fn modes_to_particles_ordering() {
        let particles = mode_state_to_particle_state(&[0, 2, 0, 1], 3).unwrap();
        assert_eq!(particles, ParticleState::from([1, 1, 3]));
    }

    #[test]
    fn modes_to_particles_wrong_count() {
        assert_eq!(
            mode_state_to_particle_state(&[1, 1], 3),
            Err(BosonError::ConfigurationInconsistency { expected: 3, found: 2 }),
        );
    }

    #[test]
    fn round_trip() {
        let states: [&[usize]; 5] = [
            &[0, 0, 0],
            &[3, 0, 0],
            &[1, 1, 1],
            &[0, 4, 0, 2],
            &[2],
        ];
        for s in states.into_iter() {
            let n: usize = s.iter().sum();
            let particles = mode_state_to_particle_state(s, n).unwrap();
            assert_eq!(particles.num_particles(), n);
            let back = particle_state_to_mode_state(&particles, s.len()).unwrap();
            assert_eq!(back.as_ref(), s);
        }
    }

    #[test]
    fn round_trip_unordered_particles() {
        let particles = [3, 0, 1, 0];
        let modes = particle_state_to_mode_state(&particles, 4).unwrap();
        let back = mode_state_to_particle_state(&modes, 4).unwrap();
        assert_eq!(back, ParticleState::from([0, 0, 1, 3]));
        let mut sorted = particles;
        sorted.sort_unstable();
        assert_eq!(back.as_ref(), &sorted);
    }

    #[test]
    fn ket_display() {
        assert_eq!(ModeState::from([1, 0, 2]).to_string(), "∣1,0,2⟩");
        assert_eq!(ModeState::vacuum(2).to_string(), "∣0,0⟩");
    }
}
