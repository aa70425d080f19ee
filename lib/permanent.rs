//! Matrix permanents, in general and for boson-sampling transition amplitudes.
//!
//! The permanent of an *n* × *n* matrix *A* is
//! ```text
//! perm(A) = Σ_σ Π_i A[i, σ(i)]
//! ```
//! summed over all permutations σ, i.e. the determinant without alternating
//! signs. It's #P-hard to compute in general.
//!
//! For *n* bosons entering an *m*-mode interferometer *U* in mode-basis state
//! *S* and leaving in state *T*, the transition amplitude is governed by the
//! permanent of the *effective scattering matrix* *U*<sub>*S*,*T*</sub>,
//! formed by repeating the *j*-th row of *U* *S*<sub>*j*</sub> times and the
//! *i*-th column *T*<sub>*i*</sub> times. Rather than building this matrix,
//! [`ChinHuhPermanentCalculator`] evaluates its permanent directly from *U*,
//! *S*, and *T* with the Glynn-type formula of Chin and Huh
//! ([arXiv:1711.03293][chinhuh]):
//! ```text
//! perm(U_{S,T}) = 2^(-n) Σ_v (-1)^|v| Π_j C(S_j, v_j) Π_i ( Σ_j (S_j - 2 v_j) U[j, i] )^T_i
//! ```
//! where each "v-vector" *v* ranges over the full Cartesian product of
//! {0, ..., *S*<sub>*j*</sub>}. The number of terms is
//! Π<sub>*j*</sub> (*S*<sub>*j*</sub> + 1) ≤ 2<sup>*n*</sup>, which beats the
//! *n*! terms of naive expansion whenever the input is bunched.
//!
//! [chinhuh]: https://arxiv.org/abs/1711.03293

use itertools::{ Either, Itertools };
use nalgebra as na;
use crate::{
    enumerate::binomial_f64,
    error::{ BosonError, BosonResult },
    state::ModeState,
};

fn check_square<T>(matrix: &na::DMatrix<T>) -> BosonResult<()> {
    if matrix.nrows() != matrix.ncols() {
        return Err(BosonError::ShapeMismatch {
            what: "matrix columns",
            expected: matrix.nrows(),
            found: matrix.ncols(),
        });
    }
    Ok(())
}

/// Compute the permanent of a square matrix by row expansion.
///
/// Each column is assigned every still-unused row in turn, so the cost is
/// *O*(*n*!) for an *n* × *n* matrix; this is only meant for small matrices or
/// as a reference value. The permanent of the 0 × 0 matrix is 1.
pub fn calculate_permanent<T>(matrix: &na::DMatrix<T>) -> BosonResult<T>
where T: na::ComplexField + Copy
{
    check_square(matrix)?;
    let mut selected: Vec<bool> = vec![false; matrix.nrows()];
    Ok(row_expansion(matrix, 0, &mut selected, na::one()))
}

fn row_expansion<T>(
    matrix: &na::DMatrix<T>,
    column: usize,
    selected: &mut [bool],
    prod: T,
) -> T
where T: na::ComplexField + Copy
{
    if column == matrix.ncols() { return prod; }
    let mut acc: T = na::zero();
    for row in 0..matrix.nrows() {
        if selected[row] { continue; }
        selected[row] = true;
        acc += row_expansion(
            matrix, column + 1, selected, prod * matrix[(row, column)]);
        selected[row] = false;
    }
    acc
}

// shared by the effective-matrix routines; must run before any arithmetic
fn check_transition<T>(
    matrix: &na::DMatrix<T>,
    input_state: &[usize],
    output_state: &[usize],
) -> BosonResult<()>
{
    check_square(matrix)?;
    if input_state.len() != matrix.nrows() {
        return Err(BosonError::ShapeMismatch {
            what: "input state",
            expected: matrix.nrows(),
            found: input_state.len(),
        });
    }
    if output_state.len() != input_state.len() {
        return Err(BosonError::ShapeMismatch {
            what: "output state",
            expected: input_state.len(),
            found: output_state.len(),
        });
    }
    let n_in: usize = input_state.iter().sum();
    let n_out: usize = output_state.iter().sum();
    if n_in != n_out {
        return Err(BosonError::ConfigurationInconsistency {
            expected: n_in,
            found: n_out,
        });
    }
    Ok(())
}

/// Explicitly construct the effective scattering matrix for a transition from
/// `input_state` to `output_state`.
///
/// Entry (*r*, *c*) is `matrix[(j, i)]`, where *j* is the mode of the *r*-th
/// input particle and *i* is the mode of the *c*-th output particle (both in
/// the particle basis). Fails under the same conditions as
/// [`ChinHuhPermanentCalculator::new`].
pub fn effective_scattering_matrix<T>(
    matrix: &na::DMatrix<T>,
    input_state: &[usize],
    output_state: &[usize],
) -> BosonResult<na::DMatrix<T>>
where T: na::ComplexField + Copy
{
    check_transition(matrix, input_state, output_state)?;
    let rows = ModeState::from(input_state.to_vec()).to_particle_state();
    let cols = ModeState::from(output_state.to_vec()).to_particle_state();
    Ok(na::DMatrix::from_fn(
        rows.len(),
        cols.len(),
        |r, c| matrix[(rows[r], cols[c])],
    ))
}

/// Iterate over all v-vectors for an input state: every vector `v` of the
/// same length with `0 <= v[j] <= input_state[j]`.
///
/// Vectors are produced in lexicographic order. An empty input state has
/// exactly one (empty) v-vector.
pub fn v_vectors(input_state: &[usize])
    -> impl Iterator<Item = Vec<usize>> + '_
{
    if input_state.is_empty() {
        Either::Left(std::iter::once(Vec::new()))
    } else {
        Either::Right(
            input_state.iter()
                .map(|&s| 0..=s)
                .multi_cartesian_product()
        )
    }
}

/// Evaluates the permanent of an effective scattering matrix without
/// constructing it.
///
/// All fields are fixed at construction, which validates them; a calculator
/// holds no intermediate results, so separate calculators (or repeated calls
/// on one) never interact.
#[derive(Copy, Clone, Debug)]
pub struct ChinHuhPermanentCalculator<'a, T>
where T: na::ComplexField + Copy
{
    matrix: &'a na::DMatrix<T>,
    input_state: &'a [usize],
    output_state: &'a [usize],
}

impl<'a, T> ChinHuhPermanentCalculator<'a, T>
where T: na::ComplexField + Copy
{
    /// Create a new calculator for the transition `input_state` →
    /// `output_state` through the `m` × `m` interferometer `matrix`.
    ///
    /// Fails with [`BosonError::ShapeMismatch`] if `matrix` isn't square or
    /// either state doesn't have length `m`, and with
    /// [`BosonError::ConfigurationInconsistency`] if the two states hold
    /// different numbers of particles.
    pub fn new(
        matrix: &'a na::DMatrix<T>,
        input_state: &'a [usize],
        output_state: &'a [usize],
    ) -> BosonResult<Self>
    {
        check_transition(matrix, input_state, output_state)?;
        Ok(Self { matrix, input_state, output_state })
    }

    pub fn matrix(&self) -> &'a na::DMatrix<T> { self.matrix }

    pub fn input_state(&self) -> &'a [usize] { self.input_state }

    pub fn output_state(&self) -> &'a [usize] { self.output_state }

    /// Compute the permanent.
    ///
    /// Note that the result is a general element of `T`; negative (or
    /// complex) values are expected.
    pub fn permanent(&self) -> T {
        let n: usize = self.input_state.iter().sum();
        let total: T
            = v_vectors(self.input_state)
            .fold(na::zero(), |acc: T, v| acc + self.addend(&v));
        total / na::convert::<f64, T>(2.0_f64.powi(n as i32))
    }

    fn addend(&self, v: &[usize]) -> T {
        let sign: f64 = if v.iter().sum::<usize>() % 2 == 0 { 1.0 } else { -1.0 };
        let binoms: f64
            = self.input_state.iter().zip(v)
            .map(|(&s, &vj)| binomial_f64(s, vj))
            .product();
        let mut product: T = na::one();
        for (i, &t) in self.output_state.iter().enumerate() {
            // contributes a factor of 1
            if t == 0 { continue; }
            let part: T
                = self.input_state.iter().zip(v)
                .enumerate()
                .fold(na::zero(), |acc: T, (j, (&s, &vj))| {
                    let weight = s as f64 - 2.0 * vj as f64;
                    acc + self.matrix[(j, i)] * na::convert::<f64, T>(weight)
                });
            product *= part.powi(t as i32);
        }
        product * na::convert::<f64, T>(sign * binoms)
    }
}

/// Compute the permanent of the effective scattering matrix for a transition
/// from `input_state` to `output_state`.
///
/// Shorthand for [`ChinHuhPermanentCalculator::new`] followed by
/// [`ChinHuhPermanentCalculator::permanent`].
pub fn calculate_effective_scattering_matrix_permanent<T>(
    matrix: &na::DMatrix<T>,
    input_state: &[usize],
    output_state: &[usize],
) -> BosonResult<T>
where T: na::ComplexField + Copy
{
    ChinHuhPermanentCalculator::new(matrix, input_state, output_state)
        .map(|calc| calc.permanent())
}
