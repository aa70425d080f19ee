//! Helpers for constructing and checking interferometer matrices.

use std::f64::consts::FRAC_1_SQRT_2;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::Rng;
use rand_distr::StandardNormal;

/// Sample an `m` × `m` unitary matrix from the Haar measure.
///
/// This takes the QR decomposition of a matrix of i.i.d. standard complex
/// normal entries and multiplies each column of *Q* by the phase of the
/// corresponding diagonal element of *R* (see [arXiv:math-ph/0609050][mezzadri]).
///
/// [mezzadri]: https://arxiv.org/abs/math-ph/0609050
pub fn random_unitary<R>(m: usize, rng: &mut R) -> na::DMatrix<C64>
where R: Rng + ?Sized
{
    let z: na::DMatrix<C64>
        = na::DMatrix::from_fn(m, m, |_, _| {
            let re: f64 = rng.sample(StandardNormal);
            let im: f64 = rng.sample(StandardNormal);
            C64::new(re, im) * FRAC_1_SQRT_2
        });
    let qr = z.qr();
    let r = qr.r();
    let mut q = qr.q();
    for (k, mut col) in q.column_iter_mut().enumerate() {
        let d = r[(k, k)];
        let norm = d.norm();
        if norm > 0.0 { col *= d / norm; }
    }
    q
}

/// Return `true` if `matrix` is square and *U*<sup>†</sup>*U* differs from the
/// identity by at most `tol` in Frobenius norm.
pub fn is_unitary(matrix: &na::DMatrix<C64>, tol: f64) -> bool {
    if matrix.nrows() != matrix.ncols() { return false; }
    let eye: na::DMatrix<C64> = na::DMatrix::identity(matrix.nrows(), matrix.ncols());
    (matrix.adjoint() * matrix - eye).norm() <= tol
}
