//! Matrix permanents via Ryser's inclusion–exclusion formula.
//!
//! For an *n* × *n* matrix *U*,
//! ```text
//! perm(U) = (-1)^n Σ_{S ⊆ {0..n-1}, S ≠ ∅} (-1)^|S| Π_i Σ_{j ∈ S} U[i, j]
//! ```
//! which costs *O*(2<sup>*n*</sup> *n*<sup>2</sup>) time. No polynomial
//! algorithm is known, so callers should bound *n*.

use nalgebra as na;
use num_complex::Complex64 as C64;
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use crate::{
    error::{ Error, Result },
    subset::{ mask_indices, Subsets },
};

/// Matrix sizes at or above this are evaluated with [`permanent_par`] by
/// [`permanent_auto`].
pub const PAR_THRESHOLD: usize = 12;

fn check_square(u: &na::DMatrix<C64>) -> Result<usize> {
    let n = u.nrows();
    if u.ncols() != n {
        return Err(Error::invalid(
            format!("permanent of a non-square {}x{} matrix", n, u.ncols())
        ));
    }
    Ok(n)
}

// (-1)^|S| Π_i Σ_{j ∈ S} U[i, j]
fn subset_term<I>(u: &na::DMatrix<C64>, subset: I, size: usize) -> C64
where I: Iterator<Item = usize> + Clone
{
    let prod: C64
        = u.row_iter()
        .map(|row| subset.clone().map(|j| row[(0, j)]).sum::<C64>())
        .product();
    if size % 2 == 0 { prod } else { -prod }
}

fn overall_sign(n: usize, acc: C64) -> C64 {
    if n % 2 == 0 { acc } else { -acc }
}

/// Compute the permanent of a square matrix with Ryser's formula.
///
/// Subsets are visited sequentially in the order produced by [`Subsets`].
/// Fails only if `u` is not square or is empty.
pub fn permanent(u: &na::DMatrix<C64>) -> Result<C64> {
    let n = check_square(u)?;
    let acc: C64
        = Subsets::new(n)?
        .map(|s| {
            let size = s.len();
            subset_term(u, s.into_iter(), size)
        })
        .sum();
    Ok(overall_sign(n, acc))
}

/// Like [`permanent`], but with the subset sum split across threads.
///
/// The reduction is associative up to floating-point rounding, so results
/// agree with [`permanent`] within tolerance but not necessarily bit-for-bit.
pub fn permanent_par(u: &na::DMatrix<C64>) -> Result<C64> {
    let n = check_square(u)?;
    Subsets::new(n)?;
    let acc: C64
        = (1_u64 .. 1_u64 << n).into_par_iter()
        .map(|mask| {
            let size = mask.count_ones() as usize;
            subset_term(u, mask_indices(mask, n), size)
        })
        .reduce(|| C64::from(0.0), |a, b| a + b);
    Ok(overall_sign(n, acc))
}

/// Dispatch to [`permanent`] or [`permanent_par`] depending on the matrix
/// size.
pub fn permanent_auto(u: &na::DMatrix<C64>) -> Result<C64> {
    if u.nrows() >= PAR_THRESHOLD {
        permanent_par(u)
    } else {
        permanent(u)
    }
}
