//! Extraction of the photon-pattern submatrix *U*<sub>st</sub> of a
//! multi-mode transform.
//!
//! The transition amplitude between Fock states *s* and *t* under a linear
//! optical transform *U* is proportional to the permanent of the *k* × *k*
//! matrix formed by repeating mode indices according to their occupations.
//! Row `i` of *U*<sub>st</sub> follows the `i`-th photon of the input, column
//! `j` the `j`-th photon of the output, and the entry is taken from
//! `U[out_j, in_i]`, i.e. *U* is read with output modes along its rows.

use nalgebra as na;
use num_complex::Complex64 as C64;
use crate::state::OccupationVector;

/// Expand an occupation vector into a list of mode indices, with mode `i`
/// repeated `occ[i]` times, in ascending mode order.
pub fn expand_indices(occ: &OccupationVector) -> Vec<usize> {
    occ.0.iter()
        .enumerate()
        .flat_map(|(mode, n)| std::iter::repeat(mode).take(*n))
        .collect()
}

/// Build *U*<sub>st</sub> for the input state `input` and output state
/// `output`.
///
/// Returns `None` if the two states carry different photon numbers, in which
/// case they are orthogonal and the transition amplitude is zero.
///
/// *Panics if either state addresses a mode outside of `u`.*
pub fn submatrix(
    u: &na::DMatrix<C64>,
    input: &OccupationVector,
    output: &OccupationVector,
) -> Option<na::DMatrix<C64>>
{
    let rows = expand_indices(input);
    let cols = expand_indices(output);
    (rows.len() == cols.len())
        .then(|| {
            let k = rows.len();
            na::DMatrix::from_fn(k, k, |i, j| u[(cols[j], rows[i])])
        })
}
