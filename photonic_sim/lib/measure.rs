//! Photon-count measurement of a Fock state sent through a linear-optical
//! transform.
//!
//! For input *s* and output *t* with equal photon numbers *k*, the transition
//! probability is
//! ```text
//! P(t | s) = |perm(U_st)|² / (Π_i s_i! Π_j t_j!)
//! ```
//! where *U*<sub>st</sub> is built by [`submatrix`]. Outputs are enumerated
//! over every occupation vector with the input's photon total and at most
//! `cutoff` photons per mode.

use std::collections::BTreeMap;
use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::{ distributions::{ Distribution, WeightedIndex }, Rng };
use rustc_hash::FxHashMap;
use tracing::debug;
use crate::{
    error::{ Error, Result },
    permanent::permanent_auto,
    state::OccupationVector,
    submatrix::submatrix,
};

/// Probabilities below this are dropped from output distributions.
pub const PROB_EPS: f64 = 1e-12;

/// Compute the permanent of *U*<sub>st</sub>, the unnormalized transition
/// amplitude from `input` to `output`.
///
/// States with different photon numbers are orthogonal and give zero; two
/// vacuum states give one.
pub fn transition_amplitude(
    u: &na::DMatrix<C64>,
    input: &OccupationVector,
    output: &OccupationVector,
) -> Result<C64>
{
    match submatrix(u, input, output) {
        None => Ok(C64::from(0.0)),
        Some(u_st) if u_st.nrows() == 0 => Ok(C64::from(1.0)),
        Some(u_st) => permanent_auto(&u_st),
    }
}

/// Compute the probability of detecting `output` given `input`.
pub fn transition_probability(
    u: &na::DMatrix<C64>,
    input: &OccupationVector,
    output: &OccupationVector,
) -> Result<f64>
{
    let amp = transition_amplitude(u, input, output)?;
    Ok(amp.norm_sqr() / (input.factorial_product() * output.factorial_product()))
}

/// Enumerate, in lexicographic order, all output states on `num_modes` modes
/// holding exactly `photons` photons with at most `cutoff` in any single mode.
///
/// Each state is built from a multiset of `photons` mode indices, so only
/// C(num_modes + photons - 1, photons) states are visited.
pub fn candidate_outputs(num_modes: usize, cutoff: usize, photons: usize)
    -> impl Iterator<Item = OccupationVector>
{
    let mut outputs: Vec<OccupationVector>
        = (0..num_modes)
        .combinations_with_replacement(photons)
        .map(|targets| {
            let mut occ = vec![0; num_modes];
            targets.into_iter().for_each(|m| { occ[m] += 1; });
            OccupationVector::from(occ)
        })
        .filter(|occ| occ.0.iter().all(|n| *n <= cutoff))
        .collect();
    outputs.sort_unstable();
    outputs.into_iter()
}

/// Compute the distribution over output states of `input` sent through `u`,
/// truncated at `cutoff` photons per mode.
///
/// Outcomes with probability below [`PROB_EPS`] are omitted; the remainder
/// are listed in lexicographic order and are not renormalized.
pub fn output_distribution(
    u: &na::DMatrix<C64>,
    input: &OccupationVector,
    cutoff: usize,
) -> Result<Vec<(OccupationVector, f64)>>
{
    let n = u.nrows();
    if n == 0 || input.num_modes() != n {
        return Err(Error::invalid(format!(
            "{}-mode input state cannot be measured through a {}x{} transform",
            input.num_modes(), n, u.ncols(),
        )));
    }
    if input.is_vacuum() {
        return Ok(vec![(OccupationVector::vacuum(n), 1.0)]);
    }
    let photons = input.total();
    let mut dist: Vec<(OccupationVector, f64)> = Vec::new();
    for output in candidate_outputs(n, cutoff, photons) {
        let p = transition_probability(u, input, &output)?;
        if p > PROB_EPS { dist.push((output, p)); }
    }
    debug!(
        photons,
        cutoff,
        outcomes = dist.len(),
        total_prob = dist.iter().map(|(_, p)| *p).sum::<f64>(),
        "computed output distribution",
    );
    Ok(dist)
}

/// Draw `shots` samples from `dist` and tally them.
///
/// Each sampled state is reduced to the occupations of `modes` (or all modes
/// if `modes` is empty) before being labeled. Probabilities are normalized
/// over the entries of `dist`.
pub fn sample_counts<R>(
    dist: &[(OccupationVector, f64)],
    modes: &[usize],
    cutoff: usize,
    shots: usize,
    rng: &mut R,
) -> Result<BTreeMap<String, usize>>
where R: Rng + ?Sized
{
    let sampler
        = WeightedIndex::new(dist.iter().map(|(_, p)| *p))
        .map_err(|_| Error::NoOutcomes { cutoff })?;
    let mut tally: FxHashMap<usize, usize> = FxHashMap::default();
    (0..shots).for_each(|_| { *tally.entry(sampler.sample(rng)).or_insert(0) += 1; });
    let wide = cutoff >= 10;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (idx, count) in tally.into_iter() {
        let label = reduce(&dist[idx].0, modes).label(wide);
        *counts.entry(label).or_insert(0) += count;
    }
    Ok(counts)
}

fn reduce(state: &OccupationVector, modes: &[usize]) -> OccupationVector {
    if modes.is_empty() {
        state.clone()
    } else {
        modes.iter().map(|m| state.get(*m).unwrap_or(0)).collect::<Vec<_>>().into()
    }
}
