//! Fock basis states of a register of optical modes.

use std::fmt;
use crate::error::{ Error, Result };

/// A Fock basis state, identified by the number of photons in each mode.
///
/// Entry `i` is the occupation of mode `i`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OccupationVector(pub Vec<usize>);

impl From<Vec<usize>> for OccupationVector {
    fn from(occ: Vec<usize>) -> Self { Self(occ) }
}

impl AsRef<[usize]> for OccupationVector {
    fn as_ref(&self) -> &[usize] { &self.0 }
}

impl OccupationVector {
    /// Create the vacuum state on `n` modes.
    pub fn vacuum(n: usize) -> Self { Self(vec![0; n]) }

    /// Return the number of modes.
    pub fn num_modes(&self) -> usize { self.0.len() }

    /// Return the total photon number.
    pub fn total(&self) -> usize { self.0.iter().sum() }

    /// Return `true` if no mode is occupied.
    pub fn is_vacuum(&self) -> bool { self.0.iter().all(|n| *n == 0) }

    /// Return the occupation of mode `k`, if it exists.
    pub fn get(&self, k: usize) -> Option<usize> { self.0.get(k).copied() }

    /// Add `photons` photons to mode `k`.
    pub fn add_photons(&mut self, k: usize, photons: usize) -> Result<&mut Self> {
        let n = self.num_modes();
        let occ = self.0.get_mut(k)
            .ok_or_else(|| {
                Error::invalid(format!("mode {} out of range for {} modes", k, n))
            })?;
        *occ += photons;
        Ok(self)
    }

    /// Return Π<sub>*i*</sub> *n*<sub>*i*</sub>!, the normalization of the
    /// state's creation-operator expansion.
    pub fn factorial_product(&self) -> f64 {
        self.0.iter()
            .flat_map(|n| 1..=*n)
            .map(|k| k as f64)
            .product()
    }

    /// Format as an outcome label.
    ///
    /// Occupations are concatenated when `wide` is `false` (every entry must
    /// then be a single digit to stay unambiguous) and comma-separated
    /// otherwise.
    pub fn label(&self, wide: bool) -> String {
        let sep = if wide { "," } else { "" };
        self.0.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(sep)
    }
}

impl fmt::Display for OccupationVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "∣{}⟩", self.label(true))
    }
}
