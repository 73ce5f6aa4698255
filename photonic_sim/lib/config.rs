//! Run parameters, validated before any simulation begins.

use std::{ fmt, str::FromStr };
use nalgebra as na;
use num_complex::Complex64 as C64;
use serde::Serialize;
use crate::error::{ Error, Result };

/// Largest number of shots accepted in a single run.
pub const MAX_SHOTS: usize = 65536;

/// Default ceiling on the number of photons in the input state.
pub const DEFAULT_MAX_PHOTONS: usize = 12;

/// Representation of the global transfer matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MatrixType {
    Dense,
}

impl FromStr for MatrixType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dense" => Ok(Self::Dense),
            _ => Err(Error::invalid(format!("invalid matrix type '{}'", s))),
        }
    }
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dense => write!(f, "dense"),
        }
    }
}

/// Strategy for composing a gate's transfer matrix into the global transform.
///
/// Both strategies compute `G' · U`, where `G'` is the gate block `G` acting
/// on its target modes and the identity elsewhere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    /// Embed the block into a full-size matrix and multiply.
    Matmul,
    /// Contract the block's column index against the targeted rows of `U`,
    /// leaving all other rows untouched.
    Einsum,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "matmul" => Ok(Self::Matmul),
            "einsum" => Ok(Self::Einsum),
            _ => Err(Error::invalid(format!("invalid algorithm '{}'", s))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matmul => write!(f, "matmul"),
            Self::Einsum => write!(f, "einsum"),
        }
    }
}

impl Algorithm {
    /// Apply `block`, acting on `modes`, after the transform `total`, returning
    /// the updated transform.
    ///
    /// `block` must be `modes.len()` × `modes.len()` and every entry of `modes`
    /// must index a distinct mode of `total`.
    pub fn compose(
        &self,
        total: na::DMatrix<C64>,
        block: &na::DMatrix<C64>,
        modes: &[usize],
    ) -> Result<na::DMatrix<C64>>
    {
        let n = total.nrows();
        let k = modes.len();
        if block.shape() != (k, k) {
            return Err(Error::invalid(format!(
                "{}x{} gate block cannot act on {} mode(s)",
                block.nrows(), block.ncols(), k,
            )));
        }
        if let Some(m) = modes.iter().find(|m| **m >= n) {
            return Err(Error::invalid(
                format!("mode {} out of range for {} modes", m, n)
            ));
        }
        match self {
            Self::Matmul => Ok(compose_matmul(total, block, modes)),
            Self::Einsum => Ok(compose_einsum(total, block, modes)),
        }
    }
}

fn compose_matmul(
    total: na::DMatrix<C64>,
    block: &na::DMatrix<C64>,
    modes: &[usize],
) -> na::DMatrix<C64>
{
    let n = total.nrows();
    let mut full: na::DMatrix<C64> = na::DMatrix::identity(n, n);
    for (a, ma) in modes.iter().enumerate() {
        for (b, mb) in modes.iter().enumerate() {
            full[(*ma, *mb)] = block[(a, b)];
        }
    }
    full * total
}

// U'[m_a, c] = Σ_b G[a, b] U[m_b, c]
fn compose_einsum(
    mut total: na::DMatrix<C64>,
    block: &na::DMatrix<C64>,
    modes: &[usize],
) -> na::DMatrix<C64>
{
    let rows: Vec<Vec<C64>>
        = modes.iter()
        .map(|m| total.row(*m).iter().copied().collect())
        .collect();
    for (a, ma) in modes.iter().enumerate() {
        for c in 0..total.ncols() {
            total[(*ma, c)]
                = rows.iter()
                .enumerate()
                .map(|(b, row_b)| block[(a, b)] * row_b[c])
                .sum();
        }
    }
    total
}

/// Validated parameters for a single run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub matrix_type: MatrixType,
    pub algorithm: Algorithm,
    pub shots: usize,
    /// Runs whose input state holds more photons than this are rejected.
    pub max_photons: usize,
    /// Seed for the sampling RNG; drawn from entropy if `None`.
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Parse and validate run parameters.
    ///
    /// Fails with [`Error::InvalidArgument`] on an unknown matrix type or
    /// algorithm, or if `shots` is not in `1..=MAX_SHOTS`.
    pub fn new(matrix_type: &str, algorithm: &str, shots: usize) -> Result<Self> {
        let matrix_type: MatrixType = matrix_type.parse()?;
        let algorithm: Algorithm = algorithm.parse()?;
        Self::from_parts(matrix_type, algorithm, shots)
    }

    /// Like [`Self::new`], but from already-parsed selectors.
    pub fn from_parts(matrix_type: MatrixType, algorithm: Algorithm, shots: usize)
        -> Result<Self>
    {
        if !(1..=MAX_SHOTS).contains(&shots) {
            return Err(Error::invalid(format!(
                "invalid shots {}, should be in [1, {}]", shots, MAX_SHOTS,
            )));
        }
        Ok(Self {
            matrix_type,
            algorithm,
            shots,
            max_photons: DEFAULT_MAX_PHOTONS,
            seed: None,
        })
    }

    /// Seed the sampling RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the photon-number ceiling.
    pub fn with_max_photons(mut self, max_photons: usize) -> Self {
        self.max_photons = max_photons;
        self
    }
}
