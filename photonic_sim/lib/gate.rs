//! Operations appearing in photonic programs, and the transfer matrices of the
//! passive linear-optical gates among them.
//!
//! Every operation belongs to exactly one of two physical models: Gaussian
//! (continuous-variable) or Fock (photon-number). Only Fock operations are
//! simulated by this crate, but Gaussian operations are representable so that
//! whole programs can be classified up front.
//!
//! Transfer matrices act on mode annihilation operators with output modes
//! along rows, so that a gate `G` following a transform `U` composes as
//! `G · U`.

use std::fmt;
use nalgebra as na;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;
use serde::{ Deserialize, Serialize };
use crate::error::{ Error, Result };

/// Physical model to which an operation belongs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    Gaussian,
    Fock,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gaussian => write!(f, "Gaussian"),
            Self::Fock => write!(f, "Fock"),
        }
    }
}

/// Fock-model gates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FockGate {
    /// Add photons to a single mode.
    #[serde(rename = "PhotonicFockAP")]
    AP,
    /// Single-mode phase shift.
    #[serde(rename = "PhotonicFockPHA")]
    PHA,
    /// Two-mode beam splitter, parameterized by its transmissivity.
    #[serde(rename = "PhotonicFockBS")]
    BS,
    /// Two-mode Mach-Zehnder interferometer, parameterized by internal and
    /// external phases.
    #[serde(rename = "PhotonicFockMZ")]
    MZ,
}

impl FockGate {
    /// Number of target modes.
    pub fn num_modes(&self) -> usize {
        match self {
            Self::AP | Self::PHA => 1,
            Self::BS | Self::MZ => 2,
        }
    }

    /// Number of numeric parameters.
    pub fn num_args(&self) -> usize {
        match self {
            Self::AP | Self::PHA | Self::BS => 1,
            Self::MZ => 2,
        }
    }

    /// Return `true` if `self` is a passive linear-optical element, i.e. one
    /// that has a transfer matrix.
    pub fn is_passive(&self) -> bool { !matches!(self, Self::AP) }

    /// Check the number of targets and parameters of a use of this gate.
    pub fn check_arity(&self, modes: &[usize], args: &[f64]) -> Result<()> {
        if modes.len() != self.num_modes() {
            return Err(Error::invalid(format!(
                "{} acts on {} mode(s) but {} were given",
                self, self.num_modes(), modes.len(),
            )));
        }
        if modes.len() == 2 && modes[0] == modes[1] {
            return Err(Error::invalid(format!(
                "{} targets mode {} twice", self, modes[0],
            )));
        }
        if args.len() != self.num_args() {
            return Err(Error::invalid(format!(
                "{} takes {} parameter(s) but {} were given",
                self, self.num_args(), args.len(),
            )));
        }
        Ok(())
    }

    /// Construct the transfer matrix of a passive gate from its parameters.
    ///
    /// Fails for [`FockGate::AP`], which has no transfer matrix, and on
    /// out-of-range parameters.
    pub fn matrix(&self, args: &[f64]) -> Result<na::DMatrix<C64>> {
        match (self, args) {
            (Self::PHA, &[phi]) => Ok(matrices::pha(phi)),
            (Self::BS, &[t]) => matrices::bs(t),
            (Self::MZ, &[phi_in, phi_ex]) => Ok(matrices::mz(phi_in, phi_ex)),
            (Self::AP, _) => Err(Error::invalid("AP has no transfer matrix")),
            _ => Err(Error::invalid(format!(
                "{} takes {} parameter(s) but {} were given",
                self, self.num_args(), args.len(),
            ))),
        }
    }

    /// Interpret the parameters of an [`FockGate::AP`] as a photon number.
    pub fn photon_number(args: &[f64]) -> Result<usize> {
        match args {
            &[n] if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64
                => Ok(n as usize),
            _ => Err(Error::invalid(format!(
                "AP expects one non-negative integer photon number, got {:?}",
                args,
            ))),
        }
    }
}

impl fmt::Display for FockGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AP => write!(f, "PhotonicFockAP"),
            Self::PHA => write!(f, "PhotonicFockPHA"),
            Self::BS => write!(f, "PhotonicFockBS"),
            Self::MZ => write!(f, "PhotonicFockMZ"),
        }
    }
}

/// Fock-model photon-count measurement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FockMeasure {
    /// Maximum number of photons resolved in a single mode.
    pub cutoff: usize,
}

/// Gaussian-model gates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GaussianGate {
    #[serde(rename = "PhotonicGaussianDX")]
    DX,
    #[serde(rename = "PhotonicGaussianDP")]
    DP,
    #[serde(rename = "PhotonicGaussianPHA")]
    PHA,
    #[serde(rename = "PhotonicGaussianBS")]
    BS,
    #[serde(rename = "PhotonicGaussianCZ")]
    CZ,
    #[serde(rename = "PhotonicGaussianCX")]
    CX,
    #[serde(rename = "PhotonicGaussianDIS")]
    DIS,
    #[serde(rename = "PhotonicGaussianSQU")]
    SQU,
    #[serde(rename = "PhotonicGaussianTSQU")]
    TSQU,
    #[serde(rename = "PhotonicGaussianMZ")]
    MZ,
}

/// Gaussian-model measurements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GaussianMeasure {
    Homodyne,
    Heterodyne,
    PhotonCount,
}

/// A single operation in a photonic program.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    PhotonicFockGate(FockGate),
    PhotonicFockMeasure(FockMeasure),
    PhotonicGaussianGate(GaussianGate),
    PhotonicGaussianMeasure(GaussianMeasure),
}

impl Operation {
    /// Serialized tags of all operation kinds.
    pub const TAGS: [&'static str; 4] = [
        "photonicFockGate",
        "photonicFockMeasure",
        "photonicGaussianGate",
        "photonicGaussianMeasure",
    ];

    /// Return the physical model the operation belongs to.
    pub fn model(&self) -> Model {
        match self {
            Self::PhotonicFockGate(_) | Self::PhotonicFockMeasure(_)
                => Model::Fock,
            Self::PhotonicGaussianGate(_) | Self::PhotonicGaussianMeasure(_)
                => Model::Gaussian,
        }
    }

    /// Return `true` if `self` is a measurement.
    pub fn is_measurement(&self) -> bool {
        matches!(
            self,
            Self::PhotonicFockMeasure(_) | Self::PhotonicGaussianMeasure(_)
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhotonicFockGate(g) => write!(f, "{}", g),
            Self::PhotonicFockMeasure(m)
                => write!(f, "PhotonicFockMeasure(cutoff={})", m.cutoff),
            Self::PhotonicGaussianGate(g) => write!(f, "{:?}", g),
            Self::PhotonicGaussianMeasure(m)
                => write!(f, "PhotonicGaussianMeasure({:?})", m),
        }
    }
}

/// Transfer matrices of the passive Fock gates.
pub mod matrices {
    use super::*;

    /// A balanced (50:50) beam splitter.
    pub static BS_HALF: Lazy<na::DMatrix<C64>> =
        Lazy::new(|| {
            let r = std::f64::consts::FRAC_1_SQRT_2;
            na::DMatrix::from_row_slice(2, 2, &[
                C64::from( r), C64::from(r),
                C64::from(-r), C64::from(r),
            ])
        });

    /// Make a phase shifter `[e^{iφ}]`.
    pub fn pha(phi: f64) -> na::DMatrix<C64> {
        na::DMatrix::from_element(1, 1, C64::cis(phi))
    }

    /// Make a beam splitter with transmissivity `t`.
    ///
    /// Fails if `t` is not in `[0, 1]`.
    pub fn bs(t: f64) -> Result<na::DMatrix<C64>> {
        if !(0.0..=1.0).contains(&t) {
            return Err(Error::invalid(format!(
                "beam splitter transmissivity {} is not in [0, 1]", t,
            )));
        }
        let tt = t.sqrt();
        let rr = (1.0 - t).sqrt();
        Ok(
            na::DMatrix::from_row_slice(2, 2, &[
                C64::from( tt), C64::from(rr),
                C64::from(-rr), C64::from(tt),
            ])
        )
    }

    /// Make a Mach-Zehnder interferometer: a phase `phi_ex` on the first mode,
    /// a balanced beam splitter, a phase `phi_in` on the first mode, then a
    /// second balanced beam splitter.
    pub fn mz(phi_in: f64, phi_ex: f64) -> na::DMatrix<C64> {
        let ph = |phi: f64| {
            na::DMatrix::from_row_slice(2, 2, &[
                C64::cis(phi),  C64::from(0.0),
                C64::from(0.0), C64::from(1.0),
            ])
        };
        let bs = Lazy::force(&BS_HALF);
        bs * ph(phi_in) * bs * ph(phi_ex)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_unitary(u: &na::DMatrix<C64>) {
        let n = u.nrows();
        let prod = u * u.adjoint();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(prod[(i, j)].re, expected, epsilon = 1e-12);
                assert_abs_diff_eq!(prod[(i, j)].im, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn gates_are_unitary() {
        assert_unitary(&matrices::pha(0.3));
        for t in [0.0, 0.2, 0.5, 1.0] {
            assert_unitary(&matrices::bs(t).unwrap());
        }
        assert_unitary(&matrices::mz(0.7, -1.1));
        assert_unitary(Lazy::force(&matrices::BS_HALF));
    }

    #[test]
    fn mz_zero_phase_is_swap() {
        // two balanced splitters in sequence route each mode to the other
        let u = matrices::mz(0.0, 0.0);
        assert_abs_diff_eq!(u[(0, 0)].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u[(1, 0)].norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matrices::bs(1.5).is_err());
        assert!(FockGate::BS.matrix(&[0.5, 0.5]).is_err());
        assert!(FockGate::AP.matrix(&[1.0]).is_err());
        assert!(FockGate::photon_number(&[1.5]).is_err());
        assert!(FockGate::photon_number(&[-1.0]).is_err());
        assert_eq!(FockGate::photon_number(&[3.0]).unwrap(), 3);
        assert!(FockGate::BS.check_arity(&[0, 0], &[0.5]).is_err());
        assert!(FockGate::PHA.check_arity(&[0, 1], &[0.5]).is_err());
        assert!(FockGate::MZ.check_arity(&[0, 1], &[0.5, 0.1]).is_ok());
    }

    #[test]
    fn operation_models() {
        let ops = [
            Operation::PhotonicFockGate(FockGate::BS),
            Operation::PhotonicFockMeasure(FockMeasure { cutoff: 2 }),
            Operation::PhotonicGaussianGate(GaussianGate::SQU),
            Operation::PhotonicGaussianMeasure(GaussianMeasure::Homodyne),
        ];
        let models: Vec<Model> = ops.iter().map(Operation::model).collect();
        assert_eq!(
            models,
            vec![Model::Fock, Model::Fock, Model::Gaussian, Model::Gaussian],
        );
        assert!(ops[1].is_measurement());
        assert!(!ops[0].is_measurement());
    }
}
