//! Errors raised while validating and evaluating a photonic program.

use thiserror::Error;
use crate::gate::Model;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A run parameter or operation argument is malformed or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation that the selected model cannot simulate.
    #[error("unsupported operation {0}")]
    UnsupportedOperation(String),

    /// The program contains operations from both physical models.
    #[error("program mixes {first} and {second} operations")]
    ModelMismatch { first: Model, second: Model },

    /// The program never measures anything.
    #[error("program contains no measurement")]
    MissingMeasurement,

    /// The input state carries more photons than the configured ceiling.
    #[error("{photons} photons exceeds the configured limit of {limit}")]
    PhotonLimit { photons: usize, limit: usize },

    /// Every output state below the cutoff has zero probability.
    #[error("no output state with nonzero probability below cutoff {cutoff}")]
    NoOutcomes { cutoff: usize },

    /// A circuit line targets a register absent from `usingQRegList`.
    #[error("register q[{0}] is used but not declared")]
    UndeclaredRegister(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code reported for this kind of error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(..) => 2,
            Self::UnsupportedOperation(..) => 3,
            Self::ModelMismatch { .. } => 4,
            Self::MissingMeasurement => 5,
            Self::PhotonLimit { .. } => 6,
            Self::NoOutcomes { .. } => 7,
            Self::UndeclaredRegister(..) => 8,
            Self::Io(..) => 9,
            Self::Json(..) => 10,
        }
    }

    pub(crate) fn invalid<S>(msg: S) -> Self
    where S: Into<String>
    {
        Self::InvalidArgument(msg.into())
    }
}
