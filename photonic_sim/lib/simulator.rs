//! Top-level entry point: validate a program, evaluate it, and package the
//! outcome with run bookkeeping.

use chrono::{ SecondsFormat, Utc };
use serde::Serialize;
use tracing::info;
use crate::{
    circuit::{ CircuitEvaluator, Counts, FockEvaluator },
    config::RunConfig,
    error::{ Error, Result },
    gate::Model,
    program::CircuitProgram,
    register::{ Ancilla, ModeRegister },
};

/// Output of a single run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotonicResult {
    pub start_time_utc: String,
    pub end_time_utc: String,
    pub shots: usize,
    /// Number of times each outcome label was observed.
    pub counts: Counts,
    pub ancilla: Ancilla,
}

impl PhotonicResult {
    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Return the current UTC time in ISO-8601 format with millisecond precision
/// and a `Z` suffix.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Simulate `program` under `config`.
///
/// The program is classified and its registers resolved before any numeric
/// work; a program mixing models or using undeclared registers produces no
/// partial result.
pub fn run(program: &CircuitProgram, config: &RunConfig) -> Result<PhotonicResult> {
    let model = program.classify()?;
    let register = ModeRegister::new(&program.using_qregs)?;
    for line in program.circuit.iter() {
        register.modes(&line.qregs)?;
    }
    let ancilla = Ancilla::from_program(program);
    info!(
        %model,
        modes = register.num_modes(),
        lines = program.circuit.len(),
        shots = config.shots,
        algorithm = %config.algorithm,
        "starting simulation",
    );

    let start_time_utc = timestamp();
    let counts = match model {
        Model::Fock => FockEvaluator::new(register, config).evaluate(program)?,
        Model::Gaussian => {
            let first = program.circuit.first().ok_or(Error::MissingMeasurement)?;
            return Err(Error::UnsupportedOperation(first.op.to_string()));
        },
    };
    let end_time_utc = timestamp();
    info!(outcomes = counts.len(), "simulation finished");

    Ok(PhotonicResult {
        start_time_utc,
        end_time_utc,
        shots: config.shots,
        counts,
        ancilla,
    })
}
