//! Drivers for evaluating photonic programs.
//!
//! A program is classified once, up front, as belonging to either the Gaussian
//! or the Fock model; the matching [`CircuitEvaluator`] is then built and fed
//! the program line by line. Only the Fock model is implemented here.

use std::collections::BTreeMap;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::{ rngs::StdRng, SeedableRng };
use tracing::{ debug, warn };
use crate::{
    config::{ Algorithm, RunConfig },
    error::{ Error, Result },
    gate::{ FockGate, FockMeasure, Operation },
    measure::{ output_distribution, sample_counts },
    program::{ CircuitLine, CircuitProgram },
    register::ModeRegister,
    state::OccupationVector,
};

/// Measurement counts, keyed by outcome label.
pub type Counts = BTreeMap<String, usize>;

/// Shared interface of the per-model evaluators.
pub trait CircuitEvaluator {
    /// Process a single line of a program.
    ///
    /// Returns the measurement counts if `line` completed the evaluation.
    fn step(&mut self, line: &CircuitLine) -> Result<Option<Counts>>;

    /// Process every line of `program` in order, returning the counts of its
    /// measurement.
    ///
    /// Fails with [`Error::MissingMeasurement`] if the program never measures.
    fn evaluate(&mut self, program: &CircuitProgram) -> Result<Counts> {
        let mut counts: Option<Counts> = None;
        for line in program.circuit.iter() {
            if let Some(c) = self.step(line)? { counts = Some(c); }
        }
        counts.ok_or(Error::MissingMeasurement)
    }
}

/// Progress of a [`FockEvaluator`] through its program.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EvalState {
    /// No operation processed yet.
    Idle,
    /// Photons are being injected and gates composed.
    Accumulating,
    /// A measurement is being sampled.
    Measured,
    /// The measurement has produced its counts; later lines are ignored.
    Done,
}

/// Evaluator for Fock-model programs.
///
/// Photon injections build up the input state, passive gates are composed
/// into a single global transfer matrix, and the photon-count measurement
/// samples the output distribution of the input state under that transform.
#[derive(Clone, Debug)]
pub struct FockEvaluator {
    register: ModeRegister,
    algorithm: Algorithm,
    shots: usize,
    max_photons: usize,
    input: OccupationVector,
    unitary: na::DMatrix<C64>,
    state: EvalState,
    rng: StdRng,
}

impl FockEvaluator {
    /// Create a new evaluator over the modes of `register`, with the input
    /// state initialized to vacuum and the global transform to the identity.
    pub fn new(register: ModeRegister, config: &RunConfig) -> Self {
        let n = register.num_modes();
        let rng
            = config.seed.map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_entropy);
        Self {
            register,
            algorithm: config.algorithm,
            shots: config.shots,
            max_photons: config.max_photons,
            input: OccupationVector::vacuum(n),
            unitary: na::DMatrix::identity(n, n),
            state: EvalState::Idle,
            rng,
        }
    }

    /// Return the current state of evaluation.
    pub fn state(&self) -> EvalState { self.state }

    /// Return the input Fock state built so far.
    pub fn input_state(&self) -> &OccupationVector { &self.input }

    /// Return the global transfer matrix composed so far.
    pub fn unitary(&self) -> &na::DMatrix<C64> { &self.unitary }

    fn apply_gate(&mut self, gate: FockGate, modes: &[usize], args: &[f64])
        -> Result<()>
    {
        gate.check_arity(modes, args)?;
        if gate.is_passive() {
            let block = gate.matrix(args)?;
            let total = std::mem::replace(&mut self.unitary, na::DMatrix::zeros(0, 0));
            self.unitary = self.algorithm.compose(total, &block, modes)?;
        } else {
            let photons = FockGate::photon_number(args)?;
            self.input.add_photons(modes[0], photons)?;
        }
        self.state = EvalState::Accumulating;
        Ok(())
    }

    fn measure(&mut self, measure: FockMeasure, modes: &[usize])
        -> Result<Counts>
    {
        if measure.cutoff == 0 {
            return Err(Error::invalid("photon-count cutoff must be at least 1"));
        }
        let photons = self.input.total();
        if photons > self.max_photons {
            return Err(Error::PhotonLimit { photons, limit: self.max_photons });
        }
        self.state = EvalState::Measured;
        let dist = output_distribution(&self.unitary, &self.input, measure.cutoff)?;
        let counts = sample_counts(
            &dist, modes, measure.cutoff, self.shots, &mut self.rng)?;
        self.state = EvalState::Done;
        Ok(counts)
    }
}

impl CircuitEvaluator for FockEvaluator {
    fn step(&mut self, line: &CircuitLine) -> Result<Option<Counts>> {
        if self.state == EvalState::Done {
            warn!(op = %line.op, "ignoring operation after measurement");
            return Ok(None);
        }
        let modes = self.register.modes(&line.qregs)?;
        debug!(op = %line.op, ?modes, args = ?line.args, "fock step");
        match line.op {
            Operation::PhotonicFockGate(gate) => {
                self.apply_gate(gate, &modes, &line.args)?;
                Ok(None)
            },
            Operation::PhotonicFockMeasure(measure) => {
                self.measure(measure, &modes).map(Some)
            },
            op => Err(Error::UnsupportedOperation(op.to_string())),
        }
    }
}
