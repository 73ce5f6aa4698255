//! Tools for simulating photonic circuits in the Fock (photon-number) basis.
//!
//! A program injects photons into a register of optical modes, sends them
//! through a network of passive linear-optical elements (phase shifters, beam
//! splitters, Mach-Zehnder interferometers), and counts the photons leaving
//! each mode. The network is reduced to a single *N* × *N* transfer matrix
//! *U*, and the probability of each detection pattern is obtained from the
//! permanent of a submatrix of *U* selected by the input and output
//! occupations, as in boson sampling.
//!
//! # Example
//! ```
//! use photonic_sim::{
//!     config::RunConfig,
//!     gate::{ FockGate, FockMeasure, Operation },
//!     program::{ CircuitLine, CircuitProgram },
//!     simulator::run,
//! };
//!
//! let mut program = CircuitProgram::new([0, 1]);
//! program
//!     .push(CircuitLine::new(Operation::PhotonicFockGate(FockGate::AP), [0], [1.0]))
//!     .push(CircuitLine::new(Operation::PhotonicFockGate(FockGate::BS), [0, 1], [0.5]))
//!     .push(CircuitLine::new(
//!         Operation::PhotonicFockMeasure(FockMeasure { cutoff: 1 }), [0, 1], []));
//!
//! let config = RunConfig::new("dense", "matmul", 1000).unwrap().with_seed(0);
//! let result = run(&program, &config).unwrap();
//! // roughly half the photons in each output mode
//! println!("{:?}", result.counts); // {"01": ~500, "10": ~500}
//! ```

pub mod error;
pub mod subset;
pub mod permanent;
pub mod state;
pub mod submatrix;
pub mod gate;
pub mod program;
pub mod register;
pub mod config;
pub mod measure;
pub mod circuit;
pub mod simulator;

pub use error::{ Error, Result };
