//! Run a photonic program in the Fock basis and print its measurement counts
//! as JSON.
//!
//! ```bash
//! cargo run --bin simulate -- --shots 1024
//! cargo run --bin simulate -- --shots 1024 -a einsum --input-file prog.json
//! ```

use std::path::PathBuf;
use clap::Parser;
use photonic_sim::{
    config::{ RunConfig, DEFAULT_MAX_PHOTONS },
    gate::{ FockGate, FockMeasure, Operation },
    program::{ CircuitLine, CircuitProgram },
    simulator::{ run, PhotonicResult },
    Result,
};
use tracing::{ error, info };

#[derive(Parser, Debug)]
#[command(name = "simulate", version, about = "Fock-basis photonic circuit simulator")]
struct Args {
    /// Matrix representation of the global transform.
    #[arg(long = "mt", default_value = "dense")]
    matrix_type: String,

    /// Composition algorithm (matmul or einsum).
    #[arg(short, long, default_value = "matmul")]
    algorithm: String,

    /// Number of measurement samples.
    #[arg(long)]
    shots: usize,

    /// JSON program to run; a built-in beam-splitter program is used if absent.
    #[arg(long, value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Seed for the sampling RNG.
    #[arg(long)]
    seed: Option<u64>,

    /// Reject input states with more photons than this.
    #[arg(long, default_value_t = DEFAULT_MAX_PHOTONS)]
    max_photons: usize,

    /// Write the result here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

// one photon through a balanced beam splitter
fn default_program() -> CircuitProgram {
    let mut program = CircuitProgram::new([0, 1]);
    program
        .push(CircuitLine::new(
            Operation::PhotonicFockGate(FockGate::AP), [0], [1.0]))
        .push(CircuitLine::new(
            Operation::PhotonicFockGate(FockGate::BS), [0, 1], [0.5]))
        .push(
            CircuitLine::new(
                Operation::PhotonicFockMeasure(FockMeasure { cutoff: 1 }),
                [0, 1],
                [],
            )
            .with_cregs([0, 1])
        );
    program
}

fn simulate(args: &Args) -> Result<PhotonicResult> {
    let mut config
        = RunConfig::new(&args.matrix_type, &args.algorithm, args.shots)?
        .with_max_photons(args.max_photons);
    if let Some(seed) = args.seed { config = config.with_seed(seed); }

    let program = match args.input_file.as_deref() {
        Some(path) => {
            info!("loading program from {}", path.display());
            CircuitProgram::from_file(path)?
        },
        None => default_program(),
    };
    run(&program, &config)
}

fn write_result(result: &PhotonicResult, output: Option<&std::path::Path>)
    -> Result<()>
{
    let json = result.to_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("wrote counts to {}", path.display());
        },
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_level_filter
        = args.log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);
    tracing_subscriber::fmt()
        .with_max_level(log_level_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome
        = simulate(&args)
        .and_then(|result| write_result(&result, args.output.as_deref()));
    if let Err(e) = outcome {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}
