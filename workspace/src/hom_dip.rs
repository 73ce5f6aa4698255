//! Sweep the transmissivity of a beam splitter fed with one photon in each
//! input mode and record the coincidence rate, tracing out the Hong-Ou-Mandel
//! dip at t = 1/2.

use std::path::PathBuf;
use ndarray as nd;
use photonic_sim::{
    config::RunConfig,
    gate::{ FockGate, FockMeasure, Operation },
    program::{ CircuitLine, CircuitProgram },
    simulator::run,
};
use rayon::prelude::*;
use tracing::{ error, info };

fn hom_program(t: f64) -> CircuitProgram {
    let mut program = CircuitProgram::new([0, 1]);
    program
        .push(CircuitLine::new(
            Operation::PhotonicFockGate(FockGate::AP), [0], [1.0]))
        .push(CircuitLine::new(
            Operation::PhotonicFockGate(FockGate::AP), [1], [1.0]))
        .push(CircuitLine::new(
            Operation::PhotonicFockGate(FockGate::BS), [0, 1], [t]))
        .push(CircuitLine::new(
            Operation::PhotonicFockMeasure(FockMeasure { cutoff: 2 }), [0, 1], []));
    program
}

fn coincidence_rate(t: f64, seed: u64) -> photonic_sim::Result<f64> {
    let config = RunConfig::new("dense", "einsum", SHOTS)?.with_seed(seed);
    let result = run(&hom_program(t), &config)?;
    let coinc = result.counts.get("11").copied().unwrap_or(0);
    Ok(coinc as f64 / SHOTS as f64)
}

const SHOTS: usize = 4096;

fn sweep(t: &[f64]) -> photonic_sim::Result<Vec<f64>> {
    t.to_vec().into_par_iter()
        .enumerate()
        .map(|(k, tk)| coincidence_rate(tk, k as u64))
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .with_target(false)
        .init();

    let outdir = PathBuf::from("output");
    if let Err(e) = std::fs::create_dir_all(&outdir) {
        error!("could not create {}: {}", outdir.display(), e);
        std::process::exit(1);
    }

    let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 41);
    let rates = match sweep(&t.to_vec()) {
        Ok(r) => r,
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        },
    };
    let ideal: nd::Array1<f64> = t.mapv(|tk| (2.0 * tk - 1.0).powi(2));

    for ((tk, rk), ik) in t.iter().zip(rates.iter()).zip(ideal.iter()) {
        println!("t = {:.3}  P(1,1) = {:.4}  (ideal {:.4})", tk, rk, ik);
    }

    let data = serde_json::json!({
        "transmissivity": t.to_vec(),
        "coincidence": rates,
        "ideal": ideal.to_vec(),
        "shots": SHOTS,
    });
    let path = outdir.join("hom_dip.json");
    match std::fs::write(&path, data.to_string()) {
        Ok(()) => info!("wrote {}", path.display()),
        Err(e) => {
            error!("could not write {}: {}", path.display(), e);
            std::process::exit(1);
        },
    }
}
