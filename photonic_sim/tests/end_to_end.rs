use approx::assert_abs_diff_eq;
use photonic_sim::{
    circuit::{ CircuitEvaluator, FockEvaluator },
    config::RunConfig,
    gate::{ FockGate, FockMeasure, Operation },
    program::{ CircuitLine, CircuitProgram },
    register::ModeRegister,
    simulator::run,
    Error,
};

fn gate(gate: FockGate, qregs: &[usize], args: &[f64]) -> CircuitLine {
    CircuitLine::new(
        Operation::PhotonicFockGate(gate),
        qregs.iter().copied(),
        args.iter().copied(),
    )
}

fn count(cutoff: usize, qregs: &[usize]) -> CircuitLine {
    CircuitLine::new(
        Operation::PhotonicFockMeasure(FockMeasure { cutoff }),
        qregs.iter().copied(),
        [],
    )
}

#[test]
fn phase_shift_transmits_single_photon() {
    let mut program = CircuitProgram::new([0]);
    program
        .push(gate(FockGate::AP, &[0], &[1.0]))
        .push(gate(FockGate::PHA, &[0], &[1.234]))
        .push(count(1, &[0]));
    let config = RunConfig::new("dense", "matmul", 10000).unwrap().with_seed(17);
    let result = run(&program, &config).unwrap();
    assert_eq!(result.counts.len(), 1);
    assert_eq!(result.counts["1"], 10000);
}

#[test]
fn balanced_beam_splitter() {
    const SHOTS: usize = 20000;
    for algorithm in ["matmul", "einsum"] {
        let mut program = CircuitProgram::new([0, 1]);
        program
            .push(gate(FockGate::AP, &[0], &[1.0]))
            .push(gate(FockGate::BS, &[0, 1], &[0.5]))
            .push(count(1, &[0, 1]));
        let config = RunConfig::new("dense", algorithm, SHOTS).unwrap().with_seed(4);
        let result = run(&program, &config).unwrap();
        assert_eq!(result.counts.len(), 2);
        assert_eq!(result.counts.values().sum::<usize>(), SHOTS);
        for label in ["10", "01"] {
            let f = result.counts[label] as f64 / SHOTS as f64;
            assert!((f - 0.5).abs() < 0.02, "{}: {}", label, f);
        }
    }
}

#[test]
fn hong_ou_mandel_bunching() {
    let mut program = CircuitProgram::new([0, 1]);
    program
        .push(gate(FockGate::AP, &[0], &[1.0]))
        .push(gate(FockGate::AP, &[1], &[1.0]))
        .push(gate(FockGate::BS, &[0, 1], &[0.5]))
        .push(count(2, &[0, 1]));
    let config = RunConfig::new("dense", "matmul", 5000).unwrap().with_seed(8);
    let result = run(&program, &config).unwrap();
    assert!(!result.counts.contains_key("11"));
    assert_eq!(result.counts["20"] + result.counts["02"], 5000);
}

#[test]
fn strategies_compose_identically() {
    let mut program = CircuitProgram::new([10, 11, 12, 13]);
    program
        .push(gate(FockGate::AP, &[10], &[1.0]))
        .push(gate(FockGate::AP, &[12], &[2.0]))
        .push(gate(FockGate::BS, &[10, 11], &[0.3]))
        .push(gate(FockGate::MZ, &[11, 12], &[0.8, -0.4]))
        .push(gate(FockGate::PHA, &[13], &[2.2]))
        .push(gate(FockGate::BS, &[13, 10], &[0.6]))
        .push(gate(FockGate::MZ, &[12, 13], &[1.9, 0.1]));
    let evaluate = |algorithm: &str| {
        let config = RunConfig::new("dense", algorithm, 1).unwrap().with_seed(0);
        let reg = ModeRegister::new(&program.using_qregs).unwrap();
        let mut ev = FockEvaluator::new(reg, &config);
        program.circuit.iter().for_each(|line| { ev.step(line).unwrap(); });
        ev.unitary().clone()
    };
    let u_mat = evaluate("matmul");
    let u_ein = evaluate("einsum");
    for (a, b) in u_mat.iter().zip(u_ein.iter()) {
        assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
        assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut program = CircuitProgram::new([0, 1, 2]);
    program
        .push(gate(FockGate::AP, &[0], &[1.0]))
        .push(gate(FockGate::AP, &[1], &[1.0]))
        .push(gate(FockGate::BS, &[0, 1], &[0.4]))
        .push(gate(FockGate::BS, &[1, 2], &[0.5]))
        .push(count(2, &[0, 1, 2]));
    let config = RunConfig::new("dense", "einsum", 300).unwrap().with_seed(77);
    let a = run(&program, &config).unwrap();
    let b = run(&program, &config).unwrap();
    assert_eq!(a.counts, b.counts);
    assert_eq!(a.counts.values().sum::<usize>(), 300);
}

#[test]
fn mixed_models_are_rejected_before_simulation() {
    let json = r#"{
        "usingQRegList": [0, 1],
        "circuit": [
            { "photonicFockGate": "PhotonicFockAP", "qRegList": [0], "argumentValueList": [1] },
            { "photonicGaussianGate": "PhotonicGaussianSQU", "qRegList": [1], "argumentValueList": [0.1, 0.0] },
            { "photonicFockMeasure": { "cutoff": 1 }, "qRegList": [0, 1] }
        ]
    }"#;
    let program = CircuitProgram::from_json(json).unwrap();
    let config = RunConfig::new("dense", "matmul", 1).unwrap();
    let err = run(&program, &config).unwrap_err();
    assert!(matches!(err, Error::ModelMismatch { .. }));
    assert_eq!(err.exit_code(), 4);
}
