// tests/simulation_tests.rs

use qcanvas::{
    CanvasError, Circuit, CircuitBuilder, Gate, GateKind, GateSet, MeasurementMode, Sampler, Simulator,
    SimulatorConfig, check_normalization,
};
use qcanvas::circuits::ParametricSpec;
use qcanvas::core::AmplitudeVector;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::PI;

const TOLERANCE: f64 = 1e-9;

fn run(circuit: &Circuit) -> Result<AmplitudeVector, CanvasError> {
    Ok(Simulator::new().run(circuit)?.into_state())
}

fn assert_probabilities(state: &AmplitudeVector, expected: &[f64]) {
    let probs = state.probabilities();
    assert_eq!(probs.len(), expected.len());
    for (i, (p, e)) in probs.iter().zip(expected).enumerate() {
        assert!((p - e).abs() < TOLERANCE, "P({}) = {}, expected {}", i, p, e);
    }
}

#[test]
fn test_empty_circuit_stays_in_ground_state() -> Result<(), CanvasError> {
    let state = run(&Circuit::new(3)?)?;
    let mut expected = vec![0.0; 8];
    expected[0] = 1.0;
    assert_probabilities(&state, &expected);
    Ok(())
}

#[test]
fn test_x_flips_lowest_bit_for_qubit_zero() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(3).add_gate(Gate::x(0)).build()?;
    let state = run(&circuit)?;
    assert!((state.probability(1) - 1.0).abs() < TOLERANCE);
    assert_eq!(state.bitstring(1), "001");
    Ok(())
}

#[test]
fn test_bell_pair() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(2)
        .add_gate(Gate::h(0))
        .add_gate(Gate::cx(0, 1))
        .build()?;
    let state = run(&circuit)?;
    assert_probabilities(&state, &[0.5, 0.0, 0.0, 0.5]);
    Ok(())
}

#[test]
fn test_ghz_three_qubits() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(3)
        .add_gate(Gate::h(0))
        .add_gate(Gate::cx(0, 1))
        .add_gate(Gate::cx(1, 2))
        .build()?;
    let state = run(&circuit)?;
    let mut expected = vec![0.0; 8];
    expected[0] = 0.5;
    expected[7] = 0.5;
    assert_probabilities(&state, &expected);
    Ok(())
}

#[test]
fn test_swap_moves_excitation() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(2)
        .add_gate(Gate::x(0))
        .add_gate(Gate::swap(0, 1))
        .build()?;
    let state = run(&circuit)?;
    assert_probabilities(&state, &[0.0, 0.0, 1.0, 0.0]);
    Ok(())
}

#[test]
fn test_rx_pi_is_flip_up_to_phase() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(1).add_gate(Gate::rx(0, PI)).build()?;
    let state = run(&circuit)?;
    assert_probabilities(&state, &[0.0, 1.0]);
    Ok(())
}

#[test]
fn test_phase_gates_do_not_change_probabilities() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(2)
        .add_gate(Gate::h(0))
        .add_gate(Gate::h(1))
        .add_gate(Gate::rz(0, 0.7))
        .add_gate(Gate::phase(1, 1.3))
        .add_gate(Gate::cz(0, 1))
        .build()?;
    let state = run(&circuit)?;
    assert_probabilities(&state, &[0.25; 4]);
    Ok(())
}

#[test]
fn test_interference_h_h_is_identity() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(1)
        .add_gate(Gate::h(0))
        .add_gate(Gate::h(0))
        .build()?;
    let state = run(&circuit)?;
    assert_probabilities(&state, &[1.0, 0.0]);
    Ok(())
}

#[test]
fn test_reduced_gate_set_skips_phase_family() -> Result<(), CanvasError> {
    // H, RZ(pi), H is X in the full set and the identity once RZ is skipped
    let circuit = CircuitBuilder::new(1)
        .add_gate(Gate::h(0))
        .add_gate(Gate::rz(0, PI))
        .add_gate(Gate::h(0))
        .build()?;

    let full = Simulator::new().run(&circuit)?;
    assert_probabilities(full.state(), &[0.0, 1.0]);
    assert_eq!(full.skipped_gates(), 0);

    let reduced = Simulator::with_config(SimulatorConfig::default().with_gate_set(GateSet::Reduced)).run(&circuit)?;
    assert_probabilities(reduced.state(), &[1.0, 0.0]);
    assert_eq!(reduced.applied_gates(), 2);
    assert_eq!(reduced.skipped_gates(), 1);
    Ok(())
}

#[test]
fn test_invalid_operands_are_rejected() {
    let same = CircuitBuilder::new(2).add_gate(Gate::cx(1, 1)).build();
    assert!(matches!(same, Err(CanvasError::InvalidGate { .. })));

    let out_of_range = CircuitBuilder::new(2).add_gate(Gate::h(2)).build();
    assert!(matches!(out_of_range, Err(CanvasError::InvalidGate { .. })));
}

#[test]
fn test_random_circuit_uses_pool_and_ring() -> Result<(), CanvasError> {
    let pool = [GateKind::X, GateKind::H, GateKind::CX];
    let mut rng = StdRng::seed_from_u64(11);
    let circuit = CircuitBuilder::random(&pool, 4, &mut rng)?;
    assert_eq!(circuit.num_qubits(), 4);
    assert_eq!(circuit.len(), 12);
    for gate in circuit.gates() {
        assert!(pool.contains(&gate.kind()));
        if let Gate::Double { control, target, .. } = gate {
            assert_eq!(*target, (control + 1) % 4);
        }
    }
    Ok(())
}

#[test]
fn test_random_circuit_clamps_qubits() -> Result<(), CanvasError> {
    let mut rng = StdRng::seed_from_u64(0);
    let small = CircuitBuilder::random(&[GateKind::H], 1, &mut rng)?;
    let large = CircuitBuilder::random(&[GateKind::H], 12, &mut rng)?;
    assert_eq!(small.num_qubits(), 3);
    assert_eq!(large.num_qubits(), 5);
    Ok(())
}

#[test]
fn test_parametric_circuit_stays_normalized() -> Result<(), CanvasError> {
    let spec = ParametricSpec {
        qubits: 6,
        complexity: 9,
        entropy: 0.8,
        harmonics: 3,
    };
    let mut rng = StdRng::seed_from_u64(21);
    let circuit = CircuitBuilder::parametric(&spec, &mut rng)?;
    assert_eq!(circuit.num_qubits(), 6);
    let state = run(&circuit)?;
    check_normalization(&state, None)?;
    Ok(())
}

#[test]
fn test_shot_counts_sum_to_shots() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(3)
        .add_gate(Gate::h(0))
        .add_gate(Gate::h(1))
        .add_gate(Gate::h(2))
        .build()?;
    let state = run(&circuit)?;
    let mut rng = StdRng::seed_from_u64(5);
    let result = Sampler::measure(&state, MeasurementMode::Shots(1024), &mut rng)?;
    assert_eq!(result.shots(), Some(1024));
    let total: u64 = result.values().iter().filter_map(|v| result.count(*v)).sum();
    assert_eq!(total, 1024);
    Ok(())
}

#[test]
fn test_deterministic_state_always_measures_same_value() -> Result<(), CanvasError> {
    let circuit = CircuitBuilder::new(3)
        .add_gate(Gate::x(1))
        .add_gate(Gate::x(2))
        .build()?;
    let state = run(&circuit)?;
    let mut rng = StdRng::seed_from_u64(8);
    let result = Sampler::sample_shots(&state, 200, &mut rng)?;
    assert_eq!(result.values(), vec![6]);
    assert_eq!(result.count(6), Some(200));
    assert_eq!(result.bitstring(6), "110");
    Ok(())
}

#[test]
fn test_zero_shots_is_configuration_error() -> Result<(), CanvasError> {
    let state = AmplitudeVector::zero_state(2)?;
    let mut rng = StdRng::seed_from_u64(0);
    let err = Sampler::sample_shots(&state, 0, &mut rng);
    assert!(matches!(err, Err(CanvasError::Configuration { .. })));
    Ok(())
}

#[test]
fn test_initial_state_for_every_register_size() -> Result<(), CanvasError> {
    for n in 1..=8 {
        let state = run(&Circuit::new(n)?)?;
        let probs = state.probabilities();
        assert_eq!(probs.len(), 1 << n);
        assert_eq!(probs[0], 1.0);
        assert!(probs[1..].iter().all(|p| *p == 0.0));
    }
    Ok(())
}

#[test]
fn test_x_twice_restores_state() -> Result<(), CanvasError> {
    let prepared = CircuitBuilder::new(3)
        .add_gate(Gate::h(0))
        .add_gate(Gate::ry(1, 0.4))
        .add_gate(Gate::cx(0, 2));
    let before = run(&prepared.clone().build()?)?;
    let after = run(&prepared.add_gate(Gate::x(1)).add_gate(Gate::x(1)).build()?)?;
    for (a, b) in before.amplitudes().iter().zip(after.amplitudes()) {
        assert!((a - b).norm() < TOLERANCE);
    }
    Ok(())
}

#[test]
fn test_cx_acts_only_when_control_set() -> Result<(), CanvasError> {
    // |01> (bit 0 set) becomes |11>
    let set = CircuitBuilder::new(2)
        .add_gate(Gate::x(0))
        .add_gate(Gate::cx(0, 1))
        .build()?;
    assert_probabilities(&run(&set)?, &[0.0, 0.0, 0.0, 1.0]);

    // |10> (bit 0 clear) is left alone
    let clear = CircuitBuilder::new(2)
        .add_gate(Gate::x(1))
        .add_gate(Gate::cx(0, 1))
        .build()?;
    assert_probabilities(&run(&clear)?, &[0.0, 0.0, 1.0, 0.0]);
    Ok(())
}
