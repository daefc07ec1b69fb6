// tests/proptest_tests.rs

use proptest::prelude::*;
use qcanvas::{
    ArtMapper, Circuit, CircuitBuilder, Gate, MeasurementResult, Sampler, Simulator, Style, StyleParameters,
    SymmetryMode, check_normalization,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::f64::consts::TAU;

fn make_gate(n: usize, selector: u8, a: usize, offset: usize, angle: f64) -> Gate {
    let b = (a + offset) % n;
    match selector % 9 {
        0 => Gate::h(a),
        1 => Gate::x(a),
        2 => Gate::rx(a, angle),
        3 => Gate::ry(a, angle),
        4 => Gate::rz(a, angle),
        5 => Gate::phase(a, angle),
        6 => Gate::cx(a, b),
        7 => Gate::cz(a, b),
        _ => Gate::swap(a, b),
    }
}

prop_compose! {
    fn arbitrary_circuit(qubit_range: std::ops::RangeInclusive<usize>)
        (n in qubit_range)
        (gates in prop::collection::vec((any::<u8>(), 0..n, 1..n, 0.0..TAU), 0..40), n in Just(n)) -> Circuit {
        CircuitBuilder::new(n)
            .add_gates(gates.into_iter().map(|(s, a, o, t)| make_gate(n, s, a, o, t)))
            .build()
            .expect("generated operands are in range")
    }
}

prop_compose! {
    fn arbitrary_counts()(counts in prop::collection::btree_map(0u64..16, 1u64..500, 1..12)) -> MeasurementResult {
        MeasurementResult::from_counts(4, counts).expect("non-empty counts")
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn state_stays_normalized(circuit in arbitrary_circuit(2..=6)) {
        let result = Simulator::new().run(&circuit).expect("simulation succeeds");
        prop_assert!(check_normalization(result.state(), Some(1e-9)).is_ok());
    }

    #[test]
    fn shot_totals_match_request(circuit in arbitrary_circuit(2..=5), shots in 1u32..3000, seed in any::<u64>()) {
        let result = Simulator::new().run(&circuit).expect("simulation succeeds");
        let mut rng = StdRng::seed_from_u64(seed);
        let measured = Sampler::sample_shots(result.state(), shots, &mut rng).expect("sampling succeeds");
        let total: u64 = measured.values().iter().filter_map(|v| measured.count(*v)).sum();
        prop_assert_eq!(total, shots as u64);
        prop_assert_eq!(measured.shots(), Some(shots as u64));
        prop_assert!(measured.values().iter().all(|v| *v < 1 << circuit.num_qubits()));
    }

    #[test]
    fn mapper_is_deterministic(
        measurement in arbitrary_counts(),
        style_idx in 0..Style::ALL.len(),
        symmetry_idx in 0..SymmetryMode::ALL.len(),
        seed in any::<u64>(),
    ) {
        let params = StyleParameters::default()
            .with_style(Style::ALL[style_idx])
            .with_symmetry(SymmetryMode::ALL[symmetry_idx]);
        let a = ArtMapper::compose(&measurement, &params, 160, seed, None).expect("compose succeeds");
        let b = ArtMapper::compose(&measurement, &params, 160, seed, None).expect("compose succeeds");
        prop_assert_eq!(a.commands.len(), b.commands.len());
        prop_assert!(a == b);
        prop_assert_eq!(a.quantum_seed, measurement.values().iter().sum::<u64>());
    }

    #[test]
    fn ranking_is_descending(measurement in arbitrary_counts()) {
        let ranked = measurement.ranked();
        prop_assert_eq!(ranked.len(), measurement.len());
        for pair in ranked.windows(2) {
            let ordered = pair[0].probability > pair[1].probability
                || (pair[0].probability == pair[1].probability && pair[0].value < pair[1].value);
            prop_assert!(ordered);
        }
    }
}

#[test]
fn exact_distribution_matches_state() {
    let circuit = CircuitBuilder::new(2)
        .add_gate(Gate::ry(0, 1.1))
        .add_gate(Gate::cx(0, 1))
        .build()
        .expect("valid circuit");
    let state = Simulator::new().run(&circuit).expect("simulation succeeds").into_state();
    let exact = Sampler::distribution(&state).expect("distribution");
    let probs: BTreeMap<u64, f64> = exact.values().into_iter().map(|v| (v, exact.probability(v))).collect();
    for (v, p) in probs {
        assert!((p - state.probability(v as usize)).abs() < 1e-12);
    }
}
