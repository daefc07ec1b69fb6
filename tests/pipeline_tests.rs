// tests/pipeline_tests.rs

use qcanvas::art::{Motif, ShapeKind};
use qcanvas::{
    ArtMapper, CancelToken, CanvasError, CircuitMode, GateKind, GenerationConfig, MeasurementMode, Palette,
    QuantumMode, Stage, Studio, Style, SymmetryMode, generate, generate_with,
};
use std::sync::Arc;
use std::thread;

fn minimal_request(seed: u64) -> GenerationConfig {
    GenerationConfig::seeded(seed)
        .with_qubit_count(3)
        .with_style(Style::Minimal)
        .with_palette(Palette::Vibrant)
        .with_symmetry(SymmetryMode::None)
        .with_canvas_size(200)
}

#[test]
fn test_minimal_end_to_end() -> Result<(), CanvasError> {
    let artwork = generate(&minimal_request(1234))?;

    assert_eq!(artwork.gate_count, 9);
    assert_eq!(artwork.circuit.num_qubits(), 3);
    let pool = [GateKind::X, GateKind::H, GateKind::CX];
    assert!(artwork.circuit.gates().iter().all(|g| pool.contains(&g.kind())));

    assert_eq!(artwork.measurement.shots(), Some(1024));
    let total: u64 = artwork
        .measurement
        .values()
        .iter()
        .filter_map(|v| artwork.measurement.count(*v))
        .sum();
    assert_eq!(total, 1024);

    assert_eq!(artwork.pixels.len(), 200 * 200 * 4);
    assert_eq!(artwork.executed_mode, QuantumMode::Simulation);
    assert!(!artwork.is_fallback());

    // The shapes drawn follow the ranked outcomes
    let scene = ArtMapper::compose(&artwork.measurement, &artwork.params, artwork.size, artwork.seed, None)?;
    let ranked = artwork.measurement.ranked();
    for command in scene.commands.iter().filter(|c| matches!(c.motif, Motif::Shape(_))) {
        let value = ranked[command.outcome].value;
        assert_eq!(command.motif, Motif::Shape(ShapeKind::for_value(value)));
    }
    Ok(())
}

#[test]
fn test_seeded_runs_are_reproducible() -> Result<(), CanvasError> {
    let config = minimal_request(77).with_style(Style::Chaotic);
    let a = generate(&config)?;
    let b = generate(&config)?;
    assert_eq!(a.seed, 77);
    assert_eq!(a.job_id, b.job_id);
    assert_eq!(a.circuit, b.circuit);
    assert_eq!(a.measurement, b.measurement);
    assert_eq!(a.pixels, b.pixels);
    Ok(())
}

#[test]
fn test_live_run_replays_from_reported_seed() -> Result<(), CanvasError> {
    let live = generate(&minimal_request(0).without_seed())?;
    let replay = generate(&minimal_request(live.seed))?;
    assert_eq!(live.job_id, replay.job_id);
    assert_eq!(live.measurement, replay.measurement);
    assert_eq!(live.pixels, replay.pixels);
    Ok(())
}

#[test]
fn test_top_outcomes_are_ranked() -> Result<(), CanvasError> {
    let artwork = generate(&minimal_request(9).with_top_k(3))?;
    assert!(artwork.top_outcomes.len() <= 3);
    for (i, outcome) in artwork.top_outcomes.iter().enumerate() {
        assert_eq!(outcome.rank, i);
    }
    for pair in artwork.top_outcomes.windows(2) {
        assert!(pair[0].probability >= pair[1].probability);
    }
    Ok(())
}

#[test]
fn test_hardware_falls_back_to_noisy_simulation() -> Result<(), CanvasError> {
    let config = minimal_request(5).with_quantum_mode(QuantumMode::Hardware);
    let artwork = generate(&config)?;
    assert_eq!(artwork.requested_mode, QuantumMode::Hardware);
    assert_eq!(artwork.executed_mode, QuantumMode::Simulation);
    assert!(artwork.is_fallback());
    assert_eq!(artwork.measurement.shots(), Some(1024));

    let metadata: serde_json::Value = serde_json::from_str(&artwork.metadata_json()?)?;
    assert_eq!(metadata["hardware_fallback"], serde_json::Value::Bool(true));
    assert_eq!(metadata["executed_mode"], "simulation");
    Ok(())
}

#[test]
fn test_distribution_mode_and_parametric_circuits() -> Result<(), CanvasError> {
    let config = GenerationConfig::seeded(3)
        .with_circuit_mode(CircuitMode::Parametric)
        .with_qubit_count(6)
        .with_measurement(MeasurementMode::Distribution)
        .with_style(Style::Kandinsky)
        .with_canvas_size(128);
    let artwork = generate(&config)?;
    assert_eq!(artwork.circuit.num_qubits(), 6);
    assert_eq!(artwork.measurement.shots(), None);
    let total: f64 = artwork
        .measurement
        .values()
        .iter()
        .map(|v| artwork.measurement.probability(*v))
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_out_of_range_values_are_clamped() -> Result<(), CanvasError> {
    let config = minimal_request(4).with_qubit_count(40).with_canvas_size(10);
    let artwork = generate(&config)?;
    assert_eq!(artwork.circuit.num_qubits(), 5);
    assert_eq!(artwork.size, 64);
    Ok(())
}

#[test]
fn test_zero_shots_fail_before_any_stage() {
    let config = minimal_request(4).with_measurement(MeasurementMode::Shots(0));
    assert!(matches!(generate(&config), Err(CanvasError::Configuration { .. })));
}

#[test]
fn test_cancelled_request_produces_nothing() {
    let token = CancelToken::new();
    token.cancel();
    let result = generate_with(&minimal_request(2), &token);
    assert_eq!(result, Err(CanvasError::Cancelled(Stage::Idle)));
}

#[test]
fn test_studio_publishes_latest() -> Result<(), CanvasError> {
    let studio = Studio::new();
    let first = studio.submit(&minimal_request(10))?;
    let second = studio.submit(&minimal_request(11))?;
    let latest = studio.latest().ok_or(CanvasError::Rendering("nothing published".into()))?;
    assert!(Arc::ptr_eq(&latest, &second));
    assert!(!Arc::ptr_eq(&latest, &first));
    Ok(())
}

#[test]
fn test_studio_shared_between_threads() {
    let studio = Arc::new(Studio::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let studio = Arc::clone(&studio);
            thread::spawn(move || studio.submit(&minimal_request(100 + i)))
        })
        .collect();

    let mut published = Vec::new();
    for handle in handles {
        match handle.join().expect("worker panicked") {
            Ok(artwork) => published.push(artwork),
            Err(e) => assert!(matches!(e, CanvasError::Cancelled(_)), "unexpected error {}", e),
        }
    }

    // Whatever the interleaving, the slot holds one of the published results
    let latest = studio.latest().expect("at least one request completes");
    assert!(published.iter().any(|a| Arc::ptr_eq(a, &latest)));
    assert!(!studio.is_busy());
}
