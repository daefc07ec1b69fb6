// src/pipeline/mod.rs

//! Drives one request from configuration to pixels.
//!
//! [`generate`] runs the stages strictly in order, recording each move in a
//! [`GenerationJob`] and checking the [`CancelToken`] between stages. Every
//! random draw of a run (job id, circuit, shots, readout noise) comes from a
//! single `StdRng` seeded from the request, so a seeded request is fully
//! reproducible and a live one can be replayed from the seed it reports.

pub mod artwork;
pub mod stage;
pub mod studio;

pub use artwork::{ArtworkMetadata, RenderedArtwork};
pub use stage::{CancelToken, GenerationJob, Stage};
pub use studio::Studio;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

use crate::art::ArtMapper;
use crate::circuits::{Circuit, CircuitBuilder};
use crate::config::{CircuitMode, GenerationConfig, QuantumMode};
use crate::core::{AmplitudeVector, CanvasError, Result};
use crate::measurement::{MeasurementResult, Sampler};
use crate::simulation::{Simulator, SimulatorConfig};

const JOB_ID_PREFIX: &str = "qc-";
const JOB_ID_LEN: usize = 9;

/// Runs a request to completion.
///
/// # Example
/// ```
/// use qcanvas::config::GenerationConfig;
/// use qcanvas::pipeline::generate;
///
/// let config = GenerationConfig::seeded(42).with_canvas_size(64);
/// let artwork = generate(&config).unwrap();
/// assert_eq!(artwork.pixels.len(), 64 * 64 * 4);
/// assert_eq!(artwork.seed, 42);
/// ```
pub fn generate(config: &GenerationConfig) -> Result<RenderedArtwork> {
    generate_with(config, &CancelToken::new())
}

/// [`generate`] with cancellation.
///
/// # Errors
/// * `Cancelled(stage)` if `cancel` fired; `stage` is the last stage entered.
/// * Any error of the stage that failed. No artwork is produced either way.
pub fn generate_with(config: &GenerationConfig, cancel: &CancelToken) -> Result<RenderedArtwork> {
    let mut job = GenerationJob::new();
    match run(config, cancel, &mut job) {
        Ok(artwork) => Ok(artwork),
        Err(e) => {
            let stage = job.stage();
            // run() only returns Ok after Done, so the job is never terminal here
            let _ = job.fail();
            match &e {
                CanvasError::Cancelled(_) => warn!(?stage, "generation cancelled"),
                _ => error!(?stage, error = %e, "generation failed"),
            }
            Err(e)
        }
    }
}

fn run(config: &GenerationConfig, cancel: &CancelToken, job: &mut GenerationJob) -> Result<RenderedArtwork> {
    let config = config.normalized()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    let job_id = job_id(&mut rng);
    info!(%job_id, seed, live = config.seed.is_none(), "starting generation");

    step(job, cancel, Stage::BuildingCircuit)?;
    let circuit = build_circuit(&config, &mut rng)?;
    debug!(qubits = circuit.num_qubits(), gates = circuit.len(), "circuit built");

    step(job, cancel, Stage::Simulating)?;
    let simulator = Simulator::with_config(SimulatorConfig::default().with_gate_set(config.gate_set));
    let simulation = simulator.run(&circuit)?;

    step(job, cancel, Stage::Sampling)?;
    let measurement = measure(&config, simulation.state(), &mut rng)?;
    debug!(distinct = measurement.len(), shots = ?measurement.shots(), "measurement complete");

    step(job, cancel, Stage::Rendering)?;
    let canvas = ArtMapper::paint(
        &measurement,
        &config.params,
        config.canvas_size,
        seed,
        config.signature.as_deref(),
    )?;
    let pixels = canvas.to_rgba8()?;

    step(job, cancel, Stage::Done)?;
    info!(%job_id, "generation complete");

    Ok(RenderedArtwork {
        pixels,
        size: config.canvas_size,
        job_id,
        timestamp_ms: now_ms(),
        seed,
        params: config.params,
        circuit_mode: config.circuit_mode,
        requested_mode: config.quantum_mode,
        executed_mode: QuantumMode::Simulation,
        gate_count: circuit.len(),
        circuit,
        quantum_seed: measurement.quantum_seed(),
        top_outcomes: measurement.top_k(config.top_k),
        measurement,
    })
}

fn step(job: &mut GenerationJob, cancel: &CancelToken, next: Stage) -> Result<()> {
    cancel.check(job.stage())?;
    job.advance(next)
}

fn build_circuit<R: Rng>(config: &GenerationConfig, rng: &mut R) -> Result<Circuit> {
    let params = &config.params;
    match config.circuit_mode {
        CircuitMode::Random => CircuitBuilder::random(params.style.gate_pool(), params.qubit_count, rng),
        CircuitMode::Parametric => CircuitBuilder::parametric(&params.parametric_spec(), rng),
    }
}

fn measure<R: Rng>(
    config: &GenerationConfig,
    state: &AmplitudeVector,
    rng: &mut R,
) -> Result<MeasurementResult> {
    let ideal = Sampler::measure(state, config.measurement, rng)?;
    match config.quantum_mode {
        QuantumMode::Simulation => Ok(ideal),
        QuantumMode::Hardware => {
            warn!("quantum hardware unavailable, falling back to simulation with readout noise");
            Sampler::apply_readout_noise(&ideal, rng)
        }
    }
}

fn job_id<R: Rng>(rng: &mut R) -> String {
    let id = uuid::Builder::from_random_bytes(rng.random::<[u8; 16]>()).into_uuid();
    let simple = id.simple().to_string();
    format!("{}{}", JOB_ID_PREFIX, &simple[..JOB_ID_LEN])
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
