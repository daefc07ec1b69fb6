// src/lib.rs

//! `qcanvas` - deterministic generative art from simulated quantum circuits
//!
//! A small circuit is built from a style's gate pool, run on a dense state
//! vector and sampled. The measured outcomes drive a procedural renderer
//! that paints a square RGBA raster under an optional symmetry operator.

pub mod core;
pub mod gates;
pub mod circuits;
pub mod simulation;
pub mod measurement;
pub mod validation;
pub mod art;
pub mod config;
pub mod pipeline;
pub mod logging;

// Re-export the most common types for easier top-level use
pub use core::{AmplitudeVector, CanvasError, Result};
pub use gates::{Gate, GateKind};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{GateSet, SimulationResult, Simulator, SimulatorConfig};
pub use measurement::{MeasurementMode, MeasurementResult, RankedOutcome, Sampler};
pub use validation::{check_distribution, check_normalization, validate_state};
pub use art::{ArtMapper, Canvas, Palette, Scene, Style, SymmetryMode};
pub use config::{CircuitMode, GenerationConfig, QuantumMode, StyleParameters};
pub use pipeline::{CancelToken, RenderedArtwork, Stage, Studio, generate, generate_with};
pub use logging::{LoggingConfig, init_logging};

// Example 1: Bell pair
// Hadamard then CX leaves only |00> and |11>, each with probability 1/2.
/// ```
/// use qcanvas::{CircuitBuilder, Gate, Sampler, Simulator};
///
/// let circuit = CircuitBuilder::new(2)
///     .add_gate(Gate::h(0))
///     .add_gate(Gate::cx(0, 1))
///     .build()
///     .unwrap();
///
/// let result = Simulator::new().run(&circuit).unwrap();
/// let probs = result.state().probabilities();
/// assert!((probs[0] - 0.5).abs() < 1e-12);
/// assert!((probs[3] - 0.5).abs() < 1e-12);
///
/// let exact = Sampler::distribution(result.state()).unwrap();
/// assert_eq!(exact.values(), vec![0, 3]);
/// println!("{}", exact);
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Seeded artwork
// Identical seeded requests give identical pixels.
/// ```
/// use qcanvas::{GenerationConfig, Palette, Style, generate};
///
/// let config = GenerationConfig::seeded(2024)
///     .with_style(Style::Minimal)
///     .with_palette(Palette::Vibrant)
///     .with_qubit_count(3)
///     .with_canvas_size(96);
///
/// let a = generate(&config).unwrap();
/// let b = generate(&config).unwrap();
/// assert_eq!(a.pixels, b.pixels);
/// assert_eq!(a.job_id, b.job_id);
/// assert_eq!(a.gate_count, 9);
/// println!("{}", a.metadata_json().unwrap());
/// ```
#[doc(hidden)]
const _: () = ();
