// src/pipeline/artwork.rs
use serde::Serialize;
use std::fmt;

use crate::circuits::Circuit;
use crate::config::{CircuitMode, QuantumMode, StyleParameters};
use crate::core::Result;
use crate::gates::Gate;
use crate::measurement::{MeasurementResult, RankedOutcome};

/// A finished picture together with what produced it.
#[derive(Clone, PartialEq)]
pub struct RenderedArtwork {
    /// Row-major RGBA8, `size * size * 4` bytes.
    pub pixels: Vec<u8>,
    pub size: u32,
    pub job_id: String,
    /// Unix milliseconds at completion.
    pub timestamp_ms: u64,
    /// Seed that reproduces this artwork.
    pub seed: u64,
    pub params: StyleParameters,
    pub circuit_mode: CircuitMode,
    pub requested_mode: QuantumMode,
    /// Always [`QuantumMode::Simulation`]; hardware requests fall back.
    pub executed_mode: QuantumMode,
    pub gate_count: usize,
    /// The circuit that was simulated.
    pub circuit: Circuit,
    pub quantum_seed: u64,
    pub measurement: MeasurementResult,
    pub top_outcomes: Vec<RankedOutcome>,
}

/// Everything in [`RenderedArtwork`] except the pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkMetadata<'a> {
    pub job_id: &'a str,
    pub timestamp_ms: u64,
    pub seed: u64,
    pub size: u32,
    pub style: String,
    pub palette: String,
    pub symmetry: String,
    pub qubit_count: usize,
    pub circuit_mode: CircuitMode,
    pub requested_mode: QuantumMode,
    pub executed_mode: QuantumMode,
    pub hardware_fallback: bool,
    pub gate_count: usize,
    pub gates: &'a [Gate],
    pub shots: Option<u64>,
    pub quantum_seed: u64,
    pub top_outcomes: &'a [RankedOutcome],
}

impl RenderedArtwork {
    /// Whether hardware was requested and simulation ran instead.
    pub fn is_fallback(&self) -> bool {
        self.requested_mode != self.executed_mode
    }

    pub fn metadata(&self) -> ArtworkMetadata<'_> {
        ArtworkMetadata {
            job_id: &self.job_id,
            timestamp_ms: self.timestamp_ms,
            seed: self.seed,
            size: self.size,
            style: self.params.style.to_string(),
            palette: self.params.palette.to_string(),
            symmetry: self.params.symmetry.to_string(),
            qubit_count: self.params.qubit_count,
            circuit_mode: self.circuit_mode,
            requested_mode: self.requested_mode,
            executed_mode: self.executed_mode,
            hardware_fallback: self.is_fallback(),
            gate_count: self.gate_count,
            gates: self.circuit.gates(),
            shots: self.measurement.shots(),
            quantum_seed: self.quantum_seed,
            top_outcomes: &self.top_outcomes,
        }
    }

    /// Pretty-printed JSON summary.
    pub fn metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.metadata())?)
    }
}

impl fmt::Debug for RenderedArtwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedArtwork")
            .field("job_id", &self.job_id)
            .field("size", &self.size)
            .field("seed", &self.seed)
            .field("style", &self.params.style)
            .field("executed_mode", &self.executed_mode)
            .field("gate_count", &self.gate_count)
            .field("pixels", &format_args!("[{} bytes]", self.pixels.len()))
            .finish()
    }
}
