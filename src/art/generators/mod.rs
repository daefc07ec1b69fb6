// src/art/generators/mod.rs

//! Per-style geometry generators.
//!
//! Exactly one generator runs per style. Every attribute a generator emits is
//! a function of the ranked outcomes, the quantities derived in [`Layout`]
//! and the jitter stream, which is re-seeded from `(seed, quantum seed)` at
//! the start of every symmetry frame.

mod classic;
mod painters;

pub use painters::Brush;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::geometry::Point;
use super::palette::Rgba;
use super::style::Style;
use crate::config::StyleParameters;
use crate::core::constants::canvas;
use crate::measurement::{MeasurementResult, RankedOutcome};

/// Everything a generator may read.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Outcomes by descending weight.
    pub ranked: Vec<RankedOutcome>,
    pub params: StyleParameters,
    pub num_qubits: usize,
    /// Canvas side in pixels.
    pub size: f64,
    /// Pixels per reference pixel.
    pub unit: f64,
    pub center: Point,
    /// Sum of all outcome values.
    pub quantum_seed: u64,
    /// `quantum_seed mod 10000`.
    pub hash: u64,
    /// `(quantum_seed mod 360)` degrees, in radians.
    pub rotation_offset: f64,
    /// `0.7 + (hash mod 100) / 100`.
    pub scale_variation: f64,
    jitter_seed: u64,
}

impl Layout {
    pub fn new(measurement: &MeasurementResult, params: &StyleParameters, canvas_size: u32, seed: u64) -> Self {
        let quantum_seed = measurement.quantum_seed();
        let hash = quantum_seed % 10_000;
        let size = canvas_size as f64;
        Self {
            ranked: measurement.ranked(),
            params: *params,
            num_qubits: measurement.num_qubits(),
            size,
            unit: size / canvas::REFERENCE_SIZE,
            center: Point::new(size / 2.0, size / 2.0),
            quantum_seed,
            hash,
            rotation_offset: ((quantum_seed % 360) as f64).to_radians(),
            scale_variation: 0.7 + (hash % 100) as f64 / 100.0,
            jitter_seed: seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ quantum_seed,
        }
    }

    /// Palette colour `index`, wrapping.
    pub fn color(&self, index: u64) -> Rgba {
        self.params.palette.color(index as usize)
    }

    /// A fresh jitter stream; identical on every call.
    pub fn jitter(&self) -> StdRng {
        StdRng::seed_from_u64(self.jitter_seed)
    }
}

/// Records the style's geometry for one symmetry frame.
pub fn generate(layout: &Layout, sketch: &mut super::primitives::Sketch) {
    let mut rng = layout.jitter();
    match layout.params.style {
        Style::Chaotic => classic::chaotic(layout, sketch, &mut rng),
        Style::Structured => classic::structured(layout, sketch),
        Style::Flowing => classic::flowing(layout, sketch),
        Style::Minimal => classic::minimal(layout, sketch),
        Style::Abstract => painters::abstract_blobs(layout, &Brush::from_layout(layout), sketch, &mut rng),
        Style::Dali => painters::dali(layout, &Brush::from_layout(layout), sketch, &mut rng),
        Style::Picasso => painters::picasso(layout, &Brush::from_layout(layout), sketch, &mut rng),
        Style::Kandinsky => painters::kandinsky(layout, &Brush::from_layout(layout), sketch),
        Style::Pollock => painters::pollock(layout, &Brush::from_layout(layout), sketch, &mut rng),
        Style::Mondrian => painters::mondrian(layout, &Brush::from_layout(layout), sketch),
        Style::VanGogh => painters::van_gogh(layout, &Brush::from_layout(layout), sketch, &mut rng),
        Style::Escher => painters::escher(layout, &Brush::from_layout(layout), sketch),
    }
}
