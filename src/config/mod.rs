// src/config/mod.rs

//! Generation request configuration.
//!
//! Every type here deserializes from JSON with snake_case identifiers; the
//! camelCase field names used by UI front-ends (`qubitCount`, `layerDepth`,
//! ...) are accepted as aliases. Out-of-range scalars are clamped by
//! [`GenerationConfig::normalized`] with a warning. Zero shots, a zero canvas
//! and unknown style, palette or symmetry names are rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::art::{Palette, Style, SymmetryMode};
use crate::circuits::ParametricSpec;
use crate::core::constants::{canvas, qubits};
use crate::core::{CanvasError, Result};
use crate::measurement::MeasurementMode;
use crate::simulation::GateSet;

/// Accepted range of `complexity`.
pub const COMPLEXITY_RANGE: (u32, u32) = (1, 10);
/// Accepted range of `entropy`.
pub const ENTROPY_RANGE: (f64, f64) = (0.0, 1.0);
/// Accepted range of `harmonics`.
pub const HARMONICS_RANGE: (u32, u32) = (1, 8);
/// Accepted range of `layer_depth`.
pub const LAYER_DEPTH_RANGE: (u32, u32) = (1, 20);

const CAMEL_CASE_KEYS: [(&str, &str); 7] = [
    ("qubitCount", "qubit_count"),
    ("layerDepth", "layer_depth"),
    ("quantumMode", "quantum_mode"),
    ("circuitMode", "circuit_mode"),
    ("gateSet", "gate_set"),
    ("canvasSize", "canvas_size"),
    ("topK", "top_k"),
];

/// Visual parameters of one render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParameters {
    pub style: Style,
    pub palette: Palette,
    pub symmetry: SymmetryMode,
    /// Circuit depth and entangler density; 1..=10.
    pub complexity: u32,
    /// Spread of rotation angles and generator jitter; 0..=1.
    pub entropy: f64,
    /// Number of sine terms in waves and the phase pattern of parametric
    /// circuits; 1..=8.
    pub harmonics: u32,
    /// Maximum number of layers or brushes drawn; 1..=20.
    #[serde(alias = "layerDepth")]
    pub layer_depth: u32,
    #[serde(alias = "qubitCount")]
    pub qubit_count: usize,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            style: Style::default(),
            palette: Palette::default(),
            symmetry: SymmetryMode::default(),
            complexity: 5,
            entropy: 0.5,
            harmonics: 2,
            layer_depth: 12,
            qubit_count: 4,
        }
    }
}

impl StyleParameters {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_symmetry(mut self, symmetry: SymmetryMode) -> Self {
        self.symmetry = symmetry;
        self
    }

    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_entropy(mut self, entropy: f64) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn with_harmonics(mut self, harmonics: u32) -> Self {
        self.harmonics = harmonics;
        self
    }

    pub fn with_layer_depth(mut self, layer_depth: u32) -> Self {
        self.layer_depth = layer_depth;
        self
    }

    pub fn with_qubit_count(mut self, qubit_count: usize) -> Self {
        self.qubit_count = qubit_count;
        self
    }

    /// Scalars clamped into their accepted ranges, each adjustment logged.
    /// The qubit count is clamped to what the simulator supports.
    pub fn normalized(&self) -> Self {
        let entropy = if self.entropy.is_nan() { 0.5 } else { self.entropy };
        Self {
            complexity: clamp_logged("complexity", self.complexity, COMPLEXITY_RANGE),
            entropy: clamp_logged("entropy", entropy, ENTROPY_RANGE),
            harmonics: clamp_logged("harmonics", self.harmonics, HARMONICS_RANGE),
            layer_depth: clamp_logged("layer_depth", self.layer_depth, LAYER_DEPTH_RANGE),
            qubit_count: clamp_logged("qubit_count", self.qubit_count, (qubits::MIN, qubits::MAX)),
            ..*self
        }
    }

    /// Knobs for [`CircuitBuilder::parametric`](crate::circuits::CircuitBuilder::parametric).
    pub fn parametric_spec(&self) -> ParametricSpec {
        ParametricSpec {
            qubits: self.qubit_count,
            complexity: self.complexity,
            entropy: self.entropy,
            harmonics: self.harmonics,
        }
    }
}

fn clamp_logged<T>(parameter: &'static str, value: T, (lo, hi): (T, T)) -> T
where
    T: PartialOrd + Copy + std::fmt::Debug,
{
    let clamped = if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    };
    if clamped != value {
        warn!(parameter, requested = ?value, clamped = ?clamped, "parameter clamped to supported range");
    }
    clamped
}

/// Where the circuit is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantumMode {
    #[default]
    Simulation,
    /// Requested real hardware. Not available; runs in simulation with
    /// readout noise instead.
    Hardware,
}

/// How the circuit is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitMode {
    /// `3n` gates from the style's pool, `n` in `[3, 5]`.
    #[default]
    Random,
    /// Layered ansatz steered by complexity, entropy and harmonics, `n` in `[2, 8]`.
    Parametric,
}

impl CircuitMode {
    /// Qubit range accepted in this mode.
    pub fn qubit_range(&self) -> (usize, usize) {
        match self {
            CircuitMode::Random => qubits::RANDOM_RANGE,
            CircuitMode::Parametric => qubits::PARAMETRIC_RANGE,
        }
    }
}

/// A complete generation request.
///
/// # Example
/// ```
/// use qcanvas::config::GenerationConfig;
///
/// let config = GenerationConfig::from_json(
///     r#"{ "qubitCount": 3, "style": "minimal", "palette": "vibrant", "seed": 7 }"#,
/// ).unwrap();
/// assert_eq!(config.params.qubit_count, 3);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    #[serde(flatten)]
    pub params: StyleParameters,
    #[serde(alias = "quantumMode")]
    pub quantum_mode: QuantumMode,
    #[serde(alias = "circuitMode")]
    pub circuit_mode: CircuitMode,
    pub measurement: MeasurementMode,
    #[serde(alias = "gateSet")]
    pub gate_set: GateSet,
    /// `Some` for a reproducible run; `None` draws a fresh seed.
    pub seed: Option<u64>,
    #[serde(alias = "canvasSize")]
    pub canvas_size: u32,
    pub signature: Option<String>,
    /// Number of ranked outcomes reported with the artwork.
    #[serde(alias = "topK")]
    pub top_k: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            params: StyleParameters::default(),
            quantum_mode: QuantumMode::default(),
            circuit_mode: CircuitMode::default(),
            measurement: MeasurementMode::default(),
            gate_set: GateSet::default(),
            seed: None,
            canvas_size: canvas::DEFAULT_SIZE,
            signature: None,
            top_k: canvas::DEFAULT_TOP_K,
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible preset: default settings with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parses a JSON request.
    ///
    /// Style, palette and symmetry names are matched leniently
    /// (`"VanGogh"`, `"van-gogh"` and `"van_gogh"` are equivalent); an
    /// unknown name is a `Configuration` error, any other malformed input a
    /// `Serialization` error.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(json)?;
        if let Some(map) = value.as_object_mut() {
            // Aliases are not seen through the flattened parameters
            for (camel, snake) in CAMEL_CASE_KEYS {
                if let Some(v) = map.remove(camel) {
                    map.entry(snake).or_insert(v);
                }
            }
            canonicalize::<Style>(map, "style")?;
            canonicalize::<Palette>(map, "palette")?;
            canonicalize::<SymmetryMode>(map, "symmetry")?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the request.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_params(mut self, params: StyleParameters) -> Self {
        self.params = params;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.params.style = style;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.params.palette = palette;
        self
    }

    pub fn with_symmetry(mut self, symmetry: SymmetryMode) -> Self {
        self.params.symmetry = symmetry;
        self
    }

    pub fn with_qubit_count(mut self, qubit_count: usize) -> Self {
        self.params.qubit_count = qubit_count;
        self
    }

    pub fn with_quantum_mode(mut self, mode: QuantumMode) -> Self {
        self.quantum_mode = mode;
        self
    }

    pub fn with_circuit_mode(mut self, mode: CircuitMode) -> Self {
        self.circuit_mode = mode;
        self
    }

    pub fn with_measurement(mut self, measurement: MeasurementMode) -> Self {
        self.measurement = measurement;
        self
    }

    pub fn with_gate_set(mut self, gate_set: GateSet) -> Self {
        self.gate_set = gate_set;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Switches to live mode.
    pub fn without_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    pub fn with_canvas_size(mut self, size: u32) -> Self {
        self.canvas_size = size;
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Checks what cannot be clamped.
    pub fn validate(&self) -> Result<()> {
        if let MeasurementMode::Shots(0) = self.measurement {
            return Err(CanvasError::configuration("shots", "shot count must be positive"));
        }
        if self.canvas_size == 0 {
            return Err(CanvasError::configuration("canvas_size", "canvas size must be positive"));
        }
        Ok(())
    }

    /// Validated copy with every scalar clamped into range.
    ///
    /// The qubit count is clamped to the range of the circuit mode.
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;
        let mut params = self.params.normalized();
        params.qubit_count = clamp_logged("qubit_count", params.qubit_count, self.circuit_mode.qubit_range());
        Ok(Self {
            params,
            canvas_size: clamp_logged("canvas_size", self.canvas_size, (canvas::MIN_SIZE, canvas::MAX_SIZE)),
            top_k: clamp_logged("top_k", self.top_k, (1, usize::MAX)),
            ..self.clone()
        })
    }
}

fn canonicalize<T>(map: &mut serde_json::Map<String, Value>, key: &str) -> Result<()>
where
    T: std::str::FromStr<Err = CanvasError> + Serialize,
{
    let parsed = match map.get(key) {
        Some(Value::String(name)) => Some(name.parse::<T>()?),
        _ => None,
    };
    if let Some(parsed) = parsed {
        map.insert(key.to_string(), serde_json::to_value(parsed)?);
    }
    Ok(())
}
