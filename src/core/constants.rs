//! Numeric limits and defaults shared by the simulator and the art pipeline.

/// Limits on register sizes.
pub mod qubits {
    /// Smallest register the simulator accepts.
    pub const MIN: usize = 1;
    /// Largest register the simulator accepts.
    pub const MAX: usize = 8;
    /// Range used by random circuit generation.
    pub const RANDOM_RANGE: (usize, usize) = (3, 5);
    /// Range used by parametric circuit generation.
    pub const PARAMETRIC_RANGE: (usize, usize) = (2, 8);
    /// Random circuits contain this many gates per qubit.
    pub const GATES_PER_QUBIT: usize = 3;
}

/// Defaults for measurement.
pub mod sampling {
    /// Shot count used unless configured otherwise.
    pub const DEFAULT_SHOTS: u32 = 1024;
    /// Per-bit flip probability applied by the hardware fallback.
    pub const READOUT_FLIP_PROBABILITY: f64 = 0.01;
    /// Weight of the uniform component mixed into fallback distributions.
    pub const UNIFORM_MIX: f64 = 0.02;
    /// Amplitudes whose squared magnitude is at or below this are treated as
    /// zero when sampling or building an exact distribution.
    pub const PROBABILITY_FLOOR: f64 = 1e-15;
}

/// Defaults for rendering.
pub mod canvas {
    /// Side of the square canvas in pixels.
    pub const DEFAULT_SIZE: u32 = 1200;
    /// Smallest canvas accepted after clamping.
    pub const MIN_SIZE: u32 = 64;
    /// Largest canvas accepted after clamping.
    pub const MAX_SIZE: u32 = 4096;
    /// Pixel constants in the generators are expressed for this canvas side.
    pub const REFERENCE_SIZE: f64 = 1200.0;
    /// Number of ranked outcomes reported back to the caller.
    pub const DEFAULT_TOP_K: usize = 5;
}
