// src/circuits/mod.rs

//! Ordered gate sequences over a fixed register, and the builders that
//! produce them.
//!
//! Circuits come from three places:
//! - [`CircuitBuilder`] method chaining, for hand-written circuits and tests;
//! - [`CircuitBuilder::random`], which draws `3n` gates from a style's pool;
//! - [`CircuitBuilder::parametric`], a layered ansatz steered by the art
//!   parameters (complexity, entropy, harmonics).

use rand::Rng;
use std::f64::consts::{PI, TAU};
use std::fmt;
use tracing::{debug, warn};

use crate::core::constants::qubits;
use crate::core::{CanvasError, Result};
use crate::gates::{Gate, GateKind, SingleQubitGate, TwoQubitGate};

/// An ordered sequence of gates applied to an `n`-qubit register.
///
/// Created once per generation request and read-only afterwards.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates an empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if !(qubits::MIN..=qubits::MAX).contains(&num_qubits) {
            return Err(CanvasError::configuration(
                "qubit_count",
                format!("circuits support {}..={} qubits, got {}", qubits::MIN, qubits::MAX, num_qubits),
            ));
        }
        Ok(Self {
            num_qubits,
            gates: Vec::new(),
        })
    }

    /// Appends a gate after checking its operands against the register.
    pub fn push(&mut self, gate: Gate) -> Result<()> {
        for q in gate.qubits() {
            if q >= self.num_qubits {
                return Err(CanvasError::invalid_gate(
                    gate,
                    format!("qubit {} does not exist in a {}-qubit circuit", q, self.num_qubits),
                ));
            }
        }
        if let Gate::Double { control, target, .. } = gate {
            if control == target {
                return Err(CanvasError::invalid_gate(gate, "control and target must differ"));
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The ordered gates.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Total number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Count of gates of the given kind.
    pub fn count_kind(&self, kind: GateKind) -> usize {
        self.gates.iter().filter(|g| g.kind() == kind).count()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Knobs for the parametric circuit mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricSpec {
    /// Register size, clamped to `[2, 8]`.
    pub qubits: usize,
    /// 1..=10; number of layers and entangler density.
    pub complexity: u32,
    /// 0..=1; spread of rotation angles.
    pub entropy: f64,
    /// 1..=8; frequency of the per-layer phase pattern.
    pub harmonics: u32,
}

/// A helper for constructing `Circuit` instances using method chaining.
///
/// Operand errors are collected and reported by [`CircuitBuilder::build`].
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    circuit: Result<Circuit>,
}

impl CircuitBuilder {
    /// Starts a builder for a `num_qubits` register.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Adds a single gate.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        if let Ok(circuit) = self.circuit.as_mut() {
            if let Err(e) = circuit.push(gate) {
                self.circuit = Err(e);
            }
        }
        self
    }

    /// Adds every gate from an iterator.
    pub fn add_gates<I>(self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        gates.into_iter().fold(self, |builder, gate| builder.add_gate(gate))
    }

    /// Finalizes construction, surfacing the first operand error if any.
    pub fn build(self) -> Result<Circuit> {
        self.circuit
    }

    /// Random mode: `3n` gates drawn uniformly from `pool`.
    ///
    /// `num_qubits` is clamped to `[3, 5]`. Two-qubit gates use a uniform
    /// control and `target = (control + 1) mod n`, a ring topology rather
    /// than full connectivity. Angles are uniform in `[0, 2π)`.
    pub fn random<R: Rng>(pool: &[GateKind], num_qubits: usize, rng: &mut R) -> Result<Circuit> {
        if pool.is_empty() {
            return Err(CanvasError::configuration("gate_pool", "gate pool is empty"));
        }
        let (lo, hi) = qubits::RANDOM_RANGE;
        let n = clamp_qubits("random", num_qubits, lo, hi);
        let mut circuit = Circuit::new(n)?;

        for _ in 0..n * qubits::GATES_PER_QUBIT {
            let kind = pool[rng.random_range(0..pool.len())];
            let qubit = rng.random_range(0..n);
            let gate = match kind {
                GateKind::Double(kind) => Gate::Double {
                    kind,
                    control: qubit,
                    target: (qubit + 1) % n,
                },
                GateKind::Single(kind) if kind.is_parameterized() => Gate::Single {
                    kind,
                    target: qubit,
                    angle: Some(rng.random::<f64>() * TAU),
                },
                GateKind::Single(kind) => Gate::Single {
                    kind,
                    target: qubit,
                    angle: None,
                },
            };
            circuit.push(gate)?;
        }

        debug!(qubits = n, gates = circuit.len(), "built random circuit");
        Ok(circuit)
    }

    /// Parametric mode: a layered rotation ansatz.
    ///
    /// Layer count is `1 + complexity / 2`. Each layer applies RY with an
    /// entropy-scaled angle and RZ following the harmonic phase pattern to
    /// every qubit, then ring CX entanglers, each kept with probability
    /// `complexity / 10`. Entropy above 0.5 opens with a Hadamard wall.
    pub fn parametric<R: Rng>(spec: &ParametricSpec, rng: &mut R) -> Result<Circuit> {
        let (lo, hi) = qubits::PARAMETRIC_RANGE;
        let n = clamp_qubits("parametric", spec.qubits, lo, hi);
        let complexity = spec.complexity.clamp(1, 10);
        let entropy = spec.entropy.clamp(0.0, 1.0);
        let harmonics = spec.harmonics.clamp(1, 8) as f64;
        let layers = 1 + complexity as usize / 2;
        let link_probability = complexity as f64 / 10.0;

        let mut circuit = Circuit::new(n)?;
        if entropy > 0.5 {
            for q in 0..n {
                circuit.push(Gate::h(q))?;
            }
        }
        for layer in 0..layers {
            for q in 0..n {
                let spread = 0.5 + 0.5 * rng.random::<f64>();
                circuit.push(Gate::ry(q, PI * entropy * spread))?;
                let pattern = harmonics * (layer * n + q + 1) as f64 / (layers * n) as f64;
                circuit.push(Gate::rz(q, TAU * pattern.fract()))?;
            }
            for q in 0..n {
                if rng.random::<f64>() < link_probability {
                    circuit.push(Gate::cx(q, (q + 1) % n))?;
                }
            }
        }

        debug!(qubits = n, layers, gates = circuit.len(), "built parametric circuit");
        Ok(circuit)
    }
}

fn clamp_qubits(mode: &str, requested: usize, lo: usize, hi: usize) -> usize {
    let n = requested.clamp(lo, hi);
    if n != requested {
        warn!(mode, requested, clamped = n, "qubit count clamped to supported range");
    }
    n
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_qubits = self.num_qubits;
        if self.gates.is_empty() {
            return writeln!(f, "qcanvas::Circuit[0 gates on {} qubits]", num_qubits);
        }
        let num_gates = self.gates.len();

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // grid[row][time] holds the wire segment; row 0 is qubit 0
        let mut grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_gates]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_gates]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total = GATE_WIDTH - slen;
                let pre = total / 2;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre),
                    symbol,
                    H_WIRE.to_string().repeat(total - pre)
                )
            }
        }

        for (t, gate) in self.gates.iter().enumerate() {
            match gate {
                Gate::Single { kind, target, .. } => {
                    grid[*target][t] = format_gate(kind.symbol());
                }
                Gate::Double { kind, control, target } => {
                    let (ctrl_symbol, tgt_symbol) = match kind {
                        TwoQubitGate::Cx => ("@", "X"),
                        TwoQubitGate::Cz => ("@", "●"),
                        TwoQubitGate::Swap => ("×", "×"),
                    };
                    grid[*control][t] = format_gate(ctrl_symbol);
                    grid[*target][t] = format_gate(tgt_symbol);
                    let r_min = (*control).min(*target);
                    let r_max = (*control).max(*target);
                    for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row[t] = V_WIRE;
                    }
                }
            }
        }

        writeln!(f, "qcanvas::Circuit[{} gates on {} qubits]", num_gates, num_qubits)?;
        let label_width = format!("q{}: ", num_qubits - 1).len();
        for r in 0..num_qubits {
            write!(f, "{:<width$}", format!("q{}: ", r), width = label_width)?;
            writeln!(f, "{}", grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_gates {
                    let pad = GATE_WIDTH - 1;
                    let pre = pad / 2;
                    write!(f, "{}{}{}", " ".repeat(pre), v_connect[r][t], " ".repeat(pad - pre))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Gates of a kind a pool cannot produce; used by tests and diagnostics.
pub fn foreign_gates<'a>(circuit: &'a Circuit, pool: &'a [GateKind]) -> impl Iterator<Item = &'a Gate> + 'a {
    circuit.gates().iter().filter(move |g| !pool.contains(&g.kind()))
}

/// Whether the gate is a rotation or phase kind carrying an angle.
pub fn is_angled(gate: &Gate) -> bool {
    matches!(
        gate,
        Gate::Single {
            kind: SingleQubitGate::Rx | SingleQubitGate::Ry | SingleQubitGate::Rz | SingleQubitGate::Phase,
            angle: Some(_),
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_builder_rejects_out_of_range_qubit() {
        let result = CircuitBuilder::new(2).add_gate(Gate::h(0)).add_gate(Gate::cx(1, 2)).build();
        assert!(matches!(result, Err(CanvasError::InvalidGate { .. })));
    }

    #[test]
    fn test_builder_rejects_same_control_and_target() {
        let result = CircuitBuilder::new(3).add_gate(Gate::cz(1, 1)).build();
        assert!(matches!(result, Err(CanvasError::InvalidGate { .. })));
    }

    #[test]
    fn test_random_circuit_shape() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = [GateKind::X, GateKind::H, GateKind::CX];
        let circuit = CircuitBuilder::random(&pool, 3, &mut rng)?;
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.len(), 9);
        assert_eq!(foreign_gates(&circuit, &pool).count(), 0);
        for gate in circuit.gates() {
            if let Gate::Double { control, target, .. } = gate {
                assert_eq!(*target, (*control + 1) % 3, "ring topology");
            }
        }
        Ok(())
    }

    #[test]
    fn test_random_circuit_clamps_qubits() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = [GateKind::RX, GateKind::RY];
        assert_eq!(CircuitBuilder::random(&pool, 8, &mut rng)?.num_qubits(), 5);
        assert_eq!(CircuitBuilder::random(&pool, 1, &mut rng)?.num_qubits(), 3);
        Ok(())
    }

    #[test]
    fn test_random_angles_present_for_rotations() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let circuit = CircuitBuilder::random(&[GateKind::RZ, GateKind::P], 4, &mut rng)?;
        assert!(circuit.gates().iter().all(is_angled));
        Ok(())
    }

    #[test]
    fn test_random_is_reproducible_with_same_seed() -> Result<()> {
        let pool = [GateKind::H, GateKind::RX, GateKind::CZ];
        let a = CircuitBuilder::random(&pool, 4, &mut StdRng::seed_from_u64(99))?;
        let b = CircuitBuilder::random(&pool, 4, &mut StdRng::seed_from_u64(99))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_parametric_circuit_layers() -> Result<()> {
        let spec = ParametricSpec { qubits: 12, complexity: 10, entropy: 0.9, harmonics: 3 };
        let mut rng = StdRng::seed_from_u64(5);
        let circuit = CircuitBuilder::parametric(&spec, &mut rng)?;
        assert_eq!(circuit.num_qubits(), 8);
        // Hadamard wall plus 6 layers of RY/RZ, all ring links kept at complexity 10
        assert_eq!(circuit.count_kind(GateKind::H), 8);
        assert_eq!(circuit.count_kind(GateKind::RY), 6 * 8);
        assert_eq!(circuit.count_kind(GateKind::CX), 6 * 8);
        Ok(())
    }

    #[test]
    fn test_display_draws_every_wire() -> Result<()> {
        let circuit = CircuitBuilder::new(3).add_gate(Gate::h(0)).add_gate(Gate::cx(0, 2)).build()?;
        let text = circuit.to_string();
        assert!(text.starts_with("qcanvas::Circuit[2 gates on 3 qubits]"));
        assert!(text.contains("q2:"));
        assert!(text.contains('@'));
        Ok(())
    }
}
