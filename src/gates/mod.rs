// src/gates/mod.rs

//! Gate definitions and the gate library.
//!
//! A [`Gate`] is an immutable instruction acting on one or two qubits of a
//! register. The library functions turn a gate kind (plus optional angle) into
//! the action the simulator performs: a dense 2×2 unitary on the target
//! qubit's subspace, or an index permutation for the two-qubit gates.

use num_complex::Complex64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use crate::core::CanvasError;

/// Row-major 2×2 complex matrix.
pub type Matrix2 = [[Complex64; 2]; 2];

/// Single-qubit gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleQubitGate {
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Rotation about the X axis.
    Rx,
    /// Rotation about the Y axis.
    Ry,
    /// Rotation about the Z axis.
    Rz,
    /// Phase gate `diag(1, e^{iθ})`.
    Phase,
}

impl SingleQubitGate {
    /// Whether the gate consumes an angle.
    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::Rx | Self::Ry | Self::Rz | Self::Phase)
    }

    /// Diagram symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::H => "H",
            Self::X => "X",
            Self::Rx => "RX",
            Self::Ry => "RY",
            Self::Rz => "RZ",
            Self::Phase => "P",
        }
    }
}

/// Two-qubit gate kinds. These act by permuting or sign-flipping amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoQubitGate {
    /// Controlled-X.
    Cx,
    /// Controlled-Z.
    Cz,
    /// Swap.
    Swap,
}

impl TwoQubitGate {
    /// Diagram symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Cx => "CX",
            Self::Cz => "CZ",
            Self::Swap => "SWAP",
        }
    }
}

/// A gate kind without operands; the entries of a style's gate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// One-qubit gate.
    Single(SingleQubitGate),
    /// Two-qubit gate.
    Double(TwoQubitGate),
}

impl GateKind {
    pub const H: GateKind = GateKind::Single(SingleQubitGate::H);
    pub const X: GateKind = GateKind::Single(SingleQubitGate::X);
    pub const RX: GateKind = GateKind::Single(SingleQubitGate::Rx);
    pub const RY: GateKind = GateKind::Single(SingleQubitGate::Ry);
    pub const RZ: GateKind = GateKind::Single(SingleQubitGate::Rz);
    pub const P: GateKind = GateKind::Single(SingleQubitGate::Phase);
    pub const CX: GateKind = GateKind::Double(TwoQubitGate::Cx);
    pub const CZ: GateKind = GateKind::Double(TwoQubitGate::Cz);
    pub const SWAP: GateKind = GateKind::Double(TwoQubitGate::Swap);
}

impl FromStr for GateKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" => Ok(Self::H),
            "x" => Ok(Self::X),
            "rx" => Ok(Self::RX),
            "ry" => Ok(Self::RY),
            "rz" => Ok(Self::RZ),
            "p" | "phase" => Ok(Self::P),
            "cx" | "cnot" => Ok(Self::CX),
            "cz" => Ok(Self::CZ),
            "swap" => Ok(Self::SWAP),
            other => Err(CanvasError::configuration(
                "gate",
                format!("unknown gate name '{}'", other),
            )),
        }
    }
}

/// A gate bound to concrete qubits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gate {
    /// One-qubit gate on `target`; `angle` is only read by parameterized kinds.
    Single {
        kind: SingleQubitGate,
        target: usize,
        angle: Option<f64>,
    },
    /// Two-qubit gate; for SWAP the roles of control and target are symmetric.
    Double {
        kind: TwoQubitGate,
        control: usize,
        target: usize,
    },
}

impl Gate {
    /// Hadamard on `target`.
    pub fn h(target: usize) -> Self {
        Self::Single { kind: SingleQubitGate::H, target, angle: None }
    }

    /// Pauli-X on `target`.
    pub fn x(target: usize) -> Self {
        Self::Single { kind: SingleQubitGate::X, target, angle: None }
    }

    /// RX(θ) on `target`.
    pub fn rx(target: usize, theta: f64) -> Self {
        Self::Single { kind: SingleQubitGate::Rx, target, angle: Some(theta) }
    }

    /// RY(θ) on `target`.
    pub fn ry(target: usize, theta: f64) -> Self {
        Self::Single { kind: SingleQubitGate::Ry, target, angle: Some(theta) }
    }

    /// RZ(θ) on `target`.
    pub fn rz(target: usize, theta: f64) -> Self {
        Self::Single { kind: SingleQubitGate::Rz, target, angle: Some(theta) }
    }

    /// Phase(θ) on `target`.
    pub fn phase(target: usize, theta: f64) -> Self {
        Self::Single { kind: SingleQubitGate::Phase, target, angle: Some(theta) }
    }

    /// CX with the given control and target.
    pub fn cx(control: usize, target: usize) -> Self {
        Self::Double { kind: TwoQubitGate::Cx, control, target }
    }

    /// CZ with the given control and target.
    pub fn cz(control: usize, target: usize) -> Self {
        Self::Double { kind: TwoQubitGate::Cz, control, target }
    }

    /// SWAP of two qubits.
    pub fn swap(a: usize, b: usize) -> Self {
        Self::Double { kind: TwoQubitGate::Swap, control: a, target: b }
    }

    /// Operand-free kind of this gate.
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::Single { kind, .. } => GateKind::Single(*kind),
            Gate::Double { kind, .. } => GateKind::Double(*kind),
        }
    }

    /// Every qubit index the gate touches.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::Single { target, .. } => vec![*target],
            Gate::Double { control, target, .. } => vec![*control, *target],
        }
    }

    /// The action the simulator should perform for this gate.
    pub fn action(&self) -> GateAction {
        match self {
            Gate::Single { kind, angle, .. } => GateAction::Matrix(single_qubit_matrix(*kind, *angle)),
            Gate::Double { kind, .. } => GateAction::Permutation(*kind),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Single { kind, target, angle } => match angle {
                Some(theta) if kind.is_parameterized() => {
                    write!(f, "{}({:.3})[{}]", kind.symbol(), theta, target)
                }
                _ => write!(f, "{}[{}]", kind.symbol(), target),
            },
            Gate::Double { kind, control, target } => {
                write!(f, "{}({},{})", kind.symbol(), control, target)
            }
        }
    }
}

/// What the simulator does for a gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateAction {
    /// Apply a dense 2×2 unitary to the target qubit's subspace.
    Matrix(Matrix2),
    /// Permute (or sign-flip) amplitudes by index manipulation.
    Permutation(TwoQubitGate),
}

/// Library entry point: the action for a gate kind and optional angle.
pub fn gate_action(kind: GateKind, angle: Option<f64>) -> GateAction {
    match kind {
        GateKind::Single(single) => GateAction::Matrix(single_qubit_matrix(single, angle)),
        GateKind::Double(double) => GateAction::Permutation(double),
    }
}

/// The 2×2 unitary for a single-qubit gate. A missing angle means 0, which
/// reduces every rotation and phase gate to the identity.
pub fn single_qubit_matrix(kind: SingleQubitGate, angle: Option<f64>) -> Matrix2 {
    let theta = angle.unwrap_or(0.0);
    match kind {
        SingleQubitGate::H => hadamard(),
        SingleQubitGate::X => pauli_x(),
        SingleQubitGate::Rx => rx(theta),
        SingleQubitGate::Ry => ry(theta),
        SingleQubitGate::Rz => rz(theta),
        SingleQubitGate::Phase => phase(theta),
    }
}

/// Identity matrix.
pub fn identity() -> Matrix2 {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::one()],
    ]
}

/// Hadamard: entries ±1/√2.
pub fn hadamard() -> Matrix2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

/// Pauli-X: binary swap.
pub fn pauli_x() -> Matrix2 {
    [
        [Complex64::zero(), Complex64::one()],
        [Complex64::one(), Complex64::zero()],
    ]
}

/// RX(θ) = [[cos(θ/2), -i·sin(θ/2)], [-i·sin(θ/2), cos(θ/2)]]
pub fn rx(theta: f64) -> Matrix2 {
    let (sin_a, cos_a) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos_a, 0.0), Complex64::new(0.0, -sin_a)],
        [Complex64::new(0.0, -sin_a), Complex64::new(cos_a, 0.0)],
    ]
}

/// RY(θ) = [[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]
pub fn ry(theta: f64) -> Matrix2 {
    let (sin_a, cos_a) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos_a, 0.0), Complex64::new(-sin_a, 0.0)],
        [Complex64::new(sin_a, 0.0), Complex64::new(cos_a, 0.0)],
    ]
}

/// RZ(θ) = diag(e^(-iθ/2), e^(iθ/2))
pub fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), Complex64::zero()],
        [Complex64::zero(), Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// Phase(θ) = diag(1, e^(iθ))
pub fn phase(theta: f64) -> Matrix2 {
    [
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::from_polar(1.0, theta)],
    ]
}
