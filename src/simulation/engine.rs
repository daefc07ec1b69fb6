// src/simulation/engine.rs
use num_complex::Complex64;
use num_traits::Zero;
use tracing::trace;

use crate::core::{AmplitudeVector, CanvasError, Result};
use crate::gates::{Gate, GateAction, Matrix2, TwoQubitGate};

/// Evolves one amplitude vector gate by gate.
/// (Internal visibility)
#[derive(Debug)]
pub(crate) struct SimulationEngine {
    state: AmplitudeVector,
}

impl SimulationEngine {
    /// Initializes the register in `|0...0>`.
    pub(crate) fn init(num_qubits: usize) -> Result<Self> {
        Ok(Self {
            state: AmplitudeVector::zero_state(num_qubits)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: AmplitudeVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            return Err(CanvasError::Simulation(format!(
                "Cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )));
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &AmplitudeVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> AmplitudeVector {
        self.state
    }

    /// Applies one gate using its library action.
    pub(crate) fn apply(&mut self, gate: &Gate) -> Result<()> {
        match (gate, gate.action()) {
            (Gate::Single { target, .. }, GateAction::Matrix(matrix)) => {
                self.apply_single_qubit_gate(*target, &matrix)
            }
            (Gate::Double { control, target, .. }, GateAction::Permutation(kind)) => match kind {
                TwoQubitGate::Cx => self.apply_cx(*control, *target),
                TwoQubitGate::Cz => self.apply_cz(*control, *target),
                TwoQubitGate::Swap => self.apply_swap(*control, *target),
            },
            _ => Err(CanvasError::Simulation(format!("gate {} has no matching action", gate))),
        }
    }

    fn check_qubit(&self, qubit: usize) -> Result<usize> {
        if qubit >= self.state.num_qubits() {
            return Err(CanvasError::Simulation(format!(
                "qubit {} out of range for {}-qubit register",
                qubit,
                self.state.num_qubits()
            )));
        }
        Ok(1usize << qubit)
    }

    /// Applies a 2×2 matrix to qubit `target`.
    ///
    /// Indices are visited in pairs `(i0, i0 | mask)` differing only in bit
    /// `target`; every new amplitude is read from the prior snapshot and
    /// written to a fresh buffer.
    fn apply_single_qubit_gate(&mut self, target: usize, matrix: &Matrix2) -> Result<()> {
        let mask = self.check_qubit(target)?;
        let lower_mask = mask - 1;
        let dim = self.state.dim();
        let prior = self.state.amplitudes();
        let mut next = vec![Complex64::zero(); dim];

        for i in 0..dim / 2 {
            // Insert a 0 at bit `target`
            let i0 = ((i & !lower_mask) << 1) | (i & lower_mask);
            let i1 = i0 | mask;
            let (psi_0, psi_1) = (prior[i0], prior[i1]);
            next[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            next[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }

        self.state.replace(next);
        trace!(target, "applied single-qubit gate");
        Ok(())
    }

    /// Where bit `control` is 1, amplitude `i` takes the prior amplitude at
    /// `i ^ (1 << target)`.
    fn apply_cx(&mut self, control: usize, target: usize) -> Result<()> {
        let c_mask = self.check_qubit(control)?;
        let t_mask = self.check_qubit(target)?;
        let prior = self.state.amplitudes().to_vec();
        let amps = self.state.amplitudes_mut();
        for (i, amp) in amps.iter_mut().enumerate() {
            if i & c_mask != 0 {
                *amp = prior[i ^ t_mask];
            }
        }
        trace!(control, target, "applied CX");
        Ok(())
    }

    /// Sign flip where both bits are 1.
    fn apply_cz(&mut self, control: usize, target: usize) -> Result<()> {
        let both = self.check_qubit(control)? | self.check_qubit(target)?;
        for (i, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
        trace!(control, target, "applied CZ");
        Ok(())
    }

    /// Exchanges amplitudes of indices whose bits `a` and `b` differ.
    fn apply_swap(&mut self, a: usize, b: usize) -> Result<()> {
        let a_mask = self.check_qubit(a)?;
        let b_mask = self.check_qubit(b)?;
        let amps = self.state.amplitudes_mut();
        for i in 0..amps.len() {
            // Visit each differing pair once, from the side with bit a set
            if i & a_mask != 0 && i & b_mask == 0 {
                amps.swap(i, i ^ a_mask ^ b_mask);
            }
        }
        trace!(a, b, "applied SWAP");
        Ok(())
    }
}
