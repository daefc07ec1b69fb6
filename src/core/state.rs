// src/core/state.rs

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt;

use super::constants::qubits;
use super::error::{CanvasError, Result};

/// The complex amplitude vector of an n-qubit register.
///
/// Index `i` holds the amplitude of the basis state whose bits spell `i`,
/// with qubit `t` stored in bit `t` (qubit 0 is the least significant bit).
/// A vector is created for one simulator run and dropped with it.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct AmplitudeVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl AmplitudeVector {
    /// Allocates the register in `|0...0>`.
    ///
    /// # Errors
    /// * `Configuration` if `num_qubits` is outside `1..=8`.
    /// * `Resource` if the host cannot provide `2^n` complex slots.
    pub fn zero_state(num_qubits: usize) -> Result<Self> {
        if !(qubits::MIN..=qubits::MAX).contains(&num_qubits) {
            return Err(CanvasError::configuration(
                "qubit_count",
                format!(
                    "{} qubits requested, simulator supports {}..={}",
                    num_qubits,
                    qubits::MIN,
                    qubits::MAX
                ),
            ));
        }
        let dim = 1usize << num_qubits;
        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(dim)
            .map_err(|_| CanvasError::resource("amplitude vector", dim))?;
        amplitudes.resize(dim, Complex64::zero());
        amplitudes[0] = Complex64::one();
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Builds a vector from explicit amplitudes. The length must be `2^n` for
    /// a supported `n`; no normalization is enforced.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Result<Self> {
        let dim = amplitudes.len();
        if !dim.is_power_of_two() {
            return Err(CanvasError::Simulation(format!(
                "state dimension {} is not a power of two",
                dim
            )));
        }
        let num_qubits = dim.trailing_zeros() as usize;
        if !(qubits::MIN..=qubits::MAX).contains(&num_qubits) {
            return Err(CanvasError::configuration(
                "qubit_count",
                format!("{} qubits is outside the supported range", num_qubits),
            ));
        }
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states, `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Swaps in a freshly computed buffer of the same dimension.
    pub(crate) fn replace(&mut self, amplitudes: Vec<Complex64>) {
        debug_assert_eq!(amplitudes.len(), self.amplitudes.len());
        self.amplitudes = amplitudes;
    }

    /// Measurement probability of basis state `index`, `re² + im²` clamped to
    /// be non-negative.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes
            .get(index)
            .map(|a| a.norm_sqr().max(0.0))
            .unwrap_or(0.0)
    }

    /// Probabilities of every basis state in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr().max(0.0)).collect()
    }

    /// Sum of squared magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Formats a basis index as an n-character bitstring, qubit `n-1` first.
    pub fn bitstring(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }
}

impl fmt::Display for AmplitudeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amplitudes[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state_for_all_supported_sizes() -> Result<()> {
        for n in qubits::MIN..=qubits::MAX {
            let state = AmplitudeVector::zero_state(n)?;
            assert_eq!(state.dim(), 1 << n);
            assert_eq!(state.probability(0), 1.0);
            assert!(state.probabilities()[1..].iter().all(|p| *p == 0.0));
        }
        Ok(())
    }

    #[test]
    fn test_zero_state_rejects_out_of_range() {
        assert!(matches!(
            AmplitudeVector::zero_state(0),
            Err(CanvasError::Configuration { .. })
        ));
        assert!(matches!(
            AmplitudeVector::zero_state(9),
            Err(CanvasError::Configuration { .. })
        ));
    }

    #[test]
    fn test_from_amplitudes_requires_power_of_two() {
        let amps = vec![Complex64::one(); 3];
        assert!(AmplitudeVector::from_amplitudes(amps).is_err());
    }

    #[test]
    fn test_bitstring_is_msb_first() -> Result<()> {
        let state = AmplitudeVector::zero_state(3)?;
        assert_eq!(state.bitstring(6), "110");
        assert_eq!(state.bitstring(1), "001");
        Ok(())
    }
}
