// src/simulation/results.rs
use std::fmt;

use crate::core::AmplitudeVector;

/// Final state of a simulator run together with what was actually executed.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    state: AmplitudeVector,
    applied_gates: usize,
    skipped_gates: usize,
}

impl SimulationResult {
    pub(crate) fn new(state: AmplitudeVector, applied_gates: usize, skipped_gates: usize) -> Self {
        Self {
            state,
            applied_gates,
            skipped_gates,
        }
    }

    /// The final amplitude vector.
    pub fn state(&self) -> &AmplitudeVector {
        &self.state
    }

    /// Consumes the result, returning the final amplitude vector.
    pub fn into_state(self) -> AmplitudeVector {
        self.state
    }

    /// Gates that changed the state vector.
    pub fn applied_gates(&self) -> usize {
        self.applied_gates
    }

    /// Gates ignored because the active gate set does not simulate them.
    pub fn skipped_gates(&self) -> usize {
        self.skipped_gates
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        writeln!(
            f,
            "  {} gates applied, {} skipped, norm {:.6}",
            self.applied_gates,
            self.skipped_gates,
            self.state.norm_sqr()
        )?;
        let mut ranked: Vec<(usize, f64)> = self
            .state
            .probabilities()
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p > 1e-12)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        for (index, p) in ranked.into_iter().take(8) {
            writeln!(f, "    |{}>: {:.4}", self.state.bitstring(index), p)?;
        }
        Ok(())
    }
}
