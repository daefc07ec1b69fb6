// src/measurement/mod.rs

//! Turns a final amplitude vector into measurement outcomes.
//!
//! Two modes are available. Shot sampling ([`MeasurementMode::Shots`]) is the
//! canonical one: `S` uniform draws are matched against the cumulative
//! distribution in index order. [`MeasurementMode::Distribution`] exposes the
//! renormalised `|a|^2` weights directly.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::core::constants::sampling;
use crate::core::{AmplitudeVector, CanvasError, Result};

/// How a state vector is turned into outcome weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementMode {
    /// Draw this many independent shots.
    Shots(u32),
    /// Use the exact probabilities.
    Distribution,
}

impl Default for MeasurementMode {
    fn default() -> Self {
        MeasurementMode::Shots(sampling::DEFAULT_SHOTS)
    }
}

/// Outcome weights keyed by basis-state value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcomes {
    /// Sampled counts; they sum to `shots`.
    Counts {
        /// Total number of shots drawn.
        shots: u64,
        /// Occurrences per observed value.
        counts: BTreeMap<u64, u64>,
    },
    /// Exact probabilities summing to 1.
    Probabilities(BTreeMap<u64, f64>),
}

/// One outcome after ranking by weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOutcome {
    /// Zero-based position in the ranking.
    pub rank: usize,
    /// Basis-state value.
    pub value: u64,
    /// MSB-first bitstring of `value`.
    pub bits: String,
    /// Weight in `[0, 1]`.
    pub probability: f64,
    /// Raw count when the result was sampled.
    pub count: Option<u64>,
}

/// Result of measuring an `n`-qubit register.
///
/// Only basis states with a non-zero count or probability are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    num_qubits: usize,
    outcomes: Outcomes,
}

impl MeasurementResult {
    /// Wraps sampled counts. Zero counts are dropped.
    pub fn from_counts(num_qubits: usize, counts: BTreeMap<u64, u64>) -> Result<Self> {
        let counts: BTreeMap<u64, u64> = counts.into_iter().filter(|(_, c)| *c > 0).collect();
        let shots: u64 = counts.values().sum();
        if shots == 0 {
            return Err(CanvasError::configuration("shots", "a measurement needs at least one shot"));
        }
        Self::check_keys(num_qubits, counts.keys())?;
        Ok(Self {
            num_qubits,
            outcomes: Outcomes::Counts { shots, counts },
        })
    }

    /// Wraps probabilities, renormalising them to sum to 1. Non-positive
    /// entries are dropped.
    pub fn from_probabilities(num_qubits: usize, probabilities: BTreeMap<u64, f64>) -> Result<Self> {
        let kept: BTreeMap<u64, f64> = probabilities
            .into_iter()
            .filter(|(_, p)| p.is_finite() && *p > 0.0)
            .collect();
        let total: f64 = kept.values().sum();
        if total <= 0.0 {
            return Err(CanvasError::Simulation("distribution has no weight".to_string()));
        }
        Self::check_keys(num_qubits, kept.keys())?;
        let probabilities = kept.into_iter().map(|(k, p)| (k, p / total)).collect();
        Ok(Self {
            num_qubits,
            outcomes: Outcomes::Probabilities(probabilities),
        })
    }

    fn check_keys<'a>(num_qubits: usize, mut keys: impl Iterator<Item = &'a u64>) -> Result<()> {
        let limit = 1u64 << num_qubits;
        match keys.find(|k| **k >= limit) {
            Some(k) => Err(CanvasError::Simulation(format!(
                "outcome {} does not fit in {} qubits",
                k, num_qubits
            ))),
            None => Ok(()),
        }
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw outcome table.
    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    /// Total shots, or `None` for an exact distribution.
    pub fn shots(&self) -> Option<u64> {
        match &self.outcomes {
            Outcomes::Counts { shots, .. } => Some(*shots),
            Outcomes::Probabilities(_) => None,
        }
    }

    /// Number of distinct outcomes present.
    pub fn len(&self) -> usize {
        match &self.outcomes {
            Outcomes::Counts { counts, .. } => counts.len(),
            Outcomes::Probabilities(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Observed values in ascending order.
    pub fn values(&self) -> Vec<u64> {
        match &self.outcomes {
            Outcomes::Counts { counts, .. } => counts.keys().copied().collect(),
            Outcomes::Probabilities(p) => p.keys().copied().collect(),
        }
    }

    /// Relative weight of `value`; zero when it was never observed.
    pub fn probability(&self, value: u64) -> f64 {
        match &self.outcomes {
            Outcomes::Counts { shots, counts } => {
                counts.get(&value).map_or(0.0, |c| *c as f64 / *shots as f64)
            }
            Outcomes::Probabilities(p) => p.get(&value).copied().unwrap_or(0.0),
        }
    }

    /// Count of `value` when sampled.
    pub fn count(&self, value: u64) -> Option<u64> {
        match &self.outcomes {
            Outcomes::Counts { counts, .. } => Some(counts.get(&value).copied().unwrap_or(0)),
            Outcomes::Probabilities(_) => None,
        }
    }

    /// MSB-first bitstring of `value` padded to the register width.
    pub fn bitstring(&self, value: u64) -> String {
        format!("{:0width$b}", value, width = self.num_qubits)
    }

    /// Outcomes by descending weight; ties broken by ascending value.
    pub fn ranked(&self) -> Vec<RankedOutcome> {
        let mut entries: Vec<(u64, f64, Option<u64>)> = self
            .values()
            .into_iter()
            .map(|v| (v, self.probability(v), self.count(v)))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
            .into_iter()
            .enumerate()
            .map(|(rank, (value, probability, count))| RankedOutcome {
                rank,
                value,
                bits: self.bitstring(value),
                probability,
                count,
            })
            .collect()
    }

    /// The `k` heaviest outcomes.
    pub fn top_k(&self, k: usize) -> Vec<RankedOutcome> {
        let mut ranked = self.ranked();
        ranked.truncate(k);
        ranked
    }

    /// Sum of all observed values.
    pub fn quantum_seed(&self) -> u64 {
        self.values().into_iter().fold(0u64, |acc, v| acc.wrapping_add(v))
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shots() {
            Some(shots) => writeln!(f, "Measurement ({} qubits, {} shots):", self.num_qubits, shots)?,
            None => writeln!(f, "Measurement ({} qubits, exact):", self.num_qubits)?,
        }
        for outcome in self.ranked() {
            match outcome.count {
                Some(c) => writeln!(f, "  |{}>: {} ({:.4})", outcome.bits, c, outcome.probability)?,
                None => writeln!(f, "  |{}>: {:.4}", outcome.bits, outcome.probability)?,
            }
        }
        Ok(())
    }
}

/// Draws measurement outcomes from amplitude vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler;

impl Sampler {
    /// Measures `state` in the requested mode.
    pub fn measure<R: Rng>(state: &AmplitudeVector, mode: MeasurementMode, rng: &mut R) -> Result<MeasurementResult> {
        match mode {
            MeasurementMode::Shots(shots) => Self::sample_shots(state, shots, rng),
            MeasurementMode::Distribution => Self::distribution(state),
        }
    }

    /// Per-state probabilities clamped to be non-negative and renormalised.
    ///
    /// Entries at or below [`sampling::PROBABILITY_FLOOR`] are rounding
    /// residue from gate application and are zeroed, so they never show up
    /// as outcomes of an exact distribution.
    pub fn normalized_probabilities(state: &AmplitudeVector) -> Result<Vec<f64>> {
        let mut probs: Vec<f64> = state
            .probabilities()
            .into_iter()
            .map(|p| if p.is_finite() && p > sampling::PROBABILITY_FLOOR { p } else { 0.0 })
            .collect();
        let total: f64 = probs.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(CanvasError::Simulation(format!(
                "state has no measurable weight (total {})",
                total
            )));
        }
        probs.iter_mut().for_each(|p| *p /= total);
        Ok(probs)
    }

    /// Draws `shots` samples by walking the cumulative distribution.
    ///
    /// Each draw `r` in `[0, 1)` goes to the first state with non-zero
    /// probability whose cumulative weight reaches `r`. Rounding that leaves
    /// `r` above the final cumulative value assigns the shot to the last
    /// non-zero state, so the counts always total `shots`.
    pub fn sample_shots<R: Rng>(state: &AmplitudeVector, shots: u32, rng: &mut R) -> Result<MeasurementResult> {
        if shots == 0 {
            return Err(CanvasError::configuration("shots", "shot sampling needs at least one shot"));
        }
        let probs = Self::normalized_probabilities(state)?;
        let mut cumulative = Vec::with_capacity(probs.len());
        let mut running = 0.0;
        for p in &probs {
            running += p;
            cumulative.push(running);
        }
        let last_nonzero = probs
            .iter()
            .rposition(|p| *p > 0.0)
            .ok_or_else(|| CanvasError::Simulation("no non-zero state to sample".to_string()))?;

        let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
        for _ in 0..shots {
            let draw: f64 = rng.random::<f64>();
            let start = cumulative.partition_point(|c| *c < draw);
            let index = (start..probs.len())
                .find(|i| probs[*i] > 0.0)
                .unwrap_or(last_nonzero);
            *counts.entry(index as u64).or_insert(0) += 1;
        }

        debug!(shots, distinct = counts.len(), "sampled measurement shots");
        MeasurementResult::from_counts(state.num_qubits(), counts)
    }

    /// Exposes the renormalised distribution, omitting zero entries.
    pub fn distribution(state: &AmplitudeVector) -> Result<MeasurementResult> {
        let probs = Self::normalized_probabilities(state)?;
        let map: BTreeMap<u64, f64> = probs
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p > 0.0)
            .map(|(i, p)| (i as u64, p))
            .collect();
        debug!(distinct = map.len(), "computed exact distribution");
        MeasurementResult::from_probabilities(state.num_qubits(), map)
    }

    /// Simulated readout error.
    ///
    /// Sampled results have every bit of every shot flipped with probability
    /// [`sampling::READOUT_FLIP_PROBABILITY`]. Exact distributions are mixed
    /// with the uniform distribution at weight [`sampling::UNIFORM_MIX`].
    pub fn apply_readout_noise<R: Rng>(result: &MeasurementResult, rng: &mut R) -> Result<MeasurementResult> {
        let n = result.num_qubits();
        match result.outcomes() {
            Outcomes::Counts { counts, .. } => {
                let mut noisy: BTreeMap<u64, u64> = BTreeMap::new();
                for (value, count) in counts {
                    for _ in 0..*count {
                        let mut v = *value;
                        for bit in 0..n {
                            if rng.random::<f64>() < sampling::READOUT_FLIP_PROBABILITY {
                                v ^= 1 << bit;
                            }
                        }
                        *noisy.entry(v).or_insert(0) += 1;
                    }
                }
                MeasurementResult::from_counts(n, noisy)
            }
            Outcomes::Probabilities(probs) => {
                let dim = 1u64 << n;
                let uniform = sampling::UNIFORM_MIX / dim as f64;
                let mixed = (0..dim)
                    .map(|v| {
                        let p = probs.get(&v).copied().unwrap_or(0.0);
                        (v, (1.0 - sampling::UNIFORM_MIX) * p + uniform)
                    })
                    .collect();
                MeasurementResult::from_probabilities(n, mixed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn plus_state() -> AmplitudeVector {
        let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        AmplitudeVector::from_amplitudes(vec![s, s]).expect("valid state")
    }

    #[test]
    fn test_shot_counts_sum_to_requested() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(7);
        let result = Sampler::sample_shots(&plus_state(), 1024, &mut rng)?;
        assert_eq!(result.shots(), Some(1024));
        let total: u64 = result.values().iter().filter_map(|v| result.count(*v)).sum();
        assert_eq!(total, 1024);
        Ok(())
    }

    #[test]
    fn test_rounding_residue_is_dropped_from_distribution() -> Result<()> {
        // P(1) = 1e-24 is below the floor, P(2) = 1e-10 is a real outcome
        let main = Complex64::new((1.0f64 - 1e-10).sqrt(), 0.0);
        let state = AmplitudeVector::from_amplitudes(vec![
            main,
            Complex64::new(1e-12, 0.0),
            Complex64::new(1e-5, 0.0),
            Complex64::new(0.0, 0.0),
        ])?;
        let result = Sampler::distribution(&state)?;
        assert_eq!(result.values(), vec![0, 2]);
        assert!(result.probability(2) > 0.0);
        Ok(())
    }

    #[test]
    fn test_zero_probability_states_never_sampled() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(11);
        let state = AmplitudeVector::zero_state(3)?;
        let result = Sampler::sample_shots(&state, 500, &mut rng)?;
        assert_eq!(result.values(), vec![0]);
        assert_eq!(result.count(0), Some(500));
        Ok(())
    }

    #[test]
    fn test_zero_shots_is_configuration_error() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let err = Sampler::sample_shots(&plus_state(), 0, &mut rng);
        assert!(matches!(err, Err(CanvasError::Configuration { .. })));
        Ok(())
    }

    #[test]
    fn test_distribution_renormalises_and_omits_zeros() -> Result<()> {
        let amps = vec![
            Complex64::new(0.6, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.6),
        ];
        let state = AmplitudeVector::from_amplitudes(amps)?;
        let result = Sampler::distribution(&state)?;
        assert_eq!(result.values(), vec![0, 3]);
        assert!((result.probability(0) - 0.5).abs() < 1e-12);
        assert!((result.probability(3) - 0.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_ranking_breaks_ties_by_value() -> Result<()> {
        let counts = BTreeMap::from([(5, 10), (2, 10), (7, 30)]);
        let result = MeasurementResult::from_counts(3, counts)?;
        let ranked = result.ranked();
        let order: Vec<u64> = ranked.iter().map(|r| r.value).collect();
        assert_eq!(order, vec![7, 2, 5]);
        assert_eq!(ranked[0].bits, "111");
        assert_eq!(ranked[1].bits, "010");
        assert_eq!(result.top_k(1).len(), 1);
        assert_eq!(result.quantum_seed(), 14);
        Ok(())
    }

    #[test]
    fn test_readout_noise_preserves_shot_total() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let clean = Sampler::sample_shots(&AmplitudeVector::zero_state(4)?, 2000, &mut rng)?;
        let noisy = Sampler::apply_readout_noise(&clean, &mut rng)?;
        assert_eq!(noisy.shots(), Some(2000));
        // With a 1% flip rate on 4 bits some shots should leave |0000>
        assert!(noisy.len() > 1);
        assert!(noisy.probability(0) > 0.9);
        Ok(())
    }

    #[test]
    fn test_readout_noise_mixes_distribution() -> Result<()> {
        let clean = Sampler::distribution(&AmplitudeVector::zero_state(2)?)?;
        let noisy = Sampler::apply_readout_noise(&clean, &mut StdRng::seed_from_u64(0))?;
        assert_eq!(noisy.len(), 4);
        assert!((noisy.probability(0) - (0.98 + 0.005)).abs() < 1e-12);
        assert!((noisy.probability(3) - 0.005).abs() < 1e-12);
        Ok(())
    }
}
