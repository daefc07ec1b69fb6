// src/validation/mod.rs

//! Sanity checks on amplitude vectors and measurement distributions.

use crate::core::{AmplitudeVector, CanvasError, Result};

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
const DEFAULT_DISTRIBUTION_TOLERANCE: f64 = 1e-9;

/// Drift the simulator tolerates silently after a run.
pub const SIMULATION_NORM_TOLERANCE: f64 = 1e-6;

/// Checks that the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `AmplitudeVector` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(CanvasError::Simulation)` otherwise.
pub fn check_normalization(state: &AmplitudeVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance || !norm_sq.is_finite() {
        Err(CanvasError::Simulation(format!(
            "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
            norm_sq, effective_tolerance
        )))
    } else {
        Ok(())
    }
}

/// Checks that `probabilities` are finite, non-negative and sum to 1.
pub fn check_distribution<'a, I>(probabilities: I, tolerance: Option<f64>) -> Result<()>
where
    I: IntoIterator<Item = &'a f64>,
{
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_DISTRIBUTION_TOLERANCE);
    let mut total = 0.0;
    for p in probabilities {
        if !p.is_finite() || *p < 0.0 {
            return Err(CanvasError::Simulation(format!("invalid probability {}", p)));
        }
        total += p;
    }
    if (total - 1.0).abs() > effective_tolerance {
        return Err(CanvasError::Simulation(format!(
            "distribution sums to {} (Deviation > {})",
            total, effective_tolerance
        )));
    }
    Ok(())
}

/// Performs the basic validation applied to simulator output.
pub fn validate_state(state: &AmplitudeVector, norm_tolerance: Option<f64>) -> Result<()> {
    check_normalization(state, norm_tolerance)?;
    check_distribution(state.probabilities().iter(), norm_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_zero_state_is_valid() -> Result<()> {
        validate_state(&AmplitudeVector::zero_state(3)?, None)
    }

    #[test]
    fn test_unnormalized_state_is_rejected() -> Result<()> {
        let state = AmplitudeVector::from_amplitudes(vec![Complex64::new(0.9, 0.0), Complex64::new(0.0, 0.0)])?;
        assert!(check_normalization(&state, None).is_err());
        assert!(check_normalization(&state, Some(0.5)).is_ok());
        Ok(())
    }

    #[test]
    fn test_distribution_checks() {
        assert!(check_distribution(&[0.25, 0.75], None).is_ok());
        assert!(check_distribution(&[0.5, 0.4], None).is_err());
        assert!(check_distribution(&[1.5, -0.5], None).is_err());
    }
}
