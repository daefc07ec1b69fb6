//! Error handling logic

use thiserror::Error;

use crate::pipeline::Stage;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Tagged failures surfaced by the simulation and rendering core.
///
/// Every variant carries a human-readable reason. The core never returns a
/// partially rendered image alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    /// A parameter lies outside the range the core accepts and could not be clamped.
    #[error("Invalid configuration '{parameter}': {reason}")]
    Configuration {
        /// Name of the offending parameter.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A gate refers to qubits that do not exist in its circuit.
    #[error("Invalid gate {gate}: {reason}")]
    InvalidGate {
        /// Short rendering of the gate, e.g. `CX(0,3)`.
        gate: String,
        /// Why the gate was rejected.
        reason: String,
    },

    /// The host could not provide memory for a state vector or raster.
    #[error("Resource exhausted: could not allocate {requested} slots for {what}")]
    Resource {
        /// What was being allocated.
        what: String,
        /// Number of elements requested.
        requested: usize,
    },

    /// Failure while evolving the amplitude vector.
    #[error("Simulation error: {0}")]
    Simulation(String),

    /// Failure while producing the raster canvas.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// The generation state machine was asked to skip or leave a terminal stage.
    #[error("Invalid stage transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// Stage the job was in.
        from: Stage,
        /// Stage that was requested.
        to: Stage,
    },

    /// The request was abandoned before completion.
    #[error("Generation cancelled during {0:?}")]
    Cancelled(Stage),

    /// Configuration or metadata (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Installing the tracing subscriber failed.
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl CanvasError {
    /// Create a configuration error.
    pub fn configuration(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid gate error.
    pub fn invalid_gate(gate: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidGate {
            gate: gate.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a resource error.
    pub fn resource(what: impl Into<String>, requested: usize) -> Self {
        Self::Resource {
            what: what.into(),
            requested,
        }
    }
}

impl From<serde_json::Error> for CanvasError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CanvasError::configuration("qubit_count", "must be at most 8");
        assert!(err.to_string().contains("qubit_count"));
        assert!(err.to_string().contains("at most 8"));

        let err = CanvasError::resource("amplitude vector", 256);
        assert!(err.to_string().contains("256"));

        let err = CanvasError::Cancelled(Stage::Sampling);
        assert!(err.to_string().contains("Sampling"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<u32>("not json");
        let err: CanvasError = parse.unwrap_err().into();
        assert!(matches!(err, CanvasError::Serialization(_)));
    }
}
