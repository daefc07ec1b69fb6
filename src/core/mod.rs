// src/core/mod.rs

//! Core data structures and types

pub mod constants;
pub mod error;
pub mod state;

// Re-export public types for convenient access via `qcanvas::core::TypeName`
pub use error::{CanvasError, Result};
pub use state::AmplitudeVector;
