// src/pipeline/stage.rs
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

use crate::core::{CanvasError, Result};

/// Lifecycle of one generation request.
///
/// `Idle → BuildingCircuit → Simulating → Sampling → Rendering → Done`, with
/// `Error` reachable from every non-terminal stage. `Done` and `Error` are
/// terminal until [`GenerationJob::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    BuildingCircuit,
    Simulating,
    Sampling,
    Rendering,
    Done,
    Error,
}

impl Stage {
    /// The only stage a successful step may move to.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::BuildingCircuit),
            Stage::BuildingCircuit => Some(Stage::Simulating),
            Stage::Simulating => Some(Stage::Sampling),
            Stage::Sampling => Some(Stage::Rendering),
            Stage::Rendering => Some(Stage::Done),
            Stage::Done | Stage::Error => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done | Stage::Error)
    }
}

/// Tracks the stage of one request and refuses illegal moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    stage: Stage,
    history: Vec<Stage>,
}

impl Default for GenerationJob {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationJob {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            history: vec![Stage::Idle],
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage visited since the last reset, in order.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Moves to `to`, which must be the direct successor of the current stage.
    pub fn advance(&mut self, to: Stage) -> Result<()> {
        if self.stage.next() != Some(to) {
            return Err(CanvasError::InvalidTransition { from: self.stage, to });
        }
        info!(from = ?self.stage, to = ?to, "stage transition");
        self.enter(to);
        Ok(())
    }

    /// Moves to `Error` from any non-terminal stage.
    pub fn fail(&mut self) -> Result<()> {
        if self.stage.is_terminal() {
            return Err(CanvasError::InvalidTransition {
                from: self.stage,
                to: Stage::Error,
            });
        }
        self.enter(Stage::Error);
        Ok(())
    }

    /// Returns a finished job to `Idle`. Resetting an idle job is a no-op;
    /// an in-flight job cannot be reset.
    pub fn reset(&mut self) -> Result<()> {
        match self.stage {
            Stage::Idle => Ok(()),
            s if s.is_terminal() => {
                *self = Self::new();
                Ok(())
            }
            from => Err(CanvasError::InvalidTransition { from, to: Stage::Idle }),
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.history.push(stage);
    }
}

/// Shared flag used to abandon a request between stages.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled(stage))` once the token has been cancelled.
    pub fn check(&self, stage: Stage) -> Result<()> {
        if self.is_cancelled() {
            Err(CanvasError::Cancelled(stage))
        } else {
            Ok(())
        }
    }

    /// Whether both handles refer to the same flag.
    pub fn same(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_forward_path() -> Result<()> {
        let mut job = GenerationJob::new();
        for stage in [
            Stage::BuildingCircuit,
            Stage::Simulating,
            Stage::Sampling,
            Stage::Rendering,
            Stage::Done,
        ] {
            job.advance(stage)?;
        }
        assert_eq!(job.stage(), Stage::Done);
        assert_eq!(job.history().len(), 6);
        Ok(())
    }

    #[test]
    fn test_skipping_is_rejected() {
        let mut job = GenerationJob::new();
        let err = job.advance(Stage::Simulating);
        assert_eq!(
            err,
            Err(CanvasError::InvalidTransition {
                from: Stage::Idle,
                to: Stage::Simulating
            })
        );
        assert_eq!(job.stage(), Stage::Idle);
    }

    #[test]
    fn test_terminal_stages_need_reset() -> Result<()> {
        let mut job = GenerationJob::new();
        job.advance(Stage::BuildingCircuit)?;
        job.fail()?;
        assert!(job.advance(Stage::Simulating).is_err());
        assert!(job.fail().is_err());
        job.reset()?;
        assert_eq!(job.stage(), Stage::Idle);
        job.advance(Stage::BuildingCircuit)?;
        assert!(job.reset().is_err());
        Ok(())
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(token.check(Stage::Idle).is_ok());
        clone.cancel();
        assert_eq!(token.check(Stage::Sampling), Err(CanvasError::Cancelled(Stage::Sampling)));
        assert!(token.same(&clone));
        assert!(!token.same(&CancelToken::new()));
    }
}
