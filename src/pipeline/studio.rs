// src/pipeline/studio.rs
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info};

use super::{CancelToken, RenderedArtwork, Stage, generate_with};
use crate::config::GenerationConfig;
use crate::core::{CanvasError, Result};

/// Shared handle holding the latest completed artwork.
///
/// Submitting a request cancels the one in flight. A result is published
/// only if its request was not superseded in the meantime; failed and
/// cancelled requests leave the previous artwork in place.
///
/// # Example
/// ```
/// use qcanvas::config::GenerationConfig;
/// use qcanvas::pipeline::Studio;
///
/// let studio = Studio::new();
/// assert!(studio.latest().is_none());
/// let art = studio.submit(&GenerationConfig::seeded(5).with_canvas_size(64)).unwrap();
/// assert_eq!(studio.latest().unwrap().job_id, art.job_id);
/// ```
#[derive(Debug, Default)]
pub struct Studio {
    latest: RwLock<Option<Arc<RenderedArtwork>>>,
    in_flight: Mutex<Option<CancelToken>>,
}

impl Studio {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published artwork.
    pub fn latest(&self) -> Option<Arc<RenderedArtwork>> {
        self.latest.read().clone()
    }

    /// Runs `config` on the calling thread and publishes the result.
    ///
    /// # Errors
    /// * `Cancelled` if a later submission superseded this one.
    /// * Any pipeline error.
    pub fn submit(&self, config: &GenerationConfig) -> Result<Arc<RenderedArtwork>> {
        let token = self.begin();
        let result = generate_with(config, &token);
        let outcome = result.and_then(|artwork| self.publish(&token, Arc::new(artwork)));
        self.finish(&token);
        outcome
    }

    /// Cancels the request in flight, if any.
    pub fn cancel_in_flight(&self) {
        if let Some(token) = self.in_flight.lock().take() {
            debug!("cancelling in-flight request");
            token.cancel();
        }
    }

    /// Whether a request is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    fn begin(&self) -> CancelToken {
        let token = CancelToken::new();
        if let Some(previous) = self.in_flight.lock().replace(token.clone()) {
            debug!("superseding in-flight request");
            previous.cancel();
        }
        token
    }

    fn publish(&self, token: &CancelToken, artwork: Arc<RenderedArtwork>) -> Result<Arc<RenderedArtwork>> {
        let mut slot = self.latest.write();
        if token.is_cancelled() {
            return Err(CanvasError::Cancelled(Stage::Done));
        }
        info!(job_id = %artwork.job_id, "published artwork");
        *slot = Some(Arc::clone(&artwork));
        Ok(artwork)
    }

    fn finish(&self, token: &CancelToken) {
        let mut in_flight = self.in_flight.lock();
        if in_flight.as_ref().is_some_and(|current| current.same(token)) {
            *in_flight = None;
        }
    }
}
