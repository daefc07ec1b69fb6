// src/logging/mod.rs

//! Subscriber setup for the crate's `tracing` events.
//!
//! The library itself only emits events: `info` per pipeline stage, `debug`
//! for circuit and measurement summaries, `trace` per gate and `warn` for
//! clamped parameters and the hardware fallback. Binaries and tests that
//! want to see them call [`init_logging`] once.

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt as tracing_fmt};

use crate::core::{CanvasError, Result};

/// Formatter used for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// How the subscriber filters and formats events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Explicit directives such as `qcanvas::pipeline=debug,info`. When
    /// absent `RUST_LOG` is consulted, then [`default_directive`](Self::default_directive).
    pub directives: Option<String>,
    pub default_directive: String,
    /// Show module paths.
    pub include_targets: bool,
    pub ansi: bool,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directives: None,
            default_directive: "info".to_string(),
            include_targets: true,
            ansi: true,
            format: LogFormat::Compact,
        }
    }
}

impl LoggingConfig {
    /// Plain output with the given directives, for test harnesses.
    pub fn for_tests(directives: impl Into<String>) -> Self {
        Self {
            directives: Some(directives.into()),
            ansi: false,
            ..Self::default()
        }
    }

    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// The filter the subscriber will use.
    pub fn resolve_filter(&self) -> Result<EnvFilter> {
        match &self.directives {
            Some(directives) => EnvFilter::try_new(directives)
                .map_err(|e| CanvasError::Logging(format!("invalid directive '{}': {}", directives, e))),
            None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))),
        }
    }
}

/// Installs a global fmt subscriber.
///
/// # Errors
/// * `Logging` if the directives do not parse or a global subscriber is
///   already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = config.resolve_filter()?;
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Compact => Box::new(
            tracing_fmt::layer()
                .compact()
                .with_target(config.include_targets)
                .with_ansi(config.ansi),
        ),
        LogFormat::Pretty => Box::new(
            tracing_fmt::layer()
                .pretty()
                .with_target(config.include_targets)
                .with_ansi(config.ansi),
        ),
    };
    Registry::default()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| CanvasError::Logging(e.to_string()))
}
