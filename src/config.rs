//! Serializable run configuration.
//!
//! A [`WindowingConfig`] bundles the windowing strategy, the execution mode
//! and an optional input cap. It can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "strategy": { "kind": "session", "gap": 30 },
//!   "mode": { "kind": "parallel", "threads": 4, "partitions": 16 },
//!   "max_records": 1000000
//! }
//! ```
//!
//! Every field is optional; missing fields take the [`Default`] values
//! (global window, sequential execution, unbounded input).

use crate::error::WindowError;
use crate::runner::ExecMode;
use crate::strategy::WindowStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowingConfig {
    /// How records are assigned to windows.
    pub strategy: WindowStrategy,
    /// Sequential or parallel-by-key execution.
    pub mode: ExecMode,
    /// Stop reading input after this many records, then finalize what was
    /// accumulated. `None` reads everything.
    pub max_records: Option<usize>,
}

impl WindowingConfig {
    pub fn new(strategy: WindowStrategy) -> Self {
        Self { strategy, ..Self::default() }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// Validate the strategy and the parallelism settings.
    pub fn validate(&self) -> Result<(), WindowError> {
        self.strategy.validate()?;
        self.mode.validate()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s).context("parsing windowing config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading windowing config {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("loading {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
