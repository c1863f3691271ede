use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Multiplier applied to a mine's unit time for every extraction after
    /// the first inside a block window.
    pub throttle_factor: f64,
    /// Maximum event journal size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Whether dispatched events are journaled at all.
    pub record_events: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            throttle_factor: 0.7,
            max_events: 0,
            record_events: true,
        }
    }
}

impl SimConfig {
    /// Set the block-window throttle multiplier.
    pub fn with_throttle_factor(mut self, factor: f64) -> Self {
        self.throttle_factor = factor;
        self
    }

    /// Set the maximum event journal size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Enable or disable the event journal.
    pub fn with_record_events(mut self, record: bool) -> Self {
        self.record_events = record;
        self
    }

    /// Reject settings the extraction state machine cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.throttle_factor.is_finite() && self.throttle_factor > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "throttle factor must be positive, got {}",
                self.throttle_factor
            )));
        }
        Ok(())
    }
}
