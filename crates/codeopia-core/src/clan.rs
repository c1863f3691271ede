use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Static configuration of a clan, as supplied at world setup.
///
/// Non-mine clans only participate as transport targets and road endpoints;
/// their numeric fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClanConfig {
    /// Unique clan name.
    pub name: String,
    /// Whether this clan owns a gold mine that can supply transports.
    #[serde(default)]
    pub is_mine: bool,
    /// Maximum gold the mine holds when full.
    #[serde(default)]
    pub capacity: i64,
    /// Logical time needed to extract one unit of gold.
    #[serde(default)]
    pub unit_time: f64,
    /// Logical time between finishing an extraction and the mine refilling.
    #[serde(default)]
    pub refill_delay: f64,
}

impl ClanConfig {
    /// Configuration for a clan with a mine.
    pub fn mine(name: impl Into<String>, capacity: i64, unit_time: f64, refill_delay: f64) -> Self {
        Self {
            name: name.into(),
            is_mine: true,
            capacity,
            unit_time,
            refill_delay,
        }
    }

    /// Configuration for a clan without a mine.
    pub fn settlement(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_mine: false,
            capacity: 0,
            unit_time: 0.0,
            refill_delay: 0.0,
        }
    }

    /// Check that a mine's parameters can drive the extraction state machine.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("clan name must not be empty".into()));
        }
        if !self.is_mine {
            return Ok(());
        }
        if self.capacity < 0 {
            return Err(CoreError::Validation(format!(
                "mine \"{}\" has negative capacity {}",
                self.name, self.capacity
            )));
        }
        if !(self.unit_time.is_finite() && self.unit_time > 0.0) {
            return Err(CoreError::Validation(format!(
                "mine \"{}\" needs a positive unit time, got {}",
                self.name, self.unit_time
            )));
        }
        if !(self.refill_delay.is_finite() && self.refill_delay >= 0.0) {
            return Err(CoreError::Validation(format!(
                "mine \"{}\" has invalid refill delay {}",
                self.name, self.refill_delay
            )));
        }
        Ok(())
    }
}

/// An extraction currently running at a mine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction {
    /// Logical time the extraction began.
    pub started_at: f64,
    /// Units of gold requested.
    pub amount: i64,
    /// Per-unit time in effect for this extraction (normal or throttled).
    pub unit_time: f64,
}

impl Extraction {
    /// Logical time at which the extraction finishes.
    pub fn completes_at(&self) -> f64 {
        self.started_at + self.amount as f64 * self.unit_time
    }

    /// Whole units extracted by `now`, never more than requested.
    pub fn extracted_by(&self, now: f64) -> i64 {
        let elapsed = (now - self.started_at).max(0.0);
        let done = (elapsed / self.unit_time).floor() as i64;
        done.min(self.amount)
    }
}

/// An active block on a clan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockWindow {
    /// Logical time the block expires.
    pub until: f64,
    /// Whether one extraction has already been served at normal rate.
    pub first_served: bool,
}

/// A clan and, if it owns a mine, the mine's live state.
#[derive(Debug, Clone)]
pub struct Clan {
    config: ClanConfig,
    available: i64,
    extraction: Option<Extraction>,
    block: Option<BlockWindow>,
}

impl Clan {
    /// Create a clan from a validated configuration. Mines start full.
    pub fn new(config: ClanConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            available: config.capacity,
            config,
            extraction: None,
            block: None,
        })
    }

    /// The clan's unique name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The static configuration this clan was built from.
    pub fn config(&self) -> &ClanConfig {
        &self.config
    }

    /// Whether this clan owns a mine.
    pub fn is_mine(&self) -> bool {
        self.config.is_mine
    }

    /// Maximum gold the mine holds.
    pub fn capacity(&self) -> i64 {
        self.config.capacity
    }

    /// Nominal per-unit extraction time.
    pub fn unit_time(&self) -> f64 {
        self.config.unit_time
    }

    /// Delay between finishing an extraction and refilling.
    pub fn refill_delay(&self) -> f64 {
        self.config.refill_delay
    }

    /// Gold currently in the mine. Can be negative after over-extraction.
    pub fn available(&self) -> i64 {
        self.available
    }

    /// Whether an extraction is in flight.
    pub fn is_busy(&self) -> bool {
        self.extraction.is_some()
    }

    /// The in-flight extraction, if any.
    pub fn extraction(&self) -> Option<&Extraction> {
        self.extraction.as_ref()
    }

    /// Whether a block is currently in effect.
    pub fn is_blocked(&self) -> bool {
        self.block.is_some()
    }

    /// The active block window, if any.
    pub fn block_window(&self) -> Option<&BlockWindow> {
        self.block.as_ref()
    }

    /// Start extracting `amount` units at `now` and return the completion time.
    ///
    /// Outside a block window the nominal unit time applies. Inside one, the
    /// first extraction still runs at the nominal rate and every later one
    /// has its unit time multiplied by `throttle_factor`.
    pub fn begin_extraction(&mut self, now: f64, amount: i64, throttle_factor: f64) -> f64 {
        let unit_time = match self.block.as_mut() {
            Some(window) if now < window.until => {
                if window.first_served {
                    self.config.unit_time * throttle_factor
                } else {
                    window.first_served = true;
                    self.config.unit_time
                }
            }
            _ => self.config.unit_time,
        };

        let extraction = Extraction {
            started_at: now,
            amount,
            unit_time,
        };
        self.extraction = Some(extraction);
        extraction.completes_at()
    }

    /// Finish an extraction of `amount` units. No floor is applied.
    pub fn finish_extraction(&mut self, amount: i64) {
        self.available -= amount;
        self.extraction = None;
        if self.available < 0 {
            tracing::warn!(
                clan = %self.config.name,
                available = self.available,
                "mine stock went negative"
            );
        }
    }

    /// Restore the mine to full capacity and clear any in-flight extraction.
    pub fn refill(&mut self) {
        self.available = self.config.capacity;
        self.extraction = None;
    }

    /// Open a new block window lasting `duration` from `now`.
    pub fn block(&mut self, now: f64, duration: f64) {
        self.block = Some(BlockWindow {
            until: now + duration,
            first_served: false,
        });
    }

    /// Lift the current block.
    pub fn unblock(&mut self) {
        self.block = None;
    }

    /// Gold available as of `now`, interpolating any in-flight extraction.
    ///
    /// While busy this reports capacity minus the whole units extracted so far
    /// at the unit time fixed when the extraction began.
    pub fn available_at(&self, now: f64) -> i64 {
        match &self.extraction {
            Some(extraction) => self.config.capacity - extraction.extracted_by(now),
            None => self.available,
        }
    }
}
