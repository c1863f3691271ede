//! Declarative scenarios: a world plus a timed query script, loaded from JSON.

use codeopia_core::{ClanConfig, Road};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::report::StatusReport;
use crate::simulation::Simulation;

/// A query issued to the simulation at a logical time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Request gold for a target clan.
    Transport {
        /// Query time.
        time: f64,
        /// Clan receiving the gold.
        target: String,
        /// Units of gold required.
        amount: i64,
        /// Payoff credited on return.
        payoff: f64,
    },
    /// Block a clan for a while.
    Block {
        /// Query time.
        time: f64,
        /// Clan to block.
        clan: String,
        /// Length of the block window.
        duration: f64,
    },
    /// Report mine gold levels.
    Status {
        /// Query time.
        time: f64,
    },
    /// Report the payoff total.
    Payoff {
        /// Query time.
        time: f64,
    },
    /// Process pending events without reporting.
    Flush {
        /// Query time.
        time: f64,
    },
}

impl Query {
    /// The logical time this query is issued at.
    pub fn time(&self) -> f64 {
        match self {
            Self::Transport { time, .. }
            | Self::Block { time, .. }
            | Self::Status { time }
            | Self::Payoff { time }
            | Self::Flush { time } => *time,
        }
    }
}

/// The result of a reporting query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Answer to [`Query::Status`].
    Status(StatusReport),
    /// Answer to [`Query::Payoff`].
    Payoff(f64),
}

/// A complete, self-contained simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Engine settings.
    #[serde(default)]
    pub config: SimConfig,
    /// Clans to create, in order.
    pub clans: Vec<ClanConfig>,
    /// Roads between clans.
    #[serde(default)]
    pub roads: Vec<Road>,
    /// Queries to issue, in non-decreasing time order.
    #[serde(default)]
    pub queries: Vec<Query>,
}

impl Scenario {
    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the simulation with all clans and roads in place and no queries run.
    pub fn build(&self) -> SimResult<Simulation> {
        let mut sim = Simulation::new(self.config.clone())?;
        for clan in &self.clans {
            sim.add_clan(clan.clone())?;
        }
        for road in &self.roads {
            sim.add_road(&road.from, &road.to, road.time)?;
        }
        Ok(sim)
    }

    /// Build the simulation and issue every query, collecting the reports.
    pub fn run(&self) -> SimResult<Vec<QueryOutcome>> {
        let mut sim = self.build()?;
        let mut outcomes = Vec::new();
        for query in &self.queries {
            if let Some(outcome) = sim.apply(query)? {
                outcomes.push(outcome);
            }
        }
        Ok(outcomes)
    }
}

impl Simulation {
    /// Issue one query. Reporting queries return their answer.
    pub fn apply(&mut self, query: &Query) -> SimResult<Option<QueryOutcome>> {
        match query {
            Query::Transport {
                time,
                target,
                amount,
                payoff,
            } => {
                self.submit_transport(*time, target, *amount, *payoff)?;
                Ok(None)
            }
            Query::Block {
                time,
                clan,
                duration,
            } => {
                self.submit_block(*time, clan, *duration)?;
                Ok(None)
            }
            Query::Status { time } => Ok(Some(QueryOutcome::Status(self.query_status(*time)?))),
            Query::Payoff { time } => Ok(Some(QueryOutcome::Payoff(self.query_payoff(*time)?))),
            Query::Flush { time } => {
                self.flush_to(*time)?;
                Ok(None)
            }
        }
    }
}
