use codeopia_core::{Clan, ClanConfig, Road, World};

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, SimEvent, SimEventKind, TransportRequest};
use crate::report::{MineStatus, StatusReport};
use crate::scheduler::EventQueue;

/// The top-level simulation orchestrator.
///
/// Owns the world, clock, event queue, event journal and the running payoff
/// total. Time only moves when a query arrives: every query first drains all
/// events due at or before its timestamp, then acts on the resulting state.
pub struct Simulation {
    world: World,
    clock: SimClock,
    queue: EventQueue,
    events: EventLog,
    config: SimConfig,
    total_payoff: f64,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("now", &self.clock.now())
            .field("clans", &self.world.clan_count())
            .field("pending", &self.queue.len())
            .field("total_payoff", &self.total_payoff)
            .finish()
    }
}

impl Simulation {
    /// Create an empty simulation.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_world(World::new(), config)
    }

    /// Create a simulation over an already populated world.
    pub fn with_world(world: World, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            world,
            clock: SimClock::new(),
            queue: EventQueue::new(),
            events: EventLog::new(config.max_events),
            config,
            total_payoff: 0.0,
        })
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Add a clan, with or without a mine.
    pub fn add_clan(&mut self, config: ClanConfig) -> SimResult<()> {
        self.world.add_clan(config)?;
        Ok(())
    }

    /// Add an undirected road between two existing clans.
    pub fn add_road(&mut self, from: &str, to: &str, time: f64) -> SimResult<()> {
        self.world.add_road(Road::new(from, to, time))?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Request `amount` gold for `target`, worth `payoff` once delivered.
    ///
    /// Picks the idle, reachable mine with the lowest estimated round trip
    /// (travel there and back plus extraction at nominal rate); ties go to the
    /// lexicographically smallest name. Returns the chosen mine, or `None`
    /// when no mine qualifies and the request is dropped.
    pub fn submit_transport(
        &mut self,
        time: f64,
        target: &str,
        amount: i64,
        payoff: f64,
    ) -> SimResult<Option<String>> {
        self.ensure_in_order(time)?;
        if amount < 0 {
            return Err(SimError::InvalidAmount(amount));
        }
        self.world.require(target)?;
        self.drain_until(time)?;

        let Some((supplier, travel)) = self.select_supplier(target, amount) else {
            tracing::warn!(time, target, amount, "no mine available, transport dropped");
            return Ok(None);
        };

        tracing::info!(time, target, %supplier, travel, amount, "mine selected");
        let request = TransportRequest {
            target: target.to_string(),
            amount,
            payoff,
            supplier: supplier.clone(),
        };
        self.queue.schedule(SimEvent::new(
            time + travel,
            SimEventKind::SupplierArrival(request),
        ));
        Ok(Some(supplier))
    }

    /// Block `clan` for `duration`, starting at `time`.
    pub fn submit_block(&mut self, time: f64, clan: &str, duration: f64) -> SimResult<()> {
        self.ensure_in_order(time)?;
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(SimError::InvalidDuration(duration));
        }
        self.world.require(clan)?;
        self.drain_until(time)?;

        self.queue.schedule(SimEvent::new(
            time,
            SimEventKind::BlockStart {
                clan: clan.to_string(),
                duration,
            },
        ));
        self.queue.schedule(SimEvent::new(
            time + duration,
            SimEventKind::BlockEnd {
                clan: clan.to_string(),
            },
        ));
        Ok(())
    }

    /// Gold levels of every mine as of `time`.
    pub fn query_status(&mut self, time: f64) -> SimResult<StatusReport> {
        self.catch_up(time)?;
        Ok(self.status())
    }

    /// Total payoff credited by `time`.
    pub fn query_payoff(&mut self, time: f64) -> SimResult<f64> {
        self.catch_up(time)?;
        Ok(self.total_payoff)
    }

    /// Process everything due by `time` without reporting.
    pub fn flush_to(&mut self, time: f64) -> SimResult<()> {
        self.catch_up(time)
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    /// Gold levels of every mine at the current clock, without draining.
    pub fn status(&self) -> StatusReport {
        let now = self.clock.now();
        let mut mines: Vec<MineStatus> = self
            .world
            .mines()
            .map(|mine| MineStatus {
                name: mine.name().to_string(),
                available: mine.available_at(now),
                capacity: mine.capacity(),
            })
            .collect();
        // Stable: equal capacities keep name order.
        mines.sort_by(|a, b| b.capacity.cmp(&a.capacity));
        StatusReport::new(mines)
    }

    /// Current logical time.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Payoff credited so far.
    pub fn total_payoff(&self) -> f64 {
        self.total_payoff
    }

    /// Number of events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Time of the next pending event.
    pub fn next_event_time(&self) -> Option<f64> {
        self.queue.next_time()
    }

    /// Look up a clan.
    pub fn clan(&self, name: &str) -> Option<&Clan> {
        self.world.clan(name)
    }

    /// The world being simulated.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Journal of dispatched events.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Configuration in effect.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Event processing
    // -----------------------------------------------------------------------

    fn ensure_in_order(&self, time: f64) -> SimResult<()> {
        if !time.is_finite() || !self.clock.accepts(time) {
            return Err(SimError::OutOfOrderQuery {
                requested: time,
                current: self.clock.now(),
            });
        }
        Ok(())
    }

    fn catch_up(&mut self, time: f64) -> SimResult<()> {
        self.ensure_in_order(time)?;
        self.drain_until(time)
    }

    /// Dispatch every event due at or before `horizon`, then set the clock to
    /// `horizon`. Events scheduled during dispatch are drained in the same pass.
    fn drain_until(&mut self, horizon: f64) -> SimResult<()> {
        while let Some(event) = self.queue.pop_due(horizon) {
            self.clock.advance_to(event.time);
            self.dispatch(event)?;
        }
        self.clock.advance_to(horizon);
        Ok(())
    }

    fn dispatch(&mut self, event: SimEvent) -> SimResult<()> {
        let now = self.clock.now();
        tracing::debug!(
            time = now,
            kind = event.kind.label(),
            clan = event.kind.clan(),
            "dispatching event"
        );
        if self.config.record_events {
            self.events.push(event.clone());
        }

        match event.kind {
            SimEventKind::SupplierArrival(request) => {
                let throttle = self.config.throttle_factor;
                let mine = self.world.require_mut(&request.supplier)?;
                let done_at = mine.begin_extraction(now, request.amount, throttle);
                self.queue.schedule(SimEvent::new(
                    done_at,
                    SimEventKind::ExtractionDone(request),
                ));
            }
            SimEventKind::ExtractionDone(request) => {
                let mine = self.world.require_mut(&request.supplier)?;
                mine.finish_extraction(request.amount);
                let refill_at = now + mine.refill_delay();
                let return_at = now + self.world.travel_time(&request.target, &request.supplier);
                let supplier = request.supplier.clone();
                self.queue
                    .schedule(SimEvent::new(return_at, SimEventKind::Return(request)));
                self.queue.schedule(SimEvent::new(
                    refill_at,
                    SimEventKind::Refill { clan: supplier },
                ));
            }
            SimEventKind::Return(request) => {
                self.total_payoff += request.payoff;
            }
            SimEventKind::Refill { clan } => {
                self.world.require_mut(&clan)?.refill();
            }
            SimEventKind::BlockStart { clan, duration } => {
                self.world.require_mut(&clan)?.block(now, duration);
            }
            SimEventKind::BlockEnd { clan } => {
                self.world.require_mut(&clan)?.unblock();
            }
        }
        Ok(())
    }

    /// Cheapest idle, reachable mine for `target` as `(name, one-way travel time)`.
    fn select_supplier(&self, target: &str, amount: i64) -> Option<(String, f64)> {
        let mut best: Option<(&Clan, f64, f64)> = None;
        for mine in self.world.mines() {
            if mine.is_busy() {
                continue;
            }
            let travel = self.world.travel_time(target, mine.name());
            if !travel.is_finite() {
                continue;
            }
            let cost = 2.0 * travel + amount as f64 * mine.unit_time();
            let better = match &best {
                Some((_, _, best_cost)) => cost < *best_cost,
                None => true,
            };
            if better {
                best = Some((mine, travel, cost));
            }
        }
        best.map(|(mine, travel, _)| (mine.name().to_string(), travel))
    }
}
