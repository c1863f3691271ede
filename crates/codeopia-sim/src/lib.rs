//! Discrete-event gold extraction and transport simulation for Codeopia.
//!
//! A [`Simulation`] advances logical time only when a query arrives. Each
//! query drains every event due by its timestamp, in time order with FIFO
//! tie-breaking, before it acts. Dispatching an event may schedule further
//! events, which are picked up within the same drain.

/// Logical simulation clock.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Event kinds, transport requests and the dispatched-event journal.
pub mod event;
/// Mine status reports.
pub mod report;
/// JSON-loadable scenarios and query scripts.
pub mod scenario;
/// Time-ordered event queue.
pub mod scheduler;
/// Top-level simulation orchestrator.
pub mod simulation;

/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of the event types.
pub use event::{EventLog, SimEvent, SimEventKind, TransportRequest};
/// Re-exports of the report types.
pub use report::{MineStatus, StatusReport};
/// Re-exports of the scenario types.
pub use scenario::{Query, QueryOutcome, Scenario};
/// Re-export of [`scheduler::EventQueue`].
pub use scheduler::EventQueue;
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
