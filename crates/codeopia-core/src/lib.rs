//! Core types for Codeopia: clans, their gold mines, and the roads between them.
//!
//! This crate holds the world model the simulation runs on. It knows nothing
//! about event ordering; the extraction state machine on [`Clan`] is driven
//! by whoever owns the clock.

/// Clan records and the per-mine extraction/block state machine.
pub mod clan;
/// Error types used throughout the crate.
pub mod error;
/// Road network and shortest-path routing.
pub mod routing;
/// The container owning all clans and roads.
pub mod world;

/// Re-export clan types.
pub use clan::{BlockWindow, Clan, ClanConfig, Extraction};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export routing types.
pub use routing::{Road, RoadNetwork, UNREACHABLE};
/// Re-export the world model.
pub use world::World;
