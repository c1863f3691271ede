use std::collections::BTreeMap;

use crate::clan::{Clan, ClanConfig};
use crate::error::{CoreError, CoreResult};
use crate::routing::{Road, RoadNetwork};

/// The clan map and the road network connecting it.
///
/// Clans are kept in name order, so every iteration over them (mine
/// selection, status listings) is reproducible.
#[derive(Debug, Clone, Default)]
pub struct World {
    clans: BTreeMap<String, Clan>,
    roads: RoadNetwork,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Add a clan. Names must be unique.
    pub fn add_clan(&mut self, config: ClanConfig) -> CoreResult<()> {
        if self.clans.contains_key(&config.name) {
            return Err(CoreError::DuplicateClan(config.name));
        }
        let clan = Clan::new(config)?;
        self.clans.insert(clan.name().to_string(), clan);
        Ok(())
    }

    /// Add an undirected road. Both endpoints must already exist.
    pub fn add_road(&mut self, road: Road) -> CoreResult<()> {
        self.require(&road.from)?;
        self.require(&road.to)?;
        self.roads.add_road(road)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a clan by name.
    pub fn clan(&self, name: &str) -> Option<&Clan> {
        self.clans.get(name)
    }

    /// Get a clan by name, or fail with [`CoreError::ClanNotFound`].
    pub fn require(&self, name: &str) -> CoreResult<&Clan> {
        self.clans
            .get(name)
            .ok_or_else(|| CoreError::ClanNotFound(name.to_string()))
    }

    /// Mutable variant of [`World::require`].
    pub fn require_mut(&mut self, name: &str) -> CoreResult<&mut Clan> {
        self.clans
            .get_mut(name)
            .ok_or_else(|| CoreError::ClanNotFound(name.to_string()))
    }

    /// All clans in name order.
    pub fn clans(&self) -> impl Iterator<Item = &Clan> {
        self.clans.values()
    }

    /// Clans that own a mine, in name order.
    pub fn mines(&self) -> impl Iterator<Item = &Clan> {
        self.clans.values().filter(|c| c.is_mine())
    }

    /// Number of clans.
    pub fn clan_count(&self) -> usize {
        self.clans.len()
    }

    /// The road network.
    pub fn roads(&self) -> &RoadNetwork {
        &self.roads
    }

    /// Shortest travel time between two clans. See [`RoadNetwork::shortest_time`].
    pub fn travel_time(&self, from: &str, to: &str) -> f64 {
        self.roads.shortest_time(from, to)
    }
}
