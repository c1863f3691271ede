use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Travel time reported between clans with no connecting road path.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// An undirected road between two clans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    /// One endpoint.
    pub from: String,
    /// The other endpoint.
    pub to: String,
    /// Travel time along the road, in either direction.
    pub time: f64,
}

impl Road {
    /// Creates a road between `from` and `to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>, time: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            time,
        }
    }
}

/// Weighted undirected road graph keyed by clan name.
///
/// Parallel roads are kept; shortest-path search picks the cheapest.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    adjacency: HashMap<String, Vec<(String, f64)>>,
    road_count: usize,
}

impl RoadNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a road in both directions.
    pub fn add_road(&mut self, road: Road) -> CoreResult<()> {
        if !(road.time.is_finite() && road.time > 0.0) {
            return Err(CoreError::InvalidRoad {
                from: road.from,
                to: road.to,
                time: road.time,
            });
        }
        self.adjacency
            .entry(road.from.clone())
            .or_default()
            .push((road.to.clone(), road.time));
        self.adjacency
            .entry(road.to)
            .or_default()
            .push((road.from, road.time));
        self.road_count += 1;
        Ok(())
    }

    /// Roads leaving `clan`, as `(neighbor, time)` pairs.
    pub fn neighbors(&self, clan: &str) -> &[(String, f64)] {
        self.adjacency.get(clan).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of roads added (parallel roads count separately).
    pub fn road_count(&self) -> usize {
        self.road_count
    }

    /// Shortest travel time from `from` to `to` by Dijkstra's algorithm.
    ///
    /// Returns [`UNREACHABLE`] when no path exists and `0.0` when both ends
    /// are the same clan. Stops as soon as `to` is settled.
    pub fn shortest_time(&self, from: &str, to: &str) -> f64 {
        if from == to {
            return 0.0;
        }

        let mut dist: HashMap<&str, f64> = HashMap::new();
        let mut frontier = BinaryHeap::new();
        dist.insert(from, 0.0);
        frontier.push(Frontier {
            cost: 0.0,
            clan: from,
        });

        while let Some(Frontier { cost, clan }) = frontier.pop() {
            if clan == to {
                return cost;
            }
            if cost > dist.get(clan).copied().unwrap_or(UNREACHABLE) {
                continue;
            }
            for (neighbor, time) in self.neighbors(clan) {
                let next = cost + time;
                let best = dist.entry(neighbor.as_str()).or_insert(UNREACHABLE);
                if next < *best {
                    *best = next;
                    frontier.push(Frontier {
                        cost: next,
                        clan: neighbor.as_str(),
                    });
                }
            }
        }

        UNREACHABLE
    }

    /// Whether any road path connects `from` and `to`.
    pub fn is_reachable(&self, from: &str, to: &str) -> bool {
        self.shortest_time(from, to).is_finite()
    }
}

/// Min-heap entry for the Dijkstra frontier.
#[derive(Debug, Clone, Copy)]
struct Frontier<'a> {
    cost: f64,
    clan: &'a str,
}

impl PartialEq for Frontier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier<'_> {}

impl PartialOrd for Frontier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the cheapest entry sits on top of the max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.clan.cmp(self.clan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn network(roads: &[(&str, &str, f64)]) -> RoadNetwork {
        let mut net = RoadNetwork::new();
        for (a, b, t) in roads {
            net.add_road(Road::new(*a, *b, *t)).unwrap();
        }
        net
    }

    #[test]
    fn direct_road_both_directions() {
        let net = network(&[("clan_c", "clan_a", 10.0)]);
        assert_eq!(net.shortest_time("clan_c", "clan_a"), 10.0);
        assert_eq!(net.shortest_time("clan_a", "clan_c"), 10.0);
    }

    #[test]
    fn prefers_cheaper_multi_hop_path() {
        let net = network(&[("a", "b", 10.0), ("a", "c", 3.0), ("c", "b", 4.0)]);
        assert_eq!(net.shortest_time("a", "b"), 7.0);
    }

    #[test]
    fn parallel_roads_take_minimum() {
        let net = network(&[("a", "b", 9.0), ("a", "b", 2.0)]);
        assert_eq!(net.shortest_time("b", "a"), 2.0);
        assert_eq!(net.road_count(), 2);
    }

    #[test]
    fn same_clan_is_zero() {
        let net = RoadNetwork::new();
        assert_eq!(net.shortest_time("a", "a"), 0.0);
    }

    #[test]
    fn disconnected_is_unreachable() {
        let net = network(&[("a", "b", 1.0), ("c", "d", 1.0)]);
        assert_eq!(net.shortest_time("a", "d"), UNREACHABLE);
        assert!(!net.is_reachable("a", "d"));
        assert_eq!(net.shortest_time("a", "nowhere"), UNREACHABLE);
    }

    #[test]
    fn rejects_non_positive_time() {
        let mut net = RoadNetwork::new();
        assert!(matches!(
            net.add_road(Road::new("a", "b", 0.0)),
            Err(CoreError::InvalidRoad { .. })
        ));
        assert!(net.add_road(Road::new("a", "b", f64::NAN)).is_err());
        assert_eq!(net.road_count(), 0);
    }

    fn floyd_warshall(n: usize, roads: &[(usize, usize, u32)]) -> Vec<Vec<f64>> {
        let mut d = vec![vec![UNREACHABLE; n]; n];
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for &(a, b, t) in roads {
            let t = f64::from(t);
            if t < d[a][b] {
                d[a][b] = t;
                d[b][a] = t;
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let via = d[i][k] + d[k][j];
                    if via < d[i][j] {
                        d[i][j] = via;
                    }
                }
            }
        }
        d
    }

    proptest! {
        #[test]
        fn matches_all_pairs_reference(
            roads in prop::collection::vec((0usize..6, 0usize..6, 1u32..50), 0..15)
        ) {
            let mut net = RoadNetwork::new();
            for &(a, b, t) in &roads {
                net.add_road(Road::new(format!("c{a}"), format!("c{b}"), f64::from(t))).unwrap();
            }
            let expected = floyd_warshall(6, &roads);
            for i in 0..6 {
                for j in 0..6 {
                    let forward = net.shortest_time(&format!("c{i}"), &format!("c{j}"));
                    let backward = net.shortest_time(&format!("c{j}"), &format!("c{i}"));
                    prop_assert_eq!(forward, backward);
                    prop_assert_eq!(forward, expected[i][j]);
                }
            }
        }
    }
}
