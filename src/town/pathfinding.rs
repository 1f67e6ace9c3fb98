//! Access path search between districts
//!
//! A Dijkstra variant over the link graph with two domain rules:
//! - production districts absorb paths: once reached they are closed and
//!   never expand to further districts
//! - the search stops at the first relaxed neighbour of the requested type,
//!   returning its tentative distance even if a shorter route exists
//!
//! Edge costs are travel times: link length over `FAST_SPEED` between two
//! transport districts, over `DEFAULT_SPEED` otherwise.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::Serialize;

use crate::core::constants::{DEFAULT_SPEED, FAST_SPEED, INFINITE_TIME};
use crate::core::error::{Result, TownError};
use crate::core::types::Uid;
use crate::town::district::DistrictType;
use crate::town::state::Town;

/// Result of a path search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Uids from origin to destination; empty when nothing was found
    pub path: Vec<Uid>,
    /// Travel time to the destination, `INFINITE_TIME` when nothing was found
    pub distance: f64,
}

impl PathResult {
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: INFINITE_TIME,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.path.is_empty()
    }

    /// Destination uid, if a path was found
    pub fn destination(&self) -> Option<Uid> {
        self.path.last().copied()
    }
}

/// Per-district search state
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    visited: bool,
    distance: f64,
    parent: Option<Uid>,
}

/// Travel time along a link of the given length
pub fn access_time(from: DistrictType, to: DistrictType, length: f64) -> f64 {
    if from == DistrictType::Transport && to == DistrictType::Transport {
        length / FAST_SPEED
    } else {
        length / DEFAULT_SPEED
    }
}

impl Town {
    /// Find an access path from `origin` to the nearest district of type `target`
    ///
    /// Returns `NodeNotFound` if the origin is not part of the town. An
    /// unreachable target is a normal result (see `PathResult::unreachable`).
    pub fn path_find(&self, origin: Uid, target: DistrictType) -> Result<PathResult> {
        if self.get_district(origin).is_none() {
            return Err(TownError::NodeNotFound(origin));
        }

        let mut graph: BTreeMap<Uid, SearchNode> = self
            .districts()
            .map(|district| {
                let uid = district.uid();
                let distance = if uid == origin { 0.0 } else { INFINITE_TIME };
                (
                    uid,
                    SearchNode {
                        visited: false,
                        distance,
                        parent: None,
                    },
                )
            })
            .collect();
        let adjacency = self.adjacency();

        while let Some(current_uid) = next_node(&graph) {
            let Some(current) = self.get_district(current_uid) else {
                break;
            };
            let current_distance = graph[&current_uid].distance;

            for &neighbour_uid in adjacency.get(&current_uid).into_iter().flatten() {
                let Some(neighbour) = self.get_district(neighbour_uid) else {
                    continue;
                };
                let Some(entry) = graph.get_mut(&neighbour_uid) else {
                    continue;
                };
                if entry.visited {
                    continue;
                }

                let length = current.position().distance(&neighbour.position());
                let candidate = current_distance
                    + access_time(current.district_type(), neighbour.district_type(), length);
                if candidate < entry.distance {
                    entry.distance = candidate;
                    entry.parent = Some(current_uid);
                }

                // Production districts are dead ends
                if neighbour.is_type(DistrictType::Production) {
                    entry.visited = true;
                }

                if neighbour.is_type(target) {
                    let distance = entry.distance;
                    return Ok(PathResult {
                        path: reconstruct_path(&graph, neighbour_uid),
                        distance,
                    });
                }
            }

            if let Some(entry) = graph.get_mut(&current_uid) {
                entry.visited = true;
            }
        }

        Ok(PathResult::unreachable())
    }

    /// Neighbour lists in link insertion order
    fn adjacency(&self) -> AHashMap<Uid, Vec<Uid>> {
        let mut adjacency: AHashMap<Uid, Vec<Uid>> = AHashMap::new();
        for link in self.links() {
            adjacency.entry(link.uid0()).or_default().push(link.uid1());
            adjacency.entry(link.uid1()).or_default().push(link.uid0());
        }
        adjacency
    }
}

/// Unvisited, reachable node with the smallest distance (lowest uid on ties)
fn next_node(graph: &BTreeMap<Uid, SearchNode>) -> Option<Uid> {
    let mut closest: Option<(Uid, f64)> = None;
    for (&uid, node) in graph {
        if node.visited || node.distance >= INFINITE_TIME {
            continue;
        }
        if closest.map_or(true, |(_, best)| node.distance < best) {
            closest = Some((uid, node.distance));
        }
    }
    closest.map(|(uid, _)| uid)
}

/// Walk parents back from the destination
fn reconstruct_path(graph: &BTreeMap<Uid, SearchNode>, destination: Uid) -> Vec<Uid> {
    let mut path = vec![destination];
    let mut current = destination;
    while let Some(parent) = graph.get(&current).and_then(|node| node.parent) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::town::district::District;
    use crate::town::link::Link;

    fn town(districts: &[(DistrictType, Uid, f64, f64)], links: &[(Uid, Uid)]) -> Town {
        Town::from_parts(
            districts
                .iter()
                .map(|&(kind, uid, x, y)| District::new(kind, uid, Vec2::new(x, y), 1000).unwrap())
                .collect(),
            links.iter().map(|&(a, b)| Link::new(a, b).unwrap()).collect(),
        )
        .unwrap()
    }

    use DistrictType::{Housing, Production, Transport};

    #[test]
    fn test_direct_link_default_speed() {
        let town = town(&[(Housing, 0, 0.0, 0.0), (Transport, 1, 100.0, 0.0)], &[(0, 1)]);
        let result = town.path_find(0, Transport).unwrap();
        assert!(result.is_success());
        assert_eq!(result.path, vec![0, 1]);
        assert_eq!(result.destination(), Some(1));
        assert!((result.distance - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_link_fast_speed() {
        let town = town(&[(Transport, 0, 0.0, 0.0), (Transport, 1, 100.0, 0.0)], &[(0, 1)]);
        let result = town.path_find(0, Transport).unwrap();
        assert_eq!(result.path, vec![0, 1]);
        assert!((result.distance - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_disconnected_origin() {
        let town = town(&[(Housing, 0, 0.0, 0.0), (Transport, 1, 100.0, 0.0)], &[]);
        let result = town.path_find(0, Transport).unwrap();
        assert!(!result.is_success());
        assert_eq!(result.distance, INFINITE_TIME);
        assert!(result.path.is_empty());
        assert_eq!(result.destination(), None);
    }

    #[test]
    fn test_unknown_origin() {
        let town = town(&[(Housing, 0, 0.0, 0.0)], &[]);
        assert_eq!(town.path_find(3, Transport), Err(TownError::NodeNotFound(3)));
    }

    #[test]
    fn test_multi_hop_mixed_speeds() {
        // H0 -(100)- T1 -(200)- T2 -(100)- P3
        let town = town(
            &[
                (Housing, 0, 0.0, 0.0),
                (Transport, 1, 100.0, 0.0),
                (Transport, 2, 300.0, 0.0),
                (Production, 3, 400.0, 0.0),
            ],
            &[(0, 1), (1, 2), (2, 3)],
        );
        let result = town.path_find(0, Production).unwrap();
        assert_eq!(result.path, vec![0, 1, 2, 3]);
        // 100/5 + 200/20 + 100/5
        assert!((result.distance - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_production_absorbs_paths() {
        // The only way to the transport district goes through production
        let town = town(
            &[
                (Housing, 0, 0.0, 0.0),
                (Production, 1, 100.0, 0.0),
                (Transport, 2, 200.0, 0.0),
            ],
            &[(0, 1), (1, 2)],
        );
        let transport = town.path_find(0, Transport).unwrap();
        assert!(!transport.is_success());
        assert_eq!(transport.distance, INFINITE_TIME);

        // Production itself is still a valid destination
        let production = town.path_find(0, Production).unwrap();
        assert_eq!(production.path, vec![0, 1]);
    }

    #[test]
    fn test_early_exit_is_greedy() {
        // T1 is 500 away directly; T3 is 200 away through H2. The search stops
        // at the first transport district it relaxes.
        let town = town(
            &[
                (Housing, 0, 0.0, 0.0),
                (Transport, 1, 500.0, 0.0),
                (Housing, 2, 0.0, 100.0),
                (Transport, 3, 0.0, 200.0),
            ],
            &[(0, 1), (0, 2), (2, 3)],
        );
        let result = town.path_find(0, Transport).unwrap();
        assert_eq!(result.path, vec![0, 1]);
        assert!((result.distance - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_origin_type_is_not_a_destination() {
        let town = town(&[(Housing, 0, 0.0, 0.0)], &[]);
        let result = town.path_find(0, Housing).unwrap();
        assert!(!result.is_success());
    }

    #[test]
    fn test_next_node_prefers_lowest_uid_on_ties() {
        let mut graph = BTreeMap::new();
        for uid in [4, 2, 7] {
            graph.insert(
                uid,
                SearchNode {
                    visited: false,
                    distance: 1.0,
                    parent: None,
                },
            );
        }
        assert_eq!(next_node(&graph), Some(2));
    }

    #[test]
    fn test_access_time() {
        assert_eq!(access_time(Transport, Transport, 100.0), 5.0);
        assert_eq!(access_time(Housing, Transport, 100.0), 20.0);
        assert_eq!(access_time(Transport, Production, 100.0), 20.0);
    }
}
