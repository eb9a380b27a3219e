//! # Pathfinding Algorithms
//!
//! Breadth-first searches over walkable cells using 4-directional movement.

use crate::game::{Position, WorldQuery};
use pathfinding::prelude::{bfs, bfs_reach};
use std::collections::HashSet;

/// Every walkable cell reachable from `start`, including `start` itself.
///
/// Returns an empty set when `start` is not walkable.
pub fn reachable_from(query: &WorldQuery<'_>, start: Position) -> HashSet<Position> {
    if !query.is_walkable_at(start) {
        return HashSet::new();
    }

    bfs_reach(start, |&pos| query.walkable_neighbors(pos)).collect()
}

/// Shortest 4-directional walk from `start` to `goal`, both ends included.
pub fn shortest_path(
    query: &WorldQuery<'_>,
    start: Position,
    goal: Position,
) -> Option<Vec<Position>> {
    if !query.is_walkable_at(start) || !query.is_walkable_at(goal) {
        return None;
    }

    bfs(&start, |&pos| query.walkable_neighbors(pos), |&pos| pos == goal)
}
