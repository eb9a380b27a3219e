//! # Enemies
//!
//! Room-spawned monsters that close in on the player one cell per turn.

use crate::game::{Position, WorldQuery};
use crate::generation::Room;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Health every freshly spawned enemy starts with.
pub const ENEMY_BASE_HP: u32 = 20;

/// A single enemy on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
}

impl Enemy {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            hp: ENEMY_BASE_HP,
            max_hp: ENEMY_BASE_HP,
        }
    }

    /// Spawns `per_room` enemies inside the one-cell inset of every room but
    /// the first, which holds the player's spawn.
    ///
    /// Enemies never share a cell. A room whose interior is already full gets
    /// fewer enemies.
    pub fn spawn_in_rooms(rooms: &[Room], per_room: u32, rng: &mut StdRng) -> Vec<Enemy> {
        let mut taken: HashSet<Position> = HashSet::new();
        let mut enemies = Vec::new();

        for room in rooms.iter().skip(1) {
            let mut candidates = room.interior_positions();
            candidates.shuffle(rng);

            let mut placed = 0;
            for pos in candidates {
                if placed >= per_room {
                    break;
                }
                if taken.insert(pos) {
                    enemies.push(Enemy::new(pos));
                    placed += 1;
                }
            }
        }

        log::debug!("Spawned {} enemies in {} rooms", enemies.len(), rooms.len().saturating_sub(1));
        enemies
    }

    /// Moves one cell towards `target` when that gets strictly closer.
    ///
    /// Walkable cardinal neighbours are ranked by squared distance to the
    /// target; the first one not in `occupied` wins. Returns whether the enemy
    /// moved.
    pub fn step_towards(
        &mut self,
        target: Position,
        query: &WorldQuery<'_>,
        occupied: &HashSet<Position>,
    ) -> bool {
        let current = self.position.distance_squared(target);

        let mut candidates = query.walkable_neighbors(self.position);
        candidates.sort_by_key(|pos| pos.distance_squared(target));

        let next = candidates
            .into_iter()
            .take_while(|pos| pos.distance_squared(target) < current)
            .find(|pos| !occupied.contains(pos));

        match next {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
