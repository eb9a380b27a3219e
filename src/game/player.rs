//! # Player
//!
//! The player character: grid position, sprite facing and level-based stats.

use crate::game::{Direction, Position, WorldQuery};
use crate::rendering::{Camera, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Experience needed for each level-up.
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

/// Horizontal facing, used to mirror the player sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Base and derived character statistics.
///
/// Every derived maximum is its base value plus the current level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_mp: u32,
    pub level: u32,
    pub experience: u32,
    pub current_hp: u32,
}

impl PlayerStats {
    /// Level 1 stats with full health.
    pub fn new() -> Self {
        let mut stats = Self {
            base_hp: 100,
            base_attack: 5,
            base_defense: 5,
            base_mp: 5,
            level: 1,
            experience: 0,
            current_hp: 0,
        };
        stats.current_hp = stats.max_hp();
        stats
    }

    pub fn max_hp(&self) -> u32 {
        self.base_hp + self.level
    }

    pub fn attack(&self) -> u32 {
        self.base_attack + self.level
    }

    pub fn defense(&self) -> u32 {
        self.base_defense + self.level
    }

    pub fn max_mp(&self) -> u32 {
        self.base_mp + self.level
    }

    /// Subtracts `amount` from current health, stopping at zero.
    ///
    /// Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self.current_hp
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp == 0
    }

    /// Adds experience and applies every level-up it pays for.
    ///
    /// Each level-up restores as much health as the maximum grew. Returns the
    /// number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);

        let mut gained = 0;
        while self.experience >= EXPERIENCE_PER_LEVEL {
            self.experience -= EXPERIENCE_PER_LEVEL;
            let old_max = self.max_hp();
            self.level += 1;
            self.current_hp += self.max_hp() - old_max;
            gained += 1;
            log::info!("Level up! Now level {}", self.level);
        }
        gained
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub facing: Facing,
    pub stats: PlayerStats,
}

impl Player {
    /// Creates a fresh level 1 player at `position`, facing right.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Player, Position};
    ///
    /// let player = Player::new(Position::new(4, 4));
    /// assert_eq!(player.stats.max_hp(), 101);
    /// assert_eq!(player.stats.current_hp, 101);
    /// ```
    pub fn new(position: Position) -> Self {
        Self {
            position,
            facing: Facing::Right,
            stats: PlayerStats::new(),
        }
    }

    /// Steps one cell in `direction` if the destination is walkable and free.
    ///
    /// Horizontal input turns the player even when the step is refused.
    /// Returns whether the player moved.
    pub fn try_move(
        &mut self,
        direction: Direction,
        query: &WorldQuery<'_>,
        blocked: &HashSet<Position>,
    ) -> bool {
        match direction {
            Direction::West => self.facing = Facing::Left,
            Direction::East => self.facing = Facing::Right,
            Direction::North | Direction::South => {}
        }

        let target = self.position + direction.to_delta();
        if !query.is_walkable_at(target) || blocked.contains(&target) {
            return false;
        }

        self.position = target;
        true
    }

    /// Places the player on a new level without touching stats.
    pub fn teleport(&mut self, position: Position) {
        self.position = position;
    }

    /// A camera centred on the player's tile and clamped to the world.
    pub fn camera_target(&self, query: &WorldQuery<'_>, viewport: Viewport) -> Camera {
        let mut camera = Camera::new();
        camera.follow(
            self.position,
            query.tile_size(),
            viewport.size(),
            query.grid().pixel_size(),
        );
        camera
    }
}
