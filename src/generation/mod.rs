//! # Generation Module
//!
//! Procedural content generation for dungeon levels.
//!
//! This module provides the room-and-corridor layout generator, the
//! configuration that drives it, and the random floor placement used for
//! traps and stairs. All randomness flows through an explicitly passed,
//! seedable [`StdRng`] so every layout can be reproduced from its seed.

pub mod dungeon;
pub mod placement;

pub use dungeon::*;
pub use placement::*;

use crate::config::{DEFAULT_DUNGEON_HEIGHT, DEFAULT_DUNGEON_WIDTH, DEFAULT_TILE_SIZE};
use crate::game::{Grid, Position};
use crate::{DelveError, DelveResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls the grid dimensions, room parameters and how many entities get
/// scattered over the finished layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Pixel edge length of one tile
    pub tile_size: u32,
    /// Number of rooms to attempt per level
    pub room_count: u32,
    /// Minimum room edge length
    pub room_min_size: u32,
    /// Maximum room edge length
    pub room_max_size: u32,
    /// Size redraws per room before the room is skipped
    pub max_placement_attempts: u32,
    /// Number of traps to scatter per level
    pub trap_count: u32,
    /// Enemies spawned in every room except the first
    pub enemies_per_room: u32,
}

impl GenerationConfig {
    /// Creates the default generation configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.room_count, 5);
    /// assert_eq!(config.room_min_size, 6);
    /// assert_eq!(config.room_max_size, 15);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: DEFAULT_DUNGEON_WIDTH,
            height: DEFAULT_DUNGEON_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            room_count: 5,
            room_min_size: 6,
            room_max_size: 15,
            max_placement_attempts: 10,
            trap_count: 30,
            enemies_per_room: 1,
        }
    }

    /// Creates a configuration for testing with a small grid and few entities.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 30,
            height: 30,
            tile_size: DEFAULT_TILE_SIZE,
            room_count: 4,
            room_min_size: 4,
            room_max_size: 8,
            max_placement_attempts: 10,
            trap_count: 5,
            enemies_per_room: 0,
        }
    }

    /// Checks that the values can drive a generation pass.
    ///
    /// Room sizes larger than the grid are accepted: those rooms are skipped at
    /// generation time rather than rejected here.
    pub fn validate(&self) -> DelveResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DelveError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.tile_size == 0 {
            return Err(DelveError::InvalidConfig(
                "tile size must be positive".to_string(),
            ));
        }
        if self.room_min_size == 0 {
            return Err(DelveError::InvalidConfig(
                "room_min_size must be positive".to_string(),
            ));
        }
        if self.room_min_size > self.room_max_size {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size ({}) exceeds room_max_size ({})",
                self.room_min_size, self.room_max_size
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(DelveError::InvalidConfig(
                "max_placement_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Represents a rectangular room in the dungeon.
///
/// The rectangle is half-open: it covers `[left, right) x [top, bottom)`.
/// Every cell of it is carved to floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Position of this room in the generation sequence
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room in tiles
    pub width: u32,
    /// Height of the room in tiles
    pub height: u32,
    /// Rooms joined to this one by a corridor
    pub connections: Vec<u32>,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Room, Position};
    ///
    /// let room = Room::new(0, Position::new(5, 5), 6, 6);
    /// assert_eq!(room.center(), Position::new(8, 8));
    /// assert_eq!(room.right(), 11);
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
            connections: Vec::new(),
        }
    }

    /// Leftmost column.
    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    /// Topmost row.
    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    /// One past the rightmost column.
    pub fn right(&self) -> i32 {
        self.top_left.x + self.width as i32
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> i32 {
        self.top_left.y + self.height as i32
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Gets the area of the room in tiles.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.left() && pos.y >= self.top() && pos.x < self.right() && pos.y < self.bottom()
    }

    /// Gets all positions within this room.
    pub fn all_positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);

        for y in self.top()..self.bottom() {
            for x in self.left()..self.right() {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Gets the positions at least one cell away from the room's edge.
    ///
    /// Rooms thinner than 3 cells have no interior and fall back to all positions.
    pub fn interior_positions(&self) -> Vec<Position> {
        if self.width < 3 || self.height < 3 {
            return self.all_positions();
        }

        let mut positions = Vec::new();
        for y in (self.top() + 1)..(self.bottom() - 1) {
            for x in (self.left() + 1)..(self.right() - 1) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }

    /// Adds a connection to another room.
    pub fn add_connection(&mut self, room_id: u32) {
        if !self.connections.contains(&room_id) {
            self.connections.push(room_id);
        }
    }
}

/// Result of one generation pass.
///
/// Consumers index rooms by sequence position: the first room is the spawn
/// room and the last one holds the stairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Rooms in generation order
    pub rooms: Vec<Room>,
    /// Player spawn cell (center of the first room)
    pub spawn: Option<Position>,
    /// Descending staircase cell inside the last room
    pub stairs: Option<Position>,
}

impl LevelLayout {
    /// The spawn room, if any room was placed.
    pub fn first_room(&self) -> Option<&Room> {
        self.rooms.first()
    }

    /// The exit room, if any room was placed.
    pub fn last_room(&self) -> Option<&Room> {
        self.rooms.last()
    }
}

/// Trait for procedural generators.
///
/// Generators write into a caller-owned grid so that references to the grid
/// stay valid across regenerations.
pub trait Generator {
    /// What the generator reports about the content it produced.
    type Output;

    /// Generates content into `grid` using the configuration and random number generator.
    fn generate(&self, grid: &mut Grid, config: &GenerationConfig, rng: &mut StdRng)
        -> Self::Output;

    /// Validates that the generated content meets requirements.
    fn validate(&self, grid: &Grid, content: &Self::Output) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Validates that a level with rooms has floor to stand on.
    pub fn validate_level(grid: &Grid, layout: &LevelLayout) -> DelveResult<()> {
        if !layout.rooms.is_empty() && grid.floor_count() == 0 {
            return Err(DelveError::GenerationFailed(
                "Level has rooms but no floor tiles".to_string(),
            ));
        }
        Ok(())
    }
}
