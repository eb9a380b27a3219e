//! # Dungeon Generation
//!
//! Procedural dungeon layout generation using a room-and-corridor algorithm.
//!
//! Rooms are dropped at random inside the grid and every room is joined to
//! the one generated before it by an L-shaped corridor. Carving only ever
//! turns wall into floor, so overlapping rooms and corridors are harmless and
//! the chain of corridors makes every room reachable from the first one.

use crate::game::{Grid, Position, TileType, WorldQuery};
use crate::generation::{pick_floor_in_room, utils, GenerationConfig, Generator, LevelLayout, Room};
use crate::utils::reachable_from;
use crate::{DelveError, DelveResult};
use rand::{rngs::StdRng, Rng};
use std::collections::HashSet;

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// A generation pass:
/// 1. Resets the whole grid to wall
/// 2. Places `room_count` rooms with a one-cell border margin, redrawing the
///    size of any room that cannot fit and skipping it after
///    `max_placement_attempts` redraws
/// 3. Carves each room and links it to its predecessor with an L-shaped
///    corridor (horizontal run along the source row, then vertical run along
///    the destination column)
/// 4. Picks the spawn (first room's center) and the stairs (a floor cell of
///    the last room)
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether to check room reachability after every pass
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GenerationConfig, Generator, Grid, RoomCorridorGenerator};
    /// use delve::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::new(9);
    /// let mut grid = Grid::new(config.width, config.height, config.tile_size).unwrap();
    /// let mut rng = create_rng(&config);
    ///
    /// let layout = RoomCorridorGenerator::new().generate(&mut grid, &config, &mut rng);
    /// assert!(layout.rooms.len() <= 5);
    /// ```
    pub fn new() -> Self {
        Self {
            ensure_connectivity: true,
        }
    }

    /// Attempts to place a single room, redrawing its size when it cannot fit.
    fn try_place_room(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut StdRng,
        room_id: u32,
    ) -> Option<Room> {
        for _ in 0..config.max_placement_attempts {
            let width = rng.gen_range(config.room_min_size..=config.room_max_size);
            let height = rng.gen_range(config.room_min_size..=config.room_max_size);

            // Keep a one-cell wall margin on every side.
            let max_x = grid.width() as i64 - width as i64 - 1;
            let max_y = grid.height() as i64 - height as i64 - 1;
            if max_x < 1 || max_y < 1 {
                continue;
            }

            let x = rng.gen_range(1..=max_x) as i32;
            let y = rng.gen_range(1..=max_y) as i32;

            return Some(Room::new(room_id, Position::new(x, y), width, height));
        }

        None
    }

    /// Carves out a room by setting every cell it covers to floor.
    ///
    /// Cells outside the grid are ignored.
    pub fn carve_room(&self, grid: &mut Grid, room: &Room) {
        for pos in room.all_positions() {
            grid.set(pos, TileType::Floor);
        }
    }

    /// Carves an L-shaped corridor between two points.
    ///
    /// The horizontal run goes along `start.y` from `start.x` to `end.x`, then
    /// the vertical run goes along `end.x` from `start.y` to `end.y`, so the
    /// elbow sits at `(end.x, start.y)`. Both endpoints are carved.
    pub fn carve_l_corridor(&self, grid: &mut Grid, start: Position, end: Position) {
        let step_x = (end.x - start.x).signum();
        let mut x = start.x;
        loop {
            grid.set(Position::new(x, start.y), TileType::Floor);
            if x == end.x {
                break;
            }
            x += step_x;
        }

        let step_y = (end.y - start.y).signum();
        let mut y = start.y;
        loop {
            grid.set(Position::new(end.x, y), TileType::Floor);
            if y == end.y {
                break;
            }
            y += step_y;
        }
    }

    /// Picks the staircase cell inside the last room, away from the spawn.
    fn place_stairs(
        &self,
        grid: &Grid,
        rooms: &[Room],
        spawn: Option<Position>,
        rng: &mut StdRng,
    ) -> Option<Position> {
        let last_room = rooms.last()?;
        let occupied: HashSet<Position> = spawn.into_iter().collect();
        pick_floor_in_room(&WorldQuery::new(grid), rng, last_room, &occupied)
    }
}

impl Generator for RoomCorridorGenerator {
    type Output = LevelLayout;

    fn generate(&self, grid: &mut Grid, config: &GenerationConfig, rng: &mut StdRng) -> LevelLayout {
        // Stale floor from a previous level must never leak into this one.
        grid.fill_all(TileType::Wall);

        if let Err(e) = config.validate() {
            log::error!("{}; leaving the level empty", e);
            return LevelLayout::default();
        }

        let mut rooms: Vec<Room> = Vec::with_capacity(config.room_count as usize);
        let mut skipped = 0;

        for _ in 0..config.room_count {
            let Some(mut room) = self.try_place_room(grid, config, rng, rooms.len() as u32) else {
                skipped += 1;
                continue;
            };

            self.carve_room(grid, &room);

            if let Some(previous) = rooms.last_mut() {
                self.carve_l_corridor(grid, previous.center(), room.center());
                previous.add_connection(room.id);
                room.add_connection(previous.id);
            }

            rooms.push(room);
        }

        if skipped > 0 {
            log::warn!(
                "Skipped {} of {} rooms: {}x{} grid cannot fit rooms of size {}..={}",
                skipped,
                config.room_count,
                grid.width(),
                grid.height(),
                config.room_min_size,
                config.room_max_size
            );
        }

        let spawn = rooms.first().map(Room::center);
        let stairs = self.place_stairs(grid, &rooms, spawn, rng);
        let layout = LevelLayout {
            rooms,
            spawn,
            stairs,
        };

        if self.ensure_connectivity {
            if let Err(e) = self.validate(grid, &layout) {
                log::error!("{}", e);
            }
        }

        log::info!(
            "{} generated {} rooms, {} floor tiles, stairs at {:?}",
            self.generator_type(),
            layout.rooms.len(),
            grid.floor_count(),
            layout.stairs
        );

        layout
    }

    fn validate(&self, grid: &Grid, layout: &LevelLayout) -> DelveResult<()> {
        utils::validate_level(grid, layout)?;

        let Some(first) = layout.rooms.first() else {
            return Ok(());
        };

        let reachable = reachable_from(&WorldQuery::new(grid), first.center());
        for room in &layout.rooms {
            if !reachable.contains(&room.center()) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} is not connected to room {}",
                    room.id, first.id
                )));
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}
