//! # World
//!
//! The aggregate that owns the tile grid and rebuilds it in place.

use crate::game::{Grid, Position, WorldQuery};
use crate::generation::{utils, GenerationConfig, Generator, LevelLayout, Room, RoomCorridorGenerator};
use crate::DelveResult;
use rand::rngs::StdRng;

/// The current dungeon level and everything needed to rebuild it.
///
/// Regeneration reuses the same grid allocation and the same random stream,
/// so a world created from a given seed always produces the same sequence of
/// levels.
///
/// # Examples
///
/// ```
/// use delve::{GenerationConfig, World};
///
/// let mut world = World::new(GenerationConfig::for_testing(7)).unwrap();
/// assert_eq!(world.depth(), 1);
///
/// world.descend();
/// assert_eq!(world.depth(), 2);
/// assert!(world.spawn().map(|p| world.query().is_walkable_at(p)).unwrap_or(true));
/// ```
#[derive(Debug, Clone)]
pub struct World {
    grid: Grid,
    layout: LevelLayout,
    generator: RoomCorridorGenerator,
    config: GenerationConfig,
    rng: StdRng,
    depth: u32,
}

impl World {
    /// Validates `config`, allocates the grid and generates the first level.
    pub fn new(config: GenerationConfig) -> DelveResult<Self> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height, config.tile_size)?;
        let rng = utils::create_rng(&config);

        let mut world = Self {
            grid,
            layout: LevelLayout::default(),
            generator: RoomCorridorGenerator::new(),
            config,
            rng,
            depth: 1,
        };
        world.regenerate();
        Ok(world)
    }

    /// Rebuilds the level in place with the next draw of the random stream.
    pub fn regenerate(&mut self) -> &LevelLayout {
        self.layout = self
            .generator
            .generate(&mut self.grid, &self.config, &mut self.rng);
        &self.layout
    }

    /// Moves one level deeper and generates it.
    pub fn descend(&mut self) -> &LevelLayout {
        self.depth += 1;
        log::info!("Descending to depth {}", self.depth);
        self.regenerate()
    }

    /// Read-only walkability view of the current level.
    pub fn query(&self) -> WorldQuery<'_> {
        WorldQuery::new(&self.grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    /// Rooms of the current level in generation order.
    pub fn rooms(&self) -> &[Room] {
        &self.layout.rooms
    }

    /// Player start cell, `None` when no room could be placed.
    pub fn spawn(&self) -> Option<Position> {
        self.layout.spawn
    }

    /// Staircase cell leading to the next depth.
    pub fn stairs(&self) -> Option<Position> {
        self.layout.stairs
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn tile_size(&self) -> u32 {
        self.grid.tile_size()
    }

    /// Current depth, starting at 1.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Splits the world into its read-only level view and the random stream,
    /// for scattering entities over the current level.
    pub fn placement_context(&mut self) -> (WorldQuery<'_>, &LevelLayout, &mut StdRng) {
        (WorldQuery::new(&self.grid), &self.layout, &mut self.rng)
    }

    /// Starts over at depth 1 with a fresh level.
    pub fn restart(&mut self) -> &LevelLayout {
        self.depth = 1;
        self.regenerate()
    }

    /// Runs the connectivity check on the current level.
    pub fn validate(&self) -> DelveResult<()> {
        self.generator.validate(&self.grid, &self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DelveError;

    #[test]
    fn test_new_generates_first_level() {
        let world = World::new(GenerationConfig::new(42)).unwrap();

        assert_eq!(world.width(), 50);
        assert_eq!(world.height(), 50);
        assert_eq!(world.tile_size(), 48);
        assert_eq!(world.depth(), 1);
        assert!(!world.rooms().is_empty());
        assert_eq!(world.spawn(), Some(world.rooms()[0].center()));
        assert!(world.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GenerationConfig::for_testing(1);
        config.room_min_size = 10;
        config.room_max_size = 4;
        assert!(matches!(World::new(config), Err(DelveError::InvalidConfig(_))));

        let mut config = GenerationConfig::for_testing(1);
        config.width = 0;
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_same_seed_same_levels() {
        let mut a = World::new(GenerationConfig::for_testing(77)).unwrap();
        let mut b = World::new(GenerationConfig::for_testing(77)).unwrap();
        assert_eq!(a.grid(), b.grid());

        a.regenerate();
        b.regenerate();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.layout(), b.layout());
    }

    #[test]
    fn test_regenerate_keeps_dimensions_and_depth() {
        let mut world = World::new(GenerationConfig::for_testing(3)).unwrap();
        let before = world.grid().clone();

        world.regenerate();
        assert_eq!(world.depth(), 1);
        assert_eq!(world.width(), before.width());
        assert_eq!(world.height(), before.height());
        assert!(world.validate().is_ok());
    }

    #[test]
    fn test_descend_increments_depth() {
        let mut world = World::new(GenerationConfig::for_testing(5)).unwrap();
        world.descend();
        world.descend();
        assert_eq!(world.depth(), 3);
        if let Some(stairs) = world.stairs() {
            assert!(world.query().is_walkable_at(stairs));
            assert!(world.rooms().last().map(|r| r.contains(stairs)).unwrap_or(false));
        }

        world.restart();
        assert_eq!(world.depth(), 1);
    }

    #[test]
    fn test_placement_context_sees_current_level() {
        let mut world = World::new(GenerationConfig::for_testing(9)).unwrap();
        let floor = world.grid().floor_count();
        let rooms = world.rooms().len();

        let (query, layout, _rng) = world.placement_context();
        assert_eq!(query.grid().floor_count(), floor);
        assert_eq!(layout.rooms.len(), rooms);
    }
}
