//! # World Query
//!
//! Read-only walkability facade used by movement, placement and pathing.

use crate::game::{Grid, Position};

/// Borrowed, read-only view of a [`Grid`].
///
/// Answers are computed from the grid at call time; nothing is cached, so a
/// query taken after regeneration always sees the new layout. The borrow
/// checker guarantees no query outlives a regeneration in progress.
///
/// # Examples
///
/// ```
/// use delve::{Grid, Position, TileType, WorldQuery};
///
/// let mut grid = Grid::new(20, 20, 48).unwrap();
/// grid.set(Position::new(5, 5), TileType::Floor);
///
/// let query = WorldQuery::new(&grid);
/// assert!(query.is_walkable(5, 5));
/// assert!(!query.is_walkable(-1, 5));
/// assert!(!query.is_walkable(20, 5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WorldQuery<'a> {
    grid: &'a Grid,
}

impl<'a> WorldQuery<'a> {
    /// Wraps a grid.
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Pixel edge length of one cell.
    pub fn tile_size(&self) -> u32 {
        self.grid.tile_size()
    }

    /// True when `(x, y)` is inside the grid and the cell is floor.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.is_walkable_at(Position::new(x, y))
    }

    /// Position-typed variant of [`WorldQuery::is_walkable`].
    pub fn is_walkable_at(&self, pos: Position) -> bool {
        self.grid
            .get(pos)
            .map(|tile| tile.is_passable())
            .unwrap_or(false)
    }

    /// Walkable cardinal neighbours of `pos`.
    pub fn walkable_neighbors(&self, pos: Position) -> Vec<Position> {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|&next| self.is_walkable_at(next))
            .collect()
    }

    /// The underlying grid.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
}

impl<'a> From<&'a Grid> for WorldQuery<'a> {
    fn from(grid: &'a Grid) -> Self {
        Self::new(grid)
    }
}
